use serde::{Deserialize, Serialize};

/// Ingredient functions a menu template can ask for.
///
/// The first five are coarse roles backed by a fixed vocabulary of item
/// names. The rest pick a specific cut and match by substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleTag {
    Protein,
    SideStarch,
    Fruit,
    Legume,
    SaladVegetable,
    Chicken,
    Fish,
    Pork,
    Beef,
    Egg,
    Tuna,
}

const PROTEIN_NAMES: &[&str] = &[
    "carne", "carne molida", "pollo", "pechuga de pollo", "cerdo", "chuleta de cerdo",
    "pescado", "salmón", "merluza", "atún", "huevo", "huevos", "pavo", "tofu",
];

const SIDE_STARCH_NAMES: &[&str] = &[
    "arroz", "papa", "papas", "fideos", "pasta", "quinoa", "cuscús", "camote", "pan",
    "choclo", "polenta", "tallarines",
];

const FRUIT_NAMES: &[&str] = &[
    "caqui", "manzana", "membrillo", "pera", "durazno", "naranja", "kiwi", "tuna", "higos",
    "mandarinas", "pepino dulce", "frutillas", "melón", "sandía", "frutos rojos", "arándanos",
    "plátano", "cerezas", "chirimoya", "damasco", "níspero", "piña", "uva",
];

const LEGUME_NAMES: &[&str] = &[
    "porotos", "porotos negros", "lentejas", "garbanzos", "arvejas", "habas", "soya",
];

const SALAD_VEGETABLE_NAMES: &[&str] = &[
    "lechuga", "tomate", "palta", "zanahoria", "betarraga", "cebolla", "pepino",
    "pepino ensalada", "apio", "repollo", "rabanito", "espinaca cruda", "achicoria",
    "acelga cruda", "pimentón", "choclo", "palmitos", "kale",
];

impl RoleTag {
    pub const ALL: [RoleTag; 11] = [
        RoleTag::Protein,
        RoleTag::SideStarch,
        RoleTag::Fruit,
        RoleTag::Legume,
        RoleTag::SaladVegetable,
        RoleTag::Chicken,
        RoleTag::Fish,
        RoleTag::Pork,
        RoleTag::Beef,
        RoleTag::Egg,
        RoleTag::Tuna,
    ];

    /// Placeholder word this role occupies in a template's step text.
    pub fn token(&self) -> &'static str {
        match self {
            RoleTag::Protein => "protein",
            RoleTag::SideStarch => "starch",
            RoleTag::Fruit => "fruit",
            RoleTag::Legume => "legume",
            RoleTag::SaladVegetable => "greens",
            RoleTag::Chicken => "chicken",
            RoleTag::Fish => "fish",
            RoleTag::Pork => "pork",
            RoleTag::Beef => "beef",
            RoleTag::Egg => "egg",
            RoleTag::Tuna => "tuna",
        }
    }

    /// Parses a kebab-case tag name, e.g. `side-starch`.
    pub fn parse(tag: &str) -> Option<RoleTag> {
        let wanted = tag.trim().to_lowercase();
        RoleTag::ALL.into_iter().find(|role| role.name() == wanted)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoleTag::Protein => "protein",
            RoleTag::SideStarch => "side-starch",
            RoleTag::Fruit => "fruit",
            RoleTag::Legume => "legume",
            RoleTag::SaladVegetable => "salad-vegetable",
            RoleTag::Chicken => "chicken",
            RoleTag::Fish => "fish",
            RoleTag::Pork => "pork",
            RoleTag::Beef => "beef",
            RoleTag::Egg => "egg",
            RoleTag::Tuna => "tuna",
        }
    }

    /// Whether an item name (already lowercased) fills this role.
    pub fn matches(&self, lowercase_name: &str) -> bool {
        let name = lowercase_name.trim();
        match self {
            RoleTag::Chicken => name.contains("pollo"),
            RoleTag::Fish => ["pescado", "salmón", "salmon", "merluza", "reineta"]
                .iter()
                .any(|needle| name.contains(needle)),
            RoleTag::Pork => name.contains("cerdo"),
            RoleTag::Beef => name.contains("carne") && !name.contains("cerdo"),
            RoleTag::Egg => name.contains("huevo"),
            RoleTag::Tuna => name.contains("atún") || name.contains("atun"),
            coarse => role_members(*coarse).contains(&name),
        }
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Recognized lowercase item names for a coarse role.
///
/// Substring-matched roles have no fixed vocabulary and return an empty slice.
pub fn role_members(role: RoleTag) -> &'static [&'static str] {
    match role {
        RoleTag::Protein => PROTEIN_NAMES,
        RoleTag::SideStarch => SIDE_STARCH_NAMES,
        RoleTag::Fruit => FRUIT_NAMES,
        RoleTag::Legume => LEGUME_NAMES,
        RoleTag::SaladVegetable => SALAD_VEGETABLE_NAMES,
        _ => &[],
    }
}

/// Same lookup keyed by tag name; unknown tags have no members.
pub fn role_members_by_name(tag: &str) -> &'static [&'static str] {
    RoleTag::parse(tag).map(role_members).unwrap_or(&[])
}
