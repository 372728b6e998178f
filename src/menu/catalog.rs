use serde::Serialize;

use crate::menu::roles::RoleTag;

/// Static recipe skeleton. Step text names each required role by its
/// [`RoleTag::token`], which rendering swaps for the chosen item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuTemplate {
    pub name: &'static str,
    pub roles: &'static [RoleTag],
    pub requires_salad: bool,
    pub steps: &'static [&'static str],
}

pub const MENU_CATALOG: &[MenuTemplate] = &[
    MenuTemplate {
        name: "Grilled chicken with a side and salad",
        roles: &[RoleTag::Chicken, RoleTag::SideStarch],
        requires_salad: true,
        steps: &[
            "Season the chicken with salt, pepper and garlic.",
            "Grill the chicken 6-7 minutes per side until cooked through.",
            "Cook the starch and keep it warm.",
            "Serve the chicken over the starch.",
        ],
    },
    MenuTemplate {
        name: "Baked fish with a side and salad",
        roles: &[RoleTag::Fish, RoleTag::SideStarch],
        requires_salad: true,
        steps: &[
            "Heat the oven to 200 °C.",
            "Lay the fish on a tray with olive oil, lemon and salt.",
            "Bake the fish 15-20 minutes.",
            "Meanwhile cook the starch.",
        ],
    },
    MenuTemplate {
        name: "Pork loin with stewed legumes",
        roles: &[RoleTag::Pork, RoleTag::Legume],
        requires_salad: false,
        steps: &[
            "Soak the legume overnight if dried, then simmer until tender.",
            "Brown the pork in a hot pan on both sides.",
            "Finish the pork in the pot with the legume for 10 minutes.",
        ],
    },
    MenuTemplate {
        name: "Beef stew",
        roles: &[RoleTag::Beef, RoleTag::SideStarch, RoleTag::Legume],
        requires_salad: false,
        steps: &[
            "Cut the beef into cubes and brown it with onion and garlic.",
            "Add water, the legume and the starch.",
            "Simmer covered for 45 minutes, stirring now and then.",
        ],
    },
    MenuTemplate {
        name: "Tuna bowl with salad",
        roles: &[RoleTag::Tuna, RoleTag::SideStarch],
        requires_salad: true,
        steps: &[
            "Cook the starch and let it cool.",
            "Drain the tuna and flake it with a fork.",
            "Top the starch with the tuna.",
        ],
    },
    MenuTemplate {
        name: "Scrambled egg with a side",
        roles: &[RoleTag::Egg, RoleTag::SideStarch],
        requires_salad: false,
        steps: &[
            "Warm up the starch in a pan.",
            "Beat the egg with a pinch of salt.",
            "Scramble the egg over low heat and serve next to the starch.",
        ],
    },
    MenuTemplate {
        name: "Legume stew with fruit for dessert",
        roles: &[RoleTag::Legume, RoleTag::SideStarch, RoleTag::Fruit],
        requires_salad: false,
        steps: &[
            "Simmer the legume with onion, carrot and paprika until tender.",
            "Stir in the starch and cook 10 more minutes.",
            "Cut the fruit and serve it as dessert.",
        ],
    },
    MenuTemplate {
        name: "Complete plate",
        roles: &[RoleTag::Protein, RoleTag::SideStarch, RoleTag::Fruit],
        requires_salad: true,
        steps: &[
            "Cook the protein the way you like it.",
            "Prepare the starch as a side.",
            "Serve the fruit as dessert.",
        ],
    },
    MenuTemplate {
        name: "Protein and salad",
        roles: &[RoleTag::Protein],
        requires_salad: true,
        steps: &["Season and cook the protein on the grill or in a pan."],
    },
    MenuTemplate {
        name: "Egg and fruit breakfast",
        roles: &[RoleTag::Egg, RoleTag::Fruit],
        requires_salad: false,
        steps: &[
            "Boil the egg for 8 minutes, then cool it in cold water.",
            "Slice the fruit and serve it with the egg.",
        ],
    },
];

pub fn find_template(name: &str) -> Option<&'static MenuTemplate> {
    MENU_CATALOG
        .iter()
        .find(|template| template.name.eq_ignore_ascii_case(name.trim()))
}
