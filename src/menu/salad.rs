use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inventory::availability::available_names;
use crate::inventory::item::Item;
use crate::menu::chooser::Chooser;
use crate::menu::roles::RoleTag;

/// Known-good raw vegetable pairings, preferred over random picks whenever
/// every member is in stock.
pub const CLASSIC_COMBINATIONS: &[&[&str]] = &[
    &["tomate", "cebolla"],
    &["lechuga", "tomate"],
    &["lechuga", "palta"],
    &["zanahoria", "betarraga"],
    &["repollo", "zanahoria"],
    &["apio", "palta"],
    &["lechuga", "tomate", "cebolla"],
    &["lechuga", "tomate", "palta"],
    &["tomate", "cebolla", "pepino"],
    &["lechuga", "pepino", "rabanito"],
    &["espinaca cruda", "tomate", "cebolla"],
    &["lechuga", "tomate", "cebolla", "pepino", "zanahoria"],
];

const SMALL_STOCK_LIMIT: usize = 3;
const RANDOM_MIN_INGREDIENTS: usize = 2;
const RANDOM_MAX_INGREDIENTS: usize = 4;
const LARGE_SALAD_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaladStyle {
    Caesar,
    Russian,
    Greek,
    Mixed,
    Classic,
}

impl SaladStyle {
    /// First matching rule wins.
    pub fn classify(ingredients: &[String]) -> SaladStyle {
        if contains_all(ingredients, &["lechuga", "tomate", "palta"]) {
            SaladStyle::Caesar
        } else if contains_all(ingredients, &["betarraga", "zanahoria"]) {
            SaladStyle::Russian
        } else if contains_all(ingredients, &["tomate", "cebolla", "pepino"]) {
            SaladStyle::Greek
        } else if ingredients.len() >= LARGE_SALAD_SIZE {
            SaladStyle::Mixed
        } else {
            SaladStyle::Classic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaladStyle::Caesar => "Caesar",
            SaladStyle::Russian => "Russian",
            SaladStyle::Greek => "Greek",
            SaladStyle::Mixed => "Mixed",
            SaladStyle::Classic => "classic",
        }
    }

    pub fn dressing(&self) -> &'static str {
        match self {
            SaladStyle::Caesar => {
                "Dress Caesar style: olive oil, lemon juice, crushed garlic, a little mustard and grated parmesan."
            }
            SaladStyle::Russian => {
                "Dress Russian style: mayonnaise, a squeeze of lemon, salt and pepper, mixed until creamy."
            }
            SaladStyle::Greek => {
                "Dress Greek style: olive oil, red wine vinegar, dried oregano and salt."
            }
            SaladStyle::Mixed => {
                "Dress as a mixed salad: olive oil, lemon juice, salt, pepper and chopped fresh herbs."
            }
            SaladStyle::Classic => "Dress the classic way: olive oil, vinegar and salt to taste.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salad {
    pub style: SaladStyle,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

/// "pepino ensalada" is how the store lists cucumbers.
fn canonical(name: &str) -> &str {
    match name {
        "pepino ensalada" => "pepino",
        other => other,
    }
}

fn contains(ingredients: &[String], wanted: &str) -> bool {
    ingredients.iter().any(|i| canonical(i) == wanted)
}

fn contains_all(ingredients: &[String], wanted: &[&str]) -> bool {
    wanted.iter().all(|w| contains(ingredients, w))
}

fn prep_instruction(ingredient: &str) -> String {
    match canonical(ingredient) {
        "lechuga" => format!("Wash and chop the {}", ingredient),
        "tomate" => format!("Wash and slice the {}", ingredient),
        "cebolla" => format!(
            "Peel the {}, cut it in julienne and soak it in cold water for 10 minutes",
            ingredient
        ),
        "palta" => format!("Peel the {} and cut it into cubes", ingredient),
        "zanahoria" => format!("Peel the {} and grate it or cut it in julienne", ingredient),
        "betarraga" => format!("Peel the {} and dice or grate it", ingredient),
        "pepino" => format!("Wash and slice the {}", ingredient),
        _ => format!("Wash and cut the {} as preferred", ingredient),
    }
}

/// Builds the preparation sequence for a salad made of `ingredients`.
pub fn generate_salad_steps(ingredients: &[String]) -> Vec<String> {
    let style = SaladStyle::classify(ingredients);
    let prep: Vec<String> = ingredients.iter().map(|i| prep_instruction(i)).collect();

    let mut steps = vec![format!("{}.", prep.join(". ")), style.dressing().to_string()];
    if contains(ingredients, "palta") {
        steps.push("Add the palta last to prevent browning.".to_string());
    }
    if contains(ingredients, "betarraga") {
        steps.push("Betarraga may stain, consider wearing gloves.".to_string());
    }
    if ingredients.len() >= LARGE_SALAD_SIZE {
        steps.push("Let the salad rest 5-10 minutes before serving.".to_string());
    }
    steps
}

fn stocked_name<'a>(member: &str, stock: &'a [String]) -> Option<&'a String> {
    stock.iter().find(|s| canonical(s) == member)
}

/// The stocked names that make up `combination`, or `None` if any member is
/// missing.
fn covered_by(combination: &[&str], stock: &[String]) -> Option<Vec<String>> {
    combination
        .iter()
        .map(|member| stocked_name(member, stock).cloned())
        .collect()
}

/// Picks a salad from the raw vegetables in stock, or `None` when there are
/// none.
///
/// Up to three vegetables are all used. With more, a fully stocked classic
/// combination wins; otherwise 2 to 4 random vegetables are drawn.
pub fn select_salad<C: Chooser>(items: &[Item], chooser: &mut C) -> Option<Salad> {
    let mut stock = available_names(items, RoleTag::SaladVegetable);
    if stock.is_empty() {
        debug!("No salad vegetables in stock");
        return None;
    }

    let ingredients = if stock.len() <= SMALL_STOCK_LIMIT {
        chooser.shuffle(&mut stock);
        stock
    } else {
        let mut classics: Vec<&[&str]> = CLASSIC_COMBINATIONS.to_vec();
        chooser.shuffle(&mut classics);
        match classics.into_iter().find_map(|combo| covered_by(combo, &stock)) {
            Some(combo) => combo,
            None => {
                let high = RANDOM_MAX_INGREDIENTS.min(stock.len());
                let count = chooser.count_between(RANDOM_MIN_INGREDIENTS.min(high), high);
                debug!(
                    available = stock.len(),
                    count, "No classic salad covered, drawing a random one"
                );
                chooser.shuffle(&mut stock);
                stock.truncate(count);
                stock
            }
        }
    };

    let steps = generate_salad_steps(&ingredients);
    Some(Salad {
        style: SaladStyle::classify(&ingredients),
        ingredients,
        steps,
    })
}
