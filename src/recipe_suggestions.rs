use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api_connection::connection::{ApiConnectionError, GeminiClient};
use crate::inventory::item::Item;

const SUGGESTION_COUNT: usize = 10;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SaladSuggestion {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "ingredientes", default)]
    pub ingredients: Vec<String>,
    #[serde(alias = "preparacion", default)]
    pub steps: Vec<String>,
    #[serde(alias = "tiempo", default)]
    pub time: String,
    #[serde(alias = "nutricion", default)]
    pub nutrition: String,
    #[serde(alias = "consejos", default)]
    pub tips: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DishSuggestion {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "tipo", default)]
    pub cuisine: String,
    #[serde(alias = "ingredientes", default)]
    pub ingredients: Vec<String>,
    #[serde(alias = "preparacion", default)]
    pub steps: Vec<String>,
    #[serde(alias = "tiempo", default)]
    pub time: String,
    #[serde(alias = "dificultad", default)]
    pub difficulty: String,
    #[serde(alias = "nutricion", default)]
    pub nutrition: String,
    #[serde(alias = "consejos", default)]
    pub tips: String,
}

/// Names of in-stock items to offer the model: case preserved, deduplicated
/// case-insensitively, first occurrence first, at most `cap`.
pub fn available_ingredient_names(items: &[Item], cap: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut names = Vec::new();
    for item in items.iter().filter(|item| item.in_stock()) {
        if names.len() >= cap {
            break;
        }
        let name = item.name.trim();
        let key = name.to_lowercase();
        if name.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        names.push(name.to_string());
    }
    names
}

pub fn build_salad_prompt(ingredient_names: &[String]) -> String {
    format!(
        "Generate {count} varied salad recipes using only these available ingredients: {ingredients}.

For each recipe include a name, the ingredient list with amounts, up to 5 preparation steps, the preparation time, basic nutrition information and preparation tips.
Make the recipes varied (Mediterranean, Asian, Mexican, Greek, ...).
Return only a JSON object, without markdown, with this structure:
{{
  \"salads\": [
    {{
      \"name\": \"Salad name\",
      \"ingredients\": [\"ingredient 1\", \"ingredient 2\"],
      \"steps\": [\"step 1\", \"step 2\"],
      \"time\": \"10 minutes\",
      \"nutrition\": \"Calories: X, Protein: Xg\",
      \"tips\": \"Useful tips\"
    }}
  ]
}}",
        count = SUGGESTION_COUNT,
        ingredients = ingredient_names.join(", ")
    )
}

pub fn build_dish_prompt(ingredient_names: &[String]) -> String {
    format!(
        "Generate {count} varied main dishes using only these available ingredients: {ingredients}.

For each dish include a name, the cuisine (Italian, Mexican, Asian, Mediterranean, ...), the ingredient list with amounts, up to 8 preparation steps, the preparation time, the difficulty (Easy, Medium, Hard), basic nutrition information and preparation tips.
Return only a JSON object, without markdown, with this structure:
{{
  \"dishes\": [
    {{
      \"name\": \"Dish name\",
      \"cuisine\": \"Cuisine\",
      \"ingredients\": [\"ingredient 1\", \"ingredient 2\"],
      \"steps\": [\"step 1\", \"step 2\"],
      \"time\": \"30 minutes\",
      \"difficulty\": \"Easy\",
      \"nutrition\": \"Calories: X, Protein: Xg\",
      \"tips\": \"Useful tips\"
    }}
  ]
}}",
        count = SUGGESTION_COUNT,
        ingredients = ingredient_names.join(", ")
    )
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() >= 6 {
        let inner = &trimmed[3..trimmed.len() - 3];
        inner.strip_prefix("json").unwrap_or(inner).trim()
    } else {
        trimmed
    }
}

/// Pulls the first of `list_keys` present in a model reply.
///
/// `Err` carries the raw text when the reply is not JSON at all. A JSON reply
/// without the list gives an empty list; entries that fail to deserialize are
/// dropped.
fn parse_suggestion_list<T>(raw: &str, list_keys: &[&str]) -> Result<Vec<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    let content = strip_code_fences(raw);
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            debug!("Model reply is not JSON: {}", e);
            return Err(content.to_string());
        }
    };

    let entries = list_keys
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default();

    let total = entries.len();
    let parsed: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if parsed.len() < total {
        warn!(dropped = total - parsed.len(), "Dropped malformed suggestions");
    }
    Ok(parsed)
}

pub fn parse_salad_suggestions(raw: &str, ingredient_names: &[String]) -> Vec<SaladSuggestion> {
    parse_suggestion_list(raw, &["salads", "ensaladas"]).unwrap_or_else(|text| {
        vec![SaladSuggestion {
            name: "Generated recipe".to_string(),
            ingredients: ingredient_names.to_vec(),
            steps: vec![text],
            time: "Variable".to_string(),
            nutrition: "Not available".to_string(),
            tips: "Follow the generated instructions".to_string(),
        }]
    })
}

pub fn parse_dish_suggestions(raw: &str, ingredient_names: &[String]) -> Vec<DishSuggestion> {
    parse_suggestion_list(raw, &["dishes", "platos"]).unwrap_or_else(|text| {
        vec![DishSuggestion {
            name: "Generated dish".to_string(),
            cuisine: "Varied".to_string(),
            ingredients: ingredient_names.to_vec(),
            steps: vec![text],
            time: "Variable".to_string(),
            difficulty: "Medium".to_string(),
            nutrition: "Not available".to_string(),
            tips: "Follow the generated instructions".to_string(),
        }]
    })
}

pub async fn generate_salads(
    client: &GeminiClient,
    ingredient_names: &[String],
) -> Result<Vec<SaladSuggestion>, ApiConnectionError> {
    let reply = client.generate_text(&build_salad_prompt(ingredient_names)).await?;
    Ok(parse_salad_suggestions(&reply, ingredient_names))
}

pub async fn generate_dishes(
    client: &GeminiClient,
    ingredient_names: &[String],
) -> Result<Vec<DishSuggestion>, ApiConnectionError> {
    let reply = client.generate_text(&build_dish_prompt(ingredient_names)).await?;
    Ok(parse_dish_suggestions(&reply, ingredient_names))
}
