use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Display categories used by the inventory store. These are not the role
/// tags the menu engine selects by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub enum Category {
    #[serde(rename = "Lácteos")]
    Lacteos,
    Verduras,
    Frutas,
    Proteinas,
    Bebidas,
    #[default]
    Otros,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Lacteos,
        Category::Verduras,
        Category::Frutas,
        Category::Proteinas,
        Category::Bebidas,
        Category::Otros,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Lacteos => "Lácteos",
            Category::Verduras => "Verduras",
            Category::Frutas => "Frutas",
            Category::Proteinas => "Proteinas",
            Category::Bebidas => "Bebidas",
            Category::Otros => "Otros",
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "lácteos" | "lacteos" => Category::Lacteos,
            "verduras" => Category::Verduras,
            "frutas" => Category::Frutas,
            // "Carnes" is the legacy label for the protein shelf.
            "proteinas" | "proteínas" | "carnes" => Category::Proteinas,
            "bebidas" => Category::Bebidas,
            _ => Category::Otros,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from(label.as_str())
    }
}

impl From<Option<String>> for Category {
    fn from(label: Option<String>) -> Self {
        label.map(Category::from).unwrap_or_default()
    }
}

/// One inventory record as handed to the menu engine.
///
/// `quantity` is always finite and non-negative once an `Item` exists;
/// deserialization runs every stored value through [`normalize_quantity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// 0 until the store assigns one.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: u64,
    /// Blank when the record has none; the loader drops such rows.
    #[serde(alias = "nombre", default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(alias = "categoria", default)]
    pub category: Category,
    #[serde(alias = "cantidad", default, deserialize_with = "deserialize_quantity")]
    pub quantity: f64,
    #[serde(alias = "unidad", default, deserialize_with = "deserialize_text")]
    pub unit: String,
    #[serde(
        alias = "fechaCompra",
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_date: Option<NaiveDate>,
}

impl Item {
    pub fn new(id: u64, name: impl Into<String>, category: Category, quantity: f64) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            quantity: sanitize_number(quantity),
            unit: String::new(),
            purchase_date: None,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0.0
    }

    /// Lowercased, trimmed name used for every role lookup.
    pub fn match_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

fn sanitize_number(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Coerces whatever the store holds in the quantity slot into a finite,
/// non-negative number.
///
/// Numbers pass through, numeric strings parse, other strings yield their last
/// run of digits ("2 bolsas de 500" -> 500), arrays yield their last numeric
/// element. Everything else, including negatives and NaN, becomes 0.
pub fn normalize_quantity(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().map(sanitize_number).unwrap_or(0.0),
        Value::String(s) => normalize_quantity_str(s),
        Value::Array(values) => values
            .iter()
            .rev()
            .find_map(|v| match v {
                Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
                Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
                Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                Value::Null => Some(0.0),
                _ => None,
            })
            .map(sanitize_number)
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn normalize_quantity_str(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return sanitize_number(parsed);
    }
    trimmed
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .last()
        .and_then(|run| run.parse::<f64>().ok())
        .map(sanitize_number)
        .unwrap_or(0.0)
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(normalize_quantity(&raw))
}

/// Ids the store wrote as numbers or numeric strings; anything else is 0.
fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Strings pass through, numbers are written out, null and the rest are blank.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_purchase_date(&s),
        _ => None,
    })
}

/// Accepts `YYYY-MM-DD` and full ISO timestamps; blank or unparseable text is
/// treated as "no date".
pub fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_quantity_numbers() {
        assert_eq!(normalize_quantity(&json!(3)), 3.0);
        assert_eq!(normalize_quantity(&json!(2.5)), 2.5);
        assert_eq!(normalize_quantity(&json!(-4)), 0.0);
        assert_eq!(normalize_quantity(&json!(null)), 0.0);
        assert_eq!(normalize_quantity(&json!({"value": 3})), 0.0);
    }

    #[test]
    fn test_normalize_quantity_strings() {
        assert_eq!(normalize_quantity(&json!("7")), 7.0);
        assert_eq!(normalize_quantity(&json!(" 1.5 ")), 1.5);
        assert_eq!(normalize_quantity(&json!("2 bolsas de 500")), 500.0);
        assert_eq!(normalize_quantity(&json!("")), 0.0);
        assert_eq!(normalize_quantity(&json!("muchos")), 0.0);
        assert_eq!(normalize_quantity(&json!("NaN")), 0.0);
        assert_eq!(normalize_quantity(&json!("-3")), 0.0);
    }

    #[test]
    fn test_normalize_quantity_arrays() {
        assert_eq!(normalize_quantity(&json!([1, 2, "x"])), 2.0);
        assert_eq!(normalize_quantity(&json!(["4", "abc"])), 4.0);
        assert_eq!(normalize_quantity(&json!([])), 0.0);
        assert_eq!(normalize_quantity(&json!([{"a": 1}])), 0.0);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::from("Carnes"), Category::Proteinas);
        assert_eq!(Category::from("lácteos"), Category::Lacteos);
        assert_eq!(Category::from("Congelados"), Category::Otros);
        for category in Category::ALL {
            assert_eq!(Category::from(category.label()), category);
        }
    }

    #[test]
    fn test_item_deserializes_store_record() {
        let record = json!({
            "id": 12,
            "nombre": "Tomate",
            "categoria": "Verduras",
            "cantidad": "3",
            "unidad": "kg",
            "fechaCompra": ""
        });
        let item: Item = serde_json::from_value(record).unwrap();
        assert_eq!(item.id, 12);
        assert_eq!(item.name, "Tomate");
        assert_eq!(item.category, Category::Verduras);
        assert_eq!(item.quantity, 3.0);
        assert_eq!(item.unit, "kg");
        assert_eq!(item.purchase_date, None);
        assert_eq!(item.match_key(), "tomate");
    }

    #[test]
    fn test_item_tolerates_null_and_odd_fields() {
        let record = json!({
            "id": "7",
            "nombre": null,
            "categoria": null,
            "cantidad": "2",
            "unidad": null,
            "fechaCompra": 1714521600000u64
        });
        let item: Item = serde_json::from_value(record).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.name, "");
        assert_eq!(item.category, Category::Otros);
        assert_eq!(item.unit, "");
        assert_eq!(item.purchase_date, None);

        let sparse: Item = serde_json::from_value(json!({"cantidad": 1})).unwrap();
        assert_eq!(sparse.id, 0);
        assert_eq!(sparse.name, "");
        assert_eq!(sparse.category, Category::default());
    }

    #[test]
    fn test_item_new_clamps_quantity() {
        assert_eq!(Item::new(1, "pollo", Category::Proteinas, -2.0).quantity, 0.0);
        assert_eq!(Item::new(1, "pollo", Category::Proteinas, f64::NAN).quantity, 0.0);
        assert!(Item::new(1, "pollo", Category::Proteinas, 1.0).in_stock());
    }

    #[test]
    fn test_parse_purchase_date() {
        assert_eq!(
            parse_purchase_date("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(
            parse_purchase_date("2024-05-01T10:00:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_purchase_date("   "), None);
        assert_eq!(parse_purchase_date("ayer"), None);
    }
}
