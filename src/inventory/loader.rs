use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::inventory::item::{normalize_quantity_str, parse_purchase_date, Category, Item};

// CSV column headers
const NAME_COL: &str = "name";
const CATEGORY_COL: &str = "category";
const QUANTITY_COL: &str = "quantity";
const UNIT_COL: &str = "unit";
const PURCHASE_DATE_COL: &str = "purchase_date";

// Keys holding the item list in a store export: `{"productos": [...], ...}`.
const EXPORT_LIST_KEYS: [&str; 2] = ["productos", "items"];

/// Loads an inventory snapshot from a JSON export, a JSON array of items, or
/// a CSV file, picked by extension. Items without an id get sequential ones.
pub fn load_inventory(path: &Path) -> Result<Vec<Item>> {
    if !path.exists() {
        return Err(anyhow::anyhow!("Inventory file not found at: {:?}", path));
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let mut items = if is_csv {
        load_csv(path)?
    } else {
        load_json(path)?
    };

    items.retain(|item| !item.name.trim().is_empty());
    if items.is_empty() {
        return Err(anyhow::anyhow!("No inventory items loaded from {:?}", path));
    }
    assign_missing_ids(&mut items);

    info!(
        path = %path.display(),
        items = items.len(),
        in_stock = items.iter().filter(|item| item.in_stock()).count(),
        "Inventory snapshot loaded"
    );
    Ok(items)
}

fn load_json(path: &Path) -> Result<Vec<Item>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory file at {:?}", path))?;
    let snapshot: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse inventory JSON at {:?}", path))?;

    let records = match snapshot {
        Value::Array(records) => records,
        Value::Object(mut export) => {
            let list = EXPORT_LIST_KEYS
                .iter()
                .find_map(|key| export.remove(*key))
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Inventory export at {:?} has no {} list",
                        path,
                        EXPORT_LIST_KEYS.join(" or ")
                    )
                })?;
            match list {
                Value::Array(records) => records,
                other => {
                    return Err(anyhow::anyhow!(
                        "Inventory export at {:?}: expected an item list, found {}",
                        path,
                        json_kind(&other)
                    ))
                }
            }
        }
        other => {
            return Err(anyhow::anyhow!(
                "Inventory JSON at {:?} must be an item list or a store export, found {}",
                path,
                json_kind(&other)
            ))
        }
    };

    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Item>(record) {
            Ok(item) => items.push(item),
            Err(e) => warn!(index, error = %e, "Skipping unreadable inventory record"),
        }
    }
    Ok(items)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn load_csv(path: &Path) -> Result<Vec<Item>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open inventory CSV at {:?}", path))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

    let name_idx = column(NAME_COL).ok_or_else(|| anyhow::anyhow!("Column '{}' not found", NAME_COL))?;
    let quantity_idx = column(QUANTITY_COL)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", QUANTITY_COL))?;
    let category_idx = column(CATEGORY_COL);
    let unit_idx = column(UNIT_COL);
    let date_idx = column(PURCHASE_DATE_COL);

    let mut items = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").trim();

        let name = field(Some(name_idx));
        if name.is_empty() {
            continue;
        }

        items.push(Item {
            id: 0,
            name: name.to_string(),
            category: Category::from(field(category_idx)),
            quantity: normalize_quantity_str(field(Some(quantity_idx))),
            unit: field(unit_idx).to_string(),
            purchase_date: parse_purchase_date(field(date_idx)),
        });
    }
    Ok(items)
}

/// Gives id-less items ids after the largest one in use, wrapping around to
/// the free low ids when the largest is `u64::MAX`. Existing ids never change.
fn assign_missing_ids(items: &mut [Item]) {
    let used: HashSet<u64> = items.iter().map(|item| item.id).filter(|&id| id != 0).collect();
    let mut next_id = used
        .iter()
        .max()
        .and_then(|max| max.checked_add(1))
        .unwrap_or(1);
    for item in items.iter_mut().filter(|item| item.id == 0) {
        while next_id == 0 || used.contains(&next_id) {
            next_id = next_id.wrapping_add(1);
        }
        item.id = next_id;
        next_id = next_id.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_file(suffix: &str, content: &str) -> Result<tempfile::NamedTempFile> {
        let mut file = Builder::new().suffix(suffix).tempfile()?;
        write!(file, "{}", content)?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_load_csv_inventory() -> Result<()> {
        let file = temp_file(
            ".csv",
            "name,category,quantity,unit,purchase_date\n\
             Tomate,Verduras,3,kg,2024-03-01\n\
             pollo,Carnes,abc,,\n\
             ,Verduras,5,,\n\
             arroz,Otros,2 bolsas,,\n",
        )?;
        let items = load_inventory(file.path())?;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Tomate");
        assert_eq!(items[0].quantity, 3.0);
        assert_eq!(items[0].unit, "kg");
        assert!(items[0].purchase_date.is_some());
        assert_eq!(items[1].category, Category::Proteinas);
        assert_eq!(items[1].quantity, 0.0);
        assert_eq!(items[2].quantity, 2.0);
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_load_csv_missing_column() -> Result<()> {
        let file = temp_file(".csv", "name,unit\nTomate,kg\n")?;
        let result = load_inventory(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("quantity"));
        Ok(())
    }

    #[test]
    fn test_load_store_export() -> Result<()> {
        let file = temp_file(
            ".json",
            r#"{
                "productos": [
                    {"id": 4, "nombre": "lechuga", "categoria": "Verduras", "cantidad": [1, "2"], "fechaCompra": ""},
                    {"nombre": "palta", "categoria": "Verduras", "cantidad": "1"}
                ],
                "configuracion": [],
                "exportDate": "2024-01-01T00:00:00.000Z",
                "version": 2
            }"#,
        )?;
        let items = load_inventory(file.path())?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 4);
        assert_eq!(items[0].quantity, 2.0);
        assert_eq!(items[1].id, 5);
        assert_eq!(items[1].quantity, 1.0);
        Ok(())
    }

    #[test]
    fn test_load_json_array() -> Result<()> {
        let file = temp_file(
            ".json",
            r#"[{"id": 1, "name": "manzana", "category": "Frutas", "quantity": -2}]"#,
        )?;
        let items = load_inventory(file.path())?;
        assert_eq!(items[0].quantity, 0.0);
        assert_eq!(items[0].category, Category::Frutas);
        Ok(())
    }

    #[test]
    fn test_ids_after_the_largest_possible_id() -> Result<()> {
        let file = temp_file(
            ".json",
            r#"[
                {"id": 18446744073709551615, "name": "tomate", "quantity": 1},
                {"name": "cebolla", "quantity": 1},
                {"id": 1, "name": "lechuga", "quantity": 1},
                {"name": "palta", "quantity": 1}
            ]"#,
        )?;
        let items = load_inventory(file.path())?;
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![u64::MAX, 2, 1, 3]);
        Ok(())
    }

    #[test]
    fn test_null_fields_do_not_sink_the_snapshot() -> Result<()> {
        let file = temp_file(
            ".json",
            r#"{
                "productos": [
                    {"id": 1, "nombre": "lechuga", "categoria": null, "cantidad": 1, "unidad": null},
                    {"id": 2, "nombre": null, "categoria": "Verduras", "cantidad": 3},
                    {"id": 3, "nombre": "tomate", "categoria": "Verduras", "cantidad": 2, "fechaCompra": 1714521600000},
                    {"id": 4, "nombre": "palta", "categoria": 5, "cantidad": 1},
                    "not a record"
                ]
            }"#,
        )?;
        let items = load_inventory(file.path())?;
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["lechuga", "tomate"]);
        assert_eq!(items[0].category, Category::Otros);
        assert_eq!(items[0].unit, "");
        assert_eq!(items[1].purchase_date, None);
        Ok(())
    }

    #[test]
    fn test_export_without_item_list_names_the_problem() -> Result<()> {
        let file = temp_file(".json", r#"{"configuracion": [], "version": 2}"#)?;
        let err = load_inventory(file.path()).unwrap_err().to_string();
        assert!(err.contains("productos"), "unexpected error: {}", err);

        let file = temp_file(".json", r#""tomate""#)?;
        let err = load_inventory(file.path()).unwrap_err().to_string();
        assert!(err.contains("found a string"), "unexpected error: {}", err);
        Ok(())
    }

    #[test]
    fn test_empty_inventory_is_an_error() -> Result<()> {
        let file = temp_file(".json", "[]")?;
        assert!(load_inventory(file.path()).is_err());
        assert!(load_inventory(Path::new("/definitely/not/here.json")).is_err());
        Ok(())
    }
}
