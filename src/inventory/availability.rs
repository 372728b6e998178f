use crate::inventory::item::Item;
use crate::menu::roles::RoleTag;

/// Items that fill `role` and have stock, in snapshot order.
pub fn available(items: &[Item], role: RoleTag) -> Vec<&Item> {
    items
        .iter()
        .filter(|item| item.in_stock() && role.matches(&item.match_key()))
        .collect()
}

/// Lowercased names of in-stock items for `role`, first occurrence wins.
pub fn available_names(items: &[Item], role: RoleTag) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for item in available(items, role) {
        let key = item.match_key();
        if !names.contains(&key) {
            names.push(key);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::item::Category;

    fn snapshot() -> Vec<Item> {
        vec![
            Item::new(1, "Tomate", Category::Verduras, 3.0),
            Item::new(2, "pollo", Category::Proteinas, 0.0),
            Item::new(3, "lechuga", Category::Verduras, 1.0),
            Item::new(4, "leche", Category::Lacteos, 2.0),
            Item::new(5, "TOMATE", Category::Verduras, 1.0),
            Item::new(6, "arroz", Category::Otros, 1.0),
        ]
    }

    #[test]
    fn test_available_keeps_order_and_stock() {
        let items = snapshot();
        let veg: Vec<u64> = available(&items, RoleTag::SaladVegetable)
            .iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(veg, vec![1, 3, 5]);
        assert!(available(&items, RoleTag::Protein).is_empty());
        assert_eq!(available(&items, RoleTag::SideStarch).len(), 1);
    }

    #[test]
    fn test_available_names_deduplicates() {
        let items = snapshot();
        assert_eq!(
            available_names(&items, RoleTag::SaladVegetable),
            vec!["tomate".to_string(), "lechuga".to_string()]
        );
    }

    #[test]
    fn test_category_does_not_drive_roles() {
        // arroz is filed under "Otros" but is still a side starch.
        let items = snapshot();
        assert_eq!(available(&items, RoleTag::SideStarch)[0].name, "arroz");
    }
}
