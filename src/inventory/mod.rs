pub mod availability;
pub mod item;
pub mod loader;

pub use availability::{available, available_names};
pub use item::{normalize_quantity, Category, Item};
pub use loader::load_inventory;
