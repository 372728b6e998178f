pub mod api_connection;
pub mod cli;
pub mod config;
pub mod inventory;
pub mod menu;
pub mod recipe_suggestions;
