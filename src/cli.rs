use clap::{Parser, Subcommand, ValueEnum};

use crate::menu::resolver::OutcomeFilter;

#[derive(Parser, Debug)]
#[command(name = "fridge-menu", author, version, about = "Menu and salad suggestions from what is in the fridge", long_about = None)]
pub struct Cli {
    /// Path to the inventory snapshot (JSON export or CSV)
    #[arg(short, long)]
    pub inventory: String,

    /// Seed for reproducible picks
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every menu template against the inventory
    Menus {
        /// Which outcomes to show
        #[arg(long, value_enum, default_value_t = MenuFilter::All)]
        filter: MenuFilter,

        /// Print the resolved selections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pick a salad from the vegetables in stock
    Salad {
        /// Print the salad as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the recipe service for salad ideas
    AiSalads,

    /// Ask the recipe service for main dish ideas
    AiDishes,
}

/// Command-line spelling of [`OutcomeFilter`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFilter {
    All,
    Complete,
    Incomplete,
}

impl From<MenuFilter> for OutcomeFilter {
    fn from(filter: MenuFilter) -> Self {
        match filter {
            MenuFilter::All => OutcomeFilter::All,
            MenuFilter::Complete => OutcomeFilter::Complete,
            MenuFilter::Incomplete => OutcomeFilter::Incomplete,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
