use anyhow::{Context, Result};
use fridge_menu::api_connection::GeminiClient;
use fridge_menu::cli::{parse_args, Command};
use fridge_menu::config::{AppConfig, API_KEY_ENV_VAR};
use fridge_menu::inventory::{load_inventory, Item};
use fridge_menu::menu::{
    find_template, render_steps, resolve_catalog, select_salad, Chooser, OutcomeFilter,
    RandomChooser, MENU_CATALOG,
};
use fridge_menu::recipe_suggestions::{available_ingredient_names, generate_dishes, generate_salads};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_menus<C: Chooser>(items: &[Item], filter: OutcomeFilter, json: bool, chooser: &mut C) -> Result<()> {
    let resolved: Vec<_> = resolve_catalog(MENU_CATALOG, items, chooser)
        .into_iter()
        .filter(|selection| filter.accepts(selection))
        .collect();
    info!(shown = resolved.len(), total = MENU_CATALOG.len(), ?filter, "Menus resolved");

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    if resolved.is_empty() {
        println!("No menus match the selected filter.");
    }
    for selection in &resolved {
        let Some(template) = find_template(selection.template) else {
            continue;
        };
        let status = if selection.complete { "complete" } else { "incomplete" };
        println!("\n== {} ({})", template.name, status);
        for binding in &selection.bindings {
            match &binding.item {
                Some(item) => println!("  {:<16} {}", binding.role.name(), item.name),
                None => println!("  {:<16} -- missing --", binding.role.name()),
            }
        }
        if template.requires_salad {
            match &selection.salad {
                Some(salad) => println!("  {:<16} {}", "salad", salad.ingredients.join(", ")),
                None => println!("  {:<16} -- no vegetables --", "salad"),
            }
        }
        for (idx, step) in render_steps(template, selection).iter().enumerate() {
            println!("  {}. {}", idx + 1, step);
        }
    }
    Ok(())
}

fn print_salad<C: Chooser>(items: &[Item], json: bool, chooser: &mut C) -> Result<()> {
    let salad = select_salad(items, chooser);
    if json {
        println!("{}", serde_json::to_string_pretty(&salad)?);
        return Ok(());
    }
    match salad {
        Some(salad) => {
            println!("{} salad: {}", salad.style.label(), salad.ingredients.join(", "));
            for (idx, step) in salad.steps.iter().enumerate() {
                println!("  {}. {}", idx + 1, step);
            }
        }
        None => println!("No salad vegetables in stock."),
    }
    Ok(())
}

fn build_client(config: &AppConfig) -> Result<GeminiClient> {
    let api_key = config
        .api_key
        .clone()
        .with_context(|| format!("{} is not set; it is required for AI suggestions", API_KEY_ENV_VAR))?;
    Ok(GeminiClient::new(api_key)?.with_model(config.model.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log_level);

    let cli_args = parse_args();
    let items = load_inventory(Path::new(&cli_args.inventory))
        .with_context(|| format!("Failed to load inventory '{}'", cli_args.inventory))?;

    let mut chooser = match cli_args.seed {
        Some(seed) => RandomChooser::seeded(seed),
        None => RandomChooser::from_entropy(),
    };

    match cli_args.command {
        Command::Menus { filter, json } => print_menus(&items, filter.into(), json, &mut chooser)?,
        Command::Salad { json } => print_salad(&items, json, &mut chooser)?,
        Command::AiSalads => {
            let client = build_client(&config)?;
            let names = available_ingredient_names(&items, config.prompt_ingredient_cap);
            if names.is_empty() {
                println!("Nothing in stock to cook with.");
                return Ok(());
            }
            let salads = generate_salads(&client, &names)
                .await
                .context("Salad suggestion request failed")?;
            println!("{}", serde_json::to_string_pretty(&salads)?);
        }
        Command::AiDishes => {
            let client = build_client(&config)?;
            let names = available_ingredient_names(&items, config.prompt_ingredient_cap);
            if names.is_empty() {
                println!("Nothing in stock to cook with.");
                return Ok(());
            }
            let dishes = generate_dishes(&client, &names)
                .await
                .context("Dish suggestion request failed")?;
            println!("{}", serde_json::to_string_pretty(&dishes)?);
        }
    }

    Ok(())
}
