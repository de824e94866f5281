//! The `solve` subcommand: resolve the strategy book and print the
//! ranked result.

use rust_decimal_macros::dec;
use tabled::{Table, Tabled};
use url::Url;

use crate::cli::{output, SolveArgs};
use crate::config::Config;
use crate::domain::{PoolCatalog, Rate};
use crate::error::Result;
use crate::feed::{CatalogSource, FileCatalogSource, HttpCatalogSource};
use crate::strategy::Strategy;

#[derive(Tabled)]
struct RankedRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Strategy")]
    name: String,
    #[tabled(rename = "Net APY")]
    net_apy: String,
    #[tabled(rename = "Leverage")]
    leverage: String,
    #[tabled(rename = "Legs")]
    legs: usize,
}

/// Run the solve pass and print the ranked strategy table.
pub async fn run(args: SolveArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.init_logging();

    let principal = args.principal.unwrap_or(config.solver.principal);
    let catalog = load_catalog(&args.catalog).await?;

    output::key_value("Catalog", format!("{} pools", catalog.len()));
    output::key_value("Principal", principal);

    let mut registry = config.build_registry()?;
    let solved = registry.solve_all(&catalog, principal);

    output::section(&format!(
        "Ranked strategies ({solved}/{} solved)",
        registry.len()
    ));

    let rows: Vec<RankedRow> = registry
        .ranked()
        .iter()
        .enumerate()
        .map(|(i, strategy)| RankedRow {
            rank: i + 1,
            name: strategy.id().to_string(),
            net_apy: strategy.net_yield().map_or_else(String::new, percent),
            leverage: strategy
                .leverage()
                .map_or_else(String::new, |l| l.round_dp(2).to_string()),
            legs: strategy.actions().len(),
        })
        .collect();

    if rows.is_empty() {
        output::note("  (nothing solved)");
    } else {
        let table = Table::new(rows).to_string();
        for line in table.lines() {
            println!("  {line}");
        }
    }

    if args.actions {
        for strategy in registry.ranked() {
            print_actions(strategy);
        }
    }

    for strategy in registry.strategies() {
        if !strategy.is_solved() {
            output::warn(&format!("{} did not solve", strategy.id()));
        }
    }

    Ok(())
}

fn print_actions(strategy: &Strategy) {
    output::section(strategy.id().as_str());
    for action in strategy.actions() {
        let verb = if action.is_deposit() { "supply" } else { "borrow" };
        println!(
            "  {:<24} {verb:<7} {}/{}  {}",
            action.step_name(),
            action.pool().protocol(),
            action.pool().name(),
            action.amount(),
        );
    }
}

async fn load_catalog(location: &str) -> Result<PoolCatalog> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let url = Url::parse(location)?;
        HttpCatalogSource::new(url).fetch().await
    } else {
        FileCatalogSource::new(location).fetch().await
    }
}

fn percent(rate: Rate) -> String {
    format!("{}%", (rate * dec!(100)).round_dp(2))
}
