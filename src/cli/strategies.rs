//! Strategy shape listing.

use tabled::{Table, Tabled};

use crate::cli::output;
use crate::error::Result;

#[derive(Tabled)]
struct ShapeRow {
    #[tabled(rename = "Shape")]
    shape: &'static str,
    #[tabled(rename = "Legs")]
    legs: &'static str,
    #[tabled(rename = "Position")]
    position: &'static str,
}

/// List available strategy shapes.
pub fn list() -> Result<()> {
    output::section("Available strategy shapes");
    println!();

    let shapes = vec![
        ShapeRow {
            shape: "stake",
            legs: "1",
            position: "deposit at the best venue for an asset",
        },
        ShapeRow {
            shape: "carry-loop",
            legs: "2",
            position: "pinned collateral supply + sibling borrow",
        },
        ShapeRow {
            shape: "delta-neutral",
            legs: "4",
            position: "supply/borrow loop across two venues, net-zero exposure",
        },
    ];

    let table = Table::new(shapes).to_string();
    for line in table.lines() {
        println!("  {line}");
    }

    println!();
    println!("  Declare strategies as [[strategy]] tables in config.toml");
    println!();

    Ok(())
}
