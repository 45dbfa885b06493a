//! List sort/filter options

use anyhow::Result;
use navbar::SortFilter;
use owo_colors::OwoColorize;

pub async fn run(json: bool) -> Result<()> {
    let options = SortFilter::options();

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    println!("{}", "Filter by".bold());
    for option in options {
        println!("  {:<16} {}", option.value.cyan(), option.label.dimmed());
    }
    Ok(())
}
