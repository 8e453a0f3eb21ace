//! `fsf-api` — scrape the FSF license list into a static JSON/JSON-LD API.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Fetch the list page and rewrite its HTML named entities ([`fetch`]).
//! 3. Walk the XHTML and build the id → record mapping ([`extract`]).
//! 4. Check the static identifier table against the extracted records.
//! 5. Write the output directory ([`writer`]).
//! 6. Exit `0` on success; any transport, parse, or table-drift error aborts
//!    before stale data can be published.

mod cli;
mod extract;
mod fetch;
mod models;
mod tables;
mod writer;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let body = fetch::fetch_page(&client, &cli.source_uri).await?;
    let xhtml = fetch::normalize_entities(&body)?;

    let licenses = extract::extract(&xhtml, &cli.source_uri)?;
    extract::check_identifier_coverage(&licenses)?;

    if !cli.quiet {
        eprintln!(
            "  {} {} licenses extracted from {}",
            "→".cyan(),
            licenses.len(),
            cli.source_uri
        );
    }

    writer::write_all(&licenses, &cli.api_base_uri, &cli.dir)?;

    if !cli.quiet {
        eprintln!("  {} wrote {}", "→".cyan(), cli.dir.display());
    }

    Ok(())
}
