use std::path::PathBuf;

use clap::Parser;

/// Page the license data is scraped from.
pub const SOURCE_URI: &str = "https://www.gnu.org/licenses/license-list.html";

/// Base URI the generated files are published under; schema `@context` URIs
/// resolve against it.
pub const API_BASE_URI: &str = "https://wking.github.io/fsf-api/";

#[derive(Parser, Debug)]
#[command(
    name = "fsf-api",
    about = "Scrape the FSF license list into a static JSON/JSON-LD API",
    version
)]
pub struct Cli {
    /// Output directory for the generated files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Page to scrape
    #[arg(long, value_name = "URI", default_value = SOURCE_URI)]
    pub source_uri: String,

    /// Base URI the output will be published under
    #[arg(long, value_name = "URI", default_value = API_BASE_URI)]
    pub api_base_uri: String,

    /// Suppress status output
    #[arg(short, long)]
    pub quiet: bool,
}
