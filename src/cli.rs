// Command-line arguments. One subcommand per lookup: `find`, `get-xml`
// and `get-media`, each taking a single article identifier.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pmc-fetch",
    version,
    about = "Locate and download PMC Open Access articles",
    long_about = "Locate and download PMC Open Access articles: full-text XML from the \
                  public S3 bucket, media/supplementary packages via the OA file list."
)]
pub struct Cli {
    /// Config file (defaults: $PMC_FETCH_CONFIG, ./config.json, user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report which prefix of the bucket holds the article XML
    Find(IdArgs),
    /// Download the article XML to articles/<id>/<id>.xml
    GetXml(IdArgs),
    /// Download the media/supplementary package listed for the article
    GetMedia(IdArgs),
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Article identifier, e.g. PMC13900
    #[arg(value_name = "IDENTIFIER", value_parser = NonEmptyStringValueParser::new())]
    pub identifier: String,
}

/// Parse the process arguments. Usage errors print clap's message and
/// exit with status 1; `--help` and `--version` exit normally.
pub fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    }
}
