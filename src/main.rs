// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, load the config
//   and hand off to the matching flow in `ui`.
// - Returns `anyhow::Result` so unexpected failures print their context
//   chain and exit with status 1.

use anyhow::Context;
use log::LevelFilter;
use pmc_fetch::cli::{self, Commands};
use pmc_fetch::config::Config;
use pmc_fetch::store::S3Store;
use pmc_fetch::ui;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("pmc_fetch", level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::parse_or_exit();
    init_logging(args.verbose);

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Commands::Find(a) => {
            let store = S3Store::from_config(&config).context("Failed to build HTTP client")?;
            ui::run_find(&store, &config, &a.identifier)
        }
        Commands::GetXml(a) => {
            let store = S3Store::from_config(&config).context("Failed to build HTTP client")?;
            ui::run_get_xml(&store, &config, &a.identifier)
        }
        Commands::GetMedia(a) => ui::run_get_media(&config, &a.identifier),
    }
}
