// UI layer: one function per subcommand. Each runs the lookup, shows a
// spinner while waiting on the network and prints the result line.

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::download::download_article_xml;
use crate::listing;
use crate::package::{download_package, PackageOutcome};
use crate::probe::{find_file, FoundFile};
use crate::store::ObjectStore;

pub const NOT_FOUND_MESSAGE: &str = "File not found in any of the specified paths.";
pub const XML_NOT_FOUND_MESSAGE: &str = "File not found on any path.";
pub const NO_PACKAGE_MESSAGE: &str = "Could not find a media/supplementary data package on PMC.";
pub const DOWNLOAD_COMPLETE_MESSAGE: &str = "Download complete.";

/// Result line for `find`.
pub fn found_message(found: Option<&FoundFile>) -> String {
    match found {
        Some(f) => format!("File is {} and at path: {}", f.kind, f.key),
        None => NOT_FOUND_MESSAGE.to_string(),
    }
}

/// Result line for `get-media`.
pub fn package_message(outcome: &PackageOutcome) -> String {
    match outcome {
        PackageOutcome::Completed(_) => DOWNLOAD_COMPLETE_MESSAGE.to_string(),
        PackageOutcome::DownloaderFailed { code: Some(code) } => {
            format!("Download failed: downloader exited with code {}.", code)
        }
        PackageOutcome::DownloaderFailed { code: None } => {
            "Download failed: downloader was terminated by a signal.".to_string()
        }
    }
}

/// Spinner on stderr; hidden automatically when stderr is not a terminal.
/// Debug logging writes to stderr as well, so the spinner stays off then.
fn spinner(msg: String) -> ProgressBar {
    spinner_with(msg, !log::log_enabled!(log::Level::Debug))
}

fn spinner_with(msg: String, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn probe<S: ObjectStore + ?Sized>(store: &S, config: &Config, id: &str) -> Result<Option<FoundFile>> {
    log::info!("Checking for {}", id);
    let sp = spinner(format!("Looking for {} in {}...", id, config.bucket_name));
    let found = find_file(store, config, id);
    sp.finish_and_clear();
    found.with_context(|| format!("Failed to probe bucket {} for {}", config.bucket_name, id))
}

/// `find <id>`: report where the XML lives.
pub fn run_find<S: ObjectStore + ?Sized>(store: &S, config: &Config, id: &str) -> Result<()> {
    let found = probe(store, config, id)?;
    println!("{}", found_message(found.as_ref()));
    Ok(())
}

/// `get-xml <id>`: probe, then download. Transfer failures are logged
/// rather than returned.
pub fn run_get_xml<S: ObjectStore + ?Sized>(store: &S, config: &Config, id: &str) -> Result<()> {
    let found = match probe(store, config, id)? {
        Some(found) => found,
        None => {
            println!("{}", XML_NOT_FOUND_MESSAGE);
            return Ok(());
        }
    };

    let sp = spinner(format!("Downloading {}...", found.key));
    let result = download_article_xml(store, config, &found.key, id);
    sp.finish_and_clear();
    match result {
        Ok((path, _)) => println!("File saved to {}", path.display()),
        Err(e) => log::error!("Error downloading file: {}", e),
    }
    Ok(())
}

/// `get-media <id>`: look the package up in the listing file and hand the
/// transfer to the external downloader.
pub fn run_get_media(config: &Config, id: &str) -> Result<()> {
    let entry = listing::find_entry(&config.listing_path, id).with_context(|| {
        format!("Failed to read listing file {}", config.listing_path.display())
    })?;
    let entry = match entry {
        Some(entry) => entry,
        None => {
            println!("{}", NO_PACKAGE_MESSAGE);
            return Ok(());
        }
    };

    let outcome = download_package(config, &entry)
        .with_context(|| format!("Failed to download package for {}", entry.pmc_id))?;
    println!("{}", package_message(&outcome));
    Ok(())
}
