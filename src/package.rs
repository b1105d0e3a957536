// Package downloader: fetch the archive named by a listing entry with an
// external downloader (curl by default) and record the entry next to it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{Config, OUTPUT_PLACEHOLDER, URL_PLACEHOLDER};
use crate::error::{FetchError, Result};
use crate::listing::ListingEntry;
use crate::process::run_passthrough;

/// Name of the descriptor written beside a downloaded package.
pub const DESCRIPTOR_FILE: &str = "entry.json";

/// Where a package and its descriptor end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePaths {
    pub dir: PathBuf,
    pub file: PathBuf,
    pub descriptor: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    Completed(PackagePaths),
    /// The downloader ran but exited unsuccessfully. `code` is `None` when
    /// it was terminated by a signal.
    DownloaderFailed { code: Option<i32> },
}

/// Full source URL for an entry. Relative listing urls hang off the
/// configured base; absolute ones are used unchanged.
pub fn source_url(config: &Config, entry: &ListingEntry) -> String {
    if entry.url.starts_with("http://") || entry.url.starts_with("https://") {
        entry.url.clone()
    } else {
        format!("{}{}", config.package_base_url, entry.url)
    }
}

pub fn package_paths(config: &Config, entry: &ListingEntry) -> Result<PackagePaths> {
    if entry.pmc_id.trim().is_empty() {
        return Err(FetchError::InvalidEntry(format!(
            "no accession id in entry for '{}'",
            entry.url
        )));
    }
    let file_name = Path::new(&entry.url).file_name().ok_or_else(|| {
        FetchError::InvalidEntry(format!("url '{}' has no file name", entry.url))
    })?;
    let dir = config.article_dir(&entry.pmc_id);
    Ok(PackagePaths {
        file: dir.join(file_name),
        descriptor: dir.join(DESCRIPTOR_FILE),
        dir,
    })
}

fn downloader_command(config: &Config, url: &str, output: &Path) -> Command {
    let output = output.to_string_lossy();
    let mut cmd = Command::new(&config.downloader.program);
    cmd.args(config.downloader.args.iter().map(|arg| {
        arg.replace(OUTPUT_PLACEHOLDER, &output)
            .replace(URL_PLACEHOLDER, url)
    }));
    cmd
}

/// Download the package for `entry` and, if the downloader succeeds, write
/// the entry as `entry.json` in the same directory.
pub fn download_package(config: &Config, entry: &ListingEntry) -> Result<PackageOutcome> {
    let paths = package_paths(config, entry)?;
    let url = source_url(config, entry);
    fs::create_dir_all(&paths.dir)?;

    let status = run_passthrough(&mut downloader_command(config, &url, &paths.file))?;
    if !status.success() {
        log::error!(
            "{} exited with code {}",
            config.downloader.program,
            status
                .code()
                .map_or_else(|| "none (killed by signal)".to_string(), |c| c.to_string())
        );
        return Ok(PackageOutcome::DownloaderFailed {
            code: status.code(),
        });
    }
    log::info!("File downloaded successfully: {}", paths.file.display());

    let json = serde_json::to_string_pretty(entry)?;
    fs::write(&paths.descriptor, json)?;
    log::info!("Entry saved to {}", paths.descriptor.display());

    Ok(PackageOutcome::Completed(paths))
}
