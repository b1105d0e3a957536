// Configuration record: where to probe for XML, where the listing file
// lives, where downloads land and which program fetches packages.
//
// The JSON shape follows the `config.json` used by the PMC scripts
// (`bucketName`, `paths`, `typeMap`), with a few optional extras.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// Environment variable that points at a config file.
pub const CONFIG_ENV: &str = "PMC_FETCH_CONFIG";

const DEFAULT_BUCKET: &str = "pmc-oa-opendata";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_LISTING: &str = "listings/oa_file_list.csv";
const DEFAULT_PACKAGE_BASE_URL: &str = "https://ftp.ncbi.nlm.nih.gov/pub/pmc/";
const DEFAULT_OUTPUT_DIR: &str = "articles";

/// Placeholders substituted into the downloader arguments.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";
pub const URL_PLACEHOLDER: &str = "{url}";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(alias = "bucket")]
    pub bucket_name: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Base URL of an S3-compatible server. When set, objects are addressed
    /// path-style as `<endpoint>/<bucket>/<key>`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Key prefixes, probed in this order.
    pub paths: Vec<String>,
    pub type_map: BTreeMap<String, String>,
    #[serde(default = "default_listing_path")]
    pub listing_path: PathBuf,
    #[serde(default = "default_package_base_url")]
    pub package_base_url: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub downloader: DownloaderConfig,
    /// Whole-request limit for object store calls. Unset means no limit.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// External program used by `get-media`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloaderConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        DownloaderConfig {
            program: "curl".into(),
            args: vec![
                "-o".into(),
                OUTPUT_PLACEHOLDER.into(),
                URL_PLACEHOLDER.into(),
            ],
        }
    }
}

fn default_region() -> String {
    DEFAULT_REGION.into()
}

fn default_listing_path() -> PathBuf {
    PathBuf::from(DEFAULT_LISTING)
}

fn default_package_base_url() -> String {
    DEFAULT_PACKAGE_BASE_URL.into()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for Config {
    /// Layout of the public PMC Open Access bucket.
    fn default() -> Self {
        let prefixes = [
            ("oa_comm/xml/all/", "commercial use"),
            ("oa_noncomm/xml/all/", "non-commercial use"),
            ("author_manuscript/xml/all/", "author manuscript"),
            ("phe_timebound/xml/all/", "public health emergency"),
        ];
        Config {
            bucket_name: DEFAULT_BUCKET.into(),
            region: default_region(),
            endpoint: None,
            paths: prefixes.iter().map(|(p, _)| p.to_string()).collect(),
            type_map: prefixes
                .iter()
                .map(|(p, label)| (p.to_string(), label.to_string()))
                .collect(),
            listing_path: default_listing_path(),
            package_base_url: default_package_base_url(),
            output_dir: default_output_dir(),
            downloader: DownloaderConfig::default(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Resolve and load the configuration.
    ///
    /// Lookup order: the explicit path, `PMC_FETCH_CONFIG`, `./config.json`,
    /// `<user config dir>/pmc-fetch/config.json`, then built-in defaults.
    /// An explicitly named file must exist; the implicit locations are
    /// skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Self::from_file(Path::new(&path));
            }
        }
        for candidate in implicit_locations() {
            if candidate.is_file() {
                log::debug!("Using config file {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }
        log::debug!("No config file found, using built-in defaults");
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FetchError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let config: Config =
            serde_json::from_str(&text).map_err(|source| FetchError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket_name.trim().is_empty() {
            return Err(FetchError::Config("bucket name is empty".into()));
        }
        if self.paths.is_empty() {
            return Err(FetchError::Config("no key prefixes configured".into()));
        }
        if let Some(missing) = self.paths.iter().find(|p| !self.type_map.contains_key(*p)) {
            return Err(FetchError::Config(format!(
                "prefix '{}' has no entry in typeMap",
                missing
            )));
        }
        if self.downloader.program.trim().is_empty() {
            return Err(FetchError::Config("downloader program is empty".into()));
        }
        Ok(())
    }

    /// Type label for a configured prefix.
    pub fn label_for(&self, prefix: &str) -> Option<&str> {
        self.type_map.get(prefix).map(String::as_str)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Directory that holds everything downloaded for one article.
    pub fn article_dir(&self, id: &str) -> PathBuf {
        self.output_dir.join(id)
    }
}

fn implicit_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from("config.json")];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("pmc-fetch").join("config.json"));
    }
    locations
}
