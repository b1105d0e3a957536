// Object store access: a small trait so probing and downloading can run
// against any backend, plus a blocking client for public S3 buckets.
//
// The PMC bucket allows anonymous reads, so plain HTTPS HEAD/GET requests
// against the bucket's REST endpoint are all that is needed.

use std::io::Read;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::Config;
use crate::error::{FetchError, Result};

/// Read-only view of a key/value object store.
pub trait ObjectStore {
    /// Metadata-only existence check. `Ok(false)` means the backend
    /// reported "not found"; every other failure is an error.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Request the object and return its body once the backend has
    /// answered successfully. Nothing is read until the caller does.
    fn fetch(&self, key: &str) -> Result<Box<dyn Read>>;
}

/// Anonymous client for an S3 bucket (or an S3-compatible server).
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    base_url: String,
}

impl S3Store {
    /// Build a client for the bucket named in `config`. Virtual-hosted
    /// addressing is used against AWS, path-style against a custom endpoint.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()?;
        Ok(S3Store {
            client,
            base_url: bucket_url(config),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key.trim_start_matches('/'))
    }
}

impl ObjectStore for S3Store {
    fn exists(&self, key: &str) -> Result<bool> {
        let res = self.client.head(self.object_url(key)).send()?;
        head_outcome(key, res.status())
    }

    fn fetch(&self, key: &str) -> Result<Box<dyn Read>> {
        let res = self.client.get(self.object_url(key)).send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Store {
                key: key.to_string(),
                status,
            });
        }
        Ok(Box::new(res))
    }
}

fn bucket_url(config: &Config) -> String {
    match &config.endpoint {
        Some(endpoint) => format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            config.bucket_name
        ),
        None => format!(
            "https://{}.s3.{}.amazonaws.com",
            config.bucket_name, config.region
        ),
    }
}

fn head_outcome(key: &str, status: StatusCode) -> Result<bool> {
    if status.is_success() {
        Ok(true)
    } else if status == StatusCode::NOT_FOUND {
        Ok(false)
    } else {
        Err(FetchError::Store {
            key: key.to_string(),
            status,
        })
    }
}
