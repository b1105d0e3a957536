// In-memory object store for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read};

use reqwest::StatusCode;

use crate::error::{FetchError, Result};
use crate::store::ObjectStore;

#[derive(Default)]
pub struct MemoryStore {
    objects: HashMap<String, Vec<u8>>,
    failing: HashMap<String, StatusCode>,
    failing_fetch: HashMap<String, StatusCode>,
    /// Keys passed to `exists`, in call order.
    pub probed: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, key: &str, body: &[u8]) -> Self {
        self.objects.insert(key.to_string(), body.to_vec());
        self
    }

    /// Make every request for `key` fail with `status`.
    pub fn with_failure(mut self, key: &str, status: StatusCode) -> Self {
        self.failing.insert(key.to_string(), status);
        self
    }

    /// Report `key` as present but fail every fetch of it with `status`.
    pub fn with_fetch_failure(mut self, key: &str, status: StatusCode) -> Self {
        self.objects.insert(key.to_string(), Vec::new());
        self.failing_fetch.insert(key.to_string(), status);
        self
    }

    fn check(&self, failing: &HashMap<String, StatusCode>, key: &str) -> Result<()> {
        match failing.get(key) {
            Some(status) => Err(FetchError::Store {
                key: key.to_string(),
                status: *status,
            }),
            None => Ok(()),
        }
    }
}

impl ObjectStore for MemoryStore {
    fn exists(&self, key: &str) -> Result<bool> {
        self.probed.borrow_mut().push(key.to_string());
        self.check(&self.failing, key)?;
        Ok(self.objects.contains_key(key))
    }

    fn fetch(&self, key: &str) -> Result<Box<dyn Read>> {
        self.check(&self.failing, key)?;
        self.check(&self.failing_fetch, key)?;
        let body = self.objects.get(key).ok_or_else(|| FetchError::Store {
            key: key.to_string(),
            status: StatusCode::NOT_FOUND,
        })?;
        Ok(Box::new(Cursor::new(body.clone())))
    }
}
