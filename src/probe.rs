// Remote path prober: find which configured prefix holds `<id>.xml`.

use crate::config::Config;
use crate::error::Result;
use crate::store::ObjectStore;

/// A located XML file: its remote key and the type label of its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundFile {
    pub key: String,
    pub kind: String,
}

/// Remote key of the XML file for `id` under `prefix`.
pub fn xml_key(prefix: &str, id: &str) -> String {
    format!("{}{}.xml", prefix, id)
}

/// Probe the configured prefixes in order and return the first one that
/// has `<prefix><id>.xml`.
///
/// A "not found" answer moves on to the next prefix. Any other backend
/// error stops the search and is returned.
pub fn find_file<S>(store: &S, config: &Config, id: &str) -> Result<Option<FoundFile>>
where
    S: ObjectStore + ?Sized,
{
    for prefix in &config.paths {
        let key = xml_key(prefix, id);
        log::debug!("Probing {}", key);
        if store.exists(&key)? {
            let kind = config.label_for(prefix).unwrap_or(prefix).to_string();
            return Ok(Some(FoundFile { key, kind }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::test_support::MemoryStore;
    use reqwest::StatusCode;

    fn config(prefixes: &[(&str, &str)]) -> Config {
        Config {
            bucket_name: "b".into(),
            paths: prefixes.iter().map(|(p, _)| p.to_string()).collect(),
            type_map: prefixes
                .iter()
                .map(|(p, l)| (p.to_string(), l.to_string()))
                .collect(),
            ..Config::default()
        }
    }

    #[test]
    fn finds_file_under_single_prefix() {
        let config = config(&[("oa_package/", "open-access")]);
        let store = MemoryStore::new().with_object("oa_package/PMC123.xml", b"<article/>");
        let found = find_file(&store, &config, "PMC123").unwrap();
        assert_eq!(
            found,
            Some(FoundFile {
                key: "oa_package/PMC123.xml".into(),
                kind: "open-access".into(),
            })
        );
    }

    #[test]
    fn first_configured_prefix_wins() {
        let config = config(&[("a/", "A"), ("b/", "B"), ("c/", "C")]);
        let store = MemoryStore::new()
            .with_object("b/PMC1.xml", b"b")
            .with_object("c/PMC1.xml", b"c");
        let found = find_file(&store, &config, "PMC1").unwrap().unwrap();
        assert_eq!(found.key, "b/PMC1.xml");
        assert_eq!(found.kind, "B");
        assert_eq!(
            *store.probed.borrow(),
            vec!["a/PMC1.xml".to_string(), "b/PMC1.xml".to_string()]
        );
    }

    #[test]
    fn missing_everywhere_is_not_an_error() {
        let config = config(&[("a/", "A"), ("b/", "B")]);
        let store = MemoryStore::new().with_object("a/PMC2.xml", b"x");
        assert_eq!(find_file(&store, &config, "PMC9").unwrap(), None);
        assert_eq!(store.probed.borrow().len(), 2);
    }

    #[test]
    fn backend_error_aborts_probing() {
        let config = config(&[("a/", "A"), ("b/", "B")]);
        let store = MemoryStore::new()
            .with_failure("a/PMC1.xml", StatusCode::FORBIDDEN)
            .with_object("b/PMC1.xml", b"x");
        let err = find_file(&store, &config, "PMC1").unwrap_err();
        assert!(matches!(err, FetchError::Store { status, .. } if status == StatusCode::FORBIDDEN));
        assert_eq!(*store.probed.borrow(), vec!["a/PMC1.xml".to_string()]);
    }
}
