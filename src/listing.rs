// Listing-file scanner. The PMC file list is a flat comma-delimited file
// with one package per line:
//
//   File,Article Citation,Accession ID,Last Updated,PMID,License
//
// Lookups are a linear scan for the first line that contains the
// identifier anywhere in its text. That can match an unrelated field
// (e.g. `PMC12` inside `PMC123`); callers get the first such line.
// Bytes that are not valid UTF-8 are decoded with replacement characters
// so one badly encoded citation does not end the scan.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One row of the listing file. Also written out as the `entry.json`
/// descriptor next to a downloaded package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub url: String,
    pub journal: String,
    pub pmc_id: String,
    pub date: String,
    pub id: String,
    pub license: String,
}

impl ListingEntry {
    /// Split a raw line into the six columns. Missing columns are left
    /// empty, extra columns are dropped.
    pub fn from_line(line: &str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut cols = line.split(',').map(str::to_string);
        let mut next = || cols.next().unwrap_or_default();
        ListingEntry {
            url: next(),
            journal: next(),
            pmc_id: next(),
            date: next(),
            id: next(),
            license: next(),
        }
    }
}

/// Scan the listing file at `path` for `id`.
pub fn find_entry(path: &Path, id: &str) -> Result<Option<ListingEntry>> {
    let file = File::open(path)?;
    scan(BufReader::new(file), id)
}

/// Return the first line of `reader` containing `id`, parsed.
pub fn scan<R: BufRead>(mut reader: R, id: &str) -> Result<Option<ListingEntry>> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
        let line = String::from_utf8_lossy(raw);
        if line.contains(id) {
            let entry = ListingEntry::from_line(&line);
            log::info!("Found supplementary package entry: {:?}", entry);
            return Ok(Some(entry));
        }
    }
    log::info!("{} not found in listing", id);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LISTING: &str = "\
File,Article Citation,Accession ID,Last Updated (YYYY-MM-DD HH:MM:SS),PMID,License
oa_package/08/e0/PMC13900.tar.gz,Breast Cancer Res. 2001 Nov 2; 3(1):55-60,PMC13900,2019-11-05 11:56:12,11250746,NO-CC CODE
https://example.org/foo.tar.gz,JournalX,PMC123,2020-01-01,999,CC-BY
oa_package/aa/bb/PMC1234.tar.gz,JournalY,PMC1234,2021-02-02,1000,CC0
";

    #[test]
    fn parses_matching_line_in_column_order() {
        let entry = scan(Cursor::new(LISTING), "PMC123").unwrap().unwrap();
        assert_eq!(
            entry,
            ListingEntry {
                url: "https://example.org/foo.tar.gz".into(),
                journal: "JournalX".into(),
                pmc_id: "PMC123".into(),
                date: "2020-01-01".into(),
                id: "999".into(),
                license: "CC-BY".into(),
            }
        );
    }

    #[test]
    fn first_match_wins_even_on_substring() {
        // `PMC1` is a substring of both data lines; the earlier one is taken.
        let entry = scan(Cursor::new(LISTING), "PMC1").unwrap().unwrap();
        assert_eq!(entry.pmc_id, "PMC13900");
    }

    #[test]
    fn absent_identifier_is_none() {
        assert_eq!(scan(Cursor::new(LISTING), "PMC999999").unwrap(), None);
    }

    #[test]
    fn invalid_utf8_line_does_not_stop_scan() {
        let listing: &[u8] = b"oa/x.tar.gz,Caf\xe9 J,PMC1,2020-01-01,1,CC0\n\
                               oa/y.tar.gz,J,PMC123,2020-01-02,2,CC-BY\n";
        let entry = scan(Cursor::new(listing), "PMC123").unwrap().unwrap();
        assert_eq!(entry.url, "oa/y.tar.gz");
        assert_eq!(entry.pmc_id, "PMC123");
    }

    #[test]
    fn invalid_utf8_in_matching_line_is_replaced() {
        let listing: &[u8] = b"oa/x.tar.gz,Caf\xe9 J,PMC7,2020-01-01,1,CC0";
        let entry = scan(Cursor::new(listing), "PMC7").unwrap().unwrap();
        assert_eq!(entry.journal, "Caf\u{FFFD} J");
        assert_eq!(entry.license, "CC0");
    }

    #[test]
    fn strips_carriage_return() {
        let entry = ListingEntry::from_line("a.tar.gz,J,PMC5,2020,1,CC0\r");
        assert_eq!(entry.license, "CC0");
    }

    #[test]
    fn short_line_leaves_missing_columns_empty() {
        let entry = ListingEntry::from_line("a.tar.gz,J,PMC5");
        assert_eq!(entry.pmc_id, "PMC5");
        assert_eq!(entry.date, "");
        assert_eq!(entry.license, "");
    }

    #[test]
    fn descriptor_uses_camel_case_keys() {
        let entry = ListingEntry::from_line("u,j,PMC5,d,1,l");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["pmcId"], "PMC5");
        assert_eq!(json["url"], "u");
    }

    #[test]
    fn reads_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("oa_file_list.csv");
        std::fs::write(&path, LISTING).unwrap();
        let entry = find_entry(&path, "PMC1234").unwrap().unwrap();
        assert_eq!(entry.url, "oa_package/aa/bb/PMC1234.tar.gz");
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_entry(&tmp.path().join("missing.csv"), "PMC1").is_err());
    }
}
