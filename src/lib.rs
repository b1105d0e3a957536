// Library root
// -----------
// This crate exposes the lookup and download logic behind the `pmc-fetch`
// binary. `main.rs` only parses arguments and calls into `ui`.
//
// Module responsibilities:
// - `config`: configuration record (bucket, prefixes, type labels, paths,
//   downloader) and how it is located on disk.
// - `store`: object store trait and the anonymous S3 client.
// - `probe`: find which prefix holds an article's XML.
// - `download`: save a located XML object under `articles/<id>/`.
// - `listing`: scan the OA file list for an article's package entry.
// - `package`: fetch a package with an external downloader and write its
//   `entry.json` descriptor.
// - `process`: run external commands with passthrough output.
// - `cli` / `ui`: argument parsing and the per-command flows.
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod listing;
pub mod package;
pub mod probe;
pub mod process;
pub mod store;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{FetchError, Result};
