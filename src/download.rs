// Remote file downloader: stream a located XML object to
// `<output dir>/<id>/<id>.xml`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::store::ObjectStore;

/// Local path the XML for `id` is saved to.
pub fn article_xml_path(config: &Config, id: &str) -> PathBuf {
    config.article_dir(id).join(format!("{}.xml", id))
}

/// Download `key` and write it to the article's XML path, creating
/// directories as needed and replacing any existing file.
///
/// The local file is only created once the store has answered the request,
/// so a refused or failed request leaves an earlier copy untouched. A
/// transfer that breaks mid-body leaves whatever was written so far.
pub fn download_article_xml<S>(
    store: &S,
    config: &Config,
    key: &str,
    id: &str,
) -> Result<(PathBuf, u64)>
where
    S: ObjectStore + ?Sized,
{
    let path = article_xml_path(config, id);
    let mut body = store.fetch(key)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(&path)?);
    let written = io::copy(&mut body, &mut writer)?;
    writer.flush()?;
    log::debug!("Wrote {} bytes from {} to {}", written, key, path.display());
    Ok((path, written))
}
