//! Reading the raw source table from disk or over HTTP.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads source bytes from a local file path or fetches them over HTTP.
///
/// Gzip-compressed content is decompressed transparently.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the request fails, or the
/// gzip stream is corrupt.
#[tracing::instrument(fields(source = %location))]
pub fn read_source(location: &str) -> Result<Vec<u8>> {
    let bytes = if location.starts_with("http") {
        fetch_bytes(location)?
    } else {
        std::fs::read(location).with_context(|| format!("cannot read source file '{location}'"))?
    };
    debug!(bytes = bytes.len(), "Source bytes read");

    decompress(bytes)
}

/// Blocking HTTP GET; the pipeline never suspends.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)
        .with_context(|| format!("cannot fetch source '{url}'"))?
        .error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

fn decompress(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    let mut out = Vec::new();
    GzDecoder::new(bytes.as_slice())
        .read_to_end(&mut out)
        .context("source looks gzip-compressed but could not be decompressed")?;
    debug!(bytes = out.len(), "Source decompressed");
    Ok(out)
}
