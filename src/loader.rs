//! Dataset acquisition for the analysis core.
//!
//! The core never performs I/O; this module fetches the manifest CSV from a
//! mirror (HTTP) or a local file, parses it, and optionally memoizes the
//! result in a [`DatasetHandle`]. Core functions always receive the table
//! by reference, so callers decide whether and where to cache.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use crate::parser::parse_manifest;
use crate::record::Passenger;

/// Canonical public mirror of the manifest, as used by the reference feed.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/leontoddjohnson/datasets/main/data/titanic.csv";

/// Environment variable that overrides the default mirror.
pub const MANIFEST_URL_ENV: &str = "TITANIC_CSV_URL";

/// A place the raw manifest bytes can come from.
pub trait ManifestSource {
    fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable identity of the source, used in logs.
    fn describe(&self) -> String;
}

/// Fetches the manifest over HTTP with a blocking GET.
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl ManifestSource for HttpSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .with_context(|| format!("GET {} failed", self.url))?;
        Ok(resp.bytes()?.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the manifest from a local file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ManifestSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Builds a source for a CLI-style argument: URLs become [`HttpSource`],
/// anything else a [`FileSource`].
pub fn source_for(arg: &str) -> Box<dyn ManifestSource> {
    if arg.starts_with("http://") || arg.starts_with("https://") {
        Box::new(HttpSource::new(arg))
    } else {
        Box::new(FileSource::new(arg))
    }
}

/// The default mirror chain: the env override first if set, then the
/// canonical public URL.
pub fn default_sources() -> Vec<Box<dyn ManifestSource>> {
    let mut sources: Vec<Box<dyn ManifestSource>> = Vec::new();
    if let Ok(url) = std::env::var(MANIFEST_URL_ENV) {
        sources.push(source_for(&url));
    }
    sources.push(Box::new(HttpSource::new(DEFAULT_MANIFEST_URL)));
    sources
}

/// Tries each source in order and returns the first manifest that both
/// fetches and parses. A mirror that fetches but fails to parse is treated
/// as a failed mirror, not a fatal error, unless it is the last one.
pub fn load_manifest(sources: &[Box<dyn ManifestSource>]) -> Result<Vec<Passenger>> {
    if sources.is_empty() {
        bail!("no manifest sources configured");
    }

    let mut last_err = None;
    for source in sources {
        debug!(source = %source.describe(), "Fetching manifest");
        match source.fetch().and_then(|bytes| parse_manifest(&bytes)) {
            Ok(passengers) => {
                info!(
                    source = %source.describe(),
                    rows = passengers.len(),
                    "Manifest loaded"
                );
                return Ok(passengers);
            }
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "Manifest source failed");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap())
}

/// Lazily-initialized, populate-at-most-once cache for a loaded manifest.
///
/// Owned by the calling layer; the analysis core never reaches for it. The
/// cell is written on the first successful load and read thereafter, so
/// repeated view invocations share one table snapshot.
#[derive(Default)]
pub struct DatasetHandle {
    cell: OnceLock<Vec<Passenger>>,
}

impl DatasetHandle {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the cached manifest, loading it with `load` on first use.
    /// A failed load leaves the handle empty so a later call can retry.
    pub fn get_or_load(
        &self,
        load: impl FnOnce() -> Result<Vec<Passenger>>,
    ) -> Result<&[Passenger]> {
        if let Some(cached) = self.cell.get() {
            return Ok(cached);
        }
        let loaded = load()?;
        Ok(self.cell.get_or_init(|| loaded))
    }
}
