use std::path::{Path, PathBuf};
use std::sync::Arc;

use swatchbook_domain::{Catalog, ExtractedColor, PreviewRef, UploadFile};

use crate::ApplicationError;

pub trait CatalogSource {
    fn load_catalog(&self) -> Result<Catalog, ApplicationError>;
}

pub trait CatalogSink {
    fn save_catalog(&self, catalog: &Catalog) -> Result<(), ApplicationError>;
}

/// Turns encoded image bytes into a palette ordered by prominence.
pub trait ColorExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<ExtractedColor>, ApplicationError>;
}

#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub sequence: u64,
    pub preview: PreviewRef,
    pub bytes: Arc<[u8]>,
}

#[derive(Debug)]
pub struct ExtractionOutcome {
    pub sequence: u64,
    pub result: Result<Vec<ExtractedColor>, ApplicationError>,
}

/// Runs extractions off the caller's thread. Results come back through
/// `try_receive` in completion order.
pub trait ExtractionPipeline {
    fn submit(&self, job: ExtractionJob) -> Result<(), ApplicationError>;

    fn try_receive(&self) -> Result<Option<ExtractionOutcome>, ApplicationError>;
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ApplicationError>;
}

/// Owns uploaded bytes for as long as a preview of them is shown.
pub trait PreviewStore {
    fn create(&self, file: UploadFile) -> Result<PreviewRef, ApplicationError>;

    fn bytes(&self, preview: &PreviewRef) -> Result<Arc<[u8]>, ApplicationError>;

    /// Releases the bytes behind `preview`. Revoking twice is a no-op.
    fn revoke(&self, preview: &PreviewRef);

    fn live_previews(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub canonical_path: PathBuf,
    /// Path below the scanned folder, `/`-separated.
    pub relative_path: String,
}

#[derive(Debug, Clone, Default)]
pub struct FileScanSummary {
    pub scanned_files: usize,
    pub supported_files: usize,
    pub files: Vec<ScannedFile>,
}

pub trait FileScanner {
    fn scan_supported(&self, folder: &str) -> Result<FileScanSummary, ApplicationError>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ApplicationError>;
}
