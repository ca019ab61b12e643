mod error;
mod extraction;
mod ports;
mod service;
mod swatch;
mod use_cases;

pub use error::ApplicationError;
pub use extraction::{PaletteExtractionFlow, SubmitOutcome, UploadEvent};
pub use ports::{
    CatalogSink, CatalogSource, Clipboard, ColorExtractor, ExtractionJob, ExtractionOutcome,
    ExtractionPipeline, FileScanSummary, FileScanner, PreviewStore, ScannedFile,
};
pub use service::ApplicationService;
pub use swatch::{CopyOutcome, SwatchInteraction};
pub use use_cases::{IndexFolderCommand, IndexReport, LoadCatalogCommand};
