pub mod catalog;
pub mod clipboard;
pub mod extract;
pub mod fs;
pub mod presenters;
pub mod preview;

pub use catalog::JsonCatalogFile;
pub use clipboard::{ArboardClipboard, ClipboardHandoff};
pub use extract::{BackgroundExtractionPipeline, ExtractionSettings, ImageCrateExtractor};
pub use fs::WalkdirFileScanner;
pub use presenters::{
    present_chips, present_entry_row, present_extracted_color, present_index_report,
    present_swatch_state, present_upload_phase,
};
pub use preview::InMemoryPreviewStore;
