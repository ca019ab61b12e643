mod catalog;
mod color;
mod error;
mod hover;
mod image;
mod upload;

pub use catalog::{
    color_chips, filter_entries, Catalog, CatalogFilter, ImageEntry, SwatchColors,
};
pub use color::{ColorHex, ExtractedColor};
pub use error::DomainError;
pub use hover::{CopyTimer, HoverState, SwatchState};
pub use image::{detect_image_kind, ImageKind};
pub use upload::{CompletionOutcome, PreviewRef, UploadFile, UploadPhase, UploadState};
