use swatchbook_domain::{Catalog, ExtractedColor, ImageEntry, SwatchColors};
use tracing::{info, warn};

use crate::{
    ApplicationError, CatalogSink, CatalogSource, ColorExtractor, FileScanner, IndexFolderCommand,
    IndexReport, LoadCatalogCommand,
};

pub struct ApplicationService {
    catalog_source: Box<dyn CatalogSource>,
    catalog_sink: Box<dyn CatalogSink>,
    scanner: Box<dyn FileScanner>,
    extractor: Box<dyn ColorExtractor>,
}

impl ApplicationService {
    pub fn new(
        catalog_source: Box<dyn CatalogSource>,
        catalog_sink: Box<dyn CatalogSink>,
        scanner: Box<dyn FileScanner>,
        extractor: Box<dyn ColorExtractor>,
    ) -> Self {
        Self {
            catalog_source,
            catalog_sink,
            scanner,
            extractor,
        }
    }

    pub fn load_catalog(&self, _command: LoadCatalogCommand) -> Result<Catalog, ApplicationError> {
        let catalog = self.catalog_source.load_catalog()?;
        info!(images = catalog.images.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Extracts a palette for every supported image under the folder and
    /// writes the result as a new catalog. Images that fail to decode are
    /// skipped and counted.
    pub fn index_folder(
        &self,
        command: IndexFolderCommand,
    ) -> Result<IndexReport, ApplicationError> {
        if command.folder.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "folder path must not be empty".to_string(),
            ));
        }

        let scan = self.scanner.scan_supported(&command.folder)?;
        let mut report = IndexReport {
            scanned_files: scan.scanned_files,
            supported_files: scan.supported_files,
            ..IndexReport::default()
        };
        let mut catalog = Catalog::default();

        for file in scan.files {
            let palette = self
                .scanner
                .read_file(&file.canonical_path)
                .and_then(|bytes| self.extractor.extract(&bytes));
            let palette = match palette {
                Ok(palette) => palette,
                Err(error) => {
                    warn!(path = %file.relative_path, %error, "skipping image");
                    report.failed += 1;
                    continue;
                }
            };

            let colors = swatches_from_palette(&palette);
            if colors.is_none() {
                report.without_colors += 1;
            }
            catalog.images.push(ImageEntry {
                url: file.relative_path,
                colors,
            });
            report.indexed += 1;
        }

        self.catalog_sink.save_catalog(&catalog)?;
        Ok(report)
    }
}

/// The three most prominent colors. Short palettes repeat their last color.
fn swatches_from_palette(palette: &[ExtractedColor]) -> Option<SwatchColors> {
    let last = palette.last()?;
    let pick = |index: usize| palette.get(index).unwrap_or(last).hex.normalized();
    Some(SwatchColors {
        primary: pick(0),
        secondary: pick(1),
        tertiary: pick(2),
    })
}
