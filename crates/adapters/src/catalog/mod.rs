use std::fs;
use std::path::PathBuf;

use swatchbook_application::{ApplicationError, CatalogSink, CatalogSource};
use swatchbook_domain::Catalog;
use tracing::debug;

/// Gallery data file in the `{ "images": [...] }` layout.
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonCatalogFile {
    fn load_catalog(&self) -> Result<Catalog, ApplicationError> {
        if !self.path.is_file() {
            return Err(ApplicationError::NotFound(format!(
                "catalog file does not exist: {}",
                self.path.display()
            )));
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|error| ApplicationError::Io(error.to_string()))?;
        let catalog: Catalog = serde_json::from_str(&raw).map_err(|error| {
            ApplicationError::Catalog(format!("{}: {error}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), images = catalog.images.len(), "catalog parsed");
        Ok(catalog)
    }
}

impl CatalogSink for JsonCatalogFile {
    fn save_catalog(&self, catalog: &Catalog) -> Result<(), ApplicationError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(catalog)
            .map_err(|error| ApplicationError::Catalog(error.to_string()))?;
        fs::write(&self.path, json).map_err(|error| ApplicationError::Io(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use swatchbook_domain::{ColorHex, ImageEntry, SwatchColors};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn loads_gallery_data_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r##"{
                "images": [
                    { "url": "/img/dunes.jpg", "colors": { "primary": "#D9A066", "secondary": "#8f563b", "tertiary": "#222034" } },
                    { "url": "/img/untagged.jpg" }
                ]
            }"##,
        )
        .expect("write");

        let catalog = JsonCatalogFile::new(&path).load_catalog().expect("load");
        assert_eq!(catalog.images.len(), 2);
        assert_eq!(
            catalog.images[0].primary(),
            Some(&ColorHex::new("#D9A066"))
        );
        assert!(catalog.images[1].colors.is_none());
    }

    #[test]
    fn save_then_load_preserves_entries() {
        let dir = TempDir::new().expect("tempdir");
        let file = JsonCatalogFile::new(dir.path().join("nested").join("catalog.json"));
        let catalog = Catalog {
            images: vec![ImageEntry {
                url: "a.png".to_string(),
                colors: Some(SwatchColors {
                    primary: ColorHex::new("#010203"),
                    secondary: ColorHex::new("#040506"),
                    tertiary: ColorHex::new("#070809"),
                }),
            }],
        };

        file.save_catalog(&catalog).expect("save");
        assert_eq!(file.load_catalog().expect("load"), catalog);
    }

    #[test]
    fn missing_and_malformed_files_are_reported() {
        let dir = TempDir::new().expect("tempdir");
        let missing = JsonCatalogFile::new(dir.path().join("missing.json"));
        assert!(matches!(
            missing.load_catalog(),
            Err(ApplicationError::NotFound(_))
        ));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"images\": [ { \"colors\": 4 } ] }").expect("write");
        assert!(matches!(
            JsonCatalogFile::new(&path).load_catalog(),
            Err(ApplicationError::Catalog(_))
        ));
    }
}
