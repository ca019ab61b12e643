use std::fs;
use std::path::Path;

use swatchbook_application::{ApplicationError, FileScanSummary, FileScanner, ScannedFile};
use swatchbook_domain::{detect_image_kind, ImageKind};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct WalkdirFileScanner;

impl FileScanner for WalkdirFileScanner {
    fn scan_supported(&self, folder: &str) -> Result<FileScanSummary, ApplicationError> {
        let folder_path = Path::new(folder);
        if !folder_path.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "folder does not exist or is not a directory: {folder}"
            )));
        }

        let mut summary = FileScanSummary::default();

        for entry in WalkDir::new(folder_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }

            summary.scanned_files += 1;
            let file_path = entry.path();
            if detect_image_kind(file_path) == ImageKind::Unsupported {
                continue;
            }

            let canonical = file_path
                .canonicalize()
                .map_err(|error| ApplicationError::Io(error.to_string()))?;
            let relative_path = file_path
                .strip_prefix(folder_path)
                .unwrap_or(file_path)
                .components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            summary.supported_files += 1;
            summary.files.push(ScannedFile {
                canonical_path: canonical,
                relative_path,
            });
        }

        Ok(summary)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ApplicationError> {
        fs::read(path).map_err(|error| ApplicationError::Io(format!("{}: {error}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scans_supported_images_recursively() {
        let dir = TempDir::new().expect("tempdir");
        fs::create_dir_all(dir.path().join("nested")).expect("mkdir");
        fs::write(dir.path().join("b.png"), b"png").expect("write");
        fs::write(dir.path().join("notes.txt"), b"text").expect("write");
        fs::write(dir.path().join("nested").join("a.JPG"), b"jpg").expect("write");

        let summary = WalkdirFileScanner
            .scan_supported(&dir.path().to_string_lossy())
            .expect("scan");
        assert_eq!(summary.scanned_files, 3);
        assert_eq!(summary.supported_files, 2);

        let relative: Vec<&str> = summary
            .files
            .iter()
            .map(|file| file.relative_path.as_str())
            .collect();
        assert_eq!(relative, vec!["b.png", "nested/a.JPG"]);

        let bytes = WalkdirFileScanner
            .read_file(&summary.files[0].canonical_path)
            .expect("read");
        assert_eq!(bytes, b"png");
    }

    #[test]
    fn missing_folder_is_invalid_input() {
        let result = WalkdirFileScanner.scan_supported("/definitely/not/here");
        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    }
}
