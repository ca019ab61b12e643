#[derive(Debug, Clone, Default)]
pub struct LoadCatalogCommand;

#[derive(Debug, Clone)]
pub struct IndexFolderCommand {
    pub folder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub scanned_files: usize,
    pub supported_files: usize,
    pub indexed: usize,
    pub without_colors: usize,
    pub failed: usize,
}
