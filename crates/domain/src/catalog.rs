use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ColorHex, DomainError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchColors {
    pub primary: ColorHex,
    pub secondary: ColorHex,
    pub tertiary: ColorHex,
}

impl SwatchColors {
    /// Swatch by card position: 0 primary, 1 secondary, 2 tertiary.
    pub fn swatch(&self, index: usize) -> Result<&ColorHex, DomainError> {
        match index {
            0 => Ok(&self.primary),
            1 => Ok(&self.secondary),
            2 => Ok(&self.tertiary),
            _ => Err(DomainError::SwatchOutOfRange { index, len: 3 }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<SwatchColors>,
}

impl ImageEntry {
    pub fn primary(&self) -> Option<&ColorHex> {
        self.colors.as_ref().map(|colors| &colors.primary)
    }
}

/// The gallery data file: `{ "images": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub images: Vec<ImageEntry>,
}

/// Entries whose primary color matches `selected`, or all entries when nothing
/// is selected. Order is preserved.
pub fn filter_entries<'a>(
    entries: &'a [ImageEntry],
    selected: Option<&ColorHex>,
) -> Vec<&'a ImageEntry> {
    match selected {
        None => entries.iter().collect(),
        Some(color) => entries
            .iter()
            .filter(|entry| entry.primary().is_some_and(|primary| primary.matches(color)))
            .collect(),
    }
}

/// Lowercased primary colors in first-seen order, without duplicates.
pub fn color_chips(entries: &[ImageEntry]) -> Vec<ColorHex> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(ImageEntry::primary)
        .map(ColorHex::normalized)
        .filter(|color| seen.insert(color.clone()))
        .collect()
}

/// Read-only catalog plus the color the user picked from the chip bar.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    catalog: Catalog,
    selected: Option<ColorHex>,
}

impl CatalogFilter {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selected: None,
        }
    }

    pub fn select(&mut self, color: ColorHex) {
        self.selected = Some(color);
    }

    pub fn show_all(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ColorHex> {
        self.selected.as_ref()
    }

    pub fn visible(&self) -> Vec<&ImageEntry> {
        filter_entries(&self.catalog.images, self.selected.as_ref())
    }

    pub fn chips(&self) -> Vec<ColorHex> {
        color_chips(&self.catalog.images)
    }
}
