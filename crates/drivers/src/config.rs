use swatchbook_adapters::ExtractionSettings;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: String,
    pub copy_feedback_ms: u64,
    pub settle_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub extraction: ExtractionSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: "data/data.json".to_string(),
            copy_feedback_ms: 1200,
            settle_timeout_ms: 10_000,
            poll_interval_ms: 15,
            extraction: ExtractionSettings::default(),
        }
    }
}
