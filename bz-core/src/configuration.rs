use std::path::PathBuf;

pub const BAZAAR_URL: &str = "https://api.hypixel.net/v2/skyblock/bazaar";
pub const ITEMS_URL: &str = "https://api.hypixel.net/v2/resources/skyblock/items";
pub const DEFAULT_OUTPUT_FILE: &str = "conversions.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfiguration {
    pub marketplace_url: String,
    pub item_catalog_url: String,
    pub output_path: PathBuf,
}

impl GeneratorConfiguration {
    pub fn with_output_path(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            ..Default::default()
        }
    }
}

impl Default for GeneratorConfiguration {
    fn default() -> Self {
        Self {
            marketplace_url: BAZAAR_URL.to_string(),
            item_catalog_url: ITEMS_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}
