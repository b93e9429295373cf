use crate::artifact::{write_conversion_table, ArtifactError};
use crate::bz_client::{CatalogClientTrait, CatalogFetchError};
use bz_domain::{build_conversion_table, collect_marketplace_ids, BuildStats, Diagnostic};
use std::path::{Path, PathBuf};
use tracing::{event, warn, Level};

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("fetch stage failed: {0}")]
    Fetch(#[from] CatalogFetchError),
    #[error("write stage failed: {0}")]
    Write(#[from] ArtifactError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub entries: usize,
    pub stats: BuildStats,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!(
            "Mapping written to {} (items API: {}, manually constructed: {})",
            self.output_path.display(),
            self.stats.from_catalog,
            self.stats.synthesized
        )
    }
}

/// Fetches both catalogs concurrently, builds the conversion table and writes it to `output_path`.
/// Nothing is written unless both fetches succeed.
pub async fn generate_conversions(client: &dyn CatalogClientTrait, output_path: &Path) -> Result<GenerationReport, GeneratorError> {
    event!(Level::INFO, "Starting mapping creation...");

    let (marketplace, item_catalog) = futures::try_join!(client.get_marketplace(), client.get_item_catalog())?;

    event!(
        Level::INFO,
        "Fetched {} bazaar products (last updated {}), fetched {} items from items API (last updated {})",
        marketplace.products.len(),
        format_last_updated(marketplace.last_updated_at()),
        item_catalog.items.len(),
        format_last_updated(item_catalog.last_updated_at()),
    );
    if !marketplace.success {
        warn!("Bazaar response reports success=false");
    }
    if !item_catalog.success {
        warn!("Items response reports success=false");
    }

    let (marketplace_ids, mut diagnostics) = collect_marketplace_ids(&marketplace);
    let outcome = build_conversion_table(marketplace_ids, &item_catalog.items);
    diagnostics.extend(outcome.diagnostics);

    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }

    write_conversion_table(output_path, &outcome.table)?;

    Ok(GenerationReport {
        output_path: output_path.to_path_buf(),
        entries: outcome.table.len(),
        stats: outcome.stats,
        diagnostics,
    })
}

fn format_last_updated(last_updated: Option<chrono::DateTime<chrono::Utc>>) -> String {
    last_updated
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bz_client::MockCatalogClientTrait;
    use bz_domain::{CatalogEntry, ItemCatalogResponse, MarketplaceEntry, MarketplaceResponse, ProductId};
    use std::collections::HashMap;
    use std::fs;
    use test_log::test;

    fn marketplace(ids: &[&str]) -> MarketplaceResponse {
        MarketplaceResponse {
            success: true,
            last_updated: 1_700_000_000_000.0,
            products: ids
                .iter()
                .map(|id| {
                    (
                        id.to_string(),
                        MarketplaceEntry {
                            product_id: ProductId::from(*id),
                        },
                    )
                })
                .collect::<HashMap<_, _>>(),
        }
    }

    fn item_catalog(items: &[(&str, &str)]) -> ItemCatalogResponse {
        ItemCatalogResponse {
            success: true,
            last_updated: 1_700_000_000_000.0,
            items: items
                .iter()
                .map(|(id, name)| CatalogEntry {
                    id: ProductId::from(*id),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn mocked_client() -> MockCatalogClientTrait {
        let mut client = MockCatalogClientTrait::new();
        client.expect_get_marketplace().returning(|| {
            Ok(marketplace(&[
                "PERFECT_RUBY_GEM",
                "BLUE_GOBLIN_EGG",
                "VOLCANIC_ROCK",
                "HOLY_PROTECTION_4",
                "HOLY_PROTECTION_42",
                "SHARD_GOBLIN",
                "ENCHANTMENT_ULTIMATE_WISE_3",
            ]))
        });
        client.expect_get_item_catalog().returning(|| {
            Ok(item_catalog(&[
                ("PERFECT_RUBY_GEM", "Perfect Ruby"),
                ("BLUE_GOBLIN_EGG", "§3Blue Goblin Egg"),
                ("VOLCANIC_ROCK", "%%red%%Volcanic Rock"),
                ("NOT_ON_THE_BAZAAR", "Not On The Bazaar"),
            ]))
        });
        client
    }

    fn fetch_error() -> CatalogFetchError {
        CatalogFetchError::Fetch {
            url: "https://example.invalid/items".to_string(),
            source: "connection refused".into(),
        }
    }

    #[test(tokio::test)]
    async fn writes_the_complete_table() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("conversions.json");

        let report = generate_conversions(&mocked_client(), &output).await.unwrap();

        let expected = r#"{
    "BLUE_GOBLIN_EGG": "Blue Goblin Egg",
    "ENCHANTMENT_ULTIMATE_WISE_3": "Ultimate Wise III",
    "HOLY_PROTECTION_4": "Holy Protection IV",
    "HOLY_PROTECTION_42": "Holy Protection 42",
    "PERFECT_RUBY_GEM": "❤ Perfect Ruby Gemstone",
    "SHARD_GOBLIN": "Goblin Shard",
    "VOLCANIC_ROCK": "Volcanic Rock"
}"#;
        assert_eq!(fs::read_to_string(&output).unwrap(), expected);

        assert_eq!(report.entries, 7);
        assert_eq!(
            report.stats,
            BuildStats {
                from_catalog: 2,
                synthesized: 5
            }
        );
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::NoRomanNumeral {
                name: "Holy Protection 42".to_string(),
                number: "42".to_string()
            }]
        );
        assert_eq!(
            report.summary(),
            format!("Mapping written to {} (items API: 2, manually constructed: 5)", output.display())
        );
    }

    #[test(tokio::test)]
    async fn two_runs_produce_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");

        generate_conversions(&mocked_client(), &first).await.unwrap();
        generate_conversions(&mocked_client(), &second).await.unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test(tokio::test)]
    async fn failed_fetch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("conversions.json");

        let mut client = MockCatalogClientTrait::new();
        client.expect_get_marketplace().returning(|| Ok(marketplace(&["COAL"])));
        client.expect_get_item_catalog().returning(|| Err(fetch_error()));

        let err = generate_conversions(&client, &output).await.unwrap_err();

        assert!(matches!(err, GeneratorError::Fetch(CatalogFetchError::Fetch { .. })));
        assert!(err.to_string().starts_with("fetch stage failed"));
        assert!(!output.exists());
    }

    #[test(tokio::test)]
    async fn failed_fetch_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("conversions.json");
        fs::write(&output, "{}").unwrap();

        let mut client = MockCatalogClientTrait::new();
        client.expect_get_marketplace().returning(|| Err(fetch_error()));
        client.expect_get_item_catalog().returning(|| Ok(item_catalog(&[])));

        assert!(generate_conversions(&client, &output).await.is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "{}");
    }
}
