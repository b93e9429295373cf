use crate::namer::{gemstone_name, override_name, synthesize_name};
use crate::normalizer::normalize;
use crate::{CatalogEntry, Diagnostic, MarketplaceResponse, ProductId};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Mapping from product id to display name. Keys are kept in ordinal order, so the
/// serialized form is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionTable(BTreeMap<ProductId, String>);

impl ConversionTable {
    pub fn get(&self, id: &ProductId) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &str)> {
        self.0.iter().map(|(id, name)| (id, name.as_str()))
    }

    /// Pretty printed with 4 spaces of indentation and without a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;

        // serde_json only ever emits valid utf-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Display name -> id. When several ids share a name, the first id in key order wins.
    pub fn reverse_index(&self) -> HashMap<&str, &ProductId> {
        let mut index = HashMap::with_capacity(self.0.len());
        for (id, name) in &self.0 {
            index.entry(name.as_str()).or_insert(id);
        }
        index
    }

    /// Display names used by more than one id, sorted by name.
    pub fn duplicate_display_names(&self) -> Vec<(String, Vec<ProductId>)> {
        self.0
            .iter()
            .map(|(id, name)| (name.clone(), id.clone()))
            .into_group_map()
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Gemstone,
    Catalog,
    Override,
    Synthesized,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub from_catalog: usize,
    /// gemstones, overrides and generic synthesis
    pub synthesized: usize,
}

impl BuildStats {
    fn record(&mut self, source: NameSource) {
        match source {
            NameSource::Catalog => self.from_catalog += 1,
            NameSource::Gemstone | NameSource::Override | NameSource::Synthesized => self.synthesized += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub table: ConversionTable,
    pub stats: BuildStats,
    pub diagnostics: Vec<Diagnostic>,
}

/// The marketplace ids are the keys of the `products` map, sorted.
pub fn collect_marketplace_ids(response: &MarketplaceResponse) -> (BTreeSet<ProductId>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let ids = response
        .products
        .iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(key, entry)| {
            let key = ProductId(key.clone());
            if entry.product_id != key {
                diagnostics.push(Diagnostic::ProductIdMismatch {
                    key: key.clone(),
                    product_id: entry.product_id.clone(),
                });
            }
            key
        })
        .collect();

    (ids, diagnostics)
}

/// Names every marketplace id exactly once.
/// Gemstone ids always use the synthesized gemstone name, because the catalog names for them are unreliable.
/// Other ids use the normalized catalog name if there is one, otherwise the override table or generic synthesis.
pub fn build_conversion_table(marketplace_ids: impl IntoIterator<Item = ProductId>, catalog: &[CatalogEntry]) -> BuildOutcome {
    let mut diagnostics = Vec::new();

    let mut catalog_names: HashMap<&ProductId, &str> = HashMap::with_capacity(catalog.len());
    for entry in catalog {
        if catalog_names.insert(&entry.id, entry.name.as_str()).is_some() {
            diagnostics.push(Diagnostic::DuplicateCatalogId { id: entry.id.clone() });
        }
    }

    let mut stats = BuildStats::default();
    let mut entries = BTreeMap::new();

    let marketplace_ids: BTreeSet<ProductId> = marketplace_ids.into_iter().collect();
    for id in marketplace_ids {
        let (name, source) = resolve_name(&id, &catalog_names, &mut diagnostics);
        stats.record(source);
        entries.insert(id, name);
    }

    let table = ConversionTable(entries);

    diagnostics.extend(
        table
            .duplicate_display_names()
            .into_iter()
            .map(|(name, ids)| Diagnostic::DuplicateDisplayName { name, ids }),
    );

    BuildOutcome { table, stats, diagnostics }
}

fn resolve_name(id: &ProductId, catalog_names: &HashMap<&ProductId, &str>, diagnostics: &mut Vec<Diagnostic>) -> (String, NameSource) {
    if let Some(name) = gemstone_name(id, diagnostics) {
        return (name, NameSource::Gemstone);
    }

    if let Some(raw_name) = catalog_names.get(id) {
        return (normalize(raw_name), NameSource::Catalog);
    }

    match override_name(id) {
        Some(name) => (name.to_string(), NameSource::Override),
        None => (synthesize_name(id, diagnostics), NameSource::Synthesized),
    }
}
