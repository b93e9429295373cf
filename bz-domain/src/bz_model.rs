use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        ProductId(value.to_string())
    }
}

/// Item from the items api. The name may still contain formatting codes and placeholders.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceEntry {
    pub product_id: ProductId,
}

/// The subset of the bazaar response we care about.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceResponse {
    pub success: bool,
    pub last_updated: f64,
    pub products: HashMap<String, MarketplaceEntry>,
}

impl MarketplaceResponse {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.last_updated)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemCatalogResponse {
    pub success: bool,
    pub last_updated: f64,
    pub items: Vec<CatalogEntry>,
}

impl ItemCatalogResponse {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.last_updated)
    }
}

fn millis_to_utc(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}
