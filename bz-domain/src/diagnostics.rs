use crate::ProductId;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Recoverable anomalies found while building the conversion table.
/// None of them abort a run; the affected id falls back to a less specific naming rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownGemRarity { id: ProductId, rarity: String },
    UnknownGemType { id: ProductId, gem_type: String },
    NoRomanNumeral { name: String, number: String },
    DuplicateCatalogId { id: ProductId },
    ProductIdMismatch { key: ProductId, product_id: ProductId },
    DuplicateDisplayName { name: String, ids: Vec<ProductId> },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownGemRarity { id, rarity } => write!(f, "Unknown gem rarity \"{rarity}\" in id \"{id}\""),
            Diagnostic::UnknownGemType { id, gem_type } => write!(f, "Unknown gem type \"{gem_type}\" in id \"{id}\""),
            Diagnostic::NoRomanNumeral { name, number } => write!(f, "No roman numeral mapping for {number} in \"{name}\""),
            Diagnostic::DuplicateCatalogId { id } => write!(f, "Item catalog contains \"{id}\" more than once (using the last entry)"),
            Diagnostic::ProductIdMismatch { key, product_id } => {
                write!(f, "Marketplace product \"{key}\" reports product_id \"{product_id}\" (using the key)")
            }
            Diagnostic::DuplicateDisplayName { name, ids } => {
                write!(f, "Display name \"{name}\" is shared by {}", ids.iter().map(|id| format!("\"{id}\"")).join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_human_readable_messages() {
        let diagnostic = Diagnostic::NoRomanNumeral {
            name: "Holy Protection 42".to_string(),
            number: "42".to_string(),
        };
        assert_eq!(diagnostic.to_string(), "No roman numeral mapping for 42 in \"Holy Protection 42\"");

        let diagnostic = Diagnostic::DuplicateDisplayName {
            name: "Drain V".to_string(),
            ids: vec![ProductId::from("ENCHANTMENT_SYPHON_5"), ProductId::from("ENCHANTMENT_DRAIN_5")],
        };
        assert_eq!(
            diagnostic.to_string(),
            "Display name \"Drain V\" is shared by \"ENCHANTMENT_SYPHON_5\", \"ENCHANTMENT_DRAIN_5\""
        );
    }
}
