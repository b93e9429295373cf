use crate::normalizer::normalize;
use crate::{Diagnostic, ProductId};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;
use strum::{EnumIter, EnumString};

/// Ids whose synthesized name would be wrong, e.g. because the enchantment got renamed in-game.
const NAME_OVERRIDES: &[(&str, &str)] = &[
    ("ENCHANTMENT_ULTIMATE_WISE_1", "Ultimate Wise I"),
    ("ENCHANTMENT_ULTIMATE_WISE_2", "Ultimate Wise II"),
    ("ENCHANTMENT_ULTIMATE_WISE_3", "Ultimate Wise III"),
    ("ENCHANTMENT_ULTIMATE_WISE_4", "Ultimate Wise IV"),
    ("ENCHANTMENT_ULTIMATE_WISE_5", "Ultimate Wise V"),
    ("ENCHANTMENT_ULTIMATE_JERRY_1", "Ultimate Jerry I"),
    ("ENCHANTMENT_ULTIMATE_JERRY_2", "Ultimate Jerry II"),
    ("ENCHANTMENT_ULTIMATE_JERRY_3", "Ultimate Jerry III"),
    ("ENCHANTMENT_ULTIMATE_JERRY_4", "Ultimate Jerry IV"),
    ("ENCHANTMENT_ULTIMATE_JERRY_5", "Ultimate Jerry V"),
    ("ENCHANTMENT_TRIPLE_STRIKE_5", "Triple-Strike V"),
    ("ENCHANTMENT_SYPHON_4", "Drain IV"),
    ("ENCHANTMENT_SYPHON_5", "Drain V"),
    ("ENCHANTMENT_DRAGON_HUNTER_6", "Gravity VI"),
];

const GEMSTONE_SUFFIX: &str = "GEM";

lazy_static! {
    static ref OVERRIDES_BY_ID: HashMap<&'static str, &'static str> = NAME_OVERRIDES.iter().copied().collect();
    static ref ENDS_WITH_INTEGER: Regex = Regex::new("[0-9]+$").expect("trailing integer regex is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GemRarity {
    Rough,
    Flawed,
    Fine,
    Flawless,
    Perfect,
}

impl GemRarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            GemRarity::Rough => "Rough",
            GemRarity::Flawed => "Flawed",
            GemRarity::Fine => "Fine",
            GemRarity::Flawless => "Flawless",
            GemRarity::Perfect => "Perfect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GemType {
    Amber,
    Amethyst,
    Aquamarine,
    Citrine,
    Jade,
    Jasper,
    Onyx,
    Opal,
    Peridot,
    Ruby,
    Sapphire,
    Topaz,
}

impl GemType {
    pub fn symbol(&self) -> &'static str {
        match self {
            GemType::Amber => "⸕",
            GemType::Amethyst => "❈",
            GemType::Aquamarine => "☂",
            GemType::Citrine => "☘",
            GemType::Jade => "☘",
            GemType::Jasper => "❁",
            GemType::Onyx => "☠",
            GemType::Opal => "❂",
            GemType::Peridot => "☘",
            GemType::Ruby => "❤",
            GemType::Sapphire => "✎",
            GemType::Topaz => "✧",
        }
    }
}

/// Display name for an id without an authored name.
/// Tries the override table, then the gemstone pattern, then generic synthesis.
pub fn name_for(id: &ProductId) -> (String, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let name = override_name(id)
        .map(str::to_string)
        .or_else(|| gemstone_name(id, &mut diagnostics))
        .unwrap_or_else(|| synthesize_name(id, &mut diagnostics));

    (name, diagnostics)
}

pub fn override_name(id: &ProductId) -> Option<&'static str> {
    OVERRIDES_BY_ID.get(id.as_str()).copied()
}

/// Recognizes `<RARITY>_<GEM TYPE>_GEM`, e.g. `ROUGH_AMBER_GEM` -> `⸕ Rough Amber Gemstone`.
/// Unknown rarities or gem types are reported and yield `None`.
pub fn gemstone_name(id: &ProductId, diagnostics: &mut Vec<Diagnostic>) -> Option<String> {
    let parts: Vec<&str> = id.as_str().split('_').collect();
    let [rarity_part, type_part, suffix] = parts.as_slice() else {
        return None;
    };
    if *suffix != GEMSTONE_SUFFIX {
        return None;
    }

    let Ok(rarity) = GemRarity::from_str(rarity_part) else {
        diagnostics.push(Diagnostic::UnknownGemRarity {
            id: id.clone(),
            rarity: rarity_part.to_string(),
        });
        return None;
    };

    let Ok(gem_type) = GemType::from_str(type_part) else {
        diagnostics.push(Diagnostic::UnknownGemType {
            id: id.clone(),
            gem_type: type_part.to_string(),
        });
        return None;
    };

    Some(format!(
        "{} {} {} Gemstone",
        gem_type.symbol(),
        rarity.display_name(),
        screaming_snake_case_to_title_case(type_part)
    ))
}

pub fn synthesize_name(id: &ProductId, diagnostics: &mut Vec<Diagnostic>) -> String {
    // product ids carry no markup today, strip it anyway in case that changes
    let cleaned = normalize(id.as_str());
    let cleaned = cleaned.strip_prefix("ENCHANTMENT_").unwrap_or(&cleaned);
    let cleaned = cleaned.strip_prefix("ULTIMATE_").unwrap_or(cleaned).trim();

    let name = screaming_snake_case_to_title_case(cleaned);
    let name = romanize_trailing_integer(&name, diagnostics);

    let name = match name.strip_prefix("Shard ") {
        Some(rest) => format!("{rest} Shard"),
        None => name,
    };

    match name.trim() {
        "" => id.as_str().trim().to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// `HOLY_PROTECTION` -> `Holy Protection`
pub fn screaming_snake_case_to_title_case(input: &str) -> String {
    input
        .to_lowercase()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn roman_numeral(number: u64) -> Option<&'static str> {
    match number {
        1 => Some("I"),
        2 => Some("II"),
        3 => Some("III"),
        4 => Some("IV"),
        5 => Some("V"),
        6 => Some("VI"),
        7 => Some("VII"),
        8 => Some("VIII"),
        9 => Some("IX"),
        10 => Some("X"),
        20 => Some("XX"),
        _ => None,
    }
}

/// Replaces the trailing digit run with its roman numeral. Unmapped numbers stay as they are.
pub fn romanize_trailing_integer(name: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    let Some(digits) = ENDS_WITH_INTEGER.find(name) else {
        return name.to_string();
    };

    match digits.as_str().parse::<u64>().ok().and_then(roman_numeral) {
        Some(numeral) => format!("{}{numeral}", &name[..digits.start()]),
        None => {
            diagnostics.push(Diagnostic::NoRomanNumeral {
                name: name.to_string(),
                number: digits.as_str().to_string(),
            });
            name.to_string()
        }
    }
}
