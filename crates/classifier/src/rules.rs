//! Keyword rule tables.

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use stockwise_core::{DomainError, DomainResult};
use stockwise_products::TagSet;

/// Product type assigned when no rule matches (and for blank titles).
pub const OTHER: &str = "OTHER";

/// Keyword -> product type (+ tags). At most one wins per title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub keyword: String,
    pub product_type: String,
    pub tags: TagSet,
}

impl ClassificationRule {
    pub fn new(keyword: impl Into<String>, product_type: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            keyword: keyword.into(),
            product_type: product_type.into(),
            tags: tags.iter().collect(),
        }
    }
}

/// Keyword -> single tag. Every matching scent rule applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScentRule {
    pub keyword: String,
    pub tag: String,
}

impl ScentRule {
    pub fn new(keyword: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            tag: tag.into(),
        }
    }
}

/// Validated, normalized rule table.
///
/// Keywords are stored lowercase. Product-type rules are kept sorted by
/// keyword length (longest first), ties by keyword, so the first match while
/// scanning is the longest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<ClassificationRule>,
    scents: Vec<ScentRule>,
}

impl RuleTable {
    /// Build a custom table.
    ///
    /// Rejects empty keywords, empty product types or scent tags, and duplicate
    /// keywords within the same list.
    pub fn new(rules: Vec<ClassificationRule>, scents: Vec<ScentRule>) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            let keyword = normalize_keyword(&rule.keyword)?;
            if rule.product_type.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "rule '{keyword}' has an empty product type"
                )));
            }
            if !seen.insert(keyword.clone()) {
                return Err(DomainError::conflict(format!("duplicate rule keyword '{keyword}'")));
            }
        }

        seen.clear();
        for scent in &scents {
            let keyword = normalize_keyword(&scent.keyword)?;
            if TagSet::normalize(&scent.tag).is_none() {
                return Err(DomainError::validation(format!(
                    "scent rule '{keyword}' has an empty tag"
                )));
            }
            if !seen.insert(keyword.clone()) {
                return Err(DomainError::conflict(format!("duplicate scent keyword '{keyword}'")));
            }
        }

        Ok(Self::build(rules, scents))
    }

    /// Product-type rules in match order (longest keyword first).
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn scents(&self) -> &[ScentRule] {
        &self.scents
    }

    fn build(rules: Vec<ClassificationRule>, scents: Vec<ScentRule>) -> Self {
        let mut rules: Vec<ClassificationRule> = rules
            .into_iter()
            .map(|r| ClassificationRule {
                keyword: r.keyword.trim().to_lowercase(),
                product_type: r.product_type.trim().to_string(),
                tags: r.tags,
            })
            .collect();
        rules.sort_by(|a, b| {
            (Reverse(a.keyword.chars().count()), &a.keyword)
                .cmp(&(Reverse(b.keyword.chars().count()), &b.keyword))
        });

        let scents = scents
            .into_iter()
            .map(|s| ScentRule {
                keyword: s.keyword.trim().to_lowercase(),
                tag: s.tag.trim().to_lowercase(),
            })
            .collect();

        Self { rules, scents }
    }
}

impl Default for RuleTable {
    /// The built-in candle & home-fragrance table.
    fn default() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(keyword, product_type, tags)| {
                ClassificationRule::new(*keyword, *product_type, tags)
            })
            .collect();
        let scents = BUILTIN_SCENTS
            .iter()
            .map(|(keyword, tag)| ScentRule::new(*keyword, *tag))
            .collect();
        Self::build(rules, scents)
    }
}

fn normalize_keyword(keyword: &str) -> DomainResult<String> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Err(DomainError::validation("rule keyword cannot be empty"));
    }
    Ok(keyword)
}

const BUILTIN_RULES: &[(&str, &str, &[&str])] = &[
    ("candle", "CANDLE", &["candle"]),
    ("soy candle", "SOY_CANDLE", &["candle", "soy-wax"]),
    ("beeswax candle", "BEESWAX_CANDLE", &["candle", "beeswax"]),
    ("coconut wax candle", "COCONUT_CANDLE", &["candle", "coconut-wax"]),
    ("pillar candle", "PILLAR_CANDLE", &["candle", "pillar"]),
    ("taper candle", "TAPER_CANDLE", &["candle", "taper"]),
    ("tealight", "TEALIGHT", &["candle", "tealight"]),
    ("tea light", "TEALIGHT", &["candle", "tealight"]),
    ("votive", "VOTIVE", &["candle", "votive"]),
    ("wax melt", "WAX_MELT", &["wax-melt"]),
    ("wax tart", "WAX_MELT", &["wax-melt"]),
    ("reed diffuser", "DIFFUSER", &["diffuser", "home-fragrance"]),
    ("diffuser", "DIFFUSER", &["diffuser"]),
    ("room spray", "ROOM_SPRAY", &["home-fragrance", "spray"]),
    ("linen spray", "ROOM_SPRAY", &["home-fragrance", "spray"]),
    ("incense", "INCENSE", &["incense"]),
    ("gift set", "GIFT_SET", &["gift"]),
    ("gift box", "GIFT_SET", &["gift"]),
    ("candle holder", "ACCESSORY", &["accessory", "candle-holder"]),
    ("wick trimmer", "ACCESSORY", &["accessory"]),
    ("snuffer", "ACCESSORY", &["accessory"]),
    ("matches", "ACCESSORY", &["accessory"]),
];

const BUILTIN_SCENTS: &[(&str, &str)] = &[
    ("lavender", "floral"),
    ("rose", "floral"),
    ("jasmine", "floral"),
    ("peony", "floral"),
    ("gardenia", "floral"),
    ("vanilla", "sweet"),
    ("caramel", "sweet"),
    ("honey", "sweet"),
    ("cinnamon", "spicy"),
    ("clove", "spicy"),
    ("pumpkin", "spicy"),
    ("sandalwood", "woody"),
    ("cedar", "woody"),
    ("pine", "woody"),
    ("oud", "woody"),
    ("lemon", "citrus"),
    ("orange", "citrus"),
    ("grapefruit", "citrus"),
    ("bergamot", "citrus"),
    ("sea salt", "fresh"),
    ("ocean", "fresh"),
    ("linen", "fresh"),
    ("eucalyptus", "herbal"),
    ("mint", "herbal"),
    ("sage", "herbal"),
    ("coffee", "gourmand"),
    ("cocoa", "gourmand"),
];
