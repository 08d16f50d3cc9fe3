//! Title classification.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use stockwise_core::ValueObject;
use stockwise_products::TagSet;

use crate::rules::{ClassificationRule, RuleTable, OTHER};

/// Suggested product type and tags for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub product_type: String,
    pub tags: TagSet,
}

impl ValueObject for ClassificationResult {}

/// Which keywords fired for a title (operator-facing explanation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// Keyword of the winning product-type rule, if any.
    pub rule_keyword: Option<String>,
    /// Keywords of every matching scent rule, in table order.
    pub scent_keywords: Vec<String>,
}

/// Longest-keyword-match classifier over a [`RuleTable`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: RuleTable,
}

impl Classifier {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Classify `title`, keeping every tag in `existing_tags`.
    ///
    /// Total over all inputs. Blank titles yield `OTHER` and the existing tags.
    pub fn classify(&self, title: &str, existing_tags: &TagSet) -> ClassificationResult {
        let title = title.trim().to_lowercase();
        if title.is_empty() {
            return ClassificationResult {
                product_type: OTHER.to_string(),
                tags: existing_tags.clone(),
            };
        }

        let mut tags = existing_tags.clone();
        let product_type = match self.winning_rule(&title) {
            Some(rule) => {
                tags.extend(&rule.tags);
                rule.product_type.clone()
            }
            None => OTHER.to_string(),
        };

        tags.extend(
            self.table
                .scents()
                .iter()
                .filter(|s| title.contains(&s.keyword))
                .map(|s| s.tag.as_str()),
        );

        ClassificationResult { product_type, tags }
    }

    /// Report which rules fire for `title` without building a result.
    pub fn explain(&self, title: &str) -> Explanation {
        let title = title.trim().to_lowercase();
        if title.is_empty() {
            return Explanation {
                rule_keyword: None,
                scent_keywords: Vec::new(),
            };
        }

        Explanation {
            rule_keyword: self.winning_rule(&title).map(|r| r.keyword.clone()),
            scent_keywords: self
                .table
                .scents()
                .iter()
                .filter(|s| title.contains(&s.keyword))
                .map(|s| s.keyword.clone())
                .collect(),
        }
    }

    // `title` must already be lowercased.
    fn winning_rule(&self, title: &str) -> Option<&ClassificationRule> {
        self.table.rules().iter().find(|r| title.contains(&r.keyword))
    }
}

/// Classify with the built-in rule table.
pub fn classify(title: &str, existing_tags: &TagSet) -> ClassificationResult {
    static BUILTIN: OnceLock<Classifier> = OnceLock::new();
    BUILTIN
        .get_or_init(Classifier::default)
        .classify(title, existing_tags)
}
