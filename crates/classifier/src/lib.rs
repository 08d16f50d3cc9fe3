//! `stockwise-classifier`
//!
//! **Responsibility:** infer a product type and tags from a product title.
//!
//! The classifier is a deterministic longest-keyword-match over a rule table:
//! - It never does IO and never mutates products.
//! - It only ever adds tags; existing tags are always kept.
//! - Its output is a fixed point: classifying again with the produced tags
//!   yields the same result.

pub mod classify;
pub mod rules;

pub use classify::{classify, ClassificationResult, Classifier, Explanation};
pub use rules::{ClassificationRule, RuleTable, ScentRule, OTHER};
