//! Response fragments: general answers, price lists, comparison labels, CEO answer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One priced offer of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    pub price: f64,
}

/// Labels selecting the comparison direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Label asking for the most expensive offer
    #[serde(default = "default_plus_label")]
    pub plus_label: String,
    /// Label asking for the cheapest offer
    #[serde(default = "default_minus_label")]
    pub minus_label: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_plus_label() -> String {
    "COMPARE_PLUS".to_string()
}

fn default_minus_label() -> String {
    "COMPARE_MINUS".to_string()
}

fn default_currency() -> String {
    "DA".to_string()
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            plus_label: default_plus_label(),
            minus_label: default_minus_label(),
            currency: default_currency(),
        }
    }
}

impl ComparisonConfig {
    pub fn is_comparison(&self, labels: &[String]) -> bool {
        labels
            .iter()
            .any(|l| *l == self.plus_label || *l == self.minus_label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CeoConfig {
    pub name: String,
    pub company: String,
    /// Entities that make a question CEO related (case-insensitive)
    #[serde(default = "default_ceo_entities")]
    pub entities: Vec<String>,
    #[serde(default = "default_ceo_label")]
    pub label: String,
}

fn default_ceo_entities() -> Vec<String> {
    vec![
        "ceo".to_string(),
        "president".to_string(),
        "director".to_string(),
    ]
}

fn default_ceo_label() -> String {
    "ceo_query".to_string()
}

impl Default for CeoConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            company: String::new(),
            entities: default_ceo_entities(),
            label: default_ceo_label(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponsesConfig {
    /// Canonical entity -> answer fragment
    #[serde(default)]
    pub general_answers: HashMap<String, String>,
    /// Canonical entity -> offers sorted by ascending price
    #[serde(default)]
    pub prices: HashMap<String, Vec<Offer>>,
    #[serde(default)]
    pub comparison: ComparisonConfig,
    #[serde(default)]
    pub ceo: CeoConfig,
}
