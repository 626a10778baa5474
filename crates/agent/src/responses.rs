//! Response rendering from configured answer fragments

use std::collections::HashSet;

use chat_context_config::ResponsesConfig;
use chat_context_core::ResolvedContext;

/// Builds answers from the domain's static response tables
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    config: ResponsesConfig,
    ceo_entities: HashSet<String>,
}

impl ResponseBuilder {
    pub fn new(config: ResponsesConfig) -> Self {
        let ceo_entities = config
            .ceo
            .entities
            .iter()
            .map(|e| e.to_lowercase())
            .collect();
        Self {
            config,
            ceo_entities,
        }
    }

    /// Concatenated general answer of each entity; unknown entities add nothing
    pub fn general_message(&self, entities: &[String]) -> String {
        entities
            .iter()
            .filter_map(|e| self.config.general_answers.get(e))
            .map(String::as_str)
            .collect()
    }

    /// One line per priced entity naming its cheapest offer, or the most
    /// expensive one when the "compare plus" label is present
    pub fn comparison_message(&self, entities: &[String], labels: &[String]) -> String {
        let comparison = &self.config.comparison;
        let highest = labels.iter().any(|l| *l == comparison.plus_label);
        let direction = if highest { "highest" } else { "lowest" };

        let mut message = String::new();
        for entity in entities {
            let Some(offers) = self.config.prices.get(entity) else {
                continue;
            };
            let offer = if highest { offers.last() } else { offers.first() };
            if let Some(offer) = offer {
                message.push_str(&format!(
                    "- The {} offer for {} is {} at {} {}.\n",
                    direction, entity, offer.name, offer.price, comparison.currency
                ));
            }
        }
        message
    }

    /// Whether the question is about the company's CEO
    pub fn detect_ceo_intent(&self, entities: &[String], labels: &[String]) -> bool {
        entities
            .iter()
            .any(|e| self.ceo_entities.contains(&e.to_lowercase()))
            || labels.iter().any(|l| *l == self.config.ceo.label)
    }

    pub fn ceo_response(&self) -> String {
        format!(
            "The current CEO of {} is {}.",
            self.config.ceo.company, self.config.ceo.name
        )
    }

    /// Answer for a resolved turn
    ///
    /// `labels` are the classifier labels of the turn; the resolved intent
    /// counts as a label too, so a follow-up inherits a comparison or CEO
    /// question from context. Returns `None` when nothing applies.
    pub fn respond(&self, resolved: &ResolvedContext, labels: &[String]) -> Option<String> {
        let mut all_labels = labels.to_vec();
        if let Some(intent) = &resolved.intent {
            if !all_labels.contains(intent) {
                all_labels.push(intent.clone());
            }
        }

        let message = if self.detect_ceo_intent(&resolved.entities, &all_labels) {
            self.ceo_response()
        } else if self.config.comparison.is_comparison(&all_labels) {
            self.comparison_message(&resolved.entities, &all_labels)
        } else {
            self.general_message(&resolved.entities)
        };

        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_context_config::{CeoConfig, Offer};

    fn builder() -> ResponseBuilder {
        let mut config = ResponsesConfig::default();
        config
            .general_answers
            .insert("adsl".into(), "ADSL is available. ".into());
        config
            .general_answers
            .insert("fibre".into(), "Fibre is in major cities.".into());
        config.prices.insert(
            "adsl".into(),
            vec![
                Offer { name: "ADSL 10".into(), price: 1600.0 },
                Offer { name: "ADSL 20".into(), price: 2200.0 },
            ],
        );
        config.ceo = CeoConfig {
            name: "Jane Doe".into(),
            company: "Example Telecom".into(),
            ..Default::default()
        };
        ResponseBuilder::new(config)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_general_message_concatenates() {
        let b = builder();
        assert_eq!(
            b.general_message(&strings(&["adsl", "modem", "fibre"])),
            "ADSL is available. Fibre is in major cities."
        );
        assert_eq!(b.general_message(&[]), "");
    }

    #[test]
    fn test_comparison_direction() {
        let b = builder();
        let entities = strings(&["adsl", "fibre"]);
        assert_eq!(
            b.comparison_message(&entities, &strings(&["COMPARE_MINUS"])),
            "- The lowest offer for adsl is ADSL 10 at 1600 DA.\n"
        );
        assert_eq!(
            b.comparison_message(&entities, &strings(&["COMPARE_PLUS"])),
            "- The highest offer for adsl is ADSL 20 at 2200 DA.\n"
        );
    }

    #[test]
    fn test_ceo_detection() {
        let b = builder();
        assert!(b.detect_ceo_intent(&strings(&["President"]), &[]));
        assert!(b.detect_ceo_intent(&strings(&["DIRECTOR"]), &[]));
        assert!(b.detect_ceo_intent(&[], &strings(&["ceo_query"])));
        assert!(!b.detect_ceo_intent(&strings(&["adsl"]), &strings(&["offer"])));
        assert_eq!(
            b.ceo_response(),
            "The current CEO of Example Telecom is Jane Doe."
        );
    }

    #[test]
    fn test_respond_priority() {
        let b = builder();
        let resolved = ResolvedContext::current(Some("offer"), &strings(&["ceo", "adsl"]));
        assert_eq!(b.respond(&resolved, &[]), Some(b.ceo_response()));

        let resolved = ResolvedContext::current(Some("COMPARE_PLUS"), &strings(&["adsl"]));
        assert!(b.respond(&resolved, &[]).unwrap().contains("highest"));

        let resolved = ResolvedContext::current(Some("offer"), &strings(&["adsl"]));
        assert_eq!(
            b.respond(&resolved, &strings(&["offer"])).as_deref(),
            Some("ADSL is available. ")
        );

        let resolved = ResolvedContext::current(None, &strings(&["modem"]));
        assert_eq!(b.respond(&resolved, &[]), None);
    }
}
