//! Turn processing
//!
//! One user message flows through: normalization and the spelling rule
//! table, classification, entity canonicalization, fuzzy correction,
//! context fallback, context save, message logging and response rendering.
//! When the corrector rewrites the text, the corrected text is classified
//! again so misspelled vocabulary entities are still recognized.
//! Store failures are collected in the outcome and never abort a turn.

use std::sync::Arc;

use serde::Serialize;

use chat_context_config::{DomainConfig, Settings};
use chat_context_core::{
    Classification, ContextStore, CorrectionResult, IntentClassifier, ResolvedContext, Result,
    SessionId, Utterance,
};
use chat_context_persistence::{ConversationMessage, MessageLog};
use chat_context_text_processing::{
    normalize, EntityCanonicalizer, FuzzyCorrector, FuzzyCorrectorConfig, KeywordClassifier,
    RuleBasedTagger, SpellingRules,
};

use crate::context::ContextResolver;
use crate::responses::ResponseBuilder;

/// Everything produced while processing one message
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub session_id: SessionId,
    pub utterance: Utterance,
    pub classification: Classification,
    /// Classifier entities in canonical form
    pub entities: Vec<String>,
    pub correction: CorrectionResult,
    pub resolved: ResolvedContext,
    pub response: Option<String>,
    /// Store operations that failed during the turn
    pub store_errors: Vec<String>,
}

impl TurnOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.store_errors.is_empty()
    }
}

/// Runs complete turns against one domain configuration
pub struct TurnProcessor {
    spelling_rules: SpellingRules,
    canonicalizer: EntityCanonicalizer,
    corrector: FuzzyCorrector,
    classifier: Arc<dyn IntentClassifier>,
    resolver: ContextResolver,
    responses: ResponseBuilder,
    message_log: Option<Arc<dyn MessageLog>>,
    min_confidence: Option<u8>,
}

impl TurnProcessor {
    /// Build the pipeline from validated settings and domain tables
    ///
    /// Uses the keyword classifier over the configured intents; replace it
    /// with [`TurnProcessor::with_classifier`].
    pub fn from_config(
        settings: &Settings,
        domain: &DomainConfig,
        store: Arc<dyn ContextStore>,
    ) -> Result<Self> {
        let vocabulary = &domain.vocabulary;

        let spelling_rules = SpellingRules::new(
            vocabulary
                .spelling_rules
                .iter()
                .map(|r| (r.pattern.as_str(), r.replacement.clone())),
        )?;

        let tagger = RuleBasedTagger::with_extra_words(&vocabulary.stopwords, &vocabulary.verbs);
        let corrector = FuzzyCorrector::new(
            vocabulary.unique_terms(),
            Arc::new(tagger),
            FuzzyCorrectorConfig {
                threshold: settings.correction.threshold,
            },
        );

        let mut entity_terms = vocabulary.unique_terms();
        entity_terms.extend(vocabulary.conversions.keys().cloned());
        let classifier = KeywordClassifier::new(
            domain
                .intents
                .iter()
                .map(|i| (i.name.clone(), i.keywords.clone()))
                .collect(),
            entity_terms,
        );

        tracing::info!(
            domain = %domain.domain_id,
            spelling_rules = spelling_rules.len(),
            vocabulary = corrector.vocabulary().len(),
            threshold = corrector.threshold(),
            min_confidence = ?settings.correction.min_confidence,
            distributed = store.is_distributed(),
            "Turn processor ready"
        );

        Ok(Self {
            spelling_rules,
            canonicalizer: EntityCanonicalizer::new(vocabulary.normalized_conversions()),
            corrector,
            classifier: Arc::new(classifier),
            resolver: ContextResolver::new(store),
            responses: ResponseBuilder::new(domain.responses.clone()),
            message_log: None,
            min_confidence: settings.correction.min_confidence,
        })
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_message_log(mut self, log: Arc<dyn MessageLog>) -> Self {
        self.message_log = Some(log);
        self
    }

    pub fn resolver(&self) -> &ContextResolver {
        &self.resolver
    }

    pub fn responses(&self) -> &ResponseBuilder {
        &self.responses
    }

    /// Normalize raw text and apply the spelling rule table
    pub fn prepare(&self, raw: &str) -> Utterance {
        let normalized = self.spelling_rules.apply(&normalize(raw));
        Utterance::new(raw, normalized)
    }

    /// Process one user message
    ///
    /// Only a classifier failure is returned as an error.
    pub async fn process(&self, session: &SessionId, raw: &str) -> Result<TurnOutcome> {
        let utterance = self.prepare(raw);

        let mut classification = self.classify(&utterance.normalized).await?;
        let text = self
            .canonicalizer
            .correct_entities(&utterance.normalized, &classification.entities);

        let correction = self.correct(&text);
        if correction.is_modified() {
            classification = self.classify(&correction.text).await?;
        }
        let entities = self.canonicalizer.canonicalize(&classification.entities);

        let mut store_errors = Vec::new();

        let resolved = match self
            .resolver
            .retrieve_context_if_missing(session, classification.intents.clone(), &entities)
            .await
        {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(session_id = %session, error = %e, "Context lookup failed, using current turn only");
                store_errors.push(e.to_string());
                ResolvedContext::current(classification.primary_intent(), &entities)
            }
        };

        if let Err(e) = self
            .resolver
            .save_context(session, classification.intents.clone(), &entities)
            .await
        {
            store_errors.push(e.to_string());
        }

        if let Some(log) = &self.message_log {
            let message = ConversationMessage::from_turn(session, &utterance, &correction, &resolved);
            if let Err(e) = log.append(&message).await {
                tracing::warn!(session_id = %session, error = %e, "Failed to log message");
                store_errors.push(e.to_string());
            }
        }

        let response = self.responses.respond(&resolved, classification.labels());

        tracing::info!(
            session_id = %session,
            intent = ?resolved.intent,
            entities = ?resolved.entities,
            confidence = correction.confidence,
            corrections = correction.corrections.len(),
            fallback = resolved.used_fallback(),
            answered = response.is_some(),
            "Turn processed"
        );

        Ok(TurnOutcome {
            session_id: session.clone(),
            utterance,
            classification,
            entities,
            correction,
            resolved,
            response,
            store_errors,
        })
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let classification = self.classifier.classify(text).await?;
        tracing::debug!(
            classifier = self.classifier.name(),
            text,
            intents = ?classification.labels(),
            entities = ?classification.entities,
            "Classified"
        );
        Ok(classification)
    }

    /// Fuzzy correction, discarded when below the optional confidence floor
    fn correct(&self, text: &str) -> CorrectionResult {
        let correction = self.corrector.correct_spelling(text);
        match self.min_confidence {
            Some(min) if correction.is_modified() && correction.confidence < min => {
                tracing::debug!(
                    confidence = correction.confidence,
                    min_confidence = min,
                    "Correction below confidence floor, keeping original text"
                );
                CorrectionResult::unchanged(text)
            }
            _ => correction,
        }
    }
}
