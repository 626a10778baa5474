//! Integration tests for multi-turn context resolution
//!
//! These tests run complete turns against an in-memory store and an inline
//! domain configuration.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use chat_context_agent::{ContextResolver, TurnProcessor};
use chat_context_config::{DomainConfig, Settings};
use chat_context_core::{
    Classification, ContextRecord, ContextStore, Error, IntentClassifier, Result, SessionId,
};
use chat_context_persistence::{InMemoryContextStore, InMemoryMessageLog, MessageLog};

const DOMAIN: &str = r#"
domain_id: telecom
vocabulary:
  terms: [adsl, fibre, 4g, modem, internet, ceo]
  conversions:
    "Idoom Fibre": fibre
    ftth: fibre
  spelling_rules:
    - pattern: "\\bconexion\\b"
      replacement: "connexion"
intents:
  - name: offer
    keywords: [price, prix, offer, offre, "how much"]
  - name: billing
    keywords: [bill, facture]
  - name: ceo_query
    keywords: [ceo, president, director, pdg]
  - name: COMPARE_PLUS
    keywords: [fastest, "most expensive"]
  - name: COMPARE_MINUS
    keywords: [cheapest, "moins cher"]
responses:
  general_answers:
    adsl: "ADSL is available nationwide."
    fibre: "Fibre is available in major cities."
  prices:
    adsl:
      - { name: "ADSL 10 Mbps", price: 1600 }
      - { name: "ADSL 20 Mbps", price: 2200 }
    fibre:
      - { name: "Fibre 100 Mbps", price: 3500 }
      - { name: "Fibre 1 Gbps", price: 9000 }
  ceo:
    name: "Jane Doe"
    company: "Example Telecom"
"#;

fn domain() -> DomainConfig {
    DomainConfig::from_yaml_str(DOMAIN).unwrap()
}

fn processor_with(settings: &Settings, store: Arc<dyn ContextStore>) -> TurnProcessor {
    TurnProcessor::from_config(settings, &domain(), store).unwrap()
}

fn processor(store: Arc<dyn ContextStore>) -> TurnProcessor {
    processor_with(&Settings::default(), store)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Store wrapper counting reads per field
#[derive(Default)]
struct CountingStore {
    inner: InMemoryContextStore,
    intent_reads: AtomicUsize,
    entity_reads: AtomicUsize,
}

#[async_trait]
impl ContextStore for CountingStore {
    async fn save_intent(&self, session: &SessionId, intent: &str) -> Result<()> {
        self.inner.save_intent(session, intent).await
    }

    async fn save_entities(&self, session: &SessionId, entities: &[String]) -> Result<()> {
        self.inner.save_entities(session, entities).await
    }

    async fn get_last_intent(&self, session: &SessionId) -> Result<Option<String>> {
        self.intent_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_last_intent(session).await
    }

    async fn get_last_entities(&self, session: &SessionId) -> Result<Vec<String>> {
        self.entity_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_last_entities(session).await
    }

    async fn get_context(&self, session: &SessionId) -> Result<ContextRecord> {
        self.inner.get_context(session).await
    }

    async fn clear(&self, session: &SessionId) -> Result<()> {
        self.inner.clear(session).await
    }

    fn is_distributed(&self) -> bool {
        false
    }
}

/// Store whose every operation fails
struct UnavailableStore;

#[async_trait]
impl ContextStore for UnavailableStore {
    async fn save_intent(&self, _: &SessionId, _: &str) -> Result<()> {
        Err(Error::StoreUnavailable("connection refused".into()))
    }

    async fn save_entities(&self, _: &SessionId, _: &[String]) -> Result<()> {
        Err(Error::StoreUnavailable("connection refused".into()))
    }

    async fn get_last_intent(&self, _: &SessionId) -> Result<Option<String>> {
        Err(Error::StoreUnavailable("connection refused".into()))
    }

    async fn get_last_entities(&self, _: &SessionId) -> Result<Vec<String>> {
        Err(Error::StoreUnavailable("connection refused".into()))
    }

    async fn get_context(&self, _: &SessionId) -> Result<ContextRecord> {
        Err(Error::StoreUnavailable("connection refused".into()))
    }

    async fn clear(&self, _: &SessionId) -> Result<()> {
        Err(Error::StoreUnavailable("connection refused".into()))
    }

    fn is_distributed(&self) -> bool {
        true
    }
}

/// Classifier that always fails
struct BrokenClassifier;

#[async_trait]
impl IntentClassifier for BrokenClassifier {
    async fn classify(&self, _: &str) -> Result<Classification> {
        Err(Error::Classifier("model not loaded".into()))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[tokio::test]
async fn test_saved_context_round_trip() {
    let resolver = ContextResolver::new(Arc::new(InMemoryContextStore::new()));
    let session = SessionId::from("s1");

    resolver
        .save_context(&session, "offer", &strings(&["internet", "adsl"]))
        .await
        .unwrap();
    let resolved = resolver
        .retrieve_context_if_missing(&session, None::<&str>, &[])
        .await
        .unwrap();

    assert_eq!(resolved.entities, strings(&["internet", "adsl"]));
    assert_eq!(resolved.intent.as_deref(), Some("offer"));
}

#[tokio::test]
async fn test_empty_save_is_noop() {
    let store = Arc::new(InMemoryContextStore::new());
    let resolver = ContextResolver::new(store.clone());
    let session = SessionId::from("s1");

    resolver
        .save_context(&session, "offer", &strings(&["internet", "adsl"]))
        .await
        .unwrap();
    resolver
        .save_context(&session, None::<&str>, &[])
        .await
        .unwrap();

    let record = store.get_context(&session).await.unwrap();
    assert_eq!(record.intent.as_deref(), Some("offer"));
    assert_eq!(record.entities, strings(&["internet", "adsl"]));
}

#[tokio::test]
async fn test_sequential_saves_replace() {
    let store = Arc::new(InMemoryContextStore::new());
    let resolver = ContextResolver::new(store.clone());
    let session = SessionId::from("s1");

    resolver
        .save_context(&session, "offer", &strings(&["internet", "adsl"]))
        .await
        .unwrap();
    resolver
        .save_context(&session, "billing", &strings(&["fibre"]))
        .await
        .unwrap();

    let record = store.get_context(&session).await.unwrap();
    assert_eq!(record.intent.as_deref(), Some("billing"));
    assert_eq!(record.entities, strings(&["fibre"]));
}

#[tokio::test]
async fn test_store_not_read_for_present_fields() {
    let store = Arc::new(CountingStore::default());
    let resolver = ContextResolver::new(store.clone());
    let session = SessionId::from("s1");

    resolver
        .retrieve_context_if_missing(&session, "offer", &strings(&["adsl"]))
        .await
        .unwrap();
    assert_eq!(store.intent_reads.load(Ordering::SeqCst), 0);
    assert_eq!(store.entity_reads.load(Ordering::SeqCst), 0);

    resolver
        .retrieve_context_if_missing(&session, None::<&str>, &strings(&["adsl"]))
        .await
        .unwrap();
    assert_eq!(store.intent_reads.load(Ordering::SeqCst), 1);
    assert_eq!(store.entity_reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_follow_up_inherits_entities() {
    let processor = processor(Arc::new(InMemoryContextStore::new()));
    let session = SessionId::from("s1");

    let first = processor
        .process(&session, "How much is the ADSL offer?")
        .await
        .unwrap();
    assert_eq!(first.resolved.intent.as_deref(), Some("offer"));
    assert_eq!(first.resolved.entities, strings(&["adsl"]));
    assert_eq!(
        first.response.as_deref(),
        Some("ADSL is available nationwide.")
    );

    let second = processor
        .process(&session, "And the cheapest one?")
        .await
        .unwrap();
    assert!(second.entities.is_empty());
    assert!(second.resolved.entities_from_context);
    assert!(!second.resolved.intent_from_context);
    assert_eq!(second.resolved.entities, strings(&["adsl"]));
    assert_eq!(
        second.response.as_deref(),
        Some("- The lowest offer for adsl is ADSL 10 Mbps at 1600 DA.\n")
    );
}

#[tokio::test]
async fn test_entity_mentions_canonicalized() {
    let processor = processor(Arc::new(InMemoryContextStore::new()));
    let session = SessionId::from("s1");

    let outcome = processor
        .process(&session, "Prix Idoom Fibre")
        .await
        .unwrap();
    assert_eq!(outcome.classification.entities, strings(&["idoom fibre"]));
    assert_eq!(outcome.entities, strings(&["fibre"]));
    assert_eq!(outcome.correction.text, "prix fibre");
    assert_eq!(
        outcome.response.as_deref(),
        Some("Fibre is available in major cities.")
    );
}

#[tokio::test]
async fn test_typo_corrected_against_vocabulary() {
    let processor = processor(Arc::new(InMemoryContextStore::new()));
    let session = SessionId::from("s1");

    let outcome = processor
        .process(&session, "price of the fibr offer")
        .await
        .unwrap();
    assert_eq!(outcome.correction.text, "price of the fibre offer");
    assert_eq!(outcome.correction.corrections.len(), 1);
    assert!(outcome.correction.confidence < 100);
}

#[tokio::test]
async fn test_misspelled_entity_recognized_in_current_turn() {
    let processor = processor(Arc::new(InMemoryContextStore::new()));
    let session = SessionId::from("s1");

    processor.process(&session, "price of fibre").await.unwrap();
    let outcome = processor
        .process(&session, "price of the adssl offer")
        .await
        .unwrap();

    assert_eq!(outcome.correction.text, "price of the adsl offer");
    assert_eq!(outcome.entities, strings(&["adsl"]));
    assert_eq!(outcome.resolved.entities, strings(&["adsl"]));
    assert!(!outcome.resolved.entities_from_context);
    assert_eq!(outcome.resolved.intent.as_deref(), Some("offer"));
    assert_eq!(
        outcome.response.as_deref(),
        Some("ADSL is available nationwide.")
    );
}

#[tokio::test]
async fn test_low_confidence_correction_discarded() {
    let mut settings = Settings::default();
    settings.correction.min_confidence = Some(99);
    let processor = processor_with(&settings, Arc::new(InMemoryContextStore::new()));
    let session = SessionId::from("s1");

    let outcome = processor
        .process(&session, "price of the fibr offer")
        .await
        .unwrap();
    assert_eq!(outcome.correction.text, "price of the fibr offer");
    assert!(!outcome.correction.is_modified());
    assert!(outcome.entities.is_empty());
}

#[tokio::test]
async fn test_ceo_question() {
    let processor = processor(Arc::new(InMemoryContextStore::new()));
    let session = SessionId::from("s1");

    let outcome = processor
        .process(&session, "Who is the CEO?")
        .await
        .unwrap();
    assert_eq!(
        outcome.response.as_deref(),
        Some("The current CEO of Example Telecom is Jane Doe.")
    );
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let processor = processor(Arc::new(InMemoryContextStore::new()));
    let a = SessionId::from("a");
    let b = SessionId::from("b");

    processor.process(&a, "price of adsl").await.unwrap();
    let outcome = processor.process(&b, "the cheapest one").await.unwrap();

    assert!(outcome.resolved.entities.is_empty());
    assert_eq!(outcome.response, None);
}

#[tokio::test]
async fn test_store_failure_does_not_abort_turn() {
    let processor = processor(Arc::new(UnavailableStore));
    let session = SessionId::from("s1");

    let outcome = processor.process(&session, "price of adsl").await.unwrap();
    assert!(outcome.is_degraded());
    assert_eq!(outcome.resolved.entities, strings(&["adsl"]));
    assert_eq!(
        outcome.response.as_deref(),
        Some("ADSL is available nationwide.")
    );
}

#[tokio::test]
async fn test_messages_logged() {
    let log = Arc::new(InMemoryMessageLog::new());
    let processor =
        processor(Arc::new(InMemoryContextStore::new())).with_message_log(log.clone());
    let session = SessionId::from("s1");

    processor.process(&session, "price of adsl").await.unwrap();
    processor.process(&session, "and fibre?").await.unwrap();

    let messages = log.recent(&session, 10).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].raw_text, "price of adsl");
    assert_eq!(messages[1].entities, strings(&["fibre"]));
    assert_eq!(messages[1].intent.as_deref(), Some("offer"));
}

#[tokio::test]
async fn test_reset_clears_context() {
    let store = Arc::new(InMemoryContextStore::new());
    let processor = processor(store.clone());
    let session = SessionId::from("s1");

    processor.process(&session, "price of adsl").await.unwrap();
    store.clear(&session).await.unwrap();
    let outcome = processor.process(&session, "the cheapest one").await.unwrap();
    assert!(outcome.resolved.entities.is_empty());
}

#[tokio::test]
async fn test_classifier_failure_aborts_turn() {
    let store = Arc::new(InMemoryContextStore::new());
    let processor = processor(store.clone()).with_classifier(Arc::new(BrokenClassifier));
    let session = SessionId::from("s1");

    let err = processor.process(&session, "price of adsl").await.unwrap_err();
    assert!(matches!(err, Error::Classifier(_)));

    let record = store.get_context(&session).await.unwrap();
    assert_eq!(record.intent, None);
    assert!(record.entities.is_empty());
}
