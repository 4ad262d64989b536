//! Message translation pipeline: raw chat text in, reply text out.
//!
//! Order of decisions for one message:
//! 1. trim; empty text gets an empty reply
//! 2. phrase shortcuts answer greetings without touching the network
//! 3. script detection fixes the target language
//! 4. Roman-Bangla is transliterated to Bengali script (best effort)
//! 5. the provider chain translates
//! 6. English output is normalized against the user's original text
//!
//! The pipeline holds no mutable state and can be shared across tasks.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::detect::{self, ScriptClassification, TranslationTarget};
use crate::error::{Result, TranslationError, TranslationResult};
use crate::normalize;
use crate::shortcut;
use crate::translate::{ProviderChain, ProviderFactory};
use crate::transliterate::{GoogleInputToolsTransliterator, Transliterator};

/// Reply sent when no provider produced a usable translation
pub const FAILURE_MESSAGE: &str = "Translation failed. Please try again.";

/// Where a reply came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    Empty,
    Shortcut,
    Provider(String),
    Failure,
}

/// A reply together with the decisions that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReply {
    pub text: String,
    pub source: ReplySource,
    pub classification: Option<ScriptClassification>,
    pub target: Option<TranslationTarget>,
    pub transliterated: Option<String>,
}

impl PipelineReply {
    fn empty() -> Self {
        Self {
            text: String::new(),
            source: ReplySource::Empty,
            classification: None,
            target: None,
            transliterated: None,
        }
    }

    fn shortcut(text: &str) -> Self {
        Self {
            text: text.to_string(),
            source: ReplySource::Shortcut,
            ..Self::empty()
        }
    }
}

struct TransliterationStep {
    transliterator: Arc<dyn Transliterator>,
    timeout: Duration,
}

pub struct TranslationPipeline {
    chain: ProviderChain,
    transliteration: Option<TransliterationStep>,
}

impl TranslationPipeline {
    /// Pipeline without a transliteration step
    pub fn new(chain: ProviderChain) -> Self {
        Self {
            chain,
            transliteration: None,
        }
    }

    pub fn with_transliterator(mut self, transliterator: Arc<dyn Transliterator>, timeout: Duration) -> Self {
        self.transliteration = Some(TransliterationStep {
            transliterator,
            timeout,
        });
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let chain = ProviderFactory::create_chain(&config.translate)?;
        let pipeline = Self::new(chain);

        if !config.transliteration.enabled {
            info!("Roman-Bangla transliteration disabled");
            return Ok(pipeline);
        }

        let transliterator = GoogleInputToolsTransliterator::new(&config.transliteration)?;
        Ok(pipeline.with_transliterator(Arc::new(transliterator), config.transliteration.timeout()))
    }

    /// Worst-case time spent on network calls for one message
    pub fn max_latency(&self) -> Duration {
        let transliteration = self
            .transliteration
            .as_ref()
            .map(|step| step.timeout)
            .unwrap_or_default();
        self.chain.max_latency() + transliteration
    }

    /// Reply text for one message. Never fails; provider errors become [`FAILURE_MESSAGE`].
    pub async fn reply_for(&self, utterance: &str) -> String {
        self.process(utterance).await.text
    }

    /// Same as [`reply_for`](Self::reply_for) but keeps the intermediate decisions
    pub async fn process(&self, utterance: &str) -> PipelineReply {
        let text = utterance.trim();
        if text.is_empty() {
            return PipelineReply::empty();
        }

        if let Some(canned) = shortcut::lookup(text) {
            info!("Phrase shortcut hit");
            return PipelineReply::shortcut(canned);
        }

        let classification = detect::classify(text);
        let target = detect::select_target(classification);
        info!("Classified message as {:?}, translating to {}", classification, target);
        debug!("Message text: {}", text);

        let transliterated = match classification {
            ScriptClassification::RomanBanglaLike => self.transliterate(text).await,
            _ => None,
        };
        let provider_input = transliterated.as_deref().unwrap_or(text);

        let mut reply = PipelineReply {
            text: String::new(),
            source: ReplySource::Failure,
            classification: Some(classification),
            target: Some(target),
            transliterated: transliterated.clone(),
        };

        match self.chain.translate(provider_input, target).await {
            Ok(translation) => {
                let text = match target {
                    TranslationTarget::English => normalize::normalize(&translation.text, text),
                    TranslationTarget::Bangla => translation.text,
                };

                if text.is_empty() {
                    warn!("Provider '{}' output was empty after normalization", translation.provider);
                    reply.text = FAILURE_MESSAGE.to_string();
                } else {
                    reply.text = text;
                    reply.source = ReplySource::Provider(translation.provider);
                }
            }
            Err(e) => {
                warn!("{}", e);
                reply.text = FAILURE_MESSAGE.to_string();
            }
        }

        reply
    }

    async fn transliterate(&self, text: &str) -> Option<String> {
        let step = self.transliteration.as_ref()?;

        let result: TranslationResult<String> =
            match tokio::time::timeout(step.timeout, step.transliterator.transliterate(text)).await {
                Ok(result) => result,
                Err(_) => Err(TranslationError::TransliterationFailure(format!(
                    "timed out after {:?}",
                    step.timeout
                ))),
            };

        match result {
            Ok(bangla) => {
                debug!("Transliterated to: {}", bangla);
                Some(bangla)
            }
            Err(e) => {
                warn!("{}; continuing with original text", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{MockTranslationProvider, ProviderHandle};
    use crate::transliterate::MockTransliterator;
    use async_trait::async_trait;

    struct SlowTransliterator {
        delay: Duration,
    }

    #[async_trait]
    impl Transliterator for SlowTransliterator {
        async fn transliterate(&self, _text: &str) -> TranslationResult<String> {
            tokio::time::sleep(self.delay).await;
            Ok("আমি ভালো আছি".to_string())
        }
    }

    fn handle(name: &str, provider: MockTranslationProvider) -> ProviderHandle {
        ProviderHandle::new(name, Duration::from_secs(5), Arc::new(provider))
    }

    fn unused_provider() -> MockTranslationProvider {
        let mut provider = MockTranslationProvider::new();
        provider.expect_translate().never();
        provider
    }

    fn failing_provider(name: &'static str) -> MockTranslationProvider {
        let mut provider = MockTranslationProvider::new();
        provider.expect_translate().times(1).returning(move |_| {
            Err(TranslationError::ProviderNetworkError {
                provider: name.to_string(),
                message: "connection reset".to_string(),
            })
        });
        provider
    }

    fn answering_provider(answer: &'static str) -> MockTranslationProvider {
        let mut provider = MockTranslationProvider::new();
        provider
            .expect_translate()
            .times(1)
            .returning(move |_| Ok(answer.to_string()));
        provider
    }

    fn pipeline(providers: Vec<(&str, MockTranslationProvider)>) -> TranslationPipeline {
        TranslationPipeline::new(ProviderChain::new(
            providers.into_iter().map(|(name, p)| handle(name, p)).collect(),
        ))
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let pipeline = pipeline(vec![("primary", unused_provider())]);
        assert_eq!(pipeline.reply_for("").await, "");
        assert_eq!(pipeline.reply_for("   \n").await, "");
        assert_eq!(pipeline.process("").await.source, ReplySource::Empty);
    }

    #[tokio::test]
    async fn test_shortcut_bypasses_providers() {
        let mut transliterator = MockTransliterator::new();
        transliterator.expect_transliterate().never();
        let pipeline = pipeline(vec![("primary", unused_provider())])
            .with_transliterator(Arc::new(transliterator), Duration::from_secs(5));

        let reply = pipeline.process("Hi").await;
        assert_eq!(reply.text, "হাই");
        assert_eq!(reply.source, ReplySource::Shortcut);
        assert_eq!(reply.classification, None);
    }

    #[tokio::test]
    async fn test_fallback_provider_output_is_normalized() {
        let mut secondary = MockTranslationProvider::new();
        secondary
            .expect_translate()
            .withf(|req| req.source_text == "ami bhalo achi" && req.target == TranslationTarget::English)
            .times(1)
            .returning(|_| Ok("bhalo achi".to_string()));
        let pipeline = pipeline(vec![("primary", failing_provider("primary")), ("secondary", secondary)]);

        let reply = pipeline.process("ami bhalo achi").await;
        assert_eq!(reply.text, "Bhalo achi.");
        assert_eq!(reply.source, ReplySource::Provider("secondary".to_string()));
        assert_eq!(reply.classification, Some(ScriptClassification::RomanBanglaLike));
    }

    #[tokio::test]
    async fn test_question_mark_in_source_ends_reply_with_question_mark() {
        let pipeline = pipeline(vec![("primary", answering_provider("how are you."))]);
        assert_eq!(pipeline.reply_for("tumi kemon acho?").await, "How are you?");
    }

    #[tokio::test]
    async fn test_all_providers_failing_returns_failure_message() {
        let pipeline = pipeline(vec![
            ("primary", failing_provider("primary")),
            ("secondary", failing_provider("secondary")),
        ]);

        let reply = pipeline.process("কেমন আছো").await;
        assert_eq!(reply.text, FAILURE_MESSAGE);
        assert_eq!(reply.source, ReplySource::Failure);
        assert_eq!(reply.target, Some(TranslationTarget::English));
    }

    #[tokio::test]
    async fn test_bangla_target_output_is_not_normalized() {
        let mut primary = MockTranslationProvider::new();
        primary
            .expect_translate()
            .withf(|req| req.target == TranslationTarget::Bangla && req.source_language == "auto")
            .times(1)
            .returning(|_| Ok("শুভ সন্ধ্যা ".to_string()));
        let pipeline = pipeline(vec![("primary", primary)]);

        assert_eq!(pipeline.reply_for("Good evening").await, "শুভ সন্ধ্যা ");
    }

    #[tokio::test]
    async fn test_transliterated_text_is_sent_but_source_drives_punctuation() {
        let mut transliterator = MockTransliterator::new();
        transliterator
            .expect_transliterate()
            .withf(|text| text == "tumi kemon acho")
            .times(1)
            .returning(|_| Ok("তুমি কেমন আছো".to_string()));
        let mut primary = MockTranslationProvider::new();
        primary
            .expect_translate()
            .withf(|req| req.source_text == "তুমি কেমন আছো")
            .times(1)
            .returning(|_| Ok("how are you".to_string()));

        let pipeline = pipeline(vec![("primary", primary)])
            .with_transliterator(Arc::new(transliterator), Duration::from_secs(5));

        let reply = pipeline.process("tumi kemon acho").await;
        assert_eq!(reply.text, "How are you?");
        assert_eq!(reply.transliterated.as_deref(), Some("তুমি কেমন আছো"));
    }

    #[tokio::test]
    async fn test_transliteration_failure_falls_back_to_latin_text() {
        let mut transliterator = MockTransliterator::new();
        transliterator
            .expect_transliterate()
            .times(1)
            .returning(|_| Err(TranslationError::TransliterationFailure("HTTP 503".to_string())));
        let mut primary = MockTranslationProvider::new();
        primary
            .expect_translate()
            .withf(|req| req.source_text == "ami bhalo achi" && req.target == TranslationTarget::English)
            .times(1)
            .returning(|_| Ok("I am fine".to_string()));

        let pipeline = pipeline(vec![("primary", primary)])
            .with_transliterator(Arc::new(transliterator), Duration::from_secs(5));

        let reply = pipeline.process("ami bhalo achi").await;
        assert_eq!(reply.text, "I am fine.");
        assert_eq!(reply.transliterated, None);
    }

    #[tokio::test]
    async fn test_transliteration_timeout_falls_back_to_latin_text() {
        let mut primary = MockTranslationProvider::new();
        primary
            .expect_translate()
            .withf(|req| req.source_text == "ami bhalo achi" && req.target == TranslationTarget::English)
            .times(1)
            .returning(|_| Ok("i am fine".to_string()));

        let pipeline = pipeline(vec![("primary", primary)]).with_transliterator(
            Arc::new(SlowTransliterator { delay: Duration::from_secs(5) }),
            Duration::from_millis(50),
        );

        let reply = pipeline.process("ami bhalo achi").await;
        assert_eq!(reply.text, "I am fine.");
        assert_eq!(reply.transliterated, None);
        assert_eq!(reply.source, ReplySource::Provider("primary".to_string()));
    }

    #[tokio::test]
    async fn test_transliteration_only_runs_for_roman_bangla() {
        let mut transliterator = MockTransliterator::new();
        transliterator.expect_transliterate().never();
        let pipeline = pipeline(vec![
            ("primary", answering_provider("I love you")),
        ])
        .with_transliterator(Arc::new(transliterator), Duration::from_secs(5));

        assert_eq!(pipeline.reply_for("আমি তোমাকে ভালোবাসি").await, "I love you.");
    }

    #[tokio::test]
    async fn test_punctuation_only_output_is_a_failure() {
        let pipeline = pipeline(vec![("primary", answering_provider("?!"))]);
        assert_eq!(pipeline.reply_for("ki holo").await, FAILURE_MESSAGE);
    }

    #[test]
    fn test_max_latency_includes_transliteration() {
        let pipeline = TranslationPipeline::new(ProviderChain::new(vec![
            ProviderHandle::new("a", Duration::from_secs(15), Arc::new(MockTranslationProvider::new())),
            ProviderHandle::new("b", Duration::from_secs(10), Arc::new(MockTranslationProvider::new())),
        ]))
        .with_transliterator(Arc::new(MockTransliterator::new()), Duration::from_secs(10));

        assert_eq!(pipeline.max_latency(), Duration::from_secs(35));
    }

    #[test]
    fn test_from_config_respects_disabled_transliteration() {
        let mut config = Config::default();
        config.transliteration.enabled = false;
        let pipeline = TranslationPipeline::from_config(&config).unwrap();
        assert_eq!(pipeline.max_latency(), Duration::from_secs(25));
    }
}
