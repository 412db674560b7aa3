//! Deterministic stand-ins for the generation endpoint.

use domain::generator::TextGenerator;
use shared::error::SemanticMapError;
use shared::types::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const TRANSLATION: &str = "What is a soul? Answer in 30 characters or less.";

pub const ENGLISH_ANSWERS: [&str; 10] = [
    "The soul is the immortal essence of a person.",
    "A spiritual essence that outlives the body.",
    "The immortal spirit within every living being.",
    "Consciousness and memory forming the self.",
    "The mind, memory and identity of a person.",
    "Identity and consciousness, nothing more.",
    "A divine breath given by god.",
    "The breath of life, a gift from god.",
    "God's breath animating the flesh.",
    "An essence beyond the body and mind.",
];

pub const JAPANESE_ANSWERS: [&str; 10] = [
    "魂は 生命 の 本質 です。",
    "魂とは 不滅 の 精神 です。",
    "生命 を 動かす 本質 。",
    "心 と 記憶 の 集まり 。",
    "記憶 と 意識 が 作る 自己 。",
    "意識 そのもの 。",
    "神 から 与えられた 息吹 。",
    "神 の 息吹 が 宿る もの 。",
    "不滅 の 精神 と 神 の 息吹 。",
    "言葉 にできない 何か 。",
];

/// Answers by prompt kind: the translation prompt gets [`TRANSLATION`],
/// summary prompts get `summary`, and every other prompt draws from the
/// Japanese or English answer list in rotation.
pub struct StubGenerator {
    summary: String,
    japanese_calls: AtomicUsize,
    english_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    fail_after: Option<usize>,
}

impl StubGenerator {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            japanese_calls: AtomicUsize::new(0),
            english_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            fail_after: None,
        }
    }

    /// Fails every call after the first `calls` have succeeded.
    pub fn failing_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn answer(&self, prompt: &str) -> String {
        if prompt.starts_with("Translate this question") {
            return TRANSLATION.to_string();
        }
        if prompt.contains("[Responses]") || prompt.contains("【回答群】") {
            return self.summary.clone();
        }
        if prompt.is_ascii() {
            let i = self.english_calls.fetch_add(1, Ordering::SeqCst);
            ENGLISH_ANSWERS[i % ENGLISH_ANSWERS.len()].to_string()
        } else {
            let i = self.japanese_calls.fetch_add(1, Ordering::SeqCst);
            JAPANESE_ANSWERS[i % JAPANESE_ANSWERS.len()].to_string()
        }
    }
}

impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let seen = {
            let mut prompts = self
                .prompts
                .lock()
                .map_err(|_| SemanticMapError::service("stub prompt log poisoned"))?;
            prompts.push(prompt.to_string());
            prompts.len()
        };
        if let Some(limit) = self.fail_after {
            if seen > limit {
                return Err(SemanticMapError::service("stub endpoint unavailable"));
            }
        }
        Ok(self.answer(prompt))
    }
}

/// Lets a test keep the stub after handing it to a service.
impl TextGenerator for &StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt).await
    }
}
