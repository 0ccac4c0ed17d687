//! Hand-written mock ports shared by the use case tests.

use crate::ports::image_generator::ImageGenerator;
use crate::ports::publisher::{DeliveryError, Publisher};
use crate::ports::run_journal::{JournalEvent, RunJournal};
use crate::ports::text_generator::{GatewayError, TextGenerator};
use crate::ports::word_source::{RandomWordSource, WordSourceError};
use async_trait::async_trait;
use newsquiz_domain::{Image, Language, Poll, Prompt, Question, VocabularyWord};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

// ==================== Text generators ====================

/// Returns scripted responses in order; errors once the script runs out.
pub struct ScriptedGenerator {
    name: String,
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            name: "scripted".to_string(),
            responses: Mutex::new(VecDeque::from(responses)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(response: impl Into<String>) -> Self {
        Self::new(vec![Ok(response.into())])
    }

    pub fn failing() -> Self {
        Self::new(vec![])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

/// Answers based on the prompt, for runs where languages are processed
/// concurrently and call order is not fixed.
pub struct RoutingGenerator {
    routes: Vec<(String, Result<String, GatewayError>)>,
    calls: AtomicUsize,
}

impl RoutingGenerator {
    /// `routes` pairs a substring of the prompt with the reply to give.
    pub fn new(routes: Vec<(&str, Result<String, GatewayError>)>) -> Self {
        Self {
            routes: routes
                .into_iter()
                .map(|(needle, reply)| (needle.to_string(), reply))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for RoutingGenerator {
    fn name(&self) -> &str {
        "routing"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = prompt.text();
        self.routes
            .iter()
            .find(|(needle, _)| text.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Err(GatewayError::Other("no route".to_string())))
    }
}

/// Never answers within any reasonable timeout.
pub struct SlowGenerator;

#[async_trait]
impl TextGenerator for SlowGenerator {
    fn name(&self) -> &str {
        "slow"
    }

    async fn generate(&self, _prompt: &Prompt) -> Result<String, GatewayError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("[]".to_string())
    }
}

/// Panics on prompts containing `needle`, answers `reply` otherwise.
pub struct PanickingGenerator {
    needle: String,
    reply: String,
}

impl PanickingGenerator {
    pub fn on(needle: &str, reply: impl Into<String>) -> Self {
        Self {
            needle: needle.to_string(),
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for PanickingGenerator {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        if prompt.text().contains(self.needle.as_str()) {
            panic!("generator crashed on {}", self.needle);
        }
        Ok(self.reply.clone())
    }
}

// ==================== Images ====================

pub struct StaticImages {
    pub fail: bool,
    calls: AtomicUsize,
}

impl StaticImages {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for StaticImages {
    fn name(&self) -> &str {
        "static-images"
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Image, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(GatewayError::EmptyResponse)
        } else {
            Ok(Image::png(vec![0x89, b'P', b'N', b'G']))
        }
    }
}

// ==================== Words ====================

/// Gives the same word for every language, or nothing.
pub struct StaticWords {
    word: Option<String>,
}

impl StaticWords {
    pub fn new(word: &str) -> Self {
        Self {
            word: Some(word.to_string()),
        }
    }

    pub fn empty() -> Self {
        Self { word: None }
    }
}

#[async_trait]
impl RandomWordSource for StaticWords {
    async fn sample(
        &self,
        _language: &Language,
        count: usize,
    ) -> Result<Vec<VocabularyWord>, WordSourceError> {
        Ok(self
            .word
            .iter()
            .take(count)
            .map(|w| VocabularyWord::new(w.clone()))
            .collect())
    }
}

// ==================== Publisher ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { destination: String, text: String },
    Poll { destination: String, prompt: String },
    Image { destination: String, caption: Option<String> },
}

/// Records every send with the (tokio) time it happened.
pub struct RecordingPublisher {
    sent: Mutex<Vec<(Sent, Instant)>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent_at().into_iter().map(|(sent, _)| sent).collect()
    }

    pub fn sent_at(&self) -> Vec<(Sent, Instant)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<(String, String)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { destination, text } => Some((destination, text)),
                _ => None,
            })
            .collect()
    }

    pub fn polls(&self) -> Vec<(String, String)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Poll {
                    destination,
                    prompt,
                } => Some((destination, prompt)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Transport("offline".to_string()));
        }
        self.sent.lock().unwrap().push((sent, Instant::now()));
        Ok(())
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn send_text(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        self.record(Sent::Text {
            destination: destination.to_string(),
            text: text.to_string(),
        })
    }

    async fn send_poll(&self, destination: &str, poll: &Poll) -> Result<(), DeliveryError> {
        self.record(Sent::Poll {
            destination: destination.to_string(),
            prompt: poll.prompt.clone(),
        })
    }

    async fn send_image(
        &self,
        destination: &str,
        _image: &Image,
        caption: Option<&str>,
    ) -> Result<(), DeliveryError> {
        self.record(Sent::Image {
            destination: destination.to_string(),
            caption: caption.map(str::to_string),
        })
    }
}

// ==================== Journal ====================

pub struct RecordingJournal {
    events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingJournal {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn payloads(&self, event_type: &str) -> Vec<serde_json::Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == event_type)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

impl RunJournal for RecordingJournal {
    fn record(&self, event: JournalEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

// ==================== Fixtures ====================

pub fn question(id: i64, options: [&str; 4], correct: i64) -> Question {
    Question::new(
        id,
        "Prepositions",
        format!("Question {}", id),
        options.iter().map(|s| s.to_string()).collect(),
        correct,
        "Because.",
    )
}

pub fn questions_json(questions: &[Question]) -> String {
    serde_json::to_string(questions).unwrap()
}

pub fn news_json(count: usize) -> String {
    let items: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "category": "Science",
                "region": "Asia",
                "text": format!("Story number {}.", i),
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}
