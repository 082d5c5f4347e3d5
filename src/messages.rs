//! Game messages produced by the engine and consumed by a renderer.
//!
//! The engine never prints. Every operation appends to a [`MessageLog`], and
//! the session driver hands finished batches to a [`MessageSink`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Semantic category of a message, used by renderers for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
    Combat,
    System,
    Experience,
    Gold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMessage {
    pub text: String,
    pub kind: MessageType,
    pub timestamp: DateTime<Utc>,
}

impl GameMessage {
    pub fn new(text: impl Into<String>, kind: MessageType) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only message buffer.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<GameMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, kind: MessageType) {
        self.messages.push(GameMessage::new(text, kind));
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, MessageType::Info);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, MessageType::Success);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(text, MessageType::Warning);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text, MessageType::Error);
    }

    pub fn combat(&mut self, text: impl Into<String>) {
        self.push(text, MessageType::Combat);
    }

    pub fn system(&mut self, text: impl Into<String>) {
        self.push(text, MessageType::System);
    }

    pub fn experience(&mut self, text: impl Into<String>) {
        self.push(text, MessageType::Experience);
    }

    pub fn gold(&mut self, text: impl Into<String>) {
        self.push(text, MessageType::Gold);
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = GameMessage>) {
        self.messages.extend(messages);
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages of the given kind.
    pub fn count(&self, kind: MessageType) -> usize {
        self.messages.iter().filter(|m| m.kind == kind).count()
    }

    pub fn into_messages(self) -> Vec<GameMessage> {
        self.messages
    }
}

/// Receives ordered message batches from the session driver.
pub trait MessageSink {
    fn publish(&mut self, messages: &[GameMessage]);
}

/// Sink that keeps everything it receives. Handy for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub messages: Vec<GameMessage>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(needle))
    }
}

impl MessageSink for MemorySink {
    fn publish(&mut self, messages: &[GameMessage]) {
        self.messages.extend_from_slice(messages);
    }
}
