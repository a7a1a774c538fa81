//! Chat Assistant
//!
//! Ordered transcript of the conversation with the assistant. The backend
//! is authoritative: after a successful turn the whole transcript is
//! replaced by the history it returns.

use thiserror::Error;

use crate::api::{ChatMessage, FinanceApi, Role};

pub const GREETING: &str =
    "Hi there! I'm your personal finance and sustainability assistant. How can I help you today?";

pub const APOLOGY: &str = "Sorry, I couldn't reach the assistant right now. Please try again.";

/// Reasons a submission is refused before any request is made
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("A reply is still pending")]
    Busy,
}

/// A conversation with the assistant
#[derive(Debug, Clone)]
pub struct ChatSession {
    user_id: String,
    transcript: Vec<ChatMessage>,
    busy: bool,
}

impl ChatSession {
    /// Empty conversation for a stable user identifier
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            transcript: Vec::new(),
            busy: false,
        }
    }

    /// Conversation opened by the assistant's greeting
    pub fn with_greeting(user_id: impl Into<String>) -> Self {
        let mut session = Self::new(user_id);
        session.transcript.push(ChatMessage::assistant(GREETING));
        session
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the input accepts a submission right now
    pub fn can_submit(&self, input: &str) -> bool {
        !self.busy && !input.trim().is_empty()
    }

    /// Append the user's message and mark the session busy.
    ///
    /// Returns the text to send.
    pub fn begin_turn(&mut self, input: &str) -> Result<String, ChatError> {
        if self.busy {
            return Err(ChatError::Busy);
        }
        let message = input.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.transcript.push(ChatMessage::user(message));
        self.busy = true;
        Ok(message.to_string())
    }

    /// Apply the backend's answer to the pending turn
    pub fn finish_turn<E: std::fmt::Display>(&mut self, result: Result<Vec<ChatMessage>, E>) {
        match result {
            Ok(history) => {
                self.transcript = history;
            }
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "Chat request failed");
                self.transcript.push(ChatMessage::assistant(APOLOGY));
            }
        }
        self.busy = false;
    }

    /// Send one message and wait for the reply
    pub async fn send(&mut self, api: &dyn FinanceApi, input: &str) -> Result<(), ChatError> {
        let message = self.begin_turn(input)?;
        let result = api.send_chat(&message, &self.user_id).await;
        self.finish_turn(result);
        Ok(())
    }

    /// Transcript as terminal text
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .transcript
            .iter()
            .map(|message| match message.role {
                Role::User => format!("{:>60}", format!("{} ‹ you", message.content)),
                Role::Assistant => format!("assistant › {}", message.content),
            })
            .collect();

        if self.busy {
            lines.push("assistant › ...".to_string());
        }
        lines.join("\n")
    }
}
