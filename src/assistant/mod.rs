//! Question answering for the course pages.
//!
//! A student question and the text of the page they are reading go into a
//! fixed instructional prompt; the upstream model's answer comes back
//! unmodified. Failures collapse into two classes with fixed messages, and the
//! raw upstream detail only ever reaches the log.

mod gemini;

pub use gemini::GeminiClient;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const AUTH_HELP_MESSAGE: &str = "Please set up your Gemini API key. Go to https://makersuite.google.com/app/apikey to get your free API key.";

pub const UNAVAILABLE_MESSAGE: &str =
    "Sorry, the AI assistant is currently unavailable. Please check your Gemini API configuration.";

/// Body of `POST /api/chat`. Missing fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub question: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Opaque text-completion backend.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "You are an AI assistant helping students learn signal processing. \n\
         Context from the current page: {context}\n\
         \n\
         Student question: {question}\n\
         \n\
         Please provide a clear, educational response based on the context provided. \
         If the question relates to the context, use it to give specific examples or explanations."
    )
}

impl Error {
    /// The text shown to a student for a failed question.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::UpstreamAuth(_) => AUTH_HELP_MESSAGE,
            _ => UNAVAILABLE_MESSAGE,
        }
    }
}

pub struct AssistantService<G> {
    generator: G,
}

impl<G: TextGenerator> AssistantService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// One upstream call, no retry. Errors are always `UpstreamAuth` or
    /// `UpstreamUnavailable`.
    pub async fn answer_question(&self, question: &str, context: &str) -> Result<String> {
        let prompt = build_prompt(question, context);
        tracing::debug!(
            question_len = question.len(),
            context_len = context.len(),
            "forwarding question"
        );

        match self.generator.generate(&prompt).await {
            Ok(answer) => Ok(answer),
            Err(Error::UpstreamAuth(detail)) => {
                tracing::warn!(%detail, "assistant credentials rejected");
                Err(Error::UpstreamAuth(detail))
            }
            Err(Error::UpstreamUnavailable(detail)) => {
                tracing::error!(%detail, "assistant unavailable");
                Err(Error::UpstreamUnavailable(detail))
            }
            Err(other) => {
                tracing::error!(error = %other, "assistant failed");
                Err(Error::UpstreamUnavailable(other.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

/// The turns of one interactive session. Lives in memory only.
#[derive(Debug, Clone, Default)]
pub struct ChatExchange {
    turns: Vec<ChatTurn>,
}

impl ChatExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            role,
            text: text.into(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Asks `service` and records both sides. A failure is recorded as the
    /// assistant turn carrying the student-facing message.
    pub async fn ask<G: TextGenerator>(
        &mut self,
        service: &AssistantService<G>,
        question: &str,
        context: &str,
    ) -> Result<&ChatTurn> {
        self.push(Role::User, question);
        let outcome = service.answer_question(question, context).await;
        let text = match &outcome {
            Ok(answer) => answer.clone(),
            Err(err) => err.user_message().to_string(),
        };
        self.push(Role::Assistant, text);
        outcome?;
        Ok(&self.turns[self.turns.len() - 1])
    }
}
