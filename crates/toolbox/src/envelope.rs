//! Response envelope
//!
//! The only value that crosses back out to the caller. Serializes in the
//! MCP `tools/call` result shape.

use serde::Serialize;

/// Content block in a tool result. Only text blocks exist in this system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: text.into(),
        }
    }
}

/// Result of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "content")]
    pub blocks: Vec<ContentBlock>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ResponseEnvelope {
    /// Single text block, success
    pub fn text(msg: impl Into<String>) -> Self {
        Self {
            blocks: vec![ContentBlock::text(msg)],
            is_error: false,
        }
    }

    /// One text block per line, success
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocks: lines.into_iter().map(ContentBlock::text).collect(),
            is_error: false,
        }
    }

    /// Single text block, `isError: true`
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            blocks: vec![ContentBlock::text(msg)],
            is_error: true,
        }
    }

    /// Text of the first block, if any
    pub fn first_text(&self) -> Option<&str> {
        self.blocks.first().map(|b| b.text.as_str())
    }
}

/// What a handler hands back on the non-failure path
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    /// Lines rendered as one text block each
    Lines(Vec<String>),
    /// A pre-built envelope, passed through untouched. Handlers use this
    /// for domain errors with a specific message.
    Envelope(ResponseEnvelope),
}

impl From<Vec<String>> for HandlerOutput {
    fn from(lines: Vec<String>) -> Self {
        HandlerOutput::Lines(lines)
    }
}

impl From<String> for HandlerOutput {
    fn from(line: String) -> Self {
        HandlerOutput::Lines(vec![line])
    }
}

impl From<ResponseEnvelope> for HandlerOutput {
    fn from(envelope: ResponseEnvelope) -> Self {
        HandlerOutput::Envelope(envelope)
    }
}

impl From<HandlerOutput> for ResponseEnvelope {
    fn from(output: HandlerOutput) -> Self {
        match output {
            HandlerOutput::Lines(lines) => ResponseEnvelope::lines(lines),
            HandlerOutput::Envelope(envelope) => envelope,
        }
    }
}
