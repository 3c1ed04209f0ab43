//! Incoming message model
//!
//! A [`Msg`] is one conversational turn as delivered by the host
//! assistant: the raw text, the conversation it belongs to, and the
//! host's token extraction (command words and object words). The skill
//! treats a message as read-only for the duration of the turn.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Command and object tokens attached to a message by the host's NLP
/// pass. Tokens arrive normalized (lowercased) by the host; matching
/// against triggers is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredInput {
    pub commands: HashSet<String>,
    pub objects: HashSet<String>,
}

impl StructuredInput {
    pub fn new(commands: &[&str], objects: &[&str]) -> Self {
        Self {
            commands: commands.iter().map(|s| (*s).to_string()).collect(),
            objects: objects.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// True when the host extracted no usable tokens at all.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.objects.is_empty()
    }
}

/// One incoming conversational turn.
#[derive(Debug, Clone)]
pub struct Msg {
    /// Conversation this turn belongs to; memory and the dialog cursor
    /// are scoped to it.
    pub conversation_id: String,
    /// Raw utterance text.
    pub text: String,
    /// Host-extracted command/object tokens.
    pub tokens: StructuredInput,
}

impl Msg {
    pub fn new(
        conversation_id: impl Into<String>,
        text: impl Into<String>,
        tokens: StructuredInput,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            text: text.into(),
            tokens,
        }
    }

    /// A turn the host attached no token extraction to (e.g. a bare
    /// city name typed in response to a prompt).
    pub fn untokenized(conversation_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(conversation_id, text, StructuredInput::default())
    }
}
