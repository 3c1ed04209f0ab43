//! Keyword vocabulary matching
//!
//! An ordered table of (trigger, handler) entries, fixed at
//! construction. The first entry whose trigger intersects both the
//! command tokens and the object tokens of a message runs, and its
//! outcome is final even when it has nothing to say. Matching itself
//! has no side effects; those belong to the invoked handler.

use crate::message::{Msg, StructuredInput};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Outcome of keyword dispatch.
///
/// `Deferred` covers both "no trigger matched" and "a handler matched
/// but cannot answer yet" (e.g. no city known); either way the turn
/// falls through to the dialog machine. Errors never surface here:
/// handlers render them as `Handled` apology text. This keeps a
/// legitimately empty reply distinct from a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordOutcome {
    Handled(String),
    Deferred,
}

/// Acceptable command and object tokens for one entry (or for the
/// skill as a whole, when handed to the host router).
#[derive(Debug, Clone)]
pub struct Trigger {
    commands: HashSet<String>,
    objects: HashSet<String>,
}

impl Trigger {
    pub fn new(commands: &[&str], objects: &[&str]) -> Self {
        Self {
            commands: commands.iter().map(|s| (*s).to_string()).collect(),
            objects: objects.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// A message matches when both intersections are non-empty. Empty
    /// token sets never match anything.
    pub fn matches(&self, tokens: &StructuredInput) -> bool {
        tokens.commands.iter().any(|c| self.commands.contains(c))
            && tokens.objects.iter().any(|o| self.objects.contains(o))
    }

    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    pub fn objects(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(String::as_str)
    }
}

/// A handler bound to a trigger in the vocabulary.
#[async_trait]
pub trait KeywordHandler: Send + Sync {
    async fn handle(&self, msg: &Msg) -> KeywordOutcome;
}

pub struct VocabEntry {
    pub trigger: Trigger,
    pub handler: Arc<dyn KeywordHandler>,
}

/// Ordered vocabulary; order is significant (first match wins) and
/// fixed at construction.
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
}

impl Vocabulary {
    pub fn new(entries: Vec<VocabEntry>) -> Self {
        Self { entries }
    }

    /// Invoke the first matching entry's handler; no match invokes
    /// nothing and defers.
    pub async fn dispatch(&self, msg: &Msg) -> KeywordOutcome {
        for entry in &self.entries {
            if entry.trigger.matches(&msg.tokens) {
                return entry.handler.handle(msg).await;
            }
        }
        KeywordOutcome::Deferred
    }
}
