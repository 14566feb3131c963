//! # Commands
//!
//! One module per catalog operation. Each command takes a [`CatalogStore`]
//! plus plain Rust arguments and returns a [`CmdResult`]: the discs it touched
//! or listed, and human-readable messages for whatever UI renders them.
//!
//! Conditions the caller should hear about but that are not failures (an
//! unknown identity, a clamped used space) become messages. Only invalid
//! input and persistence failures come back as `Err`.
//!
//! [`CatalogStore`]: crate::store::CatalogStore

use crate::model::Disc;

pub mod add;
pub mod delete;
pub mod find;
pub mod finalize;
pub mod list;
pub mod persist;
pub mod seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_discs: Vec<Disc>,
    pub listed_discs: Vec<Disc>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_discs(mut self, discs: Vec<Disc>) -> Self {
        self.listed_discs = discs;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
