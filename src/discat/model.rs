//! # Domain Model: Disc Records
//!
//! A [`Disc`] is one optical disc in the catalog: its identity, capacity, write
//! speed, used space and write-session metadata.
//!
//! ## Invariants
//!
//! - `name` is never empty.
//! - `capacity` is finite and strictly positive.
//! - `0 <= used_space <= capacity`. Asking for more than the capacity clamps to
//!   the capacity and hands back a [`UsedSpaceCorrection`] so the caller can tell
//!   the user. The value never silently exceeds the capacity.
//! - The identity is assigned by the store and cannot change afterwards.
//!
//! ## Derived State
//!
//! Two values are computed on every read and never stored:
//!
//! - [`Disc::free_space`]: `capacity - used_space`
//! - [`Disc::is_open`]: true unless `session_type` equals `"finalized"`
//!   (case-insensitive)
//!
//! Because openness is derived from `session_type`, the only way to change it is
//! through [`Disc::set_session_type`] or [`Disc::set_finalized`].

use crate::error::{DiscatError, Result};
use std::fmt;

pub type DiscId = u64;

/// Canonical session label written by [`Disc::set_finalized`].
pub const FINALIZED_SESSION: &str = "Finalized";

/// Label a finalized disc falls back to when it is reopened.
pub const DEFAULT_SESSION: &str = "Data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Finalized,
}

impl SessionState {
    pub fn from_session_type(session_type: &str) -> Self {
        if session_type.eq_ignore_ascii_case(FINALIZED_SESSION) {
            SessionState::Finalized
        } else {
            SessionState::Open
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Open => write!(f, "open"),
            SessionState::Finalized => write!(f, "finalized"),
        }
    }
}

/// Reported when a requested used space was larger than the disc capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsedSpaceCorrection {
    pub requested: f64,
    pub capacity: f64,
}

impl fmt::Display for UsedSpaceCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Used space ({}MB) cannot exceed capacity ({}MB); clamped to {}MB",
            self.requested, self.capacity, self.capacity
        )
    }
}

/// A disc that has not been given an identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscDraft {
    pub name: String,
    pub capacity: f64,
    pub write_speed: u32,
    pub used_space: f64,
    pub session_count: u32,
    pub session_type: String,
}

impl DiscDraft {
    pub fn new(name: impl Into<String>, capacity: f64, write_speed: u32, used_space: f64) -> Self {
        Self {
            name: name.into(),
            capacity,
            write_speed,
            used_space,
            session_count: 1,
            session_type: DEFAULT_SESSION.to_string(),
        }
    }

    pub fn with_sessions(mut self, session_count: u32, session_type: impl Into<String>) -> Self {
        self.session_count = session_count;
        self.session_type = session_type.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Disc {
    id: DiscId,
    name: String,
    capacity: f64,
    write_speed: u32,
    used_space: f64,
    session_count: u32,
    session_type: String,
}

impl Disc {
    /// Build a disc from a draft.
    ///
    /// An empty name or a non-positive capacity rejects the whole creation. A
    /// used space above the capacity is clamped and reported, and creation still
    /// succeeds.
    pub fn create(id: DiscId, draft: DiscDraft) -> Result<(Disc, Option<UsedSpaceCorrection>)> {
        validate_name(&draft.name)?;
        validate_capacity(draft.capacity)?;
        let (used_space, correction) = clamp_used_space(draft.used_space, draft.capacity)?;

        if let Some(c) = &correction {
            log::warn!("disc {} ({}): {}", id, draft.name, c);
        }

        let disc = Disc {
            id,
            name: draft.name,
            capacity: draft.capacity,
            write_speed: draft.write_speed,
            used_space,
            session_count: draft.session_count,
            session_type: draft.session_type,
        };
        Ok((disc, correction))
    }

    pub fn id(&self) -> DiscId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn write_speed(&self) -> u32 {
        self.write_speed
    }

    pub fn used_space(&self) -> f64 {
        self.used_space
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn session_type(&self) -> &str {
        &self.session_type
    }

    pub fn free_space(&self) -> f64 {
        self.capacity - self.used_space
    }

    pub fn session_state(&self) -> SessionState {
        SessionState::from_session_type(&self.session_type)
    }

    pub fn is_open(&self) -> bool {
        self.session_state() == SessionState::Open
    }

    /// Rename the disc. An empty name is rejected and the old one is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Update the used space with the same clamp rule as [`Disc::create`].
    pub fn set_used_space(&mut self, used_space: f64) -> Result<Option<UsedSpaceCorrection>> {
        let (used_space, correction) = clamp_used_space(used_space, self.capacity)?;
        self.used_space = used_space;
        Ok(correction)
    }

    pub fn set_session_type(&mut self, session_type: impl Into<String>) {
        self.session_type = session_type.into();
    }

    /// Close or reopen the disc.
    ///
    /// Finalizing always writes the canonical `"Finalized"` label. Reopening only
    /// touches the label when it currently reads as finalized, replacing it with
    /// `"Data"`; any other label is already open and stays as it is.
    pub fn set_finalized(&mut self, finalized: bool) {
        if finalized {
            self.session_type = FINALIZED_SESSION.to_string();
        } else if !self.is_open() {
            self.session_type = DEFAULT_SESSION.to_string();
        }
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CD[ID={}, Name='{}', Size={}MB, Free={}MB]",
            self.id,
            self.name,
            self.capacity,
            self.free_space()
        )
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DiscatError::InvalidArgument(
            "Name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: f64) -> Result<()> {
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(DiscatError::InvalidArgument(format!(
            "Capacity must be a positive number of MB, got {}",
            capacity
        )));
    }
    Ok(())
}

fn clamp_used_space(used_space: f64, capacity: f64) -> Result<(f64, Option<UsedSpaceCorrection>)> {
    if !used_space.is_finite() || used_space < 0.0 {
        return Err(DiscatError::InvalidArgument(format!(
            "Used space must be zero or more MB, got {}",
            used_space
        )));
    }
    if used_space > capacity {
        let correction = UsedSpaceCorrection {
            requested: used_space,
            capacity,
        };
        return Ok((capacity, Some(correction)));
    }
    Ok((used_space, None))
}
