use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::orientation::Answer;

/// Confirmed answer for one marker. Survives eviction of the tracking record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ConfirmedEntry {
    pub answer: Answer,
    pub confirmed_at: u64,
    pub changed_since_last_display: bool,
}

/// Row of the scoreboard handed to the presentation layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BoardEntry {
    pub id: u32,
    pub answer: Answer,
    pub confirmed_at: u64,
    pub changed_since_last_display: bool,
}

impl BoardEntry {
    pub fn new(id: u32, entry: &ConfirmedEntry) -> Self {
        Self {
            id,
            answer: entry.answer,
            confirmed_at: entry.confirmed_at,
            changed_since_last_display: entry.changed_since_last_display,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationKind {
    New,
    Changed { previous: Answer },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ConfirmationEvent {
    pub id: u32,
    pub answer: Answer,
    pub kind: ConfirmationKind,
    pub timestamp: u64,
}

impl ConfirmationEvent {
    #[inline]
    pub fn is_new(&self) -> bool {
        self.kind == ConfirmationKind::New
    }
}

impl fmt::Display for ConfirmationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConfirmationKind::New => write!(
                f,
                "New student detected: ID {} answered {}",
                self.id, self.answer
            ),
            ConfirmationKind::Changed { previous } => {
                write!(f, "Marker {} changed: {} → {}", self.id, previous, self.answer)
            }
        }
    }
}
