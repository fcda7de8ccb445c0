//! Outcomes reported back to the caller of controller operations.

use shared::domain::{Item, ItemId};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Item),
    Updated(Item),
    /// Rejected locally; no request was issued.
    Invalid(ValidationError),
    /// The request failed; the message is what the user was shown.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Updated(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation prompt.
    Cancelled,
    Deleted(ItemId),
    Failed(String),
}
