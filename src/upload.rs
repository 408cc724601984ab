//! Image upload control for the detail panel.
//!
//! Uploads are fire-and-forget from the engine's point of view: this control
//! tracks only the button state and never touches selection, search or
//! viewport state. A success confirmation is held for a short while and then
//! reset by the host.

use std::time::Duration;

use crate::error::{GatewayError, UploadError};

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

/// How long the "thank you" confirmation stays visible.
pub const SUCCESS_HOLD: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
    Succeeded { token: String },
    Failed { message: String },
}

/// Identifies one upload attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadTicket(u64);

#[derive(Clone, Debug, Default)]
pub struct UploadControl {
    state: UploadState,
    attempt: u64,
}

impl UploadControl {
    #[must_use]
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Whether the file input should be disabled.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.state, UploadState::Uploading | UploadState::Succeeded { .. })
    }

    /// Start an attempt.
    ///
    /// # Errors
    ///
    /// Refuses while an upload runs or its confirmation is still shown.
    pub fn begin(&mut self) -> Result<UploadTicket, UploadError> {
        match self.state {
            UploadState::Uploading => Err(UploadError::Busy),
            UploadState::Succeeded { .. } => Err(UploadError::Confirming),
            UploadState::Idle | UploadState::Failed { .. } => {
                self.attempt += 1;
                self.state = UploadState::Uploading;
                Ok(UploadTicket(self.attempt))
            }
        }
    }

    /// Record the outcome of an attempt. Outcomes of older attempts are ignored.
    pub fn finish(&mut self, ticket: UploadTicket, result: Result<String, GatewayError>) {
        if ticket.0 != self.attempt || self.state != UploadState::Uploading {
            return;
        }
        self.state = match result {
            Ok(token) => {
                tracing::info!(%token, "image upload confirmed");
                UploadState::Succeeded { token }
            }
            Err(err) => {
                tracing::warn!(error = %err, "image upload failed");
                UploadState::Failed { message: err.to_string() }
            }
        };
    }

    /// Clear the confirmation of `ticket`'s attempt once the hold elapsed.
    pub fn release(&mut self, ticket: UploadTicket) {
        if ticket.0 == self.attempt && matches!(self.state, UploadState::Succeeded { .. }) {
            self.state = UploadState::Idle;
        }
    }
}
