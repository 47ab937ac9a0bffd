use std::sync::Mutex;

use drive_core::ConfirmToken;

/// Deferred-result slot for the yes/no dialog.
///
/// The effect runner parks the token of the outstanding request here; the
/// input layer matches the user's answer (or any other interaction, which
/// counts as a decline) back up by taking it.
#[derive(Debug, Default)]
pub(crate) struct ConfirmGate {
    pending: Mutex<Option<ConfirmToken>>,
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self, token: ConfirmToken) {
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(token);
        }
    }

    pub fn pending(&self) -> Option<ConfirmToken> {
        self.pending.lock().ok().and_then(|pending| *pending)
    }

    pub fn take(&self) -> Option<ConfirmToken> {
        self.pending.lock().ok().and_then(|mut pending| pending.take())
    }
}
