use crate::view_model::AppViewModel;
use crate::Message;

pub type RequestId = u64;

/// Reason a submission was turned away without touching the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    EmptyQuestion,
    AlreadyPending,
}

/// Session state store: transcript, draft and the in-flight request.
///
/// `pending` holds the id of the request whose user entry has been appended
/// but whose assistant entry has not. The transcript is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    transcript: Vec<Message>,
    draft: String,
    pending: Option<RequestId>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let pending = self.is_pending();
        AppViewModel {
            transcript: self.transcript.clone(),
            draft: self.draft.clone(),
            pending,
            send_enabled: !pending && !self.draft.trim().is_empty(),
            show_placeholder: self.transcript.is_empty() && !pending,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    /// Replaces the draft. Transcript and pending flag are untouched.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.draft != text {
            self.draft = text;
            self.dirty = true;
        }
    }

    /// Records an accepted question: appends the user entry, clears the
    /// draft and marks a fresh request as pending.
    pub fn append_user_message(&mut self, text: &str) -> Result<RequestId, SubmitRejection> {
        if self.pending.is_some() {
            return Err(SubmitRejection::AlreadyPending);
        }
        if text.trim().is_empty() {
            return Err(SubmitRejection::EmptyQuestion);
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.transcript.push(Message::user(text));
        self.draft.clear();
        self.pending = Some(request_id);
        self.dirty = true;
        Ok(request_id)
    }

    /// Appends the assistant entry for the pending request and clears it.
    ///
    /// Returns `false` without appending when nothing is pending, so every
    /// user entry is followed by at most one assistant entry.
    pub fn append_assistant_message(&mut self, text: impl Into<String>) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.transcript.push(Message::assistant(text));
        self.dirty = true;
        true
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
