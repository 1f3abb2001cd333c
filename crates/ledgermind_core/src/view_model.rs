use crate::Message;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub transcript: Vec<Message>,
    pub draft: String,
    pub pending: bool,
    /// Send control state: off while pending or while the draft is blank.
    pub send_enabled: bool,
    /// Empty transcript and nothing in flight.
    pub show_placeholder: bool,
}
