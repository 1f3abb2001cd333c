#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question input.
    DraftChanged(String),
    /// User pressed Enter or the send control; submits the current draft.
    SubmitClicked,
    /// Engine finished (or gave up on) the request with the given id.
    AnswerResolved {
        request_id: crate::RequestId,
        outcome: crate::AnswerOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}
