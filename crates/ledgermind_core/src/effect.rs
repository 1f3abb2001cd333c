#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one question to the answering service. Emitted once per accepted submission.
    AskQuestion {
        request_id: crate::RequestId,
        question: String,
    },
}
