use std::fmt;

/// Assistant text substituted for any answer that could not be obtained.
pub const FALLBACK_MESSAGE: &str = "Sorry can not find the answer";

/// Why an answer could not be obtained. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerFailure {
    /// The service base URL is missing or unusable.
    Configuration,
    /// The service could not be reached or did not answer in time.
    Transport,
    /// The service replied with a non-success status.
    Protocol { status: u16 },
    /// The reply body carried no usable `answer`.
    Payload,
}

impl fmt::Display for AnswerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerFailure::Configuration => write!(f, "configuration error"),
            AnswerFailure::Transport => write!(f, "transport error"),
            AnswerFailure::Protocol { status } => write!(f, "protocol error (status {status})"),
            AnswerFailure::Payload => write!(f, "payload error"),
        }
    }
}

pub type AnswerOutcome = Result<String, AnswerFailure>;

/// Normalizes a resolved outcome into the text appended as the assistant entry.
pub fn assistant_text(outcome: AnswerOutcome) -> String {
    match outcome {
        Ok(answer) => answer,
        Err(_) => FALLBACK_MESSAGE.to_string(),
    }
}
