//! LedgerMind core: pure session state machine and view-model helpers.
mod effect;
mod message;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use message::{Message, Role};
pub use msg::Msg;
pub use outcome::{assistant_text, AnswerFailure, AnswerOutcome, FALLBACK_MESSAGE};
pub use state::{AppState, RequestId, SubmitRejection};
pub use update::update;
pub use view_model::AppViewModel;
