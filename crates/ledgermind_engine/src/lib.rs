//! LedgerMind engine: configuration, the answering-service client and the
//! background request runner.
mod client;
mod config;
mod engine;
mod types;

pub use client::{AnswerClient, ReqwestAnswerClient};
pub use config::{AskSettings, ServiceConfig, BASE_URL_VAR, REQUEST_TIMEOUT_VAR};
pub use engine::{EngineHandle, EventSink};
pub use types::{AskError, EngineEvent, FailureCategory, FailureKind, RequestId};
