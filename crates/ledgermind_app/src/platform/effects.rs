use std::sync::Arc;

use ledgermind_core::{AnswerFailure, Effect, Msg};
use ledgermind_engine::{
    AskError, AskSettings, EngineEvent, EngineHandle, EventSink, FailureCategory, FailureKind,
    ReqwestAnswerClient, RequestId, ServiceConfig,
};
use ledgermind_logging::{ledger_info, ledger_warn};
use tokio::sync::mpsc::UnboundedSender;

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: UnboundedSender<Msg>,
}

impl EffectRunner {
    pub fn new(config: ServiceConfig, settings: AskSettings, msg_tx: UnboundedSender<Msg>) -> Self {
        let answer_deadline = settings.answer_deadline;
        let client = Arc::new(ReqwestAnswerClient::new(config, settings));
        let sink = Arc::new(MsgSink {
            msg_tx: msg_tx.clone(),
        });
        let engine = EngineHandle::new(client, answer_deadline, sink);
        Self { engine, msg_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::AskQuestion {
                    request_id,
                    question,
                } => {
                    ledger_info!(
                        "AskQuestion request_id={} question_len={}",
                        request_id,
                        question.len()
                    );
                    if let Err(err) = self.engine.ask(request_id, question) {
                        // The engine can't answer, so resolve here to release the pending flag.
                        let _ = self.msg_tx.send(answer_resolved(EngineEvent::AnswerCompleted {
                            request_id,
                            result: Err(err),
                        }));
                    }
                }
            }
        }
    }
}

/// Feeds engine completions back into the UI loop.
struct MsgSink {
    msg_tx: UnboundedSender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(answer_resolved(event));
    }
}

/// Converts an engine completion into a core message, logging the failure
/// cause since the transcript only ever shows the fallback text.
fn answer_resolved(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnswerCompleted { request_id, result } => {
            let outcome = match result {
                Ok(answer) => {
                    ledger_info!(
                        "Answer request_id={} answer_len={}",
                        request_id,
                        answer.len()
                    );
                    Ok(answer)
                }
                Err(err) => {
                    let failure = map_failure(&err.kind);
                    log_failure(request_id, &failure, &err);
                    Err(failure)
                }
            };
            Msg::AnswerResolved {
                request_id,
                outcome,
            }
        }
    }
}

fn log_failure(request_id: RequestId, failure: &AnswerFailure, err: &AskError) {
    ledger_warn!("Request {} failed with {}: {}", request_id, failure, err);
}

fn map_failure(kind: &FailureKind) -> AnswerFailure {
    match kind.category() {
        FailureCategory::Configuration => AnswerFailure::Configuration,
        FailureCategory::Transport => AnswerFailure::Transport,
        FailureCategory::Protocol => AnswerFailure::Protocol {
            status: kind.http_status().unwrap_or_default(),
        },
        FailureCategory::Payload => AnswerFailure::Payload,
    }
}
