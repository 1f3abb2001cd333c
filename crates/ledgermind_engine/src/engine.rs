use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use ledgermind_logging::{ledger_debug, ledger_error};

use crate::{AnswerClient, AskError, EngineEvent, FailureKind, RequestId};

/// Receives engine events. Implementations must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

enum EngineCommand {
    Ask {
        request_id: RequestId,
        question: String,
    },
}

/// Runs asks on a background runtime so the caller's loop never waits on the network.
///
/// Every accepted ask produces exactly one `EngineEvent::AnswerCompleted`,
/// bounded by `answer_deadline`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        client: Arc<dyn AnswerClient>,
        answer_deadline: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        thread::spawn(move || run_engine(client, answer_deadline, sink, cmd_rx));
        Self { cmd_tx }
    }

    /// Queues a question. Fails only when the engine thread is gone.
    pub fn ask(&self, request_id: RequestId, question: impl Into<String>) -> Result<(), AskError> {
        self.cmd_tx
            .send(EngineCommand::Ask {
                request_id,
                question: question.into(),
            })
            .map_err(|_| AskError::new(FailureKind::Internal, "engine is not running"))
    }
}

fn run_engine(
    client: Arc<dyn AnswerClient>,
    answer_deadline: Duration,
    sink: Arc<dyn EventSink>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            let reason = err.to_string();
            ledger_error!("Failed to start engine runtime: {}", reason);
            // Still resolve every ask so nothing stays pending.
            while let Ok(EngineCommand::Ask { request_id, .. }) = cmd_rx.recv() {
                sink.emit(EngineEvent::AnswerCompleted {
                    request_id,
                    result: Err(AskError::new(FailureKind::Internal, reason.clone())),
                });
            }
            return;
        }
    };

    while let Ok(command) = cmd_rx.recv() {
        let client = client.clone();
        let sink = sink.clone();
        runtime.spawn(async move {
            handle_command(client, answer_deadline, command, sink.as_ref()).await;
        });
    }
}

async fn handle_command(
    client: Arc<dyn AnswerClient>,
    answer_deadline: Duration,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::Ask {
            request_id,
            question,
        } => {
            ledger_debug!(
                "Ask request_id={} question_len={}",
                request_id,
                question.len()
            );
            // The ask runs in its own task so a panicking client still completes.
            let mut ask = tokio::spawn(async move { client.ask(&question).await });
            let result = match tokio::time::timeout(answer_deadline, &mut ask).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_err)) => {
                    ledger_error!("Ask request_id={} aborted: {}", request_id, join_err);
                    Err(AskError::new(FailureKind::Internal, join_err.to_string()))
                }
                Err(_) => {
                    ask.abort();
                    Err(AskError::new(
                        FailureKind::Timeout,
                        format!("no answer within {answer_deadline:?}"),
                    ))
                }
            };
            sink.emit(EngineEvent::AnswerCompleted { request_id, result });
        }
    }
}
