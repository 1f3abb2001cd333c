use crate::{assistant_text, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DraftChanged(text) => {
            state.set_draft(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            let question = state.draft().to_owned();
            match state.append_user_message(&question) {
                Ok(request_id) => vec![Effect::AskQuestion {
                    request_id,
                    question,
                }],
                Err(_) => Vec::new(),
            }
        }
        Msg::AnswerResolved {
            request_id,
            outcome,
        } => {
            // A resolution for anything but the in-flight request is stale.
            if state.pending_request() != Some(request_id) {
                return (state, Vec::new());
            }
            state.append_assistant_message(assistant_text(outcome));
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
