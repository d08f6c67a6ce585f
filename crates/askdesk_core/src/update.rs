use crate::{AppState, ChatMessage, Effect, EvalPhase, EvalReport, Msg, Sender};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // Notices are one-shot banners; whatever happens next replaces them.
    state.clear_notice();

    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::ChatSubmitted => match state.take_question() {
            Some(question) => {
                state.push_message(ChatMessage {
                    sender: Sender::User,
                    text: question.clone(),
                    sources: Vec::new(),
                });
                state.begin_pending_reply();
                vec![Effect::SendChat { question }]
            }
            None => Vec::new(),
        },
        Msg::ChatCompleted { result } => {
            state.resolve_pending_reply();
            let message = match result {
                Ok(reply) => ChatMessage {
                    sender: Sender::Bot,
                    text: reply.answer,
                    sources: reply.sources,
                },
                Err(detail) => ChatMessage {
                    sender: Sender::Bot,
                    text: format!("An error occurred: {detail}"),
                    sources: Vec::new(),
                },
            };
            state.push_message(message);
            Vec::new()
        }
        Msg::StartEvalClicked => match state.eval_phase() {
            EvalPhase::Idle => {
                state.begin_eval_start();
                vec![Effect::StartEvaluation]
            }
            // Duplicate-submission guard: one job per session at a time.
            EvalPhase::Starting | EvalPhase::Polling => {
                state.raise_notice("an evaluation is already in progress");
                Vec::new()
            }
        },
        Msg::EvalStartCompleted { result } => {
            if state.eval_phase() != EvalPhase::Starting {
                // Stale completion after the session was reset.
                return (state, Vec::new());
            }
            match result {
                Ok(ack_message) => {
                    state.begin_polling(ack_message);
                    vec![Effect::StartPolling]
                }
                Err(detail) => {
                    state.eval_start_failed(detail);
                    Vec::new()
                }
            }
        }
        Msg::PollDue => {
            if state.eval_phase() == EvalPhase::Polling {
                vec![Effect::QueryEvalStatus]
            } else {
                // Tick raced a cancelled schedule.
                Vec::new()
            }
        }
        Msg::EvalStatusReceived { report } => {
            if state.eval_phase() != EvalPhase::Polling {
                return (state, Vec::new());
            }
            match report {
                EvalReport::Running { message } => {
                    state.set_eval_status(
                        message.unwrap_or_else(|| "evaluation in progress...".to_owned()),
                    );
                    Vec::new()
                }
                EvalReport::Completed { result } => {
                    state.complete_eval(result);
                    vec![Effect::StopPolling]
                }
                EvalReport::Stopped { message } => {
                    state.stop_eval(message);
                    vec![Effect::StopPolling]
                }
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
