use crate::{ChatReply, EvalReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the chat input box.
    InputChanged(String),
    /// User submitted the current input as a question.
    ChatSubmitted,
    /// Network outcome for one chat request.
    ChatCompleted {
        result: Result<ChatReply, String>,
    },
    /// User triggered an evaluation start.
    StartEvalClicked,
    /// Network outcome for the evaluation start request.
    EvalStartCompleted {
        result: Result<String, String>,
    },
    /// The recurring poll schedule fired.
    PollDue,
    /// Outcome of one evaluation status query, already folded by the caller.
    EvalStatusReceived { report: EvalReport },
    /// Fallback for placeholder wiring.
    NoOp,
}
