use crate::{ChatMessage, EvalPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub messages: Vec<ChatMessage>,
    /// Number of chat requests still awaiting a reply (loading placeholders).
    pub pending_replies: usize,
    pub eval_phase: EvalPhase,
    pub eval_status: Option<String>,
    /// Serialized evaluation result, present after a completed run.
    pub eval_result: Option<String>,
    pub start_enabled: bool,
    pub in_flight: bool,
    pub notice: Option<String>,
    pub dirty: bool,
}
