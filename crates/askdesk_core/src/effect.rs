/// Default period of the recurring evaluation status check.
pub const POLL_PERIOD_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one chat request carrying the trimmed question.
    SendChat { question: String },
    /// Issue the evaluation start request.
    StartEvaluation,
    /// Issue one evaluation status query.
    QueryEvalStatus,
    /// Begin the recurring status check; first check one period later.
    StartPolling,
    /// Cancel the recurring status check.
    StopPolling,
}
