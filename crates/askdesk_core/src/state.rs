use crate::view_model::AppViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sources: Vec<SourceRef>,
}

/// Decoded reply to one chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalPhase {
    #[default]
    Idle,
    Starting,
    Polling,
}

/// One evaluation status query folded to its core meaning. Anything that is
/// neither `Running` nor `Completed` (explicit error status, idle status,
/// unrecognized status, transport failure) arrives as `Stopped`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalReport {
    Running { message: Option<String> },
    Completed { result: String },
    Stopped { message: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    messages: Vec<ChatMessage>,
    pending_replies: usize,
    eval_phase: EvalPhase,
    eval_status: Option<String>,
    eval_result: Option<String>,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            messages: self.messages.clone(),
            pending_replies: self.pending_replies,
            eval_phase: self.eval_phase,
            eval_status: self.eval_status.clone(),
            eval_result: self.eval_result.clone(),
            start_enabled: self.eval_phase == EvalPhase::Idle,
            in_flight: self.eval_phase == EvalPhase::Polling,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn eval_phase(&self) -> EvalPhase {
        self.eval_phase
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    /// Takes the current input as a trimmed question, clearing the box.
    /// Empty or whitespace-only input yields `None` and leaves the box alone.
    pub(crate) fn take_question(&mut self) -> Option<String> {
        let question = self.input.trim().to_owned();
        if question.is_empty() {
            return None;
        }
        self.input.clear();
        Some(question)
    }

    pub(crate) fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.mark_dirty();
    }

    pub(crate) fn begin_pending_reply(&mut self) {
        self.pending_replies += 1;
        self.mark_dirty();
    }

    pub(crate) fn resolve_pending_reply(&mut self) {
        self.pending_replies = self.pending_replies.saturating_sub(1);
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub(crate) fn raise_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.mark_dirty();
    }

    pub(crate) fn begin_eval_start(&mut self) {
        self.eval_phase = EvalPhase::Starting;
        self.eval_status = Some("requesting evaluation start...".to_owned());
        self.eval_result = None;
        self.mark_dirty();
    }

    pub(crate) fn eval_start_failed(&mut self, message: String) {
        self.eval_phase = EvalPhase::Idle;
        self.eval_status = Some(format!("error - {message}"));
        self.mark_dirty();
    }

    pub(crate) fn begin_polling(&mut self, ack_message: String) {
        self.eval_phase = EvalPhase::Polling;
        self.eval_status = Some(ack_message);
        self.mark_dirty();
    }

    pub(crate) fn set_eval_status(&mut self, text: String) {
        self.eval_status = Some(text);
        self.mark_dirty();
    }

    pub(crate) fn complete_eval(&mut self, result: String) {
        self.eval_phase = EvalPhase::Idle;
        self.eval_status = Some("completed".to_owned());
        self.eval_result = Some(result);
        self.mark_dirty();
    }

    pub(crate) fn stop_eval(&mut self, message: Option<String>) {
        self.eval_phase = EvalPhase::Idle;
        self.eval_status = Some(message.unwrap_or_else(|| "waiting".to_owned()));
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
