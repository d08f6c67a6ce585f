//! Askdesk core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, POLL_PERIOD_MS};
pub use msg::Msg;
pub use state::{AppState, ChatMessage, ChatReply, EvalPhase, EvalReport, Sender, SourceRef};
pub use update::update;
pub use view_model::AppViewModel;
