use askdesk_core::{AppViewModel, ChatMessage, Sender};

/// Rendering surface consumed by the session. Implementations only display;
/// they never feed back into the state machine.
pub trait Frontend {
    fn show_message(&mut self, message: &ChatMessage);
    fn show_error(&mut self, text: &str);
    fn show_status(&mut self, text: &str);
    fn show_result(&mut self, serialized: &str);
}

/// Pushes view-model changes to a `Frontend`, one delta per dirty view.
#[derive(Default)]
pub struct Presenter {
    rendered_messages: usize,
    last_notice: Option<String>,
    last_status: Option<String>,
    last_result: Option<String>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present(&mut self, view: &AppViewModel, frontend: &mut dyn Frontend) {
        for message in &view.messages[self.rendered_messages..] {
            frontend.show_message(message);
        }
        self.rendered_messages = view.messages.len();

        if view.notice != self.last_notice {
            if let Some(notice) = &view.notice {
                frontend.show_error(notice);
            }
            self.last_notice = view.notice.clone();
        }
        if view.eval_status != self.last_status {
            if let Some(status) = &view.eval_status {
                frontend.show_status(status);
            }
            self.last_status = view.eval_status.clone();
        }
        if view.eval_result != self.last_result {
            if let Some(result) = &view.eval_result {
                frontend.show_result(result);
            }
            self.last_result = view.eval_result.clone();
        }
    }
}

/// Line-oriented frontend for the terminal.
pub struct ConsoleFrontend;

impl Frontend for ConsoleFrontend {
    fn show_message(&mut self, message: &ChatMessage) {
        match message.sender {
            Sender::User => println!("you> {}", message.text),
            Sender::Bot => {
                println!("bot> {}", message.text);
                if !message.sources.is_empty() {
                    println!("Sources:");
                    for source in &message.sources {
                        println!("  {} <{}>", source.title, source.url);
                    }
                }
            }
        }
    }

    fn show_error(&mut self, text: &str) {
        eprintln!("! {text}");
    }

    fn show_status(&mut self, text: &str) {
        println!("[evaluation] {text}");
    }

    fn show_result(&mut self, serialized: &str) {
        println!("[evaluation result]\n{serialized}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdesk_core::{update, AppState, Msg};

    #[derive(Default)]
    struct Recording {
        messages: Vec<String>,
        errors: Vec<String>,
        statuses: Vec<String>,
        results: Vec<String>,
    }

    impl Frontend for Recording {
        fn show_message(&mut self, message: &ChatMessage) {
            self.messages.push(message.text.clone());
        }
        fn show_error(&mut self, text: &str) {
            self.errors.push(text.to_string());
        }
        fn show_status(&mut self, text: &str) {
            self.statuses.push(text.to_string());
        }
        fn show_result(&mut self, serialized: &str) {
            self.results.push(serialized.to_string());
        }
    }

    #[test]
    fn presenter_emits_each_message_once() {
        let mut presenter = Presenter::new();
        let mut frontend = Recording::default();

        let state = AppState::new();
        let (state, _) = update(state, Msg::InputChanged("hello?".to_string()));
        let (state, _) = update(state, Msg::ChatSubmitted);
        presenter.present(&state.view(), &mut frontend);
        presenter.present(&state.view(), &mut frontend);

        assert_eq!(frontend.messages, vec!["hello?".to_string()]);
    }

    #[test]
    fn presenter_repeats_status_only_when_it_changes() {
        let mut presenter = Presenter::new();
        let mut frontend = Recording::default();

        let state = AppState::new();
        let (state, _) = update(state, Msg::StartEvalClicked);
        presenter.present(&state.view(), &mut frontend);
        presenter.present(&state.view(), &mut frontend);
        let (state, _) = update(
            state,
            Msg::EvalStartCompleted {
                result: Ok("evaluation started".to_string()),
            },
        );
        presenter.present(&state.view(), &mut frontend);

        assert_eq!(
            frontend.statuses,
            vec![
                "requesting evaluation start...".to_string(),
                "evaluation started".to_string(),
            ]
        );
        assert!(frontend.errors.is_empty());
    }
}
