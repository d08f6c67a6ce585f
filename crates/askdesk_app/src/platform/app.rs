use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use askdesk_api::{ChatService, ClientSettings, ReqwestService};
use askdesk_core::{update, AppState, AppViewModel, Msg};
use client_logging::{client_info, client_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::frontend::{ConsoleFrontend, Frontend, Presenter};
use super::logging::{self, LogDestination};

/// One interactive session: state, effect runner, presentation bookkeeping.
/// Messages are applied one at a time, run-to-completion.
pub struct Session<F: Frontend> {
    state: AppState,
    runner: EffectRunner,
    presenter: Presenter,
    frontend: F,
}

impl<F: Frontend> Session<F> {
    pub fn new(runner: EffectRunner, frontend: F) -> Self {
        Self {
            state: AppState::new(),
            runner,
            presenter: Presenter::new(),
            frontend,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);

        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        if was_dirty {
            self.presenter.present(&view, &mut self.frontend);
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);
    client_info!("askdesk starting, base_url={}", config.base_url);

    let service = Arc::new(ReqwestService::new(ClientSettings::with_base_url(
        config.base_url.clone(),
    ))?);

    // Startup liveness probe; a failure only warns.
    let probe_runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    if let Err(err) = probe_runtime.block_on(service.health()) {
        client_warn!("service health probe failed: {}", err);
        eprintln!("warning: {} is not answering ({})", config.base_url, err);
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(service, msg_tx.clone(), config.poll_period);
    let mut session = Session::new(runner, ConsoleFrontend);

    let quit = Arc::new(AtomicBool::new(false));
    spawn_input_thread(msg_tx, quit.clone());

    println!("askdesk - type a question, /eval to start an evaluation, /quit to exit");
    while !quit.load(Ordering::Relaxed) {
        let Ok(msg) = msg_rx.recv() else {
            break;
        };
        session.dispatch(msg);
    }

    client_info!("askdesk exiting");
    Ok(())
}

/// Maps stdin lines to messages: `/eval` starts an evaluation, `/quit` ends
/// the session, anything else is submitted as a question.
fn spawn_input_thread(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match line.trim() {
                "/quit" | "/exit" => break,
                "/eval" => {
                    let _ = msg_tx.send(Msg::StartEvalClicked);
                }
                _ => {
                    let _ = msg_tx.send(Msg::InputChanged(line));
                    let _ = msg_tx.send(Msg::ChatSubmitted);
                }
            }
        }
        quit.store(true, Ordering::Relaxed);
        // Wake the dispatch loop so it observes the quit flag.
        let _ = msg_tx.send(Msg::NoOp);
    });
}
