use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use askdesk_api::{ChatService, EvalStatusDoc, EvalStatusKind};
use askdesk_core::{ChatReply, Effect, EvalReport, Msg, SourceRef};
use client_logging::{client_info, client_warn};

enum ApiCommand {
    SendChat { question: String },
    StartEvaluation,
    QueryStatus,
}

/// Command channel into a dedicated thread that owns a tokio runtime.
/// Outcomes come back to the dispatch loop as `Msg` values.
struct ApiHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
}

impl ApiHandle {
    fn new(service: Arc<dyn ChatService>, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let msg_tx = msg_tx.clone();
                runtime.spawn(async move {
                    let msg = handle_command(service.as_ref(), command).await;
                    let _ = msg_tx.send(msg);
                });
            }
        });

        Self { cmd_tx }
    }

    fn send(&self, command: ApiCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(service: &dyn ChatService, command: ApiCommand) -> Msg {
    match command {
        ApiCommand::SendChat { question } => {
            let result = service
                .send_chat(&question)
                .await
                .map(|answer| ChatReply {
                    answer: answer.answer,
                    sources: answer
                        .sources
                        .into_iter()
                        .map(|source| SourceRef {
                            title: source.title,
                            url: source.url,
                        })
                        .collect(),
                })
                .map_err(|err| err.to_string());
            Msg::ChatCompleted { result }
        }
        ApiCommand::StartEvaluation => {
            let result = service
                .start_evaluation()
                .await
                .map(|ack| ack.message)
                .map_err(|err| err.to_string());
            Msg::EvalStartCompleted { result }
        }
        ApiCommand::QueryStatus => {
            let report = match service.evaluation_status().await {
                Ok(doc) => fold_status(doc),
                Err(err) => {
                    client_warn!("evaluation status check failed: {}", err);
                    EvalReport::Stopped {
                        message: Some("status check failed".to_string()),
                    }
                }
            };
            Msg::EvalStatusReceived { report }
        }
    }
}

/// Folds a status document into the core's report. Everything that is not
/// running or completed ends the poll loop.
fn fold_status(doc: EvalStatusDoc) -> EvalReport {
    match doc.status {
        EvalStatusKind::Running => EvalReport::Running {
            message: doc.message,
        },
        EvalStatusKind::Completed => {
            let value = doc.result.unwrap_or(serde_json::Value::Null);
            let result =
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            EvalReport::Completed { result }
        }
        EvalStatusKind::Idle | EvalStatusKind::Error | EvalStatusKind::Unknown => {
            EvalReport::Stopped {
                message: doc.message,
            }
        }
    }
}

/// Recurring schedule posting `PollDue` on a fixed period. The first tick
/// fires one period after start.
struct PollSchedule {
    stop: Arc<AtomicBool>,
}

impl PollSchedule {
    fn start(period: Duration, msg_tx: mpsc::Sender<Msg>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();

        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Relaxed) {
                break;
            }
            if msg_tx.send(Msg::PollDue).is_err() {
                break;
            }
        });

        Self { stop }
    }

    fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

pub struct EffectRunner {
    api: ApiHandle,
    msg_tx: mpsc::Sender<Msg>,
    poll_period: Duration,
    schedule: Option<PollSchedule>,
}

impl EffectRunner {
    pub fn new(
        service: Arc<dyn ChatService>,
        msg_tx: mpsc::Sender<Msg>,
        poll_period: Duration,
    ) -> Self {
        Self {
            api: ApiHandle::new(service, msg_tx.clone()),
            msg_tx,
            poll_period,
            schedule: None,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendChat { question } => {
                    client_info!("chat request question_len={}", question.len());
                    self.api.send(ApiCommand::SendChat { question });
                }
                Effect::StartEvaluation => {
                    client_info!("evaluation start requested");
                    self.api.send(ApiCommand::StartEvaluation);
                }
                Effect::QueryEvalStatus => {
                    self.api.send(ApiCommand::QueryStatus);
                }
                Effect::StartPolling => {
                    // Invariant: at most one live schedule per session.
                    if let Some(previous) = self.schedule.take() {
                        previous.cancel();
                    }
                    self.schedule =
                        Some(PollSchedule::start(self.poll_period, self.msg_tx.clone()));
                }
                Effect::StopPolling => {
                    if let Some(schedule) = self.schedule.take() {
                        schedule.cancel();
                    }
                }
            }
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        if let Some(schedule) = self.schedule.take() {
            schedule.cancel();
        }
    }
}
