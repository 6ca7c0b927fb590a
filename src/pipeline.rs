//! Query pipeline runtime.
//!
//! Owns the model, the debounce timer and the word source, feeds messages
//! through `update` and executes the resulting commands. Timer firings and
//! finished lookups come back as messages on the pipeline's own channel, so
//! every state change still goes through `update` in arrival order.
//!
//! Must be driven from inside a tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::WordSource;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{zlog_debug, zlog_warn};

pub struct QueryPipeline<S: WordSource> {
    model: Model,
    debouncer: Debouncer,
    source: Arc<S>,
    msg_tx: mpsc::UnboundedSender<Message>,
    msg_rx: mpsc::UnboundedReceiver<Message>,
    requests_issued: u64,
}

impl<S: WordSource> QueryPipeline<S> {
    pub fn new(model: Model, delay: Duration, source: S) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            model,
            debouncer: Debouncer::new(delay),
            source: Arc::new(source),
            msg_tx,
            msg_rx,
            requests_issued: 0,
        }
    }

    pub fn from_config(config: &Config, source: S) -> Self {
        Self::new(Model::from_config(config), config.debounce_delay(), source)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Number of lookups started so far.
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Whether a typed query is still waiting for the settle period.
    pub fn query_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Run one message through `update` and execute its commands.
    /// Returns true when the app should quit.
    pub fn dispatch(&mut self, msg: Message) -> bool {
        let mut quit = false;
        for cmd in update(&mut self.model, msg) {
            quit |= self.execute(cmd);
        }
        quit
    }

    /// Dispatch up to `max` queued background messages without waiting.
    pub fn pump(&mut self, max: usize) -> bool {
        for _ in 0..max {
            let Ok(msg) = self.msg_rx.try_recv() else {
                break;
            };
            if self.dispatch(msg) {
                return true;
            }
        }
        false
    }

    /// Wait for the next background message and dispatch it.
    pub async fn step(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => self.dispatch(msg),
            None => true,
        }
    }

    /// Snapshot for the renderer if anything changed since the last call.
    pub fn take_snapshot(&mut self) -> Option<RenderState> {
        if !self.model.dirty {
            return None;
        }
        self.model.dirty = false;
        Some(self.model.snapshot())
    }

    fn execute(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::ScheduleQuery { letters } => {
                zlog_debug!("Command::ScheduleQuery letters={}", letters);
                let tx = self.msg_tx.clone();
                self.debouncer.schedule(move || {
                    let _ = tx.send(Message::QueryTimerFired(letters));
                });
            }

            Command::CancelPendingQuery => {
                zlog_debug!("Command::CancelPendingQuery");
                self.debouncer.cancel_all();
            }

            Command::FetchWords {
                letters,
                generation,
            } => {
                zlog_debug!(
                    "Command::FetchWords letters={} generation={}",
                    letters,
                    generation
                );
                self.requests_issued += 1;
                let source = self.source.clone();
                let tx = self.msg_tx.clone();

                tokio::spawn(async move {
                    let result = source.lookup(&letters).await.map_err(|e| {
                        zlog_warn!("Lookup for '{}' failed: {}", letters, e);
                        e.to_string()
                    });
                    let _ = tx.send(Message::LookupFinished { generation, result });
                });
            }

            Command::Quit => {
                zlog_debug!("Command::Quit");
                return true;
            }
        }

        false
    }
}
