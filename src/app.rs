use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tokio::runtime::Runtime;

use crate::api::HttpWordSource;
use crate::config::Config;
use crate::pipeline::QueryPipeline;
use crate::render::RenderState;
use crate::tea::Message;
use crate::{zlog, zlog_debug, zlog_trace, Result};

const MAX_BG_MESSAGES: usize = 50;

pub struct LogicThread;

impl LogicThread {
    pub fn run(
        config: Config,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        zlog_debug!(
            "LogicThread::run_async api_url={} debounce={:?} stale_guard={}",
            config.effective_api_url(),
            config.debounce_delay(),
            config.stale_guard
        );
        let source = HttpWordSource::new(config.effective_api_url(), config.request_timeout())?;
        let mut pipeline = QueryPipeline::from_config(&config, source);
        if let Ok((width, height)) = terminal::size() {
            pipeline.dispatch(Message::Resize(width, height));
        }

        send_state(&state_tx, &mut pipeline);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority)
            while event::poll(Duration::ZERO)? {
                let Some(msg) = terminal_message(event::read()?) else {
                    continue;
                };
                zlog_trace!("Terminal event: {:?}", msg);
                if pipeline.dispatch(msg) {
                    shutdown.store(true, Ordering::Relaxed);
                    zlog!(
                        "Quit requested after {} lookups",
                        pipeline.requests_issued()
                    );
                    return Ok(());
                }
                send_state(&state_tx, &mut pipeline);
            }

            // Timer firings and finished lookups (bounded)
            if pipeline.pump(MAX_BG_MESSAGES) {
                shutdown.store(true, Ordering::Relaxed);
                return Ok(());
            }

            send_state(&state_tx, &mut pipeline);

            tokio::time::sleep(Duration::from_micros(500)).await;
        }

        Ok(())
    }
}

/// Translate a crossterm event into a pipeline message.
fn terminal_message(event: Event) -> Option<Message> {
    match event {
        // Windows reports releases too; only presses edit the input.
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(Message::Key(key)),
        Event::Paste(text) => Some(Message::Paste(text)),
        Event::Resize(w, h) => Some(Message::Resize(w, h)),
        _ => None,
    }
}

fn send_state<S: crate::api::WordSource>(
    state_tx: &Sender<RenderState>,
    pipeline: &mut QueryPipeline<S>,
) {
    if let Some(state) = pipeline.take_snapshot() {
        let _ = state_tx.try_send(state);
    }
}
