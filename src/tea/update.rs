//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute. Timers and network calls only
//! happen when the runtime executes those commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::LookupReply;
use crate::render;
use crate::sanitize::sanitize;
use crate::ui;
use crate::{zlog, zlog_debug, zlog_trace, zlog_warn};

use super::command::Command;
use super::message::Message;
use super::model::{Model, UiState};

/// Shown when the service found nothing for the letters.
pub const NO_WORDS_FOUND: &str = "Nie znaleziono słów z podanych liter";
/// Shown for a non-2xx reply without its own error text.
pub const SEARCH_FAILED: &str = "Wystąpił błąd podczas wyszukiwania";
/// Shown when no usable reply arrived at all.
pub const CONNECTION_FAILED: &str = "Błąd połączenia z serwerem";

const PAGE: u16 = 10;

/// Replace the visible state and reset scrolling.
fn set_state(model: &mut Model, ui: UiState) {
    zlog_debug!("UiState {} -> {}", model.ui.label(), ui.label());
    model.ui = ui;
    model.scroll = 0;
    model.dirty = true;
}

/// Pure update function: Model + Message → Commands
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            model.dirty = true; // Keyboard input always triggers render
            update_key(model, key, &mut cmds);
        }

        Message::Paste(text) => {
            let combined = format!("{}{}", model.input, text);
            input_changed(model, &combined, &mut cmds);
        }

        Message::Resize(width, height) => {
            model.viewport = (width, height);
            model.dirty = true;
            scroll_to(model, model.scroll);
        }

        Message::InputChanged(text) => input_changed(model, &text, &mut cmds),

        Message::Clear => clear(model, &mut cmds),

        Message::QueryTimerFired(letters) => {
            // Fired before a later edit or clear was processed.
            if letters != model.input {
                zlog_debug!(
                    "Dropping timer for {:?}, input is now {:?}",
                    letters,
                    model.input
                );
                return cmds;
            }
            model.generation += 1;
            model.accepting = Some(model.generation);
            zlog!(
                "Query settled letters={} generation={}",
                letters,
                model.generation
            );
            set_state(model, UiState::Loading);
            cmds.push(Command::FetchWords {
                letters,
                generation: model.generation,
            });
        }

        Message::LookupFinished { generation, result } => {
            if model.stale_guard && model.accepting != Some(generation) {
                zlog_debug!(
                    "Dropping stale reply generation={} (accepting {:?})",
                    generation,
                    model.accepting
                );
                return cmds;
            }
            set_state(model, outcome_state(result));
        }
    }

    cmds
}

/// Map a finished lookup to the state it should display.
pub fn outcome_state(result: Result<LookupReply, String>) -> UiState {
    let reply = match result {
        Ok(reply) => reply,
        Err(err) => {
            zlog_warn!("Lookup failed: {}", err);
            return UiState::Error(CONNECTION_FAILED.to_string());
        }
    };

    let server_error = reply.body.error.filter(|e| !e.trim().is_empty());

    if !reply.ok {
        return UiState::Error(server_error.unwrap_or_else(|| SEARCH_FAILED.to_string()));
    }
    if !reply.body.success {
        return UiState::Error(server_error.unwrap_or_else(|| NO_WORDS_FOUND.to_string()));
    }

    match reply.body.data {
        Some(data) if !data.word_groups.is_empty() => UiState::Results {
            word_groups: data.word_groups,
            total_count: data.total_count,
        },
        _ => UiState::Error(NO_WORDS_FOUND.to_string()),
    }
}

fn input_changed(model: &mut Model, raw: &str, cmds: &mut Vec<Command>) {
    let letters = sanitize(raw);
    zlog_trace!("Input changed raw={:?} sanitized={:?}", raw, letters);

    model.input = letters.clone();
    // A reply issued before this edit no longer matches the input.
    model.accepting = None;
    model.dirty = true;

    if letters.is_empty() {
        cmds.push(Command::CancelPendingQuery);
        set_state(model, UiState::Description);
    } else {
        cmds.push(Command::ScheduleQuery { letters });
    }
}

fn clear(model: &mut Model, cmds: &mut Vec<Command>) {
    zlog_debug!("Clear input");
    model.input.clear();
    model.accepting = None;
    cmds.push(Command::CancelPendingQuery);
    set_state(model, UiState::Description);
}

fn update_key(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => cmds.push(Command::Quit),

        KeyCode::Char('u') if ctrl => clear(model, cmds),

        KeyCode::Esc => clear(model, cmds),

        KeyCode::Char(c) if !ctrl => {
            let text = format!("{}{}", model.input, c);
            input_changed(model, &text, cmds);
        }

        KeyCode::Backspace => {
            if !model.input.is_empty() {
                let mut text = model.input.clone();
                text.pop();
                input_changed(model, &text, cmds);
            }
        }

        KeyCode::Up => scroll_to(model, model.scroll.saturating_sub(1)),
        KeyCode::Down => scroll_to(model, model.scroll.saturating_add(1)),
        KeyCode::PageUp => scroll_to(model, model.scroll.saturating_sub(PAGE)),
        KeyCode::PageDown => scroll_to(model, model.scroll.saturating_add(PAGE)),
        KeyCode::Home => scroll_to(model, 0),

        KeyCode::Tab => {
            model.show_keymap = !model.show_keymap;
        }

        _ => {}
    }
}

/// Scroll the content region, stopping once its last row reaches the bottom.
fn scroll_to(model: &mut Model, target: u16) {
    let (width, height) = model.viewport;
    let rows = ui::region_rows(&render::render(&model.ui), width);
    let max = rows.saturating_sub(ui::region_height(height) as usize);
    model.scroll = target.min(u16::try_from(max).unwrap_or(u16::MAX));
}
