//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function - they come from the terminal,
//! the debounce timer, or finished lookups.

use crossterm::event::KeyEvent;

use crate::api::LookupReply;

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),

    /// The input line now holds `text` (not yet sanitized).
    InputChanged(String),
    /// The clear button was pressed.
    Clear,

    /// The debounce timer settled on `letters`.
    QueryTimerFired(String),

    /// A lookup finished. `Err` carries the transport failure description.
    LookupFinished {
        generation: u64,
        result: Result<LookupReply, String>,
    },
}
