//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side effects
//! to be executed by the runtime.

/// Output commands from the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Debounce timer
    ScheduleQuery { letters: String },
    CancelPendingQuery,

    // Network: the only outbound request
    FetchWords { letters: String, generation: u64 },

    // App lifecycle
    Quit,
}
