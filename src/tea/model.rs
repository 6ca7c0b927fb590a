//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state - no channels, no timers, no clients.

use crate::api::WordGroup;
use crate::config::Config;
use crate::render::{self, next_version, RenderState};

/// Assumed terminal size until the first resize event arrives.
pub const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);

/// What the content region currently shows. Exactly one is visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    /// Idle: the usage description.
    #[default]
    Description,
    Loading,
    Error(String),
    Results {
        word_groups: Vec<WordGroup>,
        total_count: u64,
    },
}

impl UiState {
    pub fn label(&self) -> &'static str {
        match self {
            UiState::Description => "description",
            UiState::Loading => "loading",
            UiState::Error(_) => "error",
            UiState::Results { .. } => "results",
        }
    }
}

/// Pure application state - the single source of truth.
pub struct Model {
    /// Sanitized contents of the input line.
    pub input: String,
    pub ui: UiState,

    /// Generation of the most recently issued lookup.
    pub generation: u64,
    /// Generation whose reply may still be applied when the guard is on.
    /// Cleared by any input change after the lookup was issued.
    pub accepting: Option<u64>,
    pub stale_guard: bool,

    /// First visible row of the content region, counted after wrapping.
    pub scroll: u16,
    /// Terminal size (columns, rows) that scrolling is measured against.
    pub viewport: (u16, u16),
    /// Whether the keymap legend is expanded (toggled by Tab)
    pub show_keymap: bool,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,
}

impl Model {
    pub fn new(stale_guard: bool) -> Self {
        Self {
            input: String::new(),
            ui: UiState::default(),
            generation: 0,
            accepting: None,
            stale_guard,
            scroll: 0,
            viewport: DEFAULT_VIEWPORT,
            show_keymap: false,
            dirty: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.stale_guard)
    }

    /// The clear button is shown whenever there is something to clear.
    pub fn clear_visible(&self) -> bool {
        !self.input.is_empty()
    }

    /// Create an immutable snapshot for the render thread.
    pub fn snapshot(&self) -> RenderState {
        RenderState {
            version: next_version(),
            input: self.input.clone(),
            clear_visible: self.clear_visible(),
            region: render::render(&self.ui),
            scroll: self.scroll,
            show_keymap: self.show_keymap,
            stale_guard: self.stale_guard,
        }
    }
}
