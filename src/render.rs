use std::sync::atomic::{AtomicU64, Ordering};

use crate::plural::{letter_form, word_form};
use crate::tea::UiState;

pub const DESCRIPTION: &str =
    "Wpisz litery, a pokażę wszystkie słowa, które można z nich ułożyć.";
pub const LOADING: &str = "Szukam słów...";

/// One block of the results region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    /// e.g. "3 litery (2 słowa)"
    pub title: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    /// e.g. "Znaleziono 2 słowa"
    pub header: String,
    pub groups: Vec<GroupView>,
}

/// Display fragment for the single visible content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Description,
    Loading,
    Error(String),
    Results(ResultsView),
}

impl Region {
    /// Lines as printed by the headless `find` command.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        match self {
            Region::Description => out.push_str(DESCRIPTION),
            Region::Loading => out.push_str(LOADING),
            Region::Error(message) => out.push_str(message),
            Region::Results(view) => {
                out.push_str(&view.header);
                for group in &view.groups {
                    out.push_str("\n\n");
                    out.push_str(&group.title);
                    out.push('\n');
                    out.push_str(&group.words.join(" "));
                }
            }
        }
        out
    }
}

/// Build the display fragment for `state`. Groups and words keep the order
/// the service returned them in.
pub fn render(state: &UiState) -> Region {
    match state {
        UiState::Description => Region::Description,
        UiState::Loading => Region::Loading,
        UiState::Error(message) => Region::Error(message.clone()),
        UiState::Results {
            word_groups,
            total_count,
        } => Region::Results(ResultsView {
            header: format!("Znaleziono {} {}", total_count, word_form(*total_count)),
            groups: word_groups
                .iter()
                .map(|group| GroupView {
                    title: format!(
                        "{} {} ({} {})",
                        group.length,
                        letter_form(group.length),
                        group.count,
                        word_form(group.count)
                    ),
                    words: group.words.clone(),
                })
                .collect(),
        }),
    }
}

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Immutable snapshot handed to the render thread.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub input: String,
    pub clear_visible: bool,
    pub region: Region,
    pub scroll: u16,
    /// Whether the keymap legend is expanded (toggled by Tab)
    pub show_keymap: bool,
    /// Stale-reply guard indicator - shown in the status bar when enabled
    pub stale_guard: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            input: String::new(),
            clear_visible: false,
            region: Region::Description,
            scroll: 0,
            show_keymap: false,
            stale_guard: false,
        }
    }
}
