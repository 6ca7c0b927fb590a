//! Terminal UI rendering for the anagramator TUI.
//!
//! Layout, top to bottom: input line, separator, the single content region,
//! status bar. Minimal chrome, grayscale plus one accent for the header.
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::render::{Region, RenderState, ResultsView, DESCRIPTION, LOADING};

const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_SEPARATOR: Color = Color::White;
const COLOR_ACCENT: Color = Color::Magenta;
const COLOR_ERROR: Color = Color::Red;

const PROMPT: &str = "> ";
const CLEAR_MARKER: &str = "[x]";

/// Which keybindings apply right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    /// Nothing typed yet.
    Empty,
    /// Input present; results may be scrollable.
    Typing { scrollable: bool },
}

impl KeymapContext {
    pub fn from_render_state(state: &RenderState) -> Self {
        if state.input.is_empty() {
            KeymapContext::Empty
        } else {
            KeymapContext::Typing {
                scrollable: matches!(state.region, Region::Results(_)),
            }
        }
    }
}

struct Keybinding(&'static str, &'static str);

fn keybindings_for_context(ctx: KeymapContext) -> Vec<Vec<Keybinding>> {
    let mut groups = Vec::new();
    match ctx {
        KeymapContext::Empty => {
            groups.push(vec![Keybinding("a-ż", "type letters")]);
        }
        KeymapContext::Typing { scrollable } => {
            groups.push(vec![Keybinding("Esc", "clear"), Keybinding("Bksp", "delete")]);
            if scrollable {
                groups.push(vec![
                    Keybinding("↑↓", "scroll"),
                    Keybinding("PgUp/PgDn", "page"),
                ]);
            }
        }
    }
    groups.push(vec![Keybinding("Ctrl+C", "quit")]);
    groups
}

/// Main render function - entry point for all UI drawing.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();

    if area.height < 4 {
        frame.render_widget(Paragraph::new(input_line(state, area.width)), area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    frame.render_widget(Paragraph::new(input_line(state, area.width)), chunks[0]);
    render_separator(frame, chunks[1]);
    render_region(frame, state, chunks[2]);
    frame.render_widget(Paragraph::new(status_line(state, area.width)), chunks[3]);
}

/// Input line with a right-aligned clear marker when there is input.
fn input_line(state: &RenderState, width: u16) -> Line<'static> {
    let mut spans = vec![
        Span::styled(PROMPT, Style::default().fg(COLOR_TEXT_MUTED)),
        Span::styled(state.input.clone(), Style::default().fg(Color::White)),
        Span::styled(
            "_",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ];

    if state.clear_visible {
        let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let spacer = (width as usize)
            .saturating_sub(content_width)
            .saturating_sub(CLEAR_MARKER.len());
        if spacer > 0 {
            spans.push(Span::raw(" ".repeat(spacer)));
        }
        spans.push(Span::styled(
            CLEAR_MARKER,
            Style::default().fg(COLOR_TEXT_DIMMED),
        ));
    }

    Line::from(spans)
}

fn render_separator(frame: &mut Frame, area: Rect) {
    let solid = "─".repeat(area.width as usize);
    let line = Line::from(Span::styled(solid, Style::default().fg(COLOR_SEPARATOR)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_region(frame: &mut Frame, state: &RenderState, area: Rect) {
    let paragraph = region_paragraph(&state.region).scroll((state.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn region_paragraph(region: &Region) -> Paragraph<'static> {
    Paragraph::new(region_text(region)).wrap(Wrap { trim: false })
}

/// Rows left for the content region in a terminal `height` rows tall.
pub fn region_height(height: u16) -> u16 {
    if height < 4 {
        0
    } else {
        height - 3
    }
}

/// Rows `region` occupies once wrapped to `width` columns.
pub fn region_rows(region: &Region, width: u16) -> usize {
    region_paragraph(region).line_count(width)
}

/// Styled text for the visible region.
fn region_text(region: &Region) -> Text<'static> {
    match region {
        Region::Description => Text::from(Line::from(Span::styled(
            DESCRIPTION,
            Style::default().fg(COLOR_TEXT_DIMMED),
        ))),
        Region::Loading => Text::from(Line::from(Span::styled(
            LOADING,
            Style::default().fg(COLOR_TEXT_MUTED),
        ))),
        Region::Error(message) => Text::from(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
        ))),
        Region::Results(view) => results_text(view),
    }
}

fn results_text(view: &ResultsView) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(
        view.header.clone(),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    ))];

    for group in &view.groups {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            group.title.clone(),
            Style::default()
                .fg(COLOR_TEXT_DIMMED)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(group.words.join("  ")));
    }

    Text::from(lines)
}

/// Bottom line: collapsed "Tab" hint or the full keymap, plus the guard badge.
fn status_line(state: &RenderState, width: u16) -> Line<'static> {
    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    let help_style = if state.show_keymap {
        Style::default()
    } else {
        Style::default().fg(COLOR_TEXT_MUTED)
    };
    let mut spans: Vec<Span> = vec![Span::styled("Tab", help_style)];

    if state.show_keymap {
        let ctx = KeymapContext::from_render_state(state);
        for group in keybindings_for_context(ctx) {
            spans.push(Span::styled(" │ ", sep_style));
            for (idx, binding) in group.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::styled(" • ", sep_style));
                }
                spans.push(Span::styled(binding.0, key_style));
                spans.push(Span::styled(format!(" {}", binding.1), desc_style));
            }
        }
    }

    if state.stale_guard {
        let badge = " GUARD ";
        let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let spacer = (width as usize)
            .saturating_sub(content_width)
            .saturating_sub(badge.len());
        if spacer > 0 {
            spans.push(Span::raw(" ".repeat(spacer)));
        }
        spans.push(Span::styled(
            badge,
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }

    Line::from(spans)
}
