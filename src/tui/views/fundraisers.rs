//! Fundraiser listing, the home screen.
//!
//! Shows every open fundraiser with host, ticket price and end date.
//! Favourites are highlighted from the store. The list is re-fetched
//! whenever the store's listing generation moves past the one loaded.

use chrono::{DateTime, Local};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::api::FundraiserSummary;
use crate::core::store::AppStore;
use crate::tui::events::Action;
use crate::tui::theme;

/// Render an ISO end date in local time, or the raw text if it doesn't parse.
pub fn format_end_date(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "no end date".to_string(),
    }
}

#[derive(Debug, Default)]
pub struct FundraisersState {
    fundraisers: Vec<FundraiserSummary>,
    selected: usize,
    /// Store generation the current list was fetched for.
    loaded_generation: Option<u64>,
    requested_generation: Option<u64>,
    loading: bool,
    error: Option<String>,
}

impl FundraisersState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch for `generation` should be started.
    pub fn needs_load(&self, generation: u64) -> bool {
        !self.loading && self.loaded_generation != Some(generation)
    }

    pub fn mark_loading(&mut self, generation: u64) {
        self.loading = true;
        self.requested_generation = Some(generation);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn on_loaded(&mut self, generation: u64, fundraisers: Vec<FundraiserSummary>) {
        self.fundraisers = fundraisers;
        self.loaded_generation = Some(generation);
        self.loading = false;
        self.error = None;
        self.selected = self.selected.min(self.fundraisers.len().saturating_sub(1));
    }

    /// Keep the old list on failure. The failed generation counts as
    /// loaded, so nothing is re-fetched until the generation moves again.
    pub fn on_failed(&mut self, message: String) {
        self.loading = false;
        self.loaded_generation = self.requested_generation;
        self.error = Some(message);
    }

    pub fn fundraisers(&self) -> &[FundraiserSummary] {
        &self.fundraisers
    }

    pub fn selected(&self) -> Option<&FundraiserSummary> {
        self.fundraisers.get(self.selected)
    }

    pub fn find(&self, id: &str) -> Option<&FundraiserSummary> {
        self.fundraisers.iter().find(|f| f.id == id)
    }

    fn select_next(&mut self) {
        if !self.fundraisers.is_empty() {
            self.selected = (self.selected + 1).min(self.fundraisers.len() - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Map a key to a list movement or an app action.
    pub fn handle_input(&mut self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        if modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Char('f') => self
                .selected()
                .map(|f| Action::ToggleFavourite(f.id.clone())),
            KeyCode::Enter | KeyCode::Char('b') => {
                self.selected().map(|f| Action::OpenPurchase(f.id.clone()))
            }
            KeyCode::Char('n') => Some(Action::OpenCreateWizard),
            KeyCode::Char('r') => Some(Action::RefreshListing),
            _ => None,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, store: &AppStore) {
        let block = theme::block_focused("Fundraisers");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        self.render_list(frame, chunks[0], store);
        self.render_detail(frame, chunks[1]);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, store: &AppStore) {
        let mut lines = Vec::new();

        if let Some(error) = &self.error {
            lines.push(Line::styled(format!(" {error}"), Style::default().fg(theme::ERROR)));
        }

        if self.fundraisers.is_empty() {
            let text = if self.loading {
                " Loading fundraisers..."
            } else {
                " No open fundraisers. Press n to create one."
            };
            lines.push(Line::styled(text, theme::muted()));
        }

        let favourites = &store.user().favourites;
        for (i, f) in self.fundraisers.iter().enumerate() {
            let is_selected = i == self.selected;
            let marker = if store.is_favourite(&f.id) { "★" } else { " " };
            let mut title_style = Style::default().fg(theme::favourite_color(&f.id, favourites));
            if is_selected {
                title_style = title_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            lines.push(Line::from(vec![
                Span::styled(if is_selected { "▸ " } else { "  " }, theme::highlight()),
                Span::styled(format!("{marker} "), Style::default().fg(theme::ACCENT)),
                Span::styled(f.title.clone(), title_style),
                Span::styled(format!("  {:.2}", f.price), theme::muted()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Details");
        let Some(f) = self.selected() else {
            frame.render_widget(block, area);
            return;
        };

        let mut lines = vec![
            Line::styled(f.title.clone(), theme::title()),
            Line::from(vec![
                Span::styled("Hosted by ", theme::muted()),
                Span::raw(f.hosted.clone()),
            ]),
            Line::from(vec![
                Span::styled("Ticket price ", theme::muted()),
                Span::raw(format!("{:.2}", f.price)),
            ]),
            Line::from(vec![
                Span::styled("Ends ", theme::muted()),
                Span::raw(format_end_date(f.end_date.as_deref())),
            ]),
            Line::raw(""),
            Line::raw(f.description.clone()),
        ];

        if !f.prizes.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled("Prizes", theme::heading()));
            for prize in &f.prizes {
                lines.push(Line::raw(format!(
                    "  {}. {} ({})",
                    prize.place, prize.description, prize.icon
                )));
            }
        }

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}
