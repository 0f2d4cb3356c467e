//! Fundraiser creation wizard modal.
//!
//! Four steps: Details → Image → Participation → Prizes. Each step owns
//! its text fields; every edit is written straight into the
//! [`CampaignDraft`], and the forward control is only offered while the
//! active step validates against the current time.
//!
//! Keys: `Tab`/`Shift+Tab` cycle fields, `Ctrl+N` next step, `Ctrl+P`
//! previous step, `Ctrl+S` submit on the last step, `Esc` close.

use std::path::Path;

use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::campaign::icons::{icon_label, icon_position};
use crate::core::campaign::{
    step_is_valid, CampaignDraft, DraftImage, PrizeField, StepSequencer, WizardStep,
    ICON_CATALOG,
};
use crate::core::helpers::{validate_min_length, DEFAULT_MIN_LENGTH};
use crate::tui::app::centered_rect;
use crate::tui::events::DialogSession;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

const END_DATE_HINT: &str = "YYYY-MM-DD HH:MM";

/// What the app should do after the wizard saw a key.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardInput {
    Consumed,
    Submit(CampaignDraft),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailsField {
    Title,
    Host,
    Description,
    EndDate,
}

impl DetailsField {
    const ALL: [DetailsField; 4] = [
        DetailsField::Title,
        DetailsField::Host,
        DetailsField::Description,
        DetailsField::EndDate,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParticipationField {
    Description,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrizeColumn {
    Description,
    Icon,
}

pub struct CreateFundraisingView {
    session: DialogSession,
    draft: CampaignDraft,
    steps: StepSequencer,
    submitting: bool,

    // Details
    details: [InputBuffer; 4],
    details_focus: usize,

    // Image
    image_path: InputBuffer,
    image_error: Option<String>,

    // Participation
    participation: InputBuffer,
    price: InputBuffer,
    participation_focus: ParticipationField,

    // Prizes
    prize_descriptions: Vec<InputBuffer>,
    prize_row: usize,
    prize_column: PrizeColumn,
}

impl CreateFundraisingView {
    /// A fresh wizard with an empty draft owned by `owner_email`.
    pub fn new(session: DialogSession, owner_email: &str) -> Self {
        Self {
            session,
            draft: CampaignDraft::new(owner_email),
            steps: StepSequencer::new(),
            submitting: false,
            details: Default::default(),
            details_focus: 0,
            image_path: InputBuffer::new(),
            image_error: None,
            participation: InputBuffer::new(),
            price: InputBuffer::new(),
            participation_focus: ParticipationField::Description,
            prize_descriptions: vec![InputBuffer::new()],
            prize_row: 0,
            prize_column: PrizeColumn::Description,
        }
    }

    pub fn session(&self) -> DialogSession {
        self.session
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    pub fn active_step(&self) -> WizardStep {
        self.steps.active()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The server rejected the draft. Unlock and keep everything as typed.
    pub fn on_submit_failed(&mut self) {
        self.submitting = false;
    }

    /// Whether the forward control is offered on the active step.
    pub fn can_advance(&self, now: DateTime<Utc>) -> bool {
        let step = self.steps.active();
        if step.is_last() {
            return false;
        }
        if step == WizardStep::Image && self.draft.image.is_none() {
            return false;
        }
        step_is_valid(step, &self.draft, now)
    }

    pub fn can_submit(&self, now: DateTime<Utc>) -> bool {
        let step = self.steps.active();
        step.is_last() && !self.submitting && step_is_valid(step, &self.draft, now)
    }

    /// Attach the image at `path`. On failure the previous image is kept.
    pub fn attach_image(&mut self, path: &Path) {
        match DraftImage::from_path(path) {
            Ok(image) => {
                log::debug!("Attached {} ({})", image.file_name, image.mime_type);
                self.draft.image = Some(image);
                self.image_error = None;
            }
            Err(e) => {
                log::warn!("Rejected image {}: {e}", path.display());
                self.image_error = Some(e.to_string());
            }
        }
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, now: DateTime<Utc>) -> WizardInput {
        let Event::Key(key) = event else {
            return WizardInput::Consumed;
        };
        if key.kind != KeyEventKind::Press {
            return WizardInput::Consumed;
        }

        if key.code == KeyCode::Esc {
            return WizardInput::Close;
        }
        if self.submitting {
            return WizardInput::Consumed;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('n') => {
                    if self.can_advance(now) {
                        self.steps.next();
                    }
                    WizardInput::Consumed
                }
                KeyCode::Char('p') => {
                    self.steps.prev();
                    WizardInput::Consumed
                }
                KeyCode::Char('s') if self.can_submit(now) => {
                    self.submitting = true;
                    WizardInput::Submit(self.draft.clone())
                }
                KeyCode::Char('a') if self.steps.active() == WizardStep::Prizes => {
                    self.draft.append_prize();
                    self.prize_descriptions.push(InputBuffer::new());
                    WizardInput::Consumed
                }
                KeyCode::Char('d') if self.steps.active() == WizardStep::Prizes => {
                    self.remove_last_prize();
                    WizardInput::Consumed
                }
                _ => WizardInput::Consumed,
            };
        }

        match self.steps.active() {
            WizardStep::Details => self.handle_details_key(key),
            WizardStep::Image => self.handle_image_key(key),
            WizardStep::Participation => self.handle_participation_key(key),
            WizardStep::Prizes => self.handle_prizes_key(key),
        }
        WizardInput::Consumed
    }

    fn handle_details_key(&mut self, key: &KeyEvent) {
        let count = DetailsField::ALL.len();
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.details_focus = (self.details_focus + 1) % count,
            KeyCode::BackTab | KeyCode::Up => {
                self.details_focus = (self.details_focus + count - 1) % count
            }
            _ => {
                if self.details[self.details_focus].handle_key(key) {
                    let text = self.details[self.details_focus].text().to_string();
                    match DetailsField::ALL[self.details_focus] {
                        DetailsField::Title => self.draft.title = text,
                        DetailsField::Host => self.draft.host = text,
                        DetailsField::Description => self.draft.description = text,
                        DetailsField::EndDate => self.draft.set_end_date(&text),
                    }
                }
            }
        }
    }

    fn handle_image_key(&mut self, key: &KeyEvent) {
        if key.code == KeyCode::Enter {
            let raw = self.image_path.text().trim().to_string();
            if !raw.is_empty() {
                self.attach_image(Path::new(&raw));
            }
        } else {
            self.image_path.handle_key(key);
        }
    }

    fn handle_participation_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.participation_focus = match self.participation_focus {
                    ParticipationField::Description => ParticipationField::Price,
                    ParticipationField::Price => ParticipationField::Description,
                };
            }
            _ => match self.participation_focus {
                ParticipationField::Description => {
                    if self.participation.handle_key(key) {
                        self.draft.participation_description = self.participation.text().to_string();
                    }
                }
                ParticipationField::Price => {
                    if self.price.handle_key(key) {
                        self.draft.set_ticket_price(self.price.text());
                    }
                }
            },
        }
    }

    fn handle_prizes_key(&mut self, key: &KeyEvent) {
        let rows = self.draft.prizes().len();
        match (key.code, self.prize_column) {
            (KeyCode::Up, _) => self.prize_row = self.prize_row.saturating_sub(1),
            (KeyCode::Down, _) => self.prize_row = (self.prize_row + 1).min(rows - 1),
            (KeyCode::Tab | KeyCode::BackTab, PrizeColumn::Description) => {
                self.prize_column = PrizeColumn::Icon
            }
            (KeyCode::Tab | KeyCode::BackTab, PrizeColumn::Icon) => {
                self.prize_column = PrizeColumn::Description
            }
            (KeyCode::Left, PrizeColumn::Icon) => self.cycle_icon(false),
            (KeyCode::Right | KeyCode::Enter, PrizeColumn::Icon) => self.cycle_icon(true),
            (_, PrizeColumn::Description) => {
                let row = self.prize_row;
                if self.prize_descriptions[row].handle_key(key) {
                    let text = self.prize_descriptions[row].text().to_string();
                    self.draft.update_prize(row, PrizeField::Description, text);
                }
            }
            _ => {}
        }
    }

    fn cycle_icon(&mut self, forward: bool) {
        let len = ICON_CATALOG.len();
        let current = self
            .draft
            .prizes()
            .get(self.prize_row)
            .and_then(|p| icon_position(&p.icon_id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.draft
            .update_prize(self.prize_row, PrizeField::Icon, ICON_CATALOG[next].key);
    }

    fn remove_last_prize(&mut self) {
        self.draft.remove_last_prize();
        self.prize_descriptions
            .truncate(self.draft.prizes().len().max(1));
        self.prize_row = self.prize_row.min(self.prize_descriptions.len() - 1);
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, now: DateTime<Utc>) {
        let modal = centered_rect(70, 80, area);
        let step = self.steps.active();
        let title = format!(
            "Create fundraiser - {} ({}/{})",
            step.label(),
            step.index() + 1,
            WizardStep::ALL.len()
        );
        let block = theme::block_focused(&title).title_alignment(Alignment::Center);
        let inner = block.inner(modal);

        frame.render_widget(Clear, modal);
        frame.render_widget(block, modal);

        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).split(inner);

        let body = match step {
            WizardStep::Details => self.details_lines(now),
            WizardStep::Image => self.image_lines(),
            WizardStep::Participation => self.participation_lines(now),
            WizardStep::Prizes => self.prize_lines(),
        };
        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), chunks[0]);
        frame.render_widget(Paragraph::new(self.footer(now)), chunks[1]);
    }

    fn field(label: &str, input: &InputBuffer, focused: bool, placeholder: &str) -> Line<'static> {
        let label_style = if focused { theme::highlight() } else { theme::muted() };
        let mut spans = vec![Span::styled(format!(" {label:<14}"), label_style)];
        spans.extend(input.render_line(focused, placeholder).spans);
        Line::from(spans)
    }

    fn problem(text: &str) -> Line<'static> {
        Line::styled(format!("   {text}"), Style::default().fg(theme::WARNING))
    }

    fn details_lines(&self, now: DateTime<Utc>) -> Vec<Line<'static>> {
        let labels = ["Title", "Hosted by", "Description", "Ends"];
        let mut lines = vec![Line::raw("")];
        for (i, field) in DetailsField::ALL.iter().enumerate() {
            let placeholder = if *field == DetailsField::EndDate { END_DATE_HINT } else { "" };
            lines.push(Self::field(labels[i], &self.details[i], i == self.details_focus, placeholder));

            let text = self.details[i].text();
            match field {
                DetailsField::Title | DetailsField::Host if !text.is_empty() => {
                    if let Some(message) = validate_min_length(Some(text), DEFAULT_MIN_LENGTH) {
                        lines.push(Self::problem(&message));
                    }
                }
                DetailsField::EndDate if !text.is_empty() => {
                    if self.draft.end_date.is_none() {
                        lines.push(Self::problem(&format!("Use {END_DATE_HINT}")));
                    } else if !self.draft.end_date_is_future(now) {
                        lines.push(Self::problem("End date must be in the future"));
                    }
                }
                _ => {}
            }
        }
        lines
    }

    fn image_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::raw(""),
            Self::field("Image file", &self.image_path, true, "path/to/banner.png"),
            Line::styled("   Press Enter to attach", theme::dim()),
            Line::raw(""),
        ];
        match &self.draft.image {
            Some(image) => lines.push(Line::from(vec![
                Span::styled(" Attached: ", theme::muted()),
                Span::styled(
                    format!("{} ({}, {} bytes)", image.file_name, image.mime_type, image.bytes.len()),
                    Style::default().fg(theme::SUCCESS),
                ),
            ])),
            None => lines.push(Line::styled(" No image attached", theme::muted())),
        }
        if let Some(error) = &self.image_error {
            lines.push(Line::styled(format!(" {error}"), Style::default().fg(theme::ERROR)));
        }
        lines
    }

    fn participation_lines(&self, now: DateTime<Utc>) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::raw(""),
            Self::field(
                "How to enter",
                &self.participation,
                self.participation_focus == ParticipationField::Description,
                "",
            ),
            Self::field(
                "Ticket price",
                &self.price,
                self.participation_focus == ParticipationField::Price,
                "0",
            ),
            Line::from(vec![
                Span::styled("   Charged per ticket: ", theme::dim()),
                Span::raw(format!("{:.2}", self.draft.ticket_price)),
            ]),
        ];
        if !self.draft.end_date_is_future(now) {
            lines.push(Self::problem("End date has passed, go back and change it"));
        }
        lines
    }

    fn prize_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::raw("")];
        for (i, prize) in self.draft.prizes().iter().enumerate() {
            let row_selected = i == self.prize_row;
            let marker = if row_selected { "▸" } else { " " };
            let icon = icon_label(&prize.icon_id).unwrap_or("choose icon");
            let icon_focused = row_selected && self.prize_column == PrizeColumn::Icon;
            let icon_style = if icon_focused {
                theme::highlight()
            } else if prize.icon_id.is_empty() {
                theme::dim()
            } else {
                Style::default().fg(theme::TEXT)
            };

            let mut spans = vec![
                Span::styled(format!(" {marker} "), theme::highlight()),
                Span::styled(format!("#{:<3}", prize.rank), theme::heading()),
            ];
            spans.extend(
                self.prize_descriptions[i]
                    .render_line(
                        row_selected && self.prize_column == PrizeColumn::Description,
                        "Prize description",
                    )
                    .spans,
            );
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("‹ {icon} ›"), icon_style));
            lines.push(Line::from(spans));
        }
        lines
    }

    fn footer(&self, now: DateTime<Utc>) -> Vec<Line<'static>> {
        let mut hints = vec![];
        if self.steps.active() != WizardStep::Details {
            hints.push(Span::styled(" Ctrl+P", theme::key_hint()));
            hints.push(Span::raw(" back "));
        }
        if self.can_advance(now) {
            hints.push(Span::styled(" Ctrl+N", theme::key_hint()));
            hints.push(Span::raw(" next "));
        }
        if self.steps.active() == WizardStep::Prizes {
            hints.push(Span::styled(" Ctrl+A", theme::key_hint()));
            hints.push(Span::raw(" add prize "));
            hints.push(Span::styled(" Ctrl+D", theme::key_hint()));
            hints.push(Span::raw(" remove last "));
            hints.push(Span::styled(" ←/→", theme::key_hint()));
            hints.push(Span::raw(" icon "));
        }
        if self.submitting {
            hints.push(Span::styled(" Creating...", theme::dim()));
        } else if self.can_submit(now) {
            hints.push(Span::styled(" Ctrl+S", theme::key_hint()));
            hints.push(Span::raw(" create "));
        }
        hints.push(Span::styled(" Esc", theme::key_hint()));
        hints.push(Span::raw(" close"));

        vec![Line::raw(""), Line::from(hints)]
    }
}
