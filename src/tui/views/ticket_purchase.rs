//! Ticket purchase modal.
//!
//! Wraps a [`PurchaseDialog`] with a quantity field. The field always shows
//! the clamped quantity, so typing `15` displays `10`.

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::api::BuyTicketsRequest;
use crate::core::purchase::{PurchaseDialog, PurchaseOutcome, MAX_TICKETS, MIN_TICKETS};
use crate::tui::app::centered_rect;
use crate::tui::events::DialogSession;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

/// What the app should do after the modal saw a key.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseInput {
    Consumed,
    Submit(BuyTicketsRequest),
    Close,
}

pub struct TicketPurchaseView {
    session: DialogSession,
    dialog: PurchaseDialog,
    quantity: InputBuffer,
}

impl TicketPurchaseView {
    /// Wrap `dialog` and open it under `session`.
    pub fn open(session: DialogSession, mut dialog: PurchaseDialog) -> Self {
        dialog.open();
        let quantity = InputBuffer::with_text(dialog.order().quantity().to_string());
        Self {
            session,
            dialog,
            quantity,
        }
    }

    /// Open again under a new session at the current listing price.
    /// The lock resets; the quantity stays.
    pub fn reopen(&mut self, session: DialogSession, unit_price: f64) {
        self.session = session;
        self.dialog.set_unit_price(unit_price);
        self.dialog.open();
        self.sync_field();
    }

    pub fn session(&self) -> DialogSession {
        self.session
    }

    pub fn campaign_id(&self) -> &str {
        &self.dialog.campaign_id
    }

    pub fn dialog(&self) -> &PurchaseDialog {
        &self.dialog
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    pub fn close(&mut self) {
        self.dialog.close();
    }

    pub fn settle(&mut self, outcome: &PurchaseOutcome) {
        self.dialog.settle(outcome);
        self.sync_field();
    }

    fn sync_field(&mut self) {
        self.quantity
            .set_text(self.dialog.order().quantity().to_string());
    }

    pub fn handle_input(&mut self, event: &Event, balance: f64) -> PurchaseInput {
        let Event::Key(key) = event else {
            return PurchaseInput::Consumed;
        };
        if key.kind != KeyEventKind::Press {
            return PurchaseInput::Consumed;
        }

        match key.code {
            KeyCode::Esc => {
                self.dialog.close();
                PurchaseInput::Close
            }
            KeyCode::Enter => match self.dialog.begin_submit(balance) {
                Some(request) => PurchaseInput::Submit(request),
                None => PurchaseInput::Consumed,
            },
            _ if self.dialog.is_locked() => PurchaseInput::Consumed,
            KeyCode::Up | KeyCode::Char('+') => {
                self.dialog.order_mut().increment();
                self.sync_field();
                PurchaseInput::Consumed
            }
            KeyCode::Down | KeyCode::Char('-') => {
                self.dialog.order_mut().decrement();
                self.sync_field();
                PurchaseInput::Consumed
            }
            KeyCode::Char(c) if !c.is_ascii_digit() => PurchaseInput::Consumed,
            _ => {
                if self.quantity.handle_key(key) {
                    let raw = self.quantity.text().to_string();
                    self.dialog.order_mut().set_quantity(&raw);
                    self.sync_field();
                }
                PurchaseInput::Consumed
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, balance: f64) {
        let modal = centered_rect(50, 40, area);
        let block = theme::block_focused("Buy tickets").title_alignment(Alignment::Center);

        let can_buy = self.dialog.can_purchase(balance);
        let buy_label = if self.dialog.is_locked() {
            Span::styled("[ Buying... ]", theme::dim())
        } else if can_buy {
            Span::styled("[ Buy ]", theme::highlight())
        } else {
            Span::styled("[ Buy ]", theme::dim())
        };

        let mut quantity_spans = vec![Span::styled(
            format!(" Tickets ({MIN_TICKETS}-{MAX_TICKETS}): "),
            theme::muted(),
        )];
        quantity_spans.extend(
            self.quantity
                .render_line(!self.dialog.is_locked(), "1")
                .spans,
        );

        let mut lines = vec![
            Line::raw(""),
            Line::styled(format!(" {}", self.dialog.campaign_title), theme::title()),
            Line::raw(""),
            Line::from(quantity_spans),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" Unit price: ", theme::muted()),
                Span::raw(format!("{:.2}", self.dialog.order().unit_price)),
            ]),
            Line::from(vec![
                Span::styled(" Total: ", theme::muted()),
                Span::styled(format!("{:.2}", self.dialog.total_price()), theme::heading()),
            ]),
            Line::from(vec![
                Span::styled(" Balance: ", theme::muted()),
                Span::raw(format!("{balance:.2}")),
            ]),
            Line::raw(""),
            Line::from(vec![Span::raw(" "), buy_label]),
        ];

        if !can_buy && !self.dialog.is_locked() {
            lines.push(Line::styled(" Insufficient balance", Style::default().fg(theme::WARNING)));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" ↑/↓", theme::key_hint()),
            Span::raw(" quantity  "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(" buy  "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(" close"),
        ]));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}
