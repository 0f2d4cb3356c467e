use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::core::purchase::PurchaseDialog;
use crate::core::store::{AppStore, StoreAction, TicketPurchase};

use super::events::{Action, AppEvent, DialogSession, Notification, NotificationLevel};
use super::services::Services;
use super::theme;
use super::views::create_fundraising::{CreateFundraisingView, WizardInput};
use super::views::fundraisers::FundraisersState;
use super::views::ticket_purchase::{PurchaseInput, TicketPurchaseView};

const MAX_NOTIFICATIONS: usize = 3;
const NOTIFICATION_TTL_TICKS: u32 = 100;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    store: AppStore,
    fundraisers: FundraisersState,
    /// Creation wizard (Some while open).
    wizard: Option<CreateFundraisingView>,
    /// Last purchase dialog. Kept after closing so reopening the same
    /// fundraiser remembers the quantity.
    purchase: Option<TicketPurchaseView>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Monotonic counter for dialog sessions.
    session_counter: DialogSession,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        Self {
            running: true,
            store: AppStore::new(),
            fundraisers: FundraisersState::new(),
            wizard: None,
            purchase: None,
            notifications: Vec::new(),
            notification_counter: 0,
            session_counter: 0,
            show_help: false,
            event_rx,
            services,
        }
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.services.spawn_profile_registration();

        while self.running {
            self.sync_listing();

            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    /// Start a listing fetch when the store has invalidated the loaded one.
    fn sync_listing(&mut self) {
        let generation = self.store.listing_generation();
        if self.fundraisers.needs_load(generation) {
            self.fundraisers.mark_loading(generation);
            self.services.spawn_listing(generation);
        }
    }

    fn next_session(&mut self) -> DialogSession {
        self.session_counter += 1;
        self.session_counter
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(input) => self.handle_input(&input),
            AppEvent::ProfileLoaded(profile) => {
                let email = profile.record.email.clone();
                self.store.dispatch(StoreAction::ProfileLoaded {
                    record: profile.record,
                    fallback_picture: profile.fallback_picture,
                });
                self.push_notification(format!("Signed in as {email}"), NotificationLevel::Info);
            }
            AppEvent::ProfileFailed(message) => {
                self.push_notification(
                    format!("Profile not loaded: {message}"),
                    NotificationLevel::Warning,
                );
            }
            AppEvent::ListingLoaded {
                generation,
                fundraisers,
            } => {
                // A stale generation still shows; sync_listing re-fetches
                self.fundraisers.on_loaded(generation, fundraisers);
            }
            AppEvent::ListingFailed(message) => {
                self.push_notification(message.clone(), NotificationLevel::Error);
                self.fundraisers.on_failed(message);
            }
            AppEvent::CampaignCreated { session, message } => {
                self.push_notification(message, NotificationLevel::Success);
                self.store.dispatch(StoreAction::InvalidateListing);
                if self.wizard.as_ref().is_some_and(|w| w.session() == session) {
                    self.wizard = None;
                }
            }
            AppEvent::CampaignFailed { session, notice } => {
                self.push_notification(notice, NotificationLevel::Error);
                if let Some(wizard) = self.wizard.as_mut().filter(|w| w.session() == session) {
                    wizard.on_submit_failed();
                }
            }
            AppEvent::PurchaseSettled {
                session,
                request,
                outcome,
            } => {
                let level = if outcome.is_success() {
                    NotificationLevel::Success
                } else {
                    NotificationLevel::Error
                };
                self.push_notification(outcome.notice().to_string(), level);

                // The server-side change happened either way
                if outcome.is_success() {
                    self.store
                        .dispatch(StoreAction::ApplyPurchase(TicketPurchase::from(&request)));
                }

                match self.purchase.as_mut() {
                    Some(view) if view.session() == session => view.settle(&outcome),
                    _ => log::debug!("Dropping dialog effects of stale purchase session {session}"),
                }
            }
            AppEvent::SignedOut => {
                self.store.dispatch(StoreAction::SignedOut);
                self.wizard = None;
                self.purchase = None;
                self.push_notification("Signed out".to_string(), NotificationLevel::Info);
            }
            AppEvent::SignOutFailed(message) => {
                self.push_notification(
                    format!("Sign out failed: {message}"),
                    NotificationLevel::Error,
                );
            }
        }
    }

    fn purchase_open(&self) -> bool {
        self.purchase.as_ref().is_some_and(|p| p.is_open())
    }

    fn handle_input(&mut self, event: &Event) {
        // Priority 1: Creation wizard
        if let Some(wizard) = self.wizard.as_mut() {
            match wizard.handle_input(event, Utc::now()) {
                WizardInput::Consumed => {}
                WizardInput::Submit(draft) => {
                    let session = wizard.session();
                    self.services.spawn_create_fundraising(session, draft);
                }
                WizardInput::Close => self.handle_action(Action::CloseCreateWizard),
            }
            return;
        }

        // Priority 2: Purchase dialog
        if self.purchase_open() {
            let balance = self.store.balance();
            if let Some(view) = self.purchase.as_mut() {
                match view.handle_input(event, balance) {
                    PurchaseInput::Consumed => {}
                    PurchaseInput::Submit(request) => {
                        let session = view.session();
                        self.services.spawn_purchase(session, request);
                    }
                    PurchaseInput::Close => self.handle_action(Action::ClosePurchase),
                }
            }
            return;
        }

        // Priority 3: Help modal
        if self.show_help {
            if let Some(action) = self.map_help_input(event) {
                self.handle_action(action);
            }
            return;
        }

        // Priority 4: Global keybindings, then the listing
        if let Some(action) = self.map_input_to_action(event) {
            self.handle_action(action);
            return;
        }
        if let Some(action) = self.fundraisers.handle_input(event) {
            self.handle_action(action);
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('q')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                Some(Action::ShowHelp)
            }
            (KeyModifiers::NONE, KeyCode::Char('x')) => Some(Action::SignOut),
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::RefreshListing => self.store.dispatch(StoreAction::InvalidateListing),
            Action::SignOut => {
                if self.store.is_signed_in() {
                    self.services.spawn_sign_out();
                } else {
                    self.push_notification(
                        "Not signed in".to_string(),
                        NotificationLevel::Warning,
                    );
                }
            }
            Action::ToggleFavourite(id) => self.store.dispatch(StoreAction::ToggleFavourite(id)),
            Action::OpenCreateWizard => {
                if !self.store.is_signed_in() {
                    self.push_notification(
                        "Sign in to create a fundraiser".to_string(),
                        NotificationLevel::Warning,
                    );
                    return;
                }
                let session = self.next_session();
                let email = self.store.user().email.clone();
                self.wizard = Some(CreateFundraisingView::new(session, &email));
            }
            Action::CloseCreateWizard => self.wizard = None,
            Action::OpenPurchase(id) => self.open_purchase(&id),
            Action::ClosePurchase => {
                if let Some(view) = self.purchase.as_mut() {
                    view.close();
                }
            }
        }
    }

    fn open_purchase(&mut self, id: &str) {
        if !self.store.is_signed_in() {
            self.push_notification(
                "Sign in to buy tickets".to_string(),
                NotificationLevel::Warning,
            );
            return;
        }
        let Some(fundraiser) = self.fundraisers.find(id) else {
            log::warn!("Purchase requested for unknown fundraiser {id}");
            return;
        };
        let dialog = PurchaseDialog::new(
            fundraiser.id.clone(),
            fundraiser.title.clone(),
            self.store.user().email.clone(),
            fundraiser.price,
        );

        let session = self.next_session();
        if let Some(view) = self.purchase.as_mut().filter(|v| v.campaign_id() == id) {
            view.reopen(session, dialog.order().unit_price);
            return;
        }
        self.purchase = Some(TicketPurchaseView::open(session, dialog));
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Show a notification. A repeat of one still on screen is counted
    /// and moved to the newest slot with a fresh TTL.
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if let Some(pos) = self
            .notifications
            .iter()
            .position(|n| n.message == message && n.level == level)
        {
            let mut repeated = self.notifications.remove(pos);
            repeated.repeats += 1;
            repeated.ttl_ticks = NOTIFICATION_TTL_TICKS;
            self.notifications.push(repeated);
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL_TICKS,
            repeats: 1,
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let now = Utc::now();

        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

        self.fundraisers.render(frame, chunks[0], &self.store);
        self.render_status_bar(frame, chunks[1]);

        // Overlays
        if let Some(view) = self.purchase.as_ref().filter(|p| p.is_open()) {
            view.render(frame, area, self.store.balance());
        }
        if let Some(wizard) = &self.wizard {
            wizard.render(frame, area, now);
        }
        if self.show_help {
            self.render_help_modal(frame, area);
        }
        self.render_notifications(frame, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let user = if self.store.is_signed_in() {
            let details = self.store.user();
            let name = if details.full_name.is_empty() {
                &details.email
            } else {
                &details.full_name
            };
            vec![
                Span::styled(name.clone(), Style::default().fg(theme::PRIMARY_LIGHT).bold()),
                Span::raw(" │ "),
                Span::styled("Balance:", theme::muted()),
                Span::raw(format!(" {:.2}", self.store.balance())),
                Span::raw(" │ "),
                Span::styled("Tickets:", theme::muted()),
                Span::raw(format!(" {}", self.store.user().ticket_purchases.len())),
            ]
        } else {
            vec![Span::styled("not signed in", theme::muted())]
        };

        let loading = if self.fundraisers.is_loading() {
            Span::styled(" loading", theme::dim())
        } else {
            Span::raw("")
        };

        let mut spans = vec![Span::styled(" FUNDRAFFLE ", theme::brand_badge()), Span::raw(" ")];
        spans.extend(user);
        spans.push(loading);
        spans.extend([
            Span::raw(" │ "),
            Span::styled("n", theme::key_hint()),
            Span::raw(":new "),
            Span::styled("b", theme::key_hint()),
            Span::raw(":buy "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("x", theme::key_hint()),
            Span::raw(":sign out "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 60.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height.min(area.height));

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                let mut spans = vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).bold()),
                    Span::raw(&n.message),
                ];
                if n.repeats > 1 {
                    spans.push(Span::styled(
                        format!(" (x{})", n.repeats),
                        Style::default().fg(theme::TEXT_MUTED),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle this help"),
            ("", ""),
            ("Fundraisers:", ""),
            ("j/k", "Move selection"),
            ("f", "Toggle favourite"),
            ("Enter / b", "Buy tickets"),
            ("n", "Create a fundraiser"),
            ("r", "Refresh the list"),
            ("x", "Sign out"),
            ("", ""),
            ("Create fundraiser:", ""),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Ctrl+N / Ctrl+P", "Next / previous step"),
            ("Enter", "Attach image (image step)"),
            ("Ctrl+A / Ctrl+D", "Add / remove last prize"),
            ("←/→", "Pick prize icon"),
            ("Ctrl+S", "Create (last step)"),
            ("Esc", "Close"),
            ("", ""),
            ("Buy tickets:", ""),
            ("↑/↓ or digits", "Quantity (1-10)"),
            ("Enter", "Buy"),
            ("Esc", "Close"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).bold(),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::{BuyTicketsRequest, FundraiserSummary, MockFundraisingApi, UserRecord};
    use crate::auth::{MockIdentityProvider, TokenOptions};
    use crate::core::profile::RegisteredProfile;
    use crate::core::purchase::PurchaseOutcome;

    fn app() -> AppState {
        let (tx, rx) = mpsc::unbounded_channel();
        let services = Services::new(
            Arc::new(MockFundraisingApi::new()),
            Arc::new(MockIdentityProvider::new()),
            TokenOptions::default(),
            tx,
        );
        AppState::new(rx, services)
    }

    fn signed_in_app(balance: f64) -> AppState {
        let mut app = app();
        app.handle_event(AppEvent::ProfileLoaded(RegisteredProfile {
            record: UserRecord {
                email: "ada@example.com".into(),
                balance,
                ..Default::default()
            },
            fallback_picture: None,
        }));
        app.handle_event(AppEvent::ListingLoaded {
            generation: 0,
            fundraisers: vec![FundraiserSummary {
                id: "c1".into(),
                title: "Spring Raffle".into(),
                price: 10.0,
                ..Default::default()
            }],
        });
        app
    }

    fn request(quantity: u32) -> BuyTicketsRequest {
        BuyTicketsRequest {
            quantity,
            campaign_id: "c1".into(),
            buyer_email: "ada@example.com".into(),
            total_price: quantity as f64 * 10.0,
        }
    }

    #[test]
    fn test_wizard_requires_sign_in() {
        let mut app = app();
        app.handle_action(Action::OpenCreateWizard);
        assert!(app.wizard.is_none());
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].level, NotificationLevel::Warning);
    }

    #[test]
    fn test_campaign_created_closes_matching_wizard_and_invalidates() {
        let mut app = signed_in_app(100.0);
        app.handle_action(Action::OpenCreateWizard);
        let session = app.wizard.as_ref().map(|w| w.session()).unwrap();
        let generation = app.store().listing_generation();

        app.handle_event(AppEvent::CampaignCreated {
            session,
            message: "Lottery created".into(),
        });
        assert!(app.wizard.is_none());
        assert_eq!(app.store().listing_generation(), generation + 1);
        assert_eq!(app.notifications.last().map(|n| n.level), Some(NotificationLevel::Success));
    }

    #[test]
    fn test_stale_campaign_completion_leaves_new_wizard_open() {
        let mut app = signed_in_app(100.0);
        app.handle_action(Action::OpenCreateWizard);
        let stale = app.wizard.as_ref().map(|w| w.session()).unwrap();
        app.handle_action(Action::CloseCreateWizard);
        app.handle_action(Action::OpenCreateWizard);

        app.handle_event(AppEvent::CampaignCreated {
            session: stale,
            message: "Lottery created".into(),
        });
        assert!(app.wizard.is_some());
    }

    #[test]
    fn test_campaign_failure_keeps_wizard() {
        let mut app = signed_in_app(100.0);
        app.handle_action(Action::OpenCreateWizard);
        let session = app.wizard.as_ref().map(|w| w.session()).unwrap();

        app.handle_event(AppEvent::CampaignFailed {
            session,
            notice: "Error creating lottery: Title already used".into(),
        });
        assert!(app.wizard.is_some());
        assert_eq!(
            app.notifications.last().map(|n| n.message.as_str()),
            Some("Error creating lottery: Title already used")
        );
    }

    #[test]
    fn test_purchase_success_updates_store_and_closes() {
        let mut app = signed_in_app(100.0);
        app.handle_action(Action::OpenPurchase("c1".into()));
        let session = app.purchase.as_ref().map(|p| p.session()).unwrap();

        app.handle_event(AppEvent::PurchaseSettled {
            session,
            request: request(3),
            outcome: PurchaseOutcome::Purchased,
        });
        assert_eq!(app.store().balance(), 70.0);
        assert_eq!(app.store().user().ticket_purchases.len(), 1);
        assert!(!app.purchase_open());
    }

    #[test]
    fn test_stale_purchase_does_not_touch_reopened_dialog() {
        let mut app = signed_in_app(100.0);
        app.handle_action(Action::OpenPurchase("c1".into()));
        let stale = app.purchase.as_ref().map(|p| p.session()).unwrap();
        app.handle_action(Action::ClosePurchase);
        app.handle_action(Action::OpenPurchase("c1".into()));

        app.handle_event(AppEvent::PurchaseSettled {
            session: stale,
            request: request(2),
            outcome: PurchaseOutcome::Purchased,
        });
        // Store effects still apply, the reopened dialog stays open
        assert_eq!(app.store().balance(), 80.0);
        assert!(app.purchase_open());
    }

    #[test]
    fn test_purchase_failure_leaves_balance() {
        let mut app = signed_in_app(100.0);
        app.handle_action(Action::OpenPurchase("c1".into()));
        let session = app.purchase.as_ref().map(|p| p.session()).unwrap();

        app.handle_event(AppEvent::PurchaseSettled {
            session,
            request: request(2),
            outcome: PurchaseOutcome::Failed {
                message: "Insufficient funds".into(),
            },
        });
        assert_eq!(app.store().balance(), 100.0);
        assert!(!app.purchase_open());
        assert_eq!(
            app.notifications.last().map(|n| n.message.as_str()),
            Some("Insufficient funds")
        );
    }

    #[test]
    fn test_reopen_uses_refreshed_listing_price() {
        let mut app = signed_in_app(100.0);
        app.handle_action(Action::OpenPurchase("c1".into()));
        app.handle_action(Action::ClosePurchase);

        app.handle_event(AppEvent::ListingLoaded {
            generation: 0,
            fundraisers: vec![FundraiserSummary {
                id: "c1".into(),
                title: "Spring Raffle".into(),
                price: 20.0,
                ..Default::default()
            }],
        });
        app.handle_action(Action::OpenPurchase("c1".into()));

        let dialog = app.purchase.as_ref().map(|p| p.dialog()).unwrap();
        assert_eq!(dialog.order().unit_price, 20.0);
        assert_eq!(dialog.total_price(), 20.0);
    }

    #[test]
    fn test_signed_out_resets_store_and_closes_dialogs() {
        let mut app = signed_in_app(100.0);
        app.handle_action(Action::OpenPurchase("c1".into()));
        assert!(app.purchase_open());

        app.handle_event(AppEvent::SignedOut);
        assert!(!app.store().is_signed_in());
        assert!(app.purchase.is_none());
        assert!(app.wizard.is_none());
        assert_eq!(
            app.notifications.last().map(|n| n.message.as_str()),
            Some("Signed out")
        );
    }

    #[test]
    fn test_sign_out_key_without_session_warns() {
        let mut app = app();
        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        app.handle_event(AppEvent::Input(key));
        assert_eq!(
            app.notifications.last().map(|n| (n.message.as_str(), n.level)),
            Some(("Not signed in", NotificationLevel::Warning))
        );
    }

    #[test]
    fn test_sign_out_failure_is_reported() {
        let mut app = signed_in_app(100.0);
        app.handle_event(AppEvent::SignOutFailed("keyring locked".into()));
        assert!(app.store().is_signed_in());
        assert_eq!(app.notifications.last().map(|n| n.level), Some(NotificationLevel::Error));
    }

    #[test]
    fn test_notifications_dedupe_and_cap() {
        let mut app = app();
        app.push_notification("one".into(), NotificationLevel::Info);
        app.push_notification("one".into(), NotificationLevel::Info);
        assert_eq!(app.notifications.len(), 1);
        for msg in ["two", "three", "four"] {
            app.push_notification(msg.into(), NotificationLevel::Info);
        }
        assert_eq!(app.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(app.notifications[0].message, "two");
    }

    #[test]
    fn test_repeated_notification_is_counted_and_refreshed() {
        let mut app = app();
        app.push_notification("Purchased".into(), NotificationLevel::Success);
        app.push_notification("other".into(), NotificationLevel::Info);
        for _ in 0..10 {
            app.on_tick();
        }

        app.push_notification("Purchased".into(), NotificationLevel::Success);
        assert_eq!(app.notifications.len(), 2);
        let last = app.notifications.last().unwrap();
        assert_eq!(last.message, "Purchased");
        assert_eq!(last.repeats, 2);
        assert_eq!(last.ttl_ticks, NOTIFICATION_TTL_TICKS);
    }

    #[test]
    fn test_tick_expires_notifications() {
        let mut app = app();
        app.push_notification("bye".into(), NotificationLevel::Info);
        for _ in 0..NOTIFICATION_TTL_TICKS {
            app.on_tick();
        }
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_refresh_and_favourite_actions_hit_store() {
        let mut app = app();
        app.handle_action(Action::RefreshListing);
        assert_eq!(app.store().listing_generation(), 1);
        app.handle_action(Action::ToggleFavourite("c1".into()));
        assert!(app.store().is_favourite("c1"));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(50, 50, area);
        assert!(centered.x > 0);
        assert!(centered.y > 0);
        assert!(centered.x + centered.width <= area.width);
        assert!(centered.y + centered.height <= area.height);
    }
}
