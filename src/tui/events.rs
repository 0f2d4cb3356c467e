use crate::api::{BuyTicketsRequest, FundraiserSummary};
use crate::core::profile::RegisteredProfile;
use crate::core::purchase::PurchaseOutcome;

/// Identifies one opening of a dialog. Completions carrying an older id
/// belong to a dialog that has since been closed or reopened.
pub type DialogSession = u64;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Profile upsert finished.
    ProfileLoaded(RegisteredProfile),
    ProfileFailed(String),
    /// Fundraiser listing fetched for the given store generation.
    ListingLoaded {
        generation: u64,
        fundraisers: Vec<FundraiserSummary>,
    },
    ListingFailed(String),
    /// Create-fundraising call succeeded with the server's message.
    CampaignCreated {
        session: DialogSession,
        message: String,
    },
    CampaignFailed {
        session: DialogSession,
        notice: String,
    },
    /// Buy-tickets call finished.
    PurchaseSettled {
        session: DialogSession,
        request: BuyTicketsRequest,
        outcome: PurchaseOutcome,
    },
    /// The stored session was removed.
    SignedOut,
    SignOutFailed(String),
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenCreateWizard,
    CloseCreateWizard,
    /// Open the purchase dialog for a fundraiser id.
    OpenPurchase(String),
    ClosePurchase,
    ToggleFavourite(String),
    RefreshListing,
    SignOut,
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
    /// How many times this message was raised while on screen.
    pub repeats: u32,
}
