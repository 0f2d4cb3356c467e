//! Ticket purchase flow.
//!
//! A [`PurchaseDialog`] moves `Idle → Submitting → (Purchased | Failed)`.
//! Submitting locks the buy control; either outcome closes the dialog.
//! Reopening resets the lock but keeps the last quantity.

use std::num::IntErrorKind;

use crate::api::{ApiError, BuyTicketsRequest, FundraisingApi};
use crate::auth::{IdentityProvider, TokenOptions};
use crate::core::helpers::numeric_prefix;

pub const MIN_TICKETS: u32 = 1;
pub const MAX_TICKETS: u32 = 10;

pub const PURCHASE_SUCCESS_MESSAGE: &str = "You have purchased your ticket successfully";

/// Parse the leading integer of raw quantity input, clamped to `[1, 10]`.
/// Input without one yields 1.
pub fn parse_quantity(raw: &str) -> u32 {
    match numeric_prefix(raw, false).parse::<i64>() {
        Ok(n) => n.clamp(MIN_TICKETS as i64, MAX_TICKETS as i64) as u32,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_TICKETS,
        Err(_) => MIN_TICKETS,
    }
}

/// Quantity and unit price. The total is always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchaseOrder {
    quantity: u32,
    pub unit_price: f64,
}

impl PurchaseOrder {
    pub fn new(unit_price: f64) -> Self {
        Self {
            quantity: MIN_TICKETS,
            unit_price,
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, raw: &str) {
        self.quantity = parse_quantity(raw);
    }

    pub fn increment(&mut self) {
        self.quantity = (self.quantity + 1).min(MAX_TICKETS);
    }

    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(MIN_TICKETS);
    }

    pub fn total_price(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchasePhase {
    Idle,
    Submitting,
    Purchased,
    Failed,
}

/// Result of a purchase call, reduced to what the UI needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased,
    Failed { message: String },
}

impl PurchaseOutcome {
    pub fn from_result(result: &Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => Self::Purchased,
            Err(e) => Self::Failed {
                message: e.user_message(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Purchased)
    }

    /// Text for the notification overlay.
    pub fn notice(&self) -> &str {
        match self {
            Self::Purchased => PURCHASE_SUCCESS_MESSAGE,
            Self::Failed { message } => message,
        }
    }
}

/// State of the purchase dialog for one fundraiser.
#[derive(Debug, Clone)]
pub struct PurchaseDialog {
    pub campaign_id: String,
    pub campaign_title: String,
    pub buyer_email: String,
    order: PurchaseOrder,
    phase: PurchasePhase,
    open: bool,
}

impl PurchaseDialog {
    pub fn new(
        campaign_id: impl Into<String>,
        campaign_title: impl Into<String>,
        buyer_email: impl Into<String>,
        unit_price: f64,
    ) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            campaign_title: campaign_title.into(),
            buyer_email: buyer_email.into(),
            order: PurchaseOrder::new(unit_price),
            phase: PurchasePhase::Idle,
            open: false,
        }
    }

    /// Show the dialog. Only the lock is reset; the quantity is kept.
    pub fn open(&mut self) {
        self.open = true;
        self.phase = PurchasePhase::Idle;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phase(&self) -> PurchasePhase {
        self.phase
    }

    pub fn order(&self) -> &PurchaseOrder {
        &self.order
    }

    pub fn order_mut(&mut self) -> &mut PurchaseOrder {
        &mut self.order
    }

    /// Reprice the kept order against the latest listing.
    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.order.unit_price = unit_price;
    }

    pub fn total_price(&self) -> f64 {
        self.order.total_price()
    }

    pub fn is_locked(&self) -> bool {
        self.phase == PurchasePhase::Submitting
    }

    pub fn can_purchase(&self, balance: f64) -> bool {
        !self.is_locked() && self.total_price() <= balance
    }

    /// Lock the dialog and build the request, if buying is currently allowed.
    pub fn begin_submit(&mut self, balance: f64) -> Option<BuyTicketsRequest> {
        if !self.can_purchase(balance) {
            return None;
        }
        self.phase = PurchasePhase::Submitting;
        Some(BuyTicketsRequest {
            quantity: self.order.quantity(),
            campaign_id: self.campaign_id.clone(),
            buyer_email: self.buyer_email.clone(),
            total_price: self.total_price(),
        })
    }

    /// Apply the outcome of the in-flight purchase. Always closes the dialog.
    pub fn settle(&mut self, outcome: &PurchaseOutcome) {
        match outcome {
            PurchaseOutcome::Purchased => {
                self.phase = PurchasePhase::Purchased;
                self.order = PurchaseOrder::new(self.order.unit_price);
            }
            PurchaseOutcome::Failed { .. } => self.phase = PurchasePhase::Failed,
        }
        self.open = false;
    }
}

/// Send one purchase request with a freshly obtained token.
pub async fn purchase_tickets(
    api: &dyn FundraisingApi,
    identity: &dyn IdentityProvider,
    options: &TokenOptions,
    request: &BuyTicketsRequest,
) -> Result<(), ApiError> {
    let token = identity.access_token(options).await?;
    match api.buy_tickets(request, &token).await {
        Ok(()) => {
            log::info!(
                "Purchased {} ticket(s) for {} ({:.2})",
                request.quantity,
                request.campaign_id,
                request.total_price
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Ticket purchase for {} failed: {e:?}", request.campaign_id);
            Err(e)
        }
    }
}
