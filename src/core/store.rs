//! Application state store.
//!
//! Single source of truth for the signed-in user's profile, balance,
//! purchase history and favourites. Views read it by reference; all writes
//! go through [`AppStore::dispatch`] from the event loop.

use crate::api::{BuyTicketsRequest, UserRecord};

use super::helpers::{is_member, toggle_membership};

/// A completed ticket purchase as recorded locally.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketPurchase {
    /// Fundraiser id.
    pub id: String,
    pub tickets: u32,
    pub total_price: f64,
}

impl From<&BuyTicketsRequest> for TicketPurchase {
    fn from(request: &BuyTicketsRequest) -> Self {
        Self {
            id: request.campaign_id.clone(),
            tickets: request.quantity,
            total_price: request.total_price,
        }
    }
}

/// Signed-in user details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub picture: Option<String>,
    pub date_of_birth: Option<String>,
    pub balance: f64,
    pub ticket_purchases: Vec<TicketPurchase>,
    pub favourites: Vec<String>,
}

/// Typed updates accepted by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Profile returned by the upsert call. `fallback_picture` is used when
    /// the server has none.
    ProfileLoaded {
        record: UserRecord,
        fallback_picture: Option<String>,
    },
    /// Optimistic local update after a successful purchase.
    ApplyPurchase(TicketPurchase),
    ToggleFavourite(String),
    /// Mark the fundraiser listing stale so it gets re-fetched.
    InvalidateListing,
    SignedOut,
}

#[derive(Debug, Default)]
pub struct AppStore {
    user: UserDetails,
    signed_in: bool,
    listing_generation: u64,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> &UserDetails {
        &self.user
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    pub fn balance(&self) -> f64 {
        self.user.balance
    }

    pub fn is_favourite(&self, id: &str) -> bool {
        is_member(&id.to_string(), &self.user.favourites)
    }

    /// Bumped on every [`StoreAction::InvalidateListing`].
    pub fn listing_generation(&self) -> u64 {
        self.listing_generation
    }

    pub fn dispatch(&mut self, action: StoreAction) {
        match action {
            StoreAction::ProfileLoaded {
                record,
                fallback_picture,
            } => {
                // Purchases and favourites are local state and survive a reload
                self.user.email = record.email;
                self.user.first_name = record.first_name;
                self.user.last_name = record.last_name;
                self.user.full_name = record.full_name;
                self.user.picture = record
                    .picture
                    .filter(|p| !p.is_empty())
                    .or(fallback_picture);
                self.user.date_of_birth = record.date_of_birth;
                self.user.balance = record.balance;
                self.signed_in = true;
                log::debug!("Profile loaded for {}", self.user.email);
            }
            StoreAction::ApplyPurchase(purchase) => {
                // TODO: use the server balance once buy-ticket responses include it
                self.user.balance -= purchase.total_price;
                self.user.ticket_purchases.push(purchase);
            }
            StoreAction::ToggleFavourite(id) => {
                self.user.favourites = toggle_membership(&id, &self.user.favourites);
            }
            StoreAction::InvalidateListing => {
                self.listing_generation += 1;
            }
            StoreAction::SignedOut => {
                self.user = UserDetails::default();
                self.signed_in = false;
            }
        }
    }
}
