//! Fundraising REST API.
//!
//! [`FundraisingApi`] is the seam between the client's flows and the
//! server. Callers pass a freshly obtained access token to every
//! authenticated call.

pub mod client;
pub mod error;
pub mod types;

pub use client::HttpFundraisingApi;
pub use error::{ApiError, Result, UNEXPECTED_RESPONSE};
pub use types::{
    BuyTicketsRequest, CreateFundraisingPayload, FundraiserSummary, PrizePayload,
    UserProfilePayload, UserRecord,
};

use async_trait::async_trait;

/// Operations offered by the fundraising server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundraisingApi: Send + Sync {
    /// Create a fundraiser. Returns the server's confirmation message.
    async fn create_fundraising(
        &self,
        payload: &CreateFundraisingPayload,
        token: &str,
    ) -> Result<String>;

    /// Buy tickets for a fundraiser.
    async fn buy_tickets(&self, request: &BuyTicketsRequest, token: &str) -> Result<()>;

    /// Create or update the signed-in user's profile.
    async fn upsert_user(
        &self,
        profile: &UserProfilePayload,
        token: &str,
    ) -> Result<Option<UserRecord>>;

    /// All open fundraisers.
    async fn list_fundraisings(&self) -> Result<Vec<FundraiserSummary>>;
}
