//! Wire types for the fundraising API.
//!
//! Field names follow the server's JSON exactly, including its spelling of
//! `paticipationdescription` and `DataOfBirth`.

use serde::{Deserialize, Serialize};

/// Body of `POST` create-fundraising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFundraisingPayload {
    pub hosted: String,
    pub title: String,
    pub description: String,
    /// `data:<mime>;base64,<...>` or null.
    pub image: Option<String>,
    #[serde(rename = "paticipationdescription")]
    pub participation_description: String,
    /// ISO-8601 UTC with milliseconds, or null.
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub price: f64,
    pub prizes: Vec<PrizePayload>,
    #[serde(rename = "userEmail")]
    pub user_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizePayload {
    pub place: u32,
    pub description: String,
    pub icon: String,
}

/// Body of `POST` buy-tickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyTicketsRequest {
    #[serde(rename = "ticketNumber")]
    pub quantity: u32,
    #[serde(rename = "lotteryId")]
    pub campaign_id: String,
    #[serde(rename = "email")]
    pub buyer_email: String,
    pub total_price: f64,
}

/// Body of the user upsert call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfilePayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub picture: String,
    #[serde(rename = "DataOfBirth")]
    pub date_of_birth: Option<String>,
    pub balance: f64,
}

/// User record returned by the upsert call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub picture: Option<String>,
    #[serde(rename = "DataOfBirth")]
    pub date_of_birth: Option<String>,
    pub balance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpsertUserResponse {
    #[serde(default)]
    pub user: Option<UserRecord>,
}

/// `{ message }` body used by both success and error responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// One fundraiser as returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundraiserSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub hosted: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub prizes: Vec<PrizePayload>,
}
