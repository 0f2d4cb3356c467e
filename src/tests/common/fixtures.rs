//! Test fixtures: identities, drafts and listing entries.

#![allow(dead_code)]

use chrono::{Duration, Utc};

use crate::api::{FundraiserSummary, PrizePayload};
use crate::auth::{StoredSession, UserInfo};
use crate::config::ApiConfig;
use crate::core::campaign::{CampaignDraft, PrizeField};

pub const OWNER_EMAIL: &str = "ada@example.com";
pub const ACCESS_TOKEN: &str = "test-token";

pub fn user_info() -> UserInfo {
    UserInfo {
        email: OWNER_EMAIL.to_string(),
        given_name: Some("Ada".to_string()),
        family_name: Some("Lovelace".to_string()),
        picture: Some("https://img.example.com/ada.png".to_string()),
        birthdate: None,
    }
}

pub fn stored_session() -> StoredSession {
    StoredSession {
        access_token: ACCESS_TOKEN.to_string(),
        expires_at: Some(Utc::now() + Duration::hours(1)),
        audience: None,
        user: user_info(),
    }
}

/// A draft that passes every wizard step except the image one.
pub fn complete_draft() -> CampaignDraft {
    let mut draft = CampaignDraft::new(OWNER_EMAIL);
    draft.host = "Lakeside School".to_string();
    draft.title = "Spring Raffle".to_string();
    draft.description = "New gym equipment".to_string();
    draft.participation_description = "Open to all parents".to_string();
    draft.set_ticket_price("5");
    draft.end_date = Some(Utc::now() + Duration::days(7));
    draft.update_prize(0, PrizeField::Description, "Mountain bike");
    draft.update_prize(0, PrizeField::Icon, "Bike");
    draft
}

pub fn fundraiser(id: &str, price: f64) -> FundraiserSummary {
    FundraiserSummary {
        id: id.to_string(),
        title: format!("Raffle {id}"),
        hosted: "Lakeside School".to_string(),
        description: "New gym equipment".to_string(),
        price,
        end_date: Some("2030-01-02T03:04:00.000Z".to_string()),
        prizes: vec![PrizePayload {
            place: 1,
            description: "Mountain bike".to_string(),
            icon: "Bike".to_string(),
        }],
    }
}

/// API config pointed at a mock server.
pub fn api_config(server_uri: &str) -> ApiConfig {
    ApiConfig {
        base_url: format!("{server_uri}/api"),
        timeout_secs: 5,
        ..ApiConfig::default()
    }
}
