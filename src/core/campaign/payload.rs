//! Draft → create-fundraising request body.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};

use super::draft::{CampaignDraft, DraftImage};
use crate::api::{CreateFundraisingPayload, PrizePayload};

/// Absolute UTC timestamp with millisecond precision, e.g. `2030-01-02T03:04:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Inline the image as a `data:` URL.
pub fn image_data_url(image: &DraftImage) -> String {
    format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.bytes))
}

impl From<&CampaignDraft> for CreateFundraisingPayload {
    fn from(draft: &CampaignDraft) -> Self {
        Self {
            hosted: draft.host.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            image: draft.image.as_ref().map(image_data_url),
            participation_description: draft.participation_description.clone(),
            end_date: draft.end_date.map(iso_timestamp),
            price: draft.ticket_price,
            prizes: draft
                .prizes()
                .iter()
                .map(|p| PrizePayload {
                    place: p.rank,
                    description: p.description.clone(),
                    icon: p.icon_id.clone(),
                })
                .collect(),
            user_email: draft.owner_email.clone(),
        }
    }
}
