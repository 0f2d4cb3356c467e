//! Fundraiser draft state.
//!
//! A [`CampaignDraft`] is created fresh every time the creation wizard opens
//! and is mutated in place as the user edits fields. It is discarded when the
//! wizard closes or the fundraiser is created.

use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use crate::core::helpers::numeric_prefix;

/// Accepted layouts for the end date field (local time).
const END_DATE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Largest image accepted by the image step.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is not a supported image")]
    NotAnImage,

    #[error("Image exceeds {max} bytes")]
    TooLarge { max: usize },
}

/// Image attached to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftImage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DraftImage {
    /// Build an image from raw bytes, sniffing the format from the content.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ImageError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge { max: MAX_IMAGE_BYTES });
        }
        let format = image::guess_format(&bytes).map_err(|_| ImageError::NotAnImage)?;
        Ok(Self {
            file_name: file_name.into(),
            mime_type: format.to_mime_type(),
            bytes,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(file_name, bytes)
    }
}

/// Editable field of a prize entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrizeField {
    Description,
    Icon,
}

/// One prize. `rank` always mirrors the entry's position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeEntry {
    pub rank: u32,
    pub description: String,
    pub icon_id: String,
}

impl PrizeEntry {
    fn empty(rank: u32) -> Self {
        Self {
            rank,
            description: String::new(),
            icon_id: String::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.description.is_empty() && !self.icon_id.is_empty()
    }
}

/// In-progress fundraiser data.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDraft {
    pub host: String,
    pub title: String,
    pub description: String,
    pub image: Option<DraftImage>,
    pub participation_description: String,
    pub end_date: Option<DateTime<Utc>>,
    pub ticket_price: f64,
    prizes: Vec<PrizeEntry>,
    pub owner_email: String,
}

impl CampaignDraft {
    pub fn new(owner_email: impl Into<String>) -> Self {
        Self {
            host: String::new(),
            title: String::new(),
            description: String::new(),
            image: None,
            participation_description: String::new(),
            end_date: None,
            ticket_price: 0.0,
            prizes: vec![PrizeEntry::empty(1)],
            owner_email: owner_email.into(),
        }
    }

    pub fn prizes(&self) -> &[PrizeEntry] {
        &self.prizes
    }

    // ── Prize list editor ───────────────────────────────────────────────

    /// Set `field` on the prize at `index` and re-derive its rank.
    ///
    /// Indices outside the list are ignored; the editor only emits indices
    /// that exist.
    pub fn update_prize(&mut self, index: usize, field: PrizeField, value: impl Into<String>) {
        let Some(prize) = self.prizes.get_mut(index) else {
            log::warn!("Ignoring prize update for missing index {index}");
            return;
        };
        match field {
            PrizeField::Description => prize.description = value.into(),
            PrizeField::Icon => prize.icon_id = value.into(),
        }
        prize.rank = index as u32 + 1;
    }

    pub fn append_prize(&mut self) {
        let rank = self.prizes.len() as u32 + 1;
        self.prizes.push(PrizeEntry::empty(rank));
    }

    /// Drop the final prize. The list never shrinks below one entry.
    pub fn remove_last_prize(&mut self) {
        if self.prizes.len() > 1 {
            self.prizes.pop();
        }
    }

    // ── Field parsing ───────────────────────────────────────────────────

    /// Set the ticket price from raw input; any edit yields a price of at least 1.
    pub fn set_ticket_price(&mut self, raw: &str) {
        self.ticket_price = parse_ticket_price(raw);
    }

    /// Set the end date from raw local input, clearing it when unparseable.
    pub fn set_end_date(&mut self, raw: &str) {
        self.end_date = parse_end_date(raw);
    }

    /// `true` when an end date is set and lies strictly after `now`.
    pub fn end_date_is_future(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_some_and(|end| end > now)
    }
}

/// Parse the leading number of raw price input, at least 1.
pub fn parse_ticket_price(raw: &str) -> f64 {
    let parsed = numeric_prefix(raw, true)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    parsed.max(1.0)
}

/// Parse a local `YYYY-MM-DDTHH:MM` timestamp into an absolute instant.
pub fn parse_end_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let naive = END_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
