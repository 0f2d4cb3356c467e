//! Fundraiser creation.
//!
//! Draft state, the prize icon catalog, the four-step wizard sequencer and
//! the submission gateway that sends a finished draft to the server.

pub mod draft;
pub mod icons;
pub mod payload;
pub mod submission;
pub mod wizard;

pub use draft::{CampaignDraft, DraftImage, ImageError, PrizeEntry, PrizeField};
pub use icons::{IconOption, ICON_CATALOG};
pub use submission::{failure_notice, submit_fundraising};
pub use wizard::{step_is_valid, StepSequencer, WizardStep};
