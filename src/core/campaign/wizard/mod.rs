//! Step sequencer for fundraiser creation.
//!
//! The wizard walks through four steps:
//! 1. Details - host, title, description, draw date
//! 2. Image - attach the fundraiser image
//! 3. Participation - participation description and ticket price
//! 4. Prizes - ranked prize list
//!
//! Movement is one step at a time and clamped to the ends. Whether the
//! forward control is offered is decided by [`step_is_valid`], which must be
//! evaluated against the current draft and clock on every render.

mod types;

pub use types::*;

use chrono::{DateTime, Utc};

use super::draft::CampaignDraft;

/// Tracks the active wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepSequencer {
    active: WizardStep,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> WizardStep {
        self.active
    }

    pub fn next(&mut self) {
        self.active = WizardStep::from_index(self.active.index() + 1);
    }

    pub fn prev(&mut self) {
        self.active = WizardStep::from_index(self.active.index().saturating_sub(1));
    }

    /// Advance only if the active step's predicate holds right now.
    ///
    /// Returns whether the step changed.
    pub fn try_next(&mut self, draft: &CampaignDraft, now: DateTime<Utc>) -> bool {
        if self.active.is_last() || !step_is_valid(self.active, draft, now) {
            return false;
        }
        self.next();
        true
    }
}

/// Validation predicate for leaving `step`.
///
/// The image step has no predicate here; its own controls decide when the
/// user may move on.
pub fn step_is_valid(step: WizardStep, draft: &CampaignDraft, now: DateTime<Utc>) -> bool {
    match step {
        WizardStep::Details => details_valid(draft, now),
        WizardStep::Image => true,
        WizardStep::Participation => participation_valid(draft, now),
        WizardStep::Prizes => prizes_valid(draft),
    }
}

fn details_valid(draft: &CampaignDraft, now: DateTime<Utc>) -> bool {
    !draft.title.is_empty()
        && !draft.host.is_empty()
        && !draft.description.is_empty()
        && draft.end_date_is_future(now)
}

fn participation_valid(draft: &CampaignDraft, now: DateTime<Utc>) -> bool {
    !draft.participation_description.trim().is_empty()
        && draft.ticket_price > 0.0
        && draft.end_date_is_future(now)
}

fn prizes_valid(draft: &CampaignDraft) -> bool {
    draft.prizes().iter().all(|p| p.is_complete())
}
