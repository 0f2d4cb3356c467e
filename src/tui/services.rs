use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{BuyTicketsRequest, FundraisingApi};
use crate::auth::{IdentityProvider, TokenOptions};
use crate::core::campaign::{failure_notice, submit_fundraising, CampaignDraft};
use crate::core::profile::register_profile;
use crate::core::purchase::{purchase_tickets, PurchaseOutcome};

use super::events::{AppEvent, DialogSession};

/// Centralized handle to the backend collaborators.
///
/// Created once at startup. Every network call runs on a spawned task and
/// reports back through `event_tx`; nothing here touches UI state.
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn FundraisingApi>,
    pub identity: Arc<dyn IdentityProvider>,
    pub token_options: TokenOptions,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    pub fn new(
        api: Arc<dyn FundraisingApi>,
        identity: Arc<dyn IdentityProvider>,
        token_options: TokenOptions,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            api,
            identity,
            token_options,
            event_tx,
        }
    }

    fn send(tx: &mpsc::UnboundedSender<AppEvent>, event: AppEvent) {
        if tx.send(event).is_err() {
            log::debug!("Event loop gone, dropping backend event");
        }
    }

    /// Upsert the signed-in user's profile.
    pub fn spawn_profile_registration(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            let event = match register_profile(
                this.api.as_ref(),
                this.identity.as_ref(),
                &this.token_options,
            )
            .await
            {
                Ok(profile) => AppEvent::ProfileLoaded(profile),
                Err(e) => AppEvent::ProfileFailed(e.user_message()),
            };
            Self::send(&this.event_tx, event);
        });
    }

    /// Forget the stored session.
    pub fn spawn_sign_out(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            let event = match this.identity.sign_out().await {
                Ok(()) => AppEvent::SignedOut,
                Err(e) => {
                    log::warn!("Failed to sign out: {e:?}");
                    AppEvent::SignOutFailed(e.to_string())
                }
            };
            Self::send(&this.event_tx, event);
        });
    }

    /// Fetch the fundraiser listing for store generation `generation`.
    pub fn spawn_listing(&self, generation: u64) {
        let this = self.clone();
        tokio::spawn(async move {
            let event = match this.api.list_fundraisings().await {
                Ok(fundraisers) => AppEvent::ListingLoaded {
                    generation,
                    fundraisers,
                },
                Err(e) => {
                    log::warn!("Failed to load fundraisers: {e:?}");
                    AppEvent::ListingFailed(e.user_message())
                }
            };
            Self::send(&this.event_tx, event);
        });
    }

    /// Submit a finished draft on behalf of wizard session `session`.
    pub fn spawn_create_fundraising(&self, session: DialogSession, draft: CampaignDraft) {
        let this = self.clone();
        tokio::spawn(async move {
            let event = match submit_fundraising(
                this.api.as_ref(),
                this.identity.as_ref(),
                &this.token_options,
                &draft,
            )
            .await
            {
                Ok(message) => AppEvent::CampaignCreated { session, message },
                Err(e) => AppEvent::CampaignFailed {
                    session,
                    notice: failure_notice(&e),
                },
            };
            Self::send(&this.event_tx, event);
        });
    }

    /// Buy tickets on behalf of purchase dialog session `session`.
    pub fn spawn_purchase(&self, session: DialogSession, request: BuyTicketsRequest) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = purchase_tickets(
                this.api.as_ref(),
                this.identity.as_ref(),
                &this.token_options,
                &request,
            )
            .await;
            let outcome = PurchaseOutcome::from_result(&result);
            Self::send(
                &this.event_tx,
                AppEvent::PurchaseSettled {
                    session,
                    request,
                    outcome,
                },
            );
        });
    }
}
