//! Submission gateway: turn a finished draft into a create-fundraising call.

use crate::api::{ApiError, CreateFundraisingPayload, FundraisingApi};
use crate::auth::{IdentityProvider, TokenOptions};

use super::draft::CampaignDraft;

/// Submit `draft` once. No retry; the caller keeps the draft on failure.
///
/// The access token is requested immediately before the call. Returns the
/// server's confirmation message.
pub async fn submit_fundraising(
    api: &dyn FundraisingApi,
    identity: &dyn IdentityProvider,
    options: &TokenOptions,
    draft: &CampaignDraft,
) -> Result<String, ApiError> {
    let result: Result<String, ApiError> = async {
        let token = identity.access_token(options).await?;
        let payload = CreateFundraisingPayload::from(draft);
        api.create_fundraising(&payload, &token).await
    }
    .await;

    match &result {
        Ok(message) => log::info!("Fundraiser '{}' created: {message}", draft.title),
        Err(e) => log::error!("Error creating fundraiser '{}': {e:?}", draft.title),
    }
    result
}

/// Notification text for a failed submission.
pub fn failure_notice(err: &ApiError) -> String {
    format!("Error creating lottery: {}", err.user_message())
}
