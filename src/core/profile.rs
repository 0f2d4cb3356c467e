//! Profile registration.
//!
//! On start-up the signed-in user is upserted on the server so that a
//! balance record exists for them. The returned record feeds the store.

use crate::api::{ApiError, FundraisingApi, UserProfilePayload, UserRecord};
use crate::auth::{IdentityProvider, TokenOptions, UserInfo};

/// Build the upsert body from identity claims. New users start at balance 0.
pub fn profile_payload(user: &UserInfo) -> UserProfilePayload {
    UserProfilePayload {
        email: user.email.clone(),
        first_name: user.given_name.clone().unwrap_or_default(),
        last_name: user.family_name.clone().unwrap_or_default(),
        full_name: user.full_name(),
        picture: user.picture.clone().unwrap_or_default(),
        date_of_birth: user.birthdate.clone(),
        balance: 0.0,
    }
}

/// A registered profile along with the identity's picture, used when the
/// server has none on record.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredProfile {
    pub record: UserRecord,
    pub fallback_picture: Option<String>,
}

/// Upsert the signed-in user's profile.
///
/// When the server answers without a `user` object the record is rebuilt
/// from the payload that was sent.
pub async fn register_profile(
    api: &dyn FundraisingApi,
    identity: &dyn IdentityProvider,
    options: &TokenOptions,
) -> Result<RegisteredProfile, ApiError> {
    let user = identity.current_user().await?;
    let token = identity.access_token(options).await?;
    let payload = profile_payload(&user);

    let record = match api.upsert_user(&payload, &token).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            log::warn!("Upsert for {} returned no user record", user.email);
            UserRecord {
                email: payload.email,
                first_name: payload.first_name,
                last_name: payload.last_name,
                full_name: payload.full_name,
                picture: None,
                date_of_birth: payload.date_of_birth,
                balance: payload.balance,
            }
        }
        Err(e) => {
            log::error!("Profile registration for {} failed: {e:?}", user.email);
            return Err(e);
        }
    };

    log::info!("Registered profile for {} (balance {:.2})", record.email, record.balance);
    Ok(RegisteredProfile {
        record,
        fallback_picture: user.picture,
    })
}
