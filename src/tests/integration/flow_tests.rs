//! Service flow tests
//!
//! Drive [`Services`] with a mocked API and a real session identity backed by
//! in-memory storage, then check the events that come back to the loop.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{ApiError, MockFundraisingApi, UserRecord};
use crate::auth::{MemorySessionStorage, SessionIdentity, TokenOptions};
use crate::core::purchase::{PurchaseOutcome, PURCHASE_SUCCESS_MESSAGE};
use crate::tests::common::*;
use crate::tui::events::AppEvent;
use crate::tui::services::Services;

fn services(api: MockFundraisingApi, signed_in: bool) -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
    let storage = if signed_in {
        MemorySessionStorage::with_session(stored_session())
    } else {
        MemorySessionStorage::new()
    };
    let identity = SessionIdentity::new(Arc::new(storage));
    let (tx, rx) = mpsc::unbounded_channel();
    let services = Services::new(Arc::new(api), Arc::new(identity), TokenOptions::default(), tx);
    (services, rx)
}

#[tokio::test]
async fn test_profile_registration_uses_identity_picture_as_fallback() {
    let mut api = MockFundraisingApi::new();
    api.expect_upsert_user()
        .withf(|profile, token| profile.email == OWNER_EMAIL && token == ACCESS_TOKEN)
        .times(1)
        .returning(|profile, _| {
            Ok(Some(UserRecord {
                email: profile.email.clone(),
                full_name: profile.full_name.clone(),
                balance: 20.0,
                ..Default::default()
            }))
        });

    let (services, mut rx) = services(api, true);
    services.spawn_profile_registration();

    match rx.recv().await {
        Some(AppEvent::ProfileLoaded(profile)) => {
            assert_eq!(profile.record.full_name, "Ada Lovelace");
            assert_eq!(profile.record.balance, 20.0);
            assert_eq!(
                profile.fallback_picture.as_deref(),
                Some("https://img.example.com/ada.png")
            );
        }
        other => panic!("expected ProfileLoaded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_profile_registration_without_session_fails() {
    let mut api = MockFundraisingApi::new();
    api.expect_upsert_user().never();

    let (services, mut rx) = services(api, false);
    services.spawn_profile_registration();

    assert!(matches!(rx.recv().await, Some(AppEvent::ProfileFailed(_))));
}

#[tokio::test]
async fn test_create_flow_reports_session_and_message() {
    let mut api = MockFundraisingApi::new();
    api.expect_create_fundraising()
        .withf(|payload, token| {
            payload.user_email == OWNER_EMAIL
                && payload.prizes.len() == 1
                && payload.prizes[0].place == 1
                && token == ACCESS_TOKEN
        })
        .times(1)
        .returning(|_, _| Ok("Lottery created".to_string()));

    let (services, mut rx) = services(api, true);
    services.spawn_create_fundraising(7, complete_draft());

    match rx.recv().await {
        Some(AppEvent::CampaignCreated { session, message }) => {
            assert_eq!(session, 7);
            assert_eq!(message, "Lottery created");
        }
        other => panic!("expected CampaignCreated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_flow_failure_notice() {
    let mut api = MockFundraisingApi::new();
    api.expect_create_fundraising()
        .returning(|_, _| Err(ApiError::server(400, Some("Title already used".into()))));

    let (services, mut rx) = services(api, true);
    services.spawn_create_fundraising(3, complete_draft());

    match rx.recv().await {
        Some(AppEvent::CampaignFailed { session, notice }) => {
            assert_eq!(session, 3);
            assert_eq!(notice, "Error creating lottery: Title already used");
        }
        other => panic!("expected CampaignFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_purchase_flow_outcomes() {
    let mut api = MockFundraisingApi::new();
    let mut calls = 0;
    api.expect_buy_tickets().times(2).returning(move |_, _| {
        calls += 1;
        if calls == 1 {
            Ok(())
        } else {
            Err(ApiError::server(400, Some("Insufficient funds".into())))
        }
    });

    let (services, mut rx) = services(api, true);
    let request = crate::api::BuyTicketsRequest {
        quantity: 2,
        campaign_id: "c1".into(),
        buyer_email: OWNER_EMAIL.into(),
        total_price: 10.0,
    };

    services.spawn_purchase(1, request.clone());
    match rx.recv().await {
        Some(AppEvent::PurchaseSettled { session, outcome, .. }) => {
            assert_eq!(session, 1);
            assert_eq!(outcome, PurchaseOutcome::Purchased);
            assert_eq!(outcome.notice(), PURCHASE_SUCCESS_MESSAGE);
        }
        other => panic!("expected PurchaseSettled, got {other:?}"),
    }

    services.spawn_purchase(2, request);
    match rx.recv().await {
        Some(AppEvent::PurchaseSettled { session, outcome, .. }) => {
            assert_eq!(session, 2);
            assert_eq!(outcome.notice(), "Insufficient funds");
        }
        other => panic!("expected PurchaseSettled, got {other:?}"),
    }
}

#[tokio::test]
async fn test_listing_carries_generation() {
    let mut api = MockFundraisingApi::new();
    api.expect_list_fundraisings()
        .returning(|| Ok(vec![fundraiser("c1", 5.0), fundraiser("c2", 2.0)]));

    let (services, mut rx) = services(api, false);
    services.spawn_listing(4);

    match rx.recv().await {
        Some(AppEvent::ListingLoaded {
            generation,
            fundraisers,
        }) => {
            assert_eq!(generation, 4);
            assert_eq!(fundraisers.len(), 2);
        }
        other => panic!("expected ListingLoaded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_out_forgets_session_for_later_flows() {
    let mut api = MockFundraisingApi::new();
    api.expect_upsert_user().never();

    let (services, mut rx) = services(api, true);
    services.spawn_sign_out();
    assert!(matches!(rx.recv().await, Some(AppEvent::SignedOut)));

    services.spawn_profile_registration();
    assert!(matches!(rx.recv().await, Some(AppEvent::ProfileFailed(_))));
}
