//! HTTP client tests
//!
//! Uses wiremock to check:
//! - Request paths, bearer tokens and JSON bodies
//! - Success message extraction
//! - Server error message extraction
//! - Unexpected response shapes

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::{
    ApiError, BuyTicketsRequest, CreateFundraisingPayload, FundraisingApi, HttpFundraisingApi,
    UNEXPECTED_RESPONSE,
};
use crate::core::campaign::failure_notice;
use crate::core::profile::profile_payload;
use crate::tests::common::*;

fn client(server: &MockServer) -> HttpFundraisingApi {
    HttpFundraisingApi::new(&api_config(&server.uri())).unwrap()
}

fn buy_request() -> BuyTicketsRequest {
    BuyTicketsRequest {
        quantity: 3,
        campaign_id: "c1".to_string(),
        buyer_email: OWNER_EMAIL.to_string(),
        total_price: 15.0,
    }
}

// =============================================================================
// Create fundraising
// =============================================================================

#[tokio::test]
async fn test_create_returns_server_message() {
    let server = MockServer::start().await;
    let payload = CreateFundraisingPayload::from(&complete_draft());

    Mock::given(method("POST"))
        .and(path("/api/lottery/fundraising/create"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Lottery created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let message = api.create_fundraising(&payload, ACCESS_TOKEN).await.unwrap();
    assert_eq!(message, "Lottery created");
}

#[tokio::test]
async fn test_create_without_message_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/lottery/fundraising/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let api = client(&server);
    let payload = CreateFundraisingPayload::from(&complete_draft());
    let err = api.create_fundraising(&payload, ACCESS_TOKEN).await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedResponse));
    assert_eq!(err.user_message(), UNEXPECTED_RESPONSE);
}

#[tokio::test]
async fn test_create_non_json_success_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/lottery/fundraising/create"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let api = client(&server);
    let payload = CreateFundraisingPayload::from(&complete_draft());
    let err = api.create_fundraising(&payload, ACCESS_TOKEN).await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedResponse));
}

#[tokio::test]
async fn test_create_error_carries_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/lottery/fundraising/create"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Title already used"
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let payload = CreateFundraisingPayload::from(&complete_draft());
    let err = api.create_fundraising(&payload, ACCESS_TOKEN).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Title already used"));
    assert_eq!(
        failure_notice(&err),
        "Error creating lottery: Title already used"
    );
}

// =============================================================================
// Buy tickets
// =============================================================================

#[tokio::test]
async fn test_buy_sends_wire_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/lottery/fundraising/buy-ticket"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "ticketNumber": 3,
            "lotteryId": "c1",
            "email": OWNER_EMAIL,
            "totalPrice": 15.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("done"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    api.buy_tickets(&buy_request(), ACCESS_TOKEN).await.unwrap();
}

#[tokio::test]
async fn test_buy_insufficient_funds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/lottery/fundraising/buy-ticket"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Insufficient funds"
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let err = api.buy_tickets(&buy_request(), ACCESS_TOKEN).await.unwrap_err();
    assert_eq!(err.user_message(), "Insufficient funds");
}

#[tokio::test]
async fn test_buy_error_without_body_uses_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/lottery/fundraising/buy-ticket"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = client(&server);
    let err = api.buy_tickets(&buy_request(), ACCESS_TOKEN).await.unwrap_err();
    assert_eq!(err.user_message(), "Request failed with status code 500");
}

#[tokio::test]
async fn test_unauthorized_needs_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/lottery/fundraising/buy-ticket"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = client(&server);
    let err = api.buy_tickets(&buy_request(), ACCESS_TOKEN).await.unwrap_err();
    assert!(err.needs_auth());
}

// =============================================================================
// User upsert and listing
// =============================================================================

#[tokio::test]
async fn test_upsert_returns_user_record() {
    let server = MockServer::start().await;
    let payload = profile_payload(&user_info());

    Mock::given(method("POST"))
        .and(path("/api/user/register"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "email": OWNER_EMAIL,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "fullName": "Ada Lovelace",
                "balance": 42.5
            }
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let record = api.upsert_user(&payload, ACCESS_TOKEN).await.unwrap().unwrap();
    assert_eq!(record.full_name, "Ada Lovelace");
    assert_eq!(record.balance, 42.5);
    assert_eq!(record.picture, None);
}

#[tokio::test]
async fn test_upsert_without_user_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let api = client(&server);
    let payload = profile_payload(&user_info());
    assert_eq!(api.upsert_user(&payload, ACCESS_TOKEN).await.unwrap(), None);
}

#[tokio::test]
async fn test_listing_is_unauthenticated_and_accepts_mongo_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lottery/fundraising/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "c1",
                "title": "Spring Raffle",
                "hosted": "Lakeside School",
                "price": 5,
                "endDate": "2030-01-02T03:04:00.000Z",
                "prizes": [{ "place": 1, "description": "Bike", "icon": "Bike" }]
            },
            { "id": "c2", "title": "Bake Sale" }
        ])))
        .mount(&server)
        .await;

    let api = client(&server);
    let list = api.list_fundraisings().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, "c1");
    assert_eq!(list[0].prizes[0].place, 1);
    assert_eq!(list[1].id, "c2");
    assert_eq!(list[1].end_date, None);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}
