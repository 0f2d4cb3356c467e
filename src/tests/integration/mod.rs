//! Integration tests
//!
//! - `api_client_tests`: the HTTP client against a wiremock server
//! - `flow_tests`: services and the identity provider end to end, with a
//!   mocked API and in-memory session storage

mod api_client_tests;
mod flow_tests;
