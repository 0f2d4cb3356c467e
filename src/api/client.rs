//! reqwest-backed fundraising API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::error::{ApiError, Result};
use super::types::{
    BuyTicketsRequest, CreateFundraisingPayload, FundraiserSummary, MessageBody,
    UpsertUserResponse, UserProfilePayload, UserRecord,
};
use super::FundraisingApi;
use crate::config::{ApiConfig, EndpointPaths};

/// HTTP implementation of [`FundraisingApi`].
#[derive(Clone)]
pub struct HttpFundraisingApi {
    http_client: reqwest::Client,
    base_url: Url,
    endpoints: EndpointPaths,
}

impl HttpFundraisingApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        // Url::join drops the last segment unless the base ends with '/'
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            http_client,
            base_url: Url::parse(&base)?,
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let builder = self.http_client.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }
}

/// Split a response into its decoded success body or an [`ApiError`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<MessageBody>(&bytes)
            .ok()
            .and_then(|body| body.message);
        log::debug!("API error response: status={status} message={message:?}");
        return Err(ApiError::server(status.as_u16(), message));
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        log::warn!("Undecodable {status} response body: {e}");
        ApiError::UnexpectedResponse
    })
}

/// Like [`read_json`] but only checks the status, ignoring the success body.
async fn read_status(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let bytes = response.bytes().await?;
    let message = serde_json::from_slice::<MessageBody>(&bytes)
        .ok()
        .and_then(|body| body.message);
    Err(ApiError::server(status.as_u16(), message))
}

#[async_trait]
impl FundraisingApi for HttpFundraisingApi {
    #[instrument(skip(self, payload, token), fields(title = %payload.title))]
    async fn create_fundraising(
        &self,
        payload: &CreateFundraisingPayload,
        token: &str,
    ) -> Result<String> {
        let response = self
            .request(Method::POST, &self.endpoints.create_fundraising, Some(token))?
            .json(payload)
            .send()
            .await?;

        let body: MessageBody = read_json(response).await?;
        body.message
            .filter(|m| !m.is_empty())
            .ok_or(ApiError::UnexpectedResponse)
    }

    #[instrument(skip(self, request, token), fields(campaign = %request.campaign_id))]
    async fn buy_tickets(&self, request: &BuyTicketsRequest, token: &str) -> Result<()> {
        let response = self
            .request(Method::POST, &self.endpoints.buy_tickets, Some(token))?
            .json(request)
            .send()
            .await?;

        read_status(response).await
    }

    #[instrument(skip(self, profile, token))]
    async fn upsert_user(
        &self,
        profile: &UserProfilePayload,
        token: &str,
    ) -> Result<Option<UserRecord>> {
        let response = self
            .request(Method::POST, &self.endpoints.upsert_user, Some(token))?
            .json(profile)
            .send()
            .await?;

        let body: UpsertUserResponse = read_json(response).await?;
        Ok(body.user)
    }

    #[instrument(skip(self))]
    async fn list_fundraisings(&self) -> Result<Vec<FundraiserSummary>> {
        let response = self
            .request(Method::GET, &self.endpoints.list_fundraisings, None)?
            .send()
            .await?;

        read_json(response).await
    }
}
