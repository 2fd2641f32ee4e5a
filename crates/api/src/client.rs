//! Outbound calls to the inventory backend.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use stockdesk_core::{
    LogisticsPlanEntry, ProductionReportEntry, RequiredPartEntry, StockItem, SupplyPlanEntry,
};

use crate::dto::{
    CheckPartStatusRequest, DeliverToProductionRequest, Envelope, Listing, LoginRequest,
    MessageResponse, PartsEnvelope, PlanLogisticsRequest, PlansEnvelope,
    ProcureMissingPartsRequest, ProductsEnvelope, ReportsEnvelope, SupplyEnvelope, TokenResponse,
    UpdateStockRequest,
};
use crate::error::{ApiError, ApiResult, backend_message};

/// HTTP client for the inventory backend.
///
/// Holds the bearer token of the current session (if any). Cloning is cheap;
/// clones share the connection pool but not later token changes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut client = Self::new(base_url);
        client.set_token(token);
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    /// Exchange credentials for a bearer token. Never sends `Authorization`.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let path = "/api/token";
        tracing::debug!(path, username, "login request");

        let resp = self
            .http
            .post(self.url(path))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = resp.status();
        tracing::info!(status = status.as_u16(), "login response");

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<Value>(&text) {
                Ok(body) => backend_message(&body)
                    .unwrap_or_else(|| format!("Login failed. Status: {}", status.as_u16())),
                Err(_) => format!(
                    "HTTP error! Status: {}. Response is not JSON.",
                    status.as_u16()
                ),
            };
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: Some(message),
            });
        }

        decode(resp, path).await
    }

    pub async fn list_products(&self) -> ApiResult<Vec<StockItem>> {
        self.get_list::<ProductsEnvelope>("/api/products").await
    }

    pub async fn list_supply_plan(&self) -> ApiResult<Vec<SupplyPlanEntry>> {
        self.get_list::<SupplyEnvelope>("/api/supply/planning").await
    }

    pub async fn update_stock(&self, req: &UpdateStockRequest) -> ApiResult<MessageResponse> {
        self.post_json("/api/stock/update", req).await
    }

    pub async fn list_production_reports(&self) -> ApiResult<Vec<ProductionReportEntry>> {
        self.get_list::<ReportsEnvelope>("/api/production/reports")
            .await
    }

    pub async fn list_required_parts(&self) -> ApiResult<Vec<RequiredPartEntry>> {
        self.get_list::<PartsEnvelope>("/api/production/required-parts")
            .await
    }

    pub async fn check_part_status(&self, req: &CheckPartStatusRequest) -> ApiResult<Value> {
        self.post_json("/api/stock/check-part-status", req).await
    }

    pub async fn procure_missing_parts(
        &self,
        req: &ProcureMissingPartsRequest,
    ) -> ApiResult<Value> {
        self.post_json("/api/supply/procure-missing-parts", req)
            .await
    }

    /// Plan logistics. Without a request the backend answers with the current
    /// plan, which is how the logistics view reads it.
    pub async fn plan_logistics(
        &self,
        req: Option<&PlanLogisticsRequest>,
    ) -> ApiResult<Vec<LogisticsPlanEntry>> {
        let path = "/api/logistics/plan";
        let resp = match req {
            Some(req) => self.send(self.http.post(self.url(path)).json(req), path).await?,
            None => {
                self.send(
                    self.http.post(self.url(path)).json(&serde_json::json!({})),
                    path,
                )
                .await?
            }
        };
        let listing: Listing<PlansEnvelope, LogisticsPlanEntry> = decode(resp, path).await?;
        Ok(listing.into_items())
    }

    pub async fn upcoming_products_report(&self) -> ApiResult<Value> {
        self.get_json("/api/production/upcoming-products-report")
            .await
    }

    pub async fn deliver_to_production(
        &self,
        req: &DeliverToProductionRequest,
    ) -> ApiResult<Value> {
        self.post_json("/api/stock/deliver-to-production", req)
            .await
    }

    // ---------------------------------------------------------------------
    // Plumbing
    // ---------------------------------------------------------------------

    async fn get_list<E>(&self, path: &str) -> ApiResult<Vec<E::Item>>
    where
        E: Envelope + DeserializeOwned,
        E::Item: DeserializeOwned,
    {
        let listing: Listing<E, E::Item> = self.get_json(path).await?;
        Ok(listing.into_items())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.send(self.http.get(self.url(path)), path).await?;
        decode(resp, path).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .send(self.http.post(self.url(path)).json(body), path)
            .await?;
        decode(resp, path).await
    }

    /// Attach the bearer token, send once, and map non-2xx statuses.
    async fn send(&self, mut req: RequestBuilder, path: &str) -> ApiResult<Response> {
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        tracing::debug!(path, authorized = self.token.is_some(), "backend request");

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "backend request failed");
            ApiError::from(e)
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::error!(path, status = status.as_u16(), "authentication or authorization error");
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| backend_message(&body));

        tracing::warn!(path, status = status.as_u16(), ?message, "backend returned an error");

        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(resp: Response, path: &str) -> ApiResult<T> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Schema {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
