//! Request gateway: typed JSON-over-HTTP exchanges with the sales-assist
//! service. Owns no state beyond the in-flight call: no caching, no retry,
//! no client-side queueing.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::error::GatewayError;
use crate::model::{ApprovalRequest, ApproveResponse, AuditResponse, Lead, SuggestResponse};

const LEAD_ENDPOINT: &str = "/api/lead";
const APPROVE_ENDPOINT: &str = "/api/approve";
const AUDIT_ENDPOINT: &str = "/api/audit";
const ANALYTICS_ENDPOINT: &str = "/api/analytics";

pub struct ApiClient {
    client: Client,
    /// Pre-computed endpoint URLs, base normalized without a trailing slash.
    lead_url: String,
    approve_url: String,
    audit_url: String,
    analytics_url: String,
}

impl ApiClient {
    pub fn new(service: &ServiceConfig) -> Self {
        let base = service.base_url.trim_end_matches('/');
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(service.timeout_secs))
                .connect_timeout(Duration::from_secs(service.connect_timeout_secs))
                .build()
                .unwrap_or_else(|_| Client::new()),
            lead_url: format!("{base}{LEAD_ENDPOINT}"),
            approve_url: format!("{base}{APPROVE_ENDPOINT}"),
            audit_url: format!("{base}{AUDIT_ENDPOINT}"),
            analytics_url: format!("{base}{ANALYTICS_ENDPOINT}"),
        }
    }

    /// POST the lead; the response carries the suggestion and refreshed
    /// analytics. The lead is borrowed for exactly this round trip.
    pub async fn submit_lead(&self, lead: &Lead) -> Result<SuggestResponse, GatewayError> {
        self.post(LEAD_ENDPOINT, &self.lead_url, lead).await
    }

    pub async fn approve(
        &self,
        request: &ApprovalRequest,
    ) -> Result<ApproveResponse, GatewayError> {
        self.post(APPROVE_ENDPOINT, &self.approve_url, request).await
    }

    pub async fn fetch_audit(&self) -> Result<AuditResponse, GatewayError> {
        self.get(AUDIT_ENDPOINT, &self.audit_url).await
    }

    pub async fn fetch_analytics(&self) -> Result<Value, GatewayError> {
        self.get(ANALYTICS_ENDPOINT, &self.analytics_url).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| GatewayError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;
        Self::read_json(endpoint, response).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, url: &str) -> Result<T, GatewayError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| GatewayError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;
        Self::read_json(endpoint, response).await
    }

    /// Split the failure classes apart: non-2xx keeps the body text for the
    /// error card, a 2xx body that is not the promised JSON is a decode
    /// failure, and transport errors never reach here.
    async fn read_json<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| GatewayError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;
        if !status.is_success() {
            return Err(GatewayError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| GatewayError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}
