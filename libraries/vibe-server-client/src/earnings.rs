//! Earnings, cash-out and payout history calls.

use crate::envelope::{read_ack, read_bare, read_payload, transport_error};
use crate::error::Result;
use crate::types::{CashOutRequest, EarningsGraph, EarningsOverview, PayoutRecord};
use reqwest::Client;
use tracing::{debug, info};

/// Earnings client for the VibeQueue backend.
pub struct EarningsClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl EarningsClient {
    pub(crate) fn new(http: Client, base_url: String, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get the earnings overview: payment connection state and the
    /// currently withdrawable amount.
    pub async fn get_overview(&self) -> Result<EarningsOverview> {
        // Endpoint name carries the backend's typo, "Probs" not "Props".
        let url = format!("{}/Earnings/getEarningScreenProbs", self.base_url);
        debug!(url = %url, "Fetching earnings overview");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        read_payload(response).await
    }

    /// Get per-event earnings plus the all-time total.
    pub async fn get_graph_data(&self) -> Result<EarningsGraph> {
        let url = format!("{}/Earnings/getGraphData", self.base_url);
        debug!(url = %url, "Fetching earnings graph data");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        read_payload(response).await
    }

    /// Request a payout of the given amount.
    pub async fn cash_out(&self, amount_cents: i64, currency: &str) -> Result<()> {
        let url = format!("{}/Earnings/cashOut", self.base_url);
        info!(amount_cents, currency, "Requesting cash out");

        let body = CashOutRequest {
            amount_cents,
            currency: currency.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response).await
    }

    /// Get the payout transaction history.
    ///
    /// This endpoint returns a bare JSON array rather than the envelope.
    pub async fn get_payout_history(&self) -> Result<Vec<PayoutRecord>> {
        let url = format!("{}/History/getHistory", self.base_url);
        debug!(url = %url, "Fetching payout history");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        read_bare(response).await
    }
}
