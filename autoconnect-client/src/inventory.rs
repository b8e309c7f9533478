//! Inventory and lead endpoints. Both live on the same service host.

use async_trait::async_trait;
use autoconnect_core::{ApiError, InventoryBackend, InventoryCar, Lead, LeadBackend};
use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::endpoint;
use crate::http::{check_status, read_json, transport_error};

/// `GET /models`. The service answers with a mapping of records (or a plain array); values are
/// taken in order and records that are not car objects are skipped.
#[derive(Debug, Clone)]
pub struct HttpInventoryBackend {
    client: Client,
    url: String,
}

impl HttpInventoryBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: endpoint(base_url, "models"),
        }
    }
}

/// Flattens the `/models` body into a list of cars.
pub(crate) fn cars_from_value(value: Value) -> Result<Vec<InventoryCar>, ApiError> {
    let records: Vec<Value> = match value {
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        Value::Array(list) => list,
        other => {
            return Err(ApiError::Decode(format!(
                "expected a mapping of vehicle records, got {}",
                other
            )))
        }
    };
    Ok(records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<InventoryCar>(record) {
            Ok(car) => Some(car),
            Err(e) => {
                warn!(error = %e, "skipping inventory record with unexpected shape");
                None
            }
        })
        .collect())
}

#[async_trait]
impl InventoryBackend for HttpInventoryBackend {
    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<Vec<InventoryCar>, ApiError> {
        info!(endpoint = %self.url, "step: inventory request");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response, &self.url).await?;
        let cars = cars_from_value(read_json(response).await?)?;
        info!(count = cars.len(), "step: inventory loaded");
        Ok(cars)
    }
}

/// `POST /saveInterest`.
#[derive(Debug, Clone)]
pub struct HttpLeadBackend {
    client: Client,
    url: String,
}

impl HttpLeadBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: endpoint(base_url, "saveInterest"),
        }
    }
}

#[async_trait]
impl LeadBackend for HttpLeadBackend {
    #[instrument(skip(self, lead), fields(car = %lead.car))]
    async fn save_interest(&self, lead: &Lead) -> Result<(), ApiError> {
        info!(endpoint = %self.url, "step: save interest request");
        let response = self
            .client
            .post(&self.url)
            .json(lead)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response, &self.url).await?;
        info!("step: interest saved");
        Ok(())
    }
}
