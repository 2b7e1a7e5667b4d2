//! Fine-tuning jobs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{File, ListResponse};
use crate::client::Client;
use crate::core::{Create, Error, List, Retrieve};

const FINE_TUNES_ENDPOINT: &str = "/fine-tunes";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FineTuneEvent {
    pub created_at: i64,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FineTuneHyperparams {
    pub batch_size: Option<u32>,
    pub learning_rate_multiplier: Option<f64>,
    pub n_epochs: u32,
    pub prompt_loss_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FineTune {
    pub id: String,
    pub model: String,
    pub created_at: i64,
    #[serde(default)]
    pub events: Vec<FineTuneEvent>,
    /// Set once the job has succeeded.
    #[serde(default)]
    pub fine_tuned_model: Option<String>,
    pub hyperparams: FineTuneHyperparams,
    pub organization_id: String,
    #[serde(default)]
    pub result_files: Vec<File>,
    pub status: String,
    /// Shape varies; kept as raw JSON.
    #[serde(default)]
    pub validation_files: Vec<Value>,
    #[serde(default)]
    pub training_files: Vec<File>,
    pub updated_at: i64,
}

/// Parameters for starting a fine-tune. `training_file` and
/// `validation_file` are ids of already uploaded files.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FineTuneParams {
    pub training_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_loss_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_classification_metrics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_n_classes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_positive_class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classification_betas: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl FineTuneParams {
    pub fn new(training_file: impl Into<String>) -> Self {
        Self {
            training_file: training_file.into(),
            ..Default::default()
        }
    }
}

pub struct FineTunesApi<'a> {
    client: &'a Client,
}

impl<'a> FineTunesApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn cancel(&self, id: &str) -> Result<FineTune, Error> {
        self.client
            .post_json::<(), _>(&format!("{FINE_TUNES_ENDPOINT}/{id}/cancel"), None)
            .await
    }

    pub async fn events(&self, fine_tune_id: &str) -> Result<Vec<FineTuneEvent>, Error> {
        let response: ListResponse<FineTuneEvent> = self
            .client
            .get_json(&format!("{FINE_TUNES_ENDPOINT}/{fine_tune_id}/events"))
            .await?;
        Ok(response.data)
    }
}

#[async_trait]
impl<'a> List for FineTunesApi<'a> {
    type Item = FineTune;

    async fn list(&self) -> Result<Vec<FineTune>, Error> {
        let response: ListResponse<FineTune> = self.client.get_json(FINE_TUNES_ENDPOINT).await?;
        Ok(response.data)
    }
}

#[async_trait]
impl<'a> Retrieve for FineTunesApi<'a> {
    type Item = FineTune;

    async fn retrieve(&self, id: &str) -> Result<FineTune, Error> {
        self.client
            .get_json(&format!("{FINE_TUNES_ENDPOINT}/{id}"))
            .await
    }
}

#[async_trait]
impl<'a> Create for FineTunesApi<'a> {
    type Params = FineTuneParams;
    type Output = FineTune;

    async fn create(&self, params: &FineTuneParams) -> Result<FineTune, Error> {
        self.client
            .post_json(FINE_TUNES_ENDPOINT, Some(params))
            .await
    }
}
