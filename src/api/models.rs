use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::ListResponse;
use crate::client::Client;
use crate::core::{Delete, Error, List, Retrieve};

const MODELS_ENDPOINT: &str = "/models";

/// A permission granted on a model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelPermission {
    pub id: String,
    pub created: u64,
    pub allow_create_engine: bool,
    pub allow_sampling: bool,
    pub allow_logprobs: bool,
    pub allow_search_indices: bool,
    pub allow_view: bool,
    pub allow_fine_tuning: bool,
    pub organization: String,
    /// Shape varies; kept as raw JSON.
    #[serde(default)]
    pub group: Value,
    pub is_blocking: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Model {
    pub id: String,
    pub owned_by: String,
    pub created: u64,
    #[serde(default)]
    pub root: String,
    /// Parent in the model lineage, if any. Shape varies; kept as raw JSON.
    #[serde(default)]
    pub parent: Value,
    #[serde(default)]
    pub permission: Vec<ModelPermission>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeletedModel {
    pub id: String,
    pub deleted: bool,
}

pub struct ModelsApi<'a> {
    client: &'a Client,
}

impl<'a> ModelsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> List for ModelsApi<'a> {
    type Item = Model;

    async fn list(&self) -> Result<Vec<Model>, Error> {
        let response: ListResponse<Model> = self.client.get_json(MODELS_ENDPOINT).await?;
        Ok(response.data)
    }
}

#[async_trait]
impl<'a> Retrieve for ModelsApi<'a> {
    type Item = Model;

    async fn retrieve(&self, id: &str) -> Result<Model, Error> {
        self.client
            .get_json(&format!("{MODELS_ENDPOINT}/{id}"))
            .await
    }
}

#[async_trait]
impl<'a> Delete for ModelsApi<'a> {
    type Output = DeletedModel;

    /// Deletes a fine-tuned model owned by the organization.
    async fn delete(&self, id: &str) -> Result<DeletedModel, Error> {
        self.client
            .delete_json(&format!("{MODELS_ENDPOINT}/{id}"))
            .await
    }
}
