use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TokenUsage;
use crate::client::Client;
use crate::core::{Create, Error};

const EMBEDDINGS_ENDPOINT: &str = "/embeddings";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmbeddingParams {
    pub model: String,
    /// One embedding is returned per input string, in order.
    pub input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl EmbeddingParams {
    pub fn new(model: impl Into<String>, input: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
            user: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Embedding {
    pub object: String,
    pub embedding: Vec<f32>,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddingList {
    pub object: String,
    pub data: Vec<Embedding>,
    pub model: String,
    pub usage: TokenUsage,
}

pub struct EmbeddingsApi<'a> {
    client: &'a Client,
}

impl<'a> EmbeddingsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> Create for EmbeddingsApi<'a> {
    type Params = EmbeddingParams;
    type Output = EmbeddingList;

    async fn create(&self, params: &EmbeddingParams) -> Result<EmbeddingList, Error> {
        self.client
            .post_json(EMBEDDINGS_ENDPOINT, Some(params))
            .await
    }
}
