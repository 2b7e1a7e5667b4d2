use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TokenUsage;
use crate::client::Client;
use crate::core::{Create, Error};

const EDITS_ENDPOINT: &str = "/edits";

/// One rewritten version of the input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditChoice {
    pub text: String,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edit {
    pub created: u64,
    pub choices: Vec<EditChoice>,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditParams {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl EditParams {
    pub fn new(model: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            instruction: instruction.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

pub struct EditsApi<'a> {
    client: &'a Client,
}

impl<'a> EditsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> Create for EditsApi<'a> {
    type Params = EditParams;
    type Output = Edit;

    async fn create(&self, params: &EditParams) -> Result<Edit, Error> {
        self.client.post_json(EDITS_ENDPOINT, Some(params)).await
    }
}
