use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::core::{Create, Error};

const MODERATIONS_ENDPOINT: &str = "/moderations";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ModerationCategories {
    pub hate: bool,
    #[serde(rename = "hate/threatening")]
    pub hate_threatening: bool,
    #[serde(rename = "self-harm")]
    pub self_harm: bool,
    pub sexual: bool,
    #[serde(rename = "sexual/minors")]
    pub sexual_minors: bool,
    pub violence: bool,
    #[serde(rename = "violence/graphic")]
    pub violence_graphic: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ModerationCategoryScores {
    pub hate: f64,
    #[serde(rename = "hate/threatening")]
    pub hate_threatening: f64,
    #[serde(rename = "self-harm")]
    pub self_harm: f64,
    pub sexual: f64,
    #[serde(rename = "sexual/minors")]
    pub sexual_minors: f64,
    pub violence: f64,
    #[serde(rename = "violence/graphic")]
    pub violence_graphic: f64,
}

/// Verdict for a single input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModerationResult {
    pub categories: ModerationCategories,
    pub category_scores: ModerationCategoryScores,
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Moderation {
    pub id: String,
    pub model: String,
    pub results: Vec<ModerationResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModerationParams {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ModerationParams {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            model: None,
        }
    }
}

pub struct ModerationsApi<'a> {
    client: &'a Client,
}

impl<'a> ModerationsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> Create for ModerationsApi<'a> {
    type Params = ModerationParams;
    type Output = Moderation;

    async fn create(&self, params: &ModerationParams) -> Result<Moderation, Error> {
        self.client
            .post_json(MODERATIONS_ENDPOINT, Some(params))
            .await
    }
}
