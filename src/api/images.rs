use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ListResponse;
use crate::client::Client;
use crate::core::{Create, Error};

const IMAGE_GENERATIONS_ENDPOINT: &str = "/images/generations";
const IMAGE_EDITS_ENDPOINT: &str = "/images/edits";
const IMAGE_VARIATIONS_ENDPOINT: &str = "/images/variations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Size256,
    #[serde(rename = "512x512")]
    Size512,
    #[serde(rename = "1024x1024")]
    Size1024,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    Url,
    B64Json,
}

/// A generated image, either hosted or inline depending on the requested
/// response format.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageGenerationParams {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ImageResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ImageGenerationParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// Edit an image on disk. `image` and `mask` are uploaded from the given
/// paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageEditParams {
    pub image: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<PathBuf>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ImageResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ImageEditParams {
    pub fn new(image: impl Into<PathBuf>, prompt: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageVariationParams {
    pub image: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ImageResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ImageVariationParams {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }
}

pub struct ImagesApi<'a> {
    client: &'a Client,
}

impl<'a> ImagesApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Edits an image according to the prompt, optionally constrained by a
    /// mask.
    pub async fn edit(&self, params: &ImageEditParams) -> Result<Vec<Image>, Error> {
        let response: ListResponse<Image> =
            self.client.post_form(IMAGE_EDITS_ENDPOINT, params).await?;
        Ok(response.data)
    }

    pub async fn create_variations(
        &self,
        params: &ImageVariationParams,
    ) -> Result<Vec<Image>, Error> {
        let response: ListResponse<Image> = self
            .client
            .post_form(IMAGE_VARIATIONS_ENDPOINT, params)
            .await?;
        Ok(response.data)
    }
}

#[async_trait]
impl<'a> Create for ImagesApi<'a> {
    type Params = ImageGenerationParams;
    type Output = Vec<Image>;

    async fn create(&self, params: &ImageGenerationParams) -> Result<Vec<Image>, Error> {
        let response: ListResponse<Image> = self
            .client
            .post_json(IMAGE_GENERATIONS_ENDPOINT, Some(params))
            .await?;
        Ok(response.data)
    }
}
