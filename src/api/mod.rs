//! Resource APIs, one module per endpoint family.
//!
//! Each API owns its paths and request/response shapes and funnels every
//! call through the shared [`Client`](crate::Client) helpers.

pub mod chat;
pub mod completions;
pub mod edits;
pub mod embeddings;
pub mod files;
pub mod fine_tunes;
pub mod images;
pub mod models;
pub mod moderations;

pub use chat::{
    ChatCompletion, ChatCompletionChoice, ChatCompletionParams, ChatCompletionsApi, ChatMessage,
    ChatRole,
};
pub use completions::{Completion, CompletionChoice, CompletionParams, CompletionsApi};
pub use edits::{Edit, EditChoice, EditParams, EditsApi};
pub use embeddings::{Embedding, EmbeddingList, EmbeddingParams, EmbeddingsApi};
pub use files::{DeletedFile, File, FileParams, FilesApi};
pub use fine_tunes::{FineTune, FineTuneEvent, FineTuneHyperparams, FineTuneParams, FineTunesApi};
pub use images::{
    Image, ImageEditParams, ImageGenerationParams, ImageResponseFormat, ImageSize,
    ImageVariationParams, ImagesApi,
};
pub use models::{DeletedModel, Model, ModelPermission, ModelsApi};
pub use moderations::{
    Moderation, ModerationCategories, ModerationCategoryScores, ModerationParams,
    ModerationResult, ModerationsApi,
};

use serde::Deserialize;

/// Token accounting attached to generation responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// `{"data": [...]}` wrapper used by list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    pub data: Vec<T>,
}
