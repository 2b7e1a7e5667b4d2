//! # openai-bindings
//!
//! Typed async bindings for the OpenAI REST API.
//!
//! Every resource API (models, completions, chat, edits, images, embeddings,
//! files, fine-tunes, moderations) goes through the same core: one
//! authenticated request, one status check, either raw bytes or a single
//! [`Error`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openai_bindings::{Client, ClientConfig, List};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), openai_bindings::Error> {
//!     let client = Client::new(ClientConfig::new("sk-..."))?;
//!
//!     for model in client.models().list().await? {
//!         println!("{}", model.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Capability traits ([`List`], [`Retrieve`], [`Create`], [`Delete`]) must
//! be in scope to call the shared operations.

pub mod api;
pub mod client;
pub mod core;

pub use client::Client;
pub use crate::core::{
    ApiError, ApiKey, ClientConfig, Create, Delete, EncodedForm, Error, List, RequestDescriptor,
    Retrieve, Transport,
};
