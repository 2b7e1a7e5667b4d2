use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWrite;

use super::ListResponse;
use crate::client::Client;
use crate::core::{Create, Delete, Error, List, Retrieve};

const FILES_ENDPOINT: &str = "/files";

/// A file stored with the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct File {
    pub id: String,
    /// Size in bytes.
    pub bytes: u64,
    pub created_at: i64,
    pub filename: String,
    pub purpose: String,
}

/// Upload parameters. `file` is read from disk when the request is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileParams {
    pub file: PathBuf,
    pub purpose: String,
}

impl FileParams {
    pub fn new(file: impl Into<PathBuf>, purpose: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            purpose: purpose.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeletedFile {
    pub id: String,
    pub deleted: bool,
}

pub struct FilesApi<'a> {
    client: &'a Client,
}

impl<'a> FilesApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Streams the content of a file into `sink`, returning the number of
    /// bytes written.
    pub async fn download<W>(&self, id: &str, sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        self.client
            .download(&format!("{FILES_ENDPOINT}/{id}/content"), sink)
            .await
    }
}

#[async_trait]
impl<'a> List for FilesApi<'a> {
    type Item = File;

    async fn list(&self) -> Result<Vec<File>, Error> {
        let response: ListResponse<File> = self.client.get_json(FILES_ENDPOINT).await?;
        Ok(response.data)
    }
}

#[async_trait]
impl<'a> Retrieve for FilesApi<'a> {
    type Item = File;

    async fn retrieve(&self, id: &str) -> Result<File, Error> {
        self.client
            .get_json(&format!("{FILES_ENDPOINT}/{id}"))
            .await
    }
}

#[async_trait]
impl<'a> Create for FilesApi<'a> {
    type Params = FileParams;
    type Output = File;

    async fn create(&self, params: &FileParams) -> Result<File, Error> {
        self.client.post_form(FILES_ENDPOINT, params).await
    }
}

#[async_trait]
impl<'a> Delete for FilesApi<'a> {
    type Output = DeletedFile;

    async fn delete(&self, id: &str) -> Result<DeletedFile, Error> {
        self.client
            .delete_json(&format!("{FILES_ENDPOINT}/{id}"))
            .await
    }
}
