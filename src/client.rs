//! Entry point tying configuration, transport and resource APIs together.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWrite;

use crate::api::{
    ChatCompletionsApi, CompletionsApi, EditsApi, EmbeddingsApi, FilesApi, FineTunesApi,
    ImagesApi, ModelsApi, ModerationsApi,
};
use crate::core::{
    ClientConfig, Error, HttpTransport, RequestDescriptor, Transport, decode_response,
    encode_form, parse_json, stream_response, transport::CONTENT_TYPE_JSON,
};

/// Handle to the OpenAI API.
///
/// Cheap to clone; clones share the configuration and the underlying
/// connection pool. Safe to use from many tasks at once.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let config = Arc::new(config);
        let transport = HttpTransport::new(Arc::clone(&config))?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// Builds a client on top of a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn models(&self) -> ModelsApi<'_> {
        ModelsApi::new(self)
    }

    pub fn completions(&self) -> CompletionsApi<'_> {
        CompletionsApi::new(self)
    }

    pub fn chat_completions(&self) -> ChatCompletionsApi<'_> {
        ChatCompletionsApi::new(self)
    }

    pub fn edits(&self) -> EditsApi<'_> {
        EditsApi::new(self)
    }

    pub fn images(&self) -> ImagesApi<'_> {
        ImagesApi::new(self)
    }

    pub fn embeddings(&self) -> EmbeddingsApi<'_> {
        EmbeddingsApi::new(self)
    }

    pub fn files(&self) -> FilesApi<'_> {
        FilesApi::new(self)
    }

    pub fn fine_tunes(&self) -> FineTunesApi<'_> {
        FineTunesApi::new(self)
    }

    pub fn moderations(&self) -> ModerationsApi<'_> {
        ModerationsApi::new(self)
    }

    /// Sends a request and returns the success body or the decoded error.
    pub async fn request_bytes(&self, request: RequestDescriptor) -> Result<Bytes, Error> {
        let response = self.transport.send(request).await?;
        decode_response(response).await
    }

    /// Sends a request and streams a `200 OK` body into `sink`.
    pub async fn request_stream<W>(
        &self,
        request: RequestDescriptor,
        sink: &mut W,
    ) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let response = self.transport.send(request).await?;
        stream_response(response, sink).await
    }

    pub(crate) async fn get_json<Res>(&self, path: &str) -> Result<Res, Error>
    where
        Res: DeserializeOwned,
    {
        self.send_json::<(), Res>(Method::GET, path, None).await
    }

    pub(crate) async fn delete_json<Res>(&self, path: &str) -> Result<Res, Error>
    where
        Res: DeserializeOwned,
    {
        self.send_json::<(), Res>(Method::DELETE, path, None).await
    }

    pub(crate) async fn post_json<Req, Res>(&self, path: &str, body: Option<&Req>) -> Result<Res, Error>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    async fn send_json<Req, Res>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Req>,
    ) -> Result<Res, Error>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let mut request = RequestDescriptor::new(method, self.config.url(path));
        if let Some(body) = body {
            let json = serde_json::to_vec(body).map_err(Error::Encode)?;
            request = request.with_body(json, CONTENT_TYPE_JSON);
        }

        let bytes = self.request_bytes(request).await?;
        parse_json(&bytes)
    }

    pub(crate) async fn post_form<P, Res>(&self, path: &str, params: &P) -> Result<Res, Error>
    where
        P: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let form = encode_form(params).await?;
        let request = RequestDescriptor::new(Method::POST, self.config.url(path))
            .with_body(form.body, form.content_type);

        let bytes = self.request_bytes(request).await?;
        parse_json(&bytes)
    }

    pub(crate) async fn download<W>(&self, path: &str, sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let request = RequestDescriptor::new(Method::GET, self.config.url(path));
        self.request_stream(request, sink).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
