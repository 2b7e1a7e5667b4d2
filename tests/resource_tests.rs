use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use openai_bindings::api::{
    ChatCompletionParams, ChatMessage, ChatRole, CompletionParams, EditParams, EmbeddingParams,
    FineTuneParams, ImageGenerationParams, ImageResponseFormat, ImageVariationParams,
    ModerationParams,
};
use openai_bindings::{
    Client, ClientConfig, Create, Delete, Error, List, RequestDescriptor, Retrieve, Transport,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header_regex, method, path},
};

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::new(ClientConfig::new("sk-test").with_base_url(server.uri())).unwrap();
    (server, client)
}

fn model_json(id: &str) -> Value {
    json!({
        "id": id,
        "object": "model",
        "owned_by": "openai",
        "created": 1649358449,
        "root": id,
        "parent": null,
        "permission": [{
            "id": "modelperm-1",
            "object": "model_permission",
            "created": 1669085501,
            "allow_create_engine": false,
            "allow_sampling": true,
            "allow_logprobs": true,
            "allow_search_indices": false,
            "allow_view": true,
            "allow_fine_tuning": false,
            "organization": "*",
            "group": null,
            "is_blocking": false
        }]
    })
}

fn file_json(id: &str) -> Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 140,
        "created_at": 1613779121,
        "filename": "train.jsonl",
        "purpose": "fine-tune"
    })
}

fn fine_tune_json(status: &str) -> Value {
    json!({
        "id": "ft-1",
        "object": "fine-tune",
        "model": "curie",
        "created_at": 1614807352,
        "events": [
            { "object": "fine-tune-event", "created_at": 1614807352, "level": "info", "message": "Job enqueued." }
        ],
        "fine_tuned_model": null,
        "hyperparams": {
            "batch_size": 4,
            "learning_rate_multiplier": 0.1,
            "n_epochs": 4,
            "prompt_loss_weight": 0.1
        },
        "organization_id": "org-1",
        "result_files": [],
        "status": status,
        "validation_files": [],
        "training_files": [file_json("file-train")],
        "updated_at": 1614807865
    })
}

fn usage() -> Value {
    json!({ "prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12 })
}

async fn count_items<L: List>(api: &L) -> Result<usize, Error> {
    Ok(api.list().await?.len())
}

#[tokio::test]
async fn models_list_retrieve_delete() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [model_json("gpt-3.5-turbo"), model_json("davinci")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/models/davinci"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_json("davinci")))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/models/curie:ft-acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "curie:ft-acme", "object": "model", "deleted": true
        })))
        .mount(&server)
        .await;

    let models = client.models().list().await.unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].id, "gpt-3.5-turbo");
    assert_eq!(models[0].parent, Value::Null);
    assert_eq!(models[0].permission[0].group, Value::Null);

    assert_eq!(count_items(&client.models()).await.unwrap(), 2);

    let model = client.models().retrieve("davinci").await.unwrap();
    assert_eq!(model.owned_by, "openai");
    assert!(model.permission[0].allow_sampling);

    let deleted = client.models().delete("curie:ft-acme").await.unwrap();
    assert!(deleted.deleted);
}

#[tokio::test]
async fn completion_sends_only_set_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .and(body_json(json!({
            "model": "text-davinci-003",
            "prompt": "Say this is a test",
            "max_tokens": 7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmpl-1",
            "object": "text_completion",
            "created": 1589478378,
            "model": "text-davinci-003",
            "choices": [{ "text": "\n\nThis is a test", "index": 0, "logprobs": null, "finish_reason": "length" }],
            "usage": usage()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = CompletionParams::new("text-davinci-003", "Say this is a test");
    params.max_tokens = Some(7);

    let completion = client.completions().create(&params).await.unwrap();
    assert_eq!(completion.choices[0].text, "\n\nThis is a test");
    assert_eq!(completion.choices[0].finish_reason.as_deref(), Some("length"));
    assert_eq!(completion.usage.total_tokens, 12);
}

#[tokio::test]
async fn chat_completion_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [
                { "role": "system", "content": "Be brief." },
                { "role": "user", "content": "Hello!" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hi." },
                "finish_reason": "stop"
            }],
            "usage": usage()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = ChatCompletionParams::new(
        "gpt-3.5-turbo",
        vec![ChatMessage::system("Be brief."), ChatMessage::user("Hello!")],
    );

    let chat = client.chat_completions().create(&params).await.unwrap();
    assert_eq!(chat.choices[0].message.role, ChatRole::Assistant);
    assert_eq!(chat.choices[0].message.content, "Hi.");
}

#[tokio::test]
async fn edit_and_embedding_and_moderation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/edits"))
        .and(body_json(json!({
            "model": "text-davinci-edit-001",
            "input": "What day of the wek is it?",
            "instruction": "Fix the spelling mistakes"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "edit",
            "created": 1589478378,
            "choices": [{ "text": "What day of the week is it?", "index": 0 }],
            "usage": usage()
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{ "object": "embedding", "embedding": [0.0023, -0.0093], "index": 0 }],
            "model": "text-embedding-ada-002",
            "usage": { "prompt_tokens": 8, "total_tokens": 8 }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/moderations"))
        .and(body_json(json!({ "input": "I want to hug them." })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "modr-1",
            "model": "text-moderation-004",
            "results": [{
                "categories": {
                    "hate": false, "hate/threatening": false, "self-harm": false,
                    "sexual": false, "sexual/minors": false, "violence": true,
                    "violence/graphic": false
                },
                "category_scores": {
                    "hate": 0.01, "hate/threatening": 0.0, "self-harm": 0.0,
                    "sexual": 0.0, "sexual/minors": 0.0, "violence": 0.91,
                    "violence/graphic": 0.02
                },
                "flagged": true
            }]
        })))
        .mount(&server)
        .await;

    let edit = client
        .edits()
        .create(
            &EditParams::new("text-davinci-edit-001", "Fix the spelling mistakes")
                .with_input("What day of the wek is it?"),
        )
        .await
        .unwrap();
    assert_eq!(edit.choices[0].text, "What day of the week is it?");

    let embeddings = client
        .embeddings()
        .create(&EmbeddingParams::new(
            "text-embedding-ada-002",
            vec!["The food was delicious".to_string()],
        ))
        .await
        .unwrap();
    assert_eq!(embeddings.data[0].embedding.len(), 2);
    assert_eq!(embeddings.usage.completion_tokens, 0);

    let moderation = client
        .moderations()
        .create(&ModerationParams::new("I want to hug them."))
        .await
        .unwrap();
    let result = &moderation.results[0];
    assert!(result.flagged);
    assert!(result.categories.violence);
    assert!(result.category_scores.violence > 0.9);
}

#[tokio::test]
async fn image_generation_is_json_and_variation_is_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_json(json!({ "prompt": "a white cat", "n": 1, "response_format": "b64_json" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1589478378,
            "data": [{ "b64_json": "aGk=" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/images/variations"))
        .and(header_regex("content-type", "^multipart/form-data; boundary=.+"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1589478378,
            "data": [{ "url": "https://example.test/a.png" }, { "url": "https://example.test/b.png" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut generation = ImageGenerationParams::new("a white cat");
    generation.n = Some(1);
    generation.response_format = Some(ImageResponseFormat::B64Json);

    let images = client.images().create(&generation).await.unwrap();
    assert_eq!(images[0].b64_json.as_deref(), Some("aGk="));
    assert_eq!(images[0].url, None);

    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("cat.png");
    std::fs::File::create(&image_path)
        .unwrap()
        .write_all(b"\x89PNG\r\n")
        .unwrap();

    let mut variation = ImageVariationParams::new(&image_path);
    variation.n = Some(2);

    let images = client.images().create_variations(&variation).await.unwrap();
    assert_eq!(images.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let upload = requests
        .iter()
        .find(|r| r.url.path() == "/images/variations")
        .unwrap();
    let body = String::from_utf8_lossy(&upload.body);
    assert!(body.contains(r#"name="image"; filename="cat.png""#));
    assert!(body.contains("name=\"n\"\r\n\r\n2\r\n"));
}

#[tokio::test]
async fn files_crud() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [file_json("file-1"), file_json("file-2")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/file-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json("file-1")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json("file-new")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/files/file-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-1", "object": "file", "deleted": true
        })))
        .mount(&server)
        .await;

    assert_eq!(client.files().list().await.unwrap().len(), 2);
    assert_eq!(client.files().retrieve("file-1").await.unwrap().bytes, 140);

    let dir = tempfile::tempdir().unwrap();
    let upload = dir.path().join("train.jsonl");
    std::fs::write(&upload, "{\"prompt\":\"p\",\"completion\":\"c\"}\n").unwrap();

    let created = client
        .files()
        .create(&openai_bindings::api::FileParams::new(&upload, "fine-tune"))
        .await
        .unwrap();
    assert_eq!(created.id, "file-new");

    assert!(client.files().delete("file-1").await.unwrap().deleted);
}

#[tokio::test]
async fn fine_tunes_lifecycle() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fine-tunes"))
        .and(body_json(json!({ "training_file": "file-train", "model": "curie" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fine_tune_json("pending")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fine-tunes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "object": "list", "data": [fine_tune_json("pending")] })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fine-tunes/ft-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fine_tune_json("running")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/fine-tunes/ft-1/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fine_tune_json("cancelled")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fine-tunes/ft-1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                { "object": "fine-tune-event", "created_at": 1, "level": "info", "message": "Job enqueued." },
                { "object": "fine-tune-event", "created_at": 2, "level": "info", "message": "Job started." }
            ]
        })))
        .mount(&server)
        .await;

    let mut params = FineTuneParams::new("file-train");
    params.model = Some("curie".to_string());

    let created = client.fine_tunes().create(&params).await.unwrap();
    assert_eq!(created.status, "pending");
    assert_eq!(created.training_files[0].id, "file-train");
    assert_eq!(created.hyperparams.n_epochs, 4);

    assert_eq!(client.fine_tunes().list().await.unwrap().len(), 1);
    assert_eq!(client.fine_tunes().retrieve("ft-1").await.unwrap().status, "running");
    assert_eq!(client.fine_tunes().cancel("ft-1").await.unwrap().status, "cancelled");

    let events = client.fine_tunes().events("ft-1").await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].message, "Job started.");

    // cancel sends no body
    let requests = server.received_requests().await.unwrap();
    let cancel = requests
        .iter()
        .find(|r| r.url.path() == "/fine-tunes/ft-1/cancel")
        .unwrap();
    assert!(cancel.body.is_empty());
}

struct TimingOut;

#[async_trait]
impl Transport for TimingOut {
    async fn send(&self, _request: RequestDescriptor) -> Result<reqwest::Response, Error> {
        Err(Error::Timeout)
    }
}

#[tokio::test]
async fn injected_transport_timeout_reaches_every_resource() {
    let client = Client::with_transport(ClientConfig::new("sk-test"), Arc::new(TimingOut));

    assert!(client.models().list().await.unwrap_err().is_timeout());
    assert!(client.files().retrieve("f").await.unwrap_err().is_timeout());
    assert!(
        client
            .moderations()
            .create(&ModerationParams::new("x"))
            .await
            .unwrap_err()
            .is_timeout()
    );
    assert!(
        client
            .files()
            .download("f", &mut Vec::<u8>::new())
            .await
            .unwrap_err()
            .is_timeout()
    );
}
