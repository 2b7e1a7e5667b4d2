//! `multipart/form-data` encoding for file-bearing requests.
//!
//! Parameters are flattened through their `Serialize` impl, so serde field
//! attributes decide names and which fields are omitted. Fields named in
//! [`FILE_FIELDS`] carry a local path whose contents are attached as a file
//! part; every other field becomes a text part.

use std::path::{Path, PathBuf};

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::Error;

/// Parameter names whose value is a path to upload rather than text.
pub const FILE_FIELDS: &[&str] = &["image", "mask", "file"];

/// A finished multipart body and the content type announcing its boundary.
#[derive(Debug, Clone)]
pub struct EncodedForm {
    pub body: Bytes,
    pub content_type: String,
}

/// Flattens `params` and encodes it as `multipart/form-data`.
///
/// Fails before producing any output if a referenced file cannot be read.
pub async fn encode_form<P>(params: &P) -> Result<EncodedForm, Error>
where
    P: Serialize + ?Sized,
{
    let fields = flatten(params)?;
    let mut writer = MultipartWriter::new();

    for (name, value) in fields {
        let text = field_text(&value);

        if FILE_FIELDS.contains(&name.as_str()) && !text.is_empty() {
            let path = PathBuf::from(text);
            let contents = tokio::fs::read(&path)
                .await
                .map_err(|source| Error::File {
                    path: path.clone(),
                    source,
                })?;
            writer.write_file(&name, &file_name(&path), &contents);
            continue;
        }

        writer.write_field(&name, &text);
    }

    let content_type = writer.content_type();
    Ok(EncodedForm {
        body: writer.finish(),
        content_type,
    })
}

fn flatten<P>(params: &P) -> Result<Map<String, Value>, Error>
where
    P: Serialize + ?Sized,
{
    match serde_json::to_value(params).map_err(Error::Encode)? {
        Value::Object(map) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => Err(Error::Form(format!(
            "expected a record of named fields, got {other}"
        ))),
    }
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Minimal multipart writer: parts are appended as they come, the closing
/// delimiter is written by [`finish`](Self::finish).
pub struct MultipartWriter {
    boundary: String,
    buf: BytesMut,
    parts: usize,
}

impl MultipartWriter {
    pub fn new() -> Self {
        Self::with_boundary(format!("{:032x}", rand::random::<u128>()))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf: BytesMut::new(),
            parts: 0,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn write_field(&mut self, name: &str, value: &str) {
        let disposition = format!("form-data; name=\"{}\"", escape_quotes(name));
        self.write_part(&disposition, None, value.as_bytes());
    }

    pub fn write_file(&mut self, name: &str, filename: &str, contents: &[u8]) {
        let disposition = format!(
            "form-data; name=\"{}\"; filename=\"{}\"",
            escape_quotes(name),
            escape_quotes(filename)
        );
        self.write_part(&disposition, Some("application/octet-stream"), contents);
    }

    fn write_part(&mut self, disposition: &str, content_type: Option<&str>, contents: &[u8]) {
        if self.parts > 0 {
            self.buf.put_slice(b"\r\n");
        }
        self.buf.put_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf
            .put_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
        if let Some(content_type) = content_type {
            self.buf
                .put_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        self.buf.put_slice(b"\r\n");
        self.buf.put_slice(contents);
        self.parts += 1;
    }

    pub fn finish(mut self) -> Bytes {
        if self.parts > 0 {
            self.buf.put_slice(b"\r\n");
        }
        self.buf
            .put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf.freeze()
    }
}

impl Default for MultipartWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
