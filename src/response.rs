//! Response validation.
//!
//! Every HTTP exchange is collapsed into an [`Envelope`] (status, declared
//! content type, body bytes) exactly once; everything after that is a pure
//! transform. Callers state what they negotiated with [`ExpectedContent`]
//! and get either a decoded payload or a classified error; there is no
//! fallback decoding.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{CodeDxError, Result};

/// Content types Code Dx serves, with the exact strings it puts on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Csv,
    Pdf,
    Xml,
    Text,
}

impl ContentType {
    /// The wire representation, as sent in `Accept` and compared against
    /// `Content-Type`. Comparison is exact: Code Dx is consistent about
    /// these strings, including the JSON charset suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json;charset=utf-8",
            ContentType::Csv => "text/csv",
            ContentType::Pdf => "application/pdf",
            ContentType::Xml => "text/xml",
            ContentType::Text => "text/plain",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller negotiated for the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedContent {
    /// A JSON document, parsed into structured data.
    Json,
    /// Raw bytes of the given type (reports, file contents).
    Binary(ContentType),
    /// No body expected (PUT/DELETE acknowledgements).
    Empty,
}

/// A decoded response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// The raw outcome of one HTTP exchange.
///
/// Reading the body consumes the `reqwest` response up front so validation
/// and decoding stay synchronous and side-effect free.
#[derive(Debug, Clone)]
pub struct Envelope {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Envelope {
    /// Collect a transport response into an envelope.
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?.to_vec();
        Ok(Self {
            status,
            content_type,
            body,
        })
    }

    /// Assemble an envelope directly from parts.
    pub fn new(status: u16, content_type: Option<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// HTTP status code of the exchange.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Declared `Content-Type` header, if the server sent one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Fail on any non-success status, carrying the body text when the
    /// server included one.
    fn check_status(&self) -> Result<()> {
        if self.status <= 299 {
            return Ok(());
        }
        let message = match std::str::from_utf8(&self.body) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => format!("HTTP {}", self.status),
        };
        Err(CodeDxError::Server {
            status: self.status,
            message,
        })
    }

    fn check_content_type(&self, expected: ContentType) -> Result<()> {
        match self.content_type.as_deref() {
            Some(declared) if declared == expected.as_str() => Ok(()),
            found => Err(CodeDxError::ContentTypeMismatch {
                expected,
                found: found.map(str::to_owned),
            }),
        }
    }

    /// Validate and decode according to what was negotiated.
    ///
    /// Status is checked first: a non-2xx exchange is a server error no
    /// matter what the body looks like. A 2xx exchange whose declared
    /// content type differs from the negotiated one is a decoding failure:
    /// the request nominally succeeded but the payload cannot be trusted.
    /// An expected-empty success synthesizes the canonical
    /// `{"status": "Success"}` acknowledgement instead of erroring.
    pub fn decode(self, expected: ExpectedContent) -> Result<Payload> {
        self.check_status()?;
        match expected {
            ExpectedContent::Json => {
                self.check_content_type(ContentType::Json)?;
                let value = serde_json::from_slice(&self.body)?;
                Ok(Payload::Json(value))
            }
            ExpectedContent::Binary(content_type) => {
                self.check_content_type(content_type)?;
                Ok(Payload::Bytes(self.body))
            }
            ExpectedContent::Empty => Ok(Payload::Json(json!({ "status": "Success" }))),
        }
    }

    /// Validate as JSON and deserialize into the caller's type.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        match self.decode(ExpectedContent::Json)? {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            Payload::Bytes(_) => unreachable!("JSON dispatch returned bytes"),
        }
    }

    /// Validate as raw content of the given type and return the bytes.
    pub fn content(self, content_type: ContentType) -> Result<Vec<u8>> {
        match self.decode(ExpectedContent::Binary(content_type))? {
            Payload::Bytes(bytes) => Ok(bytes),
            Payload::Json(_) => unreachable!("binary dispatch returned JSON"),
        }
    }

    /// Validate a success that carries no meaningful body.
    pub fn acknowledge(self) -> Result<serde_json::Value> {
        match self.decode(ExpectedContent::Empty)? {
            Payload::Json(value) => Ok(value),
            Payload::Bytes(_) => unreachable!("empty dispatch returned bytes"),
        }
    }
}
