//! Response formats used by [`EndpointRequest::send`](crate::EndpointRequest::send).
//!
//! A format decides how a successful response body becomes a typed value.
//! The format type is chosen per call, so one endpoint can be decoded into a
//! typed struct, a `serde_json::Value`, or left as raw bytes.

use std::future::Future;
use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Strategy for turning a response body into a typed value.
pub trait ResponseFormat: Send + Sync {
    /// The output type after parsing.
    type Output: Send;

    /// Parses a response body.
    fn parse(body: Bytes) -> impl Future<Output = Result<Self::Output, ValidationError>> + Send;
}

/// Deserializes a JSON body into `T`.
///
/// An empty body is reported as [`ValidationError::EmptyBody`] rather than a
/// parse error at column 0.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    async fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        if body.is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Body as UTF-8 text (the `_cat` APIs).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormat;

impl ResponseFormat for PlainTextFormat {
    type Output = String;

    async fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        String::from_utf8(body.to_vec()).map_err(|e| ValidationError::ContentTypeMismatch {
            expected: "valid UTF-8 text".to_string(),
            actual: format!("invalid UTF-8: {e}"),
        })
    }
}

/// Body bytes, uninterpreted.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryFormat;

impl ResponseFormat for BinaryFormat {
    type Output = Bytes;

    async fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        Ok(body)
    }
}

/// Discards the body. For acknowledgement-only endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ResponseFormat for NoContent {
    type Output = ();

    async fn parse(_body: Bytes) -> Result<Self::Output, ValidationError> {
        Ok(())
    }
}
