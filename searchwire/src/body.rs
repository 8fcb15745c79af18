//! Request body resolution.
//!
//! A request holds at most one raw override and at most one structured
//! payload. [`RequestBody::resolve`] applies a fixed precedence:
//!
//! 1. the raw override, verbatim, if set (a structured payload is ignored);
//! 2. otherwise the structured payload serialized to JSON;
//! 3. otherwise an empty body.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{BuildError, ValidationError};

type SerializeFn = dyn Fn() -> Result<Vec<u8>, serde_json::Error> + Send + Sync;

/// A structured payload whose serialization is deferred to build time.
#[derive(Clone)]
pub struct StructuredBody {
    type_name: &'static str,
    serialize: Arc<SerializeFn>,
}

impl StructuredBody {
    pub fn new<B>(body: B) -> Self
    where
        B: Serialize + Send + Sync + 'static,
    {
        Self {
            type_name: std::any::type_name::<B>(),
            serialize: Arc::new(move || serde_json::to_vec(&body)),
        }
    }

    /// Fully qualified Rust type name of the payload.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        (self.serialize)()
    }
}

impl fmt::Debug for StructuredBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredBody")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Raw override and structured payload slots of one request.
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    raw: Option<Bytes>,
    structured: Option<StructuredBody>,
}

impl RequestBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw override, replacing any previous one.
    pub fn set_raw(&mut self, raw: impl Into<Bytes>) {
        self.raw = Some(raw.into());
    }

    /// Sets the structured payload, replacing any previous one.
    pub fn set_structured(&mut self, body: StructuredBody) {
        self.structured = Some(body);
    }

    pub fn raw(&self) -> Option<&Bytes> {
        self.raw.as_ref()
    }

    pub fn structured(&self) -> Option<&StructuredBody> {
        self.structured.as_ref()
    }

    /// Produces the outgoing body bytes.
    ///
    /// ## Errors
    ///
    /// Returns [`BuildError::Serialize`] tagged with `endpoint` if the
    /// structured payload fails to serialize. Never fails when a raw override
    /// is present.
    pub fn resolve(&self, endpoint: &'static str) -> Result<Bytes, BuildError> {
        if let Some(raw) = &self.raw {
            return Ok(raw.clone());
        }

        match &self.structured {
            Some(body) => body
                .to_json()
                .map(Bytes::from)
                .map_err(|source| BuildError::Serialize { endpoint, source }),
            None => Ok(Bytes::new()),
        }
    }
}

/// JSON helpers for request-body types.
///
/// ## Examples
///
/// ```rust
/// use searchwire::JsonBody;
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct ClosePit { id: String }
///
/// impl JsonBody for ClosePit {
///     const TYPE_NAME: &'static str = "ClosePit";
/// }
///
/// let body = ClosePit::from_json(r#"{"id":"abc"}"#).unwrap();
/// assert_eq!(body.id, "abc");
/// assert!(ClosePit::from_json("{").is_err());
/// ```
pub trait JsonBody: Serialize + DeserializeOwned {
    /// Name used in error messages.
    const TYPE_NAME: &'static str;

    /// Parses the body from its JSON text.
    fn from_json(data: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(data).map_err(|source| ValidationError::InvalidBody {
            type_name: Self::TYPE_NAME,
            source,
        })
    }
}
