//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use futures::StreamExt;
use searchwire::endpoint::Segment::{Literal, Param};
use searchwire::{
    BodyKind, EndpointDescriptor, Headers, HttpRequest, HttpResponse, PathVariant, ResponseBody,
    RestMethod, Transport, TransportError,
};

pub static WIDGETS: EndpointDescriptor = EndpointDescriptor {
    name: "widgets.get",
    description: "Returns widgets",
    docs_url: None,
    variants: &[
        PathVariant::new(RestMethod::Get, &[Literal("widgets")]),
        PathVariant::new(RestMethod::Get, &[Literal("widgets"), Param("id")]),
    ],
    query: &["verbose"],
    body: BodyKind::None,
};

pub static INDEX_DOC: EndpointDescriptor = EndpointDescriptor {
    name: "document.index",
    description: "Stores a document",
    docs_url: None,
    variants: &[
        PathVariant::new(
            RestMethod::Put,
            &[Param("index"), Literal("_doc"), Param("id")],
        ),
        PathVariant::new(RestMethod::Post, &[Param("index"), Literal("_doc")]),
    ],
    query: &["refresh", "routing"],
    body: BodyKind::Required,
};

/// Records every request and answers with a canned status and body.
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    status: u16,
    body: Bytes,
    released: Option<Arc<AtomicBool>>,
}

impl RecordingTransport {
    pub fn new(status: u16) -> Self {
        Self::with_body(status, "")
    }

    pub fn with_body(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            status,
            body: body.into(),
            released: None,
        }
    }

    /// Streams the body and sets `flag` once the stream is dropped.
    pub fn tracking_release(mut self, flag: Arc<AtomicBool>) -> Self {
        self.released = Some(flag);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

impl Transport for RecordingTransport {
    async fn perform(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        let body = match &self.released {
            Some(flag) => ResponseBody::from_stream(
                ReleaseTracker::new(self.body.clone(), Arc::clone(flag)).boxed(),
            ),
            None => ResponseBody::from_bytes(self.body.clone()),
        };
        Ok(HttpResponse::new(self.status, Headers::new(), body))
    }
}

/// Body stream yielding single-byte chunks that flags its own drop.
pub struct ReleaseTracker {
    chunks: VecDeque<Bytes>,
    released: Arc<AtomicBool>,
}

impl ReleaseTracker {
    pub fn new(body: Bytes, released: Arc<AtomicBool>) -> Self {
        let chunks = (0..body.len()).map(|i| body.slice(i..i + 1)).collect();
        Self { chunks, released }
    }
}

impl Stream for ReleaseTracker {
    type Item = Result<Bytes, TransportError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().chunks.pop_front().map(Ok))
    }
}

impl Drop for ReleaseTracker {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}
