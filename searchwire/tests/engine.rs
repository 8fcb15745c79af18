//! End-to-end behaviour of the engine against an in-memory transport.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::{RecordingTransport, INDEX_DOC, WIDGETS};
use proptest::prelude::*;
use searchwire::negotiate::{ACCEPT, CONTENT_TYPE};
use searchwire::{ApiError, BuildError, Client, RestMethod, COMPATIBLE_MEDIA_TYPE};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Doc {
    title: String,
    views: u32,
}

#[tokio::test]
async fn widgets_variants_dispatch() {
    let client = Client::new(RecordingTransport::new(200));

    let mut one = client.endpoint(&WIDGETS);
    one.path_param("id", "42");
    assert!(one.is_success().await.unwrap());
    let sent = client.transport().last();
    assert_eq!(sent.method, RestMethod::Get);
    assert_eq!(sent.path, "/widgets/42");

    assert!(client.endpoint(&WIDGETS).is_success().await.unwrap());
    assert_eq!(client.transport().last().path, "/widgets");

    let mut bad = client.endpoint(&WIDGETS);
    bad.path_param("id", "42").path_param("color", "red");
    let err = bad.is_success().await.unwrap_err();
    assert!(matches!(err, ApiError::Build(BuildError::PathResolution { .. })));
    assert_eq!(client.transport().requests().len(), 2);
}

#[tokio::test]
async fn method_follows_selected_variant() {
    let client = Client::new(RecordingTransport::new(201));

    let mut create = client.endpoint(&INDEX_DOC);
    create.path_param("index", "articles").body(Doc {
        title: "Rust".into(),
        views: 1,
    });
    create.perform().await.unwrap();
    let sent = client.transport().last();
    assert_eq!(sent.method, RestMethod::Post);
    assert_eq!(sent.path, "/articles/_doc");

    create.path_param("id", "a/b?c");
    create.perform().await.unwrap();
    let sent = client.transport().last();
    assert_eq!(sent.method, RestMethod::Put);
    assert_eq!(sent.path, "/articles/_doc/a%2Fb%3Fc");
}

#[tokio::test]
async fn dot_segment_ids_never_dispatch() {
    let client = Client::new(RecordingTransport::new(200));

    for id in ["..", "."] {
        let mut index = client.endpoint(&INDEX_DOC);
        index.path_param("index", "articles").path_param("id", id).raw("{}");
        let err = index.perform().await.unwrap_err();
        assert_eq!(err.endpoint(), Some("document.index"));
        assert!(matches!(
            err,
            ApiError::Build(BuildError::DotSegment { param: "id", .. })
        ));
    }
    assert!(client.transport().requests().is_empty());

    let mut index = client.endpoint(&INDEX_DOC);
    index.path_param("index", "articles").path_param("id", "%2E%2E");
    let built = index.build().unwrap();
    let url = built.url(&Url::parse("http://localhost:9200").unwrap()).unwrap();
    assert_eq!(url.path(), "/articles/_doc/%252E%252E");
}

#[tokio::test]
async fn structured_body_round_trips() {
    let client = Client::new(RecordingTransport::new(200));
    let doc = Doc {
        title: "Search".into(),
        views: 12,
    };

    let mut index = client.endpoint(&INDEX_DOC);
    index.path_param("index", "articles").body(doc.clone());
    index.perform().await.unwrap();

    let sent = client.transport().last();
    let back: Doc = serde_json::from_slice(&sent.body).unwrap();
    assert_eq!(back, doc);
    assert_eq!(sent.headers.get(CONTENT_TYPE), Some(COMPATIBLE_MEDIA_TYPE));
}

#[tokio::test]
async fn caller_headers_survive_negotiation() {
    let client = Client::new(RecordingTransport::new(200));

    let mut index = client.endpoint(&INDEX_DOC);
    index
        .path_param("index", "articles")
        .header("content-type", "application/json")
        .header("X-Opaque-Id", "import-7")
        .raw(r#"{"title":"raw"}"#);
    index.perform().await.unwrap();

    let sent = client.transport().last();
    assert_eq!(sent.headers.get(CONTENT_TYPE), Some("application/json"));
    assert_eq!(sent.headers.get(ACCEPT), Some(COMPATIBLE_MEDIA_TYPE));
    assert_eq!(sent.headers.get("x-opaque-id"), Some("import-7"));
}

#[tokio::test]
async fn redispatch_after_mutation_rebuilds() {
    let client = Client::new(RecordingTransport::new(200));
    let mut req = client.endpoint(&WIDGETS);

    req.perform().await.unwrap();
    req.path_param("id", "1").query("verbose", true);
    req.perform().await.unwrap();
    req.perform().await.unwrap();

    let targets: Vec<String> = client
        .transport()
        .requests()
        .iter()
        .map(|r| r.path_and_query())
        .collect();
    assert_eq!(
        targets,
        vec!["/widgets", "/widgets/1?verbose=true", "/widgets/1?verbose=true"]
    );
}

#[tokio::test]
async fn distinct_requests_dispatch_concurrently() {
    let client = Client::new(RecordingTransport::new(200));

    let mut a = client.endpoint(&WIDGETS);
    a.path_param("id", "a");
    let mut b = client.endpoint(&WIDGETS);
    b.path_param("id", "b");
    let c = client.endpoint(&WIDGETS);

    let (ra, rb, rc) = futures::join!(a.is_success(), b.is_success(), c.is_success());
    assert!(ra.unwrap() && rb.unwrap() && rc.unwrap());

    let mut paths: Vec<String> = client
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.path)
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["/widgets", "/widgets/a", "/widgets/b"]);
}

#[tokio::test]
async fn spawned_dispatch_shares_transport() {
    let client = Client::new(RecordingTransport::new(204));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut req = client.endpoint(&WIDGETS);
            req.path_param("id", i.to_string());
            tokio::spawn(async move { req.is_success().await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }
    assert_eq!(client.transport().requests().len(), 4);
}

#[tokio::test]
async fn is_success_releases_body() {
    for status in [200, 500] {
        let released = Arc::new(AtomicBool::new(false));
        let transport = RecordingTransport::with_body(status, r#"{"acknowledged":true}"#)
            .tracking_release(Arc::clone(&released));
        let client = Client::new(transport);

        let outcome = client.endpoint(&WIDGETS).is_success().await.unwrap();
        assert_eq!(outcome, status == 200);
        assert!(released.load(Ordering::SeqCst), "body not released for {status}");
    }
}

#[tokio::test]
async fn send_releases_body_on_error_status() {
    let released = Arc::new(AtomicBool::new(false));
    let transport = RecordingTransport::with_body(409, "version conflict")
        .tracking_release(Arc::clone(&released));
    let client = Client::new(transport);

    let err = client
        .endpoint(&WIDGETS)
        .send::<searchwire::response::JsonFormat<serde_json::Value>>()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test]
async fn cancellation_token_reaches_transport() {
    let client = Client::new(RecordingTransport::new(200));
    let token = searchwire::CancellationToken::new();

    let mut req = client.endpoint(&WIDGETS);
    req.cancellation(token.clone());
    req.perform().await.unwrap();

    let sent = client.transport().last();
    let carried = sent.cancellation.expect("token not propagated");
    token.cancel();
    assert!(carried.is_cancelled());
}

proptest! {
    #[test]
    fn raw_body_always_wins(raw in proptest::collection::vec(any::<u8>(), 0..64), title in ".*", views in any::<u32>()) {
        let client = Client::new(());
        let mut req = client.endpoint(&INDEX_DOC);
        req.path_param("index", "articles")
            .body(Doc { title, views })
            .raw(raw.clone());
        let built = req.build().unwrap();
        prop_assert_eq!(&built.body[..], &raw[..]);
    }

    #[test]
    fn content_type_iff_body(raw in proptest::collection::vec(any::<u8>(), 0..8)) {
        let client = Client::new(());
        let mut req = client.endpoint(&WIDGETS);
        req.raw(raw.clone());
        let built = req.build().unwrap();
        prop_assert_eq!(built.headers.contains(CONTENT_TYPE), !raw.is_empty());
        prop_assert!(built.headers.contains(ACCEPT));
    }

    #[test]
    fn path_values_are_single_segments(id in "\\PC+") {
        prop_assume!(id != "." && id != "..");
        let client = Client::new(());
        let mut req = client.endpoint(&WIDGETS);
        req.path_param("id", id.clone());
        let built = req.build().unwrap();
        let url = built.url(&Url::parse("http://localhost:9200").unwrap()).unwrap();
        let rest = url.path().strip_prefix("/widgets/").unwrap();
        prop_assert!(!rest.contains('/'));
        let decoded = percent_encoding::percent_decode_str(rest).decode_utf8().unwrap();
        prop_assert_eq!(decoded.as_ref(), id.as_str());
    }
}
