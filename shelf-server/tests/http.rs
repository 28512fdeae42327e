use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use shelf_server::{build, ServerConfig};

const LIMIT: u64 = 64;

struct TestApp {
    router: Router,
    files: TempDir,
    public: TempDir,
}

fn test_app() -> TestApp {
    let files = TempDir::new().unwrap();
    let public = TempDir::new().unwrap();
    std::fs::write(public.path().join("index.html"), "<h1>shelf</h1>").unwrap();

    let config = ServerConfig::default()
        .with_files_root(files.path())
        .with_public_root(public.path())
        .with_max_blob_bytes(LIMIT);

    TestApp {
        router: build(config),
        files,
        public,
    }
}

async fn send(app: &TestApp, req: Request<Body>) -> axum::response::Response {
    app.router.clone().oneshot(req).await.unwrap()
}

async fn body_bytes(res: axum::response::Response) -> Vec<u8> {
    res.into_body().collect().await.unwrap().to_bytes().to_vec()
}

fn request(method: &str, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn index_returns_the_static_document() {
    let app = test_app();

    let res = send(&app, request("GET", "/", Body::empty())).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(body_bytes(res).await, b"<h1>shelf</h1>");
}

#[tokio::test]
async fn nested_paths_are_rejected_on_every_method() {
    let app = test_app();

    for method in ["GET", "POST", "DELETE"] {
        for uri in ["/nested/path", "/has..dots.txt", "/..%2Fescape"] {
            let res = send(&app, request(method, uri, Body::empty())).await;
            assert_eq!(
                res.status(),
                StatusCode::BAD_REQUEST,
                "{method} {uri} should be 400"
            );
        }
    }

    // No storage operation was attempted for any of them.
    assert_eq!(std::fs::read_dir(app.files.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn names_are_percent_decoded_before_validation() {
    let app = test_app();

    // Raw captures ("a%2Fb", "x%2e%2ey.txt") contain neither a separator nor
    // a parent token; only the decoded forms ("a/b", "x..y.txt") do.
    let res = send(&app, request("POST", "/a%2Fb", Body::from("data"))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&app, request("GET", "/x%2e%2ey.txt", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&app, request("DELETE", "/a%2Fb", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(std::fs::read_dir(app.files.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn upload_then_fetch_round_trip() {
    let app = test_app();

    let res = send(&app, request("POST", "/hello.txt", Body::from("hello world"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_bytes(res).await, b"OK");

    let stored = std::fs::read(app.files.path().join("hello.txt")).unwrap();
    assert_eq!(stored, b"hello world");

    let res = send(&app, request("GET", "/hello.txt", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain"
    );
    assert_eq!(body_bytes(res).await, b"hello world");
}

#[tokio::test]
async fn upload_zero_length_body() {
    let app = test_app();

    let res = send(&app, request("POST", "/empty.bin", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::OK);

    let meta = std::fs::metadata(app.files.path().join("empty.bin")).unwrap();
    assert_eq!(meta.len(), 0);

    let res = send(&app, request("GET", "/empty.bin", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_bytes(res).await.is_empty());
}

#[tokio::test]
async fn uploading_an_existing_name_is_409_and_leaves_it_unchanged() {
    let app = test_app();

    let res = send(&app, request("POST", "/taken.txt", Body::from("original"))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&app, request("POST", "/taken.txt", Body::from("intruder"))).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(body_bytes(res).await, b"File exists");

    // Zero-length re-upload conflicts too.
    let res = send(&app, request("POST", "/taken.txt", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let stored = std::fs::read(app.files.path().join("taken.txt")).unwrap();
    assert_eq!(stored, b"original");
}

#[tokio::test]
async fn declared_oversize_is_413_and_creates_nothing() {
    let app = test_app();

    let req = Request::builder()
        .method("POST")
        .uri("/big.bin")
        .header(header::CONTENT_LENGTH, (LIMIT + 1).to_string())
        .body(Body::from(vec![0u8; (LIMIT + 1) as usize]))
        .unwrap();
    let res = send(&app, req).await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res.headers().get(header::CONNECTION).unwrap(), "close");
    assert_eq!(body_bytes(res).await, b"File is too big!");
    assert!(!app.files.path().join("big.bin").exists());
}

#[tokio::test]
async fn streamed_oversize_without_declared_length_is_413_and_rolls_back() {
    let app = test_app();

    // No Content-Length header: only the observed byte count can catch this.
    let res = send(
        &app,
        request("POST", "/big.bin", Body::from(vec![0u8; (LIMIT * 2) as usize])),
    )
    .await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!app.files.path().join("big.bin").exists());
}

#[tokio::test]
async fn delete_then_fetch_is_404() {
    let app = test_app();

    send(&app, request("POST", "/gone.txt", Body::from("bye"))).await;

    let res = send(&app, request("DELETE", "/gone.txt", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_bytes(res).await, b"Ok");

    let res = send(&app, request("GET", "/gone.txt", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(res).await, b"Not found");

    let res = send(&app, request("DELETE", "/gone.txt", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fetching_a_missing_blob_is_404() {
    let app = test_app();

    let res = send(&app, request("GET", "/ghost.txt", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(res).await, b"Not found");
}

#[tokio::test]
async fn post_and_delete_on_the_root_are_404() {
    let app = test_app();

    let res = send(&app, request("POST", "/", Body::from("data"))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, request("DELETE", "/", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_index_document_is_404() {
    let app = test_app();
    std::fs::remove_file(app.public.path().join("index.html")).unwrap();

    let res = send(&app, request("GET", "/", Body::empty())).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
