//! BrowserClient against a local HTTP server

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use repotui::api::{BrowserClient, BrowserService};

#[derive(Debug)]
struct Seen {
    method: String,
    url: String,
    accept: Option<String>,
}

/// Serve one canned response per request, in order, then stop
fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<Seen>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to start test server");
    let port = server.server_addr().to_ip().unwrap().port();
    let (seen_tx, seen_rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok(request) = server.recv() else {
                return;
            };
            let accept = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Accept"))
                .map(|h| h.value.as_str().to_string());
            let _ = seen_tx.send(Seen {
                method: request.method().to_string(),
                url: request.url().to_string(),
                accept,
            });
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .unwrap(),
                );
            let _ = request.respond(response);
        }
    });

    (format!("http://127.0.0.1:{}/cxf/browser", port), seen_rx)
}

fn client(base_url: String) -> BrowserClient {
    BrowserClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_tree_without_repository_is_empty() {
    let (url, seen) = serve(vec![(204, "")]);
    let folders = client(url).get_directory_tree().await.unwrap();
    assert!(folders.is_empty());

    let seen = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.url, "/cxf/browser/loadDirectoryTree");
    assert_eq!(seen.accept.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_tree_parses_folders_with_null_lists() {
    let body = r#"[
        {"name": "public", "path": "/public", "depth": 0, "hasChildren": true,
         "children": null, "files": [
            {"name": "sales", "type": "transformation", "path": "/public/sales.ktr",
             "objectId": {"id": "abc"}, "date": 1700000000000}
         ]},
        {"name": "etl", "path": "/public/etl", "parent": "/public", "depth": 1}
    ]"#;
    let (url, _seen) = serve(vec![(200, body)]);
    let folders = client(url).get_directory_tree().await.unwrap();

    assert_eq!(folders.len(), 2);
    assert!(folders[0].has_children);
    assert!(folders[0].children.is_empty());
    assert_eq!(folders[0].files[0].id(), Some("abc"));
    assert!(folders[0].files[0].in_result);
    assert_eq!(folders[1].parent.as_deref(), Some("/public"));
}

#[tokio::test]
async fn test_open_encodes_query() {
    let (url, seen) = serve(vec![(200, "")]);
    let opened = client(url)
        .open_file("a b/c", "transformation")
        .await
        .unwrap();
    assert!(opened);

    let seen = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        seen.url,
        "/cxf/browser/loadFile?id=a%20b%2Fc&type=transformation"
    );
}

#[tokio::test]
async fn test_save_accepted_only_on_ok() {
    let (url, seen) = serve(vec![(202, ""), (200, "")]);
    let client = client(url);
    assert!(!client.save_file("/public", "new job").await.unwrap());
    assert!(client.save_file("/public", "new job").await.unwrap());

    let first = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        first.url,
        "/cxf/browser/saveFile?path=%2Fpublic&name=new%20job"
    );
}

#[tokio::test]
async fn test_rename_posts_and_returns_object_id() {
    let (url, seen) = serve(vec![(200, r#"{"id": "xyz"}"#)]);
    let object_id = client(url)
        .rename("abc", "revenue", "/public/sales.ktr", "transformation")
        .await
        .unwrap();
    assert_eq!(object_id.id, "xyz");

    let seen = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(
        seen.url,
        "/cxf/browser/rename?id=abc&path=%2Fpublic%2Fsales.ktr&newName=revenue&type=transformation"
    );
}

#[tokio::test]
async fn test_server_error_surfaces_status() {
    let (url, _seen) = serve(vec![(500, "boom")]);
    let err = client(url).get_recent_files().await.unwrap_err();
    let text = format!("{:#}", err);
    assert!(text.contains("Failed to load recent files"), "{}", text);
    assert!(text.contains("500"), "{}", text);
}
