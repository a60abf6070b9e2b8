//! Integration tests for the API client against a throwaway local HTTP server.

use std::sync::Arc;
use std::time::Duration;

use elimu_api::{
    ApiClient, ApiConfig, ApiError, AuthMode, AuthStore, CancellationSource, MemoryAuthStore,
    RequestOptions,
};
use elimu_model::{LoginRequest, PaymentRequest, PhoneNumber};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one canned response and hand back the raw request text.
async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (base, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client(base: &str, store: Arc<MemoryAuthStore>) -> ApiClient {
    ApiClient::new(ApiConfig::with_base_url(base), store).unwrap()
}

#[tokio::test]
async fn test_server_error_rejects_with_status() {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;
    let client = client(&base, Arc::new(MemoryAuthStore::new()));

    let err = client
        .request("/resources/", RequestOptions::get())
        .await
        .unwrap_err();

    assert_eq!(err.status(), 500);
    assert!(matches!(&err, ApiError::Http { message, .. } if message == "boom"));
    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/resources/ HTTP/1.1"));
}

#[tokio::test]
async fn test_no_content_resolves_to_none() {
    let (base, server) = serve_once("204 No Content", "").await;
    let client = client(&base, Arc::new(MemoryAuthStore::new()));

    let value = client
        .request("/resources/1/", RequestOptions::get())
        .await
        .unwrap();

    assert!(value.is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn test_unparsable_success_body_is_decode_error() {
    let (base, server) = serve_once("200 OK", "<html>maintenance</html>").await;
    let client = client(&base, Arc::new(MemoryAuthStore::new()));

    let err = client
        .request("/resources/", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.status(), 0);
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_is_status_zero() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    drop(listener);

    let client = client(&base, Arc::new(MemoryAuthStore::new()));
    let err = client
        .request("/resources/", RequestOptions::get())
        .await
        .unwrap_err();

    assert_eq!(err.status(), 0);
    assert!(matches!(err, ApiError::Network { .. }));
}

#[tokio::test]
async fn test_fetch_resources_normalizes() {
    let body = json!([
        {"id": 1, "title": "Form 4 Biology", "file_url": "b.pdf", "is_free": true},
        {"id": 2, "title": "KCSE Maths", "signed_url": "s.pdf", "file_url": "m.pdf", "price": "50.00"}
    ])
    .to_string();
    let (base, server) = serve_once("200 OK", &body).await;
    let client = client(&base, Arc::new(MemoryAuthStore::new()));

    let resources = client.fetch_resources().await.unwrap();

    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].preview_url.as_deref(), Some("b.pdf"));
    assert_eq!(resources[1].download_url.as_deref(), Some("s.pdf"));
    assert!(!resources[1].is_free);
    assert_eq!(resources[1].price, 50.0);
    server.await.unwrap();
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let (base, server) = serve_once("200 OK", r#"{"is_paid": true}"#).await;
    let store = Arc::new(MemoryAuthStore::with_token("tok-123"));
    let client = client(&base, store);

    assert!(client.is_paid_for(7).await.unwrap());

    let request = server.await.unwrap().to_ascii_lowercase();
    assert!(request.starts_with("get /api/resources/7/is-paid-for http/1.1"));
    assert!(request.contains("authorization: bearer tok-123"));
}

#[tokio::test]
async fn test_required_auth_without_token_sends_nothing() {
    let client = client("http://127.0.0.1:9/api", Arc::new(MemoryAuthStore::new()));

    let err = client
        .request(
            "/users/me/",
            RequestOptions::get().with_auth(AuthMode::Required),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotAuthenticated));
}

#[tokio::test]
async fn test_login_stores_session() {
    let body = json!({
        "token": "access-1",
        "refresh": "refresh-1",
        "user": {"id": 5, "email": "amina@example.com", "first_name": "Amina"}
    })
    .to_string();
    let (base, server) = serve_once("200 OK", &body).await;
    let store = Arc::new(MemoryAuthStore::new());
    let client = client(&base, store.clone());

    let session = client
        .login(&LoginRequest::new("amina@example.com", "pw").unwrap())
        .await
        .unwrap();

    assert_eq!(session.access_token, "access-1");
    assert_eq!(store.get_token().as_deref(), Some("access-1"));
    assert_eq!(store.current_user().unwrap().display_name(), "Amina");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/users/auth/login/ HTTP/1.1"));
    assert!(request.contains(r#""email":"amina@example.com""#));
}

#[tokio::test]
async fn test_legacy_login_reads_access_field() {
    let body = json!({"access": "access-2", "refresh": "refresh-2"}).to_string();
    let (base, server) = serve_once("200 OK", &body).await;
    let store = Arc::new(MemoryAuthStore::new());
    let client = client(&base, store.clone());

    client
        .login_legacy(&LoginRequest::new("amina@example.com", "pw").unwrap())
        .await
        .unwrap();

    assert_eq!(store.get_token().as_deref(), Some("access-2"));
    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/token/ HTTP/1.1"));
}

#[tokio::test]
async fn test_login_failure_message() {
    let (base, server) = serve_once("401 Unauthorized", r#"{"message":"Invalid credentials."}"#).await;
    let store = Arc::new(MemoryAuthStore::new());
    let client = client(&base, store.clone());

    let err = client
        .login(&LoginRequest::new("a@b.c", "wrong").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), 401);
    assert_eq!(err.user_message(), "Invalid credentials.");
    assert!(store.get_token().is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn test_initiate_payment_posts_phone() {
    let (base, server) = serve_once("200 OK", r#"{"message":"STK Push initiated"}"#).await;
    let client = client(&base, Arc::new(MemoryAuthStore::with_token("t")));

    let receipt = client
        .initiate_payment(&PaymentRequest {
            resource_id: 3,
            phone: PhoneNumber::parse("0712345678").unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(receipt.message.as_deref(), Some("STK Push initiated"));
    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/payment/initiate/ HTTP/1.1"));
    assert!(request.contains(r#""phone":"0712345678""#));
    assert!(request.contains(r#""resource_id":3"#));
}

#[tokio::test]
async fn test_cancellation_abandons_request() {
    // Accepts the connection but never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });

    let client = client(&base, Arc::new(MemoryAuthStore::new()));
    let source = CancellationSource::new();
    let token = source.token();

    let request = tokio::spawn(async move {
        client
            .request_cancellable("/resources/", RequestOptions::get(), &token)
            .await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    source.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), request)
        .await
        .expect("cancelled request returns promptly")
        .unwrap();
    assert!(matches!(result, Err(ApiError::Cancelled)));
}
