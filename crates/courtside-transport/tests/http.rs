//! Integration tests for the reqwest transport.
//!
//! These spin up a real HTTP server (axum) on a random port and check what
//! actually arrives on the wire: method, path, query, headers and body.

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use axum::body::Bytes;
    use axum::http::{HeaderMap, Method as HttpMethod, StatusCode, Uri};
    use axum::Router;
    use courtside_transport::{
        AuthorizedTransport, HttpRequest, ReqwestTransport, Transport,
        TransportError,
    };

    /// Echoes the request back as `key=value` lines.
    async fn echo(
        method: HttpMethod,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> (StatusCode, String) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string()
        };
        let status = if uri.path() == "/admin/teams" && !headers.contains_key("authorization") {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::OK
        };
        let text = format!(
            "method={method}\nuri={uri}\nauthorization={}\ncontent-type={}\nx-trace={}\nlen={}",
            header("authorization"),
            header("content-type"),
            header("x-trace"),
            body.len(),
        );
        (status, text)
    }

    /// Starts the echo server and returns its base URL.
    async fn start_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new().fallback(echo);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn field<'a>(text: &'a str, key: &str) -> &'a str {
        text.lines()
            .find_map(|line| line.strip_prefix(&format!("{key}=")))
            .unwrap_or_else(|| panic!("missing {key} in {text}"))
    }

    #[tokio::test]
    async fn test_get_with_query_reaches_server() {
        let base = start_server().await;
        let transport = ReqwestTransport::new(&base).unwrap();

        let response = transport
            .send(HttpRequest::get("/public/games/upcoming").query("limit", 3))
            .await
            .expect("send should succeed");

        assert_eq!(response.status, 200);
        let text = response.text();
        assert_eq!(field(&text, "method"), "GET");
        assert_eq!(field(&text, "uri"), "/public/games/upcoming?limit=3");
        assert_eq!(field(&text, "authorization"), "-");
    }

    #[tokio::test]
    async fn test_post_json_body_and_headers() {
        let base = start_server().await;
        let transport = ReqwestTransport::new(&base).unwrap();

        let response = transport
            .send(
                HttpRequest::post("/admin/players")
                    .header("X-Trace", "42")
                    .body("application/json", br#"{"a":1}"#.to_vec()),
            )
            .await
            .unwrap();

        let text = response.text();
        assert_eq!(field(&text, "method"), "POST");
        assert_eq!(field(&text, "content-type"), "application/json");
        assert_eq!(field(&text, "x-trace"), "42");
        assert_eq!(field(&text, "len"), "7");
    }

    #[tokio::test]
    async fn test_file_body_is_sent_as_multipart() {
        let base = start_server().await;
        let transport = ReqwestTransport::new(&base).unwrap();

        let response = transport
            .send(
                HttpRequest::post("/admin/staff/photo")
                    .header("Content-Type", "application/json")
                    .file("file", "coach.png", "image/png", vec![1, 2, 3, 4]),
            )
            .await
            .unwrap();

        let text = response.text();
        assert!(
            field(&text, "content-type").starts_with("multipart/form-data; boundary="),
            "got {text}"
        );
        assert_ne!(field(&text, "len"), "0");
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let base = start_server().await;
        let transport = ReqwestTransport::new(&base).unwrap();

        let response = transport
            .send(HttpRequest::get("/admin/teams"))
            .await
            .expect("a 401 is still a response");
        assert_eq!(response.status, 401);
        assert!(response.is_auth_failure());
    }

    #[tokio::test]
    async fn test_authorized_transport_over_the_wire() {
        let base = start_server().await;
        let transport = AuthorizedTransport::new(
            ReqwestTransport::new(&base).unwrap(),
            Some("abc123".to_string()),
        );

        let response =
            transport.send(HttpRequest::get("/admin/teams")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(field(&response.text(), "authorization"), "Bearer abc123");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(&format!("http://{addr}")).unwrap();
        let err = transport
            .send(HttpRequest::get("/public/teams"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
