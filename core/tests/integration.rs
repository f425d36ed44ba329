//! Full client lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every `PostsClient`
//! operation over real HTTP using ureq. Validates that request building,
//! response parsing and the render/refresh chain work end-to-end.

use async_trait::async_trait;
use posts_core::{
    ApiError, ClientConfig, ConfigStore, FailureLog, HttpMethod, HttpRequest, HttpResponse, ListView,
    MemoryConfigStore, NewPost, Operation, PostsClient, Transport,
};

/// Executes requests with a blocking ureq agent on tokio's blocking pool.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data and the core decides what they mean.
struct Ureq {
    agent: ureq::Agent,
}

impl Ureq {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let bytes = response
        .body_mut()
        .read_to_vec()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok(HttpResponse::new(status, decode_body(bytes)?))
}

fn decode_body(bytes: Vec<u8>) -> Result<String, ApiError> {
    String::from_utf8(bytes).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[async_trait]
impl Transport for Ureq {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, Vec::new()).await
        })
        .unwrap();
    });
    addr
}

#[tokio::test]
async fn client_lifecycle() {
    // Step 1: start mock server on a random port.
    let addr = start_server();
    let config = ClientConfig::new(format!("http://{addr}/"));
    let client = PostsClient::new(Ureq::new(), ListView::new(), MemoryConfigStore::new())
        .with_reporter(FailureLog::new());

    // Step 2: list, should be empty and save the base url.
    let posts = client.list(&config).await.unwrap();
    assert!(posts.is_empty(), "expected empty list");
    assert_eq!(client.store().get(), Some(config.base_url.clone()));
    assert_eq!(client.renderer().render_count(), 1);

    // Step 3: create two posts; each create refreshes the view.
    let first = client
        .create(&config, &NewPost::new("Integration test", "ci", "first body"))
        .await
        .unwrap();
    let second = client
        .create(&config, &NewPost::new("Another", "ci", "second body"))
        .await
        .unwrap();
    assert_eq!(client.renderer().ids(), vec![first.id, second.id]);
    let row = &client.renderer().snapshot()[0];
    assert_eq!(row.title, "Integration test");
    assert_eq!(row.author, "ci");
    assert_eq!(row.content, "first body");
    assert_eq!(row.date, first.date);

    // Step 4: sort descending by title.
    let sorted = client.sort(&config, "title", "desc").await.unwrap();
    assert_eq!(sorted[0].id, first.id);
    assert_eq!(client.renderer().ids(), vec![first.id, second.id]);

    // Step 5: search content.
    let found = client.search(&config, "SECOND", &["content"]).await.unwrap();
    assert_eq!(found, vec![second.clone()]);
    assert_eq!(client.renderer().ids(), vec![second.id]);

    // Step 6: delete the first post; the refresh drops it.
    client.remove(&config, first.id).await.unwrap();
    assert_eq!(client.renderer().ids(), vec![second.id]);

    // Step 7: delete again, should be NotFound and leave the view alone.
    let err = client.remove(&config, first.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    assert_eq!(client.renderer().ids(), vec![second.id]);

    // Step 8: rejected sort leaves the view alone.
    let err = client.sort(&config, "id", "asc").await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 400, .. }));
    assert_eq!(client.renderer().ids(), vec![second.id]);

    let operations: Vec<Operation> = client.reporter().failures().iter().map(|f| f.operation).collect();
    assert_eq!(operations, vec![Operation::Remove, Operation::Sort]);
}

#[tokio::test]
async fn unreachable_server_keeps_view() {
    let addr = start_server();
    let client = PostsClient::new(Ureq::new(), ListView::new(), MemoryConfigStore::new())
        .with_reporter(FailureLog::new());
    let live = ClientConfig::new(format!("http://{addr}"));
    client
        .create(&live, &NewPost::new("kept", "me", "still here"))
        .await
        .unwrap();
    let before = client.renderer().snapshot();

    // Nothing listens on port 1.
    let dead = ClientConfig::new("http://127.0.0.1:1");
    let err = client.list(&dead).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(client.renderer().snapshot(), before);
    assert_eq!(client.store().get().as_deref(), Some("http://127.0.0.1:1"));
    assert_eq!(client.reporter().failures()[0].kind, "transport");
}

#[test]
fn body_decoding_fails_instead_of_defaulting() {
    let err = decode_body(vec![0xc3, 0x28]).unwrap_err();
    assert!(matches!(err, ApiError::Deserialization(_)));
    assert_eq!(decode_body(b"ok".to_vec()).unwrap(), "ok");
}
