//! Keeps a rendered list in step with the remote post collection.
//!
//! # Design
//! `PostsClient` owns no post data. Each operation builds a request with
//! `PostsApi`, awaits the injected `Transport`, and on success hands the
//! response to the `ViewRenderer`. Create and remove never touch the view
//! directly; they finish by re-running `list`. On any failure the error goes
//! to the `FailureReporter` and back to the caller, and the renderer is not
//! called, so the view keeps its last good state.
//!
//! Operations take `&self` and may overlap. Nothing orders them except the
//! create→list and remove→list chains, so the view shows whichever list
//! response resolves last.

use tracing::{debug, info};

use crate::api::PostsApi;
use crate::config::{ClientConfig, ConfigStore};
use crate::error::{ApiError, Result};
use crate::http::HttpRequest;
use crate::render::ViewRenderer;
use crate::report::{FailureReporter, LogReporter, Operation};
use crate::transport::Transport;
use crate::types::{NewPost, Post};

pub struct PostsClient<T, R, S, F = LogReporter> {
    transport: T,
    renderer: R,
    store: S,
    reporter: F,
}

impl<T, R, S> PostsClient<T, R, S, LogReporter>
where
    T: Transport,
    R: ViewRenderer,
    S: ConfigStore,
{
    pub fn new(transport: T, renderer: R, store: S) -> Self {
        Self {
            transport,
            renderer,
            store,
            reporter: LogReporter,
        }
    }
}

impl<T, R, S, F> PostsClient<T, R, S, F>
where
    T: Transport,
    R: ViewRenderer,
    S: ConfigStore,
    F: FailureReporter,
{
    /// Swap the failure reporter.
    pub fn with_reporter<G: FailureReporter>(self, reporter: G) -> PostsClient<T, R, S, G> {
        PostsClient {
            transport: self.transport,
            renderer: self.renderer,
            store: self.store,
            reporter,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reporter(&self) -> &F {
        &self.reporter
    }

    /// Startup path: if a base URL was saved, list with it and return the
    /// config. With nothing saved no request is made.
    pub async fn resume(&self) -> Option<ClientConfig> {
        let config = ClientConfig::new(self.store.get()?);
        info!(base_url = %config.base_url, "resuming with saved base url");
        // A failed list has already been reported.
        let _ = self.list(&config).await;
        Some(config)
    }

    /// Save the base URL, fetch the whole collection and render it.
    pub async fn list(&self, config: &ClientConfig) -> Result<Vec<Post>> {
        self.store.set(&config.base_url);
        let api = PostsApi::new(&config.base_url);
        let result = self.fetch_posts(&api, api.build_list_posts()).await;
        self.render(Operation::List, result)
    }

    /// Create a post, then refresh the view with `list`. Returns the post as
    /// the server stored it.
    pub async fn create(&self, config: &ClientConfig, input: &NewPost) -> Result<Post> {
        let api = PostsApi::new(&config.base_url);
        let result = async {
            let request = api.build_create_post(input)?;
            let response = self.transport.execute(request).await?;
            api.parse_create_post(response)
        }
        .await;
        let post = result.map_err(|e| self.report(Operation::Create, e))?;
        info!(id = post.id, "post created");

        // A failed refresh is reported by `list`; the create itself stands.
        let _ = self.list(config).await;
        Ok(post)
    }

    /// Delete a post by id, then refresh the view with `list`. The deleted
    /// row stays visible until that refresh lands.
    pub async fn remove(&self, config: &ClientConfig, id: i64) -> Result<()> {
        let api = PostsApi::new(&config.base_url);
        let result = async {
            let response = self.transport.execute(api.build_delete_post(id)).await?;
            api.parse_delete_post(response)
        }
        .await;
        result.map_err(|e| self.report(Operation::Remove, e))?;
        info!(id, "post deleted");

        let _ = self.list(config).await;
        Ok(())
    }

    /// Search `fields` for `query` and render the matches. An empty field
    /// list is sent as-is; the server decides what that means.
    pub async fn search<Q: AsRef<str>>(&self, config: &ClientConfig, query: &str, fields: &[Q]) -> Result<Vec<Post>> {
        let api = PostsApi::new(&config.base_url);
        let result = self.fetch_posts(&api, api.build_search_posts(query, fields)).await;
        self.render(Operation::Search, result)
    }

    /// Fetch the collection sorted by the server and render it.
    pub async fn sort(&self, config: &ClientConfig, field: &str, direction: &str) -> Result<Vec<Post>> {
        let api = PostsApi::new(&config.base_url);
        let result = self.fetch_posts(&api, api.build_sort_posts(field, direction)).await;
        self.render(Operation::Sort, result)
    }

    /// Editing posts is not supported. Always fails with
    /// [`ApiError::Unsupported`] and sends nothing.
    pub async fn update(&self, id: i64) -> Result<()> {
        debug!(id, "update requested");
        Err(self.report(Operation::Update, ApiError::Unsupported("update")))
    }

    async fn fetch_posts(&self, api: &PostsApi, request: HttpRequest) -> Result<Vec<Post>> {
        debug!(method = %request.method, url = %request.url, "fetching posts");
        let response = self.transport.execute(request).await?;
        api.parse_posts(response)
    }

    fn render(&self, operation: Operation, result: Result<Vec<Post>>) -> Result<Vec<Post>> {
        let posts = result.map_err(|e| self.report(operation, e))?;
        self.renderer.render(&posts);
        debug!(%operation, count = posts.len(), "view rendered");
        Ok(posts)
    }

    fn report(&self, operation: Operation, error: ApiError) -> ApiError {
        self.reporter.report(operation, &error);
        error
    }
}
