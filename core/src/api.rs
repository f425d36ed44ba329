//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostsApi` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, so
//! the I/O boundary stays explicit and the builder is trivially testable.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewPost, Post, PostPatch};

/// Request builder and response parser bound to one base URL.
#[derive(Debug, Clone)]
pub struct PostsApi {
    base_url: String,
}

impl PostsApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        get(self.collection())
    }

    /// `sort` and `direction` are passed through unvalidated; the server
    /// decides what it accepts.
    pub fn build_sort_posts(&self, field: &str, direction: &str) -> HttpRequest {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("sort", field)
            .append_pair("direction", direction)
            .finish();
        get(format!("{}?{query}", self.collection()))
    }

    /// One query parameter per selected field, each carrying the same query.
    /// Duplicate fields are dropped, first occurrence wins. With no fields
    /// the request carries no query string at all.
    pub fn build_search_posts<S: AsRef<str>>(&self, query: &str, fields: &[S]) -> HttpRequest {
        let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
        let mut params = form_urlencoded::Serializer::new(String::new());
        for field in fields.iter().map(AsRef::as_ref) {
            if seen.contains(&field) {
                continue;
            }
            seen.push(field);
            params.append_pair(field, query);
        }
        let params = params.finish();

        let url = if params.is_empty() {
            format!("{}/search", self.collection())
        } else {
            format!("{}/search?{params}", self.collection())
        };
        get(url)
    }

    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest> {
        json_request(HttpMethod::Post, self.collection(), input)
    }

    pub fn build_update_post(&self, id: i64, patch: &PostPatch) -> Result<HttpRequest> {
        json_request(HttpMethod::Put, format!("{}/{id}", self.collection()), patch)
    }

    pub fn build_delete_post(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/{id}", self.collection()),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Shared by list, sort and search.
    pub fn parse_posts(&self, response: HttpResponse) -> Result<Vec<Post>> {
        parse_json(response)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post> {
        parse_json(response)
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Post> {
        parse_json(response)
    }

    /// Any 2xx counts; the body is ignored.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<()> {
        check_status(&response)
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: serde::Serialize>(method: HttpMethod, url: String, payload: &T) -> Result<HttpRequest> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
