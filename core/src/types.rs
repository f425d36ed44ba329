//! Domain DTOs for the posts API.
//!
//! # Design
//! These types mirror the stub server's schema but are defined independently.
//! Integration tests against `mock-server` catch any schema drift. `author`
//! and `date` default to empty strings so responses from servers that omit
//! them still render.

use serde::{Deserialize, Serialize};

/// A single post as returned by the API. The client only ever holds a
/// transient read copy; the server owns `id` and `date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub date: String,
}

/// Request payload for creating a post. Fields are sent verbatim; empty
/// strings are not rejected client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub content: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            content: content.into(),
        }
    }
}

/// Partial update payload. Only the fields present in the JSON are applied;
/// omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
