//! Client core for the posts service.
//!
//! # Overview
//! Keeps a rendered list of posts in step with a remote `/posts` collection
//! through list, create, remove, search and sort. The network, the view and
//! the persisted base URL are all injected, so the whole flow runs against
//! test doubles.
//!
//! # Design
//! - `PostsApi` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network (host-does-IO).
//! - `PostsClient` drives those through a `Transport`, renders successes with
//!   a `ViewRenderer`, and hands failures to a `FailureReporter`.
//! - `ClientConfig` is passed into every operation; `ConfigStore` only
//!   persists the base URL between sessions.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod render;
pub mod report;
pub mod transport;
pub mod types;

pub use api::PostsApi;
pub use client::PostsClient;
pub use config::{ClientConfig, ConfigStore, FileConfigStore, MemoryConfigStore};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{rows, Control, ListView, PostRow, ViewRenderer};
pub use report::{Failure, FailureLog, FailureReporter, LogReporter, Operation};
pub use transport::Transport;
pub use types::{NewPost, Post, PostPatch};
