use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub date: String,
}

#[derive(Deserialize)]
pub struct CreatePost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub direction: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    posts: Vec<Post>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

/// The demo collection served by `SEED=1`.
pub fn sample_posts() -> Vec<Post> {
    let post = |id: i64, title: &str, content: &str| Post {
        id,
        title: title.to_string(),
        author: "admin".to_string(),
        content: content.to_string(),
        date: "2024-01-01".to_string(),
    };
    vec![
        post(1, "First post", "This is the first post."),
        post(2, "Second post", "This is the second post."),
        post(3, "Axum Tutorial", "Learn Axum for web development."),
        post(4, "Rust basics", "Introduction to the Rust programming language."),
    ]
}

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Build the router over a fixture collection. New ids continue after the
/// largest fixture id.
pub fn app_with(posts: Vec<Post>) -> Router {
    let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let db: Db = Arc::new(RwLock::new(Store { posts, next_id }));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/search", get(search_posts))
        .route("/posts/{id}", put(update_post).delete(delete_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener, posts: Vec<Post>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(posts)).await
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn not_found(id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Post with id {id} not found.") })),
    )
        .into_response()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SortField {
    Title,
    Content,
    Author,
    Date,
}

impl SortField {
    fn parse(field: &str) -> Option<Self> {
        match field {
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            "author" => Some(Self::Author),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    fn key<'a>(&self, post: &'a Post) -> &'a str {
        match self {
            Self::Title => &post.title,
            Self::Content => &post.content,
            Self::Author => &post.author,
            Self::Date => &post.date,
        }
    }
}

async fn list_posts(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    let field = match params.sort.as_deref() {
        None => None,
        Some(name) => match SortField::parse(name) {
            Some(field) => Some(field),
            None => return bad_request("Invalid sort field. Use \"title\", \"content\", \"author\" or \"date\"."),
        },
    };
    let descending = match params.direction.as_deref() {
        None | Some("asc") => false,
        Some("desc") => true,
        Some(_) => return bad_request("Invalid sort direction. Use \"asc\" or \"desc\"."),
    };

    let mut posts = db.read().await.posts.clone();
    if let Some(field) = field {
        posts.sort_by(|a, b| {
            let ord = field.key(a).cmp(field.key(b));
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }
    debug!(count = posts.len(), sort = ?params.sort, descending, "list posts");
    Json(posts).into_response()
}

async fn create_post(State(db): State<Db>, Json(input): Json<CreatePost>) -> Response {
    if input.title.trim().is_empty() {
        return bad_request("Title cannot be empty.");
    }
    if input.content.trim().is_empty() {
        return bad_request("Content cannot be empty.");
    }

    let mut store = db.write().await;
    let post = Post {
        id: store.next_id,
        title: input.title,
        author: input.author,
        content: input.content,
        date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
    };
    store.next_id += 1;
    store.posts.push(post.clone());
    info!(id = post.id, "post created");
    (StatusCode::CREATED, Json(post)).into_response()
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdatePost>,
) -> Response {
    let mut store = db.write().await;
    let Some(post) = store.posts.iter_mut().find(|p| p.id == id) else {
        return not_found(id);
    };
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(author) = input.author {
        post.author = author;
    }
    if let Some(content) = input.content {
        post.content = content;
    }
    Json(post.clone()).into_response()
}

async fn delete_post(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut store = db.write().await;
    let Some(index) = store.posts.iter().position(|p| p.id == id) else {
        return not_found(id);
    };
    store.posts.remove(index);
    info!(id, "post deleted");
    Json(json!({ "message": format!("Post with id {id} has been deleted successfully.") }))
        .into_response()
}

/// Case-insensitive substring match; an absent or empty needle matches.
fn matches(needle: Option<&str>, haystack: &str) -> bool {
    match needle {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

async fn search_posts(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<Vec<Post>> {
    let store = db.read().await;
    let found: Vec<Post> = store
        .posts
        .iter()
        .filter(|p| {
            matches(params.title.as_deref(), &p.title)
                && matches(params.content.as_deref(), &p.content)
                && matches(params.author.as_deref(), &p.author)
        })
        .cloned()
        .collect();
    debug!(count = found.len(), "search posts");
    Json(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_needle_matches_everything() {
        assert!(matches(None, "anything"));
        assert!(matches(Some(""), "anything"));
    }

    #[test]
    fn needle_match_ignores_case() {
        assert!(matches(Some("AXUM"), "Axum Tutorial"));
        assert!(!matches(Some("rust"), "Axum Tutorial"));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert_eq!(SortField::parse("id"), None);
        assert_eq!(SortField::parse("title"), Some(SortField::Title));
    }

    #[test]
    fn sort_field_selects_column() {
        let posts = sample_posts();
        assert_eq!(SortField::Title.key(&posts[2]), "Axum Tutorial");
        assert_eq!(SortField::Author.key(&posts[2]), "admin");
    }
}
