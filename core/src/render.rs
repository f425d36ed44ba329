//! Render contract: how a sequence of posts becomes a displayed list.
//!
//! Every render replaces the whole view. Each row carries the post's title,
//! author, date and content, plus a delete and an update control keyed by
//! the post's id, in the order the server returned them.

use parking_lot::Mutex;

use crate::types::Post;

/// A per-row action, parameterized by the post it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Delete(i64),
    Update(i64),
}

impl Control {
    pub fn id(&self) -> i64 {
        match self {
            Control::Delete(id) | Control::Update(id) => *id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::Delete(_) => "delete",
            Control::Update(_) => "update",
        }
    }
}

/// One displayed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub title: String,
    pub author: String,
    pub date: String,
    pub content: String,
    pub controls: [Control; 2],
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            author: post.author.clone(),
            date: post.date.clone(),
            content: post.content.clone(),
            controls: [Control::Delete(post.id), Control::Update(post.id)],
        }
    }
}

pub fn rows(posts: &[Post]) -> Vec<PostRow> {
    posts.iter().map(PostRow::from).collect()
}

/// Replaces the displayed list with `posts`.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, posts: &[Post]);
}

/// In-memory view that keeps the current rows.
#[derive(Debug, Default)]
pub struct ListView {
    state: Mutex<ViewState>,
}

#[derive(Debug, Default)]
struct ViewState {
    rows: Vec<PostRow>,
    renders: usize,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<PostRow> {
        self.state.lock().rows.clone()
    }

    /// Number of times the view has been replaced.
    pub fn render_count(&self) -> usize {
        self.state.lock().renders
    }

    /// Ids in display order, read from each row's delete control.
    pub fn ids(&self) -> Vec<i64> {
        self.state.lock().rows.iter().map(|row| row.controls[0].id()).collect()
    }
}

impl ViewRenderer for ListView {
    fn render(&self, posts: &[Post]) {
        let mut state = self.state.lock();
        state.rows = rows(posts);
        state.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            author: format!("author{id}"),
            content: format!("content{id}"),
            date: "2024-02-02".to_string(),
        }
    }

    #[test]
    fn rows_follow_input_order_and_key_controls_by_id() {
        let rows = rows(&[post(9, "nine"), post(3, "three")]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "nine");
        assert_eq!(rows[0].author, "author9");
        assert_eq!(rows[0].date, "2024-02-02");
        assert_eq!(rows[0].content, "content9");
        assert_eq!(rows[0].controls, [Control::Delete(9), Control::Update(9)]);
        assert_eq!(rows[1].controls, [Control::Delete(3), Control::Update(3)]);
    }

    #[test]
    fn list_view_replaces_previous_rows() {
        let view = ListView::new();
        view.render(&[post(1, "a"), post(2, "b")]);
        view.render(&[post(3, "c")]);
        assert_eq!(view.ids(), vec![3]);
        assert_eq!(view.render_count(), 2);
    }

    #[test]
    fn empty_render_clears_view() {
        let view = ListView::new();
        view.render(&[post(1, "a")]);
        view.render(&[]);
        assert!(view.snapshot().is_empty());
    }

    #[test]
    fn control_labels() {
        assert_eq!(Control::Delete(1).label(), "delete");
        assert_eq!(Control::Update(1).label(), "update");
    }
}
