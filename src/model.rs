// src/model.rs
use std::fmt;

use serde::Serialize;

/// Which kind of entity produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseKind {
    Post,
    Comment,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Post => "POST",
            ResponseKind::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One matched post or comment.
/// Only the matcher builds these, so every `Response` is a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub author: String,
    /// Self-text for posts (even when the title matched), body for comments.
    pub body: String,
    /// Unix seconds, as reported by the source.
    pub posted_at: u64,
    pub kind: ResponseKind,
}

impl Response {
    pub(crate) fn post(p: &Post) -> Self {
        Self {
            author: p.author.clone(),
            body: p.self_text.clone(),
            posted_at: p.created_at,
            kind: ResponseKind::Post,
        }
    }

    pub(crate) fn comment(c: &Comment) -> Self {
        Self {
            author: c.author.clone(),
            body: c.body.clone(),
            posted_at: c.created_at,
            kind: ResponseKind::Comment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub author: String,
    pub title: String,
    pub self_text: String,
    pub created_at: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub created_at: u64,
}

/// Posts and comments fetched from one board in one pass, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl Harvest {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }
}
