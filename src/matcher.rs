// src/matcher.rs
//! Case-insensitive phrase scan over a harvest.

use crate::model::{Harvest, Response};

/// Scan posts (title or self-text) and then comments (body) for each phrase.
///
/// One `Response` is emitted per matching (entity, phrase) pair, so a post
/// hit by two phrases shows up twice. Order follows the harvest, with
/// phrases in the order given.
pub fn match_harvest(harvest: &Harvest, phrases: &[String]) -> Vec<Response> {
    let needles: Vec<String> = phrases.iter().map(|p| p.to_lowercase()).collect();
    let mut out = Vec::new();

    for post in &harvest.posts {
        let self_text = post.self_text.to_lowercase();
        let title = post.title.to_lowercase();
        for needle in &needles {
            if self_text.contains(needle.as_str()) || title.contains(needle.as_str()) {
                out.push(Response::post(post));
            }
        }
    }

    for comment in &harvest.comments {
        let body = comment.body.to_lowercase();
        for needle in &needles {
            if body.contains(needle.as_str()) {
                out.push(Response::comment(comment));
            }
        }
    }

    out
}
