// src/source/reddit.rs
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::{RunOptions, SourceConfig};
use crate::model::{Comment, Harvest, Post};
use crate::source::ContentSource;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const DEFAULT_USER_AGENT: &str =
    concat!("what-they-saying/", env!("CARGO_PKG_VERSION"), " (phrase monitor)");
/// Refresh this long before Reddit says the token expires.
const TOKEN_SLACK: Duration = Duration::from_secs(60);
const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    kind: String,
    data: ThingData,
}

// t3 (link) and t1 (comment) share one loose shape; unused fields default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThingData {
    author: Option<String>,
    title: String,
    selftext: String,
    body: String,
    created_utc: f64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

struct Token {
    value: String,
    expires_at: Instant,
}

/// Decode a Reddit listing. Links become posts, comments become comments,
/// anything else (more, awards, ...) is skipped.
pub fn parse_listing(json: &str) -> Result<Harvest> {
    let listing: Listing = serde_json::from_str(json).context("parsing reddit listing json")?;
    let mut harvest = Harvest::default();

    for thing in listing.data.children {
        let d = thing.data;
        let author = d
            .author
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DELETED_AUTHOR.to_string());
        let created_at = d.created_utc.max(0.0) as u64;

        match thing.kind.as_str() {
            "t3" => harvest.posts.push(Post {
                author,
                title: d.title,
                self_text: d.selftext,
                created_at,
            }),
            "t1" => harvest.comments.push(Comment {
                author,
                body: d.body,
                created_at,
            }),
            _ => {}
        }
    }

    Ok(harvest)
}

/// Reddit-backed content source using a script app's password grant.
pub struct RedditSource {
    mode: Mode,
}

enum Mode {
    Fixture {
        posts: String,
        comments: String,
    },
    Http {
        client: reqwest::Client,
        config: SourceConfig,
        limit: u32,
        token: Mutex<Option<Token>>,
    },
}

impl RedditSource {
    pub fn new(config: SourceConfig, opts: RunOptions) -> Result<Self> {
        let user_agent = if config.user_agent().is_empty() {
            DEFAULT_USER_AGENT.to_string()
        } else {
            config.user_agent().to_string()
        };
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .context("building reddit http client")?;

        Ok(Self {
            mode: Mode::Http {
                client,
                config,
                limit: opts.listing_limit,
                token: Mutex::new(None),
            },
        })
    }

    /// Serve the same pair of listing documents for every board, offline.
    pub fn from_fixtures(posts_json: &str, comments_json: &str) -> Self {
        Self {
            mode: Mode::Fixture {
                posts: posts_json.to_string(),
                comments: comments_json.to_string(),
            },
        }
    }
}

#[async_trait]
impl ContentSource for RedditSource {
    async fn fetch(&self, board: &str) -> Result<Harvest> {
        match &self.mode {
            Mode::Fixture { posts, comments } => Ok(Harvest {
                posts: parse_listing(posts)?.posts,
                comments: parse_listing(comments)?.comments,
            }),
            Mode::Http {
                client,
                config,
                limit,
                token,
            } => {
                let bearer = access_token(client, config, token).await?;
                let posts_url = format!("{API_BASE}{board}/new");
                let comments_url = format!("{API_BASE}{board}/comments");

                let (posts, comments) = tokio::try_join!(
                    get_listing(client, &posts_url, &bearer, *limit),
                    get_listing(client, &comments_url, &bearer, *limit),
                )?;

                Ok(Harvest {
                    posts: posts.posts,
                    comments: comments.comments,
                })
            }
        }
    }
}

async fn access_token(
    client: &reqwest::Client,
    config: &SourceConfig,
    cache: &Mutex<Option<Token>>,
) -> Result<String> {
    // Held across the request so concurrent boards share one token fetch.
    let mut guard = cache.lock().await;
    if let Some(tok) = guard.as_ref() {
        if Instant::now() < tok.expires_at {
            return Ok(tok.value.clone());
        }
    }

    tracing::debug!(username = config.username(), "requesting reddit access token");
    let rsp = client
        .post(TOKEN_URL)
        .basic_auth(config.client_id(), Some(config.client_secret()))
        .form(&[
            ("grant_type", "password"),
            ("username", config.username()),
            ("password", config.password()),
        ])
        .send()
        .await
        .context("reddit token request")?
        .error_for_status()
        .context("reddit token request rejected")?;

    let body: TokenResponse = rsp.json().await.context("decoding reddit token response")?;
    if let Some(err) = body.error {
        return Err(anyhow!("reddit token error: {err}"));
    }
    let value = body
        .access_token
        .ok_or_else(|| anyhow!("reddit token response had no access_token"))?;
    let ttl = Duration::from_secs(body.expires_in.unwrap_or(3600)).saturating_sub(TOKEN_SLACK);

    *guard = Some(Token {
        value: value.clone(),
        expires_at: Instant::now() + ttl,
    });
    Ok(value)
}

async fn get_listing(
    client: &reqwest::Client,
    url: &str,
    bearer: &str,
    limit: u32,
) -> Result<Harvest> {
    let body = client
        .get(url)
        .bearer_auth(bearer)
        .query(&[("limit", limit.to_string()), ("raw_json", "1".to_string())])
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url} returned an error status"))?
        .text()
        .await
        .with_context(|| format!("reading body of {url}"))?;

    parse_listing(&body)
}
