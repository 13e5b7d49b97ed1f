//! External collaborators (social feed, music catalog, movie database).
//!
//! Each service is a trait so the dispatcher can be handed either the real
//! HTTP clients (`twitter`, `spotify`, `omdb`) or test doubles.
//!
//! Data models here are the trimmed shapes the dispatcher formats; the raw
//! wire types live next to each client.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub mod omdb;
pub mod spotify;
pub mod twitter;

/// Failure of a single external lookup.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A single post from the social feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub created_at: String,
    pub text: String,
}

/// Best matching track from a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub preview_url: Option<String>,
}

/// One entry of a movie's ratings list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    pub year: String,
    pub imdb_rating: String,
    pub ratings: Vec<Rating>,
    pub country: String,
    pub language: String,
    pub plot: String,
    pub actors: String,
}

impl Movie {
    /// Rotten Tomatoes score, looked up by source name.
    pub fn rotten_tomatoes(&self) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.source == "Rotten Tomatoes")
            .map(|r| r.value.as_str())
    }
}

/// Outcome of a movie lookup that reached the server and got HTTP 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieLookup {
    Found(Movie),
    /// Payload had no title (OMDb answers `{"Response":"False",...}`).
    NotFound,
}

#[async_trait]
pub trait SocialFeed: Send + Sync {
    /// Most recent posts of the configured account, newest first.
    async fn recent_posts(&self) -> Result<Vec<Post>, ServiceError>;
}

#[async_trait]
pub trait MusicCatalog: Send + Sync {
    async fn search_track(&self, query: &str) -> Result<Option<Track>, ServiceError>;
}

#[async_trait]
pub trait MovieDatabase: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<MovieLookup, ServiceError>;
}

/// Bundle of collaborators handed to the dispatcher.
#[derive(Clone)]
pub struct Services {
    pub feed: Arc<dyn SocialFeed>,
    pub music: Arc<dyn MusicCatalog>,
    pub movies: Arc<dyn MovieDatabase>,
}

impl Services {
    /// Real HTTP-backed services sharing one client.
    pub fn from_config(config: &crate::config::Config) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            feed: Arc::new(twitter::TwitterClient::new(
                http.clone(),
                config.twitter.clone(),
            )),
            music: Arc::new(spotify::SpotifyClient::new(
                http.clone(),
                config.spotify.clone(),
            )),
            movies: Arc::new(omdb::OmdbClient::new(http, config.omdb.clone())),
        })
    }
}
