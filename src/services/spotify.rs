//! Spotify Web API track search (client-credentials flow).

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::OnceCell;

use super::{MusicCatalog, ServiceError, Track};
use crate::config::SpotifyConfig;

pub struct SpotifyClient {
    http: reqwest::Client,
    config: SpotifyConfig,
    token: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Paging,
}

#[derive(Debug, Deserialize)]
struct Paging {
    #[serde(default)]
    items: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    name: String,
    #[serde(default)]
    artists: Vec<Named>,
    album: Named,
    preview_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

impl SpotifyClient {
    pub fn new(http: reqwest::Client, config: SpotifyConfig) -> Self {
        Self {
            http,
            config,
            token: OnceCell::new(),
        }
    }

    async fn access_token(&self) -> Result<&str, ServiceError> {
        self.token
            .get_or_try_init(|| self.fetch_token())
            .await
            .map(String::as_str)
    }

    async fn fetch_token(&self) -> Result<String, ServiceError> {
        let (Some(id), Some(secret)) = (&self.config.client_id, &self.config.client_secret) else {
            return Err(ServiceError::MissingCredentials("SPOTIFY_ID / SPOTIFY_SECRET"));
        };
        let url = format!("{}/api/token", self.config.accounts_base);
        tracing::debug!(%url, "requesting spotify access token");
        let resp = self
            .http
            .post(&url)
            .basic_auth(id, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ServiceError::Auth(format!(
                "token endpoint returned {}",
                resp.status().as_u16()
            )));
        }
        let tok: TokenResponse = serde_json::from_str(&resp.text().await?)?;
        Ok(tok.access_token)
    }
}

/// The CLI joins words with `+`; the search API wants spaces.
pub fn normalize_query(query: &str) -> String {
    query
        .split('+')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode a search payload into its first track, if any.
pub fn parse_search(body: &str) -> Result<Option<Track>, ServiceError> {
    let resp: SearchResponse = serde_json::from_str(body)?;
    Ok(resp.tracks.items.into_iter().next().map(|t| Track {
        name: t.name,
        artists: t.artists.into_iter().map(|a| a.name).collect(),
        album: t.album.name,
        preview_url: t.preview_url,
    }))
}

#[async_trait]
impl MusicCatalog for SpotifyClient {
    async fn search_track(&self, query: &str) -> Result<Option<Track>, ServiceError> {
        let token = self.access_token().await?;
        let url = format!("{}/v1/search", self.config.api_base);
        let q = normalize_query(query);
        tracing::debug!(%url, query = %q, "searching track");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("type", "track"), ("limit", "1"), ("q", q.as_str())])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        parse_search(&resp.text().await?)
    }
}
