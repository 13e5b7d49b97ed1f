//! OMDb title lookup.
//!
//! The request URL is built by plain concatenation; the title is not
//! percent-encoded by us. `url::Url` still normalises characters that cannot
//! appear in a URL at all (spaces become `%20`).

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{Movie, MovieDatabase, MovieLookup, Rating, ServiceError};
use crate::config::OmdbConfig;

pub struct OmdbClient {
    http: reqwest::Client,
    config: OmdbConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMovie {
    title: Option<String>,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(default)]
    ratings: Vec<RawRating>,
    #[serde(default)]
    country: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    plot: String,
    #[serde(default)]
    actors: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRating {
    source: String,
    value: String,
}

impl OmdbClient {
    pub fn new(http: reqwest::Client, config: OmdbConfig) -> Self {
        Self { http, config }
    }

    pub fn request_url(&self, title: &str) -> Result<Url, ServiceError> {
        let raw = format!(
            "{}/?t={}&y=&plot=short&apikey={}",
            self.config.base_url.trim_end_matches('/'),
            title,
            self.config.api_key
        );
        Ok(Url::parse(&raw)?)
    }
}

/// Decode an OMDb payload. A payload without `Title` is "not found".
pub fn parse_movie(body: &str) -> Result<MovieLookup, ServiceError> {
    let raw: RawMovie = serde_json::from_str(body)?;
    let Some(title) = raw.title.filter(|t| !t.is_empty()) else {
        return Ok(MovieLookup::NotFound);
    };
    Ok(MovieLookup::Found(Movie {
        title,
        year: raw.year,
        imdb_rating: raw.imdb_rating,
        ratings: raw
            .ratings
            .into_iter()
            .map(|r| Rating {
                source: r.source,
                value: r.value,
            })
            .collect(),
        country: raw.country,
        language: raw.language,
        plot: raw.plot,
        actors: raw.actors,
    }))
}

#[async_trait]
impl MovieDatabase for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<MovieLookup, ServiceError> {
        let url = self.request_url(title)?;
        tracing::debug!(%url, "looking up movie");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(ServiceError::Status(status.as_u16()));
        }
        parse_movie(&resp.text().await?)
    }
}
