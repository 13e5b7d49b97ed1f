//! Twitter v1.1 user timeline client (app-only bearer auth).

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::OnceCell;

use super::{Post, ServiceError, SocialFeed};
use crate::config::TwitterConfig;

pub struct TwitterClient {
    http: reqwest::Client,
    config: TwitterConfig,
    token: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct RawTweet {
    created_at: String,
    text: String,
}

impl TwitterClient {
    pub fn new(http: reqwest::Client, config: TwitterConfig) -> Self {
        Self {
            http,
            config,
            token: OnceCell::new(),
        }
    }

    async fn bearer_token(&self) -> Result<&str, ServiceError> {
        if let Some(t) = &self.config.bearer_token {
            return Ok(t.as_str());
        }
        self.token
            .get_or_try_init(|| self.fetch_token())
            .await
            .map(String::as_str)
    }

    async fn fetch_token(&self) -> Result<String, ServiceError> {
        let (Some(key), Some(secret)) = (&self.config.consumer_key, &self.config.consumer_secret)
        else {
            return Err(ServiceError::MissingCredentials(
                "TWITTER_CONSUMER_KEY / TWITTER_CONSUMER_SECRET",
            ));
        };
        let url = format!("{}/oauth2/token", self.config.api_base);
        tracing::debug!(%url, "requesting twitter bearer token");
        let resp = self
            .http
            .post(&url)
            .basic_auth(key, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ServiceError::Auth(format!(
                "token endpoint returned {}",
                resp.status().as_u16()
            )));
        }
        let body = resp.text().await?;
        parse_token(&body)
    }
}

fn parse_token(body: &str) -> Result<String, ServiceError> {
    let tok: TokenResponse = serde_json::from_str(body)?;
    if !tok.token_type.eq_ignore_ascii_case("bearer") {
        return Err(ServiceError::Auth(format!(
            "unexpected token type '{}'",
            tok.token_type
        )));
    }
    Ok(tok.access_token)
}

/// Decode a `statuses/user_timeline` payload, preserving service order.
pub fn parse_timeline(body: &str) -> Result<Vec<Post>, ServiceError> {
    let raw: Vec<RawTweet> = serde_json::from_str(body)?;
    Ok(raw
        .into_iter()
        .map(|t| Post {
            created_at: t.created_at,
            text: t.text,
        })
        .collect())
}

#[async_trait]
impl SocialFeed for TwitterClient {
    async fn recent_posts(&self) -> Result<Vec<Post>, ServiceError> {
        let token = self.bearer_token().await?;
        let url = format!(
            "{}/1.1/statuses/user_timeline.json",
            self.config.api_base
        );
        let count = self.config.count.to_string();
        tracing::debug!(%url, user_id = %self.config.user_id, "fetching timeline");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("user_id", self.config.user_id.as_str()),
                ("count", count.as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        parse_timeline(&resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timeline_keeps_order_and_ignores_extra_fields() {
        let body = json!([
            {"created_at":"Wed Oct 10 20:19:24 +0000 2018","text":"second","id":2},
            {"created_at":"Tue Oct 09 10:00:00 +0000 2018","text":"first","id":1}
        ])
        .to_string();
        let posts = parse_timeline(&body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "second");
        assert_eq!(posts[1].created_at, "Tue Oct 09 10:00:00 +0000 2018");
    }

    #[test]
    fn timeline_error_object_is_decode_error() {
        let body = json!({"errors":[{"code":89,"message":"Invalid or expired token."}]});
        let err = parse_timeline(&body.to_string()).unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[test]
    fn token_type_checked() {
        let ok = json!({"token_type":"bearer","access_token":"AAA"}).to_string();
        assert_eq!(parse_token(&ok).unwrap(), "AAA");
        let bad = json!({"token_type":"mac","access_token":"AAA"}).to_string();
        assert!(matches!(parse_token(&bad), Err(ServiceError::Auth(_))));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_network() {
        let client = TwitterClient::new(reqwest::Client::new(), TwitterConfig::default());
        let err = client.recent_posts().await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingCredentials(_)));
    }
}
