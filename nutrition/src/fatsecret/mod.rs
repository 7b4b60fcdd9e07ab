//! FatSecret platform API client
//!
//! Thin client for the two calls the aggregator needs: a food search and
//! a per-food detail fetch, both method-style POSTs against the single
//! platform endpoint, authenticated with a cached client-credentials
//! bearer token.
//!
//! The provider returns numbers as strings and collapses single-element
//! arrays into bare objects; the wire types here absorb both quirks.

use crate::config::FatSecretConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

mod token;

pub use token::TokenCache;

/// Upstream failures from the nutrition provider.
///
/// Token-path errors fail the whole request; search/detail errors are
/// absorbed per item by the aggregator loop.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to obtain OAuth token (HTTP {0})")]
    TokenEndpoint(u16),

    #[error("FatSecret {method} returned HTTP {status}")]
    Api { method: &'static str, status: u16 },

    #[error("No search results for '{0}'")]
    NoMatch(String),

    #[error("No serving data for food id {0}")]
    MissingServing(String),
}

/// One search hit. Only the identifier is needed downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodMatch {
    pub food_id: String,
}

/// One serving from the detail response. All macro fields are stringly
/// typed by the provider; absent fields count as zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Serving {
    pub serving_description: Option<String>,
    pub calories: Option<String>,
    pub protein: Option<String>,
    pub carbohydrate: Option<String>,
    pub fat: Option<String>,
}

impl Serving {
    pub fn description(&self) -> &str {
        self.serving_description.as_deref().unwrap_or("serving")
    }

    pub fn calories_value(&self) -> f64 {
        parse_macro(&self.calories)
    }

    pub fn protein_value(&self) -> f64 {
        parse_macro(&self.protein)
    }

    pub fn carbohydrate_value(&self) -> f64 {
        parse_macro(&self.carbohydrate)
    }

    pub fn fat_value(&self) -> f64 {
        parse_macro(&self.fat)
    }
}

fn parse_macro(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Single value or array; the provider uses both interchangeably.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.into_iter().next(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    foods: Option<SearchFoods>,
}

#[derive(Debug, Deserialize)]
struct SearchFoods {
    food: Option<OneOrMany<FoodMatch>>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    food: Option<FoodDetail>,
}

#[derive(Debug, Deserialize)]
struct FoodDetail {
    servings: Option<FoodServings>,
}

#[derive(Debug, Deserialize)]
struct FoodServings {
    serving: Option<OneOrMany<Serving>>,
}

/// FatSecret API client with its token cache.
pub struct FatSecretClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    oauth_url: String,
    api_url: String,
    token: TokenCache,
}

impl FatSecretClient {
    pub fn new(config: &FatSecretConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.client_id.clone(),
            client_secret: SecretString::new(config.client_secret.clone()),
            oauth_url: config.oauth_url.clone(),
            api_url: config.api_url.clone(),
            token: TokenCache::new(),
        }
    }

    /// Cached bearer token, refreshed through the token endpoint only
    /// when absent or expired.
    pub async fn token(&self) -> Result<String, UpstreamError> {
        self.token.get_or_refresh(|| self.request_token()).await
    }

    async fn request_token(&self) -> Result<(String, i64), UpstreamError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials"), ("scope", "basic")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::TokenEndpoint(response.status().as_u16()));
        }

        let token: TokenResponse = response.json().await?;
        Ok((token.access_token, token.expires_in))
    }

    /// Search for `term` and return the first match only.
    pub async fn search_first(&self, term: &str) -> Result<FoodMatch, UpstreamError> {
        let token = self.token().await?;
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&json!({
                "method": "foods.search",
                "search_expression": term,
                "format": "json",
                "max_results": 3
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Api {
                method: "foods.search",
                status: response.status().as_u16(),
            });
        }

        let search: SearchResponse = response.json().await?;
        search
            .foods
            .and_then(|f| f.food)
            .and_then(OneOrMany::into_first)
            .ok_or_else(|| UpstreamError::NoMatch(term.to_string()))
    }

    /// Fetch nutrition details for a food and return its first listed
    /// serving only.
    pub async fn first_serving(&self, food_id: &str) -> Result<Serving, UpstreamError> {
        let token = self.token().await?;
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&json!({
                "method": "food.get.v2",
                "food_id": food_id,
                "format": "json"
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Api {
                method: "food.get.v2",
                status: response.status().as_u16(),
            });
        }

        let detail: DetailResponse = response.json().await?;
        detail
            .food
            .and_then(|f| f.servings)
            .and_then(|s| s.serving)
            .and_then(OneOrMany::into_first)
            .ok_or_else(|| UpstreamError::MissingServing(food_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_or_many_accepts_bare_object() {
        let raw = r#"{"foods": {"food": {"food_id": "35755"}}}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let first = parsed.foods.unwrap().food.unwrap().into_first().unwrap();
        assert_eq!(first.food_id, "35755");
    }

    #[test]
    fn test_one_or_many_takes_first_of_array() {
        let raw = r#"{"foods": {"food": [{"food_id": "1"}, {"food_id": "2"}]}}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let first = parsed.foods.unwrap().food.unwrap().into_first().unwrap();
        assert_eq!(first.food_id, "1");
    }

    #[test]
    fn test_empty_search_is_no_match() {
        let raw = r#"{"foods": {"max_results": "3"}}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed
            .foods
            .unwrap()
            .food
            .and_then(OneOrMany::into_first)
            .is_none());
    }

    #[test]
    fn test_serving_parses_stringly_macros() {
        let serving = Serving {
            serving_description: Some("1 medium".to_string()),
            calories: Some("105".to_string()),
            protein: Some("1.29".to_string()),
            carbohydrate: Some("26.95".to_string()),
            fat: None,
        };
        assert_eq!(serving.description(), "1 medium");
        assert!((serving.calories_value() - 105.0).abs() < 1e-9);
        assert!((serving.protein_value() - 1.29).abs() < 1e-9);
        assert!((serving.carbohydrate_value() - 26.95).abs() < 1e-9);
        assert_eq!(serving.fat_value(), 0.0);
    }

    #[test]
    fn test_unparseable_macro_counts_as_zero() {
        let serving = Serving {
            calories: Some("n/a".to_string()),
            ..Serving::default()
        };
        assert_eq!(serving.calories_value(), 0.0);
        assert_eq!(serving.description(), "serving");
    }
}
