use serde::Deserialize;
use tracing::warn;

use crate::error::AppResult;

pub struct KinopoiskClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Normalized movie record handed to the formatter and the request log.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieInfo {
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub url: String,
}

impl KinopoiskClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        // Warn once on app load; every lookup will come back unavailable.
        if api_key.trim().is_empty() {
            warn!("KP_API_KEY not set - movie lookups will be unavailable");
        }
        Self { client, api_key, base_url }
    }

    /// Looks up one movie by id. Any failure (missing key, transport error,
    /// non-2xx, unusable payload) surfaces as `None`; no retry.
    pub async fn get_movie(&self, movie_id: &str) -> Option<MovieInfo> {
        if self.api_key.trim().is_empty() {
            return None;
        }

        match self.request_movie(movie_id).await {
            Ok(info) => info,
            Err(err) => {
                warn!(movie_id = %movie_id, error = %err, "movie lookup failed");
                None
            }
        }
    }

    async fn request_movie(&self, movie_id: &str) -> AppResult<Option<MovieInfo>> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), movie_id);

        let resp: MovieResponse = self
            .client
            .get(url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(normalize(movie_id, resp))
    }
}

pub fn detail_url(movie_id: &str) -> String {
    format!("https://www.kinopoisk.ru/film/{movie_id}/")
}

/// All-or-nothing normalization: a response carrying no rating at all is
/// discarded even when title and year parsed fine.
fn normalize(movie_id: &str, resp: MovieResponse) -> Option<MovieInfo> {
    let rating = resp.rating.and_then(|r| r.kp.or(r.imdb))?;
    if !rating.is_finite() {
        return None;
    }

    let non_empty = |s: &String| !s.trim().is_empty();
    let title = resp
        .name
        .filter(non_empty)
        .or(resp.alternative_name.filter(non_empty))
        .unwrap_or_else(|| format!("Movie {movie_id}"));

    Some(MovieInfo { title, year: resp.year, rating: Some(rating), url: detail_url(movie_id) })
}

#[derive(Debug, Deserialize)]
struct MovieResponse {
    name: Option<String>,
    #[serde(rename = "alternativeName")]
    alternative_name: Option<String>,
    year: Option<i32>,
    rating: Option<RatingBlock>,
}

/// Ratings must be JSON numbers; a string-typed value fails the parse and
/// the lookup comes back unavailable.
#[derive(Debug, Deserialize)]
struct RatingBlock {
    kp: Option<f64>,
    imdb: Option<f64>,
}
