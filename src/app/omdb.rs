// src/app/omdb.rs
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::types::MovieDetails;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Request-level failure or non-success HTTP status.
    #[error("Network response was not ok")]
    Transport,
    /// The API understood the request but rejected it; its message verbatim.
    #[error("{0}")]
    Api(String),
    /// Response body did not match either expected shape.
    #[error("{0}")]
    Parse(String),
}

impl SearchError {
    /// Inline text shown under the search bar for any failed attempt.
    pub fn user_message(&self) -> String {
        format!("{self}. Please try another movie.")
    }
}

/// Parsed API reply: either a full record or the API's own error string.
#[derive(Debug, PartialEq, Eq)]
pub enum OmdbReply {
    Movie(MovieDetails),
    Failure(String),
}

impl OmdbReply {
    /// Decode a response body, failing closed: a body that is neither the
    /// `Response: "False"` failure shape nor a complete record is an error.
    pub fn from_json(body: &str) -> Result<Self, SearchError> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(rename = "Response")]
            response: Option<String>,
            #[serde(rename = "Error")]
            error: Option<String>,
        }

        let envelope: Envelope =
            serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;
        if envelope.response.as_deref() == Some("False") {
            let msg = envelope
                .error
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Ok(Self::Failure(msg));
        }
        let record: MovieDetails =
            serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;
        Ok(Self::Movie(record))
    }
}

/// `GET <host>/?t=<title>&apikey=<key>`, both values percent-encoded.
pub fn build_lookup_url(host: &str, title: &str, api_key: &str) -> String {
    format!(
        "{}/?t={}&apikey={}",
        host.trim_end_matches('/'),
        urlencoding::encode(title),
        urlencoding::encode(api_key),
    )
}

pub fn build_client() -> Result<Client, SearchError> {
    Client::builder()
        .user_agent("flick/lookup")
        .timeout(Duration::from_secs(20))
        .build()
        .map_err(|e| {
            warn!("http client build failed: {e}");
            SearchError::Transport
        })
}

/// Fetch one movie by title. Blocking; run on a worker thread.
pub fn fetch_movie(
    client: &Client,
    host: &str,
    title: &str,
    api_key: &str,
) -> Result<MovieDetails, SearchError> {
    let url = build_lookup_url(host, title, api_key);

    let resp = client.get(&url).send().map_err(|e| {
        warn!("lookup request failed: {e}");
        SearchError::Transport
    })?;
    if !resp.status().is_success() {
        warn!("lookup returned HTTP {}", resp.status());
        return Err(SearchError::Transport);
    }
    let body = resp.text().map_err(|e| {
        warn!("lookup body read failed: {e}");
        SearchError::Transport
    })?;

    match OmdbReply::from_json(&body)? {
        OmdbReply::Movie(record) => Ok(record),
        OmdbReply::Failure(msg) => Err(SearchError::Api(msg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCEPTION: &str = r#"{
        "Title": "Inception",
        "Year": "2010",
        "Rated": "PG-13",
        "Released": "16 Jul 2010",
        "Runtime": "148 min",
        "Genre": "Action, Adventure, Sci-Fi",
        "Director": "Christopher Nolan",
        "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
        "Plot": "A thief who steals corporate secrets.",
        "Poster": "https://m.media-amazon.com/images/inception.jpg",
        "imdbRating": "8.8",
        "Response": "True"
    }"#;

    #[test]
    fn lookup_url_encodes_reserved_characters() {
        let url = build_lookup_url("https://www.omdbapi.com", "Fast & Furious?", "k y");
        assert_eq!(
            url,
            "https://www.omdbapi.com/?t=Fast%20%26%20Furious%3F&apikey=k%20y"
        );
    }

    #[test]
    fn lookup_url_allows_empty_query() {
        let url = build_lookup_url("https://www.omdbapi.com/", "", "key");
        assert_eq!(url, "https://www.omdbapi.com/?t=&apikey=key");
    }

    #[test]
    fn reply_parses_full_record_verbatim() {
        let reply = OmdbReply::from_json(INCEPTION).unwrap();
        let OmdbReply::Movie(record) = reply else {
            panic!("expected a movie");
        };
        assert_eq!(record.title, "Inception");
        assert_eq!(record.year, "2010");
        assert_eq!(record.imdb_rating, "8.8");
        assert_eq!(record.released, "16 Jul 2010");
    }

    #[test]
    fn reply_surfaces_api_error_verbatim() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let reply = OmdbReply::from_json(body).unwrap();
        assert_eq!(reply, OmdbReply::Failure("Movie not found!".to_string()));
    }

    #[test]
    fn reply_fails_closed_on_incomplete_record() {
        let body = r#"{"Response":"True","Title":"Inception"}"#;
        assert!(matches!(
            OmdbReply::from_json(body),
            Err(SearchError::Parse(_))
        ));
    }

    #[test]
    fn reply_fails_closed_on_malformed_json() {
        assert!(matches!(
            OmdbReply::from_json("<html>502</html>"),
            Err(SearchError::Parse(_))
        ));
    }

    #[test]
    fn user_messages_carry_the_retry_hint() {
        assert_eq!(
            SearchError::Api("Movie not found!".into()).user_message(),
            "Movie not found!. Please try another movie."
        );
        assert_eq!(
            SearchError::Transport.user_message(),
            "Network response was not ok. Please try another movie."
        );
    }
}
