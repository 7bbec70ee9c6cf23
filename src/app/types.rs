// src/app/types.rs
use eframe::egui::TextureHandle;
use serde::Deserialize;

use super::omdb::SearchError;

/// Display fields for one movie, kept exactly as the API returned them.
/// No numeric parsing, no reformatting; "N/A" is a valid value everywhere.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MovieDetails {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Plot")]
    pub plot: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Released")]
    pub released: String,
}

/// Poster pixels decoded on a worker thread, waiting for a UI-thread upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedPoster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// One successful lookup plus its (lazily uploaded) poster texture.
pub struct MovieCard {
    pub record: MovieDetails,
    pub poster: Option<DecodedPoster>,
    pub tex: Option<TextureHandle>, // UI thread only
}

/// The single request state driving rendering. Exactly one variant is active.
pub enum SearchState {
    Idle,
    Loading,
    Success(MovieCard),
    Failed(String),
}

/// What a worker found for one lookup. A missing poster is not a failure.
pub struct SearchHit {
    pub record: MovieDetails,
    pub poster: Option<DecodedPoster>,
}

/// Cross-thread settlement message. `seq` identifies the submit that started
/// the request; settles for superseded submits are dropped on receipt.
pub struct SearchDone {
    pub seq: u64,
    pub result: Result<SearchHit, SearchError>,
}
