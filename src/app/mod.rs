// src/app/mod.rs — search box + one in-flight OMDb lookup + result card

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use eframe::egui as eg;
use tracing::{info, warn};

use crate::config::{load_config, AppConfig};

pub mod omdb;
pub mod poster;
pub mod types;
mod ui;

pub use omdb::SearchError;
pub use types::{DecodedPoster, MovieCard, MovieDetails, SearchDone, SearchHit, SearchState};

// One search settles with one message; a small per-frame budget still drains
// a burst of superseded settles without stalling paint.
const MAX_DONE_PER_FRAME: usize = 4;

pub struct FlickApp {
    // config snapshot taken at startup
    config: AppConfig,

    // search box contents, bound to the TextEdit
    search_query: String,

    // the one request state driving rendering
    state: SearchState,

    // submits bump the sequence; a settle carrying an older sequence is stale
    search_seq: u64,
    done_tx: Sender<SearchDone>,
    done_rx: Receiver<SearchDone>,
}

impl Default for FlickApp {
    fn default() -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            config: load_config(),
            search_query: String::new(),
            state: SearchState::Idle,
            search_seq: 0,
            done_tx,
            done_rx,
        }
    }
}

impl FlickApp {
    /// Replace the stored query. No side effects, never issues a request.
    pub fn update_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.search_query
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading)
    }

    /// Start one lookup for the current query. The query goes out as typed
    /// (percent-encoded), empty string included; the API decides the outcome.
    pub fn submit_search(&mut self) {
        let seq = self.begin_search();

        let query = self.search_query.clone();
        let host = self.config.omdb_api_host.clone();
        let api_key = self.config.omdb_api_key.clone().unwrap_or_default();
        let done_tx = self.done_tx.clone();

        std::thread::spawn(move || {
            let send = |result| {
                let _ = done_tx.send(SearchDone { seq, result });
            };

            let client = match omdb::build_client() {
                Ok(c) => c,
                Err(e) => {
                    send(Err(e));
                    return;
                }
            };

            info!("lookup #{seq} for {query:?}");
            match omdb::fetch_movie(&client, &host, &query, &api_key) {
                Ok(record) => {
                    let poster = poster::fetch_poster(&client, &record.poster);
                    send(Ok(SearchHit { record, poster }));
                }
                Err(e) => {
                    warn!("lookup #{seq} failed: {e}");
                    send(Err(e));
                }
            }
        });
    }

    /// Synchronous part of a submit: bump the sequence and enter `Loading`,
    /// clearing any prior record or error.
    fn begin_search(&mut self) -> u64 {
        self.search_seq += 1;
        self.state = SearchState::Loading;
        self.search_seq
    }

    /// Apply one settlement. `Loading` drops exactly once, when the settle
    /// for the newest submit arrives; older settles are dropped.
    fn apply_settled(&mut self, done: SearchDone) {
        if done.seq != self.search_seq {
            info!(
                "dropping stale settle #{} (current #{})",
                done.seq, self.search_seq
            );
            return;
        }
        self.state = match done.result {
            Ok(hit) => SearchState::Success(MovieCard {
                record: hit.record,
                poster: hit.poster,
                tex: None,
            }),
            Err(e) => SearchState::Failed(e.user_message()),
        };
    }

    fn poll_settled(&mut self, ctx: &eg::Context) {
        let mut drained = 0usize;
        while drained < MAX_DONE_PER_FRAME {
            match self.done_rx.try_recv() {
                Ok(done) => {
                    self.apply_settled(done);
                    drained += 1;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break,
            }
        }
        if drained > 0 {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for FlickApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        // Keep frames moving while a lookup is outstanding.
        if self.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.poll_settled(ctx);

        eg::CentralPanel::default().show(ctx, |ui| {
            self.ui_render(ctx, ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MovieDetails {
        MovieDetails {
            title: "Inception".into(),
            year: "2010".into(),
            plot: "A thief who steals corporate secrets.".into(),
            poster: "N/A".into(),
            imdb_rating: "8.8".into(),
            genre: "Action, Adventure, Sci-Fi".into(),
            director: "Christopher Nolan".into(),
            actors: "Leonardo DiCaprio, Joseph Gordon-Levitt".into(),
            runtime: "148 min".into(),
            released: "16 Jul 2010".into(),
        }
    }

    #[test]
    fn typing_updates_the_query_without_touching_state() {
        let mut app = FlickApp::default();
        app.update_query("incep");
        app.update_query("inception");
        assert_eq!(app.query(), "inception");
        assert!(matches!(app.state, SearchState::Idle));
    }

    #[test]
    fn submit_enters_loading_synchronously() {
        let mut app = FlickApp::default();
        let seq = app.begin_search();
        assert_eq!(seq, 1);
        assert!(app.is_loading());
    }

    #[test]
    fn failed_settle_clears_loading_and_formats_the_message() {
        let mut app = FlickApp::default();
        let seq = app.begin_search();
        app.apply_settled(SearchDone {
            seq,
            result: Err(SearchError::Api("Movie not found!".into())),
        });
        match &app.state {
            SearchState::Failed(msg) => {
                assert_eq!(msg, "Movie not found!. Please try another movie.");
            }
            _ => panic!("expected a failed state"),
        }
    }

    #[test]
    fn successful_settle_keeps_the_record_verbatim() {
        let mut app = FlickApp::default();
        let seq = app.begin_search();
        app.apply_settled(SearchDone {
            seq,
            result: Ok(SearchHit {
                record: record(),
                poster: None,
            }),
        });
        match &app.state {
            SearchState::Success(card) => {
                assert_eq!(card.record.year, "2010");
                assert_eq!(card.record.imdb_rating, "8.8");
                assert!(card.poster.is_none());
                assert!(card.tex.is_none());
            }
            _ => panic!("expected a success state"),
        }
    }

    #[test]
    fn stale_settle_is_dropped_and_newest_wins() {
        let mut app = FlickApp::default();
        let first = app.begin_search();
        let second = app.begin_search();

        // The first request settles after a newer submit: dropped.
        app.apply_settled(SearchDone {
            seq: first,
            result: Ok(SearchHit {
                record: record(),
                poster: None,
            }),
        });
        assert!(app.is_loading());

        app.apply_settled(SearchDone {
            seq: second,
            result: Err(SearchError::Transport),
        });
        match &app.state {
            SearchState::Failed(msg) => {
                assert_eq!(msg, "Network response was not ok. Please try another movie.");
            }
            _ => panic!("expected the second settle to win"),
        }
    }

    #[test]
    fn new_submit_clears_a_prior_result() {
        let mut app = FlickApp::default();
        let seq = app.begin_search();
        app.apply_settled(SearchDone {
            seq,
            result: Ok(SearchHit {
                record: record(),
                poster: None,
            }),
        });
        app.begin_search();
        assert!(app.is_loading());
    }
}
