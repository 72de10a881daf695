//! Server-sent playback: one trends view per animation tick, wrapping from
//! the last year back to the first. Closing the connection ends the stream.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{RawQuery, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures_util::stream::{self, Stream};
use serde::Deserialize;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use crate::server::api::{self, ApiError};
use crate::server::routes::api_error_response;
use crate::server::{AppState, SharedState};
use crate::trends::{Playback, TrendsDataset, TrendsFilter};

pub const FRAME_EVENT: &str = "frame";

#[derive(Debug, Default, Deserialize)]
pub struct PlayQuery {
    pub from: Option<i32>,
}

/// `from` defaults to the first configured year and must lie inside the
/// bounds, like `/api/trends/year/{year}`.
pub async fn play_handler(State(state): State<SharedState>, RawQuery(query): RawQuery) -> Response {
    let start = match start_year(&state, query.as_deref().unwrap_or("")) {
        Ok(year) => year,
        Err(err) => return api_error_response(&err).into_response(),
    };
    let period = Duration::from_millis(state.config.animation_interval_ms);
    tracing::info!(from = start, interval_ms = state.config.animation_interval_ms, "playback stream started");

    Sse::new(playback_stream(state.clone(), Playback::new(start).toggle(), period))
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn start_year(state: &AppState, query: &str) -> Result<i32, ApiError> {
    let dataset = api::trends(state)?;
    let params: PlayQuery = api::parse_params(query)?;
    match params.from {
        Some(year) => api::checked_year(dataset, year),
        None => Ok(dataset.settings().years.min),
    }
}

/// Stream state; dropped when the client disconnects.
struct PlaybackLoop {
    state: SharedState,
    playback: Playback,
    ticks: IntervalStream,
    from: i32,
}

impl Drop for PlaybackLoop {
    fn drop(&mut self) {
        tracing::info!(from = self.from, last = self.playback.year, "playback stream closed");
    }
}

/// Ticks every `period`, emitting the view for the current year before
/// advancing the playback. Each frame is built on the blocking pool.
pub fn playback_stream(
    state: SharedState,
    start: Playback,
    period: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let initial = PlaybackLoop {
        state,
        playback: start,
        ticks: IntervalStream::new(tokio::time::interval(period)),
        from: start.year,
    };
    stream::unfold(initial, |mut playback_loop| async move {
        playback_loop.ticks.next().await?;
        let state = playback_loop.state.clone();
        let playback = playback_loop.playback;
        let (event, next) = match tokio::task::spawn_blocking(move || next_frame(&state, playback)).await {
            Ok(frame) => frame,
            Err(err) => {
                tracing::error!(error = %err, year = playback.year, "playback frame task failed");
                (Event::default().event("error").data(err.to_string()), playback)
            }
        };
        playback_loop.playback = next;
        Some((Ok(event), playback_loop))
    })
}

/// The event for `playback` and the state to use on the next tick.
fn next_frame(state: &AppState, playback: Playback) -> (Event, Playback) {
    match state.trends.as_ref() {
        Some(dataset) => (
            frame_event(dataset, playback),
            playback.tick(dataset.settings().years),
        ),
        None => (
            Event::default()
                .event("error")
                .data(ApiError::Unavailable("trends").to_string()),
            playback,
        ),
    }
}

pub fn frame_event(dataset: &TrendsDataset, playback: Playback) -> Event {
    let view = dataset.on_filter_changed(&TrendsFilter { year: playback.year });
    Event::default()
        .event(FRAME_EVENT)
        .id(playback.year.to_string())
        .json_data(&view)
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, year = playback.year, "failed to encode playback frame");
            Event::default().event("error").data(err.to_string())
        })
}
