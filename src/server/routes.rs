use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::server::api::{self, ApiError};
use crate::server::AppState;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn json(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// Dispatches one JSON API request. `target` is the request path with its
/// optional query string. Playback streaming and static files are handled by
/// the router in [`crate::server::router`], not here.
pub fn route_request(state: &AppState, method: &str, target: &str) -> HttpResponse {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };

    if method != "GET" {
        return error_response(405, "Method Not Allowed", &format!("{method} is not supported"));
    }

    let result = match path {
        "/api/health" => api::health_payload(state),
        "/api/trends/countries" => api::trends_countries_payload(state),
        "/api/plants" => api::plants_payload(state, query),
        "/api/plants/viewport" => api::plants_viewport_payload(state, query),
        path if path.starts_with("/api/trends/year/") => {
            let year = path.trim_start_matches("/api/trends/year/");
            api::trends_year_payload(state, year)
        }
        _ => return error_response(404, "Not Found", &format!("no route for {path}")),
    };

    match result {
        Ok(body) => HttpResponse::json(body),
        Err(err) => api_error_response(&err),
    }
}

pub fn api_error_response(err: &ApiError) -> HttpResponse {
    match err {
        ApiError::BadRequest(msg) => error_response(400, "Bad Request", msg),
        ApiError::Unavailable(_) => error_response(503, "Service Unavailable", &err.to_string()),
        ApiError::Serialize(_) => {
            tracing::error!(error = %err, "response serialization failed");
            error_response(500, "Internal Server Error", &err.to_string())
        }
    }
}

pub fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
