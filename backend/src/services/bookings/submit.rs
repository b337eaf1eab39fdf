use super::validate::{parse_request, Rejection};
use crate::store::{DocumentStore, StoreError};
use actix_web::error::PayloadError;
use actix_web::http::{header, Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use common::model::booking::BookingRecord;
use common::responses::ApiResponse;
use futures_util::StreamExt;
use log::{error, info, warn};
use std::sync::Arc;
use thiserror::Error;

const SUCCESS_MESSAGE: &str = "Booking request submitted successfully!";
const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed. Use POST.";
const FAILURE_MESSAGE: &str = "Failed to process booking request. Please try again later.";
const TOO_LARGE_MESSAGE: &str = "Request body too large.";

/// Default cap on the request body, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Turns validated submissions into stored booking records.
///
/// The store is injected at construction and shared by every worker through
/// `web::Data`.
pub struct BookingIntake {
    store: Arc<dyn DocumentStore>,
    collection: String,
    body_limit: usize,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
enum BodyError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("failed to read request body: {0}")]
    Read(#[from] PayloadError),
}

impl BookingIntake {
    /// Creates an intake that writes accepted bookings into `collection` of `store`.
    ///
    /// # Arguments
    /// * `store` - The document store shared by all workers. Its lifecycle belongs to
    ///   the caller (see `main.rs`).
    /// * `collection` - Name of the collection that receives booking records.
    ///
    /// The body limit starts at [`DEFAULT_BODY_LIMIT`]; see [`Self::with_body_limit`].
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        BookingIntake {
            store,
            collection: collection.into(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Sets the largest accepted request body, in bytes. Larger bodies are answered
    /// with `413 Payload Too Large` before any validation runs.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Validates `body`, stores the resulting record and returns the new booking id.
    pub async fn submit(&self, body: &[u8]) -> Result<String, SubmitError> {
        let request = parse_request(body)?;
        let record = BookingRecord::new(request, Utc::now());
        let document = serde_json::to_value(&record).map_err(StoreError::from)?;

        // rusqlite is blocking; keep it off the async workers.
        let store = Arc::clone(&self.store);
        let collection = self.collection.clone();
        let id = tokio::task::spawn_blocking(move || store.create(&collection, &document))
            .await
            .map_err(|e| StoreError::Worker(e.to_string()))??;

        info!(
            "Booking saved: id={} name={:?} contact={:?} tests={}",
            id,
            record.name,
            record.contact,
            record.tests.len()
        );
        Ok(id)
    }
}

/// Actix handler for every method on the booking endpoint.
///
/// The body is read from the raw payload stream here rather than through an
/// extractor, so an oversized body still gets the JSON error envelope and CORS header.
///
/// # Returns
/// - `204 No Content` for `OPTIONS` preflight requests.
/// - `200 OK` with `{status, message, bookingId}` when the booking was stored.
/// - `400 Bad Request` when a required field is missing or no test was requested.
/// - `405 Method Not Allowed` for methods other than `POST`.
/// - `413 Payload Too Large` when the body exceeds the configured limit.
/// - `500 Internal Server Error` when the store fails; the cause is only logged.
pub async fn process(
    req: HttpRequest,
    payload: web::Payload,
    intake: web::Data<BookingIntake>,
) -> HttpResponse {
    if *req.method() == Method::OPTIONS {
        return preflight();
    }
    if *req.method() != Method::POST {
        return json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            ApiResponse::error(METHOD_NOT_ALLOWED_MESSAGE),
        );
    }

    let body = match read_body(payload, intake.body_limit).await {
        Ok(body) => body,
        Err(BodyError::TooLarge { limit }) => {
            warn!("Booking rejected: body exceeds {} bytes", limit);
            return json_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                ApiResponse::error(TOO_LARGE_MESSAGE),
            );
        }
        Err(e) => {
            warn!("Booking rejected: {}", e);
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiResponse::error(Rejection::MissingFields.to_string()),
            );
        }
    };

    match intake.submit(&body).await {
        Ok(id) => json_response(StatusCode::OK, ApiResponse::success(SUCCESS_MESSAGE, id)),
        Err(SubmitError::Rejected(rejection)) => {
            warn!("Booking rejected: {}", rejection);
            json_response(
                StatusCode::BAD_REQUEST,
                ApiResponse::error(rejection.to_string()),
            )
        }
        Err(SubmitError::Store(e)) => {
            error!("Booking submission error: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::error(FAILURE_MESSAGE),
            )
        }
    }
}

/// Collects the payload stream, stopping as soon as it grows past `limit` bytes.
async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut, BodyError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            return Err(BodyError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Answers a CORS preflight.
///
/// Returns `204 No Content` with an empty body and headers allowing any origin to
/// `POST` with a `Content-Type` header. Nothing is validated or stored.
fn preflight() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .finish()
}

/// Builds a JSON response with the given status.
///
/// Every non-preflight reply goes through here so it carries
/// `Access-Control-Allow-Origin: *` and `Content-Type: application/json`.
fn json_response(status: StatusCode, body: ApiResponse) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .json(body)
}
