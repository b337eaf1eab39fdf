//! # Booking Intake Service
//!
//! A single method-dispatched endpoint that accepts booking submissions:
//!
//! *   **`OPTIONS`**: CORS preflight, answered with `204 No Content`.
//! *   **`POST`**: validates the JSON body, stores a `pending` booking record and
//!     returns its generated `bookingId`.
//! *   **anything else**: `405 Method Not Allowed`.
//!
//! The endpoint is mounted at `/api/bookings` and also serves as the application's
//! default service, so a submission posted to any path reaches it.

mod submit;
mod validate;

pub use submit::BookingIntake;

use actix_web::web::{self, resource};
use actix_web::{Resource, Route};

const API_PATH: &str = "/api/bookings";

/// Configures and returns the Actix `Resource` for the named booking endpoint.
///
/// # Registered Routes:
///
/// *   **`* /api/bookings`**:
///     - **Handler**: `submit::process`
///     - **Description**: Every method is routed to the handler, which does its own
///       dispatch: `OPTIONS` gets the CORS preflight reply, `POST` is validated and
///       stored, and any other method gets `405` with the JSON error envelope.
pub fn configure_routes() -> Resource {
    resource(API_PATH).route(default_route())
}

/// Catch-all route for registration as the application's default service.
///
/// Submissions are accepted on any path, so `main.rs` installs this with
/// `App::default_service`. It shares the handler of [`configure_routes`], so the
/// responses are identical to those of `/api/bookings`.
pub fn default_route() -> Route {
    web::route().to(submit::process)
}
