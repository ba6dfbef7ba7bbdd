//! Route definitions for `/consultations`.

use axum::routing::post;
use axum::Router;

use crate::handlers::consultations;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(consultations::create_consultation))
}
