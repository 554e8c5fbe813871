//! Root banner and fallback handlers.

use axum::http::Uri;

use crate::error::AppError;

/// `GET /` — plain-text health banner.
pub async fn banner_handler() -> &'static str {
    vesta_core::echo::BANNER
}

/// Any unmatched route.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
