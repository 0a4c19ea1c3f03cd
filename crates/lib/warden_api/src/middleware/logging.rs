//! Request logging interceptor.

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::header::HOST;
use tracing::info;

use super::RequestInterceptor;
use crate::error::AppError;

/// Logs method, URI and host of every request. Never rejects.
pub struct RequestLogger;

#[async_trait]
impl RequestInterceptor for RequestLogger {
    async fn intercept(&self, request: &mut Request) -> Result<(), AppError> {
        let host = request
            .headers()
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        info!(method = %request.method(), uri = %request.uri(), host, "request");
        Ok(())
    }

    fn name(&self) -> &str {
        "request_logger"
    }
}
