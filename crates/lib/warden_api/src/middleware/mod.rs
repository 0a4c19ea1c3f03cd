//! Request interceptor chain.
//!
//! Interceptors form an ordered pipeline composed once when the router is
//! built. Each one may inspect or annotate the request; the first error
//! short-circuits the chain and becomes the response, so later interceptors
//! and the handler never run.

pub mod auth;
pub mod logging;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::AppError;

/// A single step in an `InterceptorChain`.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Called before the handler. Return Err to reject the request.
    async fn intercept(&self, request: &mut Request) -> Result<(), AppError>;

    /// Interceptor identifier for debugging/logging.
    fn name(&self) -> &str;
}

/// Ordered list of interceptors.
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create a chain from an ordered list of interceptors.
    pub fn new(interceptors: Vec<Arc<dyn RequestInterceptor>>) -> Self {
        Self { interceptors }
    }

    /// Create an empty chain (no-op).
    pub fn empty() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run all interceptors in order. Short-circuits on error.
    pub async fn run(&self, request: &mut Request) -> Result<(), AppError> {
        for interceptor in &self.interceptors {
            if let Err(e) = interceptor.intercept(request).await {
                debug!(interceptor = interceptor.name(), "request rejected");
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Axum middleware: runs the chain, then the downstream handler if every
/// interceptor accepted the request.
pub async fn run_chain(
    State(chain): State<Arc<InterceptorChain>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    chain.run(&mut request).await?;
    Ok(next.run(request).await)
}
