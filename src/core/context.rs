//! Ambient request context for correlation
//!
//! This module provides:
//! - `RequestContext`: Read access to the current request and trace ids
//! - `ScopedRequestContext`: Shared store with an RAII scope guard
//! - `EmptyContext`: No-op context for wiring without request tracking
//!
//! The context is an explicit object handed to whoever needs it; there
//! is no hidden thread-local or global store.

use parking_lot::RwLock;
use std::sync::Arc;

/// Read access to the ids of the request currently in flight.
///
/// Both ids are optional: outside any request scope there is nothing
/// to correlate, and every consumer treats absence as silence.
pub trait RequestContext: Send + Sync {
    fn request_id(&self) -> Option<String>;
    fn trace_id(&self) -> Option<String>;
}

#[derive(Debug, Clone)]
struct RequestScope {
    request_id: String,
    trace_id: String,
}

/// Shared request-scope store.
///
/// Clones share the same underlying slot, so a clone handed to the
/// logger observes scopes entered through any other clone.
#[derive(Debug, Clone, Default)]
pub struct ScopedRequestContext {
    current: Arc<RwLock<Option<RequestScope>>>,
}

impl ScopedRequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a request scope; the previous scope is restored when the
    /// returned guard drops, so scopes nest.
    pub fn enter(
        &self,
        request_id: impl Into<String>,
        trace_id: impl Into<String>,
    ) -> ContextScope {
        let scope = RequestScope {
            request_id: request_id.into(),
            trace_id: trace_id.into(),
        };
        let previous = self.current.write().replace(scope);
        ContextScope {
            store: Arc::clone(&self.current),
            previous,
        }
    }
}

impl RequestContext for ScopedRequestContext {
    fn request_id(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.request_id.clone())
    }

    fn trace_id(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.trace_id.clone())
    }
}

/// RAII guard for an entered request scope
///
/// When dropped, restores the scope that was active before `enter`.
pub struct ContextScope {
    store: Arc<RwLock<Option<RequestScope>>>,
    previous: Option<RequestScope>,
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        *self.store.write() = self.previous.take();
    }
}

/// Context that never reports an active request.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl RequestContext for EmptyContext {
    fn request_id(&self) -> Option<String> {
        None
    }

    fn trace_id(&self) -> Option<String> {
        None
    }
}
