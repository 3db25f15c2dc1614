//! Message channel registry
//!
//! A passive addressing table mapping channel names to handlers. The
//! orchestrator session registers its handlers in bulk when the UI surface
//! finishes loading and removes exactly that set when the surface shuts
//! down; the boundary layer calls [`ChannelRegistry::dispatch`] for each
//! incoming message.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;
use serde_json::Value;

/// The running future produced by a handler invocation
pub type HandlerFuture = BoxFuture<'static, ()>;

/// Handler identity counter. Identities make de-registration a value-level
/// match rather than a name-level one.
static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// A channel handler with a stable identity
#[derive(Clone)]
pub struct Handler {
    id: u64,
    func: Arc<dyn Fn(Value) -> HandlerFuture + Send + Sync>,
}

impl Handler {
    /// Create a new handler with a fresh identity
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value) -> HandlerFuture + Send + Sync + 'static,
    {
        Self {
            id: NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed),
            func: Arc::new(func),
        }
    }

    fn invoke(&self, payload: Value) -> HandlerFuture {
        (self.func)(payload)
    }
}

/// Pairing of a channel name and the handler attached to it
#[derive(Clone)]
pub struct Registration {
    /// The channel this handler is attached to
    pub channel: &'static str,
    handler: Handler,
}

impl Registration {
    /// Create a registration for `channel`
    pub fn new<F>(channel: &'static str, func: F) -> Self
    where
        F: Fn(Value) -> HandlerFuture + Send + Sync + 'static,
    {
        Self {
            channel,
            handler: Handler::new(func),
        }
    }
}

/// Table of channel handlers owned by one orchestrator session
pub struct ChannelRegistry {
    entries: DashMap<&'static str, Handler>,
}

impl ChannelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Attach every handler to its named channel.
    ///
    /// Re-registering a name replaces the previous handler.
    pub fn register_all(&self, registrations: &[Registration]) {
        for reg in registrations {
            self.entries.insert(reg.channel, reg.handler.clone());
            tracing::info!("Registered channel {}", reg.channel);
        }
    }

    /// Detach exactly the handlers attached by the matching `register_all`
    /// call.
    ///
    /// Matching is value-level: a channel whose slot now holds a different
    /// handler is left untouched.
    pub fn unregister_all(&self, registrations: &[Registration]) {
        for reg in registrations {
            let removed = self
                .entries
                .remove_if(reg.channel, |_, handler| handler.id == reg.handler.id);
            if removed.is_some() {
                tracing::info!("Removed channel {}", reg.channel);
            }
        }
    }

    /// Look up the handler for `channel` and invoke it, returning the
    /// running future for the caller to drive or spawn.
    ///
    /// Dispatch to an unregistered channel is a no-op at this layer; the
    /// registry never fails in response to malformed channel traffic.
    pub fn dispatch(&self, channel: &str, payload: Value) -> Option<HandlerFuture> {
        let handler = self.entries.get(channel).map(|entry| entry.value().clone());
        match handler {
            Some(handler) => Some(handler.invoke(payload)),
            None => {
                tracing::debug!("No handler registered for channel {}", channel);
                None
            }
        }
    }

    /// Whether a handler is attached to `channel`
    pub fn contains(&self, channel: &str) -> bool {
        self.entries.contains_key(channel)
    }

    /// Number of attached handlers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
