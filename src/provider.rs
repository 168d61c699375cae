//! The text-producer boundary: the one asynchronous edge of the crate.
//!
//! The codec itself never performs I/O. Text comes from an external producer
//! behind the [`TextProducer`] trait, whose single method returns a boxed
//! future so the trait stays object-safe and the crate stays runtime-neutral.
//! Concrete HTTP/SDK clients live outside this crate; [`StaticProducer`] is
//! provided for tests and offline runs.
//!
//! [`ProviderRegistry`] memoizes client construction per provider identifier
//! so repeated pipeline calls reuse one client instance.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use rowcodec::{ProviderRegistry, StaticProducer, TextProducer};
//!
//! let registry = ProviderRegistry::new(|id: &str| {
//!     Ok(Arc::new(StaticProducer::new(format!("from {}", id))) as Arc<dyn TextProducer>)
//! });
//!
//! let first = registry.get_or_create("echo").unwrap();
//! let again = registry.get_or_create("echo").unwrap();
//! assert!(Arc::ptr_eq(&first, &again));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// One request to a text producer: rendered format instructions plus the
/// caller's task text.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    /// The wire-format specification, from [`render`](crate::render).
    pub instructions: String,
    /// The caller's actual task or source material.
    pub task: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl CompletionRequest {
    #[must_use]
    pub fn new(instructions: impl Into<String>, task: impl Into<String>) -> Self {
        CompletionRequest {
            instructions: instructions.into(),
            task: task.into(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Unit accounting reported by a producer, when available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_units: u32,
    pub output_units: u32,
    pub total_units: u32,
}

/// A producer's raw response.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub content: String,
    pub usage: Option<Usage>,
}

/// Boxed future returned by [`TextProducer::complete`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Completion, ProviderError>> + Send + 'a>>;

/// An external source of generated text.
///
/// Implementations wrap whatever transport reaches the actual model. The
/// method is async in effect but returns a boxed future, keeping the trait
/// usable as `dyn TextProducer` without committing callers to a runtime.
///
/// Failures must be reported as [`ProviderError`]; that classification is
/// what makes an attempt eligible for fallback to another producer.
pub trait TextProducer: Send + Sync {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

/// A producer that returns fixed text, for tests and offline runs.
#[derive(Clone, Debug)]
pub struct StaticProducer {
    content: String,
    usage: Option<Usage>,
}

impl StaticProducer {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        StaticProducer {
            content: content.into(),
            usage: None,
        }
    }

    /// Attaches usage figures to every completion.
    #[must_use]
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}

impl TextProducer for StaticProducer {
    fn complete<'a>(&'a self, _request: &'a CompletionRequest) -> CompletionFuture<'a> {
        let completion = Completion {
            content: self.content.clone(),
            usage: self.usage,
        };
        Box::pin(async move { Ok(completion) })
    }
}

type ProviderFactory =
    Box<dyn Fn(&str) -> Result<Arc<dyn TextProducer>, ProviderError> + Send + Sync>;

/// Lazily-populated registry of provider clients, keyed by identifier.
///
/// Construction goes through the supplied factory at most once per
/// identifier; the lock is held across construction so concurrent callers
/// never build the same client twice. A factory failure is not cached, so a
/// later call may retry construction.
pub struct ProviderRegistry {
    factory: ProviderFactory,
    clients: Mutex<HashMap<String, Arc<dyn TextProducer>>>,
}

impl ProviderRegistry {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn TextProducer>, ProviderError> + Send + Sync + 'static,
    {
        ProviderRegistry {
            factory: Box::new(factory),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the client for `id`, constructing and caching it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the factory's [`ProviderError`] for unknown or
    /// unconstructible providers.
    pub fn get_or_create(&self, id: &str) -> Result<Arc<dyn TextProducer>, ProviderError> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|_| ProviderError::new(id, "provider registry lock poisoned"))?;
        if let Some(client) = clients.get(id) {
            return Ok(Arc::clone(client));
        }
        tracing::debug!(provider = id, "constructing provider client");
        let client = (self.factory)(id)?;
        clients.insert(id.to_string(), Arc::clone(&client));
        Ok(client)
    }

    /// Returns `true` if a client for `id` has already been constructed.
    #[must_use]
    pub fn is_cached(&self, id: &str) -> bool {
        self.clients
            .lock()
            .map(|clients| clients.contains_key(id))
            .unwrap_or(false)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached: Vec<String> = self
            .clients
            .lock()
            .map(|clients| clients.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("ProviderRegistry")
            .field("cached", &cached)
            .finish()
    }
}
