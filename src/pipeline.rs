//! The orchestration layer: schema to prompt to provider to records.
//!
//! [`RowCodec`] bundles one analyzed schema with its wire options and exposes
//! the pure codec operations. [`Pipeline`] adds the external half: it renders
//! instructions, calls a [`TextProducer`](crate::TextProducer) resolved
//! through an injected [`ProviderRegistry`], and decodes the response.
//!
//! Fallback policy: only provider failures (transport, availability,
//! construction) move the pipeline down its chain, strictly one attempt at a
//! time. Parse and validation failures are structural, so they propagate
//! immediately and are never retried against another producer.
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::{Mode, RowCodec, SchemaNode, Value};
//!
//! let schema = SchemaNode::object([
//!     ("id", SchemaNode::number()),
//!     ("name", SchemaNode::string()),
//! ]);
//! let codec = RowCodec::new(&schema).unwrap();
//!
//! let decoded = codec.decode("42|Alice", Mode::Single).unwrap();
//! assert_eq!(decoded.records[0].get_path("name"), Some(&Value::from("Alice")));
//! ```

use std::sync::Arc;

use crate::analyze::{analyze, PositionList};
use crate::decode::{decode_validated, Decoded};
use crate::error::{ProviderError, Result};
use crate::options::{Mode, Options};
use crate::prompt::{render, PromptOptions};
use crate::provider::{CompletionRequest, ProviderRegistry, Usage};
use crate::schema::SchemaNode;
use crate::validate::{SchemaValidator, Unvalidated, Validate};
use crate::value::Value;

/// One analyzed schema plus its wire options.
///
/// Construction runs option validation and schema analysis once; the
/// resulting position list is immutable and shared by every subsequent
/// prompt or decode call.
#[derive(Clone, Debug)]
pub struct RowCodec {
    positions: PositionList,
    options: Options,
}

impl RowCodec {
    /// Analyzes a schema with the default wire options.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`](crate::SchemaError) if the schema cannot be
    /// laid out positionally.
    pub fn new(schema: &SchemaNode) -> Result<Self> {
        Self::with_options(schema, Options::new())
    }

    /// Analyzes a schema with custom wire options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::ConfigError) for a degenerate
    /// delimiter alphabet, or [`SchemaError`](crate::SchemaError) if the
    /// schema cannot be laid out positionally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::{Options, RowCodec, SchemaNode};
    ///
    /// let schema = SchemaNode::object([("name", SchemaNode::string())]);
    /// let options = Options::new().with_delimiter("\t");
    /// let codec = RowCodec::with_options(&schema, options).unwrap();
    /// assert_eq!(codec.options().delimiter, "\t");
    /// ```
    pub fn with_options(schema: &SchemaNode, options: Options) -> Result<Self> {
        options.validate()?;
        let positions = analyze(schema)?;
        Ok(RowCodec { positions, options })
    }

    /// The analyzed column layout.
    #[must_use]
    pub fn positions(&self) -> &PositionList {
        &self.positions
    }

    /// The wire options in use.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Renders the wire-format instructions for this schema.
    #[must_use]
    pub fn prompt(&self, prompt: &PromptOptions) -> String {
        render(&self.positions, &self.options, prompt)
    }

    /// Decodes response text without downstream validation.
    ///
    /// # Errors
    ///
    /// See [`decode`](crate::decode()).
    pub fn decode(&self, text: &str, mode: Mode) -> Result<Decoded<Value>> {
        self.decode_validated(text, mode, &Unvalidated)
    }

    /// Decodes response text, passing each record through a validator.
    ///
    /// # Errors
    ///
    /// See [`decode_validated`](crate::decode_validated).
    pub fn decode_validated<V: Validate>(
        &self,
        text: &str,
        mode: Mode,
        validator: &V,
    ) -> Result<Decoded<V::Output>> {
        decode_validated(text, &self.positions, &self.options, mode, validator)
    }

    /// A [`SchemaValidator`] for this schema's layout.
    #[must_use]
    pub fn validator(&self) -> SchemaValidator {
        SchemaValidator::new(self.positions.clone())
    }
}

/// An ordered try-list of provider identifiers: one primary, then fallbacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderChain {
    primary: String,
    fallbacks: Vec<String>,
}

impl ProviderChain {
    #[must_use]
    pub fn new(primary: impl Into<String>) -> Self {
        ProviderChain {
            primary: primary.into(),
            fallbacks: Vec::new(),
        }
    }

    /// Appends a fallback provider, tried after all earlier entries.
    #[must_use]
    pub fn with_fallback(mut self, id: impl Into<String>) -> Self {
        self.fallbacks.push(id.into());
        self
    }

    /// Iterates identifiers in attempt order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.fallbacks.iter().map(String::as_str))
    }
}

/// One generation call: the task text plus prompt and sampling knobs.
#[derive(Clone, Debug, Default)]
pub struct GenerateRequest {
    /// The caller's task or source material, sent after the instructions.
    pub task: String,
    /// Prompt rendering knobs; `prompt.mode` also selects the decode mode.
    pub prompt: PromptOptions,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(task: impl Into<String>) -> Self {
        GenerateRequest {
            task: task.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: PromptOptions) -> Self {
        self.prompt = prompt;
        self
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

/// A successful generation: decoded records plus provenance.
#[derive(Clone, Debug)]
pub struct Generation<T> {
    pub records: Vec<T>,
    pub warnings: Vec<String>,
    /// Identifier of the provider that produced the accepted response.
    pub provider: String,
    pub usage: Option<Usage>,
}

/// Coordinates prompt rendering, provider calls, and decoding as one call.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use rowcodec::{
///     GenerateRequest, Pipeline, ProviderChain, ProviderRegistry, RowCodec, SchemaNode,
///     StaticProducer, TextProducer, Value,
/// };
///
/// let schema = SchemaNode::object([
///     ("id", SchemaNode::number()),
///     ("name", SchemaNode::string()),
/// ]);
/// let codec = RowCodec::new(&schema).unwrap();
/// let registry = Arc::new(ProviderRegistry::new(|_: &str| {
///     Ok(Arc::new(StaticProducer::new("7|Ada")) as Arc<dyn TextProducer>)
/// }));
/// let pipeline = Pipeline::new(codec, registry, ProviderChain::new("echo"));
///
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let generation = rt
///     .block_on(pipeline.generate(&GenerateRequest::new("Describe Ada.")))
///     .unwrap();
/// assert_eq!(generation.provider, "echo");
/// assert_eq!(generation.records[0].get_path("id"), Some(&Value::from(7)));
/// ```
pub struct Pipeline {
    codec: RowCodec,
    registry: Arc<ProviderRegistry>,
    chain: ProviderChain,
}

impl Pipeline {
    #[must_use]
    pub fn new(codec: RowCodec, registry: Arc<ProviderRegistry>, chain: ProviderChain) -> Self {
        Pipeline {
            codec,
            registry,
            chain,
        }
    }

    /// The codec this pipeline decodes with.
    #[must_use]
    pub fn codec(&self) -> &RowCodec {
        &self.codec
    }

    /// Generates records without downstream validation.
    ///
    /// # Errors
    ///
    /// See [`generate_validated`](Pipeline::generate_validated).
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Generation<Value>> {
        self.generate_validated(request, &Unvalidated).await
    }

    /// Generates records, passing each through a validator.
    ///
    /// Providers from the chain are attempted in order. A provider failure
    /// (construction or transport) moves on to the next entry; any other
    /// failure propagates immediately. When every attempt fails, the last
    /// provider error is returned.
    ///
    /// # Errors
    ///
    /// [`ProviderError`] when the whole chain is exhausted;
    /// [`ParseError`](crate::ParseError) and
    /// [`ValidationError`](crate::ValidationError) from decoding the accepted
    /// response.
    pub async fn generate_validated<V: Validate>(
        &self,
        request: &GenerateRequest,
        validator: &V,
    ) -> Result<Generation<V::Output>> {
        let instructions = self.codec.prompt(&request.prompt);
        let mut completion_request = CompletionRequest::new(instructions, request.task.clone());
        completion_request.temperature = request.temperature;
        completion_request.max_output_tokens = request.max_output_tokens;

        let mut last_err: Option<ProviderError> = None;
        for id in self.chain.iter() {
            let client = match self.registry.get_or_create(id) {
                Ok(client) => client,
                Err(err) => {
                    tracing::warn!(provider = id, error = %err, "provider unavailable");
                    last_err = Some(err);
                    continue;
                }
            };
            match client.complete(&completion_request).await {
                Ok(completion) => {
                    tracing::debug!(provider = id, "completion received");
                    // Codec failures are structural; they propagate without
                    // touching the rest of the chain.
                    let decoded = decode_validated(
                        &completion.content,
                        &self.codec.positions,
                        &self.codec.options,
                        request.prompt.mode,
                        validator,
                    )?;
                    return Ok(Generation {
                        records: decoded.records,
                        warnings: decoded.warnings,
                        provider: id.to_string(),
                        usage: completion.usage,
                    });
                }
                Err(err) => {
                    tracing::warn!(provider = id, error = %err, "provider call failed");
                    last_err = Some(err);
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| ProviderError::new("(none)", "provider chain is empty"))
            .into())
    }
}
