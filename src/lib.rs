//! # rowcodec
//!
//! A positional row codec for structured output from Large Language Models (LLMs).
//!
//! ## What is the row format?
//!
//! Instead of asking a model for JSON, `rowcodec` flattens a schema into a fixed
//! column order and asks for delimited rows. One record per line, fields separated
//! by a delimiter, array items separated by a sub-delimiter. The field names are
//! spelled once in the instructions rather than repeated in every record, which
//! cuts output tokens sharply for repetitive structured data.
//!
//! ```text
//! 0: name   1: age   2: role        3: tags
//! Ada Lovelace|36|admin|math;logic
//! Grace Hopper|45|user|compilers
//! ```
//!
//! ## Key Features
//!
//! - **Token-Efficient**: field names appear once in the prompt, never in the data
//! - **Schema-Driven**: one analysis pass assigns every field a stable column index
//! - **Forgiving Decoder**: malformed cells become sentinel values instead of
//!   aborting the row, so one bad field never loses a whole batch
//! - **Strict When Asked**: an optional validation pass reports every issue with
//!   its field path, keeping lenient decoding and strictness separate
//! - **Provider Orchestration**: an async pipeline renders instructions, calls a
//!   provider chain with fallback, and decodes the reply in one call
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rowcodec = "0.1"
//! ```
//!
//! Describe the schema, render instructions, decode the reply:
//!
//! ```rust
//! use rowcodec::{schema, Mode, PromptOptions, RowCodec, Value};
//!
//! let schema = schema!({
//!     "name": string,
//!     "age": number,
//!     "tags": [string],
//! });
//! let codec = RowCodec::new(&schema).unwrap();
//!
//! // Instructions for the model, listing every column in order.
//! let instructions = codec.prompt(&PromptOptions::new());
//! assert!(instructions.contains("1: age - number"));
//!
//! // Decode the model's reply.
//! let decoded = codec.decode("Ada|36|math;logic", Mode::Single).unwrap();
//! let record = &decoded.records[0];
//! assert_eq!(record.get_path("name"), Some(&Value::from("Ada")));
//! assert_eq!(record.get_path("age"), Some(&Value::from(36)));
//! ```
//!
//! ### Many Records
//!
//! [`Mode::Multi`] decodes one record per line:
//!
//! ```rust
//! use rowcodec::{schema, Mode, RowCodec};
//!
//! let schema = schema!({
//!     "id": number,
//!     "name": string,
//! });
//! let codec = RowCodec::new(&schema).unwrap();
//!
//! let reply = "1|Widget\n2|Gadget\n3|Sprocket";
//! let decoded = codec.decode(reply, Mode::Multi).unwrap();
//! assert_eq!(decoded.records.len(), 3);
//! assert!(decoded.warnings.is_empty());
//! ```
//!
//! ### Validation
//!
//! Decoding is deliberately lenient; strictness is a second, separate pass:
//!
//! ```rust
//! use rowcodec::{schema, Error, Mode, RowCodec};
//!
//! let schema = schema!({
//!     "priority": enum["low", "high"],
//! });
//! let codec = RowCodec::new(&schema).unwrap();
//!
//! let err = codec
//!     .decode_validated("urgent", Mode::Single, &codec.validator())
//!     .unwrap_err();
//! assert!(matches!(err, Error::Validation(_)));
//! ```
//!
//! ### Calling Providers
//!
//! [`Pipeline`] ties the codec to a chain of [`TextProducer`] implementations
//! with sequential fallback; see its documentation for an end-to-end example.
//!
//! ## Performance Characteristics
//!
//! - **Analysis**: O(n) in schema size, done once per [`RowCodec`]
//! - **Decoding**: O(n) single pass over the response text
//! - **Prompt Rendering**: O(n) in the number of columns
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All array indexing is bounds-checked
//! - Proper error propagation with `Result` types
//! - No panics in the public API
//!
//! ## Examples
//!
//! See the `demos/` directory for focused, runnable examples:
//!
//! - **`simple.rs`** - schema to prompt to decoded records
//! - **`custom_options.rs`** - custom delimiters and validation
//! - **`providers.rs`** - the async pipeline with provider fallback
//!
//! Run any example with: `cargo run --example <name>`

pub mod analyze;
pub mod coerce;
pub mod decode;
pub mod error;
pub mod escape;
pub mod macros;
pub mod map;
pub mod options;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod validate;
pub mod value;

pub use analyze::{analyze, FieldKind, PositionEntry, PositionList};
pub use coerce::coerce;
pub use decode::{decode, decode_validated, Decoded};
pub use error::{
    ConfigError, Error, Issue, ParseError, ProviderError, Result, SchemaError, ValidationError,
};
pub use map::Map;
pub use options::{Mode, Options};
pub use pipeline::{GenerateRequest, Generation, Pipeline, ProviderChain, RowCodec};
pub use prompt::{render, PromptOptions};
pub use provider::{
    Completion, CompletionFuture, CompletionRequest, ProviderRegistry, StaticProducer,
    TextProducer, Usage,
};
pub use schema::SchemaNode;
pub use validate::{SchemaValidator, Unvalidated, Validate};
pub use value::{CastError, Number, Value};
