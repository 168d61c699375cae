//! Driving a provider chain with automatic fallback.
//!
//! Run with: cargo run --example providers

use rowcodec::{
    schema, CompletionFuture, CompletionRequest, GenerateRequest, Mode, Pipeline, PromptOptions,
    ProviderChain, ProviderError, ProviderRegistry, RowCodec, StaticProducer, TextProducer, Usage,
    Value,
};
use std::error::Error;
use std::sync::Arc;

/// A producer that is always down, standing in for a flaky upstream API.
struct FlakyProducer;

impl TextProducer for FlakyProducer {
    fn complete<'a>(&'a self, _request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(async { Err(ProviderError::new("flaky", "simulated outage")) })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let schema = schema!({
        "tool": string,
        "purpose": string,
    });

    let codec = RowCodec::new(&schema)?;

    // In a real application the factory would build HTTP clients from config.
    // Here "flaky" always fails and "stable" replays a canned completion.
    let flaky: Arc<dyn TextProducer> = Arc::new(FlakyProducer);
    let stable: Arc<dyn TextProducer> = Arc::new(
        StaticProducer::new(
            "cargo|build system and package manager\n\
             rustfmt|code formatter\n\
             clippy|lint collection",
        )
        .with_usage(Usage {
            input_units: 120,
            output_units: 38,
            total_units: 158,
        }),
    );

    let registry = Arc::new(ProviderRegistry::new(move |id| match id {
        "flaky" => Ok(flaky.clone()),
        "stable" => Ok(stable.clone()),
        other => Err(ProviderError::new(other, "unknown provider")),
    }));

    let chain = ProviderChain::new("flaky").with_fallback("stable");
    let pipeline = Pipeline::new(codec, registry, chain);

    let request = GenerateRequest::new("List three essential Rust developer tools.")
        .with_prompt(PromptOptions::new().with_mode(Mode::Multi).with_max_rows(3))
        .with_temperature(0.2);

    let generation = pipeline.generate(&request).await?;

    println!("Answered by: {}", generation.provider);
    if let Some(usage) = generation.usage {
        println!("Units used:  {}", usage.total_units);
    }

    println!("\nTools:");
    for record in &generation.records {
        let tool = record.get_path("tool").and_then(Value::as_str);
        let purpose = record.get_path("purpose").and_then(Value::as_str);
        if let (Some(tool), Some(purpose)) = (tool, purpose) {
            println!("  {:<8} {}", tool, purpose);
        }
    }

    Ok(())
}
