//! Basic prompt rendering and row decoding.
//!
//! Run with: cargo run --example simple

use rowcodec::{schema, Mode, PromptOptions, RowCodec, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let schema = schema!({
        "name": string,
        "age": number,
        "skills": [string],
    });

    let codec = RowCodec::new(&schema)?;

    // Instructions that go into the model prompt
    let prompt = codec.prompt(&PromptOptions::new());
    println!("Prompt for the model:\n{}\n", prompt);

    // A reply in the row format
    let reply = "Ada Lovelace|36|mathematics;analysis";
    let decoded = codec.decode(reply, Mode::Single)?;

    let person = &decoded.records[0];
    println!("name:   {:?}", person.get_path("name"));
    println!("age:    {:?}", person.get_path("age"));
    println!("skills: {:?}", person.get_path("skills"));

    // Several records at once, one per line
    let replies = "Grace Hopper|52|compilers;debugging\nAlan Turing|41|logic;cryptanalysis";
    let many = codec.decode(replies, Mode::Multi)?;

    println!("\nDecoded {} records:", many.records.len());
    for record in &many.records {
        if let Some(name) = record.get_path("name").and_then(Value::as_str) {
            println!("  - {}", name);
        }
    }

    Ok(())
}
