//! Customizing the wire format with Options.
//!
//! Run with: cargo run --example custom_options

use rowcodec::{schema, Mode, Options, RowCodec};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let schema = schema!({
        "id": number,
        "title": string,
        "labels": [string],
    });

    // Default format: | between fields, ; between array items
    println!("Default (pipe):");
    let codec = RowCodec::new(&schema)?;
    let decoded = codec.decode("1|Fix login bug|auth;urgent", Mode::Single)?;
    println!("  labels = {:?}\n", decoded.records[0].get_path("labels"));

    // Tab-separated fields (useful when content is full of pipes)
    println!("Tab delimiter:");
    let tabbed = Options::new().with_delimiter("\t").with_sub_delimiter(",");
    let codec = RowCodec::with_options(&schema, tabbed)?;
    let decoded = codec.decode("2\tShip release\tbuild,deploy", Mode::Single)?;
    println!("  labels = {:?}\n", decoded.records[0].get_path("labels"));

    // Multi-character delimiters work too
    println!("Multi-character delimiter:");
    let wide = Options::new().with_delimiter("<|>").with_sub_delimiter("::");
    let codec = RowCodec::with_options(&schema, wide)?;
    let decoded = codec.decode("3<|>Write docs<|>api::guide", Mode::Single)?;
    println!("  labels = {:?}\n", decoded.records[0].get_path("labels"));

    // Delimiters inside content are escaped with the escape character
    println!("Escaped delimiter in content:");
    let codec = RowCodec::new(&schema)?;
    let decoded = codec.decode("4|Support A\\|B testing|experiments", Mode::Single)?;
    println!("  title = {:?}\n", decoded.records[0].get_path("title"));

    // Degenerate alphabets are rejected up front, before any prompt is built
    println!("Conflicting options:");
    let clash = Options::new().with_delimiter(";").with_sub_delimiter(";");
    match RowCodec::with_options(&schema, clash) {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(err) => println!("  rejected: {}", err),
    }

    Ok(())
}
