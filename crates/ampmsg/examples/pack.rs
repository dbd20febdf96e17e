//! Builds a message one argument at a time and prints each encoding.
//!
//! Decoder fallbacks (foreign tags, trailing bytes) are logged to stderr.
//!
//! Run with: `cargo run -p ampmsg --example pack`

use ampmsg::{Message, Result};
use bytes::Bytes;
use serde_json::json;
use tracing::level_filters::LevelFilter;

fn show(msg: &Message) -> Result<()> {
    let wire = msg.to_bytes()?;
    println!("{msg}");
    println!("  {}", hex::encode(&wire));
    Ok(())
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    let mut msg = Message::new();
    show(&msg)?;

    msg.push_back("foo");
    msg.push_back("bar");
    msg.push_back("baz");
    show(&msg)?;

    msg.push_back(json!({ "foo": "bar" }));
    show(&msg)?;

    msg.push_back(Bytes::from_static(b"image data"));
    show(&msg)?;

    let decoded = Message::decode(&msg.to_bytes()?)?;
    for (index, arg) in decoded.iter().enumerate() {
        println!("[{index}] {}: {:?}", arg.kind(), arg);
    }

    // A frame tagged `x:` is not one of ours; it comes back as a blob.
    let foreign = Message::decode(b"\x11\x00\x00\x00\x05x:\x01\x02\x03")?;
    println!("{foreign} {:?}", foreign[0]);

    Ok(())
}
