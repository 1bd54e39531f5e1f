//! Encodes a small startup-style message into a growable buffer and parses
//! it back.
//!
//! Run with:
//!     cargo run --example message_roundtrip

use bytes::Buf;
use membuf::{Buffer, BufferError};

/// A protocol version followed by NUL-terminated key/value pairs and a
/// final empty key.
fn encode(params: &[(&str, &str)]) -> Result<Buffer<'static>, BufferError> {
    let mut buf = Buffer::dynamic();
    buf.write(&0x0003_0000u32.to_be_bytes())?;
    for (key, value) in params {
        buf.write(key.as_bytes())?;
        buf.write_byte(0)?;
        buf.write(value.as_bytes())?;
        buf.write_byte(0)?;
    }
    buf.write_byte(0)?;
    Ok(buf)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = [("user", "postgres"), ("database", "app"), ("client_encoding", "UTF8")];
    let mut buf = encode(&params)?;

    println!(
        "Encoded {} bytes (capacity {})\n",
        buf.bytes_written(),
        buf.capacity()
    );

    buf.rewind_reader();
    let version = buf.get_u32();
    println!("protocol {}.{}", version >> 16, version & 0xFFFF);

    loop {
        let key = buf.read_cstring()?;
        if key.to_bytes().is_empty() {
            break;
        }
        let value = buf.read_cstring()?;
        println!("  {} = {}", key.to_str()?, value.to_str()?);
    }

    assert_eq!(buf.bytes_available_to_read(), 0);
    Ok(())
}
