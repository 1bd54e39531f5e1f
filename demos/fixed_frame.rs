//! Fills a fixed-size frame from a stack array, flushing whenever a record
//! no longer fits.
//!
//! Run with:
//!     cargo run --example fixed_frame

use membuf::{Buffer, BufferError};

const FRAME_SIZE: usize = 32;

fn main() -> Result<(), BufferError> {
    let records: Vec<String> = (0..10).map(|i| format!("record-{}", i)).collect();

    let mut frame = [0u8; FRAME_SIZE];
    let mut buf = Buffer::fixed_writer(&mut frame);
    let mut frames = 0;

    for record in &records {
        match buf.write(record.as_bytes()) {
            Ok(()) => {}
            Err(err) if err.is_boundary() => {
                // frame full: flush and retry into the emptied frame
                frames += 1;
                println!("frame {}: {:?}", frames, String::from_utf8_lossy(buf.written()));
                buf.rewind_writer();
                buf.write(record.as_bytes())?;
            }
            Err(err) => return Err(err),
        }
    }

    if !buf.is_empty() {
        frames += 1;
        println!("frame {}: {:?}", frames, String::from_utf8_lossy(buf.written()));
    }

    println!("\n{} records in {} frames of {} bytes", records.len(), frames, FRAME_SIZE);
    Ok(())
}
