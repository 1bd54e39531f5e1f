// Integration tests for the Buffer API
// Tests cover: mode lifecycle, read/write bounds, rewinds, growth, error classes

use bytes::Buf;
use membuf::{Buffer, BufferError, GrowthConfig};

// Growth and release events are logged through `tracing`; run with
// RUST_LOG=membuf=trace to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_fixed_reader_consumes_whole_input() {
    let data = [1u8, 2, 3, 4];
    let buf = Buffer::fixed_reader(&data);

    assert_eq!(buf.bytes_available_to_read(), 4);
    assert_eq!(buf.read_bytes(4).unwrap(), &data);
    assert_eq!(buf.bytes_available_to_read(), 0);
    assert!(buf.read_byte().is_err(), "Reader must underflow at end");
}

#[test]
fn test_fixed_writer_lands_in_caller_storage() {
    let mut frame = [0u8; 8];
    {
        let mut buf = Buffer::fixed_writer(&mut frame);
        buf.write_byte(0xAA).unwrap();
        buf.write(&[1, 2, 3]).unwrap();
        buf.fill(0xEE, 2).unwrap();
        assert_eq!(buf.bytes_written(), 6);
        assert_eq!(buf.bytes_available_to_write(), 2);
    }
    assert_eq!(frame, [0xAA, 1, 2, 3, 0xEE, 0xEE, 0, 0]);
}

#[test]
fn test_dynamic_defers_allocation() {
    let buf = Buffer::dynamic();
    assert_eq!(buf.capacity(), 0);
    assert!(buf.is_empty());

    let buf = Buffer::default();
    assert_eq!(buf.capacity(), 0);
}

#[test]
fn test_fixed_release_twice_is_safe() {
    let mut storage = [0x55u8; 4];
    {
        let mut buf = Buffer::fixed_writer(&mut storage);
        buf.release();
        buf.release();
        assert_eq!(buf.capacity(), 4);
    }
    assert_eq!(storage, [0x55u8; 4], "Caller storage must not be touched");

    let data = b"const";
    let mut buf = Buffer::fixed_reader(data);
    buf.release();
    buf.release();
    assert_eq!(buf.read_bytes(5).unwrap(), b"const");
}

#[test]
fn test_dynamic_release_then_reuse() {
    init_tracing();

    let mut buf = Buffer::dynamic();
    buf.fill(1, 1000).unwrap();
    buf.release();
    assert_eq!(buf.capacity(), 0);
    assert_eq!(buf.bytes_written(), 0);
    assert_eq!(buf.read_position(), 0);

    buf.write(b"fresh").unwrap();
    assert_eq!(buf.written(), b"fresh");
}

// ============================================================================
// Round-trip Tests
// ============================================================================

#[test]
fn test_cstring_roundtrip() {
    let mut buf = Buffer::dynamic();
    buf.write(b"hello\0").unwrap();
    buf.rewind_reader();

    let s = buf.read_cstring().unwrap();
    assert_eq!(s.to_str().unwrap(), "hello");
    assert_eq!(buf.read_position(), 6);
}

#[test]
fn test_message_roundtrip() {
    // type byte, length-prefixed payload, NUL-terminated name
    let mut buf = Buffer::dynamic();
    buf.write_byte(b'Q').unwrap();
    buf.write(&(5u32).to_be_bytes()).unwrap();
    buf.write(b"query").unwrap();
    buf.write(b"main\0").unwrap();

    let bytes = buf.into_bytes();
    let reader = Buffer::fixed_reader(&bytes);

    assert_eq!(reader.read_byte().unwrap(), b'Q');
    let len = u32::from_be_bytes(reader.read_bytes(4).unwrap().try_into().unwrap());
    let payload = reader.read_bytes(len as usize).unwrap();
    let name = reader.read_cstring().unwrap();

    assert_eq!(payload, b"query");
    assert_eq!(name.to_bytes(), b"main");
    assert_eq!(reader.bytes_available_to_read(), 0);
}

#[test]
fn test_buf_trait_decoding() {
    let mut buf = Buffer::dynamic();
    buf.write(&0x0102u16.to_be_bytes()).unwrap();
    buf.write(&0x0304_0506u32.to_le_bytes()).unwrap();

    assert_eq!(buf.get_u16(), 0x0102);
    assert_eq!(buf.get_u32_le(), 0x0304_0506);
    assert_eq!(buf.remaining(), 0);
}

// ============================================================================
// Bounds and Failure Tests
// ============================================================================

#[test]
fn test_read_failure_changes_nothing() {
    let mut buf = Buffer::dynamic();
    buf.write(b"abcdef").unwrap();
    buf.read_bytes(2).unwrap();

    let before = (buf.read_position(), buf.bytes_written(), buf.capacity());
    let err = buf.read_bytes(5).unwrap_err();
    let after = (buf.read_position(), buf.bytes_written(), buf.capacity());

    assert_eq!(
        err,
        BufferError::Underflow {
            requested: 5,
            available: 4
        }
    );
    assert_eq!(before, after);
}

#[test]
fn test_fixed_writer_overflow_preserves_content() {
    let mut storage = [0u8; 6];
    let mut buf = Buffer::fixed_writer(&mut storage);
    buf.write(b"abcd").unwrap();

    let err = buf.write(b"xyz").unwrap_err();
    assert!(matches!(err, BufferError::NoRoom { .. }));
    assert!(err.is_boundary());
    assert_eq!(buf.written(), b"abcd");
    assert_eq!(buf.bytes_written(), 4);

    assert!(buf.fill(0, 3).is_err());
    assert_eq!(buf.written(), b"abcd");
}

#[test]
fn test_reader_never_writes() {
    let data = vec![0u8; 64];
    let mut buf = Buffer::fixed_reader(&data);
    let err = buf.write_byte(1).unwrap_err();
    assert_eq!(err, BufferError::ReadOnly);
    assert!(err.is_boundary());
    assert_eq!(buf.bytes_available_to_write(), 0);
}

#[test]
fn test_rewind_writer_on_reader_is_noop() {
    let data = b"abcdef";
    let mut buf = Buffer::fixed_reader(data);
    buf.read_bytes(3).unwrap();

    buf.rewind_writer();

    assert_eq!(buf.read_position(), 3);
    assert_eq!(buf.bytes_written(), 6);
    assert_eq!(buf.read_bytes(3).unwrap(), b"def");
}

#[test]
fn test_rewind_writer_reuses_fixed_storage() {
    let mut storage = [0u8; 4];
    let mut buf = Buffer::fixed_writer(&mut storage);
    buf.write(b"full").unwrap();
    assert!(buf.write_byte(0).is_err());

    buf.rewind_writer();
    buf.write(b"next").unwrap();
    assert_eq!(buf.written(), b"next");
}

#[test]
fn test_unterminated_string() {
    let buf = Buffer::fixed_reader(b"no terminator");
    let err = buf.read_cstring().unwrap_err();
    assert!(matches!(err, BufferError::Unterminated { available: 13 }));
    assert_eq!(buf.read_position(), 0);
}

// ============================================================================
// Growth Tests
// ============================================================================

#[test]
fn test_growth_is_logarithmic() {
    init_tracing();

    let mut buf = Buffer::dynamic();
    let mut reallocations = 0;
    let mut last_capacity = buf.capacity();

    for i in 0..100_000u32 {
        buf.write_byte(i as u8).unwrap();
        if buf.capacity() != last_capacity {
            reallocations += 1;
            last_capacity = buf.capacity();
        }
    }

    assert_eq!(buf.bytes_written(), 100_000);
    // 128 doubled up to 131072
    assert_eq!(reallocations, 11);
}

#[test]
fn test_growth_preserves_written_bytes() {
    let mut buf = Buffer::dynamic();
    let data: Vec<u8> = (0..1000).map(|i| (i % 251) as u8).collect();
    for chunk in data.chunks(7) {
        buf.write(chunk).unwrap();
    }
    assert_eq!(buf.written(), &data[..]);
}

#[test]
fn test_large_write_jumps_capacity() {
    let mut buf = Buffer::dynamic();
    buf.fill(0, 10_000).unwrap();
    assert!(buf.capacity() >= 10_000);
    assert_eq!(buf.capacity(), 16_384);
}

#[test]
fn test_capacity_limit_is_boundary() {
    init_tracing();

    let config = GrowthConfig::new(16, 64).unwrap();
    let mut buf = Buffer::dynamic_with_config(config);
    buf.fill(b'a', 60).unwrap();

    let err = buf.write(b"12345").unwrap_err();
    assert!(err.is_boundary());
    assert!(!err.is_fatal());
    assert_eq!(buf.bytes_written(), 60);

    buf.write(b"1234").unwrap();
    assert_eq!(buf.capacity(), 64);
}

#[test]
fn test_impossible_allocation_is_fatal() {
    init_tracing();

    let mut buf = Buffer::dynamic();
    buf.write(b"keep").unwrap();

    // fits in usize, but no allocator can satisfy it
    let err = buf.fill(0, isize::MAX as usize).unwrap_err();
    assert!(err.is_fatal(), "Exhaustion must not look like no-room");
    assert!(matches!(err, BufferError::AllocationFailed { .. }));

    assert_eq!(buf.written(), b"keep");
    buf.write(b"!").unwrap();
    assert_eq!(buf.written(), b"keep!");
}

#[test]
fn test_size_overflow_is_boundary() {
    let mut buf = Buffer::dynamic();
    buf.write(b"keep").unwrap();

    let err = buf.fill(0, usize::MAX).unwrap_err();
    assert!(matches!(err, BufferError::NoRoom { .. }));
    assert!(!err.is_fatal());

    let limited = GrowthConfig::new(16, 64).unwrap();
    let mut buf = Buffer::dynamic_with_config(limited);
    buf.write(b"keep").unwrap();
    assert!(matches!(
        buf.fill(0, usize::MAX),
        Err(BufferError::NoRoom { .. })
    ));
    assert_eq!(buf.written(), b"keep");
}

#[test]
fn test_make_room_always_fails_on_fixed_modes() {
    let mut storage = [0u8; 16];
    let mut writer = Buffer::fixed_writer(&mut storage);
    let err = writer.make_room(1).unwrap_err();
    assert!(err.is_boundary());
    assert_eq!(writer.bytes_available_to_write(), 16);

    let mut reader = Buffer::fixed_reader(b"data");
    assert_eq!(reader.make_room(1), Err(BufferError::ReadOnly));
}

// ============================================================================
// Raw Buffer Copy Tests
// ============================================================================

#[test]
fn test_write_raw_buffer_from_reader() {
    let src = Buffer::fixed_reader(b"source");
    src.read_bytes(2).unwrap();

    let mut dst = Buffer::dynamic();
    dst.write(b"[").unwrap();
    dst.write_raw_buffer(&src).unwrap();
    dst.write(b"]").unwrap();

    assert_eq!(dst.written(), b"[source]");
    assert_eq!(src.read_position(), 2);
    assert_eq!(src.bytes_written(), 6);
}

#[test]
fn test_write_raw_buffer_into_small_fixed_writer() {
    let mut src = Buffer::dynamic();
    src.write(b"too long").unwrap();

    let mut storage = [0u8; 4];
    let mut dst = Buffer::fixed_writer(&mut storage);
    dst.write(b"ab").unwrap();

    assert!(dst.write_raw_buffer(&src).is_err());
    assert_eq!(dst.written(), b"ab");
}
