#![no_main]

use libfuzzer_sys::fuzz_target;
use membuf::Buffer;

// Parses arbitrary input as a stream of length-prefixed records followed by a
// NUL-terminated tag. Must never panic, whatever the input.
fuzz_target!(|data: &[u8]| {
    let buf = Buffer::fixed_reader(data);

    loop {
        let Ok(len) = buf.read_byte() else {
            break;
        };
        let before = buf.read_position();
        match buf.read_bytes(len as usize) {
            Ok(record) => assert_eq!(record.len(), len as usize),
            Err(err) => {
                assert!(err.is_boundary());
                assert_eq!(buf.read_position(), before);
                break;
            }
        }
        if buf.read_cstring().is_err() {
            assert_eq!(buf.read_position(), before + len as usize);
            break;
        }
    }

    assert!(buf.read_position() <= data.len());
});
