#![no_main]

use libfuzzer_sys::fuzz_target;
use membuf::{Buffer, GrowthConfig};

// Interprets the input as a program of buffer operations and checks the
// cursor invariant plus a shadow copy of the written bytes after each step.
fn run(buf: &mut Buffer<'_>, program: &[u8]) {
    let mut shadow: Vec<u8> = buf.written().to_vec();
    let mut read_pos = buf.read_position();

    let mut ops = program.chunks_exact(3);
    for op in &mut ops {
        let (code, arg, len) = (op[0], op[1], op[2] as usize);
        match code % 8 {
            0 => {
                if buf.write_byte(arg).is_ok() {
                    shadow.push(arg);
                }
            }
            1 => {
                let data = vec![arg; len];
                if buf.write(&data).is_ok() {
                    shadow.extend_from_slice(&data);
                }
            }
            2 => {
                if buf.fill(arg, len).is_ok() {
                    shadow.extend(std::iter::repeat_n(arg, len));
                }
            }
            3 => {
                if let Ok(b) = buf.read_byte() {
                    assert_eq!(b, shadow[read_pos]);
                    read_pos += 1;
                }
            }
            4 => {
                if let Ok(bytes) = buf.read_bytes(len) {
                    assert_eq!(bytes, &shadow[read_pos..read_pos + len]);
                    read_pos += len;
                }
            }
            5 => {
                if let Ok(s) = buf.read_cstring() {
                    let n = s.to_bytes().len();
                    assert_eq!(s.to_bytes(), &shadow[read_pos..read_pos + n]);
                    read_pos += n + 1;
                }
            }
            6 => {
                buf.rewind_reader();
                read_pos = 0;
            }
            _ => {
                if !buf.is_reader() {
                    shadow.clear();
                    read_pos = 0;
                }
                buf.rewind_writer();
            }
        }

        assert_eq!(buf.read_position(), read_pos);
        assert_eq!(buf.written(), &shadow[..]);
        assert!(buf.read_position() <= buf.bytes_written());
        assert!(buf.bytes_written() <= buf.capacity());
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&mode, program)) = data.split_first() else {
        return;
    };

    match mode % 3 {
        0 => {
            let mut buf = Buffer::fixed_reader(program);
            run(&mut buf, program);
        }
        1 => {
            let mut storage = vec![0u8; (mode as usize) * 4];
            let mut buf = Buffer::fixed_writer(&mut storage);
            run(&mut buf, program);
        }
        _ => {
            let config = GrowthConfig::new(8, 4096).unwrap();
            let mut buf = Buffer::dynamic_with_config(config);
            run(&mut buf, program);
            buf.release();
            assert_eq!(buf.capacity(), 0);
        }
    }
});
