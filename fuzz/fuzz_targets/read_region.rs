#![no_main]
use libfuzzer_sys::fuzz_target;

use pullanvil::{read_chunk, read_header, Region};
use std::io::Cursor;

fuzz_target!(|data: Vec<u8>| {
    if let Ok(header) = read_header(&data) {
        for (x, z) in header.present_chunks() {
            let _ = read_chunk(&data, &header, x, z);
        }
    }

    if let Ok(mut r) = Region::from_stream(Cursor::new(data)) {
        let _ = r.read_chunk(0, 0);
    }
});
