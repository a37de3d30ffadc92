#![no_main]
use libfuzzer_sys::fuzz_target;

use pullnbt::stream::{Event, ParserOpts};
use pullnbt::{from_reader_with_opts, ReaderFactory};

fuzz_target!(|data: &[u8]| {
    let opts = ParserOpts::new().max_seq_len(100);

    let mut parser = ReaderFactory::new(opts).create_parser(data);
    while parser.has_next() {
        match parser.next() {
            Ok(Event::TagId | Event::ListTagId) => assert!(parser.tag().is_ok()),
            Ok(Event::TagName | Event::ValueString) => assert!(parser.string().is_ok()),
            Ok(Event::ValueNumber | Event::ArraySize) => assert!(parser.number().is_ok()),
            Err(e) => assert!(!e.is_usage()),
        }
    }

    let _doc = from_reader_with_opts(data, opts);
});
