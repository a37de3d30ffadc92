use std::convert::TryFrom;

use crate::error::Result;
use crate::stream::{Event, Parser};
use crate::{Number, Tag};

use builder::Builder;




/// An event along with its payload, to compare whole event streams at once.
#[derive(Debug, PartialEq, Clone)]
pub enum Ev {
    TagId(Tag),
    TagName(String),
    Number(Number),
    String(String),
    Size(i32),
    ListTagId(Tag),
}

/// Parse the entire input, returning every event with the depth reported
/// straight after it.
pub fn events(input: &[u8]) -> Result<Vec<(Ev, usize)>> {
    let mut parser = Parser::new(input);
    let mut out = vec![];

    while parser.has_next() {
        let ev = match parser.next()? {
            Event::TagId => Ev::TagId(parser.tag()?),
            Event::TagName => Ev::TagName(parser.string()?.to_owned()),
            Event::ValueNumber => Ev::Number(parser.number()?),
            Event::ValueString => Ev::String(parser.string()?.to_owned()),
            Event::ArraySize => Ev::Size(parser.number()?.as_i64() as i32),
            Event::ListTagId => Ev::ListTagId(parser.tag()?),
        };
        out.push((ev, parser.location().depth));
    }

    Ok(out)
}

/// Like `events`, without the depths.
pub fn event_kinds(input: &[u8]) -> Result<Vec<Ev>> {
    Ok(events(input)?.into_iter().map(|(ev, _)| ev).collect())
}

/// The uncompressed `bigtest.nbt` document that every NBT library tests
/// against, byte for byte.
pub fn bigtest() -> Builder {
    let byte_array: Vec<i8> = (0..1000)
        .map(|n: i32| ((n * n * 255 + n * 7) % 100) as i8)
        .collect();

    Builder::new()
        .start_compound("Level")
        .long("longTest", 9223372036854775807)
        .short("shortTest", 32767)
        .string("stringTest", "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!")
        .float("floatTest", 0.498_231_47)
        .int("intTest", 2147483647)
        .start_compound("nested compound test")
        .start_compound("ham")
        .string("name", "Hampus")
        .float("value", 0.75)
        .end_compound()
        .start_compound("egg")
        .string("name", "Eggbert")
        .float("value", 0.5)
        .end_compound()
        .end_compound()
        .long_list("listTest (long)", &[11, 12, 13, 14, 15])
        .start_list("listTest (compound)", Tag::Compound, 2)
        .start_anon_compound()
        .string("name", "Compound tag #0")
        .long("created-on", 1264099775885)
        .end_anon_compound()
        .start_anon_compound()
        .string("name", "Compound tag #1")
        .long("created-on", 1264099775885)
        .end_anon_compound()
        .byte("byteTest", 127)
        .byte_array(
            "byteArrayTest (the first 1000 values of (n*n*255+n*7)%100, starting with n=0 (0, 62, 34, 16, 8, ...))",
            &byte_array,
        )
        .double("doubleTest", 0.493_128_713_218_231_5)
        .end_compound()
}

pub fn hello_world() -> Vec<u8> {
    Builder::new()
        .start_compound("hello world")
        .string("name", "Bananrama")
        .end_compound()
        .build()
}

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
            assert_eq!(Tag::try_from($val as u8), Ok(Tag::$tag));
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
        LongArray = 12,
    }

    for value in 13..=u8::MAX {
        assert!(Tag::try_from(value).is_err())
    }
}

#[test]
fn tag_classification() {
    assert!(Tag::Double.is_number());
    assert!(!Tag::String.is_number());
    assert!(Tag::List.is_container());
    assert!(!Tag::End.is_container());
    assert_eq!(Tag::IntArray.array_element(), Some(Tag::Int));
    assert_eq!(Tag::List.array_element(), None);
}
