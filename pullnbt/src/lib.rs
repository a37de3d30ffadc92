//! pullnbt is a pull-style decoder for NBT data from *Minecraft: Java
//! Edition*. This format is used by the game to store various things, such as
//! the world data and player inventories.
//!
//! * For the token-by-token event parser see [`stream`].
//! * For a complete in-memory tree see [`Document`] and [`Value`].
//! * For building parsers from configuration see [`ReaderFactory`].
//!
//! The parser never recurses on the call stack. The grammar is walked by an
//! explicit stack of pending productions, so the nesting depth can be asked
//! for at any point and parsing can stop after any event and carry on later.
//!
//! # Quick example
//!
//! Reading the root compound of a gzip compressed `level.dat`:
//!
//! ```no_run
//! use flate2::read::GzDecoder;
//! use pullnbt::{from_reader, Value};
//!
//! let file = std::fs::File::open("level.dat").unwrap();
//! let doc = from_reader(GzDecoder::new(file)).unwrap();
//!
//! if let Some(Value::Compound(data)) = doc.root.get("Data") {
//!     println!("{:?}", data.get("LevelName"));
//! }
//! ```
//!
//! # Event example
//!
//! ```
//! use pullnbt::stream::{Event, Parser};
//! use pullnbt::Tag;
//!
//! // compound "" { byte "b": 7 }
//! let data = [10, 0, 0, 1, 0, 1, b'b', 7, 0];
//! let mut parser = Parser::new(&data[..]);
//!
//! assert_eq!(parser.next().unwrap(), Event::TagId);
//! assert_eq!(parser.tag().unwrap(), Tag::Compound);
//! while parser.has_next() {
//!     parser.next().unwrap();
//! }
//! assert_eq!(parser.location().depth, 0);
//! ```

use serde::Serialize;

pub mod error;
pub mod stream;

mod action;
mod document;
mod factory;
mod input;
mod value;

pub use document::*;
pub use factory::*;
pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl Tag {
    /// True for the fixed-width numeric tags.
    pub fn is_number(self) -> bool {
        matches!(
            self,
            Tag::Byte | Tag::Short | Tag::Int | Tag::Long | Tag::Float | Tag::Double
        )
    }

    /// True for the tags whose payload holds other values.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Tag::Compound | Tag::List | Tag::ByteArray | Tag::IntArray | Tag::LongArray
        )
    }

    /// The element tag of a typed array, if this is one.
    pub fn array_element(self) -> Option<Tag> {
        match self {
            Tag::ByteArray => Some(Tag::Byte),
            Tag::IntArray => Some(Tag::Int),
            Tag::LongArray => Some(Tag::Long),
            _ => None,
        }
    }
}

// The tags will very rarely change, so they are written out by hand rather
// than pulling in a derive crate for it.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
            Tag::LongArray => 12,
        }
    }
}
