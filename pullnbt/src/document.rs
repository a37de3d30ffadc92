//! Builds a complete [`Value`] tree from the events of a [`Parser`].

use std::io::Read;

use log::debug;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    stream::{Event, Parser, ParserOpts},
    Compound, List, Number, Tag, Value,
};

/// Upper bound on elements reserved ahead of reading them. Sizes come from the
/// input, so a larger size has to be backed by actual data first.
const MAX_PREALLOC: usize = 4096;

/// Deepest nesting a document is built for. Building recurses once per level,
/// so this holds however large `ParserOpts::max_depth` is.
pub const MAX_NESTING: usize = 1024;

/// A complete NBT document: the root compound and its name. The root name is
/// usually the empty string.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub root: Compound,
}

/// Read a whole document from NBT data held in memory.
///
/// ```
/// // compound "hello world" { string "name": "Bananrama" }
/// let mut data = vec![10, 0, 11];
/// data.extend_from_slice(b"hello world");
/// data.extend_from_slice(&[8, 0, 4]);
/// data.extend_from_slice(b"name");
/// data.extend_from_slice(&[0, 9]);
/// data.extend_from_slice(b"Bananrama");
/// data.push(0);
///
/// let doc = pullnbt::from_bytes(&data).unwrap();
/// assert_eq!(doc.name, "hello world");
/// assert_eq!(doc.root["name"].as_str(), Some("Bananrama"));
/// ```
pub fn from_bytes(input: &[u8]) -> Result<Document> {
    from_reader(input)
}

/// Read a whole document from a reader. Does not do decompression.
pub fn from_reader<R: Read>(reader: R) -> Result<Document> {
    from_reader_with_opts(reader, ParserOpts::default())
}

/// Read a whole document from a reader, with the given parser limits.
pub fn from_reader_with_opts<R: Read>(reader: R, opts: ParserOpts) -> Result<Document> {
    DocumentReader::new(Parser::with_opts(reader, opts)).read()
}

/// Drives a [`Parser`] to build a [`Document`].
///
/// Nesting is tracked with the depth the parser reports rather than a stack
/// of our own: a compound keeps reading entries while the parser is at least
/// as deep as when the compound started.
pub struct DocumentReader<R: Read> {
    parser: Parser<R>,
}

impl<R: Read> DocumentReader<R> {
    pub fn new(parser: Parser<R>) -> Self {
        Self { parser }
    }

    /// Read the document. The root must be a named compound.
    pub fn read(&mut self) -> Result<Document> {
        self.expect(Event::TagId)?;
        if self.parser.tag()? != Tag::Compound {
            return Err(Error::no_root_compound());
        }

        self.expect(Event::TagName)?;
        let name = self.parser.string()?.to_owned();

        let root = self.read_compound(&name)?;
        Ok(Document { name, root })
    }

    /// Consumes this reader, returning the parser.
    pub fn into_inner(self) -> Parser<R> {
        self.parser
    }

    fn read_compound(&mut self, name: &str) -> Result<Compound> {
        debug!("reading compound <{}> entries", name);
        self.check_nesting()?;

        let depth = self.parser.location().depth;
        let mut compound = Compound::new();

        while self.parser.location().depth >= depth {
            self.expect(Event::TagId)?;
            let tag = self.parser.tag()?;
            if tag == Tag::End {
                return Ok(compound);
            }

            self.expect(Event::TagName)?;
            let entry = self.parser.string()?.to_owned();
            let value = self.read_payload(tag, &entry)?;

            if compound.insert(entry, value).is_some() {
                debug!("duplicate entry in compound <{}> replaced", name);
            }
        }

        Err(Error::format(format!("compound <{}> was not closed", name)))
    }

    fn read_payload(&mut self, tag: Tag, name: &str) -> Result<Value> {
        Ok(match tag {
            Tag::Byte | Tag::Short | Tag::Int | Tag::Long | Tag::Float | Tag::Double => {
                Value::Number(self.read_number(tag)?)
            }
            Tag::String => {
                self.expect(Event::ValueString)?;
                Value::String(self.parser.string()?.to_owned())
            }
            Tag::Compound => Value::Compound(self.read_compound(name)?),
            Tag::List => Value::List(self.read_list(name)?),
            Tag::ByteArray => {
                let size = self.read_size()?;
                debug!("reading {} elements for byte array <{}>", size, name);
                let mut array = Vec::with_capacity(size.min(MAX_PREALLOC));
                for _ in 0..size {
                    array.push(self.read_element(Tag::Byte, |n| n.as_byte())?);
                }
                Value::ByteArray(array)
            }
            Tag::IntArray => {
                let size = self.read_size()?;
                debug!("reading {} elements for int array <{}>", size, name);
                let mut array = Vec::with_capacity(size.min(MAX_PREALLOC));
                for _ in 0..size {
                    array.push(self.read_element(Tag::Int, |n| n.as_int())?);
                }
                Value::IntArray(array)
            }
            Tag::LongArray => {
                let size = self.read_size()?;
                debug!("reading {} elements for long array <{}>", size, name);
                let mut array = Vec::with_capacity(size.min(MAX_PREALLOC));
                for _ in 0..size {
                    array.push(self.read_element(Tag::Long, |n| n.as_long())?);
                }
                Value::LongArray(array)
            }
            Tag::End => return Err(Error::format("unexpected End tag for a value")),
        })
    }

    fn read_list(&mut self, name: &str) -> Result<List> {
        self.check_nesting()?;
        self.expect(Event::ListTagId)?;
        let element = self.parser.tag()?;
        let size = self.read_size()?;

        debug!("reading {} {:?} elements for list <{}>", size, element, name);

        // Elements are unnamed and have no tag of their own, every one is
        // read as the tag declared by the list.
        let mut list = List::new(element);
        list.values.reserve(size.min(MAX_PREALLOC));
        for _ in 0..size {
            list.values.push(self.read_payload(element, name)?);
        }
        Ok(list)
    }

    fn read_number(&mut self, tag: Tag) -> Result<Number> {
        self.expect(Event::ValueNumber)?;
        let n = self.parser.number()?;
        if n.tag() != tag {
            return Err(Error::unexpected_event(&format!("{:?}", tag), n));
        }
        Ok(n)
    }

    fn read_element<T>(&mut self, tag: Tag, f: impl Fn(Number) -> Option<T>) -> Result<T> {
        let n = self.read_number(tag)?;
        f(n).ok_or_else(|| Error::unexpected_event(&format!("{:?}", tag), n))
    }

    fn read_size(&mut self) -> Result<usize> {
        self.expect(Event::ArraySize)?;
        let size = self.parser.number()?.as_i64();
        usize::try_from(size).map_err(|_| Error::format(format!("negative size: {}", size)))
    }

    fn check_nesting(&self) -> Result<()> {
        let depth = self.parser.location().depth;
        if depth > MAX_NESTING {
            return Err(Error::format(format!(
                "nbt nested {} deep, too deep to build a document",
                depth
            )));
        }
        Ok(())
    }

    fn expect(&mut self, expected: Event) -> Result<()> {
        if !self.parser.has_next() {
            return Err(Error::format(format!(
                "expected {:?}, but the nbt has ended",
                expected
            )));
        }

        let event = self.parser.next()?;
        if event != expected {
            return Err(Error::unexpected_event(&format!("{:?}", expected), event));
        }
        Ok(())
    }
}
