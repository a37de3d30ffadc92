//! Allows streaming of NBT data without prior knowledge of the structure.
//!
//! [`Parser`] is a pull parser: every call to [`Parser::next`] performs exactly
//! one primitive read from the input and reports what kind of thing was read
//! as an [`Event`]. The payload of the most recent event is available from
//! [`Parser::number`], [`Parser::string`] or [`Parser::tag`].

use std::io::Read;

use crate::{
    action::{Machine, Token},
    error::{Error, Result},
    Number, Tag,
};

/// The kind of primitive the parser just read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// A tag byte. [`Parser::tag`] returns it. An `End` tag closes the
    /// current compound.
    TagId,
    /// The name of a value inside a compound, or of the root. List and array
    /// elements are never named. [`Parser::string`] returns it.
    TagName,
    /// A numeric payload. [`Parser::number`] returns it, its width decided by
    /// the preceding `TagId` or `ListTagId`.
    ValueNumber,
    /// A string payload. [`Parser::string`] returns it.
    ValueString,
    /// The element count of a list or array. [`Parser::number`] returns it
    /// as a `Number::Int`.
    ArraySize,
    /// The tag of the elements of a list. [`Parser::tag`] returns it.
    ListTagId,
}

/// Where the parser currently is in the tree.
///
/// A compound, list or array counts towards the depth from the `TagId` that
/// opens it until the event that closes it. The name of a container inside a
/// compound is therefore reported at the inner depth: for `{ "a": {} }` the
/// six events are at depths 1, 1, 2, 2, 1, 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Number of compounds, lists and arrays the parser is inside.
    pub depth: usize,
}

/// Options for parsing NBT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOpts {
    pub(crate) max_depth: usize,
    pub(crate) max_seq_len: usize,
}

impl ParserOpts {
    /// Create options with the defaults: a max depth of 512, like Minecraft
    /// itself, and no practical limit on list and array sizes.
    pub fn new() -> Self {
        Default::default()
    }

    /// Maximum number of nested compounds, lists and arrays. Deeper input is
    /// rejected with a format error.
    ///
    /// The parser itself never recurses, so any value is safe for streaming.
    /// [`DocumentReader`](crate::DocumentReader) builds its tree recursively
    /// and refuses input nested deeper than
    /// [`MAX_NESTING`](crate::MAX_NESTING) whatever this is set to.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Maximum size of lists and arrays. Larger sizes are rejected with a
    /// format error before anything is allocated for them.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }
}

impl Default for ParserOpts {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_seq_len: i32::MAX as usize,
        }
    }
}

/// Parser can take any reader and parse it as NBT data. Does not do
/// decompression.
///
/// # Examples
///
/// ## Dump NBT
/// The following takes a stream of GZip compressed data from stdin and dumps
/// every event, indented by the depth the parser reports.
///
/// ```no_run
/// use pullnbt::stream::{Event, Parser};
/// use flate2::read::GzDecoder;
///
/// let stdin = std::io::stdin();
/// let mut parser = Parser::new(GzDecoder::new(stdin));
///
/// while parser.has_next() {
///     let event = match parser.next() {
///         Ok(event) => event,
///         Err(e) => {
///             println!("{}", e);
///             break;
///         }
///     };
///     let indent = parser.location().depth * 4;
///     match event {
///         Event::TagId | Event::ListTagId => {
///             println!("{:indent$}{:?} {:?}", "", event, parser.tag().unwrap(), indent = indent)
///         }
///         Event::TagName | Event::ValueString => {
///             println!("{:indent$}{:?} {}", "", event, parser.string().unwrap(), indent = indent)
///         }
///         Event::ValueNumber | Event::ArraySize => {
///             println!("{:indent$}{:?} {}", "", event, parser.number().unwrap(), indent = indent)
///         }
///     }
/// }
/// ```
pub struct Parser<R: Read> {
    reader: R,
    machine: Machine,
    current: Option<Token>,
}

impl<R: Read> Parser<R> {
    /// Create new parser for the given reader.
    pub fn new(reader: R) -> Self {
        Self::with_opts(reader, ParserOpts::default())
    }

    /// Create a new parser for the given reader, with the given limits.
    pub fn with_opts(reader: R, opts: ParserOpts) -> Self {
        Self {
            reader,
            machine: Machine::new(opts),
            current: None,
        }
    }

    /// Whether at least one more primitive read remains. False once the root
    /// value is complete, or after an error.
    pub fn has_next(&self) -> bool {
        !self.machine.is_done()
    }

    /// Read the next primitive from the input.
    ///
    /// Calling this when [`has_next`][Self::has_next] is false is a usage
    /// error. Format and IO errors end the parse.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Event> {
        self.current = None;
        let token = self.machine.step(&mut self.reader)?;
        let event = match token {
            Token::TagId(_) => Event::TagId,
            Token::TagName(_) => Event::TagName,
            Token::Number(_) => Event::ValueNumber,
            Token::String(_) => Event::ValueString,
            Token::ArraySize(_) => Event::ArraySize,
            Token::ListTagId(_) => Event::ListTagId,
        };
        self.current = Some(token);
        Ok(event)
    }

    /// The number read by the last `ValueNumber` or `ArraySize` event.
    pub fn number(&self) -> Result<Number> {
        match self.current {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::ArraySize(size)) => Ok(Number::Int(size)),
            ref other => Err(Self::wrong_accessor("number", other)),
        }
    }

    /// The string read by the last `TagName` or `ValueString` event.
    pub fn string(&self) -> Result<&str> {
        match &self.current {
            Some(Token::TagName(s)) | Some(Token::String(s)) => Ok(s),
            other => Err(Self::wrong_accessor("string", other)),
        }
    }

    /// The tag read by the last `TagId` or `ListTagId` event.
    pub fn tag(&self) -> Result<Tag> {
        match self.current {
            Some(Token::TagId(tag)) | Some(Token::ListTagId(tag)) => Ok(tag),
            ref other => Err(Self::wrong_accessor("tag", other)),
        }
    }

    /// The current position in the tree, as of the last `next`.
    pub fn location(&self) -> Location {
        Location {
            depth: self.machine.depth(),
        }
    }

    /// Gets a reference to the underlying value in this parser.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gets a mutable reference to the underlying value in this parser.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes this parser, returning the underlying value.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn wrong_accessor(accessor: &str, current: &Option<Token>) -> Error {
        match current {
            Some(token) => Error::usage(format!(
                "no {} for the current event: {:?}",
                accessor, token
            )),
            None => Error::usage(format!("no {} available: no current event", accessor)),
        }
    }
}

/// Parse the input until the innermost compound, list or array we are
/// currently inside is complete. Handles inner compounds and lists by skipping
/// those as well.
///
/// Right after the `TagName` of a compound or list entry the parser is already
/// inside that entry, so this skips just the entry.
pub fn skip_compound<R: Read>(parser: &mut Parser<R>) -> Result<()> {
    let depth = parser.location().depth;
    if depth == 0 {
        return Err(Error::usage("not inside a compound"));
    }

    while parser.location().depth >= depth {
        parser.next()?;
    }
    Ok(())
}
