//! The action machine behind [`Parser`][crate::stream::Parser].
//!
//! Each production of the NBT grammar is an [`Action`] sitting on an explicit
//! stack, innermost last. A step runs whatever is on top, performs exactly one
//! primitive read, and either finishes that action or leaves it armed for the
//! next read. Containers never read their children themselves: they push the
//! productions for the next child on top of themselves and get control back
//! once those are popped. At any instant the stack is the list of productions
//! still owed, so depth can be read off it and parsing can stop after any
//! step.

use std::io::Read;

use log::trace;

use crate::{
    error::{Error, Result},
    input::NbtRead,
    stream::ParserOpts,
    Number, Tag,
};

/// The result of one primitive read.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    TagId(Tag),
    TagName(String),
    Number(Number),
    String(String),
    ArraySize(i32),
    ListTagId(Tag),
}

/// Progress through a list or typed array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Seq {
    /// The tag of the elements is next. Lists only.
    ElementTag,
    /// The element tag is known, the size is next.
    Size(Tag),
    /// Repeats the element production until nothing remains.
    Elements { element: Tag, remaining: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Action {
    /// The tag of the root value.
    RootTag,
    /// The name of a value in a compound.
    Name,
    Number(Tag),
    String,
    /// Reads the tag of the next entry, or the End closing the compound.
    Compound,
    List(Seq),
    /// Byte, int and long arrays. These start at `Seq::Size`.
    Array(Seq),
}

impl Action {
    fn is_container(&self) -> bool {
        matches!(self, Action::Compound | Action::List(_) | Action::Array(_))
    }

    /// The production decoding one payload of the given tag.
    fn content(tag: Tag) -> Result<Action> {
        Ok(match tag {
            Tag::Byte | Tag::Short | Tag::Int | Tag::Long | Tag::Float | Tag::Double => {
                Action::Number(tag)
            }
            Tag::String => Action::String,
            Tag::Compound => Action::Compound,
            Tag::List => Action::List(Seq::ElementTag),
            Tag::ByteArray => Action::Array(Seq::Size(Tag::Byte)),
            Tag::IntArray => Action::Array(Seq::Size(Tag::Int)),
            Tag::LongArray => Action::Array(Seq::Size(Tag::Long)),
            Tag::End => return Err(Error::format("unsupported tag in container: End")),
        })
    }

    /// Same kind of sequence action, in a new state.
    fn with_seq(self, seq: Seq) -> Action {
        match self {
            Action::Array(_) => Action::Array(seq),
            _ => Action::List(seq),
        }
    }
}

pub(crate) struct Machine {
    stack: Vec<Action>,
    /// Containers on the stack, kept up to date by `push` and `pop`.
    depth: usize,
    opts: ParserOpts,
}

impl Machine {
    pub(crate) fn new(opts: ParserOpts) -> Self {
        Self {
            stack: vec![Action::RootTag],
            depth: 0,
            opts,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of open compounds, lists and arrays.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Perform one primitive read. Any error leaves the machine with nothing
    /// left to do.
    pub(crate) fn step<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<Token> {
        if self.is_done() {
            return Err(Error::usage("no nbt left to parse"));
        }

        match self.step_inner(reader) {
            Ok(token) => {
                self.unwind();
                Ok(token)
            }
            Err(e) => {
                self.stack.clear();
                self.depth = 0;
                Err(e)
            }
        }
    }

    fn step_inner<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<Token> {
        loop {
            let action = match self.stack.last() {
                Some(action) => *action,
                None => return Err(Error::usage("no nbt left to parse")),
            };
            trace!("executing {:?} at depth {}", action, self.depth());

            match action {
                Action::RootTag => {
                    let tag = reader.read_tag()?;
                    self.pop();
                    if tag != Tag::End {
                        self.push(Action::content(tag)?)?;
                        self.stack.push(Action::Name);
                    }
                    return Ok(Token::TagId(tag));
                }
                Action::Name => {
                    let name = reader.read_size_prefixed_string()?;
                    self.pop();
                    return Ok(Token::TagName(name));
                }
                Action::String => {
                    let s = reader.read_size_prefixed_string()?;
                    self.pop();
                    return Ok(Token::String(s));
                }
                Action::Number(tag) => {
                    let n = reader.read_number(tag)?;
                    self.pop();
                    return Ok(Token::Number(n));
                }
                Action::Compound => {
                    let tag = reader.read_tag()?;
                    if tag == Tag::End {
                        self.pop();
                    } else {
                        // The compound stays underneath, ready for the next tag.
                        self.push(Action::content(tag)?)?;
                        self.stack.push(Action::Name);
                    }
                    return Ok(Token::TagId(tag));
                }
                Action::List(seq) | Action::Array(seq) => match seq {
                    Seq::ElementTag => {
                        let element = reader.read_tag()?;
                        self.set_top(action.with_seq(Seq::Size(element)));
                        return Ok(Token::ListTagId(element));
                    }
                    Seq::Size(element) => {
                        let size = reader.read_size()?;
                        self.check_size(size)?;

                        if size == 0 {
                            // Old chunks store empty lists as lists of End,
                            // so the element tag is not checked here.
                            self.pop();
                        } else {
                            Action::content(element)?;
                            self.set_top(action.with_seq(Seq::Elements {
                                element,
                                remaining: size,
                            }));
                        }
                        return Ok(Token::ArraySize(size));
                    }
                    Seq::Elements { element, remaining } => {
                        // Exhausted sequences are unwound after each step, so
                        // there is always an element left to start here. The
                        // element production performs this step's read.
                        self.set_top(action.with_seq(Seq::Elements {
                            element,
                            remaining: remaining - 1,
                        }));
                        self.push(Action::content(element)?)?;
                    }
                },
            }
        }
    }

    fn push(&mut self, action: Action) -> Result<()> {
        if action.is_container() {
            if self.depth >= self.opts.max_depth {
                return Err(Error::format(format!(
                    "nbt nested deeper than max depth ({})",
                    self.opts.max_depth
                )));
            }
            self.depth += 1;
        }
        self.stack.push(action);
        Ok(())
    }

    fn pop(&mut self) {
        if let Some(action) = self.stack.pop() {
            if action.is_container() {
                self.depth -= 1;
            }
        }
    }

    fn set_top(&mut self, action: Action) {
        if let Some(top) = self.stack.last_mut() {
            *top = action;
        }
    }

    fn check_size(&self, size: i32) -> Result<()> {
        if size < 0 {
            return Err(Error::format(format!("negative sequence size: {}", size)));
        }
        if size as usize > self.opts.max_seq_len {
            return Err(Error::format(format!(
                "size ({}) greater than max sequence length ({})",
                size, self.opts.max_seq_len,
            )));
        }
        Ok(())
    }

    /// Pop sequences whose last element has just completed.
    fn unwind(&mut self) {
        while let Some(
            Action::List(Seq::Elements { remaining: 0, .. })
            | Action::Array(Seq::Elements { remaining: 0, .. }),
        ) = self.stack.last()
        {
            self.pop();
        }
    }
}
