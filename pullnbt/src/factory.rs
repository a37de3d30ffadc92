use std::io::Read;

use log::debug;

use crate::{
    error::{Error, Result},
    stream::{Parser, ParserOpts},
    DocumentReader,
};

/// Creates parsers and document readers over arbitrary byte sources, all
/// sharing the same options.
///
/// ```
/// use pullnbt::ReaderFactory;
///
/// let factory = ReaderFactory::from_config([("max_depth", "64")]).unwrap();
/// let data = [10, 0, 0, 0];
/// let doc = factory.create_reader(&data[..]).read().unwrap();
/// assert!(doc.root.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderFactory {
    opts: ParserOpts,
}

impl ReaderFactory {
    pub fn new(opts: ParserOpts) -> Self {
        Self { opts }
    }

    /// Build a factory from string keys and values, such as those from a
    /// config file or command line. Recognised keys are `max_depth` and
    /// `max_seq_len`. Anything else is a usage error.
    pub fn from_config<I, K, V>(config: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut opts = ParserOpts::new();

        for (key, value) in config {
            let (key, value) = (key.as_ref(), value.as_ref());
            debug!("reader config {} = {}", key, value);

            match key {
                "max_depth" => opts = opts.max_depth(parse_limit(key, value)?),
                "max_seq_len" => opts = opts.max_seq_len(parse_limit(key, value)?),
                _ => return Err(Error::usage(format!("unknown reader config key: {}", key))),
            }
        }

        Ok(Self { opts })
    }

    pub fn opts(&self) -> ParserOpts {
        self.opts
    }

    pub fn create_parser<R: Read>(&self, reader: R) -> Parser<R> {
        Parser::with_opts(reader, self.opts)
    }

    pub fn create_reader<R: Read>(&self, reader: R) -> DocumentReader<R> {
        DocumentReader::new(self.create_parser(reader))
    }
}

fn parse_limit(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::usage(format!("invalid value for {}: {}", key, value)))
}
