use std::convert::TryFrom;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::{
    error::{Error, Result},
    Number, Tag,
};

/// The primitive reads of the NBT grammar. Every read is big-endian and
/// fails with an IO error if the reader runs dry part way through.
pub(crate) trait NbtRead: Read {
    fn read_tag(&mut self) -> Result<Tag> {
        let tag = self.read_u8()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    /// Read a size prefixed string in Java's modified UTF-8.
    fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.read_u16::<BigEndian>()? as usize;

        let mut buf = vec![0; len];
        self.read_exact(&mut buf[..])?;

        Ok(cesu8::from_java_cesu8(&buf[..])
            .map_err(|_| Error::nonunicode_string(&buf[..]))?
            .into_owned())
    }

    fn read_size(&mut self) -> Result<i32> {
        Ok(self.read_i32::<BigEndian>()?)
    }

    /// Read a number of the width the tag dictates.
    fn read_number(&mut self, tag: Tag) -> Result<Number> {
        Ok(match tag {
            Tag::Byte => Number::Byte(self.read_i8()?),
            Tag::Short => Number::Short(self.read_i16::<BigEndian>()?),
            Tag::Int => Number::Int(self.read_i32::<BigEndian>()?),
            Tag::Long => Number::Long(self.read_i64::<BigEndian>()?),
            Tag::Float => Number::Float(self.read_f32::<BigEndian>()?),
            Tag::Double => Number::Double(self.read_f64::<BigEndian>()?),
            _ => return Err(Error::format(format!("{:?} is not a numeric tag", tag))),
        })
    }
}

impl<R: Read + ?Sized> NbtRead for R {}
