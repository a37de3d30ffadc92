//! For reading Minecraft's region format, Anvil.
//!
//! A region file holds a 32 by 32 grid of chunks. It starts with a fixed
//! header saying where each chunk lives in the file, and each chunk is a
//! compressed NBT document.
//!
//! * [`read_header`] and [`read_chunk`] work on a region already in memory.
//! * [`Region`] can be given a `Read` and `Seek` type, eg a file, and reads
//!   chunks from it on demand.
//!
//! Chunk documents are decoded with [`pullnbt`].
//!
//! ```no_run
//! let data = std::fs::read("r.0.0.mca").unwrap();
//! let header = pullanvil::read_header(&data).unwrap();
//!
//! for (x, z) in header.present_chunks() {
//!     let chunk = pullanvil::read_chunk(&data, &header, x, z).unwrap();
//!     println!("{},{}: {:?}", x, z, chunk.root.get("Status"));
//! }
//! ```

mod header;
mod region;

pub use header::*;
pub use region::*;

#[cfg(test)]
mod test;

#[derive(Debug)]
pub enum Error {
    /// Fewer bytes are available than the header or a chunk needs.
    InsufficientData,
    IO(std::io::Error),
    /// Chunk coordinates outside of the region, or a chunk whose sector
    /// offset points into the region header.
    InvalidOffset(isize, isize),
    ChunkNotFound,
    /// The chunk data was not valid NBT.
    Nbt(pullnbt::error::Error),
}

impl Error {
    /// True for errors caused by reading outside of the region: bad
    /// coordinates, or offsets and lengths past the available data.
    pub fn is_bounds(&self) -> bool {
        matches!(self, Error::InsufficientData | Error::InvalidOffset(..))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IO(err)
    }
}

impl From<pullnbt::error::Error> for Error {
    fn from(err: pullnbt::error::Error) -> Error {
        Error::Nbt(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InsufficientData => f.write_str("insufficient data for region or chunk"),
            Error::IO(e) => f.write_fmt(format_args!("io error: {:?}", e)),
            Error::InvalidOffset(x, z) => {
                f.write_fmt(format_args!("invalid offset: x = {}, z = {}", x, z))
            }
            Error::ChunkNotFound => f.write_str("chunk not found in region"),
            Error::Nbt(e) => f.write_fmt(format_args!("invalid chunk nbt: {}", e)),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(e) => Some(e),
            Error::Nbt(e) => Some(e),
            _ => None,
        }
    }
}
