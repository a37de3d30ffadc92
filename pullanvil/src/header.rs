use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{Error, Result};

/// the size in bytes of a 'sector' in a region file. Sectors are Minecraft's size unit
/// for chunks. For example, a chunk might be `3 * SECTOR_SIZE` bytes. The
/// actual compressed bytes of a chunk may be smaller and the exact value is
/// tracked in the chunk header.
pub const SECTOR_SIZE: usize = 4096;

/// the size of the region file header: a sector of locations followed by a
/// sector of timestamps.
pub const REGION_HEADER_SIZE: usize = 2 * SECTOR_SIZE;

/// size of header for each chunk in the region file. This header precedes the
/// compressed chunk data.
pub const CHUNK_HEADER_SIZE: usize = 5;

/// Chunks along each side of a region.
pub const REGION_WIDTH: usize = 32;

/// Chunks in a region.
pub const CHUNK_COUNT: usize = REGION_WIDTH * REGION_WIDTH;

/// Check that chunk coordinates are within a region.
pub fn ensure_bounds(x: usize, z: usize) -> Result<()> {
    if x >= REGION_WIDTH || z >= REGION_WIDTH {
        return Err(Error::InvalidOffset(x as isize, z as isize));
    }
    Ok(())
}

/// The index of the header entry for the chunk at x, z. Entries run along x
/// first.
pub fn slot_index(x: usize, z: usize) -> Result<usize> {
    ensure_bounds(x, z)?;
    Ok(x + z * REGION_WIDTH)
}

/// Read the header at the start of region data.
pub fn read_header(data: &[u8]) -> Result<RegionHeader> {
    RegionHeader::from_bytes(data)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkLocation {
    /// The offset, in units of 4kiB sectors, into the region file this chunk is
    /// located at. Offset 0 is the start of the file.
    pub offset: u64,

    /// The number of 4 kiB sectors that this chunk occupies in the region file.
    pub sectors: u64,
}

impl ChunkLocation {
    fn from_entry(entry: u32) -> Self {
        Self {
            offset: (entry >> 8) as u64,
            sectors: (entry & 0xFF) as u64,
        }
    }

    /// A sector offset of 0 means the chunk has not been generated, whatever
    /// the sector count says.
    pub fn is_present(&self) -> bool {
        self.offset != 0
    }
}

/// The locations and modification times of every chunk in a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionHeader {
    locations: Vec<ChunkLocation>,
    timestamps: Vec<u32>,
}

impl RegionHeader {
    /// Parse the header from the start of `data`. Anything after the header
    /// is ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut buf = data.get(..REGION_HEADER_SIZE).ok_or(Error::InsufficientData)?;

        let mut locations = Vec::with_capacity(CHUNK_COUNT);
        for _ in 0..CHUNK_COUNT {
            locations.push(ChunkLocation::from_entry(buf.read_u32::<BigEndian>()?));
        }

        let mut timestamps = Vec::with_capacity(CHUNK_COUNT);
        for _ in 0..CHUNK_COUNT {
            timestamps.push(buf.read_u32::<BigEndian>()?);
        }

        Ok(Self {
            locations,
            timestamps,
        })
    }

    /// Read the header from the current position of a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = vec![0; REGION_HEADER_SIZE];
        reader.read_exact(&mut buf).map_err(short_read)?;
        Self::from_bytes(&buf)
    }

    pub fn location(&self, x: usize, z: usize) -> Result<ChunkLocation> {
        Ok(self.locations[slot_index(x, z)?])
    }

    /// Offset of the chunk in bytes from the start of the region.
    pub fn offset(&self, x: usize, z: usize) -> Result<u64> {
        Ok(self.location(x, z)?.offset * SECTOR_SIZE as u64)
    }

    pub fn sectors(&self, x: usize, z: usize) -> Result<u64> {
        Ok(self.location(x, z)?.sectors)
    }

    /// Last modification time of the chunk, in seconds since the Unix epoch.
    pub fn timestamp(&self, x: usize, z: usize) -> Result<u32> {
        Ok(self.timestamps[slot_index(x, z)?])
    }

    pub fn is_present(&self, x: usize, z: usize) -> Result<bool> {
        Ok(self.location(x, z)?.is_present())
    }

    /// Coordinates of every chunk the region holds, in header order.
    pub fn present_chunks(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, loc)| loc.is_present())
            .map(|(i, _)| (i % REGION_WIDTH, i / REGION_WIDTH))
    }
}

/// Running out of data part way through the region is a bounds problem rather
/// than an IO failure.
pub(crate) fn short_read(e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::InsufficientData,
        _ => Error::IO(e),
    }
}
