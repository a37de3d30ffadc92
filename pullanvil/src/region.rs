use std::convert::TryFrom;
use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::{GzDecoder, ZlibDecoder};
use log::{debug, warn};
use num_enum::TryFromPrimitive;
use pullnbt::Document;

use crate::header::short_read;
use crate::{
    ensure_bounds, Error, RegionHeader, Result, CHUNK_HEADER_SIZE, REGION_HEADER_SIZE,
    SECTOR_SIZE,
};

/// Various compression schemes that NBT data is typically compressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum CompressionScheme {
    Gzip = 1,
    Zlib = 2,
    Uncompressed = 3,
}

/// Encodes how the NBT-Data is compressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkMeta {
    pub compressed_len: u32,
    pub compression_scheme: CompressionScheme,
}

impl ChunkMeta {
    /// Parse the 5 byte chunk header. A compression byte that is not
    /// recognised is taken to mean the data is not compressed.
    pub fn new(data: &[u8]) -> Result<Self> {
        if data.len() < CHUNK_HEADER_SIZE {
            return Err(Error::InsufficientData);
        }

        let mut buf = &data[..CHUNK_HEADER_SIZE];
        let len = buf.read_u32::<BigEndian>()?;
        let scheme = buf.read_u8()?;
        let scheme = CompressionScheme::try_from(scheme).unwrap_or_else(|_| {
            warn!("unknown compression scheme {}, reading chunk as raw nbt", scheme);
            CompressionScheme::Uncompressed
        });

        // this len includes the compression byte.
        let compressed_len = len.checked_sub(1).ok_or(Error::InsufficientData)?;

        Ok(Self {
            compressed_len,
            compression_scheme: scheme,
        })
    }

    /// Warn if the chunk claims more data than the header gave it sectors for.
    /// The chunk's own length wins.
    fn check_sectors(&self, sectors: u64) {
        let needed = CHUNK_HEADER_SIZE as u64 + self.compressed_len as u64;
        if needed > sectors * SECTOR_SIZE as u64 {
            warn!(
                "chunk length {} overruns its {} header sectors",
                self.compressed_len, sectors
            );
        }
    }
}

/// A decompressed chunk and where it sits in the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkData {
    pub x: usize,
    pub z: usize,
    pub data: Vec<u8>,
}

/// Read and decode the chunk at x, z of a region held in memory.
pub fn read_chunk(data: &[u8], header: &RegionHeader, x: usize, z: usize) -> Result<Document> {
    let (scheme, payload) = chunk_payload(data, header, x, z)?;
    Ok(pullnbt::from_reader(decoder(scheme, payload))?)
}

/// Read the chunk at x, z of a region held in memory, returning the
/// decompressed NBT without parsing it.
pub fn read_chunk_bytes(data: &[u8], header: &RegionHeader, x: usize, z: usize) -> Result<Vec<u8>> {
    let (scheme, payload) = chunk_payload(data, header, x, z)?;
    decompress(scheme, payload)
}

/// Find the compressed bytes of a chunk.
fn chunk_payload<'a>(
    data: &'a [u8],
    header: &RegionHeader,
    x: usize,
    z: usize,
) -> Result<(CompressionScheme, &'a [u8])> {
    let start = chunk_start(header, x, z)?;

    let meta = ChunkMeta::new(data.get(start..).ok_or(Error::InsufficientData)?)?;
    meta.check_sectors(header.sectors(x, z)?);

    let begin = start + CHUNK_HEADER_SIZE;
    let end = begin + meta.compressed_len as usize;
    let payload = data.get(begin..end).ok_or(Error::InsufficientData)?;

    Ok((meta.compression_scheme, payload))
}

/// Byte offset of a present chunk's header.
fn chunk_start(header: &RegionHeader, x: usize, z: usize) -> Result<usize> {
    ensure_bounds(x, z)?;
    if !header.is_present(x, z)? {
        return Err(Error::ChunkNotFound);
    }

    let start = header.offset(x, z)? as usize;
    if start < REGION_HEADER_SIZE {
        return Err(Error::InvalidOffset(x as isize, z as isize));
    }
    Ok(start)
}

fn decoder<'a>(scheme: CompressionScheme, payload: &'a [u8]) -> Box<dyn Read + 'a> {
    match scheme {
        CompressionScheme::Gzip => {
            debug!("using gzip compression");
            Box::new(GzDecoder::new(payload))
        }
        CompressionScheme::Zlib => {
            debug!("using zlib compression");
            Box::new(ZlibDecoder::new(payload))
        }
        CompressionScheme::Uncompressed => {
            debug!("chunk is not compressed");
            Box::new(payload)
        }
    }
}

fn decompress(scheme: CompressionScheme, payload: &[u8]) -> Result<Vec<u8>> {
    let mut buf = vec![];
    decoder(scheme, payload).read_to_end(&mut buf)?;
    Ok(buf)
}

/// A Minecraft Region, read from a stream such as a file. Only the header is
/// kept in memory. Chunks are read from the underlying stream when needed.
pub struct Region<S> {
    stream: S,
    header: RegionHeader,
}

impl<S> Region<S>
where
    S: Read + Seek,
{
    /// Load a region from an existing stream. Will assume a seek of zero is the
    /// start of the region.
    pub fn from_stream(mut stream: S) -> Result<Self> {
        stream.rewind()?;
        let header = RegionHeader::from_reader(&mut stream)?;
        Ok(Self { stream, header })
    }

    pub fn header(&self) -> &RegionHeader {
        &self.header
    }

    /// Return the inner stream used. The stream is rewound to the beginning.
    pub fn into_inner(mut self) -> io::Result<S> {
        self.stream.rewind()?;
        Ok(self.stream)
    }

    /// Read the chunk located at the chunk coordinates x, z. These should
    /// both be 0..32. The chunk data returned is uncompressed NBT.
    pub fn read_chunk(&mut self, x: usize, z: usize) -> Result<Vec<u8>> {
        let start = chunk_start(&self.header, x, z)?;
        self.stream.seek(SeekFrom::Start(start as u64))?;

        let mut buf = [0u8; CHUNK_HEADER_SIZE];
        self.stream.read_exact(&mut buf).map_err(short_read)?;
        let meta = ChunkMeta::new(&buf)?;
        meta.check_sectors(self.header.sectors(x, z)?);

        let mut payload = vec![];
        (&mut self.stream)
            .take(meta.compressed_len as u64)
            .read_to_end(&mut payload)?;
        if payload.len() != meta.compressed_len as usize {
            return Err(Error::InsufficientData);
        }

        decompress(meta.compression_scheme, &payload)
    }

    /// Read and decode the chunk at x, z.
    pub fn document(&mut self, x: usize, z: usize) -> Result<Document> {
        let data = self.read_chunk(x, z)?;
        Ok(pullnbt::from_bytes(&data)?)
    }

    /// Read every chunk the region holds, in header order.
    pub fn iter_present(&mut self) -> impl Iterator<Item = Result<ChunkData>> + '_ {
        let coords: Vec<_> = self.header.present_chunks().collect();

        coords.into_iter().map(move |(x, z)| {
            let data = self.read_chunk(x, z)?;
            Ok(ChunkData { x, z, data })
        })
    }
}
