use std::io::Write;

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;

use crate::{REGION_HEADER_SIZE, REGION_WIDTH, SECTOR_SIZE};


/// Builds region data by hand. Chunks are appended sector aligned after the
/// header, in the order they are given.
pub struct Builder {
    inner: Vec<u8>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            inner: vec![0; REGION_HEADER_SIZE],
        }
    }

    /// Set the header location of a chunk without writing any chunk data.
    pub fn location(mut self, x: usize, z: usize, offset: u32, sectors: u8) -> Self {
        let pos = 4 * (x + z * REGION_WIDTH);
        self.inner[pos..pos + 3].copy_from_slice(&offset.to_be_bytes()[1..4]);
        self.inner[pos + 3] = sectors;
        self
    }

    pub fn timestamp(mut self, x: usize, z: usize, ts: u32) -> Self {
        let pos = SECTOR_SIZE + 4 * (x + z * REGION_WIDTH);
        self.inner[pos..pos + 4].copy_from_slice(&ts.to_be_bytes());
        self
    }

    /// Append a chunk with the given compression byte and already compressed
    /// payload, and point the header at it.
    pub fn chunk(self, x: usize, z: usize, method: u8, payload: &[u8]) -> Self {
        let len = payload.len() as u32 + 1;
        self.chunk_with_len(x, z, len, method, payload)
    }

    /// Like `chunk`, but with any length in the chunk header.
    pub fn chunk_with_len(
        mut self,
        x: usize,
        z: usize,
        len: u32,
        method: u8,
        payload: &[u8],
    ) -> Self {
        self.pad();
        let offset = self.inner.len() / SECTOR_SIZE;

        self.inner.extend_from_slice(&len.to_be_bytes());
        self.inner.push(method);
        self.inner.extend_from_slice(payload);

        let sectors = (self.inner.len() - offset * SECTOR_SIZE + SECTOR_SIZE - 1) / SECTOR_SIZE;
        self.location(x, z, offset as u32, sectors as u8)
    }

    pub fn gzip_chunk(self, x: usize, z: usize, nbt: &[u8]) -> Self {
        self.chunk(x, z, 1, &gzip(nbt))
    }

    pub fn zlib_chunk(self, x: usize, z: usize, nbt: &[u8]) -> Self {
        self.chunk(x, z, 2, &zlib(nbt))
    }

    pub fn raw_chunk(self, x: usize, z: usize, nbt: &[u8]) -> Self {
        self.chunk(x, z, 3, nbt)
    }

    pub fn build(mut self) -> Vec<u8> {
        self.pad();
        self.inner
    }

    pub fn build_unpadded(self) -> Vec<u8> {
        self.inner
    }

    fn pad(&mut self) {
        let sectors = (self.inner.len() + SECTOR_SIZE - 1) / SECTOR_SIZE;
        self.inner.resize(sectors * SECTOR_SIZE, 0);
    }
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(vec![], Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(vec![], Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn named(tag: u8, name: &str, out: &mut Vec<u8>) {
    out.push(tag);
    out.extend_from_slice(&(name.len() as u16).to_be_bytes());
    out.extend_from_slice(name.as_bytes());
}

/// A small chunk-like NBT document:
/// `compound "" { int "xPos", int "zPos", string "Status", long list "Heights" }`
pub fn chunk_nbt(x: i32, z: i32) -> Vec<u8> {
    let mut out = vec![];
    named(10, "", &mut out);

    named(3, "xPos", &mut out);
    out.extend_from_slice(&x.to_be_bytes());
    named(3, "zPos", &mut out);
    out.extend_from_slice(&z.to_be_bytes());

    named(8, "Status", &mut out);
    out.extend_from_slice(&4u16.to_be_bytes());
    out.extend_from_slice(b"full");

    named(9, "Heights", &mut out);
    out.push(4);
    out.extend_from_slice(&3i32.to_be_bytes());
    for h in [62i64, 63, 64] {
        out.extend_from_slice(&h.to_be_bytes());
    }

    out.push(0);
    out
}
