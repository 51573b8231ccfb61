//! zlib compression for stored objects
//!
//! A failed `compress` means "store raw"; a failed `decompress` means the body
//! is not a zlib stream and is reported as corrupt by the caller.

use anyhow::Context;
use bytes::Bytes;
use std::io::{Read, Write};

pub fn compress(data: &[u8]) -> anyhow::Result<Bytes> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(data)
        .context("Unable to compress object content")?;

    encoder
        .finish()
        .map(Bytes::from)
        .context("Unable to finish compressing object content")
}

pub fn decompress(data: &[u8]) -> anyhow::Result<Bytes> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut decompressed_content = Vec::new();
    decoder
        .read_to_end(&mut decompressed_content)
        .context("Unable to decompress object content")?;

    Ok(decompressed_content.into())
}
