//! On-disk object record
//!
//! Every object file starts with a one-byte storage flag followed by the body:
//!
//! ```text
//! 0x00 <framed bytes>             stored raw
//! 0x01 <zlib(framed bytes)>       stored compressed
//! ```
//!
//! The flag is authoritative: a raw body is never run through the decompressor,
//! and a compressed body that fails to inflate is corrupt rather than "raw".

use crate::artifacts::database::compression;
use anyhow::Context;
use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StorageFlag {
    Raw = 0x00,
    Compressed = 0x01,
}

impl TryFrom<u8> for StorageFlag {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> anyhow::Result<Self> {
        match value {
            0x00 => Ok(StorageFlag::Raw),
            0x01 => Ok(StorageFlag::Compressed),
            _ => Err(anyhow::anyhow!("unknown storage flag {:#04x}", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    flag: StorageFlag,
    body: Bytes,
}

impl StoredObject {
    /// Compress the framed bytes, keeping them raw if compression fails
    pub fn encode(framed: &[u8]) -> Self {
        match compression::compress(framed) {
            Ok(body) => StoredObject {
                flag: StorageFlag::Compressed,
                body,
            },
            Err(error) => {
                tracing::warn!(%error, "compression failed, storing object raw");
                Self::raw(framed)
            }
        }
    }

    pub fn raw(framed: &[u8]) -> Self {
        StoredObject {
            flag: StorageFlag::Raw,
            body: Bytes::copy_from_slice(framed),
        }
    }

    pub fn flag(&self) -> StorageFlag {
        self.flag
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut bytes = Vec::with_capacity(self.body.len() + 1);
        bytes.push(self.flag as u8);
        bytes.extend_from_slice(&self.body);

        Bytes::from(bytes)
    }

    pub fn parse(bytes: Bytes) -> anyhow::Result<Self> {
        let flag = *bytes.first().context("object file is empty")?;

        Ok(StoredObject {
            flag: StorageFlag::try_from(flag)?,
            body: bytes.slice(1..),
        })
    }

    /// Recover the framed bytes according to the storage flag
    pub fn into_framed(self) -> anyhow::Result<Bytes> {
        match self.flag {
            StorageFlag::Raw => Ok(self.body),
            StorageFlag::Compressed => compression::decompress(&self.body),
        }
    }
}
