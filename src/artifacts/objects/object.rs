//! Object framing
//!
//! `Packable::serialize` produces the framed byte sequence
//! `<type> <payload-length>\0<payload>`; the object id is the digest of that
//! whole sequence. `RawObject::parse` reverses the framing and validates the
//! header before any payload parsing happens.

use crate::artifacts::database::hasher;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::{Context, Result};
use bytes::Bytes;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;

        Ok(hasher::digest(&content))
    }
}

/// Frame a payload with its textual type/length header
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());

    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(payload);

    Bytes::from(framed)
}

/// A framed object split into its header fields and payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    pub object_type: ObjectType,
    pub payload: Bytes,
}

impl RawObject {
    pub fn parse(framed: Bytes) -> Result<Self> {
        let nul = framed
            .iter()
            .position(|&byte| byte == b'\0')
            .context("missing NUL after object header")?;

        let header = std::str::from_utf8(&framed[..nul]).context("object header is not UTF-8")?;
        let (object_type, size) = header
            .split_once(' ')
            .context("missing space in object header")?;

        let object_type = ObjectType::try_from(object_type)?;
        let size = size
            .parse::<usize>()
            .with_context(|| format!("invalid object size {:?}", size))?;

        let payload = framed.slice(nul + 1..);
        if payload.len() != size {
            anyhow::bail!(
                "declared size {} does not match payload size {}",
                size,
                payload.len()
            );
        }

        Ok(RawObject {
            object_type,
            payload,
        })
    }

    pub fn size(&self) -> usize {
        self.payload.len()
    }

    pub fn into_object(self) -> Result<ObjectBox> {
        match self.object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(self.payload)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(self.payload)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                self.payload,
            )?))),
        }
    }
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }
}
