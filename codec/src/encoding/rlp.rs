//! Recursive length-prefix trees.
//!
//! Transaction payloads are heterogeneous nested lists, so instead of
//! deriving `Encodable` per struct we build an [`RlpItem`] tree and let
//! `alloy-rlp` handle the header arithmetic. Decoding goes the other way:
//! untrusted bytes become a tree first, and the schema layer walks it.

use alloy_rlp::{BufMut, Encodable, Header};

use crate::config::MAX_RLP_DEPTH;
use crate::error::{CodecError, Result};

/// A node of a decoded or to-be-encoded RLP structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// A byte string. Single bytes below `0x80` are self-delimiting on the
    /// wire; everything else carries a length prefix.
    Bytes(Vec<u8>),
    /// A list of nested items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string (`0x80`), used for absent and zero fields.
    pub fn empty() -> Self {
        Self::Bytes(Vec::new())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// True for the empty byte string. An empty list is not "empty" in this
    /// sense because the schema gives it a different meaning.
    pub fn is_empty_bytes(&self) -> bool {
        matches!(self, Self::Bytes(bytes) if bytes.is_empty())
    }

    /// Borrow the byte payload, rejecting lists.
    pub fn as_bytes(&self, field: &str) -> Result<&[u8]> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::List(_) => Err(CodecError::malformed(format!(
                "expected a byte string for {field}, found a list"
            ))),
        }
    }

    /// Borrow the children, rejecting byte strings.
    pub fn as_list(&self, field: &str) -> Result<&[RlpItem]> {
        match self {
            Self::List(items) => Ok(items),
            Self::Bytes(_) => Err(CodecError::malformed(format!(
                "expected a list for {field}, found a byte string"
            ))),
        }
    }

    /// Borrow the children and require an exact count.
    pub fn as_list_of(&self, field: &str, count: usize) -> Result<&[RlpItem]> {
        let items = self.as_list(field)?;
        if items.len() != count {
            return Err(CodecError::malformed(format!(
                "expected {count} components for {field}, got {}",
                items.len()
            )));
        }
        Ok(items)
    }

    fn payload_length(items: &[RlpItem]) -> usize {
        items.iter().map(Encodable::length).sum()
    }
}

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Bytes(bytes) => bytes.as_slice().encode(out),
            Self::List(items) => {
                Header {
                    list: true,
                    payload_length: Self::payload_length(items),
                }
                .encode(out);
                for item in items {
                    item.encode(out);
                }
            }
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.as_slice().length(),
            Self::List(items) => {
                let payload = Self::payload_length(items);
                alloy_rlp::length_of_length(payload) + payload
            }
        }
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }
}

/// Serialize a tree to its canonical byte form.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::with_capacity(item.length());
    item.encode(&mut out);
    out
}

/// Serialize a top-level list without building the wrapping node.
pub fn encode_list(items: &[RlpItem]) -> Vec<u8> {
    let payload_length = RlpItem::payload_length(items);
    let mut out = Vec::with_capacity(alloy_rlp::length_of_length(payload_length) + payload_length);
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut out);
    for item in items {
        item.encode(&mut out);
    }
    out
}

/// Parse a complete payload. Trailing bytes after the first item are an
/// error: a transaction is exactly one top-level list.
pub fn decode(payload: &[u8]) -> Result<RlpItem> {
    let mut cursor = payload;
    let item = decode_item(&mut cursor, 0)?;
    if !cursor.is_empty() {
        return Err(CodecError::malformed(format!(
            "{} trailing bytes after the encoded payload",
            cursor.len()
        )));
    }
    Ok(item)
}

fn decode_item(buf: &mut &[u8], depth: usize) -> Result<RlpItem> {
    if depth > MAX_RLP_DEPTH {
        return Err(CodecError::malformed(format!(
            "nesting deeper than {MAX_RLP_DEPTH} levels"
        )));
    }

    let header =
        Header::decode(buf).map_err(|e| CodecError::malformed(format!("invalid length prefix: {e}")))?;
    if buf.len() < header.payload_length {
        return Err(CodecError::malformed(format!(
            "length prefix announces {} bytes, only {} remain",
            header.payload_length,
            buf.len()
        )));
    }

    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;

    if !header.list {
        return Ok(RlpItem::Bytes(payload.to_vec()));
    }

    let mut items = Vec::new();
    let mut inner = payload;
    while !inner.is_empty() {
        items.push(decode_item(&mut inner, depth + 1)?);
    }
    Ok(RlpItem::List(items))
}
