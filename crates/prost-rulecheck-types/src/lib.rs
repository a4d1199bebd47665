//! Rust types for the `validate` constraint schema (`validate/validate.proto`),
//! written with `prost` derive macros, plus helpers for reading the
//! `(validate.rules)` field option out of `prost-reflect` descriptors.
//!
//! This crate provides:
//!
//! - The [`FieldRules`] message with its closed [`field_rules::Type`] oneof and
//!   every per-kind payload (e.g. [`Int32Rules`], [`StringRules`]).
//! - [`ConstraintDescriptor`]: decoded rules together with any rule shape on
//!   the wire that this schema revision does not recognize.
//! - [`FieldRulesExt`], which extracts the descriptor from a
//!   [`FieldDescriptor`]'s options.
//!
//! Most users do not need this crate directly; `prost-rulecheck` re-exports it
//! as its `types` module.

#![warn(missing_docs)]

#[allow(missing_docs, clippy::doc_markdown, clippy::must_use_candidate)]
mod proto;

use anyhow::{Context, anyhow, bail};
use prost::Message;
use prost::encoding::{WireType, decode_key, decode_varint};
use prost_reflect::FieldDescriptor;

pub use proto::*;

/// Highest field number used by the known arms of `FieldRules`.
const LAST_KNOWN_RULE_TAG: u32 = 22;

/// The `(validate.rules)` option attached to a field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstraintDescriptor {
    /// The decoded rules.
    pub rules: FieldRules,

    /// Field number of the first rule shape that is not part of this schema
    /// revision, if any was present on the wire.
    pub unrecognized: Option<u32>,
}

impl ConstraintDescriptor {
    /// Wrap already-decoded rules.
    #[must_use]
    pub fn new(rules: FieldRules) -> Self {
        Self {
            rules,
            unrecognized: None,
        }
    }

    /// Decode an encoded `FieldRules` message, recording unknown rule shapes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid `FieldRules` encoding.
    pub fn decode(buf: &[u8]) -> anyhow::Result<Self> {
        let mut out = Self::default();
        out.merge(buf)?;
        Ok(out)
    }

    fn merge(&mut self, buf: &[u8]) -> anyhow::Result<()> {
        self.rules
            .merge(buf)
            .context("failed to decode validate.FieldRules")?;
        if self.unrecognized.is_none() {
            self.unrecognized = scan_fields(buf, |tag, _| tag > LAST_KNOWN_RULE_TAG)?
                .into_iter()
                .next()
                .map(|(tag, _)| tag);
        }
        Ok(())
    }
}

impl From<FieldRules> for ConstraintDescriptor {
    fn from(rules: FieldRules) -> Self {
        Self::new(rules)
    }
}

/// Extract the `(validate.rules)` extension from encoded `FieldOptions` bytes.
///
/// Repeated occurrences of the extension are merged, as protobuf merges
/// repeated occurrences of a message field.
///
/// # Errors
///
/// Returns an error if the option bytes or the embedded rules are malformed.
pub fn decode_rules_option(options: &[u8]) -> anyhow::Result<Option<ConstraintDescriptor>> {
    let occurrences = scan_fields(options, |tag, wire_type| {
        tag == RULES_EXTENSION_NUMBER && wire_type == WireType::LengthDelimited
    })?;
    if occurrences.is_empty() {
        return Ok(None);
    }

    let mut descriptor = ConstraintDescriptor::default();
    for (_, payload) in occurrences {
        descriptor.merge(payload)?;
    }
    Ok(Some(descriptor))
}

/// Extension trait for extracting `(validate.rules)` from a field descriptor.
pub trait FieldRulesExt {
    /// Returns the constraint descriptor for this field, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the option cannot be decoded as `FieldRules`.
    fn field_rules(&self) -> anyhow::Result<Option<ConstraintDescriptor>>;
}

impl FieldRulesExt for FieldDescriptor {
    fn field_rules(&self) -> anyhow::Result<Option<ConstraintDescriptor>> {
        // The extension is not registered in the pool, so it survives only as
        // an unknown field and is re-read from the encoded options.
        let options = self.options().encode_to_vec();
        decode_rules_option(&options)
            .with_context(|| format!("invalid (validate.rules) on {}", self.full_name()))
    }
}

/// Walk the top-level fields of an encoded message, returning the field number
/// and payload of every field selected by `select`. Only length-delimited
/// fields carry a payload; other wire types yield an empty slice.
fn scan_fields(
    mut buf: &[u8],
    select: impl Fn(u32, WireType) -> bool,
) -> anyhow::Result<Vec<(u32, &[u8])>> {
    let mut out = Vec::new();
    while !buf.is_empty() {
        let (tag, wire_type) = decode_key(&mut buf)?;
        let payload = match wire_type {
            WireType::Varint => {
                decode_varint(&mut buf)?;
                &[][..]
            }
            WireType::SixtyFourBit => advance(&mut buf, 8)?,
            WireType::ThirtyTwoBit => advance(&mut buf, 4)?,
            WireType::LengthDelimited => {
                let len = usize::try_from(decode_varint(&mut buf)?)
                    .map_err(|_| anyhow!("length of field {tag} overflows usize"))?;
                advance(&mut buf, len)?
            }
            WireType::StartGroup | WireType::EndGroup => {
                bail!("unsupported group encoding in field {tag}")
            }
        };
        if select(tag, wire_type) {
            out.push((tag, payload));
        }
    }
    Ok(out)
}

fn advance<'a>(buf: &mut &'a [u8], len: usize) -> anyhow::Result<&'a [u8]> {
    if buf.len() < len {
        bail!("buffer underflow: need {len} bytes, have {}", buf.len());
    }
    let (head, tail) = buf.split_at(len);
    *buf = tail;
    Ok(head)
}
