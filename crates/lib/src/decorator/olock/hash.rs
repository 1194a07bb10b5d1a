//! Canonical serialization and fingerprint digests.
//!
//! The canonical form is a deterministic, type-tagged byte encoding of a
//! tree: map keys are sorted at every level, sequence order is preserved,
//! and every scalar carries a tag so that the text `"1"` and the number `1`
//! never encode alike. Lengths prefix every variable-sized item, which keeps
//! the encoding unambiguous without any escaping.
//!
//! | node | encoding |
//! |------|----------|
//! | null | `z` |
//! | bool | `t` / `f` |
//! | number | `n` digits `;` |
//! | text | `s` byte-length `:` bytes |
//! | sequence | `l` count `[` items `]` |
//! | map | `m` count `{` (text-encoded key, value)* `}` |
//!
//! Fields named in the ignored set are dropped from maps at every depth
//! before encoding.

use std::collections::BTreeSet;

use base64ct::{Base64, Encoding};
use sha2::{Digest, Sha256};

use crate::tree::ConfigNode;

/// Receives canonical bytes.
trait CanonicalSink {
    fn put(&mut self, bytes: &[u8]);
}

impl CanonicalSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl CanonicalSink for Sha256 {
    fn put(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

/// Returns the canonical byte encoding of `node`, minus `ignored` fields.
pub fn canonical_bytes(node: &ConfigNode, ignored: &BTreeSet<String>) -> Vec<u8> {
    let mut out = Vec::new();
    encode(node, ignored, &mut out);
    out
}

/// Computes the base64 SHA-256 fingerprint of `node`, minus `ignored` fields.
///
/// Equivalent to hashing [`canonical_bytes`], without materializing them.
pub fn fingerprint(node: &ConfigNode, ignored: &BTreeSet<String>) -> String {
    let mut hasher = Sha256::new();
    encode(node, ignored, &mut hasher);
    Base64::encode_string(&hasher.finalize())
}

fn encode(node: &ConfigNode, ignored: &BTreeSet<String>, out: &mut impl CanonicalSink) {
    match node {
        ConfigNode::Null => out.put(b"z"),
        ConfigNode::Bool(true) => out.put(b"t"),
        ConfigNode::Bool(false) => out.put(b"f"),
        ConfigNode::Number(n) => {
            out.put(b"n");
            out.put(n.to_string().as_bytes());
            out.put(b";");
        }
        ConfigNode::Text(s) => encode_text(s, out),
        ConfigNode::Sequence(items) => {
            out.put(format!("l{}[", items.len()).as_bytes());
            for item in items {
                encode(item, ignored, out);
            }
            out.put(b"]");
        }
        ConfigNode::Map(map) => {
            let mut entries: Vec<_> = map
                .iter()
                .filter(|(key, _)| !ignored.contains(key.as_str()))
                .collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

            out.put(format!("m{}{{", entries.len()).as_bytes());
            for (key, value) in entries {
                encode_text(key, out);
                encode(value, ignored, out);
            }
            out.put(b"}");
        }
    }
}

fn encode_text(s: &str, out: &mut impl CanonicalSink) {
    out.put(format!("s{}:", s.len()).as_bytes());
    out.put(s.as_bytes());
}
