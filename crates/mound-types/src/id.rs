use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Length of the canonical hyphenated form.
const CANONICAL_LEN: usize = 36;

/// Byte offsets of the hyphens in the canonical form (8-4-4-4-12).
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Returns `true` if `candidate` is a canonical hyphenated hex identifier.
///
/// Hex digits may be upper or lower case. Simple, braced and URN forms
/// are rejected even though generic UUID parsers accept them.
///
/// ```
/// use mound_types::is_valid_record_id;
///
/// assert!(is_valid_record_id("0f8fad5b-d9cb-469f-a165-70867728950e"));
/// assert!(is_valid_record_id("0F8FAD5B-D9CB-469F-A165-70867728950E"));
/// assert!(!is_valid_record_id("0f8fad5bd9cb469fa16570867728950e"));
/// ```
pub fn is_valid_record_id(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    bytes.len() == CANONICAL_LEN
        && bytes.iter().enumerate().all(|(i, b)| {
            if HYPHENS.contains(&i) {
                *b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}

/// Identifier of a single record (one program execution).
///
/// Backed by a random (version 4) UUID. The leading hex digits drive the
/// shard layout and must be uniformly distributed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(uuid::Uuid);

impl RecordId {
    /// Generate a fresh random record id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the canonical hyphenated form (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if !is_valid_record_id(s) {
            return Err(TypeError::InvalidRecordId(s.to_string()));
        }
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidRecordId(s.to_string()))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Canonical lowercase hyphenated string.
    pub fn to_canonical(&self) -> String {
        self.0.hyphenated().to_string()
    }

    /// Short representation (first 8 hex characters).
    pub fn short_id(&self) -> String {
        self.to_canonical()[..8].to_string()
    }
}

impl FromStr for RecordId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_canonical()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.short_id())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    #[test]
    fn generated_ids_are_unique() {
        let id1 = RecordId::generate();
        let id2 = RecordId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn display_is_canonical_lowercase() {
        let id = RecordId::parse(&SAMPLE.to_uppercase()).unwrap();
        assert_eq!(id.to_string(), SAMPLE);
        assert_eq!(id.to_canonical().len(), 36);
    }

    #[test]
    fn short_id_format() {
        let id = RecordId::parse(SAMPLE).unwrap();
        assert_eq!(id.short_id(), "0f8fad5b");
        assert_eq!(format!("{id:?}"), "RecordId(0f8fad5b)");
    }

    #[test]
    fn rejects_non_canonical_forms() {
        assert!(!is_valid_record_id(""));
        assert!(!is_valid_record_id("0f8fad5bd9cb469fa16570867728950e"));
        assert!(!is_valid_record_id("{0f8fad5b-d9cb-469f-a165-70867728950e}"));
        assert!(!is_valid_record_id("urn:uuid:0f8fad5b-d9cb-469f-a165-70867728950e"));
        assert!(!is_valid_record_id("0f8fad5b-d9cb-469f-a165-70867728950"));
        assert!(!is_valid_record_id("0f8fad5b-d9cb-469f-a165-70867728950e0"));
        assert!(!is_valid_record_id("0f8fad5b-d9cb-469f-a165-70867728950g"));
        assert!(!is_valid_record_id("0f8fad5b-d9cb-469f-a1657-0867728950e"));
        assert!(!is_valid_record_id("not-a-record-id"));
    }

    #[test]
    fn parse_error_carries_input() {
        let err = RecordId::parse("nope").unwrap_err();
        assert_eq!(err, TypeError::InvalidRecordId("nope".into()));
    }

    #[test]
    fn serde_uses_canonical_string() {
        let id = RecordId::parse(SAMPLE).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));
        let parsed: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_rejects_simple_form() {
        let result: Result<RecordId, _> =
            serde_json::from_str("\"0f8fad5bd9cb469fa16570867728950e\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn every_uuid_renders_valid(bytes in any::<[u8; 16]>()) {
            let id = RecordId::from_uuid(uuid::Uuid::from_bytes(bytes));
            let s = id.to_string();
            prop_assert!(is_valid_record_id(&s));
            prop_assert!(is_valid_record_id(&s.to_uppercase()));
            prop_assert_eq!(RecordId::parse(&s).unwrap(), id);
        }

        #[test]
        fn dropping_a_hyphen_invalidates(bytes in any::<[u8; 16]>(), which in 0usize..4) {
            let s = RecordId::from_uuid(uuid::Uuid::from_bytes(bytes)).to_string();
            let mut broken = s.clone();
            broken.remove(HYPHENS[which]);
            prop_assert!(!is_valid_record_id(&broken));
        }

        #[test]
        fn non_hex_digit_invalidates(bytes in any::<[u8; 16]>(), pos in 0usize..36) {
            prop_assume!(!HYPHENS.contains(&pos));
            let s = RecordId::from_uuid(uuid::Uuid::from_bytes(bytes)).to_string();
            let mut broken = s.into_bytes();
            broken[pos] = b'z';
            let broken = String::from_utf8(broken).unwrap();
            prop_assert!(!is_valid_record_id(&broken));
        }
    }
}
