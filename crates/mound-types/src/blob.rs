use std::fmt;

use serde::{Deserialize, Serialize};

/// Descriptor of one blob slot as it appears in the metadata document.
///
/// A caller-supplied name is stored as a JSON string; an unnamed slot is
/// stored as its own zero-based index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlobDescriptor {
    /// Slot created with a caller-supplied name.
    Named(String),
    /// Unnamed slot, identified by its index.
    Indexed(u64),
}

impl BlobDescriptor {
    /// Build the descriptor for slot `index`, preferring `name` when given.
    pub fn for_slot(index: u64, name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::Named(name.to_string()),
            None => Self::Indexed(index),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Indexed(_) => None,
        }
    }
}

impl fmt::Display for BlobDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Indexed(index) => write!(f, "#{index}"),
        }
    }
}
