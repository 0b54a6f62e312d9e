//! Profile entries shown in the list.

use std::fmt;

/// Display name of the synthetic entry for the live system file.
pub const SENTINEL_NAME: &str = "current";

/// Identifier of a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileId {
    /// The live system hosts file, not saved as a profile.
    Init,
    /// Position-derived id, unique within one list.
    Ordinal(usize),
}

impl ProfileId {
    pub fn is_sentinel(self) -> bool {
        self == ProfileId::Init
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileId::Init => f.write_str("init"),
            ProfileId::Ordinal(n) => write!(f, "{n}"),
        }
    }
}

/// A selectable hosts file variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    /// Name captured when a rename began; tells save what to replace.
    pub old_name: Option<String>,
    pub active: bool,
    pub editing: bool,
}

impl Profile {
    /// The entry for the live system file, always first in the list.
    pub fn sentinel() -> Self {
        Self {
            id: ProfileId::Init,
            name: SENTINEL_NAME.to_string(),
            old_name: None,
            active: false,
            editing: false,
        }
    }

    /// A saved profile as read from the command layer.
    pub fn saved(ordinal: usize, name: impl Into<String>, active_name: &str) -> Self {
        let name = name.into();
        let active = !active_name.is_empty() && name == active_name;
        Self {
            id: ProfileId::Ordinal(ordinal),
            name,
            old_name: None,
            active,
            editing: false,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id.is_sentinel()
    }
}
