//! Identifier types
//!
//! Arena handles for the document model plus the validated process title used
//! to name export artefacts. Arena handles are plain indices: they are only
//! meaningful for the [`Document`](super::document::Document) that issued them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Position of this handle in its arena
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Handle of a logical or physical struct node
    NodeId,
    "node#"
);
arena_id!(
    /// Handle of a metadata entry
    MetadataId,
    "md#"
);
arena_id!(
    /// Handle of a metadata group
    GroupId,
    "group#"
);
arena_id!(
    /// Handle of a content file
    FileId,
    "file#"
);

/// Process title newtype wrapper
///
/// The title names the exported descriptor (`{title}.json`) and is available
/// to generation rules as `{process.title}`.
///
/// # Examples
///
/// ```
/// use lux_export::domain::ids::ProcessTitle;
/// use std::str::FromStr;
///
/// let title = ProcessTitle::from_str("lux_artist_0042").unwrap();
/// assert_eq!(title.as_str(), "lux_artist_0042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessTitle(String);

impl ProcessTitle {
    /// Creates a new ProcessTitle from a string
    ///
    /// Titles are used as file names, so path separators are rejected.
    pub fn new(title: impl Into<String>) -> Result<Self, String> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err("Process title cannot be empty".to_string());
        }
        if title.contains('/') || title.contains('\\') {
            return Err(format!(
                "Process title must not contain path separators, got: {title}"
            ));
        }
        Ok(Self(title))
    }

    /// Returns the title as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProcessTitle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProcessTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
