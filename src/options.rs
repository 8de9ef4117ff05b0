//! Conversion options.

use serde::{Deserialize, Serialize};

/// Options for [`ForestBuilder`][`crate::ForestBuilder`].
///
/// Options can be written in code or read from JSON with camelCase keys.
/// Missing keys take their default values.
///
/// # Examples
///
/// ```
/// use flatforest::Options;
///
/// let options: Options = serde_json::from_str(r#"{ "parentReferences": false }"#)?;
/// assert_eq!(options, Options::default().parent_references(false));
/// assert!(!options.alters_original());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    /// Whether linked children keep references to their parents.
    parent_references: bool,
    /// Whether conversion writes links back into the caller's records.
    alter_original: bool,
}

impl Options {
    /// Creates the default options.
    ///
    /// Parent references are tracked and the caller's records are left untouched.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parent_references: true,
            alter_original: false,
        }
    }

    /// Sets whether linked children keep references to their parents.
    #[inline]
    #[must_use]
    pub const fn parent_references(mut self, enabled: bool) -> Self {
        self.parent_references = enabled;
        self
    }

    /// Sets whether conversion writes links back into the caller's records.
    ///
    /// This takes effect only for builders created by
    /// [`ForestBuilder::construct`][`crate::ForestBuilder::construct`], which
    /// borrows the records mutably.
    #[inline]
    #[must_use]
    pub const fn alter_original(mut self, enabled: bool) -> Self {
        self.alter_original = enabled;
        self
    }

    /// Returns whether linked children keep references to their parents.
    #[inline]
    #[must_use]
    pub const fn tracks_parents(&self) -> bool {
        self.parent_references
    }

    /// Returns whether conversion writes links back into the caller's records.
    #[inline]
    #[must_use]
    pub const fn alters_original(&self) -> bool {
        self.alter_original
    }
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
