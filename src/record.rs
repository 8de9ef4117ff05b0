//! Validated input records.

use core::fmt;
use core::slice;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::classify::{as_whole_number, is_emptyish, is_sequence, is_text};
use crate::error::{
    value_kind, Result, ValidationError, ValidationErrorKind, PARENT_USAGE, RECORD_USAGE,
};

/// Record identifier.
///
/// Text and whole-number ids never compare equal to each other: `"1"` and
/// `1` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Whole-number id.
    Whole(u64),
    /// Text id.
    Text(String),
}

impl RecordId {
    /// Reads an id from a JSON value.
    ///
    /// Returns `None` if the value is neither text nor a whole number.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(s) = value.as_str() {
            return Some(Self::Text(s.to_owned()));
        }
        as_whole_number(value).map(Self::Whole)
    }

    /// Returns true for empty text and zero.
    ///
    /// Such ids are never accepted as record ids and, in `parent`, mean
    /// "no parent".
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Whole(n) => *n == 0,
            Self::Text(s) => s.is_empty(),
        }
    }

    /// Converts the id into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Whole(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole(n) => n.fmt(f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordId {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for RecordId {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for RecordId {
    #[inline]
    fn from(n: u64) -> Self {
        Self::Whole(n)
    }
}

/// Parent reference of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    /// The record is a root.
    #[default]
    None,
    /// The record has a single parent.
    Single(RecordId),
    /// The record has any number of parents.
    ///
    /// An empty list is not a root marker: such a record never resolves a
    /// parent and is promoted to a root during conversion.
    Multiple(Vec<RecordId>),
}

impl ParentRef {
    /// Parses the value of a `parent` field.
    ///
    /// Null, empty text and zero mean "no parent".
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::InvalidParent`] (reported at index 0)
    /// if the value is not null, an id, or a list of ids.
    pub fn from_value(value: &Value) -> Result<Self> {
        let invalid = |found: &Value| {
            ValidationError::new(ValidationErrorKind::InvalidParent {
                index: 0,
                found: value_kind(found),
            })
            .with_usage(PARENT_USAGE)
        };

        if value.is_null() {
            return Ok(Self::None);
        }
        if is_sequence(value) {
            let ids = value
                .as_array()
                .into_iter()
                .flatten()
                .map(|item| RecordId::from_value(item).ok_or_else(|| invalid(item)))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Self::Multiple(ids));
        }
        if !is_text(value) && as_whole_number(value).is_none() {
            return Err(invalid(value));
        }
        if is_emptyish(value) {
            return Ok(Self::None);
        }
        RecordId::from_value(value)
            .map(Self::Single)
            .ok_or_else(|| invalid(value))
    }

    /// Returns true if the record is declared as a root.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the referenced parent ids in declaration order.
    #[must_use]
    pub fn ids(&self) -> &[RecordId] {
        match self {
            Self::None => &[],
            Self::Single(id) => slice::from_ref(id),
            Self::Multiple(ids) => ids,
        }
    }

    /// Returns true if `id` is one of the referenced parents.
    #[must_use]
    pub fn references(&self, id: &RecordId) -> bool {
        self.ids().contains(id)
    }

    /// Converts the reference into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::Single(id) => id.to_value(),
            Self::Multiple(ids) => Value::Array(ids.iter().map(RecordId::to_value).collect()),
        }
    }
}

impl From<RecordId> for ParentRef {
    #[inline]
    fn from(id: RecordId) -> Self {
        Self::Single(id)
    }
}

impl From<Vec<RecordId>> for ParentRef {
    #[inline]
    fn from(ids: Vec<RecordId>) -> Self {
        Self::Multiple(ids)
    }
}

/// Field names reserved for the record itself and for its links.
const RESERVED_FIELDS: [&str; 4] = ["id", "parent", "children", "parents"];

/// Input record: an id, a parent reference, and caller-defined fields.
///
/// `children` and `parents` are reserved for links: they are dropped from
/// the caller-defined fields, and rendered nodes carry them exactly when the
/// node has such links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Record {
    /// Record id.
    id: RecordId,
    /// Parent reference.
    parent: ParentRef,
    /// `parent` as the caller wrote it.
    raw_parent: Value,
    /// Other fields, passed through unchanged.
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a new record without extra fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatforest::{ParentRef, Record, RecordId};
    ///
    /// let record = Record::new("2", RecordId::from("1")).with_field("name", "second");
    /// assert_eq!(record.id(), &RecordId::from("2"));
    /// assert_eq!(record.parent(), &ParentRef::Single("1".into()));
    /// assert_eq!(record.field("name").and_then(|v| v.as_str()), Some("second"));
    /// ```
    ///
    /// The record is checked when it is handed to
    /// [`ForestBuilder::from_records`][`crate::ForestBuilder::from_records`].
    #[must_use]
    pub fn new(id: impl Into<RecordId>, parent: impl Into<ParentRef>) -> Self {
        let parent = parent.into();
        Self {
            id: id.into(),
            raw_parent: parent.to_value(),
            parent,
            fields: Map::new(),
        }
    }

    /// Adds a caller-defined field.
    ///
    /// `id`, `parent`, `children` and `parents` are not accepted as field
    /// names and are ignored.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if !RESERVED_FIELDS.contains(&name.as_str()) {
            self.fields.insert(name, value.into());
        }
        self
    }

    /// Checks a record built in code the way [`from_value`][`Self::from_value`]
    /// checks JSON input.
    ///
    /// Blank ids are rejected, and a blank single parent means "no parent".
    pub(crate) fn validated(mut self, index: usize) -> Result<Self> {
        if self.id.is_blank() {
            return Err(ValidationError::new(ValidationErrorKind::MissingId { index })
                .with_usage(RECORD_USAGE));
        }
        if matches!(&self.parent, ParentRef::Single(id) if id.is_blank()) {
            self.parent = ParentRef::None;
        }
        Ok(self)
    }

    /// Validates a JSON value as a record.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] (reported at index 0) if the value is not
    /// an object, has no truthy `id`, does not declare a `parent` key, or has
    /// a `parent` of an unsupported shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatforest::{Record, ValidationErrorKind};
    /// use serde_json::json;
    ///
    /// let record = Record::from_value(&json!({ "id": 7, "parent": [1, 2], "x": true }))?;
    /// assert_eq!(record.parent().ids().len(), 2);
    ///
    /// let err = Record::from_value(&json!({ "id": 7 })).unwrap_err();
    /// assert_eq!(err.kind(), &ValidationErrorKind::MissingParentKey { index: 0 });
    /// # Ok::<(), flatforest::ValidationError>(())
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::NotARecord {
                index: 0,
                found: value_kind(value),
            })
            .with_usage(RECORD_USAGE)
        })?;

        let id = match map.get("id") {
            Some(id) if !is_emptyish(id) => RecordId::from_value(id).ok_or_else(|| {
                ValidationError::new(ValidationErrorKind::InvalidId {
                    index: 0,
                    found: value_kind(id),
                })
                .with_usage(RECORD_USAGE)
            })?,
            _ => {
                return Err(ValidationError::new(ValidationErrorKind::MissingId { index: 0 })
                    .with_usage(RECORD_USAGE))
            }
        };

        let (parent, raw_parent) = match map.get("parent") {
            Some(parent) => (ParentRef::from_value(parent)?, parent.clone()),
            None => {
                return Err(
                    ValidationError::new(ValidationErrorKind::MissingParentKey { index: 0 })
                        .with_usage(RECORD_USAGE),
                )
            }
        };

        let fields = map
            .iter()
            .filter(|(k, _)| !RESERVED_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            id,
            parent,
            raw_parent,
            fields,
        })
    }

    /// Returns the record id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the parent reference.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> &ParentRef {
        &self.parent
    }

    /// Returns the `parent` value as the caller wrote it.
    ///
    /// For records built with [`new`][`Self::new`], this is the parent
    /// reference rendered as JSON.
    #[inline]
    #[must_use]
    pub fn raw_parent(&self) -> &Value {
        &self.raw_parent
    }

    /// Returns the caller-defined fields.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a caller-defined field.
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Converts the record back into a JSON object.
    ///
    /// `parent` is written as the caller wrote it.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Converts the record back into a JSON map.
    #[must_use]
    pub(crate) fn to_map(&self) -> Map<String, Value> {
        let mut map = self.fields.clone();
        map.insert("id".to_owned(), self.id.to_value());
        map.insert("parent".to_owned(), self.raw_parent.clone());
        map
    }
}

impl TryFrom<Value> for Record {
    type Error = ValidationError;

    #[inline]
    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

impl From<Record> for Value {
    #[inline]
    fn from(record: Record) -> Self {
        record.to_value()
    }
}
