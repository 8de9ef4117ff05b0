//! Forest builder.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{value_kind, Result, ValidationError, ValidationErrorKind, RECORDS_USAGE};
use crate::forest::Forest;
use crate::id::NodeId;
use crate::options::Options;
use crate::record::Record;

/// Where conversion results go besides the returned forest.
#[derive(Debug)]
enum Backing<'a> {
    /// The builder owns independent copies of the records.
    Detached,
    /// The builder writes links back into the caller's records.
    Attached(&'a mut Vec<Value>),
}

/// Builder of a [`Forest`] from flat records.
///
/// Records are validated when the builder is created, so
/// [`convert`][`Self::convert`] and [`find_parents_for`][`Self::find_parents_for`]
/// cannot fail.
///
/// # Examples
///
/// ```
/// use flatforest::{ForestBuilder, RecordId};
/// use serde_json::json;
///
/// let records = json!([
///     { "id": "1", "parent": 0 },
///     { "id": "2", "parent": "1" },
///     { "id": "3", "parent": ["2", "1"] },
/// ]);
/// let mut builder = ForestBuilder::new(&records)?;
/// let forest = builder.convert();
///
/// let root = forest.roots().next().expect("one root");
/// assert_eq!(root.record_id(), &RecordId::from("1"));
/// assert_eq!(root.debug_print().to_string(), "1\n|-- 2\n|   `-- 3\n`-- 3");
/// # Ok::<(), flatforest::ValidationError>(())
/// ```
#[derive(Debug)]
pub struct ForestBuilder<'a> {
    /// Validated records, in input order.
    records: Vec<Record>,
    /// Options.
    options: Options,
    /// Destination of link annotations.
    backing: Backing<'a>,
}

impl ForestBuilder<'static> {
    /// Creates a builder with the default options.
    ///
    /// The caller's records are never modified.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `records` is not a sequence of valid
    /// records.
    #[inline]
    pub fn new(records: &Value) -> Result<Self> {
        Self::with_options(records, Options::default())
    }

    /// Creates a builder working on copies of the records.
    ///
    /// The caller's records are never modified. Use
    /// [`construct`][`ForestBuilder::construct`] to have conversion write
    /// links back into them.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `records` is not a sequence of valid
    /// records, or [`ValidationErrorKind::ReadOnlyRecords`] if
    /// [`Options::alter_original`] is enabled.
    pub fn with_options(records: &Value, options: Options) -> Result<Self> {
        let records = parse_records(as_sequence(records)?)?;
        Self::detached(records, options)
    }

    /// Creates a builder from records built in code.
    ///
    /// The records are checked the same way JSON input is: blank ids (`""`
    /// and `0`) are rejected, and a blank single parent means "no parent".
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::MissingId`] for the first record with a
    /// blank id, or [`ValidationErrorKind::ReadOnlyRecords`] if
    /// [`Options::alter_original`] is enabled.
    pub fn from_records(records: Vec<Record>, options: Options) -> Result<Self> {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.validated(index))
            .collect::<Result<Vec<_>>>()?;
        Self::detached(records, options)
    }

    /// Creates a detached builder.
    fn detached(records: Vec<Record>, options: Options) -> Result<Self> {
        if options.alters_original() {
            return Err(ValidationError::new(ValidationErrorKind::ReadOnlyRecords));
        }
        debug!(records = records.len(), "records validated");
        Ok(Self {
            records,
            options,
            backing: Backing::Detached,
        })
    }
}

impl<'a> ForestBuilder<'a> {
    /// Creates a builder, attached to the caller's records if the options say so.
    ///
    /// With [`Options::alter_original`] disabled, this is the same as
    /// [`with_options`][`ForestBuilder::with_options`]. With it enabled, every
    /// conversion also writes a `children` array of child ids and (when parent
    /// references are enabled) a `parents` array of parent ids into each
    /// caller record that has such links.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `records` is not a sequence of valid
    /// records. The caller's records are not modified in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatforest::{ForestBuilder, Options};
    /// use serde_json::json;
    ///
    /// let mut records = json!([
    ///     { "id": 1, "parent": null },
    ///     { "id": 2, "parent": 1 },
    /// ]);
    /// ForestBuilder::construct(&mut records, Options::new().alter_original(true))?.convert();
    ///
    /// assert_eq!(
    ///     records,
    ///     json!([
    ///         { "id": 1, "parent": null, "children": [2] },
    ///         { "id": 2, "parent": 1, "parents": [1] },
    ///     ])
    /// );
    /// # Ok::<(), flatforest::ValidationError>(())
    /// ```
    pub fn construct(records: &'a mut Value, options: Options) -> Result<Self> {
        let values = match records {
            Value::Array(values) => values,
            other => return Err(not_a_sequence(other)),
        };
        let records = parse_records(values)?;
        debug!(
            records = records.len(),
            attached = options.alters_original(),
            "records validated"
        );

        let backing = if options.alters_original() {
            Backing::Attached(values)
        } else {
            Backing::Detached
        };
        Ok(Self {
            records,
            options,
            backing,
        })
    }

    /// Returns the validated records in input order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns true if conversion writes links back into the caller's records.
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        matches!(self.backing, Backing::Attached(_))
    }

    /// Returns the indices of the records referenced as parents by `record`.
    ///
    /// Matches follow the order of the records, not the order of the ids
    /// in `record.parent`.
    fn resolve_parents<'r>(&'r self, record: &'r Record) -> impl Iterator<Item = usize> + 'r {
        let parent = record.parent();
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, candidate)| parent.references(candidate.id()))
            .map(|(index, _)| index)
    }

    /// Returns every record referenced as a parent by `record`.
    ///
    /// The result is empty for roots and for records none of whose parents
    /// exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatforest::{ForestBuilder, Record, RecordId};
    /// use serde_json::json;
    ///
    /// let records = json!([
    ///     { "id": "a", "parent": null },
    ///     { "id": "b", "parent": null },
    ///     { "id": "c", "parent": ["b", "a", "x"] },
    /// ]);
    /// let builder = ForestBuilder::new(&records)?;
    ///
    /// let parents = builder
    ///     .find_parents_for(&builder.records()[2])
    ///     .into_iter()
    ///     .map(|record| record.id().to_string())
    ///     .collect::<Vec<_>>();
    /// assert_eq!(parents, ["a", "b"]);
    ///
    /// let orphan = Record::new("z", RecordId::from("missing"));
    /// assert!(builder.find_parents_for(&orphan).is_empty());
    /// # Ok::<(), flatforest::ValidationError>(())
    /// ```
    #[must_use]
    pub fn find_parents_for(&self, record: &Record) -> Vec<&Record> {
        let records = &self.records;
        self.resolve_parents(record)
            .map(|index| &records[index])
            .collect()
    }

    /// Validates a raw record and returns every record referenced as its parent.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `record` is not a valid record.
    pub fn find_parents_for_value(&self, record: &Value) -> Result<Vec<&Record>> {
        let record = Record::from_value(record)?;
        Ok(self.find_parents_for(&record))
    }

    /// Converts the records into a forest.
    ///
    /// Records declared as roots become roots in input order. Every other
    /// record is linked under each record it references as a parent. Records
    /// none of whose parents exist are appended to the roots after the
    /// declared roots.
    ///
    /// The forest is recomputed on every call, and repeated calls produce
    /// equal forests.
    pub fn convert(&mut self) -> Forest {
        let mut forest = Forest::with_records(self.records.clone(), self.options.tracks_parents());

        let mut pending = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            if record.parent().is_root() {
                forest.push_root(NodeId::from_index(index));
            } else {
                pending.push(index);
            }
        }
        debug!(
            roots = forest.root_ids().len(),
            pending = pending.len(),
            "records partitioned"
        );

        let mut orphans = 0_usize;
        for index in pending {
            let child = NodeId::from_index(index);
            let record = &self.records[index];

            let mut resolved = 0_usize;
            for parent_index in self.resolve_parents(record) {
                forest.link(NodeId::from_index(parent_index), child);
                resolved += 1;
            }

            if resolved == 0 {
                warn!(
                    id = %record.id(),
                    parents = ?record.parent().ids(),
                    "no declared parent exists, promoting the record to a root"
                );
                forest.push_root(child);
                orphans += 1;
            }
        }
        debug!(
            nodes = forest.len(),
            roots = forest.root_ids().len(),
            orphans,
            "records linked"
        );

        if let Backing::Attached(values) = &mut self.backing {
            write_back(&forest, values);
        }

        forest
    }
}

/// Returns the elements of the record sequence.
fn as_sequence(records: &Value) -> Result<&[Value]> {
    match records {
        Value::Array(values) => Ok(values),
        other => Err(not_a_sequence(other)),
    }
}

/// Creates the error for a non-sequence input.
fn not_a_sequence(value: &Value) -> ValidationError {
    ValidationError::new(ValidationErrorKind::NotASequence {
        found: value_kind(value),
    })
    .with_usage(RECORDS_USAGE)
}

/// Validates every element, failing on the first malformed one.
fn parse_records(values: &[Value]) -> Result<Vec<Record>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| Record::from_value(value).map_err(|e| e.at_index(index)))
        .collect()
}

/// Writes link annotations into the caller's records.
fn write_back(forest: &Forest, values: &mut [Value]) {
    for node in forest.nodes() {
        let map: &mut Map<String, Value> = match values
            .get_mut(node.id().get())
            .and_then(Value::as_object_mut)
        {
            Some(map) => map,
            None => continue,
        };

        let ids = |nodes: &[NodeId]| {
            let ids = nodes
                .iter()
                .filter_map(|&id| forest.node(id))
                .map(|node| node.record_id().to_value())
                .collect();
            Value::Array(ids)
        };

        // Link keys are present exactly when the node has such links.
        match node.child_ids() {
            [] => map.remove("children"),
            children => map.insert("children".to_owned(), ids(children)),
        };
        match node.parent_ids() {
            Some(parents) if !parents.is_empty() => {
                map.insert("parents".to_owned(), ids(parents))
            }
            _ => map.remove("parents"),
        };
    }
}
