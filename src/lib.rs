//! Forests of linked nodes built from flat parent-referencing records.
//!
//! Each input record carries an `id` and a `parent` reference (none, a single
//! id, or a list of ids). [`ForestBuilder`] validates the records, then
//! [`ForestBuilder::convert`] links every record to its parents and returns a
//! [`Forest`] whose roots reach all other nodes through their children.
//!
//! # Examples
//!
//! ```
//! use flatforest::{ForestBuilder, RecordId};
//! use serde_json::json;
//!
//! let records = json!([
//!     { "id": "1", "parent": 0 },
//!     { "id": "2", "parent": "1" },
//!     { "id": "3", "parent": ["2", "1"] },
//! ]);
//!
//! let forest = ForestBuilder::new(&records)?.convert();
//!
//! let roots = forest.roots().map(|node| node.record_id().clone()).collect::<Vec<_>>();
//! assert_eq!(roots, [RecordId::from("1")]);
//!
//! // "3" has two parents and is the same node under both of them.
//! // Parents are listed in the input order of the records.
//! let node3 = forest.find(&RecordId::from("3")).expect("node 3 exists");
//! let parents = node3
//!     .parents()
//!     .expect("parent references are enabled by default")
//!     .map(|parent| parent.record_id().to_string())
//!     .collect::<Vec<_>>();
//! assert_eq!(parents, ["1", "2"]);
//! # Ok::<(), flatforest::ValidationError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
mod error;
pub mod forest;
mod id;
mod options;
mod record;

pub use self::error::{Result, ValidationError, ValidationErrorKind};
pub use self::forest::{DftEvent, Forest, ForestBuilder, Node};
pub use self::id::NodeId;
pub use self::options::Options;
pub use self::record::{ParentRef, Record, RecordId};
