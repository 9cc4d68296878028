//! # Model and Presentation Shapes
//!
//! The engine accepts four model shapes and mirrors each in its output:
//!
//! | Model | Presentation |
//! |-------|--------------|
//! | `Absent` | `Absent` |
//! | `Null` | `Null` |
//! | `Single(record)` | `Single(presented record)` |
//! | `Collection(records)` | `Collection(presented records)`, same length and order |
//!
//! The shape is classified once, up front, so the executor dispatches on an
//! explicit variant rather than probing the value per record.

use serde_json::{Map, Value};

use crate::error::PresentError;

/// A flat key/value record. Nested values are carried through untouched.
pub type Record = Map<String, Value>;

/// Input to [`Presenter::present`](crate::Presenter::present).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Model {
    /// No value was supplied.
    #[default]
    Absent,
    /// An explicit null.
    Null,
    /// A single record (possibly empty).
    Single(Record),
    /// An ordered sequence of records.
    Collection(Vec<Record>),
}

impl Model {
    /// Classify a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedModel` for top-level scalars and `NotARecord` for
    /// array elements that are not objects.
    pub fn from_value(value: Value) -> Result<Self, PresentError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Object(record) => Ok(Self::Single(record)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(PresentError::NotARecord {
                        index,
                        found: json_type_name(&other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Collection),
            other => Err(PresentError::UnsupportedModel {
                found: json_type_name(&other),
            }),
        }
    }

    /// Classify an optional JSON value; `None` is the absent model.
    pub fn from_option(value: Option<Value>) -> Result<Self, PresentError> {
        value.map_or(Ok(Self::Absent), Self::from_value)
    }

    /// Short shape name, used in trace events.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Single(_) => "single",
            Self::Collection(_) => "collection",
        }
    }
}

impl From<Record> for Model {
    fn from(record: Record) -> Self {
        Self::Single(record)
    }
}

impl From<Vec<Record>> for Model {
    fn from(records: Vec<Record>) -> Self {
        Self::Collection(records)
    }
}

impl From<Option<Record>> for Model {
    fn from(record: Option<Record>) -> Self {
        record.map_or(Self::Absent, Self::Single)
    }
}

/// Output of [`Presenter::present`](crate::Presenter::present), mirroring the
/// shape of the model it was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// The model was absent.
    Absent,
    /// The model was null.
    Null,
    /// One presented record.
    Single(Record),
    /// Presented records, in model order.
    Collection(Vec<Record>),
}

impl Presentation {
    /// Convert to a JSON value; `Absent` becomes `None`.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::Null => Some(Value::Null),
            Self::Single(record) => Some(Value::Object(record)),
            Self::Collection(records) => Some(Value::Array(
                records.into_iter().map(Value::Object).collect(),
            )),
        }
    }

    /// The presented record, if this is a single-record presentation.
    pub fn as_single(&self) -> Option<&Record> {
        match self {
            Self::Single(record) => Some(record),
            _ => None,
        }
    }

    /// The presented records, if this is a collection presentation.
    pub fn as_collection(&self) -> Option<&[Record]> {
        match self {
            Self::Collection(records) => Some(records),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
