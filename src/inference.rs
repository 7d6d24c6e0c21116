//! Single-pass schema inference over one sample document.
//!
//! Walk a JSON value depth-first and record one [`Record`] per object shape,
//! keyed by a type name derived from the field (or array) that held it.
//!
//! Policy, in one place:
//! - Arrays are assumed homogeneous: only the first element is sampled
//!   ([`sample_element`]). Later elements are never inspected.
//! - Numbers are `f64` unless [`InferOptions::integers`] is set, in which case
//!   integral literals become `i64` (or `u64` above `i64::MAX`).
//! - `null` fields are dropped from the record and reported as a
//!   [`DiagnosticKind::NullField`] warning.
//! - Arrays with nothing to sample become `Vec<serde_json::Value>` and are
//!   reported as [`DiagnosticKind::UnknownElement`].
//! - Two different shapes deriving the same type name never overwrite each
//!   other; the later one gets a numeric suffix. Identical shapes share a name.
pub mod naming;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::ir::{Field, FieldType, Primitive, Record, SchemaTable};

// ------------------------------- Policy ---------------------------------- //

/// Root placeholder when the document is an object.
pub const OBJECT_ROOT_NAME: &str = "NewTypeRenameMe";
/// Root placeholder when the document is an array of objects.
pub const ARRAY_ROOT_NAME: &str = "ArrayInnerObjectRenameMe";

#[derive(Debug, Clone, Default)]
pub struct InferOptions {
    /// Overrides both root placeholders.
    pub root_type: Option<String>,
    /// Integral numbers become `i64` (`u64` when out of range) instead of `f64`.
    pub integers: bool,
}

// ------------------------------- Errors ---------------------------------- //

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InferError {
    #[error("root value is {0}; expected an object or an array of objects")]
    UnsupportedRoot(&'static str),
    #[error("root array is empty; there is no element to infer from")]
    EmptyRootArray,
    #[error("root array starts with {0}; expected an object")]
    UnsupportedRootElement(&'static str),
}

// ----------------------------- Diagnostics ------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Field was `null`, so it has no type and was left out.
    NullField,
    /// Array had no usable first element; typed as `serde_json::Value`.
    UnknownElement,
    /// A different record already owned the derived name.
    RenamedCollision { wanted: String, assigned: String },
    /// Two keys of one object normalize to the same identifier.
    RenamedField { wanted: String, assigned: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// JSON Pointer of the offending value in the sample document.
    pub path: String,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "/" } else { self.path.as_str() };
        match &self.kind {
            DiagnosticKind::NullField => write!(f, "{path}: null value, field omitted"),
            DiagnosticKind::UnknownElement => {
                write!(f, "{path}: no element to sample, typed as serde_json::Value")
            }
            DiagnosticKind::RenamedCollision { wanted, assigned } => {
                write!(f, "{path}: type name `{wanted}` already taken by a different shape, using `{assigned}`")
            }
            DiagnosticKind::RenamedField { wanted, assigned } => {
                write!(f, "{path}: field `{wanted}` already defined, using `{assigned}`")
            }
        }
    }
}

// ------------------------------ Inference -------------------------------- //

#[derive(Debug, Default)]
pub struct Inference {
    options: InferOptions,
    table: SchemaTable,
    diagnostics: Vec<Diagnostic>,
}

/// Finished inference pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inferred {
    pub root: String,
    pub table: SchemaTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Inference {
    pub fn new(options: InferOptions) -> Self {
        Inference { options, ..Self::default() }
    }

    /// Infer the whole document. The root must be an object or an array whose
    /// first element is an object.
    pub fn run(mut self, root: &Value) -> Result<Inferred, InferError> {
        let root_name = match root {
            Value::Object(map) => {
                let name = self.root_name(OBJECT_ROOT_NAME);
                self.infer_record(name, map, "")
            }
            Value::Array(xs) => match sample_element(xs) {
                None => return Err(InferError::EmptyRootArray),
                Some(Value::Object(map)) => {
                    let name = self.root_name(ARRAY_ROOT_NAME);
                    self.infer_record(name, map, "/0")
                }
                Some(other) => return Err(InferError::UnsupportedRootElement(kind_name(other))),
            },
            other => return Err(InferError::UnsupportedRoot(kind_name(other))),
        };
        debug_assert!(self.table.is_closed());
        log::debug!("inferred {} record(s), root `{root_name}`", self.table.len());
        Ok(Inferred {
            root: root_name,
            table: self.table,
            diagnostics: self.diagnostics,
        })
    }

    fn root_name(&self, placeholder: &str) -> String {
        let Some(wanted) = self.options.root_type.as_deref() else {
            return placeholder.to_string();
        };
        let name = naming::root_type_name(wanted);
        if name != wanted {
            log::warn!("root type `{wanted}` is not a valid type name, using `{name}`");
        }
        name
    }

    /// Build the record for `map`, registering nested records first, and
    /// return the name it was registered under.
    fn infer_record(&mut self, type_name: String, map: &Map<String, Value>, path: &str) -> String {
        let mut record = Record::new(type_name);
        for (key, value) in map {
            let field_path = format!("{path}/{}", escape_pointer(key));
            let Some(ty) = self.infer_field(key, value, &field_path) else {
                continue;
            };
            let ident = self.unique_ident(&record, key, &field_path);
            record.fields.insert(ident.clone(), Field { ident, key: key.clone(), ty });
        }
        self.register(record, path)
    }

    fn infer_field(&mut self, key: &str, value: &Value, path: &str) -> Option<FieldType> {
        match value {
            Value::Object(map) => Some(FieldType::Nested(self.infer_record(naming::type_name(key), map, path))),
            Value::Array(xs) => Some(FieldType::sequence(self.infer_element(key, xs, path))),
            Value::String(_) => Some(FieldType::Primitive(Primitive::Text)),
            Value::Number(n) => Some(FieldType::Primitive(self.number_type(n))),
            Value::Bool(_) => Some(FieldType::Primitive(Primitive::Bool)),
            Value::Null => {
                self.warn(path, DiagnosticKind::NullField);
                None
            }
        }
    }

    /// Element type of an array field, named after the field's key.
    fn infer_element(&mut self, key: &str, xs: &[Value], path: &str) -> FieldType {
        let element_path = format!("{path}/0");
        match sample_element(xs) {
            Some(Value::Object(map)) => FieldType::Nested(self.infer_record(naming::type_name(key), map, &element_path)),
            Some(Value::Array(inner)) => FieldType::sequence(self.infer_element(key, inner, &element_path)),
            Some(Value::String(_)) => FieldType::Primitive(Primitive::Text),
            Some(Value::Number(n)) => FieldType::Primitive(self.number_type(n)),
            Some(Value::Bool(_)) => FieldType::Primitive(Primitive::Bool),
            Some(Value::Null) | None => {
                self.warn(path, DiagnosticKind::UnknownElement);
                FieldType::Unknown
            }
        }
    }

    fn number_type(&self, n: &serde_json::Number) -> Primitive {
        if !self.options.integers {
            Primitive::Number
        } else if n.is_i64() {
            Primitive::Integer
        } else if n.is_u64() {
            Primitive::Unsigned
        } else {
            Primitive::Number
        }
    }

    fn unique_ident(&mut self, record: &Record, key: &str, path: &str) -> String {
        let wanted = naming::field_ident(key);
        if !record.fields.contains_key(&wanted) {
            return wanted;
        }
        let assigned = (2..)
            .map(|n| format!("{wanted}_{n}"))
            .find(|candidate| !record.fields.contains_key(candidate))
            .unwrap_or_default();
        self.warn(path, DiagnosticKind::RenamedField { wanted, assigned: assigned.clone() });
        assigned
    }

    /// Insert `record`, resolving name collisions. Returns the final name.
    fn register(&mut self, mut record: Record, path: &str) -> String {
        let wanted = record.name.clone();
        let mut n = 1;
        loop {
            match self.table.get(&record.name) {
                None => break,
                Some(existing) if existing.same_shape(&record) => return record.name,
                Some(_) => {
                    n += 1;
                    record.name = format!("{wanted}{n}");
                }
            }
        }
        if record.name != wanted {
            let assigned = record.name.clone();
            self.warn(path, DiagnosticKind::RenamedCollision { wanted, assigned });
        }
        let name = record.name.clone();
        self.table.insert(record);
        name
    }

    fn warn(&mut self, path: &str, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { path: path.to_string(), kind };
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// Convenience wrapper: infer with `options` in a fresh table.
pub fn infer(root: &Value, options: InferOptions) -> Result<Inferred, InferError> {
    Inference::new(options).run(root)
}

/// First-element sampling: the element an array's type is inferred from.
/// Arrays are assumed homogeneous, so the rest are ignored.
pub fn sample_element(xs: &[Value]) -> Option<&Value> {
    xs.first()
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// RFC 6901 reference token escaping.
fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
