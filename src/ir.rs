// Strongly-typed schema table for codegen. No serde_json::Value here.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Primitive {
    Bool,
    Number,   // f64, whatever the source literal looked like
    Integer,  // i64, only produced when integer inference is enabled
    Unsigned, // u64, integers above i64::MAX under the same option
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Primitive(Primitive),
    Nested(String),          // name of a record in the same table
    Sequence(Box<FieldType>),
    Unknown,                 // no sample to infer from (empty array, null element)
}

impl FieldType {
    pub fn sequence(item: FieldType) -> Self {
        FieldType::Sequence(Box::new(item))
    }

    /// Innermost record name, looking through any number of `Sequence` layers.
    pub fn record_name(&self) -> Option<&str> {
        match self {
            FieldType::Nested(name) => Some(name),
            FieldType::Sequence(item) => item.record_name(),
            FieldType::Primitive(_) | FieldType::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub ident: String, // Rust identifier, possibly raw (`r#type`)
    pub key: String,   // original JSON key
    pub ty: FieldType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    /// Keyed by `Field::ident`, in document order.
    pub fields: IndexMap<String, Field>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Record { name: name.into(), fields: IndexMap::new() }
    }

    /// Same fields in the same order; the record name is not compared.
    pub fn same_shape(&self, other: &Record) -> bool {
        self.fields.len() == other.fields.len()
            && self.fields.values().zip(other.fields.values()).all(|(a, b)| a == b)
    }
}

/// Name → record, iterated in insertion order (children before parents).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaTable {
    records: IndexMap<String, Record>,
}

impl SchemaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Callers are expected to have resolved collisions already; an existing
    /// entry under the same name is replaced in place.
    pub(crate) fn insert(&mut self, record: Record) {
        self.records.insert(record.name.clone(), record);
    }

    /// Every `Nested` reference points at a record in this table.
    pub fn is_closed(&self) -> bool {
        self.records()
            .flat_map(|r| r.fields.values())
            .filter_map(|f| f.ty.record_name())
            .all(|name| self.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(ident: &str, ty: FieldType) -> Field {
        Field { ident: ident.to_string(), key: ident.to_string(), ty }
    }

    #[test]
    fn record_name_sees_through_sequences() {
        let ty = FieldType::sequence(FieldType::sequence(FieldType::Nested("Row".into())));
        assert_eq!(ty.record_name(), Some("Row"));
        assert_eq!(FieldType::Primitive(Primitive::Text).record_name(), None);
        assert_eq!(FieldType::sequence(FieldType::Unknown).record_name(), None);
    }

    #[test]
    fn same_shape_is_order_sensitive() {
        let mut a = Record::new("A");
        a.fields.insert("x".into(), field("x", FieldType::Primitive(Primitive::Bool)));
        a.fields.insert("y".into(), field("y", FieldType::Primitive(Primitive::Text)));

        let mut b = Record::new("B");
        b.fields.insert("y".into(), field("y", FieldType::Primitive(Primitive::Text)));
        b.fields.insert("x".into(), field("x", FieldType::Primitive(Primitive::Bool)));

        assert!(!a.same_shape(&b));
        let mut c = a.clone();
        c.name = "C".into();
        assert!(a.same_shape(&c));
    }

    #[test]
    fn dangling_reference_is_not_closed() {
        let mut table = SchemaTable::new();
        let mut root = Record::new("Root");
        root.fields.insert("ask".into(), field("ask", FieldType::Nested("Ask".into())));
        table.insert(root);
        assert!(!table.is_closed());

        table.insert(Record::new("Ask"));
        assert!(table.is_closed());
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Root", "Ask"]);
    }
}
