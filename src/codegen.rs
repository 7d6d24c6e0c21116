//! Render a [`SchemaTable`] as serde-annotated Rust structs.
use std::fmt::Write as _;

use crate::inference::naming::serde_camel_case;
use crate::ir::{Field, FieldType, Primitive, Record, SchemaTable};

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Start the output with `use serde::{Deserialize, Serialize};`.
    pub prelude: bool,
}

#[derive(Debug, Default)]
pub struct Codegen {
    options: EmitOptions,
    out: String,
}

impl Codegen {
    pub fn new(options: EmitOptions) -> Self {
        Codegen { options, out: String::new() }
    }

    /// Append every record of `table`, in table order.
    pub fn emit(&mut self, table: &SchemaTable) {
        if self.options.prelude {
            self.out.push_str("use serde::{Deserialize, Serialize};\n\n");
        }
        for record in table.records() {
            self.emit_record(record);
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_record(&mut self, record: &Record) {
        let out = &mut self.out;
        out.push_str("#[serde(rename_all = \"camelCase\")]\n");
        out.push_str("#[derive(Serialize, Deserialize, Debug)]\n");
        let _ = writeln!(out, "pub struct {} {{", record.name);
        for field in record.fields.values() {
            emit_field(out, field);
        }
        out.push_str("}\n\n");
    }
}

fn emit_field(out: &mut String, field: &Field) {
    // camelCase renaming must land back on the original key, otherwise pin it
    if serde_camel_case(&field.ident) != field.key {
        let _ = writeln!(out, "  #[serde(rename = {:?})]", field.key);
    }
    let _ = writeln!(out, "  pub {}: {},", field.ident, type_token(&field.ty));
}

/// Rust spelling of a field type.
pub fn type_token(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(Primitive::Text) => "String".to_string(),
        FieldType::Primitive(Primitive::Number) => "f64".to_string(),
        FieldType::Primitive(Primitive::Integer) => "i64".to_string(),
        FieldType::Primitive(Primitive::Unsigned) => "u64".to_string(),
        FieldType::Primitive(Primitive::Bool) => "bool".to_string(),
        FieldType::Nested(name) => name.clone(),
        FieldType::Sequence(item) => format!("Vec<{}>", type_token(item)),
        FieldType::Unknown => "serde_json::Value".to_string(),
    }
}

/// Convenience wrapper over [`Codegen`].
pub fn render(table: &SchemaTable, options: EmitOptions) -> String {
    let mut cg = Codegen::new(options);
    cg.emit(table);
    cg.into_string()
}
