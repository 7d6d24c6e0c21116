//! Infer serde-ready Rust structs from a sample JSON document.
//!
//! Pipeline: [`loader`] → [`inference`] → [`codegen`].
pub mod cli;
pub mod codegen;
pub mod inference;
pub mod ir;
pub mod loader;

pub use codegen::{render, EmitOptions};
pub use inference::{infer, InferError, InferOptions, Inferred};
pub use ir::{Field, FieldType, Primitive, Record, SchemaTable};
