//! Introspection traits over the logical schema model

pub mod schema;

pub use schema::SchemaInspector;
