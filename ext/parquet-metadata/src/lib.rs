//! Conversion between logical Parquet metadata and its thrift wire form
//!
//! `parquet-metadata` translates the tree-shaped schema model used by readers
//! and writers into the flat, pre-order list of `SchemaElement`s persisted in
//! a file footer, and back again. It also owns the mapping tables between
//! logical enumerations and their thrift counterparts, and a small adapter
//! for encoding page headers.
//!
//! # Key Components
//!
//! - **Schema**: Tree-shaped logical schema
//!   - A named message root over [`SchemaNode`] groups and primitives
//!   - Validation through [`SchemaBuilder`] and [`Schema::validate`]
//!   - Column descriptors with Dremel repetition/definition levels
//!
//! - **Mapping**: Exhaustive enum bijections through the [`WireEnum`] trait
//!   - Repetition, primitive type, encoding, converted type and page type
//!   - Unknown wire values fail with [`MetadataError::UnmappedEnumerator`]
//!
//! - **Converter**: [`MetadataConverter`]
//!   - Flattens schemas to `parquet::format::SchemaElement` lists
//!   - Rebuilds schemas with a single forward cursor, rejecting malformed input
//!   - Reads and writes page headers, schema lists and key/value metadata
//!
//! - **Codec**: Thrift compact protocol glue in [`codec`]
//!
//! # Example Usage
//!
//! ```
//! use parquet_metadata::{
//!     MetadataConverter, PageHeader, PageType, PrimitiveTypeName, Repetition, SchemaBuilder,
//!     SchemaNode,
//! };
//!
//! let schema = SchemaBuilder::new("Message")
//!     .field(SchemaNode::primitive("id", Repetition::Required, PrimitiveTypeName::Int64))
//!     .build()
//!     .unwrap();
//!
//! let converter = MetadataConverter::new();
//! let elements = converter.to_parquet_schema(&schema).unwrap();
//! assert_eq!(converter.from_parquet_schema(&elements).unwrap(), schema);
//!
//! let header = PageHeader::new(PageType::DataPage, 20, 10);
//! let bytes = converter.write_page_header(&header).unwrap();
//! assert_eq!(converter.read_page_header(&bytes).unwrap(), header);
//! ```

pub mod codec;
pub mod column;
pub mod converter;
pub mod error;
pub mod mapping;
pub mod page;
pub mod schema;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use column::ColumnDescriptor;
pub use converter::{MetadataConverter, MetadataConverterBuilder};
pub use error::{MetadataError, Result};
pub use mapping::{from_format_encodings, to_format_encodings, WireEnum};
pub use page::{Encoding, PageHeader, PageType};
pub use schema::{
    DecimalMetadata, OriginalType, PrimitiveTypeName, Repetition, Schema, SchemaBuilder,
    SchemaNode,
};
pub use traits::SchemaInspector;
