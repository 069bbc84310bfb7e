//! Conversion between the logical schema model and Parquet's thrift metadata

use crate::codec;
use crate::mapping::WireEnum;
use crate::page::PageHeader;
use crate::schema::{
    DecimalMetadata, OriginalType, PrimitiveTypeName, Repetition, Schema, SchemaNode,
};
use crate::traits::SchemaInspector;
use crate::{MetadataError, Result};
use bytes::Bytes;
use indexmap::IndexMap;
use log::{debug, trace, warn};
use parquet::format;
use std::io::{Read, Write};

// Default configuration constants
const DEFAULT_MAX_SCHEMA_DEPTH: usize = 128;
const DEFAULT_MAX_PAGE_HEADER_SIZE: u64 = 16 * 1024 * 1024; // 16MB

/// Builder for creating a configured MetadataConverter
#[derive(Debug, Clone)]
pub struct MetadataConverterBuilder {
    max_schema_depth: usize,
    max_page_header_size: u64,
    validate_on_write: bool,
}

impl Default for MetadataConverterBuilder {
    fn default() -> Self {
        Self {
            max_schema_depth: DEFAULT_MAX_SCHEMA_DEPTH,
            max_page_header_size: DEFAULT_MAX_PAGE_HEADER_SIZE,
            validate_on_write: true,
        }
    }
}

impl MetadataConverterBuilder {
    /// Create a new MetadataConverterBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deepest nesting below the message root accepted in either direction
    pub fn with_max_schema_depth(mut self, depth: usize) -> Self {
        self.max_schema_depth = depth;
        self
    }

    /// Set the most bytes a single page header may occupy in a stream
    pub fn with_max_page_header_size(mut self, size: u64) -> Self {
        self.max_page_header_size = size;
        self
    }

    /// Toggle validation of logical schemas before they are flattened
    pub fn with_validate_on_write(mut self, validate: bool) -> Self {
        self.validate_on_write = validate;
        self
    }

    pub fn build(self) -> MetadataConverter {
        MetadataConverter {
            max_schema_depth: self.max_schema_depth,
            max_page_header_size: self.max_page_header_size,
            validate_on_write: self.validate_on_write,
        }
    }
}

/// Stateless converter between logical metadata and its thrift representation.
///
/// Holds only immutable options, so one instance can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct MetadataConverter {
    max_schema_depth: usize,
    max_page_header_size: u64,
    validate_on_write: bool,
}

impl Default for MetadataConverter {
    fn default() -> Self {
        MetadataConverterBuilder::default().build()
    }
}

impl MetadataConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> MetadataConverterBuilder {
        MetadataConverterBuilder::new()
    }

    /// Flatten a logical schema into the pre-order element list stored in a footer.
    ///
    /// The first element is the message root carrying only its name and child
    /// count; every other node follows its parent, children in declared order.
    pub fn to_parquet_schema(&self, schema: &Schema) -> Result<Vec<format::SchemaElement>> {
        let name = &schema.name;
        let depth = schema.depth();
        if depth > self.max_schema_depth {
            let max = self.max_schema_depth;
            return Err(MetadataError::invalid_schema(format!(
                "Schema '{name}' nests {depth} levels, beyond the maximum schema depth of {max}"
            )));
        }
        if self.validate_on_write {
            schema.validate()?;
        }

        let mut elements = Vec::with_capacity(schema.field_count());
        let mut root = new_element(name);
        root.num_children = Some(child_count_to_wire(name, schema.fields.len())?);
        elements.push(root);

        for field in &schema.fields {
            add_to_list(&mut elements, field)?;
        }

        let count = elements.len();
        debug!("Flattened schema '{name}' into {count} elements");
        Ok(elements)
    }

    /// Rebuild a logical schema from its flat element list.
    ///
    /// Elements are consumed strictly front to back; any disagreement between
    /// declared child counts and the elements actually present is reported as
    /// [`MetadataError::MalformedSchema`], as is a rebuilt tree that breaks the
    /// rules of [`Schema::validate`].
    pub fn from_parquet_schema(&self, elements: &[format::SchemaElement]) -> Result<Schema> {
        let mut cursor = SchemaCursor::new(elements);
        let root = cursor
            .next_element()
            .ok_or_else(|| MetadataError::malformed_schema("Schema has no root element"))?;
        let name = &root.name;
        let num_children = child_count_from_wire(root)?;

        let fields = self.build_children(&mut cursor, root, num_children, 1)?;

        let remaining = cursor.remaining();
        if remaining > 0 {
            return Err(MetadataError::malformed_schema(format!(
                "{remaining} elements remain after the {num_children} children declared by '{name}'"
            )));
        }

        let schema = Schema::new(name.clone(), fields);
        schema.validate().map_err(|err| match err {
            MetadataError::InvalidSchema(message) => MetadataError::MalformedSchema(message),
            other => other,
        })?;

        let count = elements.len();
        debug!("Rebuilt schema '{name}' from {count} elements");
        Ok(schema)
    }

    fn build_children(
        &self,
        cursor: &mut SchemaCursor<'_>,
        parent: &format::SchemaElement,
        count: usize,
        depth: usize,
    ) -> Result<Vec<SchemaNode>> {
        let name = &parent.name;
        if count > 0 && depth > self.max_schema_depth {
            let max = self.max_schema_depth;
            return Err(MetadataError::malformed_schema(format!(
                "Children of '{name}' exceed the maximum schema depth of {max}"
            )));
        }

        // Never trust a declared count beyond what the input can still supply
        let mut fields = Vec::with_capacity(count.min(cursor.remaining()));
        for found in 0..count {
            let element = cursor.next_element().ok_or_else(|| {
                MetadataError::malformed_schema(format!(
                    "'{name}' declares {count} children but the schema ends after {found}"
                ))
            })?;
            fields.push(self.build_node(cursor, element, depth)?);
        }
        Ok(fields)
    }

    fn build_node(
        &self,
        cursor: &mut SchemaCursor<'_>,
        element: &format::SchemaElement,
        depth: usize,
    ) -> Result<SchemaNode> {
        let name = &element.name;
        trace!("Building schema element '{name}' at depth {depth}");

        let repetition = element.repetition_type.ok_or_else(|| {
            MetadataError::malformed_schema(format!("Element '{name}' has no repetition type"))
        })?;
        let repetition = Repetition::from_wire(repetition)?;
        let original_type = element
            .converted_type
            .map(OriginalType::from_wire)
            .transpose()?;
        let num_children = child_count_from_wire(element)?;

        if num_children > 0 {
            let fields = self.build_children(cursor, element, num_children, depth + 1)?;
            return Ok(SchemaNode::Group {
                name: element.name.clone(),
                repetition,
                original_type,
                id: element.field_id,
                fields,
            });
        }

        match element.type_ {
            Some(wire_type) => Ok(SchemaNode::Primitive {
                name: element.name.clone(),
                repetition,
                primitive_type: PrimitiveTypeName::from_wire(wire_type)?,
                type_length: element.type_length,
                decimal: decimal_from_wire(element, original_type),
                original_type,
                id: element.field_id,
            }),
            None => Ok(SchemaNode::Group {
                name: element.name.clone(),
                repetition,
                original_type,
                id: element.field_id,
                fields: Vec::new(),
            }),
        }
    }

    /// Flatten a schema and encode it as a thrift `list<SchemaElement>`
    pub fn write_schema(&self, schema: &Schema) -> Result<Bytes> {
        let elements = self.to_parquet_schema(schema)?;
        let mut buffer = Vec::new();
        codec::write_schema_elements(&elements, &mut buffer)?;
        Ok(Bytes::from(buffer))
    }

    /// Decode a thrift `list<SchemaElement>` and rebuild the schema tree
    pub fn read_schema(&self, bytes: &[u8]) -> Result<Schema> {
        let mut reader = bytes;
        let elements = codec::read_schema_elements(&mut reader)?;
        self.from_parquet_schema(&elements)
    }

    /// Encode a page header into a standalone buffer
    pub fn write_page_header(&self, header: &PageHeader) -> Result<Bytes> {
        let mut buffer = Vec::new();
        self.write_page_header_to(header, &mut buffer)?;
        Ok(Bytes::from(buffer))
    }

    /// Encode a page header onto a stream, typically just ahead of the page payload
    pub fn write_page_header_to<W: Write>(
        &self,
        header: &PageHeader,
        writer: &mut W,
    ) -> Result<()> {
        header.validate()?;
        codec::write_thrift(&header.to_thrift(), writer)?;
        debug!(
            "Wrote {:?} header ({} bytes uncompressed, {} compressed)",
            header.page_type, header.uncompressed_page_size, header.compressed_page_size
        );
        Ok(())
    }

    /// Decode the page header at the start of `bytes`; trailing bytes are ignored
    pub fn read_page_header(&self, bytes: &[u8]) -> Result<PageHeader> {
        let mut reader = bytes;
        self.read_page_header_from(&mut reader)
    }

    /// Decode exactly one page header from a stream, leaving it positioned at the payload
    pub fn read_page_header_from<R: Read>(&self, reader: &mut R) -> Result<PageHeader> {
        let mut limited = reader.take(self.max_page_header_size);
        let wire: format::PageHeader = codec::read_thrift(&mut limited)?;
        let header = PageHeader::try_from(&wire)?;
        debug!(
            "Read {:?} header ({} bytes uncompressed, {} compressed)",
            header.page_type, header.uncompressed_page_size, header.compressed_page_size
        );
        Ok(header)
    }

    /// Convert footer key/value metadata to its wire form, preserving insertion order
    pub fn to_key_value_metadata(
        &self,
        metadata: &IndexMap<String, Option<String>>,
    ) -> Vec<format::KeyValue> {
        metadata
            .iter()
            .map(|(key, value)| format::KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }

    /// Convert wire key/value metadata back to a map; later duplicates win
    pub fn from_key_value_metadata(
        &self,
        key_values: &[format::KeyValue],
    ) -> IndexMap<String, Option<String>> {
        let mut metadata = IndexMap::with_capacity(key_values.len());
        for kv in key_values {
            if metadata.insert(kv.key.clone(), kv.value.clone()).is_some() {
                let key = &kv.key;
                warn!("Duplicate key '{key}' in key/value metadata, keeping the last value");
            }
        }
        metadata
    }
}

/// Forward-only cursor over a flat schema element sequence
struct SchemaCursor<'a> {
    elements: std::slice::Iter<'a, format::SchemaElement>,
}

impl<'a> SchemaCursor<'a> {
    fn new(elements: &'a [format::SchemaElement]) -> Self {
        Self {
            elements: elements.iter(),
        }
    }

    fn next_element(&mut self) -> Option<&'a format::SchemaElement> {
        self.elements.next()
    }

    fn remaining(&self) -> usize {
        self.elements.len()
    }
}

fn add_to_list(elements: &mut Vec<format::SchemaElement>, node: &SchemaNode) -> Result<()> {
    match node {
        SchemaNode::Primitive {
            name,
            repetition,
            primitive_type,
            type_length,
            decimal,
            original_type,
            id,
        } => {
            let mut element = new_element(name);
            element.repetition_type = Some(repetition.to_wire());
            element.type_ = Some(primitive_type.to_wire());
            element.type_length = *type_length;
            element.field_id = *id;
            if let Some(annotation) = original_type {
                element.converted_type = Some(annotation.to_wire());
                if let (OriginalType::Decimal, Some(meta)) = (annotation, decimal) {
                    element.precision = Some(meta.precision);
                    element.scale = Some(meta.scale);
                }
            }
            elements.push(element);
            Ok(())
        }
        SchemaNode::Group {
            name,
            repetition,
            original_type,
            id,
            fields,
        } => {
            let mut element = new_element(name);
            element.repetition_type = Some(repetition.to_wire());
            element.converted_type = original_type.map(|annotation| annotation.to_wire());
            element.field_id = *id;
            element.num_children = Some(child_count_to_wire(name, fields.len())?);
            elements.push(element);

            for field in fields {
                add_to_list(elements, field)?;
            }
            Ok(())
        }
    }
}

fn new_element(name: &str) -> format::SchemaElement {
    format::SchemaElement {
        type_: None,
        type_length: None,
        repetition_type: None,
        name: name.to_string(),
        num_children: None,
        converted_type: None,
        scale: None,
        precision: None,
        field_id: None,
        logical_type: None,
    }
}

/// Precision and scale only mean something next to a DECIMAL annotation
fn decimal_from_wire(
    element: &format::SchemaElement,
    original_type: Option<OriginalType>,
) -> Option<DecimalMetadata> {
    if original_type != Some(OriginalType::Decimal) {
        return None;
    }
    element.precision.map(|precision| DecimalMetadata {
        precision,
        scale: element.scale.unwrap_or(0),
    })
}

fn child_count_to_wire(name: &str, count: usize) -> Result<i32> {
    i32::try_from(count).map_err(|_| {
        MetadataError::invalid_schema(format!(
            "'{name}' has {count} children, more than a schema element can declare"
        ))
    })
}

fn child_count_from_wire(element: &format::SchemaElement) -> Result<usize> {
    let name = &element.name;
    match element.num_children {
        None => Ok(0),
        Some(count) => usize::try_from(count).map_err(|_| {
            MetadataError::malformed_schema(format!(
                "Element '{name}' declares a negative child count {count}"
            ))
        }),
    }
}
