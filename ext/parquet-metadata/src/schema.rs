use crate::{MetadataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Logical Parquet schema rooted at a named message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<SchemaNode>,
}

/// Represents a non-root node in the logical schema tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaNode {
    /// A group of named child fields, possibly annotated (e.g. LIST or MAP wrappers)
    Group {
        name: String,
        repetition: Repetition,
        original_type: Option<OriginalType>,
        id: Option<i32>,
        fields: Vec<SchemaNode>,
    },
    /// A primitive/leaf column
    Primitive {
        name: String,
        repetition: Repetition,
        primitive_type: PrimitiveTypeName,
        type_length: Option<i32>,
        decimal: Option<DecimalMetadata>,
        original_type: Option<OriginalType>,
        id: Option<i32>,
    },
}

/// Physical storage types of Parquet leaf columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveTypeName {
    Int64,
    Int32,
    Boolean,
    Binary,
    Float,
    Double,
    Int96,
    FixedLenByteArray,
}

/// Represents how values are repeated in Parquet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Repetition {
    /// Field must have exactly one value
    Required,
    /// Field can have 0 or 1 value
    Optional,
    /// Field can have 0 or more values
    Repeated,
}

/// Logical type annotations layered on top of a primitive or group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginalType {
    Utf8,
    Map,
    MapKeyValue,
    List,
    Enum,
    Decimal,
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Json,
    Bson,
    Interval,
}

/// Precision and scale carried by DECIMAL-annotated leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecimalMetadata {
    pub precision: i32,
    pub scale: i32,
}

impl Schema {
    pub fn new<S: Into<String>>(name: S, fields: Vec<SchemaNode>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Check the structural invariants a writer relies on.
    ///
    /// Sibling names must be unique and non-empty, fixed-length leaves need a
    /// positive length (and only they may carry one), decimal metadata must
    /// accompany exactly the DECIMAL-annotated leaves, and LIST/MAP style
    /// annotations belong to groups while every other annotation belongs to leaves.
    pub fn validate(&self) -> Result<()> {
        validate_siblings(&self.fields, &self.name)
    }

    /// Deepest nesting below the message root; top-level fields sit at depth 1
    pub fn depth(&self) -> usize {
        let deepest = self.fields.iter().map(SchemaNode::depth).max();
        deepest.unwrap_or(0)
    }
}

fn validate_siblings(fields: &[SchemaNode], parent_path: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        let name = field.name();
        if name.is_empty() {
            return Err(MetadataError::invalid_schema(format!(
                "Field under '{parent_path}' has an empty name"
            )));
        }
        if !seen.insert(name) {
            return Err(MetadataError::invalid_schema(format!(
                "Duplicate field name '{name}' under '{parent_path}'"
            )));
        }
        let path = format!("{}.{}", parent_path, name);
        field.validate_node(&path)?;
    }
    Ok(())
}

impl SchemaNode {
    /// Create a leaf with no length, annotation or id
    pub fn primitive<S: Into<String>>(
        name: S,
        repetition: Repetition,
        primitive_type: PrimitiveTypeName,
    ) -> Self {
        SchemaNode::Primitive {
            name: name.into(),
            repetition,
            primitive_type,
            type_length: None,
            decimal: None,
            original_type: None,
            id: None,
        }
    }

    /// Create an unannotated group
    pub fn group<S: Into<String>>(
        name: S,
        repetition: Repetition,
        fields: Vec<SchemaNode>,
    ) -> Self {
        SchemaNode::Group {
            name: name.into(),
            repetition,
            original_type: None,
            id: None,
            fields,
        }
    }

    /// Set the byte width of a fixed-length leaf. Groups are returned unchanged.
    pub fn with_length(mut self, length: i32) -> Self {
        if let SchemaNode::Primitive { type_length, .. } = &mut self {
            *type_length = Some(length);
        }
        self
    }

    /// Annotate the leaf as DECIMAL(precision, scale). Groups are returned unchanged.
    pub fn with_decimal(mut self, precision: i32, scale: i32) -> Self {
        if let SchemaNode::Primitive {
            decimal,
            original_type,
            ..
        } = &mut self
        {
            *decimal = Some(DecimalMetadata { precision, scale });
            *original_type = Some(OriginalType::Decimal);
        }
        self
    }

    pub fn with_original_type(mut self, annotation: OriginalType) -> Self {
        match &mut self {
            SchemaNode::Group { original_type, .. }
            | SchemaNode::Primitive { original_type, .. } => {
                *original_type = Some(annotation);
            }
        }
        self
    }

    pub fn with_id(mut self, field_id: i32) -> Self {
        match &mut self {
            SchemaNode::Group { id, .. } | SchemaNode::Primitive { id, .. } => {
                *id = Some(field_id);
            }
        }
        self
    }

    /// Get the name of this schema node
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Group { name, .. } => name,
            SchemaNode::Primitive { name, .. } => name,
        }
    }

    pub fn repetition(&self) -> Repetition {
        match self {
            SchemaNode::Group { repetition, .. } => *repetition,
            SchemaNode::Primitive { repetition, .. } => *repetition,
        }
    }

    pub fn original_type(&self) -> Option<OriginalType> {
        match self {
            SchemaNode::Group { original_type, .. } => *original_type,
            SchemaNode::Primitive { original_type, .. } => *original_type,
        }
    }

    pub fn id(&self) -> Option<i32> {
        match self {
            SchemaNode::Group { id, .. } => *id,
            SchemaNode::Primitive { id, .. } => *id,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, SchemaNode::Primitive { .. })
    }

    /// Levels from this node down to its deepest descendant, counting itself
    pub fn depth(&self) -> usize {
        let deepest = self.fields().iter().map(SchemaNode::depth).max();
        1 + deepest.unwrap_or(0)
    }

    /// Direct children of a group; leaves have none
    pub fn fields(&self) -> &[SchemaNode] {
        match self {
            SchemaNode::Group { fields, .. } => fields,
            SchemaNode::Primitive { .. } => &[],
        }
    }

    fn validate_node(&self, path: &str) -> Result<()> {
        if let Some(annotation) = self.original_type() {
            if annotation.is_group_annotation() == self.is_primitive() {
                let kind = if self.is_primitive() { "leaf" } else { "group" };
                return Err(MetadataError::invalid_schema(format!(
                    "'{path}' is a {kind} and cannot be annotated {annotation:?}"
                )));
            }
        }

        match self {
            SchemaNode::Group { fields, .. } => validate_siblings(fields, path),
            SchemaNode::Primitive {
                primitive_type,
                type_length,
                decimal,
                original_type,
                ..
            } => {
                validate_length(path, *primitive_type, *type_length)?;
                let is_decimal = *original_type == Some(OriginalType::Decimal);
                validate_decimal(path, is_decimal, *decimal)
            }
        }
    }
}

fn validate_length(
    path: &str,
    primitive_type: PrimitiveTypeName,
    length: Option<i32>,
) -> Result<()> {
    let is_fixed = primitive_type == PrimitiveTypeName::FixedLenByteArray;
    if is_fixed && !length.is_some_and(|len| len > 0) {
        return Err(MetadataError::invalid_schema(format!(
            "'{path}' is FIXED_LEN_BYTE_ARRAY but has no positive length"
        )));
    }
    if !is_fixed && length.is_some() {
        let type_name = primitive_type.type_name();
        return Err(MetadataError::invalid_schema(format!(
            "'{path}' is {type_name} and cannot carry a type length"
        )));
    }
    Ok(())
}

fn validate_decimal(path: &str, is_decimal: bool, decimal: Option<DecimalMetadata>) -> Result<()> {
    let Some(DecimalMetadata { precision, scale }) = decimal else {
        if is_decimal {
            return Err(MetadataError::invalid_schema(format!(
                "'{path}' is annotated DECIMAL without precision and scale"
            )));
        }
        return Ok(());
    };

    if !is_decimal {
        return Err(MetadataError::invalid_schema(format!(
            "'{path}' has precision {precision} and scale {scale} but is not annotated DECIMAL"
        )));
    }
    if precision < 1 {
        return Err(MetadataError::invalid_schema(format!(
            "'{path}' has invalid decimal precision {precision}"
        )));
    }
    if !(0..=precision).contains(&scale) {
        return Err(MetadataError::invalid_schema(format!(
            "'{path}' has decimal scale {scale} outside 0..={precision}"
        )));
    }
    Ok(())
}

impl OriginalType {
    /// Annotations that wrap a group rather than describe a leaf value
    pub fn is_group_annotation(&self) -> bool {
        matches!(
            self,
            OriginalType::Map | OriginalType::MapKeyValue | OriginalType::List
        )
    }
}

impl PrimitiveTypeName {
    /// Get the physical type name for display
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveTypeName::Int64 => "INT64",
            PrimitiveTypeName::Int32 => "INT32",
            PrimitiveTypeName::Boolean => "BOOLEAN",
            PrimitiveTypeName::Binary => "BINARY",
            PrimitiveTypeName::Float => "FLOAT",
            PrimitiveTypeName::Double => "DOUBLE",
            PrimitiveTypeName::Int96 => "INT96",
            PrimitiveTypeName::FixedLenByteArray => "FIXED_LEN_BYTE_ARRAY",
        }
    }
}

/// Builder for creating validated schemas
pub struct SchemaBuilder {
    name: String,
    fields: Vec<SchemaNode>,
}

impl SchemaBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: SchemaNode) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields<I: IntoIterator<Item = SchemaNode>>(mut self, fields: I) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn build(self) -> Result<Schema> {
        let schema = Schema::new(self.name, self.fields);
        schema.validate()?;
        Ok(schema)
    }
}
