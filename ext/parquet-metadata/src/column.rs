use crate::schema::{PrimitiveTypeName, Repetition, Schema, SchemaNode};

/// Describes one leaf column of a schema together with its Dremel levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Field names from the first level below the message down to the leaf
    pub path: Vec<String>,
    pub primitive_type: PrimitiveTypeName,
    pub type_length: Option<i32>,
    pub max_repetition_level: i16,
    pub max_definition_level: i16,
}

impl ColumnDescriptor {
    /// Dotted form of the path, e.g. `Name.Language.Code`
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

impl Schema {
    /// Leaf columns in schema order
    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        let mut columns = Vec::new();
        let mut path = Vec::new();
        for field in &self.fields {
            collect_columns(field, &mut path, 0, 0, &mut columns);
        }
        columns
    }
}

fn collect_columns(
    node: &SchemaNode,
    path: &mut Vec<String>,
    repetition_level: i16,
    definition_level: i16,
    columns: &mut Vec<ColumnDescriptor>,
) {
    let (repetition_level, definition_level) = match node.repetition() {
        Repetition::Required => (repetition_level, definition_level),
        Repetition::Optional => (repetition_level, definition_level + 1),
        Repetition::Repeated => (repetition_level + 1, definition_level + 1),
    };

    path.push(node.name().to_string());
    match node {
        SchemaNode::Primitive {
            primitive_type,
            type_length,
            ..
        } => columns.push(ColumnDescriptor {
            path: path.clone(),
            primitive_type: *primitive_type,
            type_length: *type_length,
            max_repetition_level: repetition_level,
            max_definition_level: definition_level,
        }),
        SchemaNode::Group { fields, .. } => {
            for field in fields {
                collect_columns(field, path, repetition_level, definition_level, columns);
            }
        }
    }
    path.pop();
}
