use crate::{Schema, SchemaNode};

/// Trait for schema introspection
///
/// This trait provides methods for examining and querying schemas
/// without modifying them.
pub trait SchemaInspector {
    /// Get the total number of nodes, counting the message root
    fn field_count(&self) -> usize;

    /// Get field by path (e.g., "Name.Language.Code")
    fn get_field_by_path(&self, path: &str) -> Option<&SchemaNode>;

    /// Check if schema contains a specific field
    fn has_field(&self, name: &str) -> bool;

    /// Get all field paths in the schema, in pre-order
    fn all_field_paths(&self) -> Vec<String>;
}

impl SchemaInspector for Schema {
    fn field_count(&self) -> usize {
        1 + self.fields.iter().map(count_fields).sum::<usize>()
    }

    fn get_field_by_path(&self, path: &str) -> Option<&SchemaNode> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut node = self.fields.iter().find(|f| f.name() == first)?;
        for part in parts {
            node = node.fields().iter().find(|f| f.name() == part)?;
        }
        Some(node)
    }

    fn has_field(&self, name: &str) -> bool {
        self.get_field_by_path(name).is_some()
    }

    fn all_field_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for field in &self.fields {
            collect_field_paths(field, "", &mut paths);
        }
        paths
    }
}

// Helper functions for schema inspection
fn count_fields(node: &SchemaNode) -> usize {
    1 + node.fields().iter().map(count_fields).sum::<usize>()
}

fn collect_field_paths(node: &SchemaNode, prefix: &str, paths: &mut Vec<String>) {
    let current_path = if prefix.is_empty() {
        node.name().to_string()
    } else {
        format!("{}.{}", prefix, node.name())
    };

    paths.push(current_path.clone());

    for field in node.fields() {
        collect_field_paths(field, &current_path, paths);
    }
}
