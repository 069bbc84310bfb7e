//! Test utilities for parquet-metadata

#[cfg(test)]
pub mod test {
    use crate::{PrimitiveTypeName, Repetition, Schema, SchemaBuilder, SchemaNode};

    fn leaf(name: &str, repetition: Repetition, primitive_type: PrimitiveTypeName) -> SchemaNode {
        SchemaNode::primitive(name, repetition, primitive_type)
    }

    /// The "Document" schema from the Dremel paper
    pub fn paper_schema() -> Schema {
        use PrimitiveTypeName::{Binary, Int64};
        use Repetition::{Optional, Repeated, Required};

        let links = vec![
            leaf("Backward", Repeated, Int64),
            leaf("Forward", Repeated, Int64),
        ];
        let language = vec![
            leaf("Code", Required, Binary),
            leaf("Country", Optional, Binary),
        ];
        let name = vec![
            SchemaNode::group("Language", Repeated, language),
            leaf("Url", Optional, Binary),
        ];

        SchemaBuilder::new("Document")
            .field(leaf("DocId", Required, Int64))
            .field(SchemaNode::group("Links", Optional, links))
            .field(SchemaNode::group("Name", Repeated, name))
            .build()
            .unwrap()
    }

    /// Two DECIMAL(9, 2) columns, one variable and one fixed width
    pub fn decimal_schema() -> Schema {
        let binary = leaf(
            "aBinaryDecimal",
            Repetition::Required,
            PrimitiveTypeName::Binary,
        );
        let fixed = leaf(
            "aFixedDecimal",
            Repetition::Optional,
            PrimitiveTypeName::FixedLenByteArray,
        );

        SchemaBuilder::new("Message")
            .field(binary.with_decimal(9, 2))
            .field(fixed.with_length(4).with_decimal(9, 2))
            .build()
            .unwrap()
    }
}
