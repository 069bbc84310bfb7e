//! Thin adapter over the thrift compact protocol
//!
//! The byte layout is owned entirely by `thrift` and the generated structs in
//! `parquet::format`; this module only wires a reader or writer to a protocol
//! instance and passes codec errors through as [`MetadataError::Decoding`].

use crate::{MetadataError, Result};
use parquet::format;
use parquet::thrift::TSerializable;
use std::io::{Read, Write};
use thrift::protocol::{
    TCompactInputProtocol, TCompactOutputProtocol, TInputProtocol, TListIdentifier,
    TOutputProtocol, TType,
};

/// Encode one thrift struct onto `writer`
pub fn write_thrift<T, W>(value: &T, writer: &mut W) -> Result<()>
where
    T: TSerializable,
    W: Write,
{
    let mut protocol = TCompactOutputProtocol::new(writer);
    value.write_to_out_protocol(&mut protocol)?;
    protocol.flush()?;
    Ok(())
}

/// Decode one thrift struct from `reader`, consuming only its bytes
pub fn read_thrift<T, R>(reader: &mut R) -> Result<T>
where
    T: TSerializable,
    R: Read,
{
    let mut protocol = TCompactInputProtocol::new(reader);
    Ok(T::read_from_in_protocol(&mut protocol)?)
}

/// Encode a flat schema as the `list<SchemaElement>` a file footer carries
pub fn write_schema_elements<W: Write>(
    elements: &[format::SchemaElement],
    writer: &mut W,
) -> Result<()> {
    let size = i32::try_from(elements.len()).map_err(|_| {
        MetadataError::invalid_schema(format!(
            "{} schema elements exceed the thrift list size limit",
            elements.len()
        ))
    })?;

    let mut protocol = TCompactOutputProtocol::new(writer);
    protocol.write_list_begin(&TListIdentifier::new(TType::Struct, size))?;
    for element in elements {
        element.write_to_out_protocol(&mut protocol)?;
    }
    protocol.write_list_end()?;
    protocol.flush()?;
    Ok(())
}

/// Decode a `list<SchemaElement>` written by [`write_schema_elements`]
pub fn read_schema_elements<R: Read>(reader: &mut R) -> Result<Vec<format::SchemaElement>> {
    let mut protocol = TCompactInputProtocol::new(reader);
    let list = protocol.read_list_begin()?;
    if list.element_type != TType::Struct {
        return Err(MetadataError::malformed_schema(format!(
            "Schema list holds {:?} elements instead of structs",
            list.element_type
        )));
    }
    let size = usize::try_from(list.size).map_err(|_| {
        MetadataError::malformed_schema(format!("Negative schema list size {}", list.size))
    })?;

    // The declared size is untrusted; let the vector grow as elements actually decode.
    let mut elements = Vec::with_capacity(size.min(1024));
    for _ in 0..size {
        elements.push(format::SchemaElement::read_from_in_protocol(&mut protocol)?);
    }
    protocol.read_list_end()?;
    Ok(elements)
}
