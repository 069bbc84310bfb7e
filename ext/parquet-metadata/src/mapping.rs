//! Bijective mappings between logical enumerations and their thrift wire forms
//!
//! Every logical enum maps to the wire through an exhaustive `match`, so adding
//! a logical variant without a wire counterpart fails to compile. The reverse
//! direction ends in a catch-all arm because thrift enums are open `i32`
//! newtypes; values outside the known set become
//! [`MetadataError::UnmappedEnumerator`].

use crate::page::{Encoding, PageType};
use crate::schema::{OriginalType, PrimitiveTypeName, Repetition};
use crate::{MetadataError, Result};
use parquet::format;
use std::collections::BTreeSet;

/// A closed logical enumeration with a one-to-one wire counterpart
pub trait WireEnum: Sized + Copy + 'static {
    /// The thrift-generated wire enumeration
    type Wire: Copy;

    /// Name used when reporting unmapped wire values
    const FAMILY: &'static str;

    /// Every logical enumerator, in declaration order
    const ALL: &'static [Self];

    fn to_wire(self) -> Self::Wire;

    fn from_wire(wire: Self::Wire) -> Result<Self>;
}

impl WireEnum for Repetition {
    type Wire = format::FieldRepetitionType;
    const FAMILY: &'static str = "FieldRepetitionType";
    const ALL: &'static [Self] = &[
        Repetition::Required,
        Repetition::Optional,
        Repetition::Repeated,
    ];

    fn to_wire(self) -> Self::Wire {
        match self {
            Repetition::Required => format::FieldRepetitionType::REQUIRED,
            Repetition::Optional => format::FieldRepetitionType::OPTIONAL,
            Repetition::Repeated => format::FieldRepetitionType::REPEATED,
        }
    }

    fn from_wire(wire: Self::Wire) -> Result<Self> {
        match wire {
            format::FieldRepetitionType::REQUIRED => Ok(Repetition::Required),
            format::FieldRepetitionType::OPTIONAL => Ok(Repetition::Optional),
            format::FieldRepetitionType::REPEATED => Ok(Repetition::Repeated),
            other => Err(MetadataError::unmapped(Self::FAMILY, other.0)),
        }
    }
}

impl WireEnum for PrimitiveTypeName {
    type Wire = format::Type;
    const FAMILY: &'static str = "Type";
    const ALL: &'static [Self] = &[
        PrimitiveTypeName::Int64,
        PrimitiveTypeName::Int32,
        PrimitiveTypeName::Boolean,
        PrimitiveTypeName::Binary,
        PrimitiveTypeName::Float,
        PrimitiveTypeName::Double,
        PrimitiveTypeName::Int96,
        PrimitiveTypeName::FixedLenByteArray,
    ];

    fn to_wire(self) -> Self::Wire {
        match self {
            PrimitiveTypeName::Int64 => format::Type::INT64,
            PrimitiveTypeName::Int32 => format::Type::INT32,
            PrimitiveTypeName::Boolean => format::Type::BOOLEAN,
            PrimitiveTypeName::Binary => format::Type::BYTE_ARRAY,
            PrimitiveTypeName::Float => format::Type::FLOAT,
            PrimitiveTypeName::Double => format::Type::DOUBLE,
            PrimitiveTypeName::Int96 => format::Type::INT96,
            PrimitiveTypeName::FixedLenByteArray => format::Type::FIXED_LEN_BYTE_ARRAY,
        }
    }

    fn from_wire(wire: Self::Wire) -> Result<Self> {
        match wire {
            format::Type::INT64 => Ok(PrimitiveTypeName::Int64),
            format::Type::INT32 => Ok(PrimitiveTypeName::Int32),
            format::Type::BOOLEAN => Ok(PrimitiveTypeName::Boolean),
            format::Type::BYTE_ARRAY => Ok(PrimitiveTypeName::Binary),
            format::Type::FLOAT => Ok(PrimitiveTypeName::Float),
            format::Type::DOUBLE => Ok(PrimitiveTypeName::Double),
            format::Type::INT96 => Ok(PrimitiveTypeName::Int96),
            format::Type::FIXED_LEN_BYTE_ARRAY => Ok(PrimitiveTypeName::FixedLenByteArray),
            other => Err(MetadataError::unmapped(Self::FAMILY, other.0)),
        }
    }
}

impl WireEnum for Encoding {
    type Wire = format::Encoding;
    const FAMILY: &'static str = "Encoding";
    const ALL: &'static [Self] = &[
        Encoding::Plain,
        Encoding::PlainDictionary,
        Encoding::Rle,
        Encoding::BitPacked,
        Encoding::DeltaBinaryPacked,
        Encoding::DeltaLengthByteArray,
        Encoding::DeltaByteArray,
        Encoding::RleDictionary,
        Encoding::ByteStreamSplit,
    ];

    fn to_wire(self) -> Self::Wire {
        match self {
            Encoding::Plain => format::Encoding::PLAIN,
            Encoding::PlainDictionary => format::Encoding::PLAIN_DICTIONARY,
            Encoding::Rle => format::Encoding::RLE,
            Encoding::BitPacked => format::Encoding::BIT_PACKED,
            Encoding::DeltaBinaryPacked => format::Encoding::DELTA_BINARY_PACKED,
            Encoding::DeltaLengthByteArray => format::Encoding::DELTA_LENGTH_BYTE_ARRAY,
            Encoding::DeltaByteArray => format::Encoding::DELTA_BYTE_ARRAY,
            Encoding::RleDictionary => format::Encoding::RLE_DICTIONARY,
            Encoding::ByteStreamSplit => format::Encoding::BYTE_STREAM_SPLIT,
        }
    }

    fn from_wire(wire: Self::Wire) -> Result<Self> {
        match wire {
            format::Encoding::PLAIN => Ok(Encoding::Plain),
            format::Encoding::PLAIN_DICTIONARY => Ok(Encoding::PlainDictionary),
            format::Encoding::RLE => Ok(Encoding::Rle),
            format::Encoding::BIT_PACKED => Ok(Encoding::BitPacked),
            format::Encoding::DELTA_BINARY_PACKED => Ok(Encoding::DeltaBinaryPacked),
            format::Encoding::DELTA_LENGTH_BYTE_ARRAY => Ok(Encoding::DeltaLengthByteArray),
            format::Encoding::DELTA_BYTE_ARRAY => Ok(Encoding::DeltaByteArray),
            format::Encoding::RLE_DICTIONARY => Ok(Encoding::RleDictionary),
            format::Encoding::BYTE_STREAM_SPLIT => Ok(Encoding::ByteStreamSplit),
            other => Err(MetadataError::unmapped(Self::FAMILY, other.0)),
        }
    }
}

impl WireEnum for OriginalType {
    type Wire = format::ConvertedType;
    const FAMILY: &'static str = "ConvertedType";
    const ALL: &'static [Self] = &[
        OriginalType::Utf8,
        OriginalType::Map,
        OriginalType::MapKeyValue,
        OriginalType::List,
        OriginalType::Enum,
        OriginalType::Decimal,
        OriginalType::Date,
        OriginalType::TimeMillis,
        OriginalType::TimeMicros,
        OriginalType::TimestampMillis,
        OriginalType::TimestampMicros,
        OriginalType::Uint8,
        OriginalType::Uint16,
        OriginalType::Uint32,
        OriginalType::Uint64,
        OriginalType::Int8,
        OriginalType::Int16,
        OriginalType::Int32,
        OriginalType::Int64,
        OriginalType::Json,
        OriginalType::Bson,
        OriginalType::Interval,
    ];

    fn to_wire(self) -> Self::Wire {
        match self {
            OriginalType::Utf8 => format::ConvertedType::UTF8,
            OriginalType::Map => format::ConvertedType::MAP,
            OriginalType::MapKeyValue => format::ConvertedType::MAP_KEY_VALUE,
            OriginalType::List => format::ConvertedType::LIST,
            OriginalType::Enum => format::ConvertedType::ENUM,
            OriginalType::Decimal => format::ConvertedType::DECIMAL,
            OriginalType::Date => format::ConvertedType::DATE,
            OriginalType::TimeMillis => format::ConvertedType::TIME_MILLIS,
            OriginalType::TimeMicros => format::ConvertedType::TIME_MICROS,
            OriginalType::TimestampMillis => format::ConvertedType::TIMESTAMP_MILLIS,
            OriginalType::TimestampMicros => format::ConvertedType::TIMESTAMP_MICROS,
            OriginalType::Uint8 => format::ConvertedType::UINT_8,
            OriginalType::Uint16 => format::ConvertedType::UINT_16,
            OriginalType::Uint32 => format::ConvertedType::UINT_32,
            OriginalType::Uint64 => format::ConvertedType::UINT_64,
            OriginalType::Int8 => format::ConvertedType::INT_8,
            OriginalType::Int16 => format::ConvertedType::INT_16,
            OriginalType::Int32 => format::ConvertedType::INT_32,
            OriginalType::Int64 => format::ConvertedType::INT_64,
            OriginalType::Json => format::ConvertedType::JSON,
            OriginalType::Bson => format::ConvertedType::BSON,
            OriginalType::Interval => format::ConvertedType::INTERVAL,
        }
    }

    fn from_wire(wire: Self::Wire) -> Result<Self> {
        match wire {
            format::ConvertedType::UTF8 => Ok(OriginalType::Utf8),
            format::ConvertedType::MAP => Ok(OriginalType::Map),
            format::ConvertedType::MAP_KEY_VALUE => Ok(OriginalType::MapKeyValue),
            format::ConvertedType::LIST => Ok(OriginalType::List),
            format::ConvertedType::ENUM => Ok(OriginalType::Enum),
            format::ConvertedType::DECIMAL => Ok(OriginalType::Decimal),
            format::ConvertedType::DATE => Ok(OriginalType::Date),
            format::ConvertedType::TIME_MILLIS => Ok(OriginalType::TimeMillis),
            format::ConvertedType::TIME_MICROS => Ok(OriginalType::TimeMicros),
            format::ConvertedType::TIMESTAMP_MILLIS => Ok(OriginalType::TimestampMillis),
            format::ConvertedType::TIMESTAMP_MICROS => Ok(OriginalType::TimestampMicros),
            format::ConvertedType::UINT_8 => Ok(OriginalType::Uint8),
            format::ConvertedType::UINT_16 => Ok(OriginalType::Uint16),
            format::ConvertedType::UINT_32 => Ok(OriginalType::Uint32),
            format::ConvertedType::UINT_64 => Ok(OriginalType::Uint64),
            format::ConvertedType::INT_8 => Ok(OriginalType::Int8),
            format::ConvertedType::INT_16 => Ok(OriginalType::Int16),
            format::ConvertedType::INT_32 => Ok(OriginalType::Int32),
            format::ConvertedType::INT_64 => Ok(OriginalType::Int64),
            format::ConvertedType::JSON => Ok(OriginalType::Json),
            format::ConvertedType::BSON => Ok(OriginalType::Bson),
            format::ConvertedType::INTERVAL => Ok(OriginalType::Interval),
            other => Err(MetadataError::unmapped(Self::FAMILY, other.0)),
        }
    }
}

impl WireEnum for PageType {
    type Wire = format::PageType;
    const FAMILY: &'static str = "PageType";
    const ALL: &'static [Self] = &[
        PageType::DataPage,
        PageType::IndexPage,
        PageType::DictionaryPage,
        PageType::DataPageV2,
    ];

    fn to_wire(self) -> Self::Wire {
        match self {
            PageType::DataPage => format::PageType::DATA_PAGE,
            PageType::IndexPage => format::PageType::INDEX_PAGE,
            PageType::DictionaryPage => format::PageType::DICTIONARY_PAGE,
            PageType::DataPageV2 => format::PageType::DATA_PAGE_V2,
        }
    }

    fn from_wire(wire: Self::Wire) -> Result<Self> {
        match wire {
            format::PageType::DATA_PAGE => Ok(PageType::DataPage),
            format::PageType::INDEX_PAGE => Ok(PageType::IndexPage),
            format::PageType::DICTIONARY_PAGE => Ok(PageType::DictionaryPage),
            format::PageType::DATA_PAGE_V2 => Ok(PageType::DataPageV2),
            other => Err(MetadataError::unmapped(Self::FAMILY, other.0)),
        }
    }
}

/// Convert a set of logical encodings to the wire list stored in column chunk metadata.
///
/// The output follows the set's ordering, so equal sets always encode identically.
pub fn to_format_encodings(encodings: &BTreeSet<Encoding>) -> Vec<format::Encoding> {
    encodings.iter().map(|e| e.to_wire()).collect()
}

/// Convert a wire encoding list back to a set, collapsing duplicates
pub fn from_format_encodings(encodings: &[format::Encoding]) -> Result<BTreeSet<Encoding>> {
    encodings.iter().map(|e| Encoding::from_wire(*e)).collect()
}
