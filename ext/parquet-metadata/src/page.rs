//! Page-level metadata: encodings, page kinds and page headers

use crate::mapping::WireEnum;
use crate::{MetadataError, Result};
use parquet::format;
use serde::{Deserialize, Serialize};

/// Value encodings a page or column chunk may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Encoding {
    Plain,
    PlainDictionary,
    Rle,
    BitPacked,
    DeltaBinaryPacked,
    DeltaLengthByteArray,
    DeltaByteArray,
    RleDictionary,
    ByteStreamSplit,
}

/// Kind of page a header precedes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageType {
    DataPage,
    IndexPage,
    DictionaryPage,
    DataPageV2,
}

/// Per-page header written ahead of every page payload.
///
/// Sizes are byte counts and must be non-negative. Kind-specific sub-headers
/// are not modelled; they are omitted on write and dropped on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageHeader {
    pub page_type: PageType,
    pub uncompressed_page_size: i32,
    pub compressed_page_size: i32,
    pub crc: Option<i32>,
}

impl PageHeader {
    pub fn new(
        page_type: PageType,
        uncompressed_page_size: i32,
        compressed_page_size: i32,
    ) -> Self {
        Self {
            page_type,
            uncompressed_page_size,
            compressed_page_size,
            crc: None,
        }
    }

    pub fn with_crc(mut self, crc: i32) -> Self {
        self.crc = Some(crc);
        self
    }

    /// Reject headers whose sizes cannot describe a page
    pub fn validate(&self) -> Result<()> {
        if self.uncompressed_page_size < 0 {
            return Err(MetadataError::malformed_page_header(format!(
                "negative uncompressed page size {}",
                self.uncompressed_page_size
            )));
        }
        if self.compressed_page_size < 0 {
            return Err(MetadataError::malformed_page_header(format!(
                "negative compressed page size {}",
                self.compressed_page_size
            )));
        }
        Ok(())
    }

    /// Present the header in the shape the thrift codec expects
    pub fn to_thrift(&self) -> format::PageHeader {
        format::PageHeader {
            type_: self.page_type.to_wire(),
            uncompressed_page_size: self.uncompressed_page_size,
            compressed_page_size: self.compressed_page_size,
            crc: self.crc,
            data_page_header: None,
            index_page_header: None,
            dictionary_page_header: None,
            data_page_header_v2: None,
        }
    }
}

impl TryFrom<&format::PageHeader> for PageHeader {
    type Error = MetadataError;

    fn try_from(header: &format::PageHeader) -> Result<Self> {
        let page = PageHeader {
            page_type: PageType::from_wire(header.type_)?,
            uncompressed_page_size: header.uncompressed_page_size,
            compressed_page_size: header.compressed_page_size,
            crc: header.crc,
        };
        page.validate()?;
        Ok(page)
    }
}
