use super::scheme::EncodeType;
use crate::bitstream::bitbuffer::BitBuffer;
use crate::error::{Error, Result};

const TAG_MASK: u8 = 0x1f;
const PADDING_SHIFT: u8 = 5;

/// A compressed code section: the encoded bitstream and the scheme that wrote it.
///
/// On disk the section is one metadata byte followed by the bitstream bytes.
/// The metadata byte holds the number of unused bits in the final byte (top
/// three bits) and the encode-type tag (low five bits).
#[derive(Clone, Debug)]
pub struct CompressedSection {
    pub encode_type: EncodeType,
    bits: BitBuffer,
}

impl CompressedSection {
    pub fn new(encode_type: EncodeType, bits: BitBuffer) -> Self {
        Self { encode_type, bits }
    }

    pub fn bits(&self) -> &BitBuffer {
        &self.bits
    }

    /// Unused bits at the end of the last bitstream byte.
    pub fn padding(&self) -> u8 {
        ((8 - self.bits.len() % 8) % 8) as u8
    }

    pub fn metadata(&self) -> u8 {
        self.padding() << PADDING_SHIFT | (self.encode_type.tag() & TAG_MASK)
    }

    /// Bitstream size in bytes, without the metadata byte.
    pub fn byte_len(&self) -> usize {
        self.bits.byte_len()
    }

    /// Metadata byte followed by the bitstream.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.byte_len() + 1);
        data.push(self.metadata());
        data.extend_from_slice(self.bits.as_bytes());
        data
    }

    /// Parse a section written by [`CompressedSection::to_bytes`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let (&metadata, stream) = data.split_first().ok_or(Error::UnexpectedEnd)?;
        let encode_type = EncodeType::try_from(metadata & TAG_MASK)?;
        let padding = (metadata >> PADDING_SHIFT) as usize;
        if padding > 0 && stream.is_empty() {
            return Err(Error::UnexpectedEnd);
        }

        let bits = BitBuffer::from_bytes(stream, (stream.len() << 3) - padding);
        Ok(Self { encode_type, bits })
    }
}

#[cfg(test)]
mod test {
    use super::CompressedSection;
    use crate::bitstream::bitbuffer::BitBuffer;
    use crate::compression::scheme::EncodeType;
    use crate::error::Error;

    #[test]
    fn metadata_test() {
        let mut bits = BitBuffer::new();
        bits.push_bits(0x1ff, 11);
        let section = CompressedSection::new(EncodeType::MaskDuoQuad, bits);
        assert_eq!(section.padding(), 5);
        assert_eq!(section.metadata(), 0b101_00101);
        assert_eq!(section.to_bytes(), vec![0b101_00101, 0xff, 0x01]);
        assert_eq!(section.byte_len(), 2);
    }

    #[test]
    fn parse_test() {
        let section = CompressedSection::from_bytes(&[0b101_00010, 0xff, 0x01]).unwrap();
        assert_eq!(section.encode_type, EncodeType::MaskDuo);
        assert_eq!(section.bits().len(), 11);
        assert_eq!(section.bits().to_integer(), 0x1ff);
    }

    #[test]
    fn aligned_test() {
        let mut bits = BitBuffer::new();
        bits.push_bits(0xabcd, 16);
        let section = CompressedSection::new(EncodeType::Dict, bits);
        assert_eq!(section.padding(), 0);
        let parsed = CompressedSection::from_bytes(&section.to_bytes()).unwrap();
        assert_eq!(parsed.bits().len(), 16);
        assert_eq!(parsed.encode_type, EncodeType::Dict);
    }

    #[test]
    fn empty_section_test() {
        let section = CompressedSection::new(EncodeType::MaskQuad, BitBuffer::new());
        assert_eq!(section.to_bytes(), vec![3]);
        let parsed = CompressedSection::from_bytes(&[3]).unwrap();
        assert!(parsed.bits().is_empty());
    }

    #[test]
    fn bad_header_test() {
        assert!(matches!(
            CompressedSection::from_bytes(&[]),
            Err(Error::UnexpectedEnd)
        ));
        assert!(matches!(
            CompressedSection::from_bytes(&[0x1f, 0x00]),
            Err(Error::UnsupportedScheme(_))
        ));
        assert!(matches!(
            CompressedSection::from_bytes(&[0b011_00000]),
            Err(Error::UnexpectedEnd)
        ));
    }
}
