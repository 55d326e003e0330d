//! Container framing and signature sniffing
//!
//! Two bitstream forms exist:
//! 1. Raw codestream: 0xFF 0x0A signature, minimal overhead
//! 2. Boxed container: ISOBMFF-style boxes, recommended for files
//!
//! Sniffing follows the 12-byte rule of the reference tooling: buffers
//! shorter than the longer signature are unclassifiable.

use jxlcoder_core::{CodecError, CodecResult};
use std::borrow::Cow;

/// Raw codestream signature (2 bytes)
pub const CODESTREAM_SIGNATURE: [u8; 2] = [0xFF, 0x0A];

/// Boxed container signature (12 bytes)
///
/// Layout: box size (12), box type `JXL `, CR LF 0x87 LF corruption check.
pub const CONTAINER_SIGNATURE: [u8; 12] = [
    0x00, 0x00, 0x00, 0x0C, // box size = 12
    0x4A, 0x58, 0x4C, 0x20, // "JXL "
    0x0D, 0x0A, 0x87, 0x0A, // CR LF 0x87 LF
];

/// File type box brand
pub const BRAND: [u8; 4] = *b"jxl ";

/// Wrapping format of an input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSignature {
    RawCodestream,
    BoxedContainer,
}

impl ContainerSignature {
    /// Classify the leading bytes against the two known magics.
    ///
    /// Returns `None` for buffers shorter than the longer signature or
    /// matching neither. Pure, O(1), no allocation.
    pub fn classify(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < CONTAINER_SIGNATURE.len() {
            return None;
        }
        if bytes[..2] == CODESTREAM_SIGNATURE {
            Some(ContainerSignature::RawCodestream)
        } else if bytes[..12] == CONTAINER_SIGNATURE {
            Some(ContainerSignature::BoxedContainer)
        } else {
            None
        }
    }
}

/// Sniff whether a buffer is one of the recognized container forms.
/// Never fails; anything inconclusive is `false`.
pub fn is_recognized_container(bytes: &[u8]) -> bool {
    ContainerSignature::classify(bytes).is_some()
}

/// Box types carried by the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxType {
    /// File type box
    FileType,
    /// Codestream box
    Codestream,
    /// Partial codestream box; multiple are concatenated in order
    Partial,
    /// Unknown box, skipped on read
    Unknown([u8; 4]),
}

impl BoxType {
    pub fn from_fourcc(fourcc: &[u8; 4]) -> Self {
        match fourcc {
            b"ftyp" => BoxType::FileType,
            b"jxlc" => BoxType::Codestream,
            b"jxlp" => BoxType::Partial,
            _ => BoxType::Unknown(*fourcc),
        }
    }

    pub fn to_fourcc(&self) -> [u8; 4] {
        match self {
            BoxType::FileType => *b"ftyp",
            BoxType::Codestream => *b"jxlc",
            BoxType::Partial => *b"jxlp",
            BoxType::Unknown(fourcc) => *fourcc,
        }
    }
}

/// One box of the container
#[derive(Debug, Clone)]
pub struct ContainerBox {
    pub box_type: BoxType,
    pub data: Vec<u8>,
}

impl ContainerBox {
    pub fn new(box_type: BoxType, data: Vec<u8>) -> Self {
        Self { box_type, data }
    }

    /// File type box with a single compatible brand
    pub fn file_type() -> Self {
        let mut data = Vec::with_capacity(12);
        data.extend_from_slice(&BRAND);
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&BRAND);
        Self::new(BoxType::FileType, data)
    }

    pub fn codestream(data: Vec<u8>) -> Self {
        Self::new(BoxType::Codestream, data)
    }

    /// Parse one box from the front of `bytes`, returning it and the number
    /// of bytes consumed.
    fn parse(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        let header_err = || CodecError::MalformedHeader("truncated container box".to_string());

        if bytes.len() < 8 {
            return Err(header_err());
        }
        let declared = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64;
        let fourcc = [bytes[4], bytes[5], bytes[6], bytes[7]];
        let box_type = BoxType::from_fourcc(&fourcc);

        let (box_size, header_size) = if declared == 1 {
            if bytes.len() < 16 {
                return Err(header_err());
            }
            let mut wide = [0u8; 8];
            wide.copy_from_slice(&bytes[8..16]);
            (u64::from_be_bytes(wide), 16u64)
        } else {
            (declared, 8u64)
        };

        if box_size < header_size || box_size > bytes.len() as u64 {
            return Err(CodecError::MalformedHeader(format!(
                "container box size {} exceeds input ({} bytes)",
                box_size,
                bytes.len()
            )));
        }

        let data = bytes[header_size as usize..box_size as usize].to_vec();
        Ok((Self { box_type, data }, box_size as usize))
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        let box_size = 8 + self.data.len() as u64;
        if box_size <= u32::MAX as u64 {
            out.extend_from_slice(&(box_size as u32).to_be_bytes());
            out.extend_from_slice(&self.box_type.to_fourcc());
        } else {
            out.extend_from_slice(&1u32.to_be_bytes());
            out.extend_from_slice(&self.box_type.to_fourcc());
            out.extend_from_slice(&(box_size + 8).to_be_bytes());
        }
        out.extend_from_slice(&self.data);
    }
}

/// A parsed boxed-container file
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub boxes: Vec<ContainerBox>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container holding a single complete codestream
    pub fn with_codestream(codestream: Vec<u8>) -> Self {
        Self {
            boxes: vec![ContainerBox::file_type(), ContainerBox::codestream(codestream)],
        }
    }

    /// Parse a boxed-container buffer (signature included)
    pub fn parse(bytes: &[u8]) -> CodecResult<Self> {
        if ContainerSignature::classify(bytes) != Some(ContainerSignature::BoxedContainer) {
            return Err(CodecError::MalformedHeader(
                "missing container signature".to_string(),
            ));
        }

        let mut rest = &bytes[CONTAINER_SIGNATURE.len()..];
        let mut boxes = Vec::new();
        while !rest.is_empty() {
            let (parsed, consumed) = ContainerBox::parse(rest)?;
            boxes.push(parsed);
            rest = &rest[consumed..];
        }
        Ok(Self { boxes })
    }

    /// Serialize the container, signature first
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&CONTAINER_SIGNATURE);
        for b in &self.boxes {
            b.write(out);
        }
    }

    /// Concatenate the codestream payload out of `jxlc`/`jxlp` boxes
    pub fn extract_codestream(&self) -> CodecResult<Vec<u8>> {
        let mut codestream = Vec::new();
        for b in &self.boxes {
            match b.box_type {
                BoxType::Codestream | BoxType::Partial => {
                    codestream.extend_from_slice(&b.data)
                }
                _ => {}
            }
        }
        if codestream.is_empty() {
            return Err(CodecError::MalformedHeader(
                "no codestream box in container".to_string(),
            ));
        }
        Ok(codestream)
    }
}

/// Resolve an input buffer to its codestream bytes: borrowed for a raw
/// codestream, owned concatenation for a boxed file.
pub fn resolve_codestream(bytes: &[u8]) -> CodecResult<Cow<'_, [u8]>> {
    match ContainerSignature::classify(bytes) {
        Some(ContainerSignature::RawCodestream) => Ok(Cow::Borrowed(bytes)),
        Some(ContainerSignature::BoxedContainer) => {
            let container = Container::parse(bytes)?;
            Ok(Cow::Owned(container.extract_codestream()?))
        }
        None => Err(CodecError::MalformedHeader(
            "unrecognized container signature".to_string(),
        )),
    }
}
