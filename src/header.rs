/***************************************************************************************************
 * Copyright (c) 2021-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * rs_microcbor CBOR item header codec
 *
 * A compact streaming serializer and zero-copy deserializer for CBOR (RFC8949). This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/
use crate::constants::*;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// The decoded prefix of a single CBOR item: a semantic tag if one precedes the item, the major
/// and minor type, the argument value and the total number of prefix bytes consumed.
///
/// When the item carries a tag, `major`, `minor` and `value` describe the item *following* the
/// tag, and `length` covers both the tag prefix and the inner item prefix. A tag of a tag keeps
/// the outermost tag value; inner tags are consumed and dropped.
///
/// Arguments wider than 32 bits (additional information 27) are truncated to their low 32 bits;
/// the eight argument bytes are still consumed. Reserved additional information values (28-30)
/// decode as a zero argument of prefix length one so that a scan always makes progress.
///
/// ## Example
///
/// ```
/// use rs_microcbor::decoder::Header;
/// use rs_microcbor::types::MajorType;
///
/// // tag(1) 0x41A7
/// let head = Header::decode(&[0xc1, 0x19, 0x41, 0xa7]);
/// assert_eq!(head.tag, 1);
/// assert_eq!(head.major, MajorType::Unsigned);
/// assert_eq!(head.value, 0x41a7);
/// assert_eq!(head.length, 4);
/// ```
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Header {
    /// Semantic tag preceding the item, [`TAG_NONE`] when absent.
    pub tag: u32,
    /// Major type of the item (after any tag).
    pub major: MajorType,
    /// Minor type (additional information) of the item.
    pub minor: u8,
    /// Argument value: integer value, payload length, element count or simple type selector.
    pub value: u32,
    /// Number of prefix bytes, including any tag prefix.
    pub length: usize,
}

impl Header {
    /// Decode the header of the CBOR item starting at offset 0 of `bytes`.
    ///
    /// At most 18 bytes are examined (a tagged item where both prefixes carry an eight byte
    /// argument). Reads beyond the end of the slice yield zero bytes; an empty slice yields
    /// the null header.
    #[cfg_attr(feature = "trace", trace)]
    pub fn decode(bytes: &[u8]) -> Header {
        let mut head = Header {
            tag: TAG_NONE,
            major: MajorType::Special,
            minor: MINOR_NULL,
            value: 0,
            length: 0,
        };

        if bytes.is_empty() {
            return head;
        }

        let (major, minor, value, consumed) = read_prefix(bytes, 0);
        head.major = major;
        head.minor = minor;
        head.value = value;
        head.length = consumed;

        // The first prefix was a semantic tag: keep its value and decode the prefix of the item
        // that follows. Nested tags are consumed but their values are dropped.
        if major == MajorType::Tag {
            head.tag = value;
            loop {
                let (major, minor, value, consumed) = read_prefix(bytes, head.length);
                head.major = major;
                head.minor = minor;
                head.value = value;
                head.length += consumed;
                if major != MajorType::Tag {
                    break;
                }
            }
        }
        head
    }
}

/// Read a byte, treating anything beyond the end of the slice as zero.
#[inline]
fn byte_at(bytes: &[u8], index: usize) -> u8 {
    bytes.get(index).copied().unwrap_or(0)
}

/// Decode one MT/AI prefix at `at`, returning the major type, minor type, argument value and the
/// number of bytes consumed.
fn read_prefix(bytes: &[u8], at: usize) -> (MajorType, u8, u32, usize) {
    let initial = byte_at(bytes, at);
    let major = MajorType::from_code(initial >> 5);
    let minor = initial & AI_MASK;

    match minor {
        0..=PAYLOAD_AI_BITS => (major, minor, minor as u32, 1),
        PAYLOAD_ONE_BYTE => (major, minor, byte_at(bytes, at + 1) as u32, 2),
        PAYLOAD_TWO_BYTES => {
            let value = ((byte_at(bytes, at + 1) as u32) << 8) | byte_at(bytes, at + 2) as u32;
            (major, minor, value, 3)
        }
        PAYLOAD_FOUR_BYTES => {
            let value = ((byte_at(bytes, at + 1) as u32) << 24)
                | ((byte_at(bytes, at + 2) as u32) << 16)
                | ((byte_at(bytes, at + 3) as u32) << 8)
                | byte_at(bytes, at + 4) as u32;
            (major, minor, value, 5)
        }
        PAYLOAD_EIGHT_BYTES => {
            // The value is narrowed to its low 32 bits. All eight argument bytes are consumed.
            let value = ((byte_at(bytes, at + 5) as u32) << 24)
                | ((byte_at(bytes, at + 6) as u32) << 16)
                | ((byte_at(bytes, at + 7) as u32) << 8)
                | byte_at(bytes, at + 8) as u32;
            (major, minor, value, 9)
        }
        AI_INDEFINITE => (major, minor, AI_INDEFINITE as u32, 1),
        // Reserved additional information (28-30): zero-length item, scan continues.
        _ => (major, minor, 0, 1),
    }
}
