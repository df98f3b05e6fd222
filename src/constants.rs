/***************************************************************************************************
 * Copyright (c) 2021-2022 Qualcomm Innovation Center, Inc. All rights reserved.
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
 * rs_microcbor CBOR type codes and wire constants
 *
 * A compact streaming serializer and zero-copy deserializer for CBOR (RFC8949). This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/

/// The major type of a CBOR item, held in the top three bits of the initial byte of an item.
///
/// Codes 0 to 7 are the wire values from RFC8949. Two out-of-band codes are carried as well:
/// [`MajorType::Raw`] is reserved for pre-encoded item pass-through and is never emitted, and
/// [`MajorType::Unassigned`] means "no item here" and is what a null cursor reports.
#[repr(u8)]
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum MajorType {
    /// Major Type 0 (Positive integers)
    Unsigned = 0,
    /// Major Type 1 (Negative integers)
    Negative = 1,
    /// Major Type 2 (Byte strings)
    Bytes = 2,
    /// Major Type 3 (UTF-8 text strings)
    Text = 3,
    /// Major Type 4 (Arrays)
    Array = 4,
    /// Major Type 5 (Maps)
    Map = 5,
    /// Major Type 6 (Semantic tags)
    Tag = 6,
    /// Major Type 7 (Simple values, floats and the break stop-code)
    Special = 7,
    /// Reserved placeholder for raw pass-through. Not emitted on the wire.
    Raw = 0xFE,
    /// Absent or uninitialised item.
    Unassigned = 0xFF,
}

impl MajorType {
    /// Map a three-bit wire code onto a `MajorType`.
    #[inline]
    pub(crate) fn from_code(code: u8) -> MajorType {
        match code {
            0 => MajorType::Unsigned,
            1 => MajorType::Negative,
            2 => MajorType::Bytes,
            3 => MajorType::Text,
            4 => MajorType::Array,
            5 => MajorType::Map,
            6 => MajorType::Tag,
            7 => MajorType::Special,
            _ => MajorType::Unassigned,
        }
    }
}

/// Simple values carried in the additional information bits of a Major Type 7 item.
///
/// The float selectors identify an IEEE payload following the initial byte. This crate
/// recognises and skips float payloads but does not decode them.
#[repr(u8)]
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum SimpleValue {
    /// Boolean false
    False = 20,
    /// Boolean true
    True = 21,
    /// Null
    Null = 22,
    /// Undefined
    Undefined = 23,
    /// A half-precision float follows
    HalfFloat = 25,
    /// A single-precision float follows
    SingleFloat = 26,
    /// A double-precision float follows
    DoubleFloat = 27,
}

/// Additional Information bitmask
pub const AI_MASK: u8 = 0b000_11111;

/// Maximum value of a "simple" payload mapped on AI bits
pub const PAYLOAD_AI_BITS: u8 = 23;
/// Indicates one byte of length or value information follows the MT/AI byte
pub const PAYLOAD_ONE_BYTE: u8 = 24;
/// Indicates two bytes of length or value information follow the MT/AI byte
pub const PAYLOAD_TWO_BYTES: u8 = 25;
/// Indicates four bytes of length or value information follow the MT/AI byte
pub const PAYLOAD_FOUR_BYTES: u8 = 26;
/// Indicates eight bytes of length or value information follow the MT/AI byte
pub const PAYLOAD_EIGHT_BYTES: u8 = 27;
/// Indefinite length marker, and the break stop-code when combined with Major Type 7
pub const AI_INDEFINITE: u8 = 31;

/// Minor type of the `false` simple value
pub(crate) const MINOR_FALSE: u8 = 20;
/// Minor type of the `true` simple value
pub(crate) const MINOR_TRUE: u8 = 21;
/// Minor type of the `null` simple value
pub(crate) const MINOR_NULL: u8 = 22;
/// Minor type of the `undefined` simple value
pub(crate) const MINOR_UNDEFINED: u8 = 23;

/// The tag value reported for an untagged item.
pub const TAG_NONE: u32 = 0xFFFF_FFFF;

/// The size reported for an indefinite length container.
pub const SIZE_INDEFINITE: u32 = 0xFFFF_FFFF;

/// In-band sentinel for "indefinite number of units remain". Never decremented by the walker.
pub(crate) const UNITS_INDEFINITE: u32 = 0xFFFF_FFFF;

/// Epoch timestamp tag (RFC8949 section 3.4.2)
pub(crate) const TAG_EPOCH: u32 = 1;
