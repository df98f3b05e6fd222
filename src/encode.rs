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
 * rs_microcbor CBOR Encoder
 *
 * A compact streaming serializer and zero-copy deserializer for CBOR (RFC8949). This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/
/// # Fluent CBOR encoding onto a fixed buffer
///
/// The [`Encoder`] writes CBOR items directly into a caller-supplied byte buffer, in call
/// order, with no allocation and no intermediate representation. Every method computes the full
/// byte cost of the requested item before emitting anything: an item that does not fit in the
/// remaining capacity is dropped in its entirety and the write position is left unchanged.
/// There are no errors and no partial writes.
///
/// Definite length containers take their element count up front via [`Encoder::array`] and
/// [`Encoder::map`]; indefinite containers are opened with [`Encoder::begin_array`] /
/// [`Encoder::begin_map`] and closed with [`Encoder::end`]. The encoder does not track
/// container balance: emitting a stray break or a wrong definite count is the caller's
/// responsibility, exactly as it is on the wire.
use crate::constants::*;

#[cfg(any(feature = "full", test))]
use chrono::{DateTime, Utc};

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/***************************************************************************************************
 * Item size table
 **************************************************************************************************/

/// The number of bytes the smallest-form item prefix for argument `value` occupies.
///
/// ## Example
///
/// ```
/// use rs_microcbor::encoder::item_size;
///
/// assert_eq!(item_size(23), 1);
/// assert_eq!(item_size(24), 2);
/// assert_eq!(item_size(256), 3);
/// assert_eq!(item_size(65536), 5);
/// ```
#[inline]
pub fn item_size(value: u32) -> usize {
    if value <= PAYLOAD_AI_BITS as u32 {
        1
    } else if value <= 0xFF {
        2
    } else if value <= 0xFFFF {
        3
    } else {
        5
    }
}

/// The number of bytes a signed integer item occupies. Negative values are measured by their
/// encoded magnitude `-1 - value`.
#[inline]
pub fn item_size_signed(value: i32) -> usize {
    if value < 0 {
        item_size((-1 - value) as u32)
    } else {
        item_size(value as u32)
    }
}

/// The number of bytes a text string item occupies: the length prefix plus the payload.
#[inline]
pub fn item_size_text(value: &str) -> usize {
    item_size(value.len() as u32) + value.len()
}

/***************************************************************************************************
 * Encoder
 **************************************************************************************************/

/// Append-only CBOR writer over a borrowed byte buffer.
///
/// The buffer must outlive the encoder; its length is the encoder's capacity. The buffer is not
/// cleared on construction, and bytes beyond the write position are never touched.
///
/// ## Example
///
/// ```
/// use rs_microcbor::encoder::Encoder;
///
/// let mut buffer = [0u8; 20];
/// let mut encoder = Encoder::new(&mut buffer);
/// encoder
///     .tag(1234)
///     .begin_array()
///     .item("A")
///     .item("B")
///     .begin_map()
///     .key("k")
///     .value(1)
///     .end()
///     .item(-1)
///     .end();
///
/// assert_eq!(
///     encoder.encoded(),
///     &[0xd9, 0x04, 0xd2, 0x9f, 0x61, 0x41, 0x61, 0x42, 0xbf, 0x61, 0x6b, 0x01, 0xff, 0x20, 0xff]
/// );
/// ```
#[derive(Debug)]
pub struct Encoder<'buf> {
    bytes: &'buf mut [u8],
    index: usize,
}

impl<'buf> Encoder<'buf> {
    /// Construct an encoder writing into `bytes`, starting at offset 0.
    #[inline]
    pub fn new(bytes: &'buf mut [u8]) -> Encoder<'buf> {
        Encoder { bytes, index: 0 }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.index
    }

    /// `true` when nothing has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    /// Total capacity of the underlying buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// The encoded bytes written so far.
    #[inline]
    pub fn encoded(&self) -> &[u8] {
        &self.bytes[..self.index]
    }

    /// Rewind the write position to the start of the buffer so the encoder can be reused. When
    /// `clear_buffer` is set the buffer content is zeroed as well.
    #[cfg_attr(feature = "trace", trace)]
    pub fn reset(&mut self, clear_buffer: bool) -> &mut Self {
        if clear_buffer {
            self.bytes.fill(0);
        }
        self.index = 0;
        self
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.bytes.len() - self.index
    }

    /*************************************************************************/
    /* Tags and the break stop-code                                          */
    /*************************************************************************/

    /// Emit a semantic tag for the item that follows. If no item follows, the encoding is
    /// malformed.
    #[cfg_attr(feature = "trace", trace)]
    pub fn tag(&mut self, tag: u32) -> &mut Self {
        self.write_type_and_value(MajorType::Tag, tag);
        self
    }

    /// Emit the break stop-code, closing the innermost indefinite container.
    #[cfg_attr(feature = "trace", trace)]
    pub fn end(&mut self) -> &mut Self {
        if self.index < self.bytes.len() {
            self.bytes[self.index] = (MajorType::Special as u8) << 5 | AI_INDEFINITE;
            self.index += 1;
        }
        self
    }

    /*************************************************************************/
    /* Container creation                                                    */
    /*************************************************************************/

    /// Open a definite length array of `items` elements. The caller must emit exactly that many
    /// items.
    #[cfg_attr(feature = "trace", trace)]
    pub fn array(&mut self, items: usize) -> &mut Self {
        self.write_type_and_value(MajorType::Array, items as u32);
        self
    }

    /// Open an indefinite length array, closed later by [`Encoder::end`].
    #[cfg_attr(feature = "trace", trace)]
    pub fn begin_array(&mut self) -> &mut Self {
        if self.index < self.bytes.len() {
            self.bytes[self.index] = (MajorType::Array as u8) << 5 | AI_INDEFINITE;
            self.index += 1;
        }
        self
    }

    /// Open a definite length map of `pairs` key/value pairs. The caller must emit exactly
    /// 2 x `pairs` items.
    #[cfg_attr(feature = "trace", trace)]
    pub fn map(&mut self, pairs: usize) -> &mut Self {
        self.write_type_and_value(MajorType::Map, pairs as u32);
        self
    }

    /// Open an indefinite length map, closed later by [`Encoder::end`].
    #[cfg_attr(feature = "trace", trace)]
    pub fn begin_map(&mut self) -> &mut Self {
        if self.index < self.bytes.len() {
            self.bytes[self.index] = (MajorType::Map as u8) << 5 | AI_INDEFINITE;
            self.index += 1;
        }
        self
    }

    /*************************************************************************/
    /* Item insertion                                                        */
    /*************************************************************************/

    /// Emit one item: an integer, boolean, simple value, text string or byte string.
    #[inline]
    pub fn item<V: EncodeItem>(&mut self, value: V) -> &mut Self {
        value.encode(self);
        self
    }

    /// Emit a map key. Identical to [`Encoder::item`]; reads better in map-building chains.
    #[inline]
    pub fn key<K: EncodeItem>(&mut self, key: K) -> &mut Self {
        key.encode(self);
        self
    }

    /// Emit a map value. Identical to [`Encoder::item`]; reads better in map-building chains.
    #[inline]
    pub fn value<V: EncodeItem>(&mut self, value: V) -> &mut Self {
        value.encode(self);
        self
    }

    /// Emit an epoch timestamp: tag 1 followed by the number of seconds since 1970-01-01 as an
    /// unsigned integer.
    #[cfg_attr(feature = "trace", trace)]
    pub fn timestamp(&mut self, seconds: u32) -> &mut Self {
        if 1 + item_size(seconds) <= self.remaining() {
            self.write_type_and_value(MajorType::Tag, TAG_EPOCH);
            self.write_type_and_value(MajorType::Unsigned, seconds);
        }
        self
    }

    /// Emit a `chrono` date and time as an epoch timestamp. Dates before 1970 or past the
    /// 32-bit epoch range do not fit the wire model and are dropped.
    #[cfg(any(feature = "full", test))]
    #[cfg_attr(feature = "trace", trace)]
    pub fn epoch(&mut self, when: &DateTime<Utc>) -> &mut Self {
        let seconds = when.timestamp();
        if seconds >= 0 && seconds <= u32::MAX as i64 {
            self.timestamp(seconds as u32);
        }
        self
    }

    /*************************************************************************/
    /* Bounded writer                                                        */
    /*************************************************************************/

    /// Write the smallest-form prefix for `major` with argument `value`, returning the number
    /// of bytes written. Writes nothing and returns 0 when `major` is [`MajorType::Special`] or
    /// above, or when the prefix does not fit the remaining capacity.
    #[cfg_attr(feature = "trace", trace)]
    pub fn write_type_and_value(&mut self, major: MajorType, value: u32) -> usize {
        if (major as u8) >= (MajorType::Special as u8) {
            return 0;
        }
        let major_high = (major as u8) << 5;
        let remaining = self.remaining();

        if value <= PAYLOAD_AI_BITS as u32 {
            if remaining >= 1 {
                self.bytes[self.index] = major_high | value as u8;
                self.index += 1;
                return 1;
            }
        } else if value <= 0xFF {
            if remaining >= 2 {
                self.bytes[self.index] = major_high | PAYLOAD_ONE_BYTE;
                self.bytes[self.index + 1] = value as u8;
                self.index += 2;
                return 2;
            }
        } else if value <= 0xFFFF {
            if remaining >= 3 {
                self.bytes[self.index] = major_high | PAYLOAD_TWO_BYTES;
                self.bytes[self.index + 1] = (value >> 8) as u8;
                self.bytes[self.index + 2] = value as u8;
                self.index += 3;
                return 3;
            }
        } else if remaining >= 5 {
            self.bytes[self.index] = major_high | PAYLOAD_FOUR_BYTES;
            self.bytes[self.index + 1] = (value >> 24) as u8;
            self.bytes[self.index + 2] = (value >> 16) as u8;
            self.bytes[self.index + 3] = (value >> 8) as u8;
            self.bytes[self.index + 4] = value as u8;
            self.index += 5;
            return 5;
        }
        0
    }

    /// Append raw bytes, all-or-nothing. Returns the number of bytes written.
    #[cfg_attr(feature = "trace", trace)]
    pub fn write_bytes(&mut self, source: &[u8]) -> usize {
        if source.len() <= self.remaining() {
            self.bytes[self.index..self.index + source.len()].copy_from_slice(source);
            self.index += source.len();
            source.len()
        } else {
            0
        }
    }
}

/***************************************************************************************************
 * Encode Item
 **************************************************************************************************/

/// The `EncodeItem` trait encapsulates anything that can be emitted as a single CBOR item
/// through [`Encoder::item`], [`Encoder::key`] and [`Encoder::value`].
///
/// Implementations guard the combined size of their prefix and payload before writing, so an
/// item is either emitted in full or not at all.
pub trait EncodeItem {
    /// Emit `self` on `buf`, or nothing if it does not fit.
    fn encode(&self, buf: &mut Encoder);
}

impl EncodeItem for u32 {
    /// Encoded with the preferred (smallest) serialization as Major Type 0.
    #[inline]
    #[cfg_attr(feature = "trace", trace)]
    fn encode(&self, buf: &mut Encoder) {
        buf.write_type_and_value(MajorType::Unsigned, *self);
    }
}

impl EncodeItem for u16 {
    #[inline]
    fn encode(&self, buf: &mut Encoder) {
        (*self as u32).encode(buf)
    }
}

impl EncodeItem for u8 {
    #[inline]
    fn encode(&self, buf: &mut Encoder) {
        (*self as u32).encode(buf)
    }
}

impl EncodeItem for i32 {
    /// Encoded with the preferred (smallest) serialization as Major Type 0 for non-negative
    /// values and Major Type 1, with argument `-1 - value`, for negative values.
    #[inline]
    #[cfg_attr(feature = "trace", trace)]
    fn encode(&self, buf: &mut Encoder) {
        if *self < 0 {
            buf.write_type_and_value(MajorType::Negative, (-1 - *self) as u32);
        } else {
            buf.write_type_and_value(MajorType::Unsigned, *self as u32);
        }
    }
}

impl EncodeItem for i16 {
    #[inline]
    fn encode(&self, buf: &mut Encoder) {
        (*self as i32).encode(buf)
    }
}

impl EncodeItem for i8 {
    #[inline]
    fn encode(&self, buf: &mut Encoder) {
        (*self as i32).encode(buf)
    }
}

impl EncodeItem for bool {
    /// Encoded as the `true` or `false` simple value.
    #[inline]
    #[cfg_attr(feature = "trace", trace)]
    fn encode(&self, buf: &mut Encoder) {
        let minor = if *self { MINOR_TRUE } else { MINOR_FALSE };
        if buf.index < buf.bytes.len() {
            buf.bytes[buf.index] = (MajorType::Special as u8) << 5 | minor;
            buf.index += 1;
        }
    }
}

impl EncodeItem for SimpleValue {
    /// Encoded as a single Major Type 7 byte. The float selectors do not emit an IEEE payload;
    /// emitting one is the caller's business.
    #[inline]
    #[cfg_attr(feature = "trace", trace)]
    fn encode(&self, buf: &mut Encoder) {
        if buf.index < buf.bytes.len() {
            buf.bytes[buf.index] = (MajorType::Special as u8) << 5 | (*self as u8);
            buf.index += 1;
        }
    }
}

impl EncodeItem for &str {
    /// Encoded as a definite length text string: Major Type 3 prefix plus the UTF-8 payload.
    #[cfg_attr(feature = "trace", trace)]
    fn encode(&self, buf: &mut Encoder) {
        if item_size(self.len() as u32) + self.len() <= buf.remaining() {
            buf.write_type_and_value(MajorType::Text, self.len() as u32);
            buf.write_bytes(self.as_bytes());
        }
    }
}

impl EncodeItem for &[u8] {
    /// Encoded as a definite length byte string: Major Type 2 prefix plus the payload.
    #[cfg_attr(feature = "trace", trace)]
    fn encode(&self, buf: &mut Encoder) {
        if item_size(self.len() as u32) + self.len() <= buf.remaining() {
            buf.write_type_and_value(MajorType::Bytes, self.len() as u32);
            buf.write_bytes(self);
        }
    }
}
