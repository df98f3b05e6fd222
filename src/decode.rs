/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
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
 * rs_microcbor CBOR Decoder
 *
 * A compact streaming serializer and zero-copy deserializer for CBOR (RFC8949). This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/
/// # Zero-copy cursor decoding
///
/// A [`Cursor`] is a lightweight read-only view positioned at the start of one CBOR item inside
/// an immutable byte slice. Cursors are `Copy`; navigation methods return new cursors and never
/// mutate the one they are called on. Map lookup and array indexing resolve by streaming
/// re-scan over the underlying bytes: no index is built and nothing is allocated.
///
/// A miss ([`Cursor::find`] on an absent key, [`Cursor::at`] out of range) returns the *null
/// cursor*, on which every extractor fails cleanly, so lookups chain without intermediate
/// checks:
///
/// ```
/// use rs_microcbor::decoder::Cursor;
///
/// // {"a": {"b": 7}}
/// let doc = [0xa1, 0x61, 0x61, 0xa1, 0x61, 0x62, 0x07];
/// let top = Cursor::new(&doc);
/// assert_eq!(top.find("a").find("b").unsigned(), Some(7));
/// assert!(top.find("a").find("missing").find("deeper").is_null());
/// ```
use crate::constants::*;
use crate::error::CBORError;
use crate::header::Header;
use crate::walk::{container_units, item_length, Walker};

use std::convert::TryFrom;
use std::str::from_utf8;

#[cfg(any(feature = "std", test))]
use std::string::String;

#[cfg(any(feature = "full", test))]
use chrono::{DateTime, TimeZone, Utc};

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/***************************************************************************************************
 * Map lookup keys
 **************************************************************************************************/

/// A map lookup key: either a text string or an integer.
///
/// The two key regimes are disjoint: a text key only ever matches text string items, and an
/// integer key only ever matches unsigned or negative integer items. Maps mixing both key types
/// must be queried once per regime.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Key<'a> {
    /// An integer key; negative keys match Major Type 1 items of equal value.
    Int(i32),
    /// A text key, compared byte-exact against definite length text items.
    Text(&'a str),
}

impl<'a> From<i32> for Key<'a> {
    #[inline]
    fn from(key: i32) -> Self {
        Key::Int(key)
    }
}

impl<'a> From<&'a str> for Key<'a> {
    #[inline]
    fn from(key: &'a str) -> Self {
        Key::Text(key)
    }
}

impl<'a> Key<'a> {
    /// `true` when the item described by `head`, whose bytes (tag and prefix included) start at
    /// the beginning of `item`, is a key item equal to `self`.
    fn matches(&self, head: &Header, item: &[u8]) -> bool {
        match *self {
            Key::Int(key) => {
                if key >= 0 {
                    head.major == MajorType::Unsigned && head.value == key as u32
                } else {
                    head.major == MajorType::Negative && head.value == (-1 - key) as u32
                }
            }
            Key::Text(key) => {
                head.major == MajorType::Text
                    && head.minor != AI_INDEFINITE
                    && head.value as usize == key.len()
                    && item.get(head.length..head.length + key.len())
                        == Some(key.as_bytes())
            }
        }
    }
}

/***************************************************************************************************
 * Cursor
 **************************************************************************************************/

/// A read-only view positioned at the start of one CBOR item.
///
/// The slice a cursor borrows runs from the item's first byte to the end of the enclosing
/// document; the cursor's logical extent is the single item it is positioned on, which
/// [`Cursor::cbor`] recovers exactly. The underlying slice must outlive every cursor derived
/// from it.
///
/// Cursors returned by [`Cursor::at`] carry the residual element count of the parent container
/// so that [`Cursor::next_array_item`] and [`Cursor::next_map_item`] can continue stepping
/// without rescanning from the container header.
#[derive(Debug, Copy, Clone)]
pub struct Cursor<'buf> {
    bytes: &'buf [u8],
    units: u32,
}

impl<'buf> Default for Cursor<'buf> {
    fn default() -> Self {
        Cursor::null()
    }
}

impl<'buf> Cursor<'buf> {
    /// Construct a cursor positioned on the first item of `bytes`.
    #[inline]
    pub fn new(bytes: &'buf [u8]) -> Cursor<'buf> {
        Cursor { bytes, units: 0 }
    }

    /// The null cursor: no bytes, no item. Returned by every miss.
    #[inline]
    pub fn null() -> Cursor<'buf> {
        Cursor {
            bytes: &[],
            units: 0,
        }
    }

    /// `true` for the null cursor.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A cursor positioned `offset` bytes into this cursor's slice, carrying `units` residual
    /// elements. Null when the offset is out of range.
    #[inline]
    fn slice_from(&self, offset: usize, units: u32) -> Cursor<'buf> {
        if offset >= self.bytes.len() {
            Cursor::null()
        } else {
            Cursor {
                bytes: &self.bytes[offset..],
                units,
            }
        }
    }

    /*************************************************************************/
    /* Header pass-through                                                   */
    /*************************************************************************/

    /// The major type of the item, [`MajorType::Unassigned`] for the null cursor. Tags are
    /// transparent: a tagged map reports [`MajorType::Map`].
    #[cfg_attr(feature = "trace", trace)]
    pub fn major_type(&self) -> MajorType {
        if self.is_null() {
            MajorType::Unassigned
        } else {
            Header::decode(self.bytes).major
        }
    }

    /// The minor type (additional information) of the item.
    #[cfg_attr(feature = "trace", trace)]
    pub fn minor_type(&self) -> u8 {
        Header::decode(self.bytes).minor
    }

    /// The semantic tag on the item, [`TAG_NONE`] when untagged.
    #[cfg_attr(feature = "trace", trace)]
    pub fn tag(&self) -> u32 {
        Header::decode(self.bytes).tag
    }

    /// The element count of an array, the pair count of a map, the byte length of a definite
    /// byte or text string, [`SIZE_INDEFINITE`] for any indefinite container and 0 for
    /// everything else.
    #[cfg_attr(feature = "trace", trace)]
    pub fn size(&self) -> u32 {
        let head = Header::decode(self.bytes);
        match head.major {
            MajorType::Map | MajorType::Array | MajorType::Text | MajorType::Bytes => {
                if head.minor == AI_INDEFINITE {
                    SIZE_INDEFINITE
                } else {
                    head.value
                }
            }
            _ => 0,
        }
    }

    /*************************************************************************/
    /* Primitive extraction                                                  */
    /*************************************************************************/

    /// The value of an unsigned integer item, `None` for any other major type.
    #[cfg_attr(feature = "trace", trace)]
    pub fn unsigned(&self) -> Option<u32> {
        let head = Header::decode(self.bytes);
        if head.major == MajorType::Unsigned {
            Some(head.value)
        } else {
            None
        }
    }

    /// The value of a negative integer item as `-1 - argument`, `None` for any other major
    /// type.
    #[cfg_attr(feature = "trace", trace)]
    pub fn negative(&self) -> Option<i32> {
        let head = Header::decode(self.bytes);
        if head.major == MajorType::Negative {
            Some((-1i32).wrapping_sub(head.value as i32))
        } else {
            None
        }
    }

    /// The value of an integer item of either sign, narrowed to 32 bits.
    #[cfg_attr(feature = "trace", trace)]
    pub fn signed(&self) -> Option<i32> {
        let head = Header::decode(self.bytes);
        match head.major {
            MajorType::Unsigned => Some(head.value as i32),
            MajorType::Negative => Some((-1i32).wrapping_sub(head.value as i32)),
            _ => None,
        }
    }

    /// The value of a boolean simple value item.
    #[cfg_attr(feature = "trace", trace)]
    pub fn boolean(&self) -> Option<bool> {
        let head = Header::decode(self.bytes);
        if head.major == MajorType::Special {
            match head.minor {
                MINOR_FALSE => Some(false),
                MINOR_TRUE => Some(true),
                _ => None,
            }
        } else {
            None
        }
    }

    /// The seconds value of an epoch timestamp: an unsigned integer tagged with tag 1.
    #[cfg_attr(feature = "trace", trace)]
    pub fn timestamp(&self) -> Option<u32> {
        let head = Header::decode(self.bytes);
        if head.major == MajorType::Unsigned && head.tag == TAG_EPOCH {
            Some(head.value)
        } else {
            None
        }
    }

    /// An epoch timestamp as a `chrono` date and time.
    #[cfg(any(feature = "full", test))]
    #[cfg_attr(feature = "trace", trace)]
    pub fn epoch(&self) -> Option<DateTime<Utc>> {
        let seconds = self.timestamp()?;
        Utc.timestamp_opt(seconds as i64, 0).single()
    }

    /// The payload of a definite length byte string, borrowed from the underlying slice.
    #[cfg_attr(feature = "trace", trace)]
    pub fn bytes(&self) -> Option<&'buf [u8]> {
        let head = Header::decode(self.bytes);
        if head.major == MajorType::Bytes && head.minor != AI_INDEFINITE {
            self.bytes.get(head.length..head.length + head.value as usize)
        } else {
            None
        }
    }

    /// The payload of a definite length text string, borrowed from the underlying slice.
    /// `None` when the payload is not valid UTF-8.
    #[cfg_attr(feature = "trace", trace)]
    pub fn text(&self) -> Option<&'buf str> {
        let head = Header::decode(self.bytes);
        if head.major == MajorType::Text && head.minor != AI_INDEFINITE {
            let payload = self.bytes.get(head.length..head.length + head.value as usize)?;
            from_utf8(payload).ok()
        } else {
            None
        }
    }

    /// The payload of a definite length text string, copied into an owned `String`.
    #[cfg(any(feature = "std", test))]
    #[cfg_attr(feature = "trace", trace)]
    pub fn text_owned(&self) -> Option<String> {
        self.text().map(String::from)
    }

    /*************************************************************************/
    /* Whole-item extraction                                                 */
    /*************************************************************************/

    /// The full encoding of the item: tag prefix, item prefix, payload and all nested items.
    /// The returned slice is itself a valid standalone CBOR document.
    #[cfg_attr(feature = "trace", trace)]
    pub fn cbor(&self) -> Option<&'buf [u8]> {
        if self.is_null() {
            None
        } else {
            Some(&self.bytes[..self.cbor_length() as usize])
        }
    }

    /// The length in bytes of the full encoding of the item. For input truncated mid-container
    /// this is the best estimate available: every byte consumed before the input ran out.
    #[cfg_attr(feature = "trace", trace)]
    pub fn cbor_length(&self) -> u32 {
        item_length(self.bytes) as u32
    }

    /*************************************************************************/
    /* Map lookup                                                            */
    /*************************************************************************/

    /// Look up a key in a map and return a cursor on the corresponding value. Accepts `&str`
    /// and `i32` keys; the two regimes are disjoint (see [`Key`]).
    ///
    /// Only keys at the top level of this map are considered; keys of nested maps are skipped
    /// over. A key that is itself a container never matches, and the item following it is its
    /// value. Misses, including calls on items that are not maps, return the null cursor.
    pub fn find<'key, K: Into<Key<'key>>>(&self, key: K) -> Cursor<'buf> {
        let sought: Key = key.into();
        let head = Header::decode(self.bytes);

        if head.major != MajorType::Map {
            return Cursor::null();
        }
        let units = match container_units(&head) {
            Some(units) if units > 0 => units,
            _ => return Cursor::null(),
        };

        let mut walker = Walker::new(self.bytes, units, head.length);
        let mut got_key = false;

        while let Some(item) = walker.step() {
            if item.depth == 0 {
                if item.is_container() {
                    // Containers alternate through the key/value phases like any other item
                    // but can never match a sought key.
                    got_key = !got_key;
                } else if got_key {
                    // This item is the value for a key that did not match. Skip it.
                    got_key = false;
                } else {
                    if sought.matches(&item.head, &self.bytes[item.start..]) {
                        return self.slice_from(item.end, 0);
                    }
                    got_key = true;
                }
            }
            if item.closed_root {
                break;
            }
        }
        Cursor::null()
    }

    /*************************************************************************/
    /* Positional access                                                     */
    /*************************************************************************/

    /// A cursor on the `index`th element of an array, or of a map counted as interleaved keys
    /// and values (a map of N pairs has valid indices 0..2N-1, keys on even indices). The
    /// returned cursor carries the residual element count, so stepping can continue with
    /// [`Cursor::next_array_item`] / [`Cursor::next_map_item`] without rescanning.
    ///
    /// Out-of-range indices and calls on items that are not arrays or maps return the null
    /// cursor.
    #[cfg_attr(feature = "trace", trace)]
    pub fn at(&self, index: usize) -> Cursor<'buf> {
        let head = Header::decode(self.bytes);

        if head.major != MajorType::Array && head.major != MajorType::Map {
            return Cursor::null();
        }
        let units = match container_units(&head) {
            Some(units) if units > 0 => units,
            _ => return Cursor::null(),
        };
        if units != UNITS_INDEFINITE && index as u64 >= units as u64 {
            return Cursor::null();
        }
        self.seek(head.length, units, index)
    }

    /// A cursor on the key of the `index`th pair of a map.
    #[inline]
    pub fn key_at(&self, index: usize) -> Cursor<'buf> {
        self.at(2 * index)
    }

    /// A cursor on the value of the `index`th pair of a map.
    #[inline]
    pub fn value_at(&self, index: usize) -> Cursor<'buf> {
        self.at(2 * index + 1)
    }

    /// Step forward by `n` elements among the siblings of this cursor, consuming the residual
    /// element count carried over from [`Cursor::at`]. `n == 0` returns the cursor itself.
    /// Stepping past the end of the parent container returns the null cursor.
    #[cfg_attr(feature = "trace", trace)]
    pub fn next_array_item(&self, n: usize) -> Cursor<'buf> {
        if self.units == 0 {
            return Cursor::null();
        }
        self.seek(0, self.units, n)
    }

    /// Step forward by `n` key/value pairs among the siblings of this cursor.
    #[inline]
    pub fn next_map_item(&self, n: usize) -> Cursor<'buf> {
        self.next_array_item(2 * n)
    }

    /// Walk forward from `start` with `units` remaining, returning a cursor on the `index`th
    /// top-level item encountered.
    fn seek(&self, start: usize, units: u32, index: usize) -> Cursor<'buf> {
        let mut walker = Walker::new(self.bytes, units, start);
        let mut current = 0usize;

        loop {
            if current == index {
                if walker.progress() >= self.bytes.len() {
                    return Cursor::null();
                }
                // In an indefinite container the sought position may hold the break
                // stop-code rather than an element; that is a miss, not an item.
                let head = Header::decode(&self.bytes[walker.progress()..]);
                if head.major == MajorType::Special && head.minor == AI_INDEFINITE {
                    return Cursor::null();
                }
                return self.slice_from(walker.progress(), walker.units());
            }
            match walker.step() {
                Some(item) => {
                    if item.closed_root {
                        return Cursor::null();
                    }
                    if item.top_level {
                        current += 1;
                    }
                }
                None => return Cursor::null(),
            }
        }
    }

    /*************************************************************************/
    /* Key/value convenience                                                 */
    /*************************************************************************/

    /// With this cursor on a map key, a cursor on the corresponding value: the next item after
    /// the key's prefix and payload. Null when no item follows.
    #[cfg_attr(feature = "trace", trace)]
    pub fn value(&self) -> Cursor<'buf> {
        let head = Header::decode(self.bytes);
        let mut progress = head.length;
        if (head.major == MajorType::Bytes || head.major == MajorType::Text)
            && head.minor != AI_INDEFINITE
        {
            progress += head.value as usize;
        }
        if progress == 0 {
            return Cursor::null();
        }
        self.slice_from(progress, 0)
    }

    /// The value following this key, as an unsigned integer.
    #[inline]
    pub fn value_unsigned(&self) -> Option<u32> {
        self.value().unsigned()
    }

    /// The value following this key, as a negative integer.
    #[inline]
    pub fn value_negative(&self) -> Option<i32> {
        self.value().negative()
    }

    /// The value following this key, as an integer of either sign.
    #[inline]
    pub fn value_signed(&self) -> Option<i32> {
        self.value().signed()
    }

    /// The value following this key, as an epoch timestamp.
    #[inline]
    pub fn value_timestamp(&self) -> Option<u32> {
        self.value().timestamp()
    }

    /// The value following this key, as a byte string payload.
    #[inline]
    pub fn value_bytes(&self) -> Option<&'buf [u8]> {
        self.value().bytes()
    }

    /// The value following this key, as a text string payload.
    #[inline]
    pub fn value_text(&self) -> Option<&'buf str> {
        self.value().text()
    }

    /// The underlying slice from this item to the end of the enclosing document. Internal;
    /// the pretty-printer walks it.
    #[inline]
    pub(crate) fn tail(&self) -> &'buf [u8] {
        self.bytes
    }
}

/***************************************************************************************************
 * Standard Trait Implementations: Try to convert a Cursor into a value. Always fallible
 **************************************************************************************************/

/// Attempt to convert the item under a cursor into a `u32`.
impl<'buf> TryFrom<Cursor<'buf>> for u32 {
    type Error = CBORError;

    #[cfg_attr(feature = "trace", trace)]
    fn try_from(cursor: Cursor<'buf>) -> core::result::Result<Self, Self::Error> {
        cursor.unsigned().ok_or(CBORError::IncompatibleType)
    }
}

/// Attempt to convert the item under a cursor into an `i32`.
///
/// This will fail, for unsigned values, if n > i32::MAX.
/// This will fail, for negative values, if n < i32::MIN.
impl<'buf> TryFrom<Cursor<'buf>> for i32 {
    type Error = CBORError;

    #[cfg_attr(feature = "trace", trace)]
    fn try_from(cursor: Cursor<'buf>) -> core::result::Result<Self, Self::Error> {
        let head = Header::decode(cursor.bytes);
        match head.major {
            MajorType::Unsigned => {
                if head.value <= i32::MAX as u32 {
                    Ok(head.value as i32)
                } else {
                    Err(CBORError::OutOfRange)
                }
            }
            MajorType::Negative => {
                // The magnitude is checked against i32::MAX as the encoding is -1 - n
                if head.value <= i32::MAX as u32 {
                    Ok(-1 - (head.value as i32))
                } else {
                    Err(CBORError::OutOfRange)
                }
            }
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert the item under a cursor into a `bool`.
impl<'buf> TryFrom<Cursor<'buf>> for bool {
    type Error = CBORError;

    #[cfg_attr(feature = "trace", trace)]
    fn try_from(cursor: Cursor<'buf>) -> core::result::Result<Self, Self::Error> {
        cursor.boolean().ok_or(CBORError::IncompatibleType)
    }
}

/// Attempt to convert the item under a cursor into a `&str`.
///
/// # Lifetime
///
/// The lifetime of the `str` is the lifetime of the underlying buffer the cursor borrows.
impl<'buf> TryFrom<Cursor<'buf>> for &'buf str {
    type Error = CBORError;

    #[cfg_attr(feature = "trace", trace)]
    fn try_from(cursor: Cursor<'buf>) -> core::result::Result<Self, Self::Error> {
        let head = Header::decode(cursor.bytes);
        if head.major == MajorType::Text && head.minor != AI_INDEFINITE {
            let payload = cursor
                .bytes
                .get(head.length..head.length + head.value as usize)
                .ok_or(CBORError::IncompatibleType)?;
            from_utf8(payload).map_err(|_| CBORError::UTF8Error)
        } else {
            Err(CBORError::IncompatibleType)
        }
    }
}

/// Attempt to convert the item under a cursor into a `&[u8]`.
///
/// # Lifetime
///
/// The lifetime of the `&[u8]` is the lifetime of the underlying buffer the cursor borrows.
impl<'buf> TryFrom<Cursor<'buf>> for &'buf [u8] {
    type Error = CBORError;

    #[cfg_attr(feature = "trace", trace)]
    fn try_from(cursor: Cursor<'buf>) -> core::result::Result<Self, Self::Error> {
        cursor.bytes().ok_or(CBORError::IncompatibleType)
    }
}
