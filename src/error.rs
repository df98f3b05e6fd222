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
 * rs_microcbor CBOR Error API
 *
 * A compact streaming serializer and zero-copy deserializer for CBOR (RFC8949). This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/
#[cfg(any(feature = "std", test))]
use thiserror::Error;

/// `CBORError` provides information about errors converting CBOR items into other types.
///
/// The core cursor and encoder contracts never raise errors: the encoder silently drops writes
/// that do not fit, and the cursor reports mismatches as `None` or as a null cursor. This enum
/// services the fallible `TryFrom` conversion layer, where a diagnostic is worth having.
#[cfg_attr(any(feature = "std", test), derive(Copy, Clone, Error, Debug, PartialEq, Eq))]
#[cfg_attr(all(not(feature = "std"), not(test)), derive(Copy, Clone, Debug, PartialEq, Eq))]
pub enum CBORError {
    /// A number conversion has overflowed or underflowed.
    #[cfg_attr(
        any(feature = "std", test),
        error("Overflow or underflow in number conversion")
    )]
    OutOfRange,
    /// Attempt to convert an item to an incompatible type.
    #[cfg_attr(
        any(feature = "std", test),
        error("Attempt to convert an item of incompatible type")
    )]
    IncompatibleType,
    /// A text string contains an invalid UTF-8 sequence.
    #[cfg_attr(
        any(feature = "std", test),
        error("A text string contains an invalid UTF8 sequence")
    )]
    UTF8Error,
}
