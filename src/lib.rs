/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * rs_microcbor module definition
 *
 * A compact streaming serializer and zero-copy deserializer for CBOR (RFC8949). This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/

// Default configuration
#![no_std]
#![warn(missing_docs)]

//! # RS_MICROCBOR
//!
//! The `rs_microcbor` crate provides a CBOR implementation aimed at embedded targets where
//! messages are composed into, and picked apart from, caller-supplied byte buffers with no
//! intermediate representation at all. The typical use-case is a device-management or
//! attestation protocol endpoint that builds small CBOR messages into a static buffer and
//! fishes a handful of fields out of the responses.
//!
//! Two halves share one wire model:
//!
//! - The [`encoder::Encoder`] is a fluent builder over a fixed byte buffer. Every method
//!   computes the byte cost of the requested item before writing; an item that does not fit is
//!   dropped in its entirety, so the buffer never overflows and never holds a partial item.
//! - The [`decoder::Cursor`] is a zero-copy view positioned on one item of an immutable byte
//!   slice. Map keys and array indices are resolved by streaming re-scan over the bytes; no
//!   index is built, nothing is allocated, and misses return a null cursor on which further
//!   lookups fail cleanly, so queries chain.
//!
//! The default configuration of `rs_microcbor` requires neither the standard library nor an
//! allocator. The `std` feature enables the pretty-printer and owned-`String` extraction, and
//! `full` adds `chrono`-typed epoch timestamps.
//!
//! ## Features
//!
//! - Definite and indefinite length arrays, maps and byte/text strings, arbitrarily nested.
//! - Semantic tags, transparent to navigation, surfaced via [`decoder::Cursor::tag`].
//! - Preferred (smallest form) serialization for all integer arguments.
//! - Epoch timestamps (tag 1) on both halves.
//! - Lookup by text or integer key, positional indexing, and resumable sibling stepping.
//! - Exact sub-slice extraction: [`decoder::Cursor::cbor`] returns the complete encoding of
//!   the item under the cursor, ready to be embedded in another message or decoded standalone.
//!
//! ## Encoding
//!
//! ```
//! use rs_microcbor::encoder::Encoder;
//!
//! let mut buffer = [0u8; 64];
//! let mut encoder = Encoder::new(&mut buffer);
//! encoder.map(2).key("status").value(0).key("id").value(16807);
//!
//! assert_eq!(
//!     encoder.encoded(),
//!     &[0xa2, 0x66, 0x73, 0x74, 0x61, 0x74, 0x75, 0x73, 0x00,
//!       0x62, 0x69, 0x64, 0x19, 0x41, 0xa7]
//! );
//! ```
//!
//! ## Decoding
//!
//! ```
//! use rs_microcbor::decoder::Cursor;
//!
//! let message = [0xa2, 0x66, 0x73, 0x74, 0x61, 0x74, 0x75, 0x73, 0x00,
//!                0x62, 0x69, 0x64, 0x19, 0x41, 0xa7];
//! let top = Cursor::new(&message);
//!
//! assert_eq!(top.find("status").unsigned(), Some(0));
//! assert_eq!(top.find("id").unsigned(), Some(16807));
//! assert!(top.find("missing").is_null());
//! ```

// Pull in std if we are testing or if it is defined as feature (because we run tests on a
// platform supporting I/O and full feature set.
#[cfg(any(feature = "std", test))]
extern crate std;

// If we are really building no_std, pull in core as well. It is aliased as std so that "use"
// statements are always the same
#[cfg(all(not(feature = "std"), not(test)))]
extern crate core as std;

#[cfg(any(feature = "full", test))]
extern crate chrono;

#[cfg(any(feature = "std", test))]
mod cbor_diag;
pub(crate) mod constants;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod header;
pub(crate) mod walk;

/// The `error` module contains error definitions used by the fallible conversion layer.
pub mod error;

/// The `types` module exports the CBOR type codes and wire-level sentinels shared by the
/// encoder and the decoder.
pub mod types {
    pub use super::constants::{MajorType, SimpleValue, SIZE_INDEFINITE, TAG_NONE};
}

/// The `encoder` module exports the fluent [`encoder::Encoder`], the [`encoder::EncodeItem`]
/// trait it is generic over, and the item size table.
pub mod encoder {
    pub use super::encode::{item_size, item_size_signed, item_size_text, EncodeItem, Encoder};
}

/// The `decoder` module exports the zero-copy [`decoder::Cursor`], the [`decoder::Key`] lookup
/// type and the item [`decoder::Header`] codec.
pub mod decoder {
    pub use super::decode::{Cursor, Key};
    pub use super::header::Header;
}

/// The `debug` module exports the console pretty-printer.
#[cfg(any(feature = "std", test))]
pub mod debug {
    pub use super::cbor_diag::Diag;
}
