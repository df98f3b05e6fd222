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
/// # Console pretty-printing of CBOR items
///
/// One item per line, one tab of indentation per nesting level, CRLF line endings. Values are
/// rendered as decimal integers, text as-is, byte strings as uppercase hex with no separator,
/// and the simple values as the literal words `true`, `false`, `null` and `undefined`. Float
/// items are identified by their headers and labelled `half float` / `single float` /
/// `double float`; their IEEE payloads are skipped, not decoded.
///
/// Containers emit `Array: N` / `Map: N` header lines, with the count omitted for indefinite
/// containers (`Array:` / `Map:` / `Bytes:` / `String:`). A semantic tag prints as `[t] `
/// before the tagged value. The break stop-code produces no output of its own.
///
/// ## Example
///
/// ```
/// use rs_microcbor::debug::Diag;
/// use rs_microcbor::decoder::Cursor;
///
/// // indefinite text string of two chunks
/// let stream = [0x7f, 0x65, 0x73, 0x74, 0x72, 0x65, 0x61, 0x64, 0x6d, 0x69, 0x6e, 0x67, 0xff];
/// let mut out = Vec::new();
/// Cursor::new(&stream).pretty(&mut out).unwrap();
/// assert_eq!(out, b"String:\r\n\tstrea\r\n\tming\r\n");
/// ```
use crate::constants::*;
use crate::decode::Cursor;
use crate::encode::Encoder;
use crate::walk::Walker;

use std::io;
use std::io::Write;

/// Trait for rendering CBOR in the indented console format.
pub trait Diag {
    /// Write the pretty-printed form of `self` to `out`.
    fn pretty(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl<'buf> Diag for Cursor<'buf> {
    /// Pretty-print the single item this cursor is positioned on, recursing into containers.
    fn pretty(&self, out: &mut dyn Write) -> io::Result<()> {
        let bytes = self.tail();
        let mut walker = Walker::new(bytes, 1, 0);

        while let Some(item) = walker.step() {
            if item.is_break() {
                continue;
            }
            for _ in 0..item.depth {
                out.write_all(b"\t")?;
            }
            let head = &item.head;
            if head.tag != TAG_NONE {
                write!(out, "[{}] ", head.tag)?;
            }

            match head.major {
                MajorType::Map => {
                    if head.minor == AI_INDEFINITE {
                        out.write_all(b"Map:\r\n")?;
                    } else {
                        write!(out, "Map: {}\r\n", head.value)?;
                    }
                }
                MajorType::Array => {
                    if head.minor == AI_INDEFINITE {
                        out.write_all(b"Array:\r\n")?;
                    } else {
                        write!(out, "Array: {}\r\n", head.value)?;
                    }
                }
                MajorType::Bytes => {
                    if head.minor == AI_INDEFINITE {
                        out.write_all(b"Bytes:\r\n")?;
                    } else {
                        for byte in payload(bytes, &item) {
                            write!(out, "{:02X}", byte)?;
                        }
                        out.write_all(b"\r\n")?;
                    }
                }
                MajorType::Text => {
                    if head.minor == AI_INDEFINITE {
                        out.write_all(b"String:\r\n")?;
                    } else {
                        out.write_all(payload(bytes, &item))?;
                        out.write_all(b"\r\n")?;
                    }
                }
                MajorType::Unsigned => {
                    write!(out, "{}\r\n", head.value)?;
                }
                MajorType::Negative => {
                    write!(out, "{}\r\n", -1i64 - head.value as i64)?;
                }
                MajorType::Special => {
                    let label: &[u8] = match head.minor {
                        MINOR_FALSE => b"false\r\n",
                        MINOR_TRUE => b"true\r\n",
                        MINOR_NULL => b"null\r\n",
                        MINOR_UNDEFINED => b"undefined\r\n",
                        PAYLOAD_TWO_BYTES => b"half float\r\n",
                        PAYLOAD_FOUR_BYTES => b"single float\r\n",
                        PAYLOAD_EIGHT_BYTES => b"double float\r\n",
                        _ => b"\r\n",
                    };
                    out.write_all(label)?;
                }
                _ => {
                    out.write_all(b"error\r\n")?;
                    return Ok(());
                }
            }

            if item.closed_root {
                break;
            }
        }
        Ok(())
    }
}

impl<'buf> Diag for Encoder<'buf> {
    /// Pretty-print the bytes encoded so far. A cross-check convenience for tests and demos.
    fn pretty(&self, out: &mut dyn Write) -> io::Result<()> {
        Cursor::new(self.encoded()).pretty(out)
    }
}

/// The payload bytes of a definite byte or text string item, clamped to the available input.
fn payload<'buf>(bytes: &'buf [u8], item: &crate::walk::StepItem) -> &'buf [u8] {
    let from = item.start + item.head.length;
    bytes
        .get(from..from + item.head.value as usize)
        .unwrap_or(&[])
}
