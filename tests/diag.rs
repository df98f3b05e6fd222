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
 * Test cases for the console pretty-printer: indentation, tags, container headers and the
 * literal words for simple values and float headers.
 **************************************************************************************************/

extern crate rs_microcbor;

use rs_microcbor::debug::Diag;
use rs_microcbor::decoder::Cursor;
use rs_microcbor::encoder::Encoder;

fn render(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    Cursor::new(bytes).pretty(&mut out).unwrap();
    out
}

#[test]
fn indefinite_text_stream_prints_chunks() {
    println!("<================== indefinite_text_stream_prints ==================>");
    let stream = [
        0x7f, 0x65, 0x73, 0x74, 0x72, 0x65, 0x61, 0x64, 0x6d, 0x69, 0x6e, 0x67, 0xff,
    ];
    assert_eq!(render(&stream), b"String:\r\n\tstrea\r\n\tming\r\n");
}

#[test]
fn fluent_document_prints_nested() {
    let mut bytes = [0u8; 20];
    let mut encoder = Encoder::new(&mut bytes);
    encoder
        .tag(1234)
        .begin_array()
        .item("A")
        .item("B")
        .begin_map()
        .key("k")
        .value(1)
        .end()
        .item(-1)
        .end();

    let mut out = Vec::new();
    encoder.pretty(&mut out).unwrap();
    assert_eq!(
        out,
        b"[1234] Array:\r\n\tA\r\n\tB\r\n\tMap:\r\n\t\tk\r\n\t\t1\r\n\t-1\r\n"
    );
}

#[test]
fn integers_print_in_decimal() {
    assert_eq!(render(&[0x00]), b"0\r\n");
    assert_eq!(render(&[0x19, 0x41, 0xa7]), b"16807\r\n");
    assert_eq!(render(&[0x20]), b"-1\r\n");
    assert_eq!(render(&[0x3a, 0x7f, 0xff, 0xff, 0xff]), b"-2147483648\r\n");
    // arguments use the full unsigned 32-bit range
    assert_eq!(render(&[0x1a, 0xff, 0xff, 0xff, 0xff]), b"4294967295\r\n");
    assert_eq!(render(&[0x3a, 0xff, 0xff, 0xff, 0xff]), b"-4294967296\r\n");
}

#[test]
fn byte_strings_print_as_uppercase_hex() {
    assert_eq!(render(&[0x44, 0xde, 0xad, 0xbe, 0xef]), b"DEADBEEF\r\n");
    assert_eq!(render(&[0x40]), b"\r\n");
}

#[test]
fn simple_values_print_as_words() {
    assert_eq!(render(&[0xf4]), b"false\r\n");
    assert_eq!(render(&[0xf5]), b"true\r\n");
    assert_eq!(render(&[0xf6]), b"null\r\n");
    assert_eq!(render(&[0xf7]), b"undefined\r\n");
}

#[test]
fn float_headers_print_as_labels() {
    // the IEEE payload is skipped, not decoded
    assert_eq!(render(&[0xf9, 0x3c, 0x00]), b"half float\r\n");
    assert_eq!(render(&[0xfa, 0x3f, 0x80, 0x00, 0x00]), b"single float\r\n");
    assert_eq!(
        render(&[0xfb, 0x3f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
        b"double float\r\n"
    );
}

#[test]
fn container_headers_carry_counts() {
    assert_eq!(render(&[0x82, 0x01, 0x02]), b"Array: 2\r\n\t1\r\n\t2\r\n");
    assert_eq!(
        render(&[0xa1, 0x61, 0x6b, 0x05]),
        b"Map: 1\r\n\tk\r\n\t5\r\n"
    );
    assert_eq!(render(&[0x80]), b"Array: 0\r\n");
    assert_eq!(render(&[0xa0]), b"Map: 0\r\n");
    // indefinite containers omit the count
    assert_eq!(render(&[0x9f, 0x01, 0xff]), b"Array:\r\n\t1\r\n");
    assert_eq!(render(&[0xbf, 0x61, 0x6b, 0x05, 0xff]), b"Map:\r\n\tk\r\n\t5\r\n");
    assert_eq!(render(&[0x5f, 0x41, 0xab, 0xff]), b"Bytes:\r\n\tAB\r\n");
}

#[test]
fn tags_print_before_their_item() {
    assert_eq!(render(&[0xc1, 0x1a, 0x63, 0x24, 0xe8, 0x3a]), b"[1] 1663363130\r\n");
    assert_eq!(
        render(&[0xd8, 0x20, 0x63, 0x61, 0x62, 0x63]),
        b"[32] abc\r\n"
    );
}

#[test]
fn directory_fixture_prints_fully_indented() {
    println!("<================== directory_fixture_pretty ==================>");
    // the head of the captured device directory message from tests/decoder.rs
    let message = [
        0xd9, 0x40, 0x11, 0xa3, 0x66, 0x73, 0x74, 0x61, 0x74, 0x75, 0x73, 0x00, 0x62, 0x69,
        0x64, 0x19, 0x41, 0xa7, 0x64, 0x62, 0x6f, 0x64, 0x79, 0xa2, 0x64, 0x6e, 0x61, 0x6d,
        0x65, 0x72, 0x41, 0x6e, 0x64, 0x79, 0x3f, 0x73, 0x20, 0x4d, 0x61, 0x63, 0x42, 0x6f,
        0x6f, 0x6b, 0x20, 0x41, 0x69, 0x72, 0x67, 0x69, 0x6e, 0x74, 0x65, 0x6e, 0x74, 0x73,
        0x81, 0xd9, 0x40, 0x0d, 0xa2, 0x62, 0x69, 0x64, 0x6f, 0x63, 0x6f, 0x6d, 0x2e, 0x61,
        0x72, 0x6d, 0x2e, 0x6f, 0x62, 0x73, 0x65, 0x72, 0x76, 0x65, 0x68, 0x65, 0x6e, 0x64,
        0x70, 0x6f, 0x69, 0x6e, 0x74, 0xd8, 0x20, 0x70, 0x2f, 0x39, 0x62, 0x34, 0x66, 0x32,
        0x64, 0x36, 0x64, 0x31, 0x32, 0x64, 0x35, 0x38, 0x65, 0x37,
    ];

    let expected: &[u8] = b"[16401] Map: 3\r\n\
        \tstatus\r\n\
        \t0\r\n\
        \tid\r\n\
        \t16807\r\n\
        \tbody\r\n\
        \tMap: 2\r\n\
        \t\tname\r\n\
        \t\tAndy?s MacBook Air\r\n\
        \t\tintents\r\n\
        \t\tArray: 1\r\n\
        \t\t\t[16397] Map: 2\r\n\
        \t\t\t\tid\r\n\
        \t\t\t\tcom.arm.observe\r\n\
        \t\t\t\tendpoint\r\n\
        \t\t\t\t[32] /9b4f2d6d12d58e7\r\n";
    assert_eq!(render(&message), expected);
}

#[test]
fn print_stops_after_one_item() {
    // two top-level items in the slice; only the one under the cursor is printed
    let sequence = [0x01, 0x02];
    assert_eq!(render(&sequence), b"1\r\n");
}
