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
 * Whole-message examples: fluent composition on one side, cursor queries on the other, byte
 * streams checked in between.
 **************************************************************************************************/

extern crate rs_microcbor;

use chrono::{TimeZone, Utc};

use rs_microcbor::decoder::Cursor;
use rs_microcbor::encoder::Encoder;
use rs_microcbor::types::{MajorType, SimpleValue, SIZE_INDEFINITE};

#[test]
fn fluent_round_trip() {
    println!("<======================= fluent_round_trip =====================>");
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

    let expected: &[u8] = &[
        0xd9, 0x04, 0xd2, 0x9f, 0x61, 0x41, 0x61, 0x42, 0xbf, 0x61, 0x6b, 0x01, 0xff, 0x20,
        0xff,
    ];
    assert_eq!(encoder.encoded(), expected);

    let top = Cursor::new(encoder.encoded());
    assert_eq!(top.tag(), 1234);
    assert_eq!(top.major_type(), MajorType::Array);
    assert_eq!(top.size(), SIZE_INDEFINITE);
    assert_eq!(top.at(0).text(), Some("A"));
    assert_eq!(top.at(1).text(), Some("B"));
    assert_eq!(top.at(2).find("k").unsigned(), Some(1));
    assert_eq!(top.at(3).negative(), Some(-1));
    assert_eq!(top.cbor_length() as usize, expected.len());
}

#[test]
fn definite_document_round_trip() {
    println!("<==================== definite_document_round_trip ===================>");
    let mut bytes = [0u8; 317];
    let mut encoder = Encoder::new(&mut bytes);

    encoder
        .map(1)
        .key("actions")
        .array(1)
        .begin_map()
        .key("action")
        .value("c2pa.repackaged")
        .key("softwareAgent")
        .map(2)
        .key("name")
        .value("Truepic libc2pa C++ Library")
        .key("version")
        .value("3.1.28")
        .key("parameters")
        .map(1)
        .key("ingredients")
        .array(1)
        .map(3)
        .key("alg")
        .value("sha256")
        .key("hash")
        .value(&[0x01u8, 0x02, 0x03, 0x04][..])
        .key("url")
        .value("the_url")
        .end();

    let top = Cursor::new(encoder.encoded());
    let action = top.find("actions").at(0);

    assert_eq!(action.find("action").text(), Some("c2pa.repackaged"));
    assert_eq!(
        action.find("softwareAgent").find("version").text(),
        Some("3.1.28")
    );

    // iterating past a nested map lands on the following key
    assert_eq!(action.key_at(0).text(), Some("action"));
    assert_eq!(action.key_at(1).text(), Some("softwareAgent"));
    assert_eq!(action.key_at(2).text(), Some("parameters"));

    let ingredient = action
        .find("parameters")
        .find("ingredients")
        .at(0);
    assert_eq!(ingredient.find("alg").text(), Some("sha256"));
    assert_eq!(
        ingredient.find("hash").bytes(),
        Some(&[0x01u8, 0x02, 0x03, 0x04][..])
    );
    assert_eq!(ingredient.find("url").text(), Some("the_url"));
}

#[test]
fn round_trip_primitives() {
    let mut bytes = [0u8; 64];
    let mut encoder = Encoder::new(&mut bytes);

    encoder
        .begin_array()
        .item(0)
        .item(1000000)
        .item(-1000000)
        .item(true)
        .item(false)
        .item(SimpleValue::Null)
        .item("text")
        .item(&[0xde, 0xad, 0xbe, 0xef][..])
        .end();

    let top = Cursor::new(encoder.encoded());
    assert_eq!(top.at(0).unsigned(), Some(0));
    assert_eq!(top.at(1).unsigned(), Some(1000000));
    assert_eq!(top.at(2).negative(), Some(-1000000));
    assert_eq!(top.at(3).boolean(), Some(true));
    assert_eq!(top.at(4).boolean(), Some(false));
    assert_eq!(top.at(5).minor_type(), 22);
    assert_eq!(top.at(6).text(), Some("text"));
    assert_eq!(top.at(7).bytes(), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
    assert!(top.at(9).is_null());
}

#[test]
fn timestamp_round_trip() {
    println!("<======================= timestamp_round_trip =====================>");
    let mut bytes = [0u8; 32];
    let mut encoder = Encoder::new(&mut bytes);

    encoder.begin_map().key("when").timestamp(1663363130).end();

    let when = Cursor::new(encoder.encoded()).find("when");
    assert_eq!(when.tag(), 1);
    assert_eq!(when.timestamp(), Some(1663363130));
    assert_eq!(
        when.epoch(),
        Utc.timestamp_opt(1663363130, 0).single()
    );
}

#[test]
fn chrono_epoch_round_trip() {
    let instant = Utc.timestamp_opt(1_600_000_000, 0).single().unwrap();

    let mut bytes = [0u8; 8];
    let mut encoder = Encoder::new(&mut bytes);
    encoder.epoch(&instant);

    let cursor = Cursor::new(encoder.encoded());
    assert_eq!(cursor.epoch(), Some(instant));

    // pre-epoch instants have no 32-bit wire form and are dropped
    let before = Utc.timestamp_opt(-1, 0).single().unwrap();
    let mut bytes = [0u8; 8];
    let mut encoder = Encoder::new(&mut bytes);
    encoder.epoch(&before);
    assert_eq!(encoder.len(), 0);
}

#[test]
fn nested_indefinite_containers_round_trip() {
    let mut bytes = [0u8; 64];
    let mut encoder = Encoder::new(&mut bytes);

    encoder
        .begin_map()
        .key("levels")
        .begin_array()
        .begin_array()
        .item(1)
        .end()
        .begin_array()
        .item(2)
        .item(3)
        .end()
        .end()
        .end();

    let levels = Cursor::new(encoder.encoded()).find("levels");
    assert_eq!(levels.size(), SIZE_INDEFINITE);
    assert_eq!(levels.at(0).at(0).unsigned(), Some(1));
    assert_eq!(levels.at(1).at(0).unsigned(), Some(2));
    assert_eq!(levels.at(1).at(1).unsigned(), Some(3));
    assert!(levels.at(2).is_null());

    // each nested array measures to its own extent
    assert_eq!(levels.at(0).cbor(), Some(&[0x9f, 0x01, 0xff][..]));
    assert_eq!(levels.at(1).cbor(), Some(&[0x9f, 0x02, 0x03, 0xff][..]));
}

#[test]
fn sub_slice_reencodes_verbatim() {
    // extract an inner document and splice it into a new message unchanged
    let mut bytes = [0u8; 32];
    let mut encoder = Encoder::new(&mut bytes);
    encoder.map(1).key("inner").array(2).item(1).item(2);

    let inner = Cursor::new(encoder.encoded()).find("inner");
    let extracted: Vec<u8> = inner.cbor().unwrap().to_vec();
    assert_eq!(extracted, &[0x82, 0x01, 0x02]);

    let mut outer = [0u8; 32];
    let mut wrapper = Encoder::new(&mut outer);
    wrapper.begin_array().item(0);
    wrapper.write_bytes(&extracted);
    wrapper.end();

    let spliced = Cursor::new(wrapper.encoded());
    assert_eq!(spliced.at(1).at(1).unsigned(), Some(2));
}
