//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding reader trees.

use std::io::Cursor;

use serde_json::json;

use crate::files::*;

use super::*;

#[test]
fn test_reader_known_byte_sequence() {
    // [1, 2.5, "hi", [42]]
    let expected: Vec<u8> = vec![
        0x04, 0x00, 0x00, 0x00, // list
        0x05, 0x00, 0x00, 0x00, // 4 children + 1
        0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, // int 1
        0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x40, // float 2.5
        0x03, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, b'h', b'i', // "hi"
        0x04, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, // list, 1 child + 1
        0x01, 0x00, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00, // int 42
    ];

    let mut tree = ReaderTree::new(ReaderValue::List(vec![
        ReaderValue::Int(1),
        ReaderValue::Float(2.5),
        ReaderValue::String("hi".to_owned()),
        ReaderValue::List(vec![ReaderValue::Int(42)]),
    ]));

    let mut encoded = vec![];
    tree.encode(&mut encoded, &None).unwrap();
    assert_eq!(encoded, expected);

    let mut decoded = ReaderTree::decode(&mut Cursor::new(expected.to_vec()), &None).unwrap();
    assert_eq!(decoded, tree);

    let mut again = vec![];
    decoded.encode(&mut again, &None).unwrap();
    assert_eq!(again, expected);
}

#[test]
fn test_reader_empty_list_is_null() {
    let data: Vec<u8> = vec![0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
    let mut tree = ReaderTree::decode(&mut Cursor::new(data.to_vec()), &None).unwrap();
    assert_eq!(*tree.root(), ReaderValue::Null);

    let mut encoded = vec![];
    tree.encode(&mut encoded, &None).unwrap();
    assert_eq!(encoded, data);
}

#[test]
fn test_reader_unknown_tag_fails() {
    let data: Vec<u8> = vec![0x05, 0x00, 0x00, 0x00];
    assert!(ReaderTree::decode(&mut Cursor::new(data), &None).is_err());
}

#[test]
fn test_reader_trailing_data_fails() {
    let data: Vec<u8> = vec![0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFF];
    assert!(ReaderTree::decode(&mut Cursor::new(data), &None).is_err());
}

#[test]
fn test_reader_json_round_trip_through_serde() {
    let tree = ReaderTree::new(ReaderValue::List(vec![
        ReaderValue::Int(-1),
        ReaderValue::Float(0.5),
        ReaderValue::Null,
        ReaderValue::String("key".to_owned()),
    ]));

    let text = serde_json::to_string(&tree).unwrap();
    let back: ReaderTree = serde_json::from_str(&text).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_reader_map_view_is_a_pure_rendering_option() {
    let values = vec![
        ReaderValue::String("zulu".to_owned()),
        ReaderValue::Int(1),
        ReaderValue::String("alpha".to_owned()),
        ReaderValue::Int(2),
    ];
    let root = ReaderValue::List(values);

    // Map view: key-ordered object.
    let rendered = root.to_json_value(true);
    assert_eq!(rendered, json!({"alpha": 2, "zulu": 1}));

    // Plain view: the original list, original order.
    let rendered = root.to_json_value(false);
    assert_eq!(rendered, json!(["zulu", 1, "alpha", 2]));

    // Duplicate keys disqualify the map view.
    let root = ReaderValue::List(vec![
        ReaderValue::String("dup".to_owned()),
        ReaderValue::Int(1),
        ReaderValue::String("dup".to_owned()),
        ReaderValue::Int(2),
    ]);
    assert_eq!(root.to_json_value(true), json!(["dup", 1, "dup", 2]));
}
