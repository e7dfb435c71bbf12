//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Reader files (`.zrd`) are dynamically-typed value trees, serialized in
//! pre-order. The game uses them for all sorts of configuration.
//!
//! Each node is a `{type_tag (u32), payload}` pair: `1` a signed 32-bit
//! integer, `2` a float, `3` a length-prefixed ASCII string, `4` a list.
//! A list's length prefix is one greater than its number of children,
//! because the engine stores the count as an integer node in the list's
//! first slot. A list with zero children denotes "no value".

use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::binary::{ReadBytes, WriteBytes};
use crate::check::{assert_gt, assert_in};
use crate::error::Result;
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};
use crate::utils::check_size_mismatch;

#[cfg(test)] mod reader_test;

/// Extension used by reader files inside their archive.
pub const EXTENSION: &str = ".zrd";

const TYPE_INT: u32 = 1;
const TYPE_FLOAT: u32 = 2;
const TYPE_STRING: u32 = 3;
const TYPE_LIST: u32 = 4;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This holds an entire reader file decoded in memory.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct ReaderTree {
    root: ReaderValue,
}

/// A single node of a reader tree.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReaderValue {
    Null,
    Int(i32),
    Float(f32),
    String(String),
    List(Vec<ReaderValue>),
}

//---------------------------------------------------------------------------//
//                           Implementation of ReaderTree
//---------------------------------------------------------------------------//

/// Implementation of `ReaderTree`.
impl ReaderTree {

    pub fn new(root: ReaderValue) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &ReaderValue {
        &self.root
    }
}

/// Implementation of `ReaderValue`.
impl ReaderValue {

    fn read<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let start = data.stream_position()?;
        let node_type = data.read_u32()?;
        assert_in("node type", &[TYPE_INT, TYPE_FLOAT, TYPE_STRING, TYPE_LIST], node_type, start)?;

        match node_type {
            TYPE_INT => Ok(Self::Int(data.read_i32()?)),
            TYPE_FLOAT => Ok(Self::Float(data.read_f32()?)),
            TYPE_STRING => Ok(Self::String(data.read_sized_string_u8_u32()?)),
            _ => {
                // The count is one bigger, because the engine stores the
                // count as an integer node as the first item of the list.
                let count_offset = data.stream_position()?;
                let count = data.read_u32()?;
                assert_gt("list count", 0, count, count_offset)?;

                let count = count - 1;
                if count == 0 {
                    return Ok(Self::Null);
                }

                let mut values = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    values.push(Self::read(data)?);
                }

                // Lists cannot be turned into dictionaries here, since there
                // can be duplicate keys. See `to_json_value`.
                Ok(Self::List(values))
            }
        }
    }

    fn write<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        match self {
            Self::Int(value) => {
                buffer.write_u32(TYPE_INT)?;
                buffer.write_i32(*value)
            }
            Self::Float(value) => {
                buffer.write_u32(TYPE_FLOAT)?;
                buffer.write_f32(*value)
            }
            Self::String(value) => {
                buffer.write_u32(TYPE_STRING)?;
                buffer.write_sized_string_u8_u32(value)
            }
            Self::Null => {
                buffer.write_u32(TYPE_LIST)?;
                buffer.write_u32(1)
            }
            Self::List(values) => {
                buffer.write_u32(TYPE_LIST)?;
                buffer.write_u32(values.len() as u32 + 1)?;
                for value in values {
                    value.write(buffer)?;
                }
                Ok(())
            }
        }
    }

    /// This function returns whether the list qualifies for the map view: an even number of
    /// children, every child at an even position a string, and no duplicate keys.
    fn is_map_like(values: &[ReaderValue]) -> bool {
        if values.is_empty() || values.len() % 2 != 0 {
            return false;
        }

        let mut seen = std::collections::HashSet::new();
        values.iter().tuples().all(|(key, _value)| match key {
            ReaderValue::String(key) => seen.insert(key.clone()),
            _ => false,
        })
    }

    /// This function renders the value as JSON. With `map_view`, qualifying lists are rendered
    /// as key-ordered maps instead.
    ///
    /// The map view is a pure rendering option for human inspection. The
    /// in-memory representation stays a list, and repacking always writes
    /// the list, preserving the original order.
    pub fn to_json_value(&self, map_view: bool) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Int(value) => json!(value),
            Self::Float(value) => json!(value),
            Self::String(value) => json!(value),
            Self::List(values) => {
                if map_view && Self::is_map_like(values) {
                    let mut map = Map::new();
                    let mut pairs: Vec<(&String, &ReaderValue)> = values.iter()
                        .tuples()
                        .map(|(key, value)| match key {
                            ReaderValue::String(key) => (key, value),
                            _ => unreachable!("is_map_like"),
                        })
                        .collect();
                    pairs.sort_by_key(|(key, _)| key.to_owned());

                    for (key, value) in pairs {
                        map.insert(key.to_owned(), value.to_json_value(map_view));
                    }
                    Value::Object(map)
                } else {
                    Value::Array(values.iter().map(|value| value.to_json_value(map_view)).collect())
                }
            }
        }
    }
}

impl Decodeable for ReaderTree {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let root = ReaderValue::read(data)?;

        // Make sure all the data is processed.
        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;
        Ok(Self { root })
    }
}

impl Encodeable for ReaderTree {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        self.root.write(buffer)
    }
}
