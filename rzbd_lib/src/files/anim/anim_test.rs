//---------------------------------------------------------------------------//
// Copyright (c) 2022-2026 The RZBD project developers. All rights reserved.
//
// This file is part of the Rusted ZBD Manager (RZBD) project,
// which can be found here: https://github.com/rzbd/rzbd.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/rzbd/rzbd/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding anim files.

use std::io::Cursor;

use crate::files::*;

use super::activation_prereq::*;
use super::anim_def::*;
use super::events::animation::CallAnimation;
use super::events::control_flow::{Condition, If, Loop};
use super::events::sound::Sound;
use super::events::*;
use super::*;

fn small_anim_def() -> AnimDef {
    AnimDef {
        name: "exp_flash".to_owned(),
        anim_name: NamePad { name: "exp_flash_anim".to_owned(), pad: vec![0; 17] },
        anim_root: NamePad { name: "exp_flash".to_owned(), pad: vec![0; 22] },
        activation: AnimActivation::OnCall,
        auto_reset_node_states: true,
        execution_by_range: None,
        execution_by_zone: false,
        network_log: Some(false),
        save_log: None,
        has_callback: false,
        reset_time: None,
        health: 0.0,
        proximity_damage: true,
        objects: vec![],
        nodes: vec![NamePtrFlag { name: "burner".to_owned(), ptr: 0xAA00, flag: 0 }],
        lights: vec![],
        puffers: vec![],
        dynamic_sounds: vec![],
        static_sounds: vec![NamePad { name: "boom".to_owned(), pad: vec![0; 27] }],
        activation_prereq: None,
        anim_refs: vec![NamePad { name: "exp_sub".to_owned(), pad: vec![] }],
        reset_state: None,
        sequences: vec![SeqDef {
            name: "seq1".to_owned(),
            activation: SeqActivation::None,
            ptr: 0x50,
            script: vec![
                Event {
                    data: EventData::CallAnimation(CallAnimation {
                        name: "exp_sub".to_owned(),
                        flag: 1,
                        unk34: 0,
                        unk38: 0xFFFF,
                        at_node: Some(AtNodeRotated {
                            node: "burner".to_owned(),
                            translation: [0.0, 0.0, 0.0],
                            rotation: [0.0, 0.0, 0.0],
                        }),
                    }),
                    start_offset: StartOffset::Unset,
                    start_time: 0.0,
                },
                Event {
                    data: EventData::Sound(Sound {
                        name: "boom".to_owned(),
                        at_node: Some(AtNode {
                            node: "burner".to_owned(),
                            translation: [1.0, 2.0, 3.0],
                        }),
                    }),
                    start_offset: StartOffset::Sequence,
                    start_time: 1.5,
                },
                Event {
                    data: EventData::Loop(Loop { loop_count: -1 }),
                    start_offset: StartOffset::Animation,
                    start_time: 2.0,
                },
                Event {
                    data: EventData::If(If { condition: Condition::PlayerRange(100.0) }),
                    start_offset: StartOffset::Event,
                    start_time: 0.25,
                },
            ],
        }],
        base_node_ptr: 0x1000,
        anim_root_ptr: 0x1000,
        objects_ptr: 0,
        nodes_ptr: 0x2000,
        lights_ptr: 0,
        puffers_ptr: 0,
        dynamic_sounds_ptr: 0,
        static_sounds_ptr: 0x3000,
        activ_prereqs_ptr: 0,
        anim_refs_ptr: 0x4000,
        reset_state_ptr: 0,
        seq_defs_ptr: 0x5000,
    }
}

fn small_anim() -> Anim {
    let mut anim = Anim::default();
    anim.anim_names_mut().push(AnimName {
        name: "exp_flash_anim".to_owned(),
        pad: vec![0xCC; 65],
        unk: 0,
    });
    anim.anim_defs_mut().push(small_anim_def());
    *anim.anim_ptr_mut() = 0x9000;
    *anim.world_ptr_mut() = 0x9100;
    anim
}

#[test]
fn test_anim_round_trip() {
    let mut anim = small_anim();

    let mut before = vec![];
    anim.encode(&mut before, &None).unwrap();

    let mut decoded = Anim::decode(&mut Cursor::new(before.to_vec()), &None).unwrap();
    assert_eq!(decoded, anim);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_anim_call_animation_event_wire_size() {
    let anim_def = small_anim_def();
    let event = &anim_def.sequences[0].script[0];
    assert_eq!(event.size(), 80);

    let mut data = vec![];
    event.write(&mut data, &anim_def).unwrap();
    assert_eq!(data.len(), 80);

    // Opcode 24, start offset animation, size, zero start time.
    assert_eq!(data[0], 24);
    assert_eq!(data[1], 1);
    assert_eq!(&data[4..8], &80u32.to_le_bytes());
    assert_eq!(&data[8..12], &0.0f32.to_le_bytes());

    let decoded = Event::read(&mut Cursor::new(data.to_vec()), &anim_def).unwrap();
    assert_eq!(decoded, *event);

    let mut again = vec![];
    decoded.write(&mut again, &anim_def).unwrap();
    assert_eq!(data, again);
}

#[test]
fn test_anim_unknown_opcode_fails() {
    let anim_def = small_anim_def();

    let mut data = vec![];
    // Opcode 99 does not exist: no skip-and-continue, a hard failure.
    data.push(99);
    data.push(1);
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&12u32.to_le_bytes());
    data.extend_from_slice(&0.0f32.to_le_bytes());

    assert!(Event::read(&mut Cursor::new(data), &anim_def).is_err());
}

#[test]
fn test_anim_input_node_sentinel() {
    let anim_def = small_anim_def();

    assert_eq!(anim_def.node_or_input_from_index(-200, 0).unwrap(), "INPUT_NODE");
    assert_eq!(anim_def.node_or_input_to_index("INPUT_NODE").unwrap(), -200);
    assert_eq!(anim_def.node_or_input_from_index(1, 0).unwrap(), "burner");
    assert_eq!(anim_def.node_or_input_to_index("burner").unwrap(), 1);

    // Out-of-bounds indices are an error.
    assert!(anim_def.node_from_index(0, 0).is_err());
    assert!(anim_def.node_from_index(2, 0).is_err());
}

#[test]
fn test_anim_callback_without_flag_fails() {
    let mut anim_def = small_anim_def();
    anim_def.sequences[0].script.push(Event {
        data: EventData::Callback(super::events::control_flow::Callback { value: 1 }),
        start_offset: StartOffset::Animation,
        start_time: 1.0,
    });

    let mut anim = Anim::default();
    anim.anim_defs_mut().push(anim_def);
    *anim.anim_ptr_mut() = 1;
    *anim.world_ptr_mut() = 1;

    let mut data = vec![];
    anim.encode(&mut data, &None).unwrap();
    assert!(Anim::decode(&mut Cursor::new(data), &None).is_err());
}

#[test]
fn test_activation_prereq_parent_latching() {
    let prereq = ActivationPrereq {
        min_to_satisfy: 1,
        anim_list: vec!["other_anim".to_owned()],
        obj_list: vec![
            PrereqObject {
                required: true,
                active: true,
                name: "turret".to_owned(),
                ptr: 0x10,
                parent_name: "hull".to_owned(),
                parent_ptr: 0x20,
            },
            PrereqObject {
                required: false,
                active: false,
                name: "door".to_owned(),
                ptr: 0x30,
                parent_name: String::new(),
                parent_ptr: 0,
            },
        ],
    };

    // One anim + one parented object (two records) + one plain object.
    assert_eq!(count_activation_prereqs(&prereq), 4);

    let mut data = vec![];
    write_activation_prereq(&mut data, &prereq).unwrap();
    assert_eq!(data.len() as u64, 4 * PREREQ_SIZE);

    let decoded = read_activation_prereq(&mut Cursor::new(data.to_vec()), 4, 1).unwrap();
    assert_eq!(decoded, prereq);

    let mut again = vec![];
    write_activation_prereq(&mut again, &decoded).unwrap();
    assert_eq!(data, again);
}
