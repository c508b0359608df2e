//! Builders for dictionaries and payloads used by the integration tests.

#![allow(dead_code)]

use bej_schema::{Format, ENTRY_RECORD_LEN, ROOT_HEADER_LEN};

pub const SET: u8 = Format::SET;
pub const ARRAY: u8 = Format::ARRAY;
pub const NULL: u8 = Format::NULL;
pub const INTEGER: u8 = Format::INTEGER;
pub const ENUM: u8 = Format::ENUM;
pub const STRING: u8 = Format::STRING;
pub const BOOLEAN: u8 = Format::BOOLEAN;

pub struct Node {
    pub format:   u8,
    pub seq:      u16,
    pub name:     &'static str,
    pub children: Vec<Node>,
}

pub fn node(format: u8, seq: u16, name: &'static str, children: Vec<Node>) -> Node {
    Node { format, seq, name, children }
}

pub fn leaf(format: u8, seq: u16, name: &'static str) -> Node {
    node(format, seq, name, vec![])
}

struct Slot<'a> {
    node:        &'a Node,
    child_index: usize,
}

// Siblings are laid out contiguously; each block of children follows its
// parent's block.
fn place<'a>(nodes: &'a [Node], slots: &mut Vec<Slot<'a>>) -> usize {
    let first = slots.len();
    for node in nodes {
        slots.push(Slot { node, child_index: 0 });
    }
    for (i, node) in nodes.iter().enumerate() {
        if !node.children.is_empty() {
            slots[first + i].child_index = place(&node.children, slots);
        }
    }
    first
}

fn record_offset(index: usize) -> usize {
    ROOT_HEADER_LEN + index * ENTRY_RECORD_LEN
}

/// Encodes `root` as a dictionary: root header, records, then the name table.
pub fn dictionary(root: &Node) -> Vec<u8> {
    let mut slots = Vec::new();
    place(std::slice::from_ref(root), &mut slots);

    let names_start = record_offset(slots.len());
    let mut names = Vec::new();

    let mut out = vec![0x00, 0x00];
    out.extend_from_slice(&0x0001_0000u32.to_le_bytes());
    out.extend_from_slice(&(slots.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for slot in &slots {
        let node = slot.node;
        let (name_len, name_offset) = if node.name.is_empty() {
            (0, 0)
        } else {
            let offset = names_start + names.len();
            names.extend_from_slice(node.name.as_bytes());
            names.push(0);
            (node.name.len() + 1, offset)
        };
        let child_offset = if node.children.is_empty() {
            0
        } else {
            record_offset(slot.child_index)
        };

        out.push(node.format << 4);
        out.extend_from_slice(&node.seq.to_le_bytes());
        out.extend_from_slice(&(child_offset as u16).to_le_bytes());
        out.extend_from_slice(&(node.children.len() as u16).to_le_bytes());
        out.push(name_len as u8);
        out.extend_from_slice(&(name_offset as u16).to_le_bytes());
    }
    out.extend_from_slice(&names);

    let size = out.len() as u32;
    out[8..12].copy_from_slice(&size.to_le_bytes());
    out
}

/// A dictionary whose root set lists itself as its only child, so any depth
/// of nested sets resolves.
pub fn recursive_dictionary() -> Vec<u8> {
    let mut out = vec![0x00, 0x00];
    out.extend_from_slice(&0x0001_0000u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&((ROOT_HEADER_LEN + ENTRY_RECORD_LEN) as u32).to_le_bytes());
    out.push(SET << 4);
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(ROOT_HEADER_LEN as u16).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.push(0);
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

/// `levels` sets, each holding the next one.
pub fn nested_sets(levels: usize) -> Vec<u8> {
    let mut root = set(0, &[]);
    for _ in 1..levels {
        root = set(0, &[root]);
    }
    payload(&root)
}

pub fn nnint(value: u64) -> Vec<u8> {
    let width = (8 - value.leading_zeros() as usize / 8).max(1);
    let mut out = vec![width as u8];
    out.extend_from_slice(&value.to_le_bytes()[..width]);
    out
}

/// Shortest two's-complement encoding of `value`.
pub fn int_bytes(value: i64) -> Vec<u8> {
    let bytes = value.to_le_bytes();
    let mut width = 8;
    while width > 1 {
        let top = bytes[width - 1];
        let sign = bytes[width - 2] & 0x80;
        if (top == 0x00 && sign == 0) || (top == 0xFF && sign != 0) {
            width -= 1;
        } else {
            break;
        }
    }
    bytes[..width].to_vec()
}

pub fn tagged(tag: u64, format: u8, value: &[u8]) -> Vec<u8> {
    let mut out = nnint(tag);
    out.push(format << 4);
    out.extend(nnint(value.len() as u64));
    out.extend_from_slice(value);
    out
}

pub fn element(seq: u64, format: u8, value: &[u8]) -> Vec<u8> {
    tagged(seq << 1, format, value)
}

pub fn integer(seq: u64, value: i64) -> Vec<u8> {
    element(seq, INTEGER, &int_bytes(value))
}

pub fn string(seq: u64, value: &str) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    element(seq, STRING, &bytes)
}

pub fn boolean(seq: u64, value: bool) -> Vec<u8> {
    element(seq, BOOLEAN, &[value as u8])
}

pub fn null(seq: u64) -> Vec<u8> {
    element(seq, NULL, &[])
}

pub fn enumeration(seq: u64, selector: u64) -> Vec<u8> {
    element(seq, ENUM, &nnint(selector))
}

fn members(members: &[Vec<u8>]) -> Vec<u8> {
    let mut value = nnint(members.len() as u64);
    for member in members {
        value.extend_from_slice(member);
    }
    value
}

pub fn set(seq: u64, fields: &[Vec<u8>]) -> Vec<u8> {
    element(seq, SET, &members(fields))
}

pub fn array(seq: u64, items: &[Vec<u8>]) -> Vec<u8> {
    element(seq, ARRAY, &members(items))
}

pub fn payload_with_header(version: u32, flags: u16, schema_class: u8, root: &[u8]) -> Vec<u8> {
    let mut out = version.to_le_bytes().to_vec();
    out.extend_from_slice(&flags.to_le_bytes());
    out.push(schema_class);
    out.extend_from_slice(root);
    out
}

pub fn payload(root: &[u8]) -> Vec<u8> {
    payload_with_header(0xF1F0_F000, 0, 0x00, root)
}

pub fn memory_dictionary() -> Vec<u8> {
    dictionary(&node(SET, 0, "Memory", vec![
        node(ARRAY, 0, "AllowedSpeedsMHz", vec![leaf(INTEGER, 0, "")]),
        leaf(INTEGER, 1, "CapacityMiB"),
        leaf(INTEGER, 2, "DataWidthBits"),
        node(ENUM, 3, "ErrorCorrection", vec![
            leaf(STRING, 0, "NoECC"),
            leaf(STRING, 1, "SingleBitECC"),
            leaf(STRING, 2, "MultiBitECC"),
            leaf(STRING, 3, "AddressParity"),
        ]),
        leaf(BOOLEAN, 4, "IsRankSpareEnabled"),
        leaf(STRING, 5, "Manufacturer"),
        node(SET, 6, "MemoryLocation", vec![
            leaf(INTEGER, 0, "Channel"),
            leaf(INTEGER, 1, "MemoryController"),
            leaf(INTEGER, 2, "Slot"),
            leaf(INTEGER, 3, "Socket"),
        ]),
        leaf(STRING, 7, "PartNumber"),
    ]))
}

pub fn memory_payload() -> Vec<u8> {
    payload(&set(0, &[
        integer(1, 65536),
        integer(2, 64),
        array(0, &[integer(0, 2400), integer(1, 3200)]),
        enumeration(3, 0),
        set(6, &[integer(0, 0), integer(2, 0)]),
        boolean(4, true),
        null(7),
        string(5, "Some"),
    ]))
}

pub const MEMORY_JSON: &str = "{\n\
    \x20   \"CapacityMiB\": 65536,\n\
    \x20   \"DataWidthBits\": 64,\n\
    \x20   \"AllowedSpeedsMHz\": [\n\
    \x20       2400,\n\
    \x20       3200\n\
    \x20   ],\n\
    \x20   \"ErrorCorrection\": \"NoECC\",\n\
    \x20   \"MemoryLocation\": {\n\
    \x20       \"Channel\": 0,\n\
    \x20       \"Slot\": 0\n\
    \x20   },\n\
    \x20   \"IsRankSpareEnabled\": true,\n\
    \x20   \"PartNumber\": null,\n\
    \x20   \"Manufacturer\": \"Some\"\n\
    }";

pub fn message_dictionary() -> Vec<u8> {
    dictionary(&node(SET, 0, "Message", vec![
        leaf(STRING, 0, "Message"),
        node(ARRAY, 1, "MessageArgs", vec![leaf(STRING, 0, "")]),
        leaf(STRING, 2, "MessageId"),
        node(ARRAY, 3, "RelatedProperties", vec![leaf(STRING, 0, "")]),
        leaf(STRING, 4, "Resolution"),
        node(ENUM, 5, "Severity", vec![
            leaf(STRING, 0, "Critical"),
            leaf(STRING, 1, "OK"),
            leaf(STRING, 2, "Warning"),
        ]),
    ]))
}

pub fn message_payload() -> Vec<u8> {
    payload(&set(0, &[
        string(2, "Base.1.8.PropertyValueError"),
        string(0, "The value for the property MemorySize is not valid."),
        array(1, &[string(0, "MemorySize"), string(1, "4096")]),
        enumeration(5, 2),
        string(4, "Correct the property value and retry the operation."),
        array(3, &[
            string(0, "/Systems/1/Memory/1/CapacityMiB"),
            string(1, "/Systems/1/Memory/1/SpeedMHz"),
        ]),
    ]))
}

pub const MESSAGE_JSON: &str = "{\n\
    \x20   \"MessageId\": \"Base.1.8.PropertyValueError\",\n\
    \x20   \"Message\": \"The value for the property MemorySize is not valid.\",\n\
    \x20   \"MessageArgs\": [\n\
    \x20       \"MemorySize\",\n\
    \x20       \"4096\"\n\
    \x20   ],\n\
    \x20   \"Severity\": \"Warning\",\n\
    \x20   \"Resolution\": \"Correct the property value and retry the operation.\",\n\
    \x20   \"RelatedProperties\": [\n\
    \x20       \"/Systems/1/Memory/1/CapacityMiB\",\n\
    \x20       \"/Systems/1/Memory/1/SpeedMHz\"\n\
    \x20   ]\n\
    }";
