#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use packwire_codec::{width, Decode, DecodeExt, Encode, Record};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

#[derive(Arbitrary, Record, Debug, PartialEq)]
struct Inner {
    a: i32,
    b: Option<u16>,
    c: [u8; 3],
}

#[derive(Arbitrary, Record, Debug, PartialEq)]
struct Outer {
    name: String,
    inner: Inner,
    values: Vec<i64>,
    index: BTreeMap<String, u32>,
    flag: bool,
    letter: char,
}

fn roundtrip<T>(value: T)
where
    T: Encode + Decode + PartialEq + std::fmt::Debug,
{
    let encoded = value.encode();
    assert_eq!(value.encode_size(), encoded.len());
    let decoded = T::decode_exact(encoded).expect("Failed to decode an encoded value!");
    assert_eq!(value, decoded);
}

fn roundtrip_unsigned(v: u64) {
    let encoded = v.encode();
    let rung = width::Width::for_unsigned(v);
    assert_eq!(encoded.len(), width::INDICATOR_SIZE + rung.len());
    assert_eq!(encoded[0] as usize, rung.len());
    roundtrip(v);
}

fn roundtrip_signed(v: i64) {
    let encoded = v.encode();
    let rung = width::Width::for_signed(v);
    assert_eq!(encoded.len(), width::INDICATOR_SIZE + rung.len());
    roundtrip(v);
}

// NaN never compares equal, so floats are compared by bits.
fn roundtrip_f32(v: f32) {
    let decoded = f32::decode_exact(v.encode()).expect("Failed to decode f32!");
    assert_eq!(v.to_bits(), decoded.to_bits());
}

fn roundtrip_f64(v: f64) {
    let decoded = f64::decode_exact(v.encode()).expect("Failed to decode f64!");
    assert_eq!(v.to_bits(), decoded.to_bits());
}

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    // Records
    Outer(Outer),
    Inner(Inner),

    // Collections
    Map(HashMap<u64, String>),
    Set(HashSet<i16>),
    BTreeMap(BTreeMap<u32, Vec<u8>>),
    BTreeSet(BTreeSet<u64>),
    Vec(Vec<u32>),
    VecDeque(VecDeque<i8>),
    String(String),

    // Arrays, options and tuples
    Array([u16; 8]),
    Option(Option<u64>),
    Tuple(u8, i64, bool),

    // Primitives
    Bool(bool),
    Char(char),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Usize(usize),
    F32(f32),
    F64(f64),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Outer(v) => roundtrip(v),
        FuzzInput::Inner(v) => roundtrip(v),
        FuzzInput::Map(v) => roundtrip(v),
        FuzzInput::Set(v) => roundtrip(v),
        FuzzInput::BTreeMap(v) => roundtrip(v),
        FuzzInput::BTreeSet(v) => roundtrip(v),
        FuzzInput::Vec(v) => roundtrip(v),
        FuzzInput::VecDeque(v) => roundtrip(v),
        FuzzInput::String(v) => roundtrip(v),
        FuzzInput::Array(v) => roundtrip(v),
        FuzzInput::Option(v) => roundtrip(v),
        FuzzInput::Tuple(a, b, c) => roundtrip((a, b, c)),
        FuzzInput::Bool(v) => roundtrip(v),
        FuzzInput::Char(v) => roundtrip(v),
        FuzzInput::U8(v) => roundtrip(v),
        FuzzInput::U16(v) => roundtrip(v),
        FuzzInput::U32(v) => roundtrip(v),
        FuzzInput::U64(v) => roundtrip_unsigned(v),
        FuzzInput::I8(v) => roundtrip(v),
        FuzzInput::I16(v) => roundtrip(v),
        FuzzInput::I32(v) => roundtrip(v),
        FuzzInput::I64(v) => roundtrip_signed(v),
        FuzzInput::Usize(v) => roundtrip(v),
        FuzzInput::F32(v) => roundtrip_f32(v),
        FuzzInput::F64(v) => roundtrip_f64(v),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
