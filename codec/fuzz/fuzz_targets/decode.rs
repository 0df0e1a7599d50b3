#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use packwire_codec::{Config, Decode, Encode, Record};
use std::collections::{BTreeMap, HashSet};

#[derive(Record, Debug, PartialEq)]
struct Message {
    id: u64,
    sender: String,
    tags: HashSet<String>,
    payload: Vec<u8>,
    reply_to: Option<(u32, char)>,
    scores: BTreeMap<i16, f64>,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput<'a> {
    max_len: Option<u16>,
    data: &'a [u8],
}

// Untrusted input must fail cleanly, and anything accepted must re-encode to something that
// decodes to the same value. Non-minimal rungs are accepted, so bytes may differ.
fn decode<T>(data: &[u8], cfg: &Config)
where
    T: Encode + Decode + PartialEq + std::fmt::Debug,
{
    let Ok(value) = T::decode_cfg(Bytes::copy_from_slice(data), cfg) else {
        return;
    };
    let encoded = value.encode();
    assert!(encoded.len() <= data.len());
    let decoded = T::decode_cfg(encoded, cfg).expect("Failed to decode a re-encoded value!");
    assert_eq!(value, decoded);
}

fn fuzz(input: FuzzInput) {
    let cfg = match input.max_len {
        Some(max_len) => Config::new().with_max_len(max_len as usize),
        None => Config::default(),
    };
    let data = input.data;

    decode::<u8>(data, &cfg);
    decode::<i64>(data, &cfg);
    decode::<usize>(data, &cfg);
    decode::<bool>(data, &cfg);
    decode::<char>(data, &cfg);
    decode::<String>(data, &cfg);
    decode::<Vec<u32>>(data, &cfg);
    decode::<Vec<Vec<bool>>>(data, &cfg);
    decode::<BTreeMap<String, Option<i32>>>(data, &cfg);
    decode::<[i16; 4]>(data, &cfg);
    decode::<(u64, String, Vec<char>)>(data, &cfg);

    // Floats carry NaN, which never compares equal.
    let _ = Message::decode_cfg(Bytes::copy_from_slice(data), &cfg);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
