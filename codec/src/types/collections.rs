//! Codec implementations for sets and maps.
//!
//! Sets are written like sequences. Maps are written as their entry count followed by each key
//! immediately followed by its value.
//!
//! Entries are written in the collection's own iteration order; no canonical order is imposed.
//! `BTreeMap`/`BTreeSet` therefore encode deterministically, while `HashMap`/`HashSet` may not.
//! Callers needing identical bytes for identical contents should use the ordered collections.
//!
//! When decoding, a repeated key replaces the earlier entry.

use crate::{
    schema::{Describe, Kind},
    util::{len_size, read_len, write_len},
    width, Config, EncodeSize, Error, Read, Write,
};
use bytes::{Buf, BufMut};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::{BuildHasher, Hash},
};

macro_rules! impl_set {
    ($set:ident, $($bound:path),+ ; $($hasher:ident)?) => {
        impl<K: Write $(, $hasher)?> Write for $set<K $(, $hasher)?> {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                write_len(self.len(), buf);
                for item in self {
                    item.write(buf);
                }
            }
        }

        impl<K: EncodeSize $(, $hasher)?> EncodeSize for $set<K $(, $hasher)?> {
            #[inline]
            fn encode_size(&self) -> usize {
                len_size(self.len()) + self.iter().map(EncodeSize::encode_size).sum::<usize>()
            }
        }

        impl<K: Read $(+ $bound)+ $(, $hasher: BuildHasher + Default)?> Read for $set<K $(, $hasher)?> {
            const MIN_SIZE: usize = width::MIN_SIZE;

            #[inline]
            fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
                let len = read_len(buf, cfg, K::MIN_SIZE)?;
                let mut set = Self::default();
                for _ in 0..len {
                    set.insert(K::read_cfg(buf, cfg)?);
                }
                Ok(set)
            }
        }

        impl<K: Describe $(, $hasher)?> Describe for $set<K $(, $hasher)?> {
            const KIND: Kind = Kind::Sequence { element: &K::KIND };
        }
    };
}

impl_set!(BTreeSet, Ord;);
impl_set!(HashSet, Eq, Hash; S);

macro_rules! impl_map {
    ($map:ident, $($bound:path),+ ; $($hasher:ident)?) => {
        impl<K: Write, V: Write $(, $hasher)?> Write for $map<K, V $(, $hasher)?> {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                write_len(self.len(), buf);
                for (key, value) in self {
                    key.write(buf);
                    value.write(buf);
                }
            }
        }

        impl<K: EncodeSize, V: EncodeSize $(, $hasher)?> EncodeSize for $map<K, V $(, $hasher)?> {
            #[inline]
            fn encode_size(&self) -> usize {
                len_size(self.len())
                    + self
                        .iter()
                        .map(|(key, value)| key.encode_size() + value.encode_size())
                        .sum::<usize>()
            }
        }

        impl<K: Read $(+ $bound)+, V: Read $(, $hasher: BuildHasher + Default)?> Read
            for $map<K, V $(, $hasher)?>
        {
            const MIN_SIZE: usize = width::MIN_SIZE;

            #[inline]
            fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
                let len = read_len(buf, cfg, K::MIN_SIZE + V::MIN_SIZE)?;
                let mut map = Self::default();
                for _ in 0..len {
                    let key = K::read_cfg(buf, cfg)?;
                    let value = V::read_cfg(buf, cfg)?;
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        impl<K: Describe, V: Describe $(, $hasher)?> Describe for $map<K, V $(, $hasher)?> {
            const KIND: Kind = Kind::Map {
                key: &K::KIND,
                value: &V::KIND,
            };
        }
    };
}

impl_map!(BTreeMap, Ord;);
impl_map!(HashMap, Eq, Hash; S);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decode, DecodeExt, Encode};
    use bytes::Bytes;

    #[test]
    fn test_btree_map() {
        let mut value = BTreeMap::new();
        value.insert(String::from("abc"), [1u8, 2, 3]);
        value.insert(String::from("def"), [4u8, 5, 6]);

        let encoded = value.encode();
        assert_eq!(encoded.len(), value.encode_size());

        // prefix + 2 * (key prefix + 3 key bytes + 3 two-byte elements)
        assert_eq!(encoded.len(), 2 + 2 * (2 + 3 + 6));
        let decoded = BTreeMap::<String, [u8; 3]>::decode_exact(encoded).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn test_key_precedes_value() {
        let value: BTreeMap<u8, bool> = [(7, true)].into_iter().collect();
        assert_eq!(value.encode(), &[0x01, 0x01, 0x01, 0x07, 0x01][..]);
    }

    #[test]
    fn test_hash_map() {
        let value: HashMap<u32, Vec<String>> = [
            (1, vec![]),
            (300, vec![String::from("x")]),
            (70_000, vec![String::from("y"), String::from("z")]),
        ]
        .into_iter()
        .collect();
        let decoded = HashMap::<u32, Vec<String>>::decode_exact(value.encode()).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn test_empty_map() {
        let value: BTreeMap<u64, u64> = BTreeMap::new();
        assert_eq!(value.encode(), &[0x01, 0x00][..]);
        assert!(BTreeMap::<u64, u64>::decode_exact(value.encode())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_sets() {
        let ordered: BTreeSet<i64> = [-5, 0, 5_294_967_295].into_iter().collect();
        let decoded = BTreeSet::<i64>::decode_exact(ordered.encode()).unwrap();
        assert_eq!(ordered, decoded);

        // Sets share the sequence layout.
        let as_vec: Vec<i64> = ordered.iter().copied().collect();
        assert_eq!(ordered.encode(), as_vec.encode());

        let hashed: HashSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let decoded = HashSet::<String>::decode_exact(hashed.encode()).unwrap();
        assert_eq!(hashed, decoded);
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        // Two entries for key 1: first 2, then 3.
        let encoded = Bytes::from_static(&[
            0x01, 0x02, // two entries
            0x01, 0x01, 0x01, 0x02, // 1 => 2
            0x01, 0x01, 0x01, 0x03, // 1 => 3
        ]);
        let decoded = BTreeMap::<u8, u8>::decode_exact(encoded).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[&1], 3);
    }

    #[test]
    fn test_corrupted_length() {
        // Claims 1000 entries, each needing at least four bytes.
        let encoded = Bytes::from_static(&[0x02, 0x03, 0xE8, 0x01, 0x01, 0x01, 0x02]);
        assert!(matches!(
            BTreeMap::<u8, u8>::decode(encoded),
            Err(Error::TruncatedInput)
        ));
    }

    #[test]
    fn test_max_len() {
        let value: BTreeSet<u8> = (0..5).collect();
        let cfg = Config::new().with_max_len(4);
        assert!(matches!(
            BTreeSet::<u8>::decode_cfg(value.encode(), &cfg),
            Err(Error::LengthExceeded(5, 4))
        ));
    }
}
