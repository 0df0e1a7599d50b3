//! Compile-time descriptions of encodable types.
//!
//! Every encodable type carries a [Kind] as an associated constant. Structs deriving
//! [Record](crate::Record) additionally carry a [Schema]: the ordered list of their fields. Both
//! are produced once per type by the compiler; nothing is inspected at runtime.
//!
//! The wire format is positional, so two records are interchangeable on the wire exactly when
//! their [Schema::layout]s agree, whatever their names or field names.
//!
//! ```
//! use packwire_codec::{schema::Kind, Record};
//!
//! #[derive(Record)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! #[derive(Record)]
//! struct Size(i32, i32);
//!
//! assert_eq!(Point::SCHEMA.len(), 2);
//! assert_eq!(Point::SCHEMA.fields()[0].name, "x");
//! assert_eq!(Point::SCHEMA.fields()[1].kind, Kind::Integer { bits: 32, signed: true });
//! assert!(Point::SCHEMA.is_layout_compatible(&Size::SCHEMA));
//! ```

use crate::Codec;

/// The semantic kind of an encodable type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// One byte, `0` or `1`.
    Bool,
    /// A Unicode scalar value in four bytes.
    Char,
    /// An integer of a declared bit width, written with a width indicator.
    Integer { bits: u32, signed: bool },
    /// An IEEE-754 float in its native width.
    Float { bits: u32 },
    /// A length-prefixed UTF-8 string.
    String,
    /// A fixed number of elements without a length prefix.
    Array { len: usize, element: &'static Kind },
    /// A length-prefixed run of elements (vectors, deques and sets).
    Sequence { element: &'static Kind },
    /// A length-prefixed run of key/value pairs.
    Map {
        key: &'static Kind,
        value: &'static Kind,
    },
    /// A presence flag followed by the value when present.
    Optional { inner: &'static Kind },
    /// Elements written back to back.
    Tuple { elements: &'static [Kind] },
    /// A nested record, spliced inline.
    Record { schema: &'static Schema },
}

impl Kind {
    /// Appends the leaf kinds of this kind to `out`, splicing records, tuples and arrays inline.
    fn flatten_into(&self, out: &mut Vec<Kind>) {
        match self {
            Kind::Record { schema } => schema.flatten_into(out),
            Kind::Tuple { elements } => {
                for element in elements.iter() {
                    element.flatten_into(out);
                }
            }
            Kind::Array { len, element } => {
                for _ in 0..*len {
                    element.flatten_into(out);
                }
            }
            other => out.push(*other),
        }
    }

    /// Returns true if the kind is written as its parts with no framing.
    fn is_spliced(&self) -> bool {
        matches!(
            self,
            Kind::Record { .. } | Kind::Tuple { .. } | Kind::Array { .. }
        )
    }

    /// Returns true if values of both kinds are written with the same byte layout.
    ///
    /// Record and field names are ignored; only the positional structure matters.
    pub fn is_layout_compatible(&self, other: &Kind) -> bool {
        if self.is_spliced() || other.is_spliced() {
            let mut left = Vec::new();
            let mut right = Vec::new();
            self.flatten_into(&mut left);
            other.flatten_into(&mut right);
            return layouts_match(&left, &right);
        }
        match (self, other) {
            (
                Kind::Sequence { element },
                Kind::Sequence {
                    element: other_element,
                },
            ) => element.is_layout_compatible(other_element),
            (
                Kind::Map { key, value },
                Kind::Map {
                    key: other_key,
                    value: other_value,
                },
            ) => key.is_layout_compatible(other_key) && value.is_layout_compatible(other_value),
            (Kind::Optional { inner }, Kind::Optional { inner: other_inner }) => {
                inner.is_layout_compatible(other_inner)
            }
            (left, right) => left == right,
        }
    }
}

fn layouts_match(left: &[Kind], right: &[Kind]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.is_layout_compatible(r))
}

/// A named member of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    /// The member's name (its index for tuple structs). Not part of the wire format.
    pub name: &'static str,
    /// The member's kind.
    pub kind: Kind,
}

/// The ordered fields of a record type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Schema {
    /// The record's type name. Not part of the wire format.
    pub name: &'static str,
    /// The record's fields, in declaration order.
    pub fields: &'static [Field],
}

impl Schema {
    /// The record's type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The record's fields, in declaration order.
    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn flatten_into(&self, out: &mut Vec<Kind>) {
        for field in self.fields {
            field.kind.flatten_into(out);
        }
    }

    /// The positional wire layout: leaf kinds in write order, with nested records, tuples and arrays
    /// spliced inline.
    pub fn layout(&self) -> Vec<Kind> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    /// Returns true if both records are written with the same byte layout.
    ///
    /// Bytes produced for one can be decoded as the other without error; the format carries
    /// nothing that would tell them apart.
    pub fn is_layout_compatible(&self, other: &Schema) -> bool {
        layouts_match(&self.layout(), &other.layout())
    }
}

/// Trait for types with a compile-time [Kind].
pub trait Describe {
    /// The kind of this type.
    const KIND: Kind;
}

/// Trait for structs whose fields are enumerated by `#[derive(Record)]`.
pub trait Record: Codec {
    /// The record's fields, in declaration order.
    const SCHEMA: Schema;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;
    use std::collections::BTreeMap;

    #[derive(Record)]
    struct Inner {
        a: u8,
        b: bool,
    }

    #[derive(Record)]
    struct Outer {
        inner: Inner,
        c: String,
    }

    #[derive(Record)]
    struct Flat(u8, bool, String);

    #[derive(Record)]
    struct Other {
        a: u16,
        b: bool,
        c: String,
    }

    #[derive(Record)]
    struct Containers {
        list: Vec<Inner>,
        lookup: BTreeMap<String, [u8; 3]>,
        maybe: Option<char>,
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let fields = Outer::SCHEMA.fields();
        assert_eq!(Outer::SCHEMA.name(), "Outer");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "inner");
        assert_eq!(fields[0].kind, Inner::KIND);
        assert!(matches!(fields[0].kind, Kind::Record { schema } if schema.name == "Inner"));
        assert_eq!(fields[1].name, "c");
        assert_eq!(fields[1].kind, Kind::String);
        assert_eq!(Flat::SCHEMA.fields()[2].name, "2");
    }

    #[test]
    fn test_layout_splices_nested_records() {
        assert_eq!(
            Outer::SCHEMA.layout(),
            vec![
                Kind::Integer {
                    bits: 8,
                    signed: false
                },
                Kind::Bool,
                Kind::String,
            ]
        );
        assert!(Outer::SCHEMA.is_layout_compatible(&Flat::SCHEMA));
        assert!(Flat::SCHEMA.is_layout_compatible(&Outer::SCHEMA));
        assert!(!Outer::SCHEMA.is_layout_compatible(&Other::SCHEMA));
    }

    #[test]
    fn test_container_kinds() {
        let fields = Containers::SCHEMA.fields();
        assert!(matches!(
            fields[0].kind,
            Kind::Sequence { element } if *element == Inner::KIND
        ));
        assert_eq!(
            fields[1].kind,
            Kind::Map {
                key: &Kind::String,
                value: &Kind::Array {
                    len: 3,
                    element: &Kind::Integer {
                        bits: 8,
                        signed: false
                    }
                }
            }
        );
        assert_eq!(fields[2].kind, Kind::Optional { inner: &Kind::Char });
    }

    #[test]
    fn test_nested_layout_compatibility() {
        let left = Kind::Sequence {
            element: &Inner::KIND,
        };
        let right = Kind::Sequence {
            element: &<(u8, bool)>::KIND,
        };
        assert!(left.is_layout_compatible(&right));

        let mismatched = Kind::Sequence {
            element: &<(u8, u8)>::KIND,
        };
        assert!(!left.is_layout_compatible(&mismatched));
    }

    #[test]
    fn test_single_leaf_record_matches_leaf() {
        #[derive(Record)]
        struct Wrapper(u32);

        assert!(Wrapper::KIND.is_layout_compatible(&u32::KIND));
        assert!(u32::KIND.is_layout_compatible(&Wrapper::KIND));
        assert!(!Wrapper::KIND.is_layout_compatible(&i32::KIND));
    }

    #[test]
    fn test_arrays_splice_like_tuples() {
        #[derive(Record)]
        struct Packed {
            a: [u8; 2],
        }

        #[derive(Record)]
        struct Split {
            a: u8,
            b: u8,
        }

        #[derive(Record)]
        struct Paired((u8, u8));

        #[derive(Record)]
        struct Padded {
            a: u8,
            empty: [u64; 0],
            b: u8,
        }

        assert_eq!(Packed::SCHEMA.layout(), Split::SCHEMA.layout());
        assert!(Packed::SCHEMA.is_layout_compatible(&Split::SCHEMA));
        assert!(Split::SCHEMA.is_layout_compatible(&Paired::SCHEMA));
        assert!(Paired::SCHEMA.is_layout_compatible(&Packed::SCHEMA));
        assert!(Padded::SCHEMA.is_layout_compatible(&Split::SCHEMA));
        assert!(<[u16; 3]>::KIND.is_layout_compatible(&<(u16, u16, u16)>::KIND));
        assert!(!<[u16; 3]>::KIND.is_layout_compatible(&<[u16; 2]>::KIND));
        assert!(!<[u8; 2]>::KIND.is_layout_compatible(&<[i8; 2]>::KIND));
    }
}
