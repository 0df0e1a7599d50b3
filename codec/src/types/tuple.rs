//! Codec implementations for tuples.
//!
//! Tuple elements are written back to back with no framing, the same way record fields are.

use crate::{
    schema::{Describe, Kind},
    Config, EncodeSize, Error, Read, Write,
};
use bytes::{Buf, BufMut};
use paste::paste;

macro_rules! impl_codec_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: EncodeSize ),*> EncodeSize for ( $( [<T $index>], )* ) {
                #[inline]
                fn encode_size(&self) -> usize {
                    0 $( + self.$index.encode_size() )*
                }
            }

            impl<$( [<T $index>]: Write ),*> Write for ( $( [<T $index>], )* ) {
                #[inline]
                fn write(&self, buf: &mut impl BufMut) {
                    $( self.$index.write(buf); )*
                }
            }

            impl<$( [<T $index>]: Read ),*> Read for ( $( [<T $index>], )* ) {
                const MIN_SIZE: usize = 0 $( + [<T $index>]::MIN_SIZE )*;

                #[inline]
                fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
                    Ok(( $( [<T $index>]::read_cfg(buf, cfg)?, )* ))
                }
            }

            impl<$( [<T $index>]: Describe ),*> Describe for ( $( [<T $index>], )* ) {
                const KIND: Kind = Kind::Tuple {
                    elements: &[ $( [<T $index>]::KIND ),* ],
                };
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_codec_for_tuple!(0);
impl_codec_for_tuple!(0, 1);
impl_codec_for_tuple!(0, 1, 2);
impl_codec_for_tuple!(0, 1, 2, 3);
impl_codec_for_tuple!(0, 1, 2, 3, 4);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);
