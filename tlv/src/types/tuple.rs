//! Codec implementations for tuples.
//!
//! A tuple is an aggregate whose fields are its elements, in order.

use crate::{Aggregate, ByteSink, ByteSource, Error, Read, Reader, Write, Writer};
use paste::paste;

// Tuple implementation
macro_rules! impl_aggregate_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: Write + Read ),*> Aggregate for ( $( [<T $index>], )* ) {
                #[inline]
                fn write_fields<S: ByteSink + ?Sized>(
                    &self,
                    w: &mut Writer<'_, S>,
                ) -> Result<(), Error> {
                    $( self.$index.write(w)?; )*
                    Ok(())
                }

                #[inline]
                fn read_fields<S: ByteSource + ?Sized>(
                    &mut self,
                    r: &mut Reader<'_, S>,
                ) -> Result<(), Error> {
                    $( self.$index.read_into(r)?; )*
                    Ok(())
                }
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_aggregate_for_tuple!(0);
impl_aggregate_for_tuple!(0, 1);
impl_aggregate_for_tuple!(0, 1, 2);
impl_aggregate_for_tuple!(0, 1, 2, 3);
impl_aggregate_for_tuple!(0, 1, 2, 3, 4);
impl_aggregate_for_tuple!(0, 1, 2, 3, 4, 5);
impl_aggregate_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_aggregate_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_aggregate_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_aggregate_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_aggregate_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_aggregate_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);
