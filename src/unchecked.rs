/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * Copyright (c) Jan-Paul Bultmann
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Element addressing without bounds checks.

use crate::RawSlice;

mod sealed {
    pub trait Sealed {}
}

/// Primitive integers usable as element offsets.
///
/// Values are converted with `as isize`: signed offsets point before the
/// base, and 64 and 128 bit values wider than the address space wrap.
pub trait Offset: sealed::Sealed + Copy {
    /// The offset in elements.
    fn to_isize(self) -> isize;
}

macro_rules! impl_offset {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Offset for $t {
                #[inline]
                fn to_isize(self) -> isize {
                    self as isize
                }
            }
        )*
    };
}

impl_offset!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Address of element `idx` of `slice`: `base + idx * size_of::<T>()`.
///
/// Neither the length nor the sign of `idx` is checked. Computing the
/// address is safe, reading through it is only sound if it lands on a live
/// `T`.
#[inline]
pub fn index<T, I: Offset>(slice: &[T], idx: I) -> *const T {
    slice.as_ptr().wrapping_offset(idx.to_isize())
}

/// Exclusive version of [`index`].
#[inline]
pub fn index_mut<T, I: Offset>(slice: &mut [T], idx: I) -> *mut T {
    slice.as_mut_ptr().wrapping_offset(idx.to_isize())
}

/// Element `idx` of `slice` without a bounds check.
///
/// # Safety
/// `index(slice, idx)` must point to an initialized `T` inside the
/// allocation `slice` borrows from, valid for `'a`. An empty slice has no
/// such element.
#[inline]
pub unsafe fn get_unchecked<T, I: Offset>(slice: &[T], idx: I) -> &T {
    unsafe { &*index(slice, idx) }
}

/// Exclusive version of [`get_unchecked`].
///
/// # Safety
/// Same as [`get_unchecked`], and no other reference to the element may be
/// alive while the result is.
#[inline]
pub unsafe fn get_unchecked_mut<T, I: Offset>(slice: &mut [T], idx: I) -> &mut T {
    unsafe { &mut *index_mut(slice, idx) }
}

impl<T> RawSlice<T> {
    /// Address of element `idx`, ignoring length and capacity.
    #[inline]
    pub fn index<I: Offset>(self, idx: I) -> *mut T {
        self.as_ptr().wrapping_offset(idx.to_isize())
    }
}
