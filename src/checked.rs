/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * Copyright (c) Jan-Paul Bultmann
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Safe reinterpretation backed by `zerocopy` layout proofs.
//!
//! These mirror the unchecked functions at the crate root. The trait
//! bounds prove that every source byte is initialized and that any byte
//! pattern is a valid destination, and the remaining size and alignment
//! conditions are checked at run time and reported as [`CastError`].
//!
//! ```
//! use rawcast::checked;
//!
//! let words = [1u32, 2, 3, 4];
//! let halves: &[u16] = checked::slice_cast(&words).unwrap();
//! assert_eq!(halves.len(), 8);
//!
//! let pair: Option<&[u32; 2]> = checked::slice_cast_ptr(&words).unwrap();
//! assert_eq!(pair, Some(&[1, 2]));
//! ```

use core::any::type_name;
use core::mem::{align_of, size_of};

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, TryFromBytes};

use crate::CastError;

fn span(bytes: &[u8]) -> (usize, usize) {
    (bytes.as_ptr() as usize, bytes.len())
}

/// Reinterpret `x` as the `Dst` made of its first `size_of::<Dst>()` bytes.
///
/// Fails to compile if `Dst` is larger than `Src`.
#[inline]
pub fn cast<Dst, Src>(x: Src) -> Dst
where
    Src: IntoBytes + Immutable,
    Dst: FromBytes,
{
    // SAFETY: `Src: IntoBytes` has no uninitialized bytes and every byte
    // pattern is a valid `Dst: FromBytes`. `cast` checks the sizes.
    unsafe { crate::cast(x) }
}

/// Reinterpret `x` as a `Dst`, validating the bytes.
///
/// Returns [`CastError::Validity`] if the leading bytes of `x` are not a
/// valid `Dst`.
pub fn try_cast<Dst, Src>(x: Src) -> Result<Dst, CastError>
where
    Src: IntoBytes + Immutable,
    Dst: TryFromBytes,
{
    const {
        assert!(
            size_of::<Dst>() <= size_of::<Src>(),
            "cast destination is larger than its source"
        )
    }
    let bytes = x.as_bytes();
    Dst::try_read_from_prefix(bytes)
        .map(|(value, _)| value)
        .map_err(|err| {
            CastError::from_zerocopy(err, span(bytes), align_of::<Dst>(), size_of::<Dst>())
        })
}

/// Reinterpret a slice of `Src` as a slice of `Dst`.
///
/// The bytes of `x` must be aligned for `Dst` and a whole number of `Dst`s
/// long; fractional remainders are reported, not truncated.
pub fn slice_cast<Dst, Src>(x: &[Src]) -> Result<&[Dst], CastError>
where
    Src: IntoBytes + Immutable,
    Dst: FromBytes + Immutable,
{
    const { assert!(size_of::<Dst>() != 0, "zero-sized elements have no size ratio") }
    let bytes = x.as_bytes();
    <[Dst]>::ref_from_bytes(bytes).map_err(|err| {
        CastError::from_zerocopy(err, span(bytes), align_of::<Dst>(), size_of::<Dst>())
    })
}

/// Exclusive version of [`slice_cast`]. Writes go to the original slice.
pub fn slice_cast_mut<Dst, Src>(x: &mut [Src]) -> Result<&mut [Dst], CastError>
where
    Src: IntoBytes + FromBytes,
    Dst: IntoBytes + FromBytes,
{
    const { assert!(size_of::<Dst>() != 0, "zero-sized elements have no size ratio") }
    let bytes = x.as_mut_bytes();
    let source = span(bytes);
    <[Dst]>::mut_from_bytes(bytes).map_err(|err| {
        CastError::from_zerocopy(err, source, align_of::<Dst>(), size_of::<Dst>())
    })
}

/// The start of `x` as a single `Dst`, or `None` for an empty slice.
///
/// Returns [`CastError::OutOfBounds`] if `x` spans fewer bytes than one
/// `Dst`, and [`CastError::Alignment`] if it is misaligned for `Dst`.
pub fn slice_cast_ptr<Dst, Src>(x: &[Src]) -> Result<Option<&Dst>, CastError>
where
    Src: IntoBytes + Immutable,
    Dst: FromBytes + KnownLayout + Immutable,
{
    if x.is_empty() {
        return Ok(None);
    }
    let bytes = x.as_bytes();
    if bytes.len() < size_of::<Dst>() {
        return Err(CastError::OutOfBounds {
            available: bytes.len(),
            required: size_of::<Dst>(),
            target: type_name::<Dst>(),
        });
    }
    Dst::ref_from_prefix(bytes)
        .map(|(value, _)| Some(value))
        .map_err(|err| {
            CastError::from_zerocopy(err, span(bytes), align_of::<Dst>(), size_of::<Dst>())
        })
}

/// The bytes of a padding-free value.
#[inline]
pub fn as_bytes<T>(value: &T) -> &[u8]
where
    T: ?Sized + IntoBytes + Immutable,
{
    value.as_bytes()
}

/// The bytes of a padding-free value, writable in place.
#[inline]
pub fn as_bytes_mut<T>(value: &mut T) -> &mut [u8]
where
    T: ?Sized + IntoBytes + FromBytes,
{
    value.as_mut_bytes()
}
