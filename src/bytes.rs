/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * Copyright (c) Jan-Paul Bultmann
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Raw byte views of values.
//!
//! Unlike `zerocopy::IntoBytes::as_bytes`, these functions accept types with
//! padding. Padding bytes are returned as they are stored, which is why the
//! caller has to vouch for them being initialized.

use core::mem::size_of;

/// The `size_of::<T>()` bytes making up `*value`, padding included.
///
/// # Safety
/// Every byte of `*value`, padding included, must be initialized. Values
/// built in zeroed storage satisfy this; values that were moved or copied
/// by value may not.
#[inline]
pub unsafe fn as_bytes<T>(value: &T) -> &[u8] {
    let ptr = (value as *const T).cast::<u8>();
    unsafe { core::slice::from_raw_parts(ptr, size_of::<T>()) }
}

/// The `size_of::<T>()` bytes making up `*value`, writable in place.
///
/// # Safety
/// Same as [`as_bytes`]. Any bytes written must leave a valid `T` behind
/// once the borrow ends.
#[inline]
pub unsafe fn as_bytes_mut<T>(value: &mut T) -> &mut [u8] {
    let ptr = (value as *mut T).cast::<u8>();
    unsafe { core::slice::from_raw_parts_mut(ptr, size_of::<T>()) }
}
