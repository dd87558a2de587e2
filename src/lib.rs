/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * Copyright (c) Jan-Paul Bultmann
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Raw byte views of values.
pub mod bytes;
mod error;
/// Sequence descriptors and slice reinterpretation.
pub mod region;
/// Single value reinterpretation.
pub mod scalar;
/// Null terminator search.
pub mod scan;
/// Element addressing without bounds checks.
pub mod unchecked;

#[cfg(feature = "zerocopy")]
/// Safe reinterpretation for types with a proven layout.
pub mod checked;


pub use crate::bytes::as_bytes;
pub use crate::bytes::as_bytes_mut;
pub use crate::error::CastError;
pub use crate::region::slice_cast;
pub use crate::region::slice_cast_mut;
pub use crate::region::slice_cast_ptr;
pub use crate::region::try_slice_cast_ptr;
pub use crate::region::RawSlice;
pub use crate::scalar::cast;
pub use crate::scalar::cast_mut;
pub use crate::scalar::cast_ref;
pub use crate::scan::find_null;
pub use crate::scan::find_null_in_pages;
pub use crate::scan::until_null;
pub use crate::scan::MIN_PAGE_SIZE;
pub use crate::unchecked::get_unchecked;
pub use crate::unchecked::get_unchecked_mut;
pub use crate::unchecked::index;
pub use crate::unchecked::index_mut;
pub use crate::unchecked::Offset;
