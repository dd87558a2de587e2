/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * Copyright (c) Jan-Paul Bultmann
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Reinterpretation of single values.
//!
//! The size precondition is checked when the function is instantiated, so a
//! cast to a larger type does not compile:
//!
//! ```compile_fail
//! let x: u32 = 7;
//! let _: u64 = unsafe { rawcast::cast(x) };
//! ```

use core::mem::{size_of, ManuallyDrop};
use core::ptr;

/// Reinterpret `x` as a `Dst` made of the first `size_of::<Dst>()` bytes of
/// `x`.
///
/// The type parameters are ordered so that only the destination usually
/// needs to be named: `cast::<Dst, _>(x)`.
///
/// `Dst` may require stricter alignment than `Src`; the value is read
/// unaligned. The destructor of `x` does not run.
///
/// # Safety
/// The first `size_of::<Dst>()` bytes of `x` must be initialized and form a
/// valid `Dst`. If `Dst` owns resources the caller takes over their
/// ownership from `x`.
#[inline]
pub unsafe fn cast<Dst, Src>(x: Src) -> Dst {
    const {
        assert!(
            size_of::<Dst>() <= size_of::<Src>(),
            "cast destination is larger than its source"
        )
    }
    let src = ManuallyDrop::new(x);
    let ptr = &*src as *const Src as *const Dst;
    // SAFETY: `Dst` fits inside `Src` and the read is unaligned.
    unsafe { ptr::read_unaligned(ptr) }
}

/// Reinterpret a shared reference in place.
///
/// # Safety
/// Same as [`cast`]. In addition `x` must be aligned for `Dst`, and the
/// bytes must stay valid as a `Dst` for as long as the result is alive.
#[inline]
pub unsafe fn cast_ref<Dst, Src>(x: &Src) -> &Dst {
    const {
        assert!(
            size_of::<Dst>() <= size_of::<Src>(),
            "cast destination is larger than its source"
        )
    }
    let ptr = (x as *const Src).cast::<Dst>();
    debug_assert!(ptr.is_aligned(), "cast_ref target is misaligned");
    unsafe { &*ptr }
}

/// Reinterpret an exclusive reference in place.
///
/// Writes through the result modify `x`.
///
/// # Safety
/// Same as [`cast_ref`]. Any bytes written through the result must leave a
/// valid `Src` behind once the borrow ends.
#[inline]
pub unsafe fn cast_mut<Dst, Src>(x: &mut Src) -> &mut Dst {
    const {
        assert!(
            size_of::<Dst>() <= size_of::<Src>(),
            "cast destination is larger than its source"
        )
    }
    let ptr = (x as *mut Src).cast::<Dst>();
    debug_assert!(ptr.is_aligned(), "cast_mut target is misaligned");
    unsafe { &mut *ptr }
}
