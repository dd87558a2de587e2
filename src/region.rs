/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * Copyright (c) Jan-Paul Bultmann
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Reinterpretation of contiguous sequences.
//!
//! A [`RawSlice`] describes a run of elements by base pointer, length and
//! capacity, like the parts of a `Vec`. Casting it to another element type
//! keeps the base pointer and rescales length and capacity by the ratio of
//! the element sizes. Nothing is read or written until the descriptor is
//! turned back into a slice.
//!
//! ```
//! use rawcast::RawSlice;
//!
//! #[repr(C)]
//! struct Pair {
//!     a: u32,
//!     b: u32,
//! }
//!
//! let mut bytes: Vec<u8> = Vec::with_capacity(64);
//! bytes.resize(32, 0);
//! let raw = RawSlice::from_vec_parts(&mut bytes);
//! let pairs = raw.cast::<Pair>();
//! assert_eq!(pairs.len(), 4);
//! assert_eq!(pairs.capacity(), raw.capacity() / 8);
//! ```

use core::any::type_name;
use core::fmt;
use core::mem::{align_of, size_of};
use core::ptr;

use crate::CastError;

/// Non-owning descriptor of a sequence: base pointer, length and capacity.
///
/// The descriptor upholds `capacity >= len`; the addressable bytes are
/// `[ptr, ptr + capacity * size_of::<T>())`. A descriptor with zero
/// capacity may carry a null pointer.
pub struct RawSlice<T> {
    ptr: *mut T,
    len: usize,
    cap: usize,
}

// #[derive(Clone, Copy)] would require `T: Copy`.
impl<T> Clone for RawSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawSlice<T> {}

impl<T> fmt::Debug for RawSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSlice")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish()
    }
}

impl<T> RawSlice<T> {
    /// An empty descriptor with a null base pointer.
    pub const fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            cap: 0,
        }
    }

    /// Describe a shared slice. Its capacity equals its length.
    ///
    /// The descriptor carries a `*mut` pointer but must not be used for
    /// writes.
    pub fn from_slice(slice: &[T]) -> Self {
        Self {
            ptr: slice.as_ptr() as *mut T,
            len: slice.len(),
            cap: slice.len(),
        }
    }

    /// Describe an exclusive slice. Its capacity equals its length.
    pub fn from_mut_slice(slice: &mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            cap: slice.len(),
        }
    }

    /// Describe the whole allocation of a vector, spare capacity included.
    pub fn from_vec_parts(vec: &mut Vec<T>) -> Self {
        Self {
            ptr: vec.as_mut_ptr(),
            len: vec.len(),
            cap: vec.capacity(),
        }
    }

    /// Creates a descriptor from raw parts without any checks.
    ///
    /// # Safety
    /// `len <= cap`, and if `cap > 0` then `ptr` must point to an allocation
    /// of at least `cap * size_of::<T>()` bytes whose first `len` elements
    /// are initialized.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize, cap: usize) -> Self {
        debug_assert!(len <= cap, "length {len} exceeds capacity {cap}");
        Self { ptr, len, cap }
    }

    /// Base pointer of the sequence.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Number of initialized elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of elements the allocation can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `true` if the sequence has no initialized elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.len * size_of::<T>()
    }

    /// Capacity in bytes.
    #[inline]
    pub fn byte_capacity(&self) -> usize {
        self.cap * size_of::<T>()
    }

    /// Reinterpret the sequence as elements of `Dst`.
    ///
    /// The base pointer is kept. When the source element is at least as
    /// large, length and capacity are multiplied by
    /// `size_of::<T>() / size_of::<Dst>()`. Otherwise they are converted
    /// through their byte span, `n * size_of::<T>() / size_of::<Dst>()`,
    /// which equals dividing by `size_of::<Dst>() / size_of::<T>()` for
    /// integer ratios. A fractional ratio truncates and under-reports the
    /// sequence, it never covers more bytes than the source: six 3-byte
    /// elements become two `u64`s, not three.
    ///
    /// A descriptor with zero capacity yields [`RawSlice::empty`].
    #[inline]
    pub fn cast<Dst>(self) -> RawSlice<Dst> {
        const {
            assert!(
                size_of::<T>() != 0 && size_of::<Dst>() != 0,
                "zero-sized elements have no size ratio"
            )
        }
        if self.cap == 0 {
            return RawSlice::empty();
        }

        let size_src = size_of::<T>();
        let size_dst = size_of::<Dst>();

        if size_src >= size_dst {
            let ratio = size_src / size_dst;
            RawSlice {
                ptr: self.ptr.cast(),
                len: self.len * ratio,
                cap: self.cap * ratio,
            }
        } else {
            // Equals `n / (size_dst / size_src)` for integer ratios and never
            // rounds past the source bytes for fractional ones.
            RawSlice {
                ptr: self.ptr.cast(),
                len: self.len * size_src / size_dst,
                cap: self.cap * size_src / size_dst,
            }
        }
    }

    /// Like [`RawSlice::cast`], but rejects fractional size ratios and base
    /// pointers that are misaligned for `Dst`.
    pub fn try_cast<Dst>(self) -> Result<RawSlice<Dst>, CastError> {
        const {
            assert!(
                size_of::<T>() != 0 && size_of::<Dst>() != 0,
                "zero-sized elements have no size ratio"
            )
        }
        if self.cap == 0 {
            return Ok(RawSlice::empty());
        }

        let size_src = size_of::<T>();
        let size_dst = size_of::<Dst>();
        if size_src % size_dst != 0 && size_dst % size_src != 0 {
            return Err(CastError::Ratio {
                src: size_src,
                dst: size_dst,
            });
        }
        if !self.ptr.cast::<Dst>().is_aligned() {
            return Err(CastError::Alignment {
                addr: self.ptr as usize,
                align: align_of::<Dst>(),
            });
        }
        Ok(self.cast())
    }

    /// Reinterpret the start of the sequence as a single `Dst`.
    ///
    /// Returns a null pointer if the capacity is zero.
    ///
    /// # Panics
    /// Panics if the capacity in bytes is smaller than one `Dst`, since
    /// dereferencing the pointer would run past the allocation. See
    /// [`RawSlice::try_cast_ptr`] for the non-panicking form.
    #[inline]
    #[track_caller]
    pub fn cast_ptr<Dst>(self) -> *mut Dst {
        match self.try_cast_ptr() {
            Ok(ptr) => ptr,
            Err(err) => {
                log::error!("out of bounds pointer cast: {err}");
                panic!("{err}")
            }
        }
    }

    /// Reinterpret the start of the sequence as a single `Dst`, reporting
    /// [`CastError::OutOfBounds`] if the capacity in bytes is smaller than
    /// one `Dst`.
    ///
    /// Returns a null pointer if the capacity is zero. Element types of
    /// equal size are never out of bounds.
    pub fn try_cast_ptr<Dst>(self) -> Result<*mut Dst, CastError> {
        if self.cap == 0 {
            return Ok(ptr::null_mut());
        }

        let size_src = size_of::<T>();
        let size_dst = size_of::<Dst>();
        if size_src != size_dst {
            let available = size_src.saturating_mul(self.cap);
            if available < size_dst {
                return Err(CastError::OutOfBounds {
                    available,
                    required: size_dst,
                    target: type_name::<Dst>(),
                });
            }
        }
        Ok(self.ptr.cast())
    }

    /// View the initialized elements as a slice.
    ///
    /// # Safety
    /// The descriptor must satisfy the contract of
    /// [`RawSlice::from_raw_parts`] for `'a`, the base pointer must be
    /// aligned for `T`, the elements must be valid `T`s, and no exclusive
    /// reference to them may exist during `'a`.
    pub unsafe fn as_slice<'a>(self) -> &'a [T] {
        if self.ptr.is_null() {
            return &[];
        }
        unsafe { core::slice::from_raw_parts(self.ptr, self.len) }
    }

    /// View the initialized elements as an exclusive slice.
    ///
    /// # Safety
    /// Same as [`RawSlice::as_slice`], and no other reference to the
    /// elements may exist during `'a`.
    pub unsafe fn as_mut_slice<'a>(self) -> &'a mut [T] {
        if self.ptr.is_null() {
            return &mut [];
        }
        unsafe { core::slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

/// Reinterpret a slice of `Src` as a slice of `Dst` over the same bytes.
///
/// Length is rescaled as described on [`RawSlice::cast`].
///
/// # Safety
/// The slice must be aligned for `Dst` and its bytes must form valid `Dst`
/// values.
#[inline]
pub unsafe fn slice_cast<Dst, Src>(x: &[Src]) -> &[Dst] {
    unsafe { RawSlice::from_slice(x).cast::<Dst>().as_slice() }
}

/// Exclusive version of [`slice_cast`]. Writes go to the original slice.
///
/// # Safety
/// Same as [`slice_cast`]. Any bytes written must leave valid `Src` values
/// behind once the borrow ends.
#[inline]
pub unsafe fn slice_cast_mut<Dst, Src>(x: &mut [Src]) -> &mut [Dst] {
    unsafe { RawSlice::from_mut_slice(x).cast::<Dst>().as_mut_slice() }
}

/// Pointer to the start of `x` as a single `Dst`, or null for an empty
/// slice.
///
/// # Panics
/// Panics if `x` spans fewer bytes than one `Dst`.
#[inline]
#[track_caller]
pub fn slice_cast_ptr<Dst, Src>(x: &[Src]) -> *const Dst {
    RawSlice::from_slice(x).cast_ptr::<Dst>()
}

/// Non-panicking version of [`slice_cast_ptr`].
#[inline]
pub fn try_slice_cast_ptr<Dst, Src>(x: &[Src]) -> Result<*const Dst, CastError> {
    RawSlice::from_slice(x)
        .try_cast_ptr::<Dst>()
        .map(|ptr| ptr as *const Dst)
}


#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    pub fn check_cast_never_over_reports() {
        let len: usize = kani::any();
        let cap: usize = kani::any();
        kani::assume(cap <= 1 << 20);
        kani::assume(len <= cap);
        let base = ptr::NonNull::<[u8; 3]>::dangling().as_ptr();
        let raw = unsafe { RawSlice::from_raw_parts(base, len, cap) };

        let wide = raw.cast::<[u8; 8]>();
        assert!(wide.byte_capacity() <= raw.byte_capacity());
        assert!(wide.len() <= wide.capacity());

        let narrow = raw.cast::<[u8; 2]>();
        assert!(narrow.byte_capacity() <= raw.byte_capacity());
        assert!(narrow.len() <= narrow.capacity());
    }

    #[kani::proof]
    pub fn check_integer_ratio_reverses() {
        let len: usize = kani::any();
        let cap: usize = kani::any();
        kani::assume(cap <= 1 << 20);
        kani::assume(len <= cap);
        let base = ptr::NonNull::<u64>::dangling().as_ptr();
        let raw = unsafe { RawSlice::from_raw_parts(base, len, cap) };

        let back = raw.cast::<u16>().cast::<u64>();
        assert_eq!(back.len(), len);
        assert_eq!(back.capacity(), cap);
    }
}
