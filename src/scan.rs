/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * Copyright (c) Jan-Paul Bultmann
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Null terminator search that stays inside memory pages.
//!
//! The search looks at one page at a time, so it never touches a page
//! before it has found no terminator in the previous one. A string ending
//! right before an unmapped page is therefore scanned without faulting.

/// Smallest page size of any supported target.
///
/// The scan is correct with any power-of-two granularity that does not
/// exceed the real page size, and the host page size is always a multiple
/// of this value.
pub const MIN_PAGE_SIZE: usize = 4096;

/// Offset of the first zero byte at or after `s`, or 0 if `s` is null.
///
/// Scans in [`MIN_PAGE_SIZE`] chunks; see [`find_null_in_pages`].
///
/// # Safety
/// Unless `s` is null, a zero byte must exist at or after `s`, and every
/// byte from `s` to the end of the page holding that zero must be readable,
/// initialized and not concurrently written.
#[inline]
pub unsafe fn find_null(s: *const u8) -> usize {
    unsafe { find_null_in_pages(s, MIN_PAGE_SIZE) }
}

/// Offset of the first zero byte at or after `s`, scanning in `page` sized
/// chunks aligned to `page`. Returns 0 if `s` is null.
///
/// The first chunk runs from `s` to the end of its page, every following
/// chunk is a whole page. Each chunk is searched with `memchr`, whose wide
/// reads stay inside the chunk. The loop ends only when a zero byte is
/// found.
///
/// # Panics
/// Panics if `page` is not a power of two.
///
/// # Safety
/// Same as [`find_null`], with pages of `page` bytes.
#[track_caller]
pub unsafe fn find_null_in_pages(s: *const u8, page: usize) -> usize {
    assert!(
        page.is_power_of_two(),
        "page size {page} is not a power of two"
    );
    if s.is_null() {
        return 0;
    }

    let mut ptr = s;
    let mut offset = 0;
    let mut chunk = page - (ptr as usize & (page - 1));
    loop {
        let bytes = unsafe { core::slice::from_raw_parts(ptr, chunk) };
        if let Some(i) = memchr::memchr(0, bytes) {
            return offset + i;
        }
        ptr = ptr.wrapping_add(chunk);
        offset += chunk;
        chunk = page;
        log::trace!("null scan moved to page {ptr:p} after {offset} bytes");
    }
}

/// The bytes from `s` up to, not including, the first zero byte.
///
/// Returns an empty slice if `s` is null.
///
/// # Safety
/// Same as [`find_null`]. The bytes must also stay unmodified for `'a`.
pub unsafe fn until_null<'a>(s: *const u8) -> &'a [u8] {
    if s.is_null() {
        return &[];
    }
    unsafe {
        let len = find_null(s);
        core::slice::from_raw_parts(s, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PAGE: usize = 64;

    #[repr(C, align(64))]
    struct Pages([u8; PAGE * 4]);

    #[repr(C, align(4096))]
    struct FullPage([u8; MIN_PAGE_SIZE]);

    proptest! {
        #[test]
        fn finds_first_zero_across_small_pages(start in 0usize..PAGE * 2, len in 0usize..PAGE * 2) {
            let mut pages = Pages([0xaa; PAGE * 4]);
            pages.0[start + len] = 0;
            pages.0[PAGE * 4 - 1] = 0;
            let ptr = pages.0[start..].as_ptr();
            prop_assert_eq!(unsafe { find_null_in_pages(ptr, PAGE) }, len);
        }
    }

    #[test]
    fn null_pointer_is_zero() {
        assert_eq!(unsafe { find_null(core::ptr::null()) }, 0);
        assert!(unsafe { until_null(core::ptr::null()) }.is_empty());
    }

    #[test]
    fn terminator_on_page_boundary() {
        let mut pages = Pages([1; PAGE * 4]);
        pages.0[PAGE] = 0;
        let ptr = pages.0[PAGE - 3..].as_ptr();
        assert_eq!(unsafe { find_null_in_pages(ptr, PAGE) }, 3);

        pages.0[PAGE] = 1;
        pages.0[PAGE * 3 + 5] = 0;
        let ptr = pages.0[PAGE - 3..].as_ptr();
        assert_eq!(unsafe { find_null_in_pages(ptr, PAGE) }, PAGE * 2 + 8);
    }

    #[test]
    fn zero_at_start() {
        let pages = Pages([0; PAGE * 4]);
        assert_eq!(unsafe { find_null_in_pages(pages.0.as_ptr(), PAGE) }, 0);
    }

    #[test]
    fn until_null_stops_before_terminator() {
        let mut page = Box::new(FullPage([0; MIN_PAGE_SIZE]));
        page.0[..5].copy_from_slice(b"hello");
        assert_eq!(unsafe { find_null(page.0.as_ptr()) }, 5);
        assert_eq!(unsafe { until_null(page.0.as_ptr()) }, b"hello");
    }

    #[test]
    fn first_of_several_zeros_in_one_page() {
        let mut page = Box::new(FullPage([0x7f; MIN_PAGE_SIZE]));
        page.0[1001] = 0;
        page.0[1002] = 0;
        page.0[MIN_PAGE_SIZE - 1] = 0;
        let ptr = page.0[3..].as_ptr();
        assert_eq!(unsafe { find_null(ptr) }, 998);
        assert_eq!(unsafe { until_null(ptr) }.len(), 998);
    }

    #[test]
    #[should_panic(expected = "page size 48 is not a power of two")]
    fn page_must_be_power_of_two() {
        let pages = Pages([0; PAGE * 4]);
        let _ = unsafe { find_null_in_pages(pages.0.as_ptr(), 48) };
    }
}
