use memmap2::MmapMut;
use proptest::prelude::*;
use rawcast::{find_null, find_null_in_pages, until_null, MIN_PAGE_SIZE};

fn filled_pages(pages: usize) -> MmapMut {
    let page = page_size::get();
    let mut map = MmapMut::map_anon(page * pages).expect("anonymous map");
    map.fill(0x5a);
    map
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn terminator_found_across_page_boundary(back in 1usize..256, forward in 0usize..256) {
        let page = page_size::get();
        let mut map = filled_pages(2);
        let start = page - back;
        map[page + forward] = 0;

        let ptr = map[start..].as_ptr();
        prop_assert_eq!(unsafe { find_null(ptr) }, back + forward);
        prop_assert_eq!(unsafe { find_null_in_pages(ptr, page) }, back + forward);
    }
}

#[test]
fn host_pages_are_multiples_of_min_page() {
    let page = page_size::get();
    assert!(page.is_power_of_two());
    assert_eq!(page % MIN_PAGE_SIZE, 0);
}

#[test]
fn terminator_at_end_of_last_page() {
    let page = page_size::get();
    let mut map = filled_pages(1);
    map[page - 1] = 0;

    let ptr = map[100..].as_ptr();
    assert_eq!(unsafe { find_null(ptr) }, page - 101);
}

#[test]
fn terminator_several_pages_out() {
    let page = page_size::get();
    let mut map = filled_pages(4);
    map[3 * page + 17] = 0;

    let ptr = map[9..].as_ptr();
    assert_eq!(unsafe { find_null(ptr) }, 3 * page + 8);
    assert_eq!(unsafe { until_null(ptr) }.len(), 3 * page + 8);
    assert!(unsafe { until_null(ptr) }.iter().all(|&b| b == 0x5a));
}

#[test]
fn terminator_at_page_start() {
    let page = page_size::get();
    let mut map = filled_pages(2);
    map[page] = 0;
    assert_eq!(unsafe { find_null(map.as_ptr()) }, page);
}

/// Two anonymous pages, the second one inaccessible. Any read past the
/// first page faults.
#[cfg(unix)]
fn page_then_guard() -> MmapMut {
    let page = page_size::get();
    let mut map = filled_pages(2);
    let guard = map[page..].as_mut_ptr().cast::<libc::c_void>();
    let rc = unsafe { libc::mprotect(guard, page, libc::PROT_NONE) };
    assert_eq!(rc, 0, "mprotect: {}", std::io::Error::last_os_error());
    map
}

#[cfg(unix)]
#[test]
fn scan_stops_before_guard_page() {
    let page = page_size::get();
    let mut map = page_then_guard();
    map[page - 1] = 0;

    let start = page / 2;
    let ptr = map[start..page].as_ptr();
    assert_eq!(unsafe { find_null(ptr) }, page - 1 - start);
    assert_eq!(unsafe { find_null_in_pages(ptr, page) }, page - 1 - start);
    assert_eq!(unsafe { until_null(ptr) }.len(), page - 1 - start);
}

#[cfg(unix)]
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn scan_from_any_offset_stops_before_guard_page(start in 0usize..4095) {
        let page = page_size::get();
        let mut map = page_then_guard();
        map[page - 1] = 0;

        let ptr = map[start..page].as_ptr();
        prop_assert_eq!(unsafe { find_null(ptr) }, page - 1 - start);
    }
}
