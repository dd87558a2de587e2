#![no_main]

use arbitrary::{Arbitrary, Result as ArbResult, Unstructured};
use libfuzzer_sys::fuzz_target;
use rawcast::RawSlice;

const PAGE: usize = 64;
const BUF: usize = PAGE * 8;

#[repr(C, align(64))]
struct Pages([u8; BUF]);

#[derive(Debug)]
enum Operation {
    Widen { len: u16, cap: u16 },
    Narrow { len: u16, cap: u16 },
    CastPtr { cap: u16 },
    FindNull { start: u16, zero: u16 },
}

impl<'a> Arbitrary<'a> for Operation {
    fn arbitrary(u: &mut Unstructured<'a>) -> ArbResult<Self> {
        let tag = u.int_in_range::<u8>(0..=3)?;
        let op = match tag {
            0 => Operation::Widen {
                len: u.arbitrary()?,
                cap: u.arbitrary()?,
            },
            1 => Operation::Narrow {
                len: u.arbitrary()?,
                cap: u.arbitrary()?,
            },
            2 => Operation::CastPtr {
                cap: u.arbitrary()?,
            },
            _ => Operation::FindNull {
                start: u.arbitrary()?,
                zero: u.arbitrary()?,
            },
        };
        Ok(op)
    }
}

fn parts(len: u16, cap: u16, max: usize) -> (usize, usize) {
    let cap = cap as usize % (max + 1);
    let len = len as usize % (cap + 1);
    (len, cap)
}

fuzz_target!(|ops: Vec<Operation>| {
    let mut pages = Pages([1; BUF]);
    pages.0[BUF - 1] = 0;

    for op in ops {
        match op {
            Operation::Widen { len, cap } => {
                let (len, cap) = parts(len, cap, BUF);
                let raw = unsafe { RawSlice::from_raw_parts(pages.0.as_mut_ptr(), len, cap) };
                let wide = raw.cast::<[u8; 12]>();
                assert!(wide.byte_capacity() <= raw.byte_capacity());
                assert!(wide.len() <= wide.capacity());
                assert_eq!(wide.capacity(), cap / 12);
                if cap > 0 {
                    assert_eq!(wide.as_ptr() as usize, raw.as_ptr() as usize);
                }
            }
            Operation::Narrow { len, cap } => {
                let (len, cap) = parts(len, cap, BUF / 8);
                let base = pages.0.as_mut_ptr().cast::<u64>();
                let raw = unsafe { RawSlice::from_raw_parts(base, len, cap) };
                let narrow = raw.cast::<u16>();
                assert_eq!(narrow.len(), len * 4);
                assert_eq!(narrow.capacity(), cap * 4);
                let back = narrow.cast::<u64>();
                assert_eq!((back.len(), back.capacity()), (len, cap));
            }
            Operation::CastPtr { cap } => {
                let (_, cap) = parts(0, cap, BUF);
                let raw = unsafe { RawSlice::from_raw_parts(pages.0.as_mut_ptr(), 0, cap) };
                match raw.try_cast_ptr::<[u8; 100]>() {
                    Ok(ptr) if cap == 0 => assert!(ptr.is_null()),
                    Ok(ptr) => {
                        assert!(cap >= 100);
                        assert_eq!(ptr as usize, raw.as_ptr() as usize);
                    }
                    Err(_) => assert!(cap > 0 && cap < 100),
                }
            }
            Operation::FindNull { start, zero } => {
                let start = start as usize % BUF;
                let zero = zero as usize % BUF;
                let saved = pages.0[zero];
                pages.0[zero] = 0;
                let expected = pages.0[start..]
                    .iter()
                    .position(|&b| b == 0)
                    .expect("terminator");
                let ptr = pages.0[start..].as_ptr();
                assert_eq!(unsafe { rawcast::find_null_in_pages(ptr, PAGE) }, expected);
                pages.0[zero] = saved;
            }
        }
    }
});
