/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * Copyright (c) Jan-Paul Bultmann
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

/// Errors reported by the checked reinterpretation functions.
///
/// The unchecked functions never construct this type, with one exception:
/// [`slice_cast_ptr`](crate::slice_cast_ptr) panics with the message of
/// [`CastError::OutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastError {
    /// The source buffer is smaller than a single destination value.
    OutOfBounds {
        /// Bytes covered by the source buffer's capacity.
        available: usize,
        /// Size of one destination value in bytes.
        required: usize,
        /// Name of the destination type.
        target: &'static str,
    },
    /// Neither element size divides the other, so the length and capacity
    /// cannot be rescaled without dropping bytes.
    Ratio {
        /// Size of the source element in bytes.
        src: usize,
        /// Size of the destination element in bytes.
        dst: usize,
    },
    /// The buffer address is not aligned for the destination type.
    Alignment {
        /// Address of the buffer.
        addr: usize,
        /// Alignment required by the destination type.
        align: usize,
    },
    /// The buffer length is not a whole number of destination values.
    Size {
        /// Length of the buffer in bytes.
        len: usize,
        /// Size of one destination value in bytes.
        elem: usize,
    },
    /// The bytes do not form a valid value of the destination type.
    Validity,
}

impl std::fmt::Display for CastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastError::OutOfBounds {
                available,
                required,
                target,
            } => write!(
                f,
                "slice has capacity of {available} bytes, but a single {target} is {required} bytes"
            ),
            CastError::Ratio { src, dst } => write!(
                f,
                "failed to cast: element sizes {src} and {dst} are not integer multiples"
            ),
            CastError::Alignment { addr, align } => write!(
                f,
                "failed to cast: address {addr:#x} is not aligned to {align} bytes"
            ),
            CastError::Size { len, elem } => write!(
                f,
                "failed to cast: {len} bytes is not a multiple of {elem} bytes"
            ),
            CastError::Validity => write!(
                f,
                "failed to cast: the conversion source contained invalid data."
            ),
        }
    }
}

impl std::error::Error for CastError {}

#[cfg(feature = "zerocopy")]
impl CastError {
    /// Map a zerocopy conversion failure for the `len` bytes at `addr` onto
    /// the destination's `align` and element size `elem`.
    pub(crate) fn from_zerocopy<A, S, V>(
        err: zerocopy::ConvertError<A, S, V>,
        (addr, len): (usize, usize),
        align: usize,
        elem: usize,
    ) -> Self {
        match err {
            zerocopy::ConvertError::Alignment(_) => CastError::Alignment { addr, align },
            zerocopy::ConvertError::Size(_) => CastError::Size { len, elem },
            zerocopy::ConvertError::Validity(_) => CastError::Validity,
        }
    }
}
