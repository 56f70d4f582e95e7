//! Remainder handling for the 8-lane SIMD loop.
//!
//! Adds the last 1-7 elements that don't fill a full register to a running
//! scalar, strictly in index order so the tail rounds like a scalar loop.

/// Unrolled remainder sum for 1-7 trailing elements.
macro_rules! sum_remainder_unrolled_8 {
    ($a:expr, $b:expr, $base:expr, $remainder:expr, $result:expr) => {
        if $remainder >= 4 {
            $result += $a[$base] * $b[$base];
            $result += $a[$base + 1] * $b[$base + 1];
            $result += $a[$base + 2] * $b[$base + 2];
            $result += $a[$base + 3] * $b[$base + 3];
            if $remainder >= 5 {
                $result += $a[$base + 4] * $b[$base + 4];
            }
            if $remainder >= 6 {
                $result += $a[$base + 5] * $b[$base + 5];
            }
            if $remainder == 7 {
                $result += $a[$base + 6] * $b[$base + 6];
            }
        } else if $remainder >= 2 {
            $result += $a[$base] * $b[$base];
            $result += $a[$base + 1] * $b[$base + 1];
            if $remainder == 3 {
                $result += $a[$base + 2] * $b[$base + 2];
            }
        } else if $remainder == 1 {
            $result += $a[$base] * $b[$base];
        }
    };
}

#[allow(unused_imports)]
pub(crate) use sum_remainder_unrolled_8;
