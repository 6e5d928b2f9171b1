//! Fixed-point conversion of millisecond timings into seconds.
use std::fmt;

use serde::{Serialize, Serializer};

const MILLIS_PER_SECOND: u64 = 1000;

/// A signed duration in seconds with exactly three fractional digits.
///
/// Stored as whole thousandths of a second, so conversion from milliseconds is
/// exact and rendering never goes through floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seconds {
    thousandths: i64,
}

impl Seconds {
    pub const ZERO: Self = Self { thousandths: 0 };

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            thousandths: millis,
        }
    }

    /// Integral part, truncated toward zero.
    #[must_use]
    pub const fn whole_seconds(self) -> i64 {
        self.thousandths / 1000
    }

    /// Fractional part in thousandths, always non-negative.
    #[must_use]
    pub const fn subsec_millis(self) -> u16 {
        (self.thousandths.unsigned_abs() % MILLIS_PER_SECOND) as u16
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.thousandths < 0
    }
}

/// Converts a duration in milliseconds into seconds to three decimal places,
/// rounding toward zero.
#[must_use]
pub const fn millis_to_seconds(duration_millis: i64) -> Seconds {
    Seconds::from_millis(duration_millis)
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.thousandths.unsigned_abs();
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:03}",
            sign,
            magnitude / MILLIS_PER_SECOND,
            magnitude % MILLIS_PER_SECOND
        )
    }
}

impl Serialize for Seconds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
