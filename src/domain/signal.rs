//! Trading direction signal.

use std::fmt;

/// Intended trading direction for a bar: long (+1), flat (0), short (-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    Long,
    #[default]
    Flat,
    Short,
}

impl Signal {
    /// Numeric direction used in return arithmetic.
    pub fn value(self) -> f64 {
        match self {
            Signal::Long => 1.0,
            Signal::Flat => 0.0,
            Signal::Short => -1.0,
        }
    }

    pub fn as_int(self) -> i8 {
        match self {
            Signal::Long => 1,
            Signal::Flat => 0,
            Signal::Short => -1,
        }
    }

    /// |self - prev| as used by the turnover cost term: 0 when unchanged,
    /// 1 when entering or exiting, 2 when flipping long <-> short.
    pub fn turnover(self, prev: Signal) -> f64 {
        (self.value() - prev.value()).abs()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_int())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_match_directions() {
        assert!((Signal::Long.value() - 1.0).abs() < f64::EPSILON);
        assert!((Signal::Flat.value()).abs() < f64::EPSILON);
        assert!((Signal::Short.value() + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn turnover_unchanged_is_zero() {
        assert!((Signal::Long.turnover(Signal::Long)).abs() < f64::EPSILON);
        assert!((Signal::Flat.turnover(Signal::Flat)).abs() < f64::EPSILON);
    }

    #[test]
    fn turnover_entry_is_one() {
        assert!((Signal::Long.turnover(Signal::Flat) - 1.0).abs() < f64::EPSILON);
        assert!((Signal::Flat.turnover(Signal::Short) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn turnover_flip_is_two() {
        assert!((Signal::Short.turnover(Signal::Long) - 2.0).abs() < f64::EPSILON);
        assert!((Signal::Long.turnover(Signal::Short) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_is_numeric() {
        assert_eq!(Signal::Long.to_string(), "1");
        assert_eq!(Signal::Flat.to_string(), "0");
        assert_eq!(Signal::Short.to_string(), "-1");
    }
}
