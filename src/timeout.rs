//! Numeric input accepted by [`GumroadClient::set_timeout`](crate::GumroadClient::set_timeout).

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// A value that may be interpreted as a timeout in milliseconds.
///
/// Integers and floats are always numeric (except NaN and infinities).
/// Strings are numeric when they parse as a decimal number after trimming,
/// which lets values from the environment or a config file pass straight
/// through.
pub trait TimeoutValue {
    /// The value as milliseconds, or `None` if it is not numeric.
    fn to_millis(&self) -> Option<f64>;
}

macro_rules! impl_timeout_value {
    ($($t:ty),*) => {
        $(
            impl TimeoutValue for $t {
                fn to_millis(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_timeout_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32);

impl TimeoutValue for f64 {
    fn to_millis(&self) -> Option<f64> {
        self.is_finite().then_some(*self)
    }
}

impl TimeoutValue for str {
    fn to_millis(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl TimeoutValue for String {
    fn to_millis(&self) -> Option<f64> {
        self.as_str().to_millis()
    }
}

impl<T: TimeoutValue + ?Sized> TimeoutValue for &T {
    fn to_millis(&self) -> Option<f64> {
        (**self).to_millis()
    }
}

impl<T: TimeoutValue> TimeoutValue for Option<T> {
    fn to_millis(&self) -> Option<f64> {
        self.as_ref().and_then(TimeoutValue::to_millis)
    }
}

/// Normalize a timeout: non-numeric input yields `None`, anything at or
/// below zero becomes 1, everything else is truncated (never below 1).
pub(crate) fn normalize<T: TimeoutValue + ?Sized>(value: &T) -> Option<u64> {
    let millis = value.to_millis()?;
    if !millis.is_finite() {
        return None;
    }
    if millis <= 0.0 {
        return Some(1);
    }
    Some((millis.trunc() as u64).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_pass_through() {
        assert_eq!(normalize(&1500), Some(1500));
        assert_eq!(normalize(&1u8), Some(1));
    }

    #[test]
    fn test_floats_truncate() {
        assert_eq!(normalize(&2500.9), Some(2500));
        assert_eq!(normalize(&1.0f32), Some(1));
        assert_eq!(normalize(&0.4), Some(1));
    }

    #[test]
    fn test_non_positive_clamps_to_one() {
        assert_eq!(normalize(&0), Some(1));
        assert_eq!(normalize(&-250), Some(1));
        assert_eq!(normalize(&-0.5), Some(1));
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        assert_eq!(normalize("soon"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize(&f64::NAN), None);
        assert_eq!(normalize(&f64::INFINITY), None);
        assert_eq!(normalize(&None::<u64>), None);
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(normalize(" 3000 "), Some(3000));
        assert_eq!(normalize(&"12.75".to_string()), Some(12));
        assert_eq!(normalize("-4"), Some(1));
    }
}
