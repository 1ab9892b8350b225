/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```ignore
/// let value = 2.0;
/// assert_interval!(value, 0.0, 1.0);
/// ```
/// This will panic with the message "Invalid value for \`value\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Checks that a numerical value is in the provided interval `[a,b]` and returns
/// early with [`ConfigError::OutOfRange`](crate::error::ConfigError::OutOfRange) if not
///
/// ### Example
/// ```ignore
/// let alpha = 2.0;
/// ensure_interval!(alpha, 0.0, 1.0);
/// ```
/// This returns an error reading "invalid value for \`alpha\`: 2 is not in the interval \[0, 1\]".
#[macro_export]
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::error::ConfigError::OutOfRange {
                name: stringify!($var),
                value: $var as f64,
                min: $a as f64,
                max: $b as f64,
            });
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;

    fn check(alpha: f64) -> Result<(), ConfigError> {
        ensure_interval!(alpha, 0.0, 1.0);
        Ok(())
    }

    #[test]
    fn accepts_bounds() {
        assert!(check(0.0).is_ok());
        assert!(check(1.0).is_ok());
        assert!(check(0.5).is_ok());
    }

    #[test]
    #[should_panic(expected = "Invalid value for `gamma`")]
    fn assert_panics_outside() {
        let gamma = 1.5;
        assert_interval!(gamma, 0.0, 1.0);
    }

    #[test]
    fn rejects_outside_and_nan() {
        let Err(ConfigError::OutOfRange { name, value, .. }) = check(1.5) else {
            panic!("1.5 should be rejected");
        };
        assert_eq!(name, "alpha");
        assert_eq!(value, 1.5);
        assert!(check(-0.1).is_err());
        assert!(check(f64::NAN).is_err(), "NaN is never in an interval");
    }
}
