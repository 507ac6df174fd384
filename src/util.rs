/// Asserts that a numerical value is in the closed interval `[a,b]` and panics
/// with a message naming the offending expression if not
///
/// ### Example
/// ```should_panic
/// let alpha = 2.0;
/// qcontrol::assert_interval!(alpha, 0.0, 1.0);
/// ```
/// This panics with the message "Invalid value 2 for \`alpha\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value {} for `{}`. Must be in the interval [{}, {}].",
            $var,
            stringify!($var),
            $a,
            $b,
        );
    };
}
