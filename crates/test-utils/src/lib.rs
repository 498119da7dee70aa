//! Shared test utilities for the ogc-tiles workspace.
//!
//! - [`fixtures`]: tileset and tile matrix set documents as JSON values
//! - [`generators`]: tile coordinate ranges for sweeping URL functions
//! - `assert_close!` / `assert_extent_close!` for map-unit comparisons
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Default tolerance, in map units, of the closeness assertions.
///
/// Web Mercator constants are commonly written with different numbers of
/// decimals, which differ around the eighth decimal of a metre.
pub const MAP_UNIT_TOLERANCE: f64 = 1e-6;

/// Assert two scalars or two `(x, y)` pairs agree within a tolerance.
///
/// ```ignore
/// assert_close!(origin.0, -20037508.3427892);
/// assert_close!((x, y), (0.0, 0.0), 1e-3);
/// ```
#[macro_export]
macro_rules! assert_close {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr) $(,)?) => {
        $crate::assert_close!(($x1, $y1), ($x2, $y2), $crate::MAP_UNIT_TOLERANCE)
    };
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $tolerance:expr $(,)?) => {{
        $crate::assert_close!($x1, $x2, $tolerance);
        $crate::assert_close!($y1, $y2, $tolerance);
    }};
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_close!($left, $right, $crate::MAP_UNIT_TOLERANCE)
    };
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {{
        let (left, right, tolerance): (f64, f64, f64) = ($left, $right, $tolerance);
        if !((left - right).abs() <= tolerance) {
            panic!(
                "values differ by more than {}: {} vs {} ({} = {}, {} = {})",
                tolerance,
                left,
                right,
                stringify!($left),
                left,
                stringify!($right),
                right
            );
        }
    }};
}

/// Assert two `[min_x, min_y, max_x, max_y]` extents agree edge by edge.
#[macro_export]
macro_rules! assert_extent_close {
    ($left:expr, $right:expr $(,)?) => {{
        let left: [f64; 4] = $left;
        let right: [f64; 4] = $right;
        for (edge, (l, r)) in ["min_x", "min_y", "max_x", "max_y"]
            .iter()
            .zip(left.iter().zip(right.iter()))
        {
            if !((l - r).abs() <= $crate::MAP_UNIT_TOLERANCE) {
                panic!("extents differ at {}: {:?} vs {:?}", edge, left, right);
            }
        }
    }};
}
