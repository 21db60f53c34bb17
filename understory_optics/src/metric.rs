// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance metrics between planar points.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::types::{Point, Scalar};

/// Distance policy used for neighbor discovery and reachability.
///
/// The metric is a run-time choice carried by [`OpticsParams`][crate::OpticsParams].
/// All distances, core distances, and reachability distances produced by a run
/// live in the metric's own space: for [`Metric::SquaredEuclidean`] they are
/// squared lengths.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Sum of absolute coordinate differences.
    Manhattan,
    /// Straight-line length.
    Euclidean,
    /// Squared straight-line length.
    ///
    /// Pairs with a squared epsilon (see [`Metric::threshold`]) so neighbor sets
    /// match [`Metric::Euclidean`] without a root per comparison.
    #[default]
    SquaredEuclidean,
}

impl Metric {
    /// Distance between two points. Total, non-negative and symmetric for finite input.
    #[inline]
    pub fn distance<T: Scalar>(self, a: &Point<T>, b: &Point<T>) -> f64 {
        let (a, b) = (a.to_kurbo(), b.to_kurbo());
        match self {
            Self::Manhattan => (a.x - b.x).abs() + (a.y - b.y).abs(),
            Self::Euclidean => a.distance(b),
            Self::SquaredEuclidean => a.distance_squared(b),
        }
    }

    /// Map a logical epsilon radius into this metric's comparison space.
    #[inline]
    pub fn threshold(self, epsilon: f64) -> f64 {
        match self {
            Self::Manhattan | Self::Euclidean => epsilon,
            Self::SquaredEuclidean => epsilon * epsilon,
        }
    }

    /// Map a distance in this metric's space back to a length.
    ///
    /// Useful when comparing reachability values across metrics.
    #[inline]
    pub fn to_length(self, distance: f64) -> f64 {
        match self {
            Self::Manhattan | Self::Euclidean => distance,
            Self::SquaredEuclidean => distance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Metric;
    use crate::types::Point;

    const ALL: [Metric; 3] = [
        Metric::Manhattan,
        Metric::Euclidean,
        Metric::SquaredEuclidean,
    ];

    #[test]
    fn known_distances() {
        let a = Point::new(0_i64, 0);
        let b = Point::new(3_i64, 4);
        assert_eq!(Metric::Manhattan.distance(&a, &b), 7.0);
        assert_eq!(Metric::Euclidean.distance(&a, &b), 5.0);
        assert_eq!(Metric::SquaredEuclidean.distance(&a, &b), 25.0);
    }

    #[test]
    fn symmetric_and_zero_on_self() {
        let a = Point::new(-2.5_f64, 1.0);
        let b = Point::new(4.0_f64, -7.25);
        for m in ALL {
            assert_eq!(m.distance(&a, &b), m.distance(&b, &a), "{m:?}");
            assert_eq!(m.distance(&a, &a), 0.0, "{m:?}");
            assert!(m.distance(&a, &b) > 0.0, "{m:?}");
        }
    }

    #[test]
    fn squared_threshold_agrees_with_euclidean() {
        let origin = Point::new(0_i32, 0);
        let eps = 5.0;
        for x in -7..=7 {
            for y in -7..=7 {
                let p = Point::new(x, y);
                let euclid = Metric::Euclidean.distance(&origin, &p)
                    <= Metric::Euclidean.threshold(eps);
                let squared = Metric::SquaredEuclidean.distance(&origin, &p)
                    <= Metric::SquaredEuclidean.threshold(eps);
                assert_eq!(euclid, squared, "disagreement at ({x}, {y})");
            }
        }
    }

    #[test]
    fn to_length_undoes_squaring() {
        assert_eq!(Metric::SquaredEuclidean.to_length(49.0), 7.0);
        assert_eq!(Metric::Manhattan.to_length(49.0), 49.0);
    }
}
