// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate scalars and the input point type.

use core::fmt::Debug;

/// Numeric scalar abstraction for point coordinates.
///
/// Distances are always computed in `f64`, so a scalar only needs to widen
/// into it and to expose a hashable bit pattern for duplicate detection.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widen the coordinate to `f64` for distance computations.
    fn to_f64(self) -> f64;

    /// Whether the value is finite. Integers always are.
    fn is_finite(self) -> bool;

    /// Bit pattern used to key coordinates in hash maps.
    ///
    /// Values that compare equal must produce the same bits.
    fn hash_bits(self) -> u64;
}

impl Scalar for i32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline(always)]
    fn is_finite(self) -> bool {
        true
    }

    #[inline]
    fn hash_bits(self) -> u64 {
        i64::from(self) as u64
    }
}

impl Scalar for i64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline(always)]
    fn is_finite(self) -> bool {
        true
    }

    #[inline]
    fn hash_bits(self) -> u64 {
        self as u64
    }
}

impl Scalar for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    #[inline]
    fn hash_bits(self) -> u64 {
        // -0.0 and 0.0 compare equal.
        if self == 0.0 {
            0
        } else {
            u64::from(self.to_bits())
        }
    }
}

impl Scalar for f64 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    #[inline]
    fn hash_bits(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() }
    }
}

/// An immutable planar point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point<T> {
    /// Horizontal coordinate.
    pub x: T,
    /// Vertical coordinate.
    pub y: T,
    /// Optional raw label carried through from the input; ignored by the clustering.
    pub label: Option<u32>,
}

impl<T> Point<T> {
    /// Create an unlabeled point.
    #[inline(always)]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y, label: None }
    }

    /// Create a point that carries a raw label.
    #[inline(always)]
    pub const fn with_label(x: T, y: T, label: u32) -> Self {
        Self {
            x,
            y,
            label: Some(label),
        }
    }
}

impl<T: Scalar> Point<T> {
    /// Widen into a [`kurbo::Point`] for distance computations.
    #[inline]
    pub fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(self.x.to_f64(), self.y.to_f64())
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Hashable key of the coordinate pair (the label is not part of it).
    #[inline]
    pub(crate) fn coord_key(&self) -> (u64, u64) {
        (self.x.hash_bits(), self.y.hash_bits())
    }
}

impl<T> From<(T, T)> for Point<T> {
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}
