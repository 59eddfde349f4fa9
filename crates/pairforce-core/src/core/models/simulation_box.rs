use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoxError {
    #[error("Box extent along axis {axis} is not positive (lo = {lo}, hi = {hi})")]
    NonPositiveExtent { axis: usize, lo: f64, hi: f64 },
}

/// An orthorhombic, fully periodic simulation volume.
///
/// The box is described by its low and high corners. Only the edge lengths matter for the
/// minimum-image convention, so boxes need not be centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    lo: Vector3<f64>,
    hi: Vector3<f64>,
}

impl SimulationBox {
    pub fn new(lo: Vector3<f64>, hi: Vector3<f64>) -> Result<Self, BoxError> {
        for axis in 0..3 {
            if !(hi[axis] > lo[axis]) {
                return Err(BoxError::NonPositiveExtent {
                    axis,
                    lo: lo[axis],
                    hi: hi[axis],
                });
            }
        }
        Ok(Self { lo, hi })
    }

    /// Builds a box of the given edge lengths centered on the origin.
    pub fn cubic(length: f64) -> Result<Self, BoxError> {
        Self::from_lengths(Vector3::new(length, length, length))
    }

    pub fn from_lengths(lengths: Vector3<f64>) -> Result<Self, BoxError> {
        let half = lengths * 0.5;
        Self::new(-half, half)
    }

    #[inline]
    pub fn lo(&self) -> &Vector3<f64> {
        &self.lo
    }

    #[inline]
    pub fn hi(&self) -> &Vector3<f64> {
        &self.hi
    }

    #[inline]
    pub fn lengths(&self) -> Vector3<f64> {
        self.hi - self.lo
    }

    /// Axis with the smallest half edge length, and that half length.
    ///
    /// The half length bounds the cutoff the minimum-image rule supports.
    pub fn min_half_length(&self) -> (usize, f64) {
        let lengths = self.lengths();
        let axis = (1..3).fold(0, |best, axis| {
            if lengths[axis] < lengths[best] { axis } else { best }
        });
        (axis, 0.5 * lengths[axis])
    }

    /// Wraps a raw separation vector onto its nearest periodic image.
    ///
    /// Each component is shifted by at most one box length, so the result is only the true
    /// minimum image when the raw offset lies within one and a half box lengths.
    #[inline]
    pub fn minimum_image(&self, mut dr: Vector3<f64>) -> Vector3<f64> {
        let lengths = self.lengths();
        for axis in 0..3 {
            let length = lengths[axis];
            let half = 0.5 * length;
            if dr[axis] >= half {
                dr[axis] -= length;
            } else if dr[axis] < -half {
                dr[axis] += length;
            }
        }
        dr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn new_rejects_inverted_axis() {
        let result = SimulationBox::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, -1.0, 1.0));
        assert_eq!(
            result,
            Err(BoxError::NonPositiveExtent {
                axis: 1,
                lo: 0.0,
                hi: -1.0
            })
        );
    }

    #[test]
    fn new_rejects_zero_length_axis() {
        let result = SimulationBox::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 0.0));
        assert!(matches!(
            result,
            Err(BoxError::NonPositiveExtent { axis: 2, .. })
        ));
    }

    #[test]
    fn cubic_box_is_centered_on_origin() {
        let sim_box = SimulationBox::cubic(10.0).unwrap();
        assert_eq!(*sim_box.lo(), Vector3::new(-5.0, -5.0, -5.0));
        assert_eq!(*sim_box.hi(), Vector3::new(5.0, 5.0, 5.0));
        assert_eq!(sim_box.min_half_length(), (0, 5.0));
    }

    #[test]
    fn minimum_image_leaves_short_offsets_untouched() {
        let sim_box = SimulationBox::cubic(10.0).unwrap();
        let dr = Vector3::new(1.0, -2.0, 4.9);
        assert_eq!(sim_box.minimum_image(dr), dr);
    }

    #[test]
    fn minimum_image_wraps_each_axis_independently() {
        let sim_box = SimulationBox::from_lengths(Vector3::new(10.0, 20.0, 4.0)).unwrap();
        let wrapped = sim_box.minimum_image(Vector3::new(9.0, -15.0, 2.5));
        assert_abs_diff_eq!(wrapped, Vector3::new(-1.0, 5.0, -1.5), epsilon = 1e-12);
    }

    #[test]
    fn minimum_image_maps_exact_half_length_to_negative_half() {
        let sim_box = SimulationBox::cubic(10.0).unwrap();
        let wrapped = sim_box.minimum_image(Vector3::new(5.0, -5.0, 0.0));
        assert_eq!(wrapped, Vector3::new(-5.0, -5.0, 0.0));
    }

    #[test]
    fn minimum_image_does_not_depend_on_box_origin() {
        let shifted = SimulationBox::new(Vector3::zeros(), Vector3::new(10.0, 10.0, 10.0)).unwrap();
        let centered = SimulationBox::cubic(10.0).unwrap();
        let dr = Vector3::new(7.0, -8.0, 3.0);
        assert_eq!(shifted.minimum_image(dr), centered.minimum_image(dr));
    }

    #[test]
    fn min_half_length_reports_the_shortest_axis() {
        let sim_box = SimulationBox::from_lengths(Vector3::new(10.0, 20.0, 4.0)).unwrap();
        assert_eq!(sim_box.min_half_length(), (2, 2.0));
    }
}
