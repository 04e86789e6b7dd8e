use std::collections::HashMap;

/// Named 2D facial landmarks for one frame, keyed by the detection model's
/// stable landmark indices.
///
/// Coordinates are in the detector's own space (typically normalized to the
/// frame); the pose math only uses relative offsets, so no unit is assumed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkSet {
    points: HashMap<u32, (f64, f64)>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u32, point: (f64, f64)) {
        self.points.insert(index, point);
    }

    pub fn point(&self, index: u32) -> Option<(f64, f64)> {
        self.points.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(u32, (f64, f64))> for LandmarkSet {
    fn from_iter<T: IntoIterator<Item = (u32, (f64, f64))>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
