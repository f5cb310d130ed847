//! Voxel coordinates and coordinate sets inside a 4D (x, y, z, time) image.

use std::fmt;

use crate::error::{QcError, Result};

/// A voxel index `(i, j, k)`. Signed, since neighbourhoods of border voxels reach outside the volume.
pub type Coordinate = [isize; 3];


/// An ordered list of voxel coordinates, e.g. all voxels of a ROI. Duplicates are allowed and kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateSet {
    pub coords: Vec<Coordinate>,
}

impl CoordinateSet {
    pub fn new(coords: Vec<Coordinate>) -> CoordinateSet {
        CoordinateSet { coords }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.coords.contains(coord)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.coords.iter()
    }

    /// Convert all coordinates into unsigned array indices for a volume with the given spatial shape.
    ///
    /// # Errors
    ///
    /// [`QcError::OutOfBounds`] for the first coordinate that is negative or exceeds the shape.
    pub fn checked_indices(&self, shape: [usize; 3]) -> Result<Vec<[usize; 3]>> {
        self.coords.iter().map(|c| checked_index(c, shape)).collect()
    }
}

/// A single coordinate is treated as a set with one element.
impl From<Coordinate> for CoordinateSet {
    fn from(coord: Coordinate) -> CoordinateSet {
        CoordinateSet { coords: vec![coord] }
    }
}

impl From<Vec<Coordinate>> for CoordinateSet {
    fn from(coords: Vec<Coordinate>) -> CoordinateSet {
        CoordinateSet { coords }
    }
}

impl From<&[Coordinate]> for CoordinateSet {
    fn from(coords: &[Coordinate]) -> CoordinateSet {
        CoordinateSet { coords: coords.to_vec() }
    }
}

impl From<&CoordinateSet> for CoordinateSet {
    fn from(set: &CoordinateSet) -> CoordinateSet {
        set.clone()
    }
}

impl fmt::Display for CoordinateSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Coordinate set with {} voxels.", self.coords.len())
    }
}


/// Map a signed voxel coordinate to an index into a volume of the given spatial shape.
pub fn checked_index(coord: &Coordinate, shape: [usize; 3]) -> Result<[usize; 3]> {
    let mut index = [0usize; 3];
    for axis in 0..3 {
        let c = coord[axis];
        if c < 0 || c as usize >= shape[axis] {
            return Err(QcError::OutOfBounds(*coord, shape));
        }
        index[axis] = c as usize;
    }
    Ok(index)
}
