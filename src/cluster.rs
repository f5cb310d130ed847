//! Voxel neighbourhoods (clusters) around a center voxel.

use std::collections::HashSet;
use std::convert::TryFrom;
use std::fmt;

use tracing::debug;

use crate::coords::{Coordinate, CoordinateSet};
use crate::error::{QcError, Result};


/// Neighbourhood class, i.e. which voxels count as adjacent to the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// NN=1: voxels sharing a face.
    Faces,
    /// NN=2: voxels sharing a face or an edge.
    FacesEdges,
    /// NN=3: voxels sharing a face, an edge or a corner.
    FacesEdgesCorners,
}

impl Connectivity {
    /// The neighbourhood class number NN, 1 to 3.
    pub fn nn(&self) -> u8 {
        match self {
            Connectivity::Faces => 1,
            Connectivity::FacesEdges => 2,
            Connectivity::FacesEdgesCorners => 3,
        }
    }

    /// Maximal Euclidean distance from the center for a cluster of the given size: `size * sqrt(NN)`.
    pub fn threshold(&self, size: usize) -> f64 {
        let size = size as f64;
        (size * size * self.nn() as f64).sqrt()
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = QcError;

    fn try_from(nn: u8) -> Result<Connectivity> {
        match nn {
            1 => Ok(Connectivity::Faces),
            2 => Ok(Connectivity::FacesEdges),
            3 => Ok(Connectivity::FacesEdgesCorners),
            _ => Err(QcError::InvalidConnectivity(nn)),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Connectivity::Faces => write!(f, "faces"),
            Connectivity::FacesEdges => write!(f, "faces and edges"),
            Connectivity::FacesEdgesCorners => write!(f, "faces, edges, and corners"),
        }
    }
}


/// Euclidean distance between two voxel coordinates.
pub fn euclidean_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(p, q)| ((q - p) * (q - p)) as f64)
        .sum::<f64>()
        .sqrt()
}


/// Get the coordinates of all voxels within `size` voxels of `center` under the given connectivity.
///
/// Candidates are all voxels of the cube `center +- size` along each axis, kept if their Euclidean distance
/// to the center is at most [`Connectivity::threshold`]. The center itself is included, and the result is
/// ordered by x, then y, then z. If a `mask` is given, only coordinates contained in it are returned.
///
/// Note that for `size > 1` the face class admits every voxel within distance `size`, not only voxels along
/// the three axes.
///
/// # Examples
///
/// ```
/// use neuroqc::{get_cluster_coordinates, Connectivity};
/// assert_eq!(7, get_cluster_coordinates([0, 0, 0], 1, Connectivity::Faces, None).len());
/// assert_eq!(27, get_cluster_coordinates([0, 0, 0], 1, Connectivity::FacesEdgesCorners, None).len());
/// ```
pub fn get_cluster_coordinates(center: Coordinate, size: usize, connectivity: Connectivity, mask: Option<&CoordinateSet>) -> Vec<Coordinate> {
    let thr = connectivity.threshold(size);
    let r = size as isize;
    let [x, y, z] = center;

    let mut cluster: Vec<Coordinate> = Vec::new();
    for i in x - r..=x + r {
        for j in y - r..=y + r {
            for k in z - r..=z + r {
                let candidate = [i, j, k];
                if euclidean_distance(&center, &candidate) <= thr {
                    cluster.push(candidate);
                }
            }
        }
    }

    if let Some(mask) = mask {
        let allowed: HashSet<&Coordinate> = mask.iter().collect();
        cluster.retain(|c| allowed.contains(c));
    }
    debug!(?center, size, nn = connectivity.nn(), voxels = cluster.len(), "cluster coordinates");
    cluster
}


/// Like [`get_cluster_coordinates`], with the connectivity given as the raw class number NN.
///
/// # Errors
///
/// [`QcError::InvalidConnectivity`] if `nn` is not 1, 2 or 3.
pub fn get_cluster_coordinates_nn(center: Coordinate, size: usize, nn: u8, mask: Option<&CoordinateSet>) -> Result<Vec<Coordinate>> {
    let connectivity = Connectivity::try_from(nn)?;
    Ok(get_cluster_coordinates(center, size, connectivity, mask))
}
