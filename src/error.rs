use ndarray::ShapeError;
use quick_error::quick_error;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum QcError {
        /// The input array has the wrong number of dimensions.
        InvalidDimension(expected: usize, found: usize) {
            display("Invalid input dimensionality: expected {}D data, got {}D", expected, found)
        }

        /// Neighbourhood class is not one of 1 (faces), 2 (faces and edges) or 3 (faces, edges and corners).
        InvalidConnectivity(nn: u8) {
            display("Invalid connectivity class {}, must be 1, 2 or 3", nn)
        }

        /// A voxel coordinate lies outside the spatial extent of the image.
        OutOfBounds(coord: [isize; 3], shape: [usize; 3]) {
            display("Voxel coordinate {:?} is out of bounds for volume of shape {:?}", coord, shape)
        }

        /// More unique voxels requested than there are candidates.
        SamplingInfeasible(requested: usize, available: usize) {
            display("Cannot draw {} voxels without replacement from {} coordinates", requested, available)
        }

        EmptySample {
            display("Voxel sample is empty, cannot compute a mean time series")
        }

        EmptyInput {
            display("Input array is empty")
        }

        InvalidParameter(name: &'static str, reason: String) {
            display("Invalid parameter '{}': {}", name, reason)
        }

        /// A required motion parameter column is not present in the table.
        MissingColumn(name: String) {
            display("Motion table has no column named '{}'", name)
        }

        InvalidMotionTable(reason: String) {
            display("Invalid motion table: {}", reason)
        }

        UnknownCorrectionMethod(name: String) {
            display("Unknown multiple-comparison correction method '{}'", name)
        }

        /// Array shape error from ndarray
        Shape(err: ShapeError) {
            from()
            source(err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, QcError>;
