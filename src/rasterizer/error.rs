//! Errors reported by target construction and render calls

use std::fmt;

/// Error type for `RenderTarget` construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// Width or height was zero
    InvalidDimensions { width: usize, height: usize },
    /// The byte budget cannot hold both buffers
    InsufficientMemory { required: usize, available: usize },
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::InvalidDimensions { width, height } => {
                write!(f, "invalid render target size {}x{}", width, height)
            }
            TargetError::InsufficientMemory { required, available } => write!(
                f,
                "render target needs {} bytes but only {} are available",
                required, available
            ),
        }
    }
}

impl std::error::Error for TargetError {}

/// Error type for malformed render input. Nothing is drawn when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    IndexCountNotMultipleOfThree { count: usize },
    VertexBufferTooShort { required: usize, len: usize },
    /// Buffer length is not a whole number of vertices
    VertexBufferMisaligned { len: usize, stride: usize },
    IndexOutOfRange { position: usize, index: u32, vertex_count: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::IndexCountNotMultipleOfThree { count } => {
                write!(f, "index count {} is not a multiple of 3", count)
            }
            RenderError::VertexBufferTooShort { required, len } => write!(
                f,
                "vertex buffer holds {} scalars, {} required",
                len, required
            ),
            RenderError::VertexBufferMisaligned { len, stride } => write!(
                f,
                "vertex buffer holds {} scalars, not a multiple of stride {}",
                len, stride
            ),
            RenderError::IndexOutOfRange { position, index, vertex_count } => write!(
                f,
                "index {} at position {} is out of range for {} vertices",
                index, position, vertex_count
            ),
        }
    }
}

impl std::error::Error for RenderError {}
