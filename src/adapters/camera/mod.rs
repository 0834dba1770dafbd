//! Camera capture
//!
//! [`Camera`] is the seam the scan controller talks to; [`StillImageCamera`]
//! is the file-backed implementation used by the command-line front end.

pub mod still;
pub mod traits;

pub use still::StillImageCamera;
pub use traits::{Camera, VideoStream};
