//! Generator communication and submission handling.
//!
//! # Services
//!
//! - [`upload`] - multipart POST to the generator (`UploadTransport`)
//! - [`submit`] - `UploadSubmitHandler`, the form submission cycle
//! - [`download`] - object URLs and alerts

pub mod upload;
pub mod submit;
pub mod download;

pub use upload::*;
pub use submit::*;
pub use download::*;
