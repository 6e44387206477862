//! UI Components for the System Prompt Generator.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadForm`] - The four file pickers, loader and download section

mod hero;
mod upload;
mod footer;

pub use hero::*;
pub use upload::*;
pub use footer::*;
