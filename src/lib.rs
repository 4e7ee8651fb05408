pub mod bumper;
pub mod config;
pub mod error;
pub mod git;
pub mod ui;
pub mod version;

pub use bumper::{BumpOptions, Bumper};
pub use error::{GitVersionError, Result};
pub use version::{Field, Version};
