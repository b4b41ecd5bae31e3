pub mod archive_components;
pub mod error_boundary;
pub mod navbar;
pub mod suspend_boundary;
