//! Application services for the administrative surface.

pub mod blogs;
