//! Library side of the `acoff` command-line tool.

pub mod logging;
pub mod project;
