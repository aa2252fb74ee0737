//! Library side of the `airrep` command: logging setup and terminal tables.

pub mod logging;
pub mod summary;
