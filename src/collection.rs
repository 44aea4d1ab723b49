//! The album directory on disk: clean rebuild before a run and read-back of
//! what a run produced.

mod reset;
mod scan;

pub use reset::{Reset, reset_dir};
pub use scan::{file_names, scan_album};
