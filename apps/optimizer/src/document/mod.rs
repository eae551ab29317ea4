//! Document I/O: reading inputs, writing the OOXML résumé and the result set.

pub mod convert;
pub mod docx;
pub mod layout;
pub mod reader;
pub mod writer;

pub use convert::convert_docx_to_txt;
pub use reader::read_file_safely;
pub use writer::{save_results_to_files, timestamped_dir, SavedFiles};
