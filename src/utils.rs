use std::path::Path;

use crate::names;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lower-cased extension of an accepted document name, if any.
pub fn document_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    names::DOCUMENT_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}
