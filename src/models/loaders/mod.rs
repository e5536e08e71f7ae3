pub mod marks_loader;
pub mod url_loader;

pub use marks_loader::{load_marks, MarksFile};
pub use url_loader::load_urls;
