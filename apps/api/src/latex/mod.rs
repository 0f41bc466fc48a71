// LaTeX handling: everything between raw generator text and a compilable document.
// Pure text transformations only, no I/O in this module.

pub mod escape;
pub mod sanitizer;
pub mod template;
pub mod wrapper;

pub use sanitizer::sanitize;
pub use template::template_resume;
pub use wrapper::wrap_document;
