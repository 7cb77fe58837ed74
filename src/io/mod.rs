mod source;

pub use source::{FileSource, ImageSource, MemorySource, DEFAULT_MAX_FILE_SIZE};
