// Text-file persistence: dump directories, the legacy single file,
// and chunked account history.

pub mod export;
pub mod format;
pub mod history;
pub mod import;

pub use export::*;
pub use history::*;
pub use import::*;
