mod repository;
mod table;

pub use repository::*;
pub(crate) use table::Table;
