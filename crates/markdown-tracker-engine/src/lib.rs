pub mod batch;
pub mod io;
pub mod models;
pub mod scan;
pub mod sections;
pub mod table;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use batch::*;
pub use io::*;
pub use models::*;
pub use scan::*;
pub use table::{CHECKED, PROGRESS_LABEL, ParsedTable, Row, UNCHECKED};
