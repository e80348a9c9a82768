pub mod file_tree;
pub mod table_data;

pub use file_tree::{FileTree, FileTreeNode};
pub use table_data::{
    FileData, FileError, SaveReport, SaveRequest, SaveResponse, TableData, TableUpdate,
};
