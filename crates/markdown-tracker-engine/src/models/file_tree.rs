use relative_path::{RelativePath, RelativePathBuf};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A folder or markdown file below the data root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTreeNode {
    pub name: String,
    pub path: RelativePathBuf,
    pub is_folder: bool,
    #[serde(serialize_with = "serialize_children")]
    pub children: BTreeMap<String, FileTreeNode>,
}

impl FileTreeNode {
    pub fn new_folder(name: String, path: RelativePathBuf) -> Self {
        Self {
            name,
            path,
            is_folder: true,
            children: BTreeMap::new(),
        }
    }

    pub fn new_file(name: String, path: RelativePathBuf) -> Self {
        Self {
            name,
            path,
            is_folder: false,
            children: BTreeMap::new(),
        }
    }

    /// Inserts a file, creating intermediate folders as needed.
    pub fn insert_file(&mut self, relative_path: &RelativePath, full_path: RelativePathBuf) {
        match relative_path.as_str().split_once('/') {
            None if relative_path.as_str().is_empty() => {}
            None => {
                let name = relative_path.as_str().to_string();
                let node = FileTreeNode::new_file(name.clone(), full_path);
                self.children.insert(name, node);
            }
            Some((folder, rest)) => {
                let folder_path = self.path.join(folder);
                self.children
                    .entry(folder.to_string())
                    .or_insert_with(|| FileTreeNode::new_folder(folder.to_string(), folder_path))
                    .insert_file(RelativePath::new(rest), full_path);
            }
        }
    }

    /// Children with folders first, then files, each case-insensitively by name.
    pub fn sorted_children(&self) -> Vec<&FileTreeNode> {
        display_order(&self.children)
    }

    /// Number of files at or below this node.
    pub fn file_count(&self) -> usize {
        if self.is_folder {
            self.children.values().map(FileTreeNode::file_count).sum()
        } else {
            1
        }
    }
}

fn display_order(children: &BTreeMap<String, FileTreeNode>) -> Vec<&FileTreeNode> {
    let mut sorted: Vec<_> = children.values().collect();
    sorted.sort_by(|a, b| match (a.is_folder, b.is_folder) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
    sorted
}

fn serialize_children<S: Serializer>(
    children: &BTreeMap<String, FileTreeNode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(display_order(children))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileTree {
    pub root: FileTreeNode,
}

impl FileTree {
    pub fn new(root_name: String) -> Self {
        Self {
            root: FileTreeNode::new_folder(root_name, RelativePathBuf::new()),
        }
    }

    /// Builds a tree from paths relative to the root.
    pub fn build_from_files(root_name: String, files: &[RelativePathBuf]) -> Self {
        let mut tree = Self::new(root_name);
        for file in files {
            tree.root.insert_file(file, file.clone());
        }
        tree
    }
}
