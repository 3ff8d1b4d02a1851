//! The folder tree data model and builder.
//!
//! Nodes live in an arena owned by [`FolderTree`]; `NodeId` handles keep
//! the parent back-reference cycle-free. A folder's children are either
//! fully loaded or deferred ([`ChildState::Deferred`]) — deferred folders
//! render collapsed-but-expandable and are materialized one level at a
//! time, on expand or when a recursive search descends into them.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fs::env::expand_env_tokens;
use crate::icons::IconResolver;

/// Folder names excluded from traversal by default (comma-separated).
pub const DEFAULT_SKIP_FOLDERS: &str =
    ".git,node_modules,bower_components,packages,testresults,bin,obj";

/// Root paths no longer than this are treated as bare roots (`/`, `C:\`)
/// and get no synthetic ".." row.
const PARENT_LINK_MIN_PATH_LEN: usize = 5;

/// Handle to a node inside a [`FolderTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// What a tree node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
    /// Synthetic ".." row for navigating to the parent directory. Behaves
    /// like a folder in the UI but is never scanned.
    ParentLink,
}

/// Load state of a folder's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildState {
    /// Children are materialized (possibly empty). Files are always
    /// `Loaded` with an empty list.
    Loaded(Vec<NodeId>),
    /// Folder contents have not been scanned yet.
    Deferred,
}

/// A single entry of the folder tree.
#[derive(Debug, Clone)]
pub struct PathNode {
    pub full_path: PathBuf,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: ChildState,
    /// UI flag set by the visibility filter.
    pub is_visible: bool,
    /// UI flag set by the visibility filter and by user expand/collapse.
    pub is_expanded: bool,
    /// Advisory icon from the injected resolver; `None` when icons are off
    /// or the resolver had nothing to offer.
    pub icon: Option<&'static str>,
}

impl PathNode {
    fn new(full_path: PathBuf, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            full_path,
            kind,
            parent,
            children: ChildState::Loaded(Vec::new()),
            is_visible: true,
            is_expanded: false,
            icon: None,
        }
    }

    /// Last path segment, used for display and search matching.
    /// Falls back to the full path string (so ".." displays as "..").
    pub fn display_name(&self) -> String {
        self.full_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.full_path.to_string_lossy().to_string())
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.children, ChildState::Deferred)
    }
}

/// A row of the rendered tree: one visible node plus the bookkeeping the
/// widget needs for box-drawing prefixes.
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub depth: usize,
    pub is_expanded: bool,
    pub is_deferred: bool,
    pub is_last_sibling: bool,
    pub icon: Option<&'static str>,
}

/// Arena-backed folder tree.
#[derive(Debug)]
pub struct FolderTree {
    nodes: Vec<PathNode>,
    root: NodeId,
}

impl FolderTree {
    fn with_root(root_node: PathNode) -> Self {
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut PathNode {
        &mut self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate every node handle in the arena.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Materialized children of `id`; empty for files and deferred folders.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].children {
            ChildState::Loaded(ids) => ids,
            ChildState::Deferred => &[],
        }
    }

    /// Append `node` to the arena and link it into its parent's child list.
    fn attach(&mut self, node: PathNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = node.parent;
        self.nodes.push(node);
        if let Some(p) = parent {
            if let ChildState::Loaded(ids) = &mut self.nodes[p.0].children {
                ids.push(id);
            }
        }
        id
    }

    /// Move `id` to the front of its parent's child list (the ".." row
    /// always renders first).
    fn move_to_front(&mut self, id: NodeId) {
        let Some(p) = self.nodes[id.0].parent else {
            return;
        };
        if let ChildState::Loaded(ids) = &mut self.nodes[p.0].children {
            if let Some(pos) = ids.iter().position(|c| *c == id) {
                ids.remove(pos);
                ids.insert(0, id);
            }
        }
    }

    /// Flatten the tree into renderable rows: the root, then the visible
    /// children of every expanded node, depth-first.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.collect_rows(self.root, 0, true, &mut rows);
        rows
    }

    fn collect_rows(&self, id: NodeId, depth: usize, is_last: bool, rows: &mut Vec<TreeRow>) {
        let node = self.node(id);
        rows.push(TreeRow {
            id,
            name: node.display_name(),
            kind: node.kind,
            depth,
            is_expanded: node.is_expanded,
            is_deferred: node.is_deferred(),
            is_last_sibling: is_last,
            icon: node.icon,
        });

        if !node.is_expanded {
            return;
        }
        let visible: Vec<NodeId> = self
            .children(id)
            .iter()
            .copied()
            .filter(|c| self.node(*c).is_visible)
            .collect();
        for (i, child) in visible.iter().enumerate() {
            self.collect_rows(*child, depth + 1, i == visible.len() - 1, rows);
        }
    }
}

/// Builds [`FolderTree`]s. Carries the skip list and icon settings so the
/// scan itself stays free of global state.
pub struct TreeBuilder {
    skip: HashSet<String>,
    show_icons: bool,
    icons: Box<dyn IconResolver>,
}

impl TreeBuilder {
    /// `skip_folders` is a comma-separated list of folder names (matched
    /// case-insensitively) to exclude from traversal.
    pub fn new(skip_folders: &str, show_icons: bool, icons: Box<dyn IconResolver>) -> Self {
        let skip = skip_folders
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            skip,
            show_icons,
            icons,
        }
    }

    /// Build a tree rooted at `base_folder` (after environment-token
    /// expansion). With `non_recursive` set, subfolders are created
    /// deferred instead of being descended into.
    ///
    /// Never fails: an empty or nonexistent `base_folder` yields a tree
    /// holding a single empty root node.
    pub fn build(&self, base_folder: &str, non_recursive: bool) -> FolderTree {
        let expanded = expand_env_tokens(base_folder);
        let base = Path::new(&expanded);
        if expanded.is_empty() || !base.is_dir() {
            return FolderTree::with_root(PathNode::new(PathBuf::new(), NodeKind::Folder, None));
        }

        let mut tree =
            FolderTree::with_root(PathNode::new(base.to_path_buf(), NodeKind::Folder, None));
        let root = tree.root();
        tree.node_mut(root).is_expanded = true;
        self.annotate_icon(&mut tree, root);
        self.scan_into(&mut tree, root, non_recursive);

        // Bare filesystem roots have nowhere to navigate up to.
        if expanded.len() > PARENT_LINK_MIN_PATH_LEN {
            let link = PathNode::new(PathBuf::from(".."), NodeKind::ParentLink, Some(root));
            let id = tree.attach(link);
            self.annotate_icon(&mut tree, id);
            tree.move_to_front(id);
        }
        tree
    }

    /// Replace a deferred folder's state with one freshly scanned level
    /// (each subfolder again deferred). No-op on already-loaded nodes.
    pub fn materialize(&self, tree: &mut FolderTree, id: NodeId) {
        if !tree.node(id).is_deferred() {
            return;
        }
        tree.node_mut(id).children = ChildState::Loaded(Vec::new());
        self.scan_into(tree, id, true);
    }

    /// Scan one directory level into `id`: subfolders first, then files,
    /// each group sorted case-insensitively by full path. Enumeration
    /// failures are swallowed and read as an empty directory.
    fn scan_into(&self, tree: &mut FolderTree, id: NodeId, non_recursive: bool) {
        let dir = tree.node(id).full_path.clone();
        let mut sub_dirs: Vec<PathBuf> = Vec::new();
        let mut files: Vec<PathBuf> = Vec::new();

        if let Ok(entries) = fs::read_dir(&dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string())
                else {
                    continue;
                };
                if name.starts_with('.') {
                    continue;
                }
                // file_type() does not follow symlinks, so symlinked
                // directories land in the file list and are never descended
                // into.
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if is_dir {
                    if self.skip.contains(&name.to_lowercase()) {
                        continue;
                    }
                    sub_dirs.push(path);
                } else {
                    files.push(path);
                }
            }
        }

        sub_dirs.sort_by_key(|p| p.to_string_lossy().to_lowercase());
        files.sort_by_key(|p| p.to_string_lossy().to_lowercase());

        for sub in sub_dirs {
            let child = tree.attach(PathNode::new(sub, NodeKind::Folder, Some(id)));
            self.annotate_icon(tree, child);
            if non_recursive {
                tree.node_mut(child).children = ChildState::Deferred;
            } else {
                self.scan_into(tree, child, false);
            }
        }
        for file in files {
            let child = tree.attach(PathNode::new(file, NodeKind::File, Some(id)));
            self.annotate_icon(tree, child);
        }
    }

    fn annotate_icon(&self, tree: &mut FolderTree, id: NodeId) {
        if !self.show_icons {
            return;
        }
        let icon = {
            let node = tree.node(id);
            self.icons.resolve(&node.full_path, node.kind)
        };
        tree.node_mut(id).icon = icon;
    }
}
