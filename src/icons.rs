//! Icon resolution.
//!
//! The tree builder only knows the [`IconResolver`] capability; the
//! concrete table lives here so alternative resolvers (or none) can be
//! injected without touching the scan code.

use std::path::Path;

use crate::fs::tree::NodeKind;

// Nerd-font glyphs, written as escapes since they render blank in most
// editors without a patched font.
const ICON_FOLDER: &str = "\u{f07b}";
const ICON_PARENT: &str = "\u{f062}";
const ICON_FILE: &str = "\u{f15b}";

/// Maps a path and node kind to an advisory icon. Returning `None` simply
/// leaves the node without one.
pub trait IconResolver {
    fn resolve(&self, path: &Path, kind: NodeKind) -> Option<&'static str>;
}

/// Nerd-font icons keyed on file extension, with fixed glyphs for folders
/// and the ".." row.
pub struct ExtensionIcons;

impl IconResolver for ExtensionIcons {
    fn resolve(&self, path: &Path, kind: NodeKind) -> Option<&'static str> {
        match kind {
            NodeKind::Folder => Some(ICON_FOLDER),
            NodeKind::ParentLink => Some(ICON_PARENT),
            NodeKind::File => {
                let ext = path
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                Some(file_icon(&ext))
            }
        }
    }
}

fn file_icon(ext: &str) -> &'static str {
    match ext {
        "rs" => "\u{e7a8}",
        "py" => "\u{e73c}",
        "js" | "jsx" | "ts" | "tsx" => "\u{e74e}",
        "html" | "htm" => "\u{e736}",
        "css" | "scss" => "\u{e749}",
        "json" | "toml" | "yaml" | "yml" | "ini" => "\u{e615}",
        "md" | "markdown" | "txt" | "rst" => "\u{f48a}",
        "sh" | "bash" | "zsh" => "\u{f489}",
        "c" | "h" => "\u{e61e}",
        "cpp" | "hpp" | "cc" => "\u{e61d}",
        "go" => "\u{e626}",
        "lock" => "\u{f023}",
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "ico" => "\u{f1c5}",
        "zip" | "tar" | "gz" | "xz" | "7z" => "\u{f1c6}",
        "pdf" => "\u{f1c1}",
        _ => ICON_FILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folders_get_the_folder_glyph() {
        let icon = ExtensionIcons.resolve(Path::new("/tmp/src"), NodeKind::Folder);
        assert_eq!(icon, Some(ICON_FOLDER));
    }

    #[test]
    fn parent_link_gets_an_icon() {
        assert_eq!(
            ExtensionIcons.resolve(Path::new(".."), NodeKind::ParentLink),
            Some(ICON_PARENT)
        );
    }

    #[test]
    fn known_extension_resolves() {
        let icon = ExtensionIcons.resolve(Path::new("/tmp/main.rs"), NodeKind::File);
        assert_eq!(icon, Some("\u{e7a8}"));
    }

    #[test]
    fn unknown_extension_gets_generic_file_icon() {
        let icon = ExtensionIcons.resolve(Path::new("/tmp/data.xyz"), NodeKind::File);
        assert_eq!(icon, Some(ICON_FILE));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(
            ExtensionIcons.resolve(Path::new("/tmp/NOTES.MD"), NodeKind::File),
            ExtensionIcons.resolve(Path::new("/tmp/notes.md"), NodeKind::File)
        );
    }

    #[test]
    fn extensionless_file_gets_generic_icon() {
        let icon = ExtensionIcons.resolve(Path::new("/tmp/Makefile"), NodeKind::File);
        assert_eq!(icon, Some(ICON_FILE));
    }
}
