use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use walkdir::WalkDir;

use crate::error::{LocError, Result};

/// Absolute, symlink-free form of `dir`, which must be an existing directory.
pub fn resolve_root(dir: &Path) -> Result<PathBuf> {
    let resolved = dir
        .canonicalize()
        .map_err(|source| LocError::PathResolution {
            path: dir.to_path_buf(),
            source,
        })?;

    if !resolved.is_dir() {
        return Err(LocError::PathResolution {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "not a directory"),
        });
    }
    Ok(resolved)
}

/// `*` stays inside one path segment; only `**` crosses directories.
pub fn compile(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| LocError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{', '\\'])
}

/// Leading directory segments of `pattern` that contain no wildcard.
///
/// The walk for a pattern starts here instead of at the root. Empty, `.` and
/// `..` segments end the prefix, so the result is always inside the root.
pub fn literal_base(pattern: &str) -> PathBuf {
    let mut segments: Vec<&str> = pattern.split('/').collect();
    segments.pop();

    let mut base = PathBuf::new();
    for segment in segments {
        if segment.is_empty() || segment == "." || segment == ".." || has_wildcard(segment) {
            break;
        }
        base.push(segment);
    }
    base
}

/// How deep below `literal_base` a match can sit, or `None` when `**` or an
/// alternation makes the depth unbounded.
pub fn walk_depth(pattern: &str) -> Option<usize> {
    if pattern.contains("**") || pattern.contains('{') {
        return None;
    }
    let segments = pattern.split('/').count();
    Some(segments - literal_base(pattern).components().count())
}

/// All regular files under `root` whose root-relative path matches `pattern`.
pub fn expand(root: &Path, pattern: &GlobMatcher) -> Vec<PathBuf> {
    let glob = pattern.glob().glob();
    let start = root.join(literal_base(glob));
    let mut walker = WalkDir::new(&start).follow_links(false);
    if let Some(depth) = walk_depth(glob) {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                continue;
            }
        };

        let path = entry.path();
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        if rel == Path::new("") {
            continue;
        }

        let s_rel = rel.to_string_lossy().replace('\\', "/");
        if !pattern.is_match(&s_rel) {
            continue;
        }

        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => files.push(path.to_path_buf()),
            Ok(_) => {}
            Err(err) => debug!("cannot stat {}: {err}", path.display()),
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("top.txt"), "a\n").unwrap();
        fs::write(dir.path().join("notes.log"), "a\n").unwrap();
        fs::create_dir_all(dir.path().join("sub/deep")).unwrap();
        fs::write(dir.path().join("sub/mid.txt"), "a\n").unwrap();
        fs::write(dir.path().join("sub/deep/low.txt"), "a\n").unwrap();
        dir
    }

    fn names(root: &Path, pattern: &str) -> Vec<String> {
        let pat = compile(pattern).unwrap();
        let mut found: Vec<String> = expand(root, &pat)
            .into_iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        found.sort();
        found
    }

    #[test]
    fn recursive_wildcard_includes_root_level() {
        let dir = tree();
        assert_eq!(
            names(dir.path(), "**/*.txt"),
            vec!["sub/deep/low.txt", "sub/mid.txt", "top.txt"]
        );
    }

    #[test]
    fn single_star_stays_in_one_segment() {
        let dir = tree();
        assert_eq!(names(dir.path(), "*.txt"), vec!["top.txt"]);
        assert_eq!(names(dir.path(), "sub/*.txt"), vec!["sub/mid.txt"]);
    }

    #[test]
    fn directories_are_not_returned() {
        let dir = tree();
        assert_eq!(
            names(dir.path(), "**"),
            vec![
                "notes.log",
                "sub/deep/low.txt",
                "sub/mid.txt",
                "top.txt"
            ]
        );
    }

    #[test]
    fn patterns_cannot_leave_root() {
        let dir = tree();
        let inner = dir.path().join("sub");
        assert!(names(&inner, "../*.txt").is_empty());
        assert!(names(&inner, "/*.txt").is_empty());
    }

    #[test]
    fn missing_base_matches_nothing() {
        let dir = tree();
        assert!(names(dir.path(), "nope/**/*.txt").is_empty());
    }

    #[test]
    fn brace_alternation() {
        let dir = tree();
        assert_eq!(
            names(dir.path(), "**/*.{txt,log}"),
            vec!["notes.log", "sub/deep/low.txt", "sub/mid.txt", "top.txt"]
        );
        assert_eq!(names(dir.path(), "{sub,nope}/*.txt"), vec!["sub/mid.txt"]);
    }

    #[test]
    fn double_star_inside_segment_acts_as_star() {
        let dir = tree();
        assert_eq!(names(dir.path(), "top**"), vec!["top.txt"]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        match compile("[abc") {
            Err(LocError::Pattern { pattern, .. }) => assert_eq!(pattern, "[abc"),
            other => panic!("expected pattern error, got {other:?}"),
        }
    }

    #[test]
    fn root_must_be_existing_directory() {
        let dir = tree();
        assert!(resolve_root(dir.path()).unwrap().is_absolute());
        assert!(matches!(
            resolve_root(&dir.path().join("missing")),
            Err(LocError::PathResolution { .. })
        ));
        assert!(matches!(
            resolve_root(&dir.path().join("top.txt")),
            Err(LocError::PathResolution { .. })
        ));
    }

    #[test]
    fn literal_prefix() {
        assert_eq!(literal_base("src/**/*.rs"), PathBuf::from("src"));
        assert_eq!(literal_base("a/b/c*.rs"), PathBuf::from("a/b"));
        assert_eq!(literal_base("**/*.rs"), PathBuf::new());
        assert_eq!(literal_base("main.rs"), PathBuf::new());
        assert_eq!(literal_base("../x/*.rs"), PathBuf::new());
        assert_eq!(literal_base("/abs/*.rs"), PathBuf::new());
        assert_eq!(literal_base("{a,b}/*.rs"), PathBuf::new());
    }

    #[test]
    fn depth_limit_without_recursive_wildcard() {
        assert_eq!(walk_depth("*.rs"), Some(1));
        assert_eq!(walk_depth("sub/*.txt"), Some(1));
        assert_eq!(walk_depth("src/*/mod.rs"), Some(2));
        assert_eq!(walk_depth("src/**/*.rs"), None);
        assert_eq!(walk_depth("*.{rs,ts}"), None);
    }
}
