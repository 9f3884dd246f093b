use std::path::Path;

/// Rewrite Windows separators so paths are usable in the generated shell scripts.
pub fn force_slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Parent directory of a file path, or "." when it has none.
pub fn parent_dir(path: &str) -> String {
    match Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    }
}
