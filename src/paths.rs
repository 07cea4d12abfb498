/// Normalize a file path for lock comparison: platform-neutral separators
/// (backslashes become forward slashes), lexical resolution of `.`/`..`
/// segments, duplicate separators collapsed. Applied identically on write
/// and on lookup so the same logical path always compares equal.
///
/// Case is preserved; case-folding would invent conflicts on
/// case-sensitive filesystems.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut components: Vec<&str> = Vec::new();
    for component in unified.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            c => components.push(c),
        }
    }
    components.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslashes_unify_with_forward_slashes() {
        assert_eq!(normalize(r"a\b.py"), "a/b.py");
        assert_eq!(normalize("a/b.py"), normalize(r"a\b.py"));
        assert_eq!(normalize(r"src\store\lock.rs"), "src/store/lock.rs");
    }

    #[test]
    fn dot_segments_resolve_lexically() {
        assert_eq!(normalize("src/./lib.rs"), "src/lib.rs");
        assert_eq!(normalize("src/../src/lib.rs"), "src/lib.rs");
        assert_eq!(normalize("./src/app.py"), "src/app.py");
    }

    #[test]
    fn duplicate_separators_collapse() {
        assert_eq!(normalize("src//lib.rs"), "src/lib.rs");
        assert_eq!(normalize(r"src\\lib.rs"), "src/lib.rs");
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("."), "");
        assert_eq!(normalize("a/b/c"), "a/b/c");
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(normalize("Src/App.py"), "Src/App.py");
    }
}
