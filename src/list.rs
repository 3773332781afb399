//! Semicolon-delimited property lists and CMake path spelling.

/// Prefix of MSBuild item metadata references such as
/// `%(AdditionalIncludeDirectories)`, which inherit the parent value and have
/// nothing concrete to translate.
pub const INHERIT_PREFIX: &str = "%(";

/// Split a property value on `;`, dropping empty entries and `%(...)`
/// inheritance placeholders.  Order is preserved.
pub fn parse_list(text: &str) -> impl Iterator<Item = &str> {
    text.trim()
        .split(';')
        .filter(|item| !item.is_empty() && !item.starts_with(INHERIT_PREFIX))
}

/// Rewrite a Windows path for CMake, which wants forward slashes.
pub fn to_cmake_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_dropped_anywhere() {
        let items: Vec<_> = parse_list("A;B;%(C);D").collect();
        assert_eq!(items, ["A", "B", "D"]);

        let items: Vec<_> = parse_list("%(PreprocessorDefinitions);X").collect();
        assert_eq!(items, ["X"]);
    }

    #[test]
    fn surrounding_whitespace_and_empty_items_ignored() {
        let items: Vec<_> = parse_list("\n  A;;B;\n").collect();
        assert_eq!(items, ["A", "B"]);
        assert_eq!(parse_list("").count(), 0);
    }

    #[test]
    fn cmake_path_normalization() {
        assert_eq!(to_cmake_path("a\\b\\c"), "a/b/c");
        assert_eq!(to_cmake_path("a/b/c"), "a/b/c");
        assert_eq!(to_cmake_path(&to_cmake_path("x\\y")), "x/y");
    }
}
