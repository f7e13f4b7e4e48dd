//! Go naming helpers shared by rendering and manifest validation.

/// Go reserved keywords.
/// Source: https://go.dev/ref/spec#Keywords
pub const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Check if a name is a Go reserved keyword.
pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Guess the package name an import path is referred to by.
///
/// Takes the last path segment, skipping a trailing `/vN` major-version
/// segment, then drops `.vN` suffixes (`gopkg.in/yaml.v3`), `go-` prefixes and
/// `-go` suffixes, lowercases, keeps only ASCII alphanumerics and strips
/// leading digits. Falls back to `pkg` when nothing usable is left.
pub fn package_alias(path: &str) -> String {
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let mut last = segments.next().unwrap_or_default();
    if is_major_version(last) {
        if let Some(prev) = segments.next() {
            last = prev;
        }
    }

    if let Some((base, version)) = last.rsplit_once('.') {
        if is_major_version(version) {
            last = base;
        }
    }
    let last = last.strip_prefix("go-").unwrap_or(last);
    let last = last.strip_suffix("-go").unwrap_or(last);

    let alias: String = last
        .to_ascii_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .skip_while(char::is_ascii_digit)
        .collect();

    if alias.is_empty() {
        "pkg".to_string()
    } else if is_go_keyword(&alias) {
        format!("{}pkg", alias)
    } else {
        alias
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdlib_paths() {
        assert_eq!(package_alias("context"), "context");
        assert_eq!(package_alias("net/http"), "http");
        assert_eq!(package_alias("encoding/json"), "json");
    }

    #[test]
    fn test_module_major_version() {
        assert_eq!(package_alias("github.com/jackc/pgx/v5"), "pgx");
        assert_eq!(package_alias("gopkg.in/yaml.v3"), "yaml");
    }

    #[test]
    fn test_go_affixes() {
        assert_eq!(package_alias("github.com/mattn/go-sqlite3"), "sqlite3");
        assert_eq!(package_alias("github.com/aws/aws-sdk-go"), "awssdk");
    }

    #[test]
    fn test_non_identifier_characters() {
        assert_eq!(package_alias("example.com/My.Pkg"), "mypkg");
        assert_eq!(package_alias("example.com/2fa"), "fa");
        assert_eq!(package_alias("example.com/123"), "pkg");
        assert_eq!(package_alias("example.com/store/"), "store");
    }

    #[test]
    fn test_keyword_alias() {
        assert_eq!(package_alias("example.com/type"), "typepkg");
    }

    #[test]
    fn test_is_go_keyword() {
        assert!(is_go_keyword("func"));
        assert!(is_go_keyword("interface"));
        assert!(!is_go_keyword("string"));
        assert!(!is_go_keyword("Func"));
    }
}
