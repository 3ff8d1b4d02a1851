//! Environment-token expansion for root paths.
//!
//! Paths handed to the tree builder may contain `%NAME%` tokens that refer
//! to process environment variables. Expansion is best-effort: an
//! unterminated token, an empty token, or an unset/empty variable stops
//! the loop and the current result is returned as-is.

/// Delimiter for environment tokens in paths.
const TOKEN_MARKER: char = '%';

/// Expand `%NAME%` tokens in `path` using process environment variables.
///
/// Unresolvable tokens are left in place and never raise an error.
pub fn expand_env_tokens(path: &str) -> String {
    let mut result = path.to_string();
    loop {
        let Some(token) = extract_delimited(&result, TOKEN_MARKER) else {
            return result;
        };
        if token.is_empty() {
            return result;
        }
        let value = match std::env::var(&token) {
            Ok(v) if !v.is_empty() => v,
            _ => return result,
        };
        let replaced = result.replace(&format!("{TOKEN_MARKER}{token}{TOKEN_MARKER}"), &value);
        if replaced == result {
            return result;
        }
        result = replaced;
    }
}

/// Extract the substring between the first pair of `marker` characters.
/// Returns `None` when no complete pair exists.
fn extract_delimited(s: &str, marker: char) -> Option<String> {
    let start = s.find(marker)?;
    let rest = &s[start + marker.len_utf8()..];
    let end = rest.find(marker)?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_set_variable() {
        std::env::set_var("SIDETREE_TEST_BASE", "/opt/projects");
        assert_eq!(
            expand_env_tokens("%SIDETREE_TEST_BASE%/src"),
            "/opt/projects/src"
        );
    }

    #[test]
    fn expands_multiple_tokens() {
        std::env::set_var("SIDETREE_TEST_A", "/alpha");
        std::env::set_var("SIDETREE_TEST_B", "beta");
        assert_eq!(
            expand_env_tokens("%SIDETREE_TEST_A%/%SIDETREE_TEST_B%"),
            "/alpha/beta"
        );
    }

    #[test]
    fn unset_variable_returns_input_unchanged() {
        std::env::remove_var("SIDETREE_TEST_MISSING");
        assert_eq!(
            expand_env_tokens("%SIDETREE_TEST_MISSING%/x"),
            "%SIDETREE_TEST_MISSING%/x"
        );
    }

    #[test]
    fn unterminated_token_is_left_alone() {
        assert_eq!(expand_env_tokens("/home/user/50%done"), "/home/user/50%done");
    }

    #[test]
    fn empty_token_stops_expansion() {
        assert_eq!(expand_env_tokens("/a/%%/b"), "/a/%%/b");
    }

    #[test]
    fn no_tokens_passes_through() {
        assert_eq!(expand_env_tokens("/plain/path"), "/plain/path");
        assert_eq!(expand_env_tokens(""), "");
    }

    #[test]
    fn empty_variable_value_stops_expansion() {
        std::env::set_var("SIDETREE_TEST_EMPTY", "");
        assert_eq!(
            expand_env_tokens("%SIDETREE_TEST_EMPTY%/x"),
            "%SIDETREE_TEST_EMPTY%/x"
        );
    }

    #[test]
    fn extract_delimited_basic() {
        assert_eq!(extract_delimited("%TEMP%\\x", '%'), Some("TEMP".to_string()));
        assert_eq!(extract_delimited("no markers", '%'), None);
        assert_eq!(extract_delimited("one % only", '%'), None);
    }
}
