//! Filesystem-safe string cleanup for resolved variable values.

/// Characters that break paths on at least one major platform.
pub const BAD_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make `value` safe to use inside a path component.
///
/// Spaces become `_`, [`BAD_CHARS`] are dropped, leading and trailing `.`/space are
/// trimmed and runs of `_` collapse to one. Idempotent.
pub fn sanitize(value: &str) -> String {
    let replaced: String = value
        .chars()
        .filter(|c| !BAD_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    let trimmed = replaced.trim_matches(|c| c == '.' || c == ' ');

    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spaces_and_bad_chars() {
        assert_eq!(sanitize("My Scene: Take 2?"), "My_Scene_Take_2");
        assert_eq!(sanitize(r#"a<b>c"d/e\f|g*h"#), "abcdefgh");
    }

    #[test]
    fn test_trims_dots_and_spaces() {
        assert_eq!(sanitize("..hidden.."), "hidden");
        assert_eq!(sanitize("  padded  "), "_padded_");
        assert_eq!(sanitize("v1.2"), "v1.2");
    }

    #[test]
    fn test_collapses_underscores() {
        assert_eq!(sanitize("a___b"), "a_b");
        assert_eq!(sanitize("a _ b"), "a_b");
    }

    #[test]
    fn test_only_bad_chars() {
        assert_eq!(sanitize(r#"<>:"/\|?*"#), "");
        assert_eq!(sanitize("..."), "");
    }

    #[test]
    fn test_bad_chars_between_dots() {
        // Trimming happens after removal, so exposed dots are still trimmed.
        assert_eq!(sanitize(".?.a.?."), "a");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(input in ".*") {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn sanitize_removes_bad_chars(input in r#"[<>:"/\\|?* ._a-zA-Z]*"#) {
            let out = sanitize(&input);
            prop_assert!(!out.contains(BAD_CHARS));
            prop_assert!(!out.contains(' '));
            prop_assert!(!out.contains("__"));
            prop_assert!(!out.starts_with('.') && !out.ends_with('.'));
        }
    }
}
