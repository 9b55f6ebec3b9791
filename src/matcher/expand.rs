#![forbid(unsafe_code)]

use super::error::PatternError;

use smallvec::SmallVec;

/// Expands every `{a,b,..}` group in `pattern`, depth-first and in
/// left-to-right alternative order, appending the concrete patterns to
/// `out`. `!{` never opens a group; it is the negative-set syntax handled
/// at the segment level. A single trailing separator is stripped from each
/// emitted pattern.
pub(super) fn expand_pattern(
    pattern: &str,
    separator: char,
    out: &mut Vec<String>,
) -> Result<(), PatternError> {
    let bytes = pattern.as_bytes();

    let mut search_from = 0;
    while let Some(offset) = pattern[search_from..].find('{') {
        let group = search_from + offset;
        if group > 0 && bytes[group - 1] == b'!' {
            search_from = group + 1;
            continue;
        }

        let end = match pattern[group..].find('}') {
            Some(offset) => group + offset,
            None => return Err(PatternError::unmatched_group(pattern)),
        };

        let head = &pattern[..group];
        let tail = &pattern[end + 1..];

        for value in pattern[group + 1..end].split(',') {
            let value = value.trim();

            // An empty alternative swallows a following `.` literal, so
            // `/opt/{,c}` yields `/opt` rather than `/opt/.`.
            let tail = if value.is_empty() && tail.starts_with('.') {
                &tail[1..]
            } else {
                tail
            };

            let mut next = String::with_capacity(head.len() + value.len() + tail.len());
            next.push_str(head);
            next.push_str(value);
            next.push_str(tail);
            expand_pattern(&next, separator, out)?;
        }
        return Ok(());
    }

    let concrete = pattern.strip_suffix(separator).unwrap_or(pattern);
    out.push(concrete.to_owned());
    Ok(())
}

/// Splits on `separator` so that a missing leading separator compiles the
/// same as a present one: both `abc` and `/abc` become `["", "abc"]`.
pub(super) fn split_segments(input: &str, separator: char) -> SmallVec<[&str; 8]> {
    let mut parts: SmallVec<[&str; 8]> = SmallVec::new();
    if input.is_empty() {
        parts.push("");
        return parts;
    }
    if !input.starts_with(separator) {
        parts.push("");
    }
    parts.extend(input.split(separator));
    parts
}

pub(super) fn has_wildcard(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains("!{")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(pattern: &str, separator: char) -> Vec<String> {
        let mut out = Vec::new();
        expand_pattern(pattern, separator, &mut out).unwrap();
        out
    }

    #[test]
    fn expands_alternatives_in_order() {
        assert_eq!(expand("/user/{a,b,c}", '/'), ["/user/a", "/user/b", "/user/c"]);
        assert_eq!(expand("/{x,y}/{1,2}", '/'), ["/x/1", "/x/2", "/y/1", "/y/2"]);
    }

    #[test]
    fn empty_alternative_eats_dot() {
        assert_eq!(expand("{,www}.example.com", '.'), ["example.com", "www.example.com"]);
        assert_eq!(expand("/opt/{,c}", '/'), ["/opt", "/opt/c"]);
    }

    #[test]
    fn trailing_strip_follows_the_separator() {
        // An empty alternative at the end leaves a trailing separator; the
        // base case strips it for whichever separator the matcher uses.
        assert_eq!(expand("example.{com,}", '.'), ["example.com", "example"]);
        assert_eq!(expand("/opt/{c,}", '/'), ["/opt/c", "/opt"]);
        // Only the matcher's own separator is stripped.
        assert_eq!(expand("example.com.", '/'), ["example.com."]);
    }

    #[test]
    fn trims_alternatives_and_trailing_separator() {
        assert_eq!(expand("/user/{ a , b }", '/'), ["/user/a", "/user/b"]);
        assert_eq!(expand("/user/", '/'), ["/user"]);
    }

    #[test]
    fn neg_set_is_not_a_group() {
        assert_eq!(expand("/!{a,b}", '/'), ["/!{a,b}"]);
        assert_eq!(expand("/!{a,b}/{c,d}", '/'), ["/!{a,b}/c", "/!{a,b}/d"]);
    }

    #[test]
    fn unmatched_group_errors() {
        let mut out = Vec::new();
        let err = expand_pattern("/user/{a,b", '/', &mut out).unwrap_err();
        assert_eq!(err.pattern(), "/user/{a,b");

        // A stray `}` with no opener is a literal.
        assert_eq!(expand("/a}b", '/'), ["/a}b"]);
    }

    #[test]
    fn splits_with_synthetic_leading_segment() {
        assert_eq!(&split_segments("/abc", '/')[..], ["", "abc"]);
        assert_eq!(&split_segments("abc", '/')[..], ["", "abc"]);
        assert_eq!(&split_segments("a.b.c", '.')[..], ["", "a", "b", "c"]);
        assert_eq!(&split_segments("/a//b", '/')[..], ["", "a", "", "b"]);
        assert_eq!(&split_segments("/user/", '/')[..], ["", "user", ""]);
        assert_eq!(&split_segments("/", '/')[..], ["", ""]);
        assert_eq!(&split_segments("", '/')[..], [""]);
    }
}
