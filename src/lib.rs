//! Wildcard pattern router for paths and domains.
//!
//! Patterns are segmented strings: paths split on `/`, domain names split
//! on `.`. A segment is either a literal, `*` (exactly one non-empty
//! segment), `**` (zero or more segments) or `!{a,b}` (one non-empty
//! segment other than `a` or `b`). Brace groups expand at insertion time,
//! so `/user/{a,b}` behaves like `/user/a` plus `/user/b`, and an empty
//! alternative makes a segment optional: `/opt/{,c}` matches `/opt` and
//! `/opt/c`. Inserting `*` or `**` alone installs a global fallback.
//!
//! ```
//! use wildroute::Matcher;
//!
//! let mut matcher: Matcher<u32> = Matcher::path();
//! matcher.add("/api/special", 1).add("/api/**", 2);
//!
//! assert_eq!(matcher.find("/api/special"), Some(&1));
//! assert_eq!(matcher.find("/api/other/deep"), Some(&2));
//! assert_eq!(matcher.find("/other"), None);
//! ```

mod strmap;

pub mod matcher;
pub use self::matcher::{Matcher, MatcherOptions, MergeFn, PatternError};
