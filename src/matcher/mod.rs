mod error;
mod expand;
mod imp;
mod simple;
mod wildcard;

pub use self::error::PatternError;

use self::simple::SimpleIndex;
use self::wildcard::WildcardIndex;
use crate::strmap::StrMap;

use std::fmt;

/// Combines the handler already stored at a pattern with an incoming one.
pub type MergeFn<H> = Box<dyn Fn(&H, &H) -> H + Send + Sync>;

pub struct MatcherOptions<H> {
    /// Route wildcard patterns to the separator-agnostic glob index instead
    /// of the segment-aware one.
    pub simple_matcher: bool,
    /// Merge colliding exact-pattern handlers through `merge_fn` instead of
    /// overwriting.
    pub merge_handlers: bool,
    pub merge_fn: Option<MergeFn<H>>,
}

impl<H> Default for MatcherOptions<H> {
    fn default() -> Self {
        Self {
            simple_matcher: false,
            merge_handlers: false,
            merge_fn: None,
        }
    }
}

impl<H> fmt::Debug for MatcherOptions<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherOptions")
            .field("simple_matcher", &self.simple_matcher)
            .field("merge_handlers", &self.merge_handlers)
            .field("merge_fn", &self.merge_fn.as_ref().map(|_| ".."))
            .finish()
    }
}

#[derive(Debug)]
pub struct Matcher<H> {
    separator: char,
    options: MatcherOptions<H>,
    exact: StrMap<H>,
    wildcards: WildcardIndex<H>,
    simple: SimpleIndex<H>,
    fallback: Option<H>,
}
