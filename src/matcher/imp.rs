#![forbid(unsafe_code)]

use super::error::PatternError;
use super::expand::{expand_pattern, has_wildcard};
use super::simple::SimpleIndex;
use super::wildcard::WildcardIndex;
use super::{Matcher, MatcherOptions};
use crate::strmap::StrMap;

use tracing::debug;

impl<H> Matcher<H> {
    /// A matcher over `/`-separated paths.
    pub fn path() -> Self {
        Self::with_separator('/', MatcherOptions::default())
    }

    /// A matcher over `.`-separated domain names.
    pub fn domain() -> Self {
        Self::with_separator('.', MatcherOptions::default())
    }

    pub fn path_with(options: MatcherOptions<H>) -> Self {
        Self::with_separator('/', options)
    }

    pub fn domain_with(options: MatcherOptions<H>) -> Self {
        Self::with_separator('.', options)
    }

    pub fn with_separator(separator: char, options: MatcherOptions<H>) -> Self {
        Self {
            separator,
            options,
            exact: StrMap::new(),
            wildcards: WildcardIndex::new(separator),
            simple: SimpleIndex::new(),
            fallback: None,
        }
    }

    pub fn clear(&mut self) {
        self.exact.clear();
        self.wildcards.clear();
        self.simple.clear();
        self.fallback = None;
    }

    /// Returns the handler of the best-matching pattern: exact matches win,
    /// then the configured wildcard index, then the fallback. The reference
    /// is valid until the next mutation.
    pub fn find(&self, input: &str) -> Option<&H> {
        if let Some(handler) = self.exact.find(input) {
            return Some(handler);
        }
        let handler = if self.options.simple_matcher {
            self.simple.find(input)
        } else {
            self.wildcards.find(input)
        };
        handler.or(self.fallback.as_ref())
    }

    pub fn find_mut(&mut self, input: &str) -> Option<&mut H> {
        if self.exact.find(input).is_some() {
            return self.exact.find_mut(input);
        }
        if self.options.simple_matcher {
            if let Some(id) = self.simple.position(input) {
                return Some(self.simple.handler_mut(id));
            }
        } else if let Some(id) = self.wildcards.position(input) {
            return Some(self.wildcards.handler_mut(id));
        }
        self.fallback.as_mut()
    }

    /// Removes every concrete pattern `pattern` expands to. Removing an
    /// absent pattern is a no-op; the fallback survives (see [`clear`]).
    ///
    /// [`clear`]: Matcher::clear
    pub fn remove(&mut self, pattern: &str) -> &mut Self {
        if let Err(e) = self.remove_pattern(pattern) {
            panic!("{}", e);
        }
        self
    }

    pub fn try_remove(&mut self, pattern: &str) -> Result<&mut Self, PatternError> {
        self.remove_pattern(pattern)?;
        Ok(self)
    }

    fn remove_pattern(&mut self, pattern: &str) -> Result<(), PatternError> {
        let mut expanded = Vec::new();
        expand_pattern(pattern, self.separator, &mut expanded)?;

        for concrete in &expanded {
            self.exact.remove(concrete);
            if self.options.simple_matcher {
                self.simple.remove(concrete);
            } else {
                self.wildcards.remove(concrete);
            }
        }
        Ok(())
    }
}

impl<H: Clone + PartialEq> Matcher<H> {
    /// Registers `handler` under `pattern`.
    ///
    /// `*` and `**` install the fallback, an empty pattern is a no-op, and
    /// anything else is brace-expanded and indexed.
    ///
    /// # Panics
    ///
    /// Panics on an unmatched `{`; use [`try_add`](Matcher::try_add) to
    /// handle the error instead.
    pub fn add(&mut self, pattern: &str, handler: H) -> &mut Self {
        if let Err(e) = self.add_pattern(pattern, handler) {
            panic!("{}", e);
        }
        self
    }

    pub fn try_add(&mut self, pattern: &str, handler: H) -> Result<&mut Self, PatternError> {
        self.add_pattern(pattern, handler)?;
        Ok(self)
    }

    pub fn add_all(&mut self, patterns: &[&str], handler: H) -> &mut Self {
        for pattern in patterns {
            self.add(pattern, handler.clone());
        }
        self
    }

    /// Patterns already inserted before a malformed one stay registered.
    pub fn try_add_all(
        &mut self,
        patterns: &[&str],
        handler: H,
    ) -> Result<&mut Self, PatternError> {
        for pattern in patterns {
            self.add_pattern(pattern, handler.clone())?;
        }
        Ok(self)
    }

    fn add_pattern(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        let pattern = pattern.strip_suffix('.').unwrap_or(pattern);

        if pattern == "*" || pattern == "**" {
            self.fallback = Some(handler);
            return Ok(());
        }
        if pattern.is_empty() {
            return Ok(());
        }

        let mut expanded = Vec::new();
        expand_pattern(pattern, self.separator, &mut expanded)?;

        for concrete in &expanded {
            if has_wildcard(concrete) {
                if self.options.simple_matcher {
                    self.simple.add(concrete, handler.clone());
                } else {
                    self.wildcards.add(concrete, handler.clone());
                }
                continue;
            }

            if let Some(existing) = self.exact.find_mut(concrete) {
                if *existing != handler {
                    if self.options.merge_handlers {
                        if let Some(merge) = &self.options.merge_fn {
                            let merged = merge(existing, &handler);
                            *existing = merged;
                            continue;
                        }
                        debug!(pattern = %concrete, "merge requested without merge_fn, overwriting");
                    }
                }
                *existing = handler.clone();
                continue;
            }
            self.exact.insert(concrete, handler.clone());
        }
        Ok(())
    }
}

impl<H> Default for Matcher<H> {
    fn default() -> Self {
        Self::path()
    }
}
