#![forbid(unsafe_code)]

use super::expand::split_segments;

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Part {
    Literal(Box<str>),
    Star,
    DoubleStar,
    PosSet(HashSet<Box<str>>),
    NegSet(HashSet<Box<str>>),
}

#[derive(Debug)]
pub(super) struct Route<H> {
    parts: Vec<Part>,
    handler: H,
    pattern: Box<str>,
    has_double_star: bool,
}

#[derive(Debug)]
struct SizeGroup {
    size: usize,
    has_double_star: bool,
    literal_first: HashMap<Box<str>, Vec<usize>>,
    non_literal: Vec<usize>,
}

#[derive(Debug)]
pub(super) struct WildcardIndex<H> {
    separator: char,
    routes: Vec<Route<H>>,
    // Derived state; reset by every mutation, rebuilt on first lookup.
    // OnceLock keeps concurrent read-only lookups safe.
    groups: OnceLock<Vec<SizeGroup>>,
}

impl<H> WildcardIndex<H> {
    pub(super) fn new(separator: char) -> Self {
        Self {
            separator,
            routes: Vec::new(),
            groups: OnceLock::new(),
        }
    }

    pub(super) fn find(&self, input: &str) -> Option<&H> {
        let id = self.position(input)?;
        Some(&self.routes[id].handler)
    }

    pub(super) fn handler_mut(&mut self, id: usize) -> &mut H {
        &mut self.routes[id].handler
    }

    pub(super) fn position(&self, input: &str) -> Option<usize> {
        let path = split_segments(input, self.separator);
        let groups = self.groups.get_or_init(|| self.build_groups());
        let first = path.first().copied().unwrap_or("");

        for group in groups {
            if group.size > path.len() && !group.has_double_star {
                continue;
            }
            if let Some(candidates) = group.literal_first.get(first) {
                if let Some(id) = self.scan(candidates, &path) {
                    return Some(id);
                }
            }
            if let Some(id) = self.scan(&group.non_literal, &path) {
                return Some(id);
            }
        }
        None
    }

    fn scan(&self, candidates: &[usize], path: &[&str]) -> Option<usize> {
        for &id in candidates {
            let route = &self.routes[id];
            if route.parts.len() > path.len() && !route.has_double_star {
                continue;
            }
            if match_route(route, path) {
                return Some(id);
            }
        }
        None
    }

    pub(super) fn remove(&mut self, pattern: &str) {
        self.groups.take();
        self.routes.retain(|route| &*route.pattern != pattern);
    }

    pub(super) fn clear(&mut self) {
        self.groups.take();
        self.routes.clear();
    }

    fn build_groups(&self) -> Vec<SizeGroup> {
        let mut groups: Vec<SizeGroup> = Vec::new();
        let mut by_size: HashMap<usize, usize> = HashMap::new();

        for (id, route) in self.routes.iter().enumerate() {
            let size = route.parts.len();
            let slot = *by_size.entry(size).or_insert_with(|| {
                groups.push(SizeGroup {
                    size,
                    has_double_star: false,
                    literal_first: HashMap::new(),
                    non_literal: Vec::new(),
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            if route.has_double_star {
                group.has_double_star = true;
            }
            match route.parts.first() {
                Some(Part::Literal(literal)) => {
                    group.literal_first.entry(literal.clone()).or_default().push(id);
                }
                _ => group.non_literal.push(id),
            }
        }

        groups.sort_by(|a, b| b.size.cmp(&a.size));
        groups
    }
}

impl<H: PartialEq> WildcardIndex<H> {
    pub(super) fn add(&mut self, pattern: &str, handler: H) {
        self.groups.take();

        let parts = compile_parts(pattern, self.separator);

        // A pattern differing from an existing same-handler route in a
        // single literal position collapses into that route as a PosSet.
        for existing in &mut self.routes {
            if existing.handler != handler || existing.parts.len() != parts.len() {
                continue;
            }

            let mut diff = None;
            let mut can_merge = true;
            for (i, (old, new)) in existing.parts.iter().zip(&parts).enumerate() {
                if old == new {
                    continue;
                }
                let mergeable = matches!(
                    (old, new),
                    (Part::PosSet(_), Part::Literal(_)) | (Part::Literal(_), Part::Literal(_))
                );
                if !mergeable || diff.is_some() {
                    can_merge = false;
                    break;
                }
                diff = Some(i);
            }

            if can_merge {
                if let Some(i) = diff {
                    let slot = &mut existing.parts[i];
                    match (&mut *slot, &parts[i]) {
                        (Part::PosSet(set), Part::Literal(literal)) => {
                            set.insert(literal.clone());
                        }
                        (Part::Literal(old), Part::Literal(new)) => {
                            let mut set = HashSet::new();
                            set.insert(old.clone());
                            set.insert(new.clone());
                            *slot = Part::PosSet(set);
                        }
                        _ => unreachable!(),
                    }
                    return;
                }
            }
        }

        let has_double_star = parts.iter().any(|part| matches!(part, Part::DoubleStar));
        self.routes.push(Route {
            parts,
            handler,
            pattern: pattern.into(),
            has_double_star,
        });

        // Stable sort: ties keep insertion order.
        self.routes.sort_by(|a, b| b.parts.len().cmp(&a.parts.len()));
    }
}

fn compile_parts(pattern: &str, separator: char) -> Vec<Part> {
    split_segments(pattern, separator)
        .iter()
        .map(|&segment| {
            if segment == "**" {
                Part::DoubleStar
            } else if segment == "*" {
                Part::Star
            } else if segment.len() > 3 && segment.starts_with("!{") && segment.ends_with('}') {
                let mut set = HashSet::new();
                for value in segment[2..segment.len() - 1].split(',') {
                    let value = value.trim();
                    if !value.is_empty() {
                        set.insert(Box::from(value));
                    }
                }
                Part::NegSet(set)
            } else {
                Part::Literal(segment.into())
            }
        })
        .collect()
}

fn match_route<H>(route: &Route<H>, path: &[&str]) -> bool {
    let parts = &route.parts;

    if let [only] = parts.as_slice() {
        return match only {
            Part::DoubleStar => true,
            Part::Star => path.len() == 1 && !path[0].is_empty(),
            Part::Literal(literal) => path.len() == 1 && path[0] == &**literal,
            Part::PosSet(set) => path.len() == 1 && set.contains(path[0]),
            Part::NegSet(set) => path.len() == 1 && !path[0].is_empty() && !set.contains(path[0]),
        };
    }

    let mut pi = 0;
    let mut si = 0;
    // Pending DoubleStar anchor: (part index, next segment to retry from).
    let mut star: Option<(usize, usize)> = None;

    while si < path.len() {
        let segment = path[si];
        match parts.get(pi) {
            Some(Part::DoubleStar) => {
                star = Some((pi, si));
                pi += 1;
            }
            Some(Part::Star) => {
                if segment.is_empty() {
                    return false;
                }
                pi += 1;
                si += 1;
            }
            Some(Part::PosSet(set)) => {
                if segment.is_empty() || !set.contains(segment) {
                    return false;
                }
                pi += 1;
                si += 1;
            }
            Some(Part::NegSet(set)) => {
                if segment.is_empty() || set.contains(segment) {
                    return false;
                }
                pi += 1;
                si += 1;
            }
            Some(Part::Literal(literal)) if segment == &**literal => {
                pi += 1;
                si += 1;
            }
            _ => match star {
                Some((anchor, from)) => {
                    pi = anchor + 1;
                    star = Some((anchor, from + 1));
                    si = from + 1;
                }
                None => return false,
            },
        }
    }

    while matches!(parts.get(pi), Some(Part::DoubleStar)) {
        pi += 1;
    }
    pi == parts.len() && si == path.len()
}
