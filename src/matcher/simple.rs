#![forbid(unsafe_code)]

#[derive(Debug)]
struct Compiled<H> {
    parts: Vec<Box<str>>,
    handler: H,
    pattern: Box<str>,
    has_prefix: bool,
    has_suffix: bool,
    non_empty: usize,
}

/// Glob index that ignores segment boundaries: `*` matches any substring,
/// separators included. Routes are tried in insertion order.
#[derive(Debug)]
pub(super) struct SimpleIndex<H> {
    routes: Vec<Compiled<H>>,
}

impl<H> SimpleIndex<H> {
    pub(super) fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub(super) fn add(&mut self, pattern: &str, handler: H) {
        let parts: Vec<Box<str>> = pattern.split('*').map(Box::from).collect();
        let has_prefix = parts.first().is_some_and(|part| !part.is_empty());
        let has_suffix = parts.last().is_some_and(|part| !part.is_empty());
        let non_empty = parts.iter().filter(|part| !part.is_empty()).count();

        self.routes.push(Compiled {
            parts,
            handler,
            pattern: pattern.into(),
            has_prefix,
            has_suffix,
            non_empty,
        });
    }

    pub(super) fn find(&self, input: &str) -> Option<&H> {
        let id = self.position(input)?;
        Some(&self.routes[id].handler)
    }

    pub(super) fn handler_mut(&mut self, id: usize) -> &mut H {
        &mut self.routes[id].handler
    }

    pub(super) fn position(&self, input: &str) -> Option<usize> {
        'routes: for (id, route) in self.routes.iter().enumerate() {
            if route.has_prefix && !input.starts_with(&*route.parts[0]) {
                continue;
            }
            if route.has_suffix {
                let last = route.parts.last().map(|part| &**part).unwrap_or("");
                if !input.ends_with(last) {
                    continue;
                }
            }

            if route.non_empty <= 2 {
                return Some(id);
            }

            let mut pos = if route.has_prefix {
                route.parts[0].len()
            } else {
                0
            };
            for fragment in &route.parts[1..route.parts.len() - 1] {
                if fragment.is_empty() {
                    continue;
                }
                match input[pos..].find(&**fragment) {
                    Some(at) => pos += at + fragment.len(),
                    None => continue 'routes,
                }
            }
            return Some(id);
        }
        None
    }

    pub(super) fn remove(&mut self, pattern: &str) {
        self.routes.retain(|route| &*route.pattern != pattern);
    }

    pub(super) fn clear(&mut self) {
        self.routes.clear();
    }
}
