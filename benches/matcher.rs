use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wildroute::{Matcher, MatcherOptions};

fn build() -> Matcher<usize> {
    let mut matcher: Matcher<usize> = Matcher::path();
    for i in 0..10_000 {
        matcher.add(&format!("/api/v1/user/{}", i), i);
        matcher.add(&format!("/api/v1/data/{}/details", i), i);
        matcher.add(&format!("/api/v1/data/{}/*/a", i), i);
    }
    matcher.add("/assets/**", 1000);
    matcher.add("/static/*", 1001);
    matcher.add("/**", 9999);
    matcher
}

fn build_simple() -> Matcher<usize> {
    let options = MatcherOptions {
        simple_matcher: true,
        ..MatcherOptions::default()
    };
    let mut matcher: Matcher<usize> = Matcher::path_with(options);
    for i in 0..10_000 {
        matcher.add(&format!("/api/v1/user/{}", i), i);
    }
    matcher.add("/assets/*", 1000);
    matcher
}

fn matcher_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher-find");

    let matcher = build();
    // Warm the lazy index outside the measured loops.
    assert!(matcher.find("/api/v1/user/0").is_some());

    group.bench_function("exact-deep", |b| {
        b.iter(|| {
            let ret = matcher.find(black_box("/api/v1/data/50/details"));
            assert!(ret.is_some())
        })
    });

    group.bench_function("exact-shallow", |b| {
        b.iter(|| {
            let ret = matcher.find(black_box("/api/v1/user/50"));
            assert!(ret.is_some())
        })
    });

    group.bench_function("star", |b| {
        b.iter(|| {
            let ret = matcher.find(black_box("/static/style.css"));
            assert!(ret.is_some())
        })
    });

    group.bench_function("double-star", |b| {
        b.iter(|| {
            let ret = matcher.find(black_box("/assets/images/logo.png"));
            assert!(ret.is_some())
        })
    });

    group.bench_function("fallback", |b| {
        b.iter(|| {
            let ret = matcher.find(black_box("/random/page/not/found"));
            assert!(ret.is_some())
        })
    });

    let simple = build_simple();

    group.bench_function("simple-exact", |b| {
        b.iter(|| {
            let ret = simple.find(black_box("/api/v1/user/50"));
            assert!(ret.is_some())
        })
    });

    group.bench_function("simple-prefix", |b| {
        b.iter(|| {
            let ret = simple.find(black_box("/assets/images/huge.jpg"));
            assert!(ret.is_some())
        })
    });

    group.finish();
}

criterion_group!(benches, matcher_find);
criterion_main!(benches);
