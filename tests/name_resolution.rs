use file_renamer::{EntryKind, MemoryStore, NameResolver, sanitize_name, truncate_name};

fn store() -> MemoryStore {
    [
        (42, "Projects"),
        (7, "Q3: Budget/Plan?"),
        (9, "Line\r\nBreak"),
        (13, "???"),
        (21, ".."),
    ]
    .into_iter()
    .collect()
}

#[test]
fn integer_name_with_entry_uses_stored_value() {
    let store = store();
    let resolver = NameResolver::new(&store, 255);
    let resolved = resolver.resolve("42", EntryKind::Directory).unwrap().unwrap();
    assert_eq!(resolved.candidate(0), "Projects");
    assert_eq!(store.lookup_count(), 1);
}

#[test]
fn stored_value_is_sanitized_then_truncated() {
    let store = store();
    let resolved = NameResolver::new(&store, 255)
        .resolve("7", EntryKind::Directory)
        .unwrap()
        .unwrap();
    assert_eq!(resolved.base(), "Q3 BudgetPlan");

    let short = NameResolver::new(&store, 5)
        .resolve("7", EntryKind::Directory)
        .unwrap()
        .unwrap();
    assert_eq!(short.base(), "Q3 Bu");

    let breaks = NameResolver::new(&store, 255)
        .resolve("9", EntryKind::Directory)
        .unwrap()
        .unwrap();
    assert_eq!(breaks.base(), "LineBreak");
}

#[test]
fn missing_entry_keeps_original_name() {
    let store = store();
    let resolver = NameResolver::new(&store, 255);
    let dir = resolver.resolve("8", EntryKind::Directory).unwrap().unwrap();
    assert_eq!(dir.candidate(0), "8");
    let file = resolver.resolve("8.txt", EntryKind::File).unwrap().unwrap();
    assert_eq!(file.candidate(0), "8.txt");
}

#[test]
fn non_integer_names_do_not_query_the_store() {
    let store = store();
    let resolver = NameResolver::new(&store, 255);
    let resolved = resolver.resolve("report.pdf", EntryKind::File).unwrap().unwrap();
    assert_eq!(resolved.candidate(0), "report.pdf");
    assert_eq!(store.lookup_count(), 0);
}

#[test]
fn file_extension_is_preserved() {
    let store = store();
    let resolved = NameResolver::new(&store, 255)
        .resolve("42.pdf", EntryKind::File)
        .unwrap()
        .unwrap();
    assert_eq!(resolved.extension(), Some("pdf"));
    assert_eq!(resolved.candidate(0), "Projects.pdf");
}

#[test]
fn directories_never_split_an_extension() {
    let store = store();
    let resolved = NameResolver::new(&store, 255)
        .resolve("42.5", EntryKind::Directory)
        .unwrap()
        .unwrap();
    assert_eq!(resolved.candidate(0), "42.5");
    assert_eq!(store.lookup_count(), 0);
}

#[test]
fn sanitize_removes_exactly_the_disallowed_characters() {
    assert_eq!(sanitize_name("a/b:c'd?e\r\nf"), "abcdef");
    assert_eq!(sanitize_name("a\nb\rc"), "abc");
    let untouched = "keep \\*<>|\". ~-_ é";
    assert_eq!(sanitize_name(untouched), untouched);
}

#[test]
fn truncate_never_exceeds_limit() {
    for max in 0..12 {
        let t = truncate_name("Ünïcödé names", max);
        assert!(t.chars().count() <= max);
        assert!("Ünïcödé names".starts_with(t));
    }
}

#[test]
fn unusable_stored_name_falls_back_to_original() {
    let store = store();
    let resolver = NameResolver::new(&store, 255);
    let q = resolver.resolve("13", EntryKind::Directory).unwrap().unwrap();
    assert_eq!(q.candidate(0), "13");
    let dots = resolver.resolve("21", EntryKind::Directory).unwrap().unwrap();
    assert_eq!(dots.candidate(0), "21");
}

#[test]
fn unusable_original_name_is_unresolved() {
    let store = store();
    let resolver = NameResolver::new(&store, 255);
    assert!(resolver.resolve("???", EntryKind::Directory).unwrap().is_none());
}

#[test]
fn suffixed_candidates_fit_within_max_length() {
    let store = store();
    let dir = NameResolver::new(&store, 8)
        .resolve("42", EntryKind::Directory)
        .unwrap()
        .unwrap();
    assert_eq!(dir.candidate(0), "Projects");
    assert_eq!(dir.candidate(1), "Projec~1");
    assert_eq!(dir.candidate(12), "Proje~12");

    let file = NameResolver::new(&store, 8)
        .resolve("42.txt", EntryKind::File)
        .unwrap()
        .unwrap();
    assert_eq!(file.candidate(1), "Projec~1.txt");
    for attempt in 0..500 {
        let name = file.candidate(attempt);
        let base = name.strip_suffix(".txt").unwrap();
        assert!(base.chars().count() <= 8, "{name} exceeds limit");
    }
}

#[test]
fn suffix_alone_when_limit_is_tiny() {
    let store = store();
    let resolved = NameResolver::new(&store, 1)
        .resolve("42", EntryKind::Directory)
        .unwrap()
        .unwrap();
    assert_eq!(resolved.candidate(0), "P");
    assert_eq!(resolved.candidate(1), "~1");
    assert_eq!(resolved.candidate(2), "~2");
}

#[test]
fn candidates_exceed_limit_only_by_an_oversized_suffix() {
    let store = store();
    for max in 1..6 {
        let resolved = NameResolver::new(&store, max)
            .resolve("42", EntryKind::Directory)
            .unwrap()
            .unwrap();
        for attempt in 0..200u32 {
            let name = resolved.candidate(attempt);
            let len = name.chars().count();
            let suffix_len = if attempt == 0 {
                0
            } else {
                format!("~{attempt}").chars().count()
            };
            if suffix_len <= max {
                assert!(len <= max, "max {max}, attempt {attempt}: {name}");
            } else {
                assert_eq!(name, format!("~{attempt}"), "max {max}");
            }
        }
    }
}
