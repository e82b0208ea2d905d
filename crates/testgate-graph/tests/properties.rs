//! Property-based tests for classification, change anchoring and decisions.

use proptest::prelude::*;
use testgate_graph::{
    ChangeSet, DependencySet, GoImportExtractor, ImportClassifier, ImportExtractor, ImportKind,
    LocalMatch, MatchPolicy, ProjectRoot, Verdict, decide,
};

const ROOT: &str = "proj";

fn root() -> ProjectRoot {
    ProjectRoot::new(ROOT).unwrap()
}

/// Import path segments that never equal the root.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.]{0,7}".prop_filter("segment must not be the root", |s| s != ROOT)
}

fn import_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..=5)
}

/// Repository-relative file paths such as `pkg/util/a.go`.
fn repo_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..=4).prop_map(|parts| format!("{}.go", parts.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// An import is local under segment matching exactly when one of its
    /// segments is the root.
    #[test]
    fn prop_segment_classification(
        segments in import_strategy(),
        insert_at in prop::option::of(0usize..6),
    ) {
        let mut segments = segments;
        if let Some(at) = insert_at {
            let at = at.min(segments.len());
            segments.insert(at, ROOT.to_string());
        }
        let import = segments.join("/");

        let classifier = ImportClassifier::new(root(), LocalMatch::Segment);
        let expected = if insert_at.is_some() { ImportKind::Local } else { ImportKind::External };
        prop_assert_eq!(classifier.classify(&import), expected);
    }

    /// Containment matching is never stricter than segment matching.
    #[test]
    fn prop_containment_accepts_segment_locals(segments in import_strategy()) {
        let import = segments.join("/");
        let segment = ImportClassifier::new(root(), LocalMatch::Segment);
        let containment = ImportClassifier::new(root(), LocalMatch::Containment);

        if segment.classify(&import) == ImportKind::Local {
            prop_assert_eq!(containment.classify(&import), ImportKind::Local);
        }
    }

    /// Every anchored change path starts at the root and has no empty segments.
    #[test]
    fn prop_change_paths_are_anchored(paths in prop::collection::vec(repo_path_strategy(), 0..10)) {
        let changes = ChangeSet::from_paths(&root(), &paths);
        prop_assert_eq!(changes.len(), paths.len());
        for path in changes.iter() {
            let prefix = format!("{ROOT}/");
            prop_assert!(path.starts_with(&prefix));
            prop_assert!(!path.contains("//"));
        }
    }

    /// A changed file that is also a dependency always forces a run, under
    /// either policy.
    #[test]
    fn prop_overlap_forces_run(
        deps in prop::collection::vec(repo_path_strategy(), 1..10),
        others in prop::collection::vec(repo_path_strategy(), 0..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let root = root();
        let set: DependencySet = deps.iter().map(|p| root.join(p)).collect();
        let mut changed = others.clone();
        changed.push(pick.get(&deps).clone());
        let changes = ChangeSet::from_paths(&root, &changed);

        prop_assert!(decide(&set, &changes, MatchPolicy::Exact).should_run());
        prop_assert!(decide(&set, &changes, MatchPolicy::Containment).should_run());
    }

    /// Exact verdicts name a real dependency; containment never skips what
    /// exact matching would run.
    #[test]
    fn prop_policies_are_consistent(
        deps in prop::collection::vec(repo_path_strategy(), 0..10),
        changed in prop::collection::vec(repo_path_strategy(), 0..10),
    ) {
        let root = root();
        let set: DependencySet = deps.iter().map(|p| root.join(p)).collect();
        let changes = ChangeSet::from_paths(&root, &changed);

        let exact = decide(&set, &changes, MatchPolicy::Exact);
        let containment = decide(&set, &changes, MatchPolicy::Containment);

        if let Verdict::Run { changed, dependency } = &exact {
            prop_assert_eq!(changed, dependency);
            prop_assert!(set.contains(dependency));
            prop_assert!(containment.should_run());
        }
        if let Verdict::Run { changed, dependency } = &containment {
            prop_assert!(changed.contains(dependency.as_str()));
        }
    }

    /// Imports written in a grouped declaration are extracted in order.
    #[test]
    fn prop_grouped_imports_are_extracted(imports in prop::collection::vec(import_strategy(), 0..8)) {
        let imports: Vec<String> = imports.into_iter().map(|s| s.join("/")).collect();
        let mut source = String::from("// generated\npackage sample\n\nimport (\n");
        for (i, import) in imports.iter().enumerate() {
            if i % 2 == 0 {
                source.push_str(&format!("\t\"{import}\"\n"));
            } else {
                source.push_str(&format!("\talias{i} \"{import}\" // note\n"));
            }
        }
        source.push_str(")\n\nfunc main() {}\n");

        let extracted = GoImportExtractor::new().extract_imports(&source).unwrap();
        prop_assert_eq!(extracted, imports);
    }
}
