// tests/bumper_test.rs
use gitversion::git::MockRepository;
use gitversion::{BumpOptions, Bumper, Field, GitVersionError, Version};

fn fake_tags() -> MockRepository {
    MockRepository::with_tags([
        "1.0.1", "2.0.1", "1.2.1", "latest", "stable", "1.4.3", "2.1.2",
    ])
}

fn released() -> MockRepository {
    MockRepository::with_tags(["1.1.1", "0.1.1"])
}

#[test]
fn test_versions_skips_unparseable_tags() {
    let bumper = Bumper::new(fake_tags());

    let versions = bumper.versions("", false).expect("Should list versions");
    let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
    assert_eq!(rendered, vec!["1.0.1", "2.0.1", "1.2.1", "1.4.3", "2.1.2"]);
}

#[test]
fn test_no_versions() {
    let bumper = Bumper::new(MockRepository::new());

    assert!(matches!(
        bumper.versions("", false),
        Err(GitVersionError::NoVersionTags)
    ));
    assert!(matches!(
        bumper.latest_version("", false),
        Err(GitVersionError::NoVersionTags)
    ));
}

#[test]
fn test_only_garbage_tags_means_no_versions() {
    let bumper = Bumper::new(MockRepository::with_tags(["latest", "stable", "v", ""]));
    assert!(matches!(
        bumper.latest_version("v", false),
        Err(GitVersionError::NoVersionTags)
    ));
}

#[test]
fn test_latest_version() {
    let bumper = Bumper::new(fake_tags());

    let latest = bumper.latest_version("", false).unwrap();
    assert_eq!(latest.to_string(), "2.1.2");
}

#[test]
fn test_sorted_versions_latest_first() {
    let bumper = Bumper::new(fake_tags());

    let sorted = bumper.sorted_versions("", false).unwrap();
    let rendered: Vec<String> = sorted.iter().map(|v| v.to_string()).collect();
    assert_eq!(rendered, vec!["2.1.2", "2.0.1", "1.4.3", "1.2.1", "1.0.1"]);
}

#[test]
fn test_prefix_filtering() {
    let bumper = Bumper::new(MockRepository::with_tags([
        "bigPrefix2.1.0",
        "v2.2.0",
        "2.3.0",
    ]));

    let latest = bumper.latest_version("bigPrefix", false).unwrap();
    assert_eq!(latest.to_string(), "2.1.0");
}

#[test]
fn test_prefix_alone_is_not_a_version() {
    let bumper = Bumper::new(MockRepository::with_tags(["v", "v1.0.0"]));
    assert_eq!(bumper.versions("v", false).unwrap().len(), 1);
}

#[test]
fn test_merged_filter_is_passed_to_repository() {
    let mut repo = MockRepository::with_tags(["1.0.0", "3.0.0"]);
    repo.set_merged_tags(["1.0.0"]);
    let bumper = Bumper::new(repo);

    assert_eq!(
        bumper.latest_version("", true).unwrap(),
        Version::new(1, 0, 0)
    );
    assert_eq!(
        bumper.latest_version("", false).unwrap(),
        Version::new(3, 0, 0)
    );
    assert_eq!(
        bumper.repository().calls(),
        vec!["list_tags(true)".to_string(), "list_tags(false)".to_string()]
    );
}

#[test]
fn test_listing_failure_is_wrapped() {
    let mut repo = MockRepository::new();
    repo.fail_listing("git not found");
    let bumper = Bumper::new(repo);

    let err = bumper.bump(&BumpOptions::new(Field::Patch)).unwrap_err();
    assert!(matches!(err, GitVersionError::Tag(_)));
    assert!(err.to_string().contains("fetching git tags"));
    assert!(bumper.repository().created_tags().is_empty());
}

#[test]
fn test_bump_patch() {
    let bumper = Bumper::new(released());

    let tag = bumper.bump(&BumpOptions::new(Field::Patch)).unwrap();
    assert_eq!(tag, "1.1.2");
    assert_eq!(bumper.repository().created_tags(), vec!["1.1.2".to_string()]);
}

#[test]
fn test_bump_minor() {
    let bumper = Bumper::new(released());

    assert_eq!(bumper.bump(&BumpOptions::new(Field::Minor)).unwrap(), "1.2.0");
    assert_eq!(bumper.repository().created_tags(), vec!["1.2.0".to_string()]);
}

#[test]
fn test_bump_major() {
    let bumper = Bumper::new(released());

    assert_eq!(bumper.bump(&BumpOptions::new(Field::Major)).unwrap(), "2.0.0");
    assert_eq!(bumper.repository().created_tags(), vec!["2.0.0".to_string()]);
}

#[test]
fn test_bump_minor_dry_run() {
    let bumper = Bumper::new(released());

    let tag = bumper
        .bump(&BumpOptions::new(Field::Minor).dry_run(true))
        .unwrap();
    assert_eq!(tag, "1.2.0");
    assert!(bumper.repository().created_tags().is_empty());
    assert!(!bumper
        .repository()
        .calls()
        .iter()
        .any(|c| c.starts_with("create_tag")));
}

#[test]
fn test_bump_auto_tagged_head_is_patch() {
    let mut repo = released();
    repo.tag_head("1.1.1");
    repo.set_last_commit_message("[Major] foo");
    let bumper = Bumper::new(repo);

    assert_eq!(bumper.bump(&BumpOptions::default()).unwrap(), "1.1.2");
    assert!(!bumper
        .repository()
        .calls()
        .contains(&"last_commit_message".to_string()));
}

#[test]
fn test_bump_auto_tagged_head_with_unrelated_tag() {
    let mut repo = released();
    repo.tag_head("nightly");
    let bumper = Bumper::new(repo);

    assert_eq!(bumper.bump(&BumpOptions::default()).unwrap(), "1.1.2");
}

#[test]
fn test_bump_auto_match() {
    let mut repo = released();
    repo.set_last_commit_message("[Major] foo");
    let bumper = Bumper::new(repo);

    assert_eq!(bumper.bump(&BumpOptions::default()).unwrap(), "2.0.0");
}

#[test]
fn test_bump_auto_match_alternate() {
    let mut repo = released();
    repo.set_last_commit_message("[major bump] foo");
    let bumper = Bumper::new(repo);

    assert_eq!(bumper.bump(&BumpOptions::default()).unwrap(), "2.0.0");
}

#[test]
fn test_bump_auto_minor_directive() {
    let mut repo = released();
    repo.set_last_commit_message("[minor bump] add feature X");
    let bumper = Bumper::new(repo);

    assert_eq!(bumper.bump(&BumpOptions::default()).unwrap(), "1.2.0");
}

#[test]
fn test_bump_auto_match_fallback() {
    let mut repo = released();
    repo.set_last_commit_message("foo bar");
    let bumper = Bumper::new(repo);

    assert_eq!(bumper.bump(&BumpOptions::default()).unwrap(), "1.1.2");
}

#[test]
fn test_bump_auto_prerelease_directive() {
    let mut repo = released();
    repo.set_last_commit_message("[prerelease] try it out");
    repo.set_last_commit_id("9d8ceaa");
    let bumper = Bumper::new(repo);

    assert_eq!(
        bumper.bump(&BumpOptions::default()).unwrap(),
        "1.1.1-9d8ceaa"
    );
}

#[test]
fn test_bump_prerelease() {
    let mut repo = released();
    repo.set_last_commit_id("9d8ceaa");
    let bumper = Bumper::new(repo);

    let tag = bumper.bump(&BumpOptions::new(Field::Prerelease)).unwrap();
    assert_eq!(tag, "1.1.1-9d8ceaa");
    assert!(bumper
        .repository()
        .calls()
        .contains(&"last_commit_id(true)".to_string()));
}

#[test]
fn test_bump_prerelease_without_commit_fails() {
    let bumper = Bumper::new(released());

    let err = bumper
        .bump(&BumpOptions::new(Field::Prerelease))
        .unwrap_err();
    assert!(matches!(err, GitVersionError::CommitLookup(_)));
    assert!(err.to_string().contains("getting current commit sha"));
    assert!(bumper.repository().created_tags().is_empty());
}

#[test]
fn test_bump_major_clears_prerelease() {
    let mut repo = MockRepository::with_tags(["1.1.1", "1.1.1-abc1234"]);
    repo.set_last_commit_id("def5678");
    let bumper = Bumper::new(repo);

    assert_eq!(bumper.latest_version("", false).unwrap().prerelease, "abc1234");
    assert_eq!(bumper.bump(&BumpOptions::new(Field::Major)).unwrap(), "2.0.0");
}

#[test]
fn test_bump_with_no_versions() {
    let bumper = Bumper::new(MockRepository::new());

    assert_eq!(bumper.bump(&BumpOptions::new(Field::Patch)).unwrap(), "0.0.1");
    assert_eq!(bumper.repository().created_tags(), vec!["0.0.1".to_string()]);
}

#[test]
fn test_bump_overflowing_component_is_an_error() {
    let bumper = Bumper::new(MockRepository::with_tags(["1.1.18446744073709551615"]));

    let err = bumper.bump(&BumpOptions::new(Field::Patch)).unwrap_err();
    assert!(matches!(err, GitVersionError::Parse(_)));
    assert!(err.to_string().contains("overflows"));
    assert!(bumper.repository().created_tags().is_empty());
    assert!(!bumper
        .repository()
        .calls()
        .iter()
        .any(|c| c.starts_with("create_tag")));

    // Other fields still move past the saturated component
    assert_eq!(bumper.bump(&BumpOptions::new(Field::Minor)).unwrap(), "1.2.0");
}

#[test]
fn test_bump_with_bad_field() {
    let err = "foobar".parse::<Field>().unwrap_err();
    assert!(matches!(err, GitVersionError::UnknownField(_)));
    assert!(err.to_string().starts_with("unknown field type"));
}

#[test]
fn test_apply_unresolved_auto_is_unknown_field() {
    let bumper = Bumper::new(MockRepository::new());

    let err = bumper
        .apply_increment(&Version::new(1, 0, 0), Field::Auto)
        .unwrap_err();
    assert!(matches!(err, GitVersionError::UnknownField(_)));
    assert!(bumper.repository().created_tags().is_empty());
}

#[test]
fn test_resolve_explicit_field_does_not_query_repository() {
    let bumper = Bumper::new(MockRepository::new());

    assert_eq!(bumper.resolve_field(Field::Minor).unwrap(), Field::Minor);
    assert!(bumper.repository().calls().is_empty());
}

#[test]
fn test_bump_tag_conflict_is_wrapped() {
    let mut repo = released();
    repo.add_tag("1.1.2-");
    let bumper = Bumper::new(repo);

    // "1.1.2-" parses as 1.1.2, so the next patch is 1.1.3
    assert_eq!(bumper.bump(&BumpOptions::new(Field::Patch)).unwrap(), "1.1.3");

    // Bumping again from the same tag set collides with the tag just created
    let err = bumper.bump(&BumpOptions::new(Field::Patch)).unwrap_err();
    assert!(matches!(err, GitVersionError::Tag(_)));
    assert!(err.to_string().contains("creating new tag 1.1.3"));
}

#[test]
fn test_bump_with_prefix() {
    let bumper = Bumper::new(MockRepository::with_tags(["v2.2.0"]));

    let tag = bumper
        .bump(&BumpOptions::new(Field::Patch).prefix("v"))
        .unwrap();
    assert_eq!(tag, "v2.2.1");
    assert_eq!(bumper.repository().created_tags(), vec!["v2.2.1".to_string()]);
}

#[test]
fn test_bump_is_repeatable_across_calls() {
    let bumper = Bumper::new(released());

    let options = BumpOptions::new(Field::Minor).dry_run(true);
    assert_eq!(bumper.bump(&options).unwrap(), "1.2.0");
    assert_eq!(bumper.bump(&options).unwrap(), "1.2.0");
}

#[test]
fn test_bumper_over_borrowed_repository() {
    let repo = released();
    let bumper = Bumper::new(&repo);

    assert_eq!(bumper.bump(&BumpOptions::new(Field::Patch)).unwrap(), "1.1.2");
    assert_eq!(repo.created_tags(), vec!["1.1.2".to_string()]);
}
