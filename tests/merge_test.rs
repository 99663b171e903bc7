use inidoc::{IniDocument, MergeStrategy, Origin, PersistStrategy};

#[test]
fn test_override_scenario() {
    let mut a = IniDocument::parse_str("[section]\nkey=A-value");
    let b = IniDocument::parse_str("[section]\nkey=B-value");

    a.merge(&b, MergeStrategy::Override);

    assert_eq!(a.get_value("section", "key"), Some("B-value"));
    assert_eq!(a.to_string(), "[section]\nkey=\"A-value\"");
}

#[test]
fn test_add_if_missing_never_overwrites() {
    let mut doc = IniDocument::parse_str("[a]\nx=mine\n[b]\ny=mine");
    let other = IniDocument::parse_str("[A]\nX=theirs\nz=theirs\n[b]\nY=theirs");
    doc.merge(&other, MergeStrategy::AddIfMissing);

    assert_eq!(doc.get_value("a", "x"), Some("mine"));
    assert_eq!(doc.get_value("b", "y"), Some("mine"));
    assert_eq!(doc.get_value("a", "z"), Some("theirs"));
}

#[test]
fn test_override_always_wins_reads() {
    let mut doc = IniDocument::parse_str("[a]\nx=mine\nflag");
    let other = IniDocument::parse_str("[a]\nx=theirs\nflag=now-set");
    doc.merge(&other, MergeStrategy::Override);

    assert_eq!(doc.get_value("a", "x"), Some("theirs"));
    assert_eq!(doc.get_value("a", "flag"), Some("now-set"));
    assert_eq!(doc.to_string(), "[a]\nx=\"mine\"\nflag");
}

#[test]
fn test_merged_only_content_is_not_persisted() {
    let mut doc = IniDocument::parse_str("top=1\n[mine]\na=1");
    let other = IniDocument::parse_str("extra=2\n[mine]\nb=2\n; about theirs\n[theirs]\nc=3");
    doc.merge(&other, MergeStrategy::AddIfMissing);

    let default_output = doc.render(PersistStrategy::ExcludeMerged);
    assert_eq!(default_output, "top=\"1\"\n\n[mine]\na=\"1\"");

    let full_output = doc.render(PersistStrategy::IncludeMerged);
    assert_eq!(
        full_output,
        "top=\"1\"\nextra=\"2\"\n\n[mine]\na=\"1\"\nb=\"2\"\n; about theirs\n\n[theirs]\nc=\"3\""
    );
}

#[test]
fn test_origin_tags() {
    let mut doc = IniDocument::parse_str("[mine]\na=1");
    doc.merge(&IniDocument::parse_str("[mine]\nb=2\n[theirs]\nc=3"), MergeStrategy::AddIfMissing);

    assert_eq!(doc.section("mine").unwrap().origin(), Origin::Owned);
    assert_eq!(doc.section("theirs").unwrap().origin(), Origin::Merged);
    assert_eq!(doc.get_setting("mine", "a").unwrap().origin, Origin::Owned);
    assert_eq!(doc.get_setting("mine", "b").unwrap().origin, Origin::Merged);

    assert_eq!(doc.section_names(), vec!["mine"]);
    assert_eq!(doc.merged_section_names(), vec!["theirs"]);
}

#[test]
fn test_write_after_merge_takes_ownership() {
    let mut doc = IniDocument::parse_str("[s]\nk=mine");
    doc.merge(&IniDocument::parse_str("[s]\nk=theirs\nn=theirs\n[t]\nx=1"), MergeStrategy::Override);

    doc.set_value("s", "k", "edited");
    doc.set_value("s", "n", "adopted");
    doc.set_value("t", "y", "2");

    assert_eq!(
        doc.to_string(),
        "[s]\nk=\"edited\"\nn=\"adopted\"\n\n[t]\ny=\"2\""
    );
}

#[test]
fn test_merging_layers_in_order() {
    let mut doc = IniDocument::parse_str("[ui]\ntheme=light");
    let system = IniDocument::parse_str("[ui]\ntheme=system\nfont=sans\nsize=10");
    let user = IniDocument::parse_str("[ui]\nsize=12");

    doc.merge(&system, MergeStrategy::AddIfMissing);
    doc.merge(&user, MergeStrategy::Override);

    assert_eq!(doc.get_value("ui", "theme"), Some("light"));
    assert_eq!(doc.get_value("ui", "font"), Some("sans"));
    assert_eq!(doc.get_value("ui", "size"), Some("12"));
    assert_eq!(doc.to_string(), "[ui]\ntheme=\"light\"");
}

#[test]
fn test_merge_keeps_incoming_comments_for_full_output() {
    let mut doc = IniDocument::new();
    doc.merge(
        &IniDocument::parse_str("[s]\n; explains k\nk=v ; inline"),
        MergeStrategy::AddIfMissing,
    );

    assert_eq!(
        doc.render(PersistStrategy::IncludeMerged),
        "[s]\n; explains k\nk=\"v\" ; inline"
    );
    assert_eq!(doc.to_string(), "");
}
