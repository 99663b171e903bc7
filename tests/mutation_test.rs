use inidoc::{IniDocument, PersistStrategy};

#[test]
fn test_edit_keeps_comments_and_order() {
    let mut doc = IniDocument::parse_str(
        r#"; main window
[Window]
; pixels
width=800
height=600 ; default

[Theme]
name=dark"#,
    );

    doc.set_value("window", "WIDTH", "1024");
    doc.set_value("theme", "accent", "blue");
    doc.set_key_only("window", "fullscreen");

    let expected = r#"; main window
[Window]
; pixels
width="1024"
height="600" ; default
fullscreen

[Theme]
name="dark"
accent="blue""#;
    assert_eq!(doc.to_string(), expected);
}

#[test]
fn test_add_section_variants() {
    let mut doc = IniDocument::new();
    doc.add_section("plain");
    doc.add_section_with_comment("documented", "what this is for");
    doc.add_section_with_comment("documented", "ignored, already exists");
    doc.add_section("");

    assert_eq!(doc.section_names(), vec!["plain", "documented"]);
    assert_eq!(
        doc.render(PersistStrategy::ExcludeMerged),
        "[plain]\n;what this is for\n\n[documented]"
    );
}

#[test]
fn test_remove_section_is_idempotent() {
    let mut doc = IniDocument::parse_str("[a]\nx=1\n[b]\ny=2");
    doc.remove_section("a");
    doc.remove_section("a");
    doc.remove_section("never-existed");
    assert_eq!(doc.to_string(), "[b]\ny=\"2\"");
}

#[test]
fn test_rename_section_moves_comments() {
    let mut doc = IniDocument::parse_str(";about old\n[old]\n;about k\nk=v\n[next]\nn=1");
    doc.rename_section("OLD", "new");
    assert_eq!(
        doc.to_string(),
        ";about old\n[new]\n;about k\nk=\"v\"\n\n[next]\nn=\"1\""
    );
}

#[test]
fn test_rename_default_section() {
    let mut doc = IniDocument::parse_str("loose=1\n[kept]\nk=v");
    doc.rename_section("", "adopted");

    assert!(doc.default_section().unwrap().is_empty());
    assert_eq!(doc.get_value("adopted", "loose"), Some("1"));
    assert_eq!(doc.section_names(), vec!["kept", "adopted"]);
}

#[test]
fn test_section_handle_round_trip() {
    let mut doc = IniDocument::parse_str("[db]\nhost=localhost");
    {
        let mut db = doc.section_mut("DB");
        db.set("port", "5432").set_key_only("readonly");
        assert!(db.remove("host"));
    }

    assert_eq!(doc.to_string(), "[db]\nport=\"5432\"\nreadonly");
    assert_eq!(doc.get_raw("db", "readonly"), Some(&None));
}

#[test]
fn test_get_value_defaults() {
    let doc = IniDocument::parse_str("[s]\nk=v\nflag");
    assert_eq!(doc.get_value("missing", "k"), None);
    assert_eq!(doc.get_value("s", "missing"), None);
    assert_eq!(doc.get_value("s", "flag"), None);
    assert_eq!(doc.get_value_or("s", "missing", "dflt"), "dflt");
    assert!(doc.has_setting("S", "FLAG"));
    assert!(!doc.has_setting("s", "nope"));
}

#[test]
fn test_line_breaks_in_values_stay_on_one_line() {
    let mut doc = IniDocument::parse_str("[s]\nk=v");
    doc.set_value("s", "k", "x\n[evil]\ny=1");
    doc.set_value("s", "crlf", "one\r\ntwo");
    doc.set_value("multi\nline", "k", "v");
    assert_eq!(doc.get_value("s", "k"), Some("x [evil] y=1"));

    let reread = IniDocument::parse_str(&doc.to_string());
    assert_eq!(reread.section_names(), vec!["s", "multi line"]);
    assert_eq!(reread.get_value("s", "k"), Some("x [evil] y=1"));
    assert_eq!(reread.get_value("s", "crlf"), Some("one two"));
    assert_eq!(reread.to_string(), doc.to_string());
}

#[test]
fn test_keys_that_cannot_be_read_back_are_ignored() {
    let mut doc = IniDocument::parse_str("[s]\nk=v");
    doc.set_value("s", "a=b", "1");
    doc.set_value("s", "[evil]", "2");
    doc.set_key_only("s", "say \"hi\"");
    doc.section_mut("s")
        .set("two\nlines", "3")
        .set(";hidden", "4")
        .set("ok", "5");

    let keys: Vec<_> = doc.section("s").unwrap().keys().collect();
    assert_eq!(keys, vec!["k", "ok"]);

    let reread = IniDocument::parse_str(&doc.to_string());
    assert_eq!(reread.section_names(), vec!["s"]);
    assert_eq!(reread.section("s").unwrap().keys().collect::<Vec<_>>(), vec!["k", "ok"]);
}
