use inidoc::{IniDocument, IniOptions, ParseStrategy};

const SOURCE: &str = r#"; Editor settings
[editor]
; characters per indent level
tab_width = 4
font = "Fira Code" ; monospace
line_numbers

[files]
exclude = "*.tmp"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let dir = std::env::temp_dir().join("inidoc-simple-demo");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("editor.ini");
    std::fs::write(&path, SOURCE)?;

    let options = IniOptions::new()
        .with_parse_strategy(ParseStrategy::Strict)
        .with_section_separator(Some("------------".to_string()))
        .with_trailing_newline(true);
    let mut doc = IniDocument::load_with_options(&path, options)?;
    println!("✅ Loaded {}\n", path.display());

    println!("Tab width: {}", doc.get_value_or("editor", "tab_width", "8"));
    println!("Font: {}", doc.get_value_or("Editor", "FONT", "monospace"));
    println!("Line numbers key present?: {}", doc.has_setting("editor", "line_numbers"));

    doc.set_value("editor", "tab_width", "2");
    doc.section_mut("files").set("watch", "true");
    doc.add_section_with_comment("terminal", "added by the demo");
    doc.set_value("terminal", "shell", "/bin/zsh");
    doc.persist()?;

    println!("\nPersisted document:\n{}", std::fs::read_to_string(&path)?);
    Ok(())
}
