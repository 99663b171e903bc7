use inidoc::{IniDocument, MergeStrategy, PersistStrategy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut user = IniDocument::parse_str("[ui]\ntheme=light\n\n[network]\nproxy=none");
    let defaults = IniDocument::parse_str(
        "[ui]\ntheme=dark\nfont_size=11\n\n[network]\ntimeout=30\n\n[telemetry]\nenabled=false",
    );
    let site = IniDocument::parse_str("[network]\nproxy=http://proxy.local:3128");

    user.merge(&defaults, MergeStrategy::AddIfMissing);
    user.merge(&site, MergeStrategy::Override);

    println!("Effective configuration:");
    for section in user.sections().filter(|s| !s.is_default()) {
        let tag = if section.is_merged() { " (merged)" } else { "" };
        println!("[{}]{}", section.name(), tag);
        for setting in section.settings() {
            println!(
                "  {} = {:?}{}",
                setting.key,
                setting.value.as_deref().unwrap_or(""),
                if setting.is_merged() { " (merged)" } else { "" }
            );
        }
    }

    println!("\nWritten back by default:\n{}", user.render(PersistStrategy::ExcludeMerged));
    println!("\nWritten with merged content:\n{}", user.render(PersistStrategy::IncludeMerged));
    Ok(())
}
