use crate::core::config::Config;

pub fn render_examples(config: &Config) -> String {
    let source = if config
        .example_questions
        .as_ref()
        .is_some_and(|list| list.iter().any(|q| !q.trim().is_empty()))
    {
        "configured"
    } else {
        "built-in"
    };

    let mut out = format!("Example questions ({source}):\n\n");
    for (index, example) in config.example_questions().iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", index + 1, example));
    }
    out
}

pub fn list_examples() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    print!("{}", render_examples(&config));
    Ok(())
}
