use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BuiltinExampleConfig {
    examples: Vec<String>,
}

pub fn load_builtin_examples() -> Vec<String> {
    const CONFIG_CONTENT: &str = include_str!("../builtins/examples.toml");
    let config: BuiltinExampleConfig =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtins/examples.toml");
    config.examples
}
