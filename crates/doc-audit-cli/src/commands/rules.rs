//! Rules command implementation.

use anyhow::{Context, Result};
use doc_audit_core::{RuleSet, Settings};

use crate::config_resolver::ConfigSource;

/// Runs the rules command: prints the effective rule sets.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = super::load_config(source)?;
    let settings = config.to_settings().context("Invalid rule configuration")?;

    match source.path() {
        Some(p) => println!("Configuration: {}\n", p.display()),
        None => println!("Configuration: defaults\n"),
    }
    print!("{}", render(&settings));

    if settings.is_empty() {
        println!("\nNo rules configured. Create a starter config with:");
        println!("  doc-audit init");
    }
    Ok(())
}

fn render(settings: &Settings) -> String {
    let mut out = String::new();
    for (title, set) in ["functions", "interfaces", "structs"]
        .into_iter()
        .zip(settings.rule_sets())
    {
        render_set(&mut out, title, set);
    }
    out
}

fn render_set(out: &mut String, title: &str, set: &RuleSet) {
    out.push_str(&format!("[{title}] {} rule(s)\n", set.len()));
    for (i, rule) in set.rules().iter().enumerate() {
        let packages: Vec<String> = rule
            .targets()
            .iter()
            .map(|t| format!("[{}]", t.packages.join(", ")))
            .collect();
        out.push_str(&format!("  {:>2}. {}\n", i + 1, rule.check()));
        out.push_str(&format!("      targets: {}\n", packages.join(" ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_audit_core::Config;

    #[test]
    fn renders_each_set_with_targets() {
        let config = Config::parse(
            r#"
[[functions]]
targets = [{ packages = ["crate::domain", "crate::app"] }]

[[structs]]
targets = [{ packages = ["crate"] }, { packages = [] }]
params = { require_headline_comment = true }
"#,
        )
        .unwrap();
        let rendered = render(&config.to_settings().unwrap());
        insta::assert_snapshot!(rendered, @r"
        [functions] 1 rule(s)
           1. comment-density (min_comment_density = 10%, min_lines_of_code = 10)
              targets: [crate::domain, crate::app]
        [interfaces] 0 rule(s)
        [structs] 1 rule(s)
           1. struct-docs (require_headline_comment = true, require_field_comment = false)
              targets: [crate] []
        ");
    }
}
