//! Shortlink CLI
//!
//! Shorten URLs against a settings file, try out a rule, and audit rules.

mod settings_file;

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sl_core::{shorten_with_rule, validate_pattern, validate_template, Rule, RuleSet};
use sl_settings::{audit_rules, save_settings, Settings};

#[derive(Parser)]
#[command(name = "shortlink")]
#[command(about = "Turn URLs into short markdown links using ordered rules")]
#[command(version)]
struct Cli {
    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten URLs with the first matching rule
    Shorten {
        /// Settings file (JSON); defaults are used when omitted
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// URLs to shorten; read one per line from stdin when none are given
        urls: Vec<String>,
    },

    /// Try a single ad-hoc rule against a URL
    Preview {
        /// Domain pattern, `*` matches any run of characters
        #[arg(short, long)]
        domain: String,

        /// Path pattern (regular expression)
        #[arg(short, long)]
        path: String,

        /// Output template
        #[arg(short, long, default_value = "[${1}](${url})")]
        template: String,

        /// URL to test
        url: String,
    },

    /// Audit every rule in a settings file
    Check {
        /// Settings file (JSON)
        #[arg(short, long)]
        settings: PathBuf,
    },

    /// Print or write the default settings
    Defaults {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Shorten { settings, urls } => cmd_shorten(settings, &urls),
        Commands::Preview {
            domain,
            path,
            template,
            url,
        } => cmd_preview(&domain, &path, &template, &url),
        Commands::Check { settings } => cmd_check(&settings),
        Commands::Defaults { output } => cmd_defaults(output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn cmd_shorten(settings: Option<PathBuf>, urls: &[String]) -> Result<(), String> {
    let settings = match settings {
        Some(path) => settings_file::read_settings(&path)?,
        None => Settings::default(),
    };
    let rules = RuleSet::compile(&settings.rules);
    log::debug!("{} of {} rules active", rules.active_count(), rules.len());

    if urls.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.map_err(|e| format!("Failed to read stdin: {}", e))?;
            println!("{}", shorten_line(&rules, line.trim_end_matches('\r')));
        }
    } else {
        for url in urls {
            println!("{}", shorten_line(&rules, url));
        }
    }

    Ok(())
}

/// Shortened form of `input`, or `input` unchanged when no rule matches.
fn shorten_line(rules: &RuleSet, input: &str) -> String {
    match rules.find_match(input) {
        Some((rule, m)) => {
            log::debug!("rule '{}' matched {}", rule.id(), input);
            rule.render(&m)
        }
        None => input.to_string(),
    }
}

fn cmd_preview(domain: &str, path: &str, template: &str, url: &str) -> Result<(), String> {
    validate_pattern(path).map_err(|e| format!("Path pattern: {}", e))?;
    validate_template(template).map_err(|e| format!("Template: {}", e))?;
    if domain.trim().is_empty() {
        return Err("Domain pattern cannot be empty".to_string());
    }

    let rule = Rule::new("preview", domain, path, template);
    match shorten_with_rule(url.trim(), &rule) {
        Some(result) => println!("{}", result),
        None => println!("no match"),
    }

    Ok(())
}

fn cmd_check(path: &Path) -> Result<(), String> {
    let settings = settings_file::read_settings(path)?;
    let report = audit_rules(&settings.rules);

    println!("Settings '{}'", path.display());
    println!("  Rules:       {}", report.total);
    println!("  Enabled:     {}", report.enabled);
    println!("  Disabled:    {}", report.disabled);

    if report.is_clean() {
        println!("  No issues found");
        return Ok(());
    }

    println!();
    for finding in &report.findings {
        let rule = &settings.rules[finding.index];
        let label = if rule.name.is_empty() { &finding.id } else { &rule.name };
        println!("  [{}] {}", finding.index, label);
        for issue in &finding.issues {
            println!("      - {}", issue);
        }
    }

    Err(format!("{} issue(s) found", report.issue_count()))
}

fn cmd_defaults(output: Option<PathBuf>) -> Result<(), String> {
    let settings = Settings::default();
    match output {
        Some(path) => {
            settings_file::write_settings(&path, &settings)?;
            println!("Wrote {} default rules to '{}'", settings.rules.len(), path.display());
        }
        None => {
            let json = save_settings(&settings)
                .map_err(|e| format!("Failed to serialize settings: {}", e))?;
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_preview_default_template() {
        let cli = Cli::parse_from([
            "shortlink",
            "preview",
            "--domain",
            "gitlab.com",
            "--path",
            r"\/(.+)\/-\/issues\/(\d+)",
            "https://gitlab.com/a/b/-/issues/1",
        ]);
        match cli.command {
            Commands::Preview { template, .. } => assert_eq!(template, "[${1}](${url})"),
            _ => panic!("expected preview"),
        }
    }

    #[test]
    fn test_shorten_line() {
        let rules = RuleSet::compile(&Settings::default().rules);
        assert_eq!(
            shorten_line(&rules, "https://github.com/rust-lang/rust/pull/1"),
            "[rust-lang/rust#1](https://github.com/rust-lang/rust/pull/1)"
        );
        assert_eq!(shorten_line(&rules, "not a url"), "not a url");
        assert_eq!(shorten_line(&rules, "https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn test_preview_rejects_invalid_rule() {
        assert!(cmd_preview("gitlab.com", "(", "${1}", "https://gitlab.com").is_err());
        assert!(cmd_preview("gitlab.com", r"\/(\d+)", "static", "https://gitlab.com/1").is_err());
        assert!(cmd_preview(" ", r"\/(\d+)", "${1}", "https://gitlab.com/1").is_err());
        assert!(cmd_preview("gitlab.com", r"\/(\d+)", "${1}", "https://gitlab.com/1").is_ok());
    }
}
