//! Writes the `*_gen.rs` object families of `snowflake-sdk` from `definitions/*.toml`.
//!
//! Run from the workspace root:
//!
//! ```text
//! cargo run -p snowflake-sdk-generator -- --filter database_roles
//! ```

mod model;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::metadata::LevelFilter;
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::Layer;

use crate::model::load_definitions;
use crate::render::{render_family, render_integration_scaffold, render_unit_scaffold, Output};

#[derive(Parser, Debug)]
#[command(name = "snowflake-sdk-generator", version, about, long_about = None)]
struct Args {
    /// Directory holding one TOML definition per family
    #[arg(long, default_value = "snowflake-sdk-generator/definitions")]
    definitions: PathBuf,
    /// Directory the generated modules are written to
    #[arg(long, default_value = "src/sdk")]
    out: PathBuf,
    /// Only generate the family with this file stem, ex. `database_roles`
    #[arg(long)]
    filter: Option<String>,
    /// Also write `<family>_gen_test.rs` when it does not exist yet
    #[arg(long)]
    scaffold_tests: bool,
    /// Write integration test scaffolds into this directory when they do not exist yet
    #[arg(long)]
    integration_out: Option<PathBuf>,
    /// Fail instead of writing when a generated file is out of date
    #[arg(long)]
    check: bool,
    /// More output, repeat for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let env = std::env::var("RUST_LOG").unwrap_or_else(|_| "snowflake_sdk_generator=info".into());
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let layers = vec![
        tracing_subscriber::EnvFilter::new(env).boxed(),
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(level)
            .boxed(),
    ];
    tracing_subscriber::registry().with(layers).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let definitions = load_definitions(&args.definitions)?;
    let mut stale = Vec::new();
    let mut matched = false;

    for (path, definition) in &definitions {
        let stem = definition.file_stem();
        if args.filter.as_ref().is_some_and(|filter| *filter != stem) {
            continue;
        }
        matched = true;
        debug!(definition = %path.display(), "rendering {stem}");

        for output in render_family(definition)? {
            let target = args.out.join(&output.file_name);
            if args.check {
                if !is_current(&target, &output)? {
                    stale.push(target);
                }
            } else {
                write_if_changed(&target, &output)?;
            }
        }

        if args.check {
            continue;
        }
        if args.scaffold_tests {
            let target = args.out.join(format!("{stem}_gen_test.rs"));
            write_if_absent(&target, &render_unit_scaffold(definition)?)?;
        }
        if let Some(dir) = &args.integration_out {
            let target = dir.join(format!("{stem}_integration.rs"));
            write_if_absent(&target, &render_integration_scaffold(definition)?)?;
        }
    }

    if let Some(filter) = &args.filter {
        if !matched {
            bail!("no definition named `{filter}` in {}", args.definitions.display());
        }
    }
    if !stale.is_empty() {
        for path in &stale {
            warn!("{} is out of date", path.display());
        }
        bail!("{} generated file(s) are out of date, run the generator", stale.len());
    }
    Ok(())
}

fn is_current(target: &Path, output: &Output) -> Result<bool> {
    match std::fs::read_to_string(target) {
        Ok(existing) => Ok(existing == output.contents),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error).with_context(|| format!("reading {}", target.display())),
    }
}

fn write_if_changed(target: &Path, output: &Output) -> Result<()> {
    if is_current(target, output)? {
        debug!("{} is up to date", target.display());
        return Ok(());
    }
    std::fs::write(target, &output.contents).with_context(|| format!("writing {}", target.display()))?;
    info!("wrote {}", target.display());
    Ok(())
}

/// Scaffolds are filled in by hand once written.
fn write_if_absent(target: &Path, contents: &str) -> Result<()> {
    if target.exists() {
        debug!("keeping {}", target.display());
        return Ok(());
    }
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(target, contents).with_context(|| format!("writing {}", target.display()))?;
    info!("wrote scaffold {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_workspace() {
        let args = Args::parse_from(["snowflake-sdk-generator"]);
        assert_eq!(args.definitions, PathBuf::from("snowflake-sdk-generator/definitions"));
        assert_eq!(args.out, PathBuf::from("src/sdk"));
        assert!(!args.check);

        let args = Args::parse_from(["snowflake-sdk-generator", "--filter", "tasks", "-vv", "--check"]);
        assert_eq!(args.filter.as_deref(), Some("tasks"));
        assert_eq!(args.verbose, 2);
        assert!(args.check);
    }
}
