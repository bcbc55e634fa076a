//! Build automation tasks for the pokedex workspace.
//!
//! Run with: `cargo xt <command>`
//!
//! # Available Commands
//!
//! - `check`: Run all checks (fmt, clippy, test)
//! - `fmt`: Format code with rustfmt
//! - `lint`: Run clippy with all targets
//! - `test`: Run all tests
//! - `bench`: Run the calculator benchmarks
//! - `build`: Build release binary
//! - `clean`: Clean build artifacts
//! - `doc`: Generate documentation

// xtask is a build tool - printing to stderr is expected
#![allow(clippy::print_stderr)]

use std::process::Command;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};

/// Build automation for pokedex
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for pokedex")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks (fmt --check, clippy, test)
    Check,
    /// Format code with rustfmt
    Fmt {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy lints
    Lint {
        /// Automatically fix lint warnings
        #[arg(long)]
        fix: bool,
    },
    /// Run all tests
    Test {
        /// Run tests with release optimizations
        #[arg(long)]
        release: bool,
    },
    /// Run the criterion benchmarks
    Bench,
    /// Build release binary
    Build {
        /// Build in debug mode
        #[arg(long)]
        debug: bool,
    },
    /// Clean build artifacts
    Clean,
    /// Generate documentation
    Doc {
        /// Open in browser after building
        #[arg(long)]
        open: bool,
    },
}

/// Workspace root, one level above this crate.
fn workspace_root() -> Result<Utf8PathBuf> {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Utf8Path::to_path_buf)
        .context("xtask manifest has no parent directory")
}

/// Runs `cargo <args>` in the workspace root, failing on a non-zero exit.
fn cargo(args: &[&str]) -> Result<()> {
    let root = workspace_root()?;
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_owned());

    eprintln!("$ cargo {}", args.join(" "));
    let status = Command::new(&cargo)
        .args(args)
        .current_dir(root.as_std_path())
        .status()
        .with_context(|| format!("failed to run {cargo}"))?;

    if !status.success() {
        bail!("cargo {} failed with {status}", args.join(" "));
    }
    Ok(())
}

fn fmt_args(check: bool) -> Vec<&'static str> {
    let mut args = vec!["fmt", "--all"];
    if check {
        args.extend(["--", "--check"]);
    }
    args
}

fn lint_args(fix: bool) -> Vec<&'static str> {
    let mut args = vec!["clippy", "--workspace", "--all-targets"];
    if fix {
        args.extend(["--fix", "--allow-dirty"]);
    }
    args.extend(["--", "-D", "warnings"]);
    args
}

fn test_args(release: bool) -> Vec<&'static str> {
    let mut args = vec!["test", "--workspace"];
    if release {
        args.push("--release");
    }
    args
}

fn build_args(debug: bool) -> Vec<&'static str> {
    let mut args = vec!["build", "--package", "dex-cli"];
    if !debug {
        args.push("--release");
    }
    args
}

fn doc_args(open: bool) -> Vec<&'static str> {
    let mut args = vec!["doc", "--workspace", "--no-deps"];
    if open {
        args.push("--open");
    }
    args
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo(&fmt_args(true))?;
            cargo(&lint_args(false))?;
            cargo(&test_args(false))?;
        }
        Commands::Fmt { check } => cargo(&fmt_args(check))?,
        Commands::Lint { fix } => cargo(&lint_args(fix))?,
        Commands::Test { release } => cargo(&test_args(release))?,
        Commands::Bench => cargo(&["bench", "--package", "dex-core"])?,
        Commands::Build { debug } => cargo(&build_args(debug))?,
        Commands::Clean => cargo(&["clean"])?,
        Commands::Doc { open } => cargo(&doc_args(open))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_args() {
        assert_eq!(fmt_args(false), ["fmt", "--all"]);
        assert_eq!(fmt_args(true), ["fmt", "--all", "--", "--check"]);
    }

    #[test]
    fn test_lint_args_fix() {
        assert_eq!(
            lint_args(true),
            ["clippy", "--workspace", "--all-targets", "--fix", "--allow-dirty", "--", "-D", "warnings"]
        );
    }

    #[test]
    fn test_build_args_default_release() {
        assert!(build_args(false).contains(&"--release"));
        assert!(!build_args(true).contains(&"--release"));
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        let root = workspace_root().unwrap();
        assert!(root.join("Cargo.toml").exists());
    }
}
