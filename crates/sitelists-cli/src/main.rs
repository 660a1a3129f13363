use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use sitelists_core::genre::{GenreDef, GenreStore};
use sitelists_core::pipeline::{self, Pipeline};
use sitelists_core::store::JsonLinesStore;
use sitelists_core::{Config, Result};

mod args;
mod logging;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let base_dir = cli.base_dir.unwrap_or_else(|| PathBuf::from("."));
    let config_file = cli.config;
    let date = cli.date;

    let result = match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            handle_build(&base_dir, config_file.as_deref(), date.as_deref())
        }
        Commands::PrepareVendor => {
            handle_prepare_vendor(&base_dir, config_file.as_deref(), date.as_deref())
        }
        Commands::CheckExternal => {
            handle_check_external(&base_dir, config_file.as_deref(), date.as_deref())
        }
        Commands::Genres { name } => {
            handle_genres(&base_dir, config_file.as_deref(), name.as_deref())
        }
        Commands::Config { action } => handle_config(action, &base_dir, config_file.as_deref()),
        Commands::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn load_config(base_dir: &Path, config_file: Option<&Path>) -> Result<Config> {
    match config_file {
        Some(path) => Config::load_from(path),
        None => Config::load(base_dir),
    }
}

fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(value) => pipeline::parse_date(value),
        None => Ok(Local::now().date_naive()),
    }
}

fn handle_build(base_dir: &Path, config_file: Option<&Path>, date: Option<&str>) -> Result<()> {
    let config = load_config(base_dir, config_file)?;
    let date = resolve_date(date)?;
    let store = JsonLinesStore::open(&config.paths.resolve(base_dir).store)?;

    let report = Pipeline::new(&config, base_dir, &store).run(date)?;

    println!();
    println!("{} reference list {}", "Build finished:".green().bold(), date);
    println!();
    for vendor in &report.vendor {
        println!(
            "  {:<12} {} of {} vendor domains kept",
            vendor.category.cyan(),
            vendor.written,
            vendor.candidates
        );
    }
    for (name, count) in &report.genres {
        println!("  {:<12} {} domains", name.cyan().bold(), count);
    }
    println!();
    for path in &report.outputs {
        println!("  {} {}", "Wrote:".green(), path.display());
    }
    println!();
    Ok(())
}

fn handle_prepare_vendor(
    base_dir: &Path,
    config_file: Option<&Path>,
    date: Option<&str>,
) -> Result<()> {
    let config = load_config(base_dir, config_file)?;
    let date = resolve_date(date)?;
    let reports = pipeline::prepare_vendor_lists(&config.paths.resolve(base_dir), date)?;

    if reports.is_empty() {
        println!("No vendor lists found.");
        return Ok(());
    }

    println!();
    for report in reports {
        println!(
            "  {} {} ({} of {} kept)",
            "Cached:".green(),
            report.cache_path.display(),
            report.written,
            report.candidates
        );
    }
    println!();
    Ok(())
}

fn handle_check_external(
    base_dir: &Path,
    config_file: Option<&Path>,
    date: Option<&str>,
) -> Result<()> {
    let config = load_config(base_dir, config_file)?;
    let date = resolve_date(date)?;
    let report = pipeline::check_external(&config.paths.resolve(base_dir), date)?;

    println!();
    println!(
        "{} {} of {} entries found in the reference list",
        "Checked:".green().bold(),
        report.matched,
        report.scanned
    );
    println!("  {} {}", "Wrote:".green(), report.results_path.display());
    println!();
    Ok(())
}

fn handle_genres(base_dir: &Path, config_file: Option<&Path>, name: Option<&str>) -> Result<()> {
    let config = load_config(base_dir, config_file)?;
    let store = GenreStore::builtin().with_config(&config.genres);

    println!();
    match name {
        Some(name) => print_genre(store.require(name)?),
        None => {
            println!("Genres (run order):");
            println!();
            for genre in store.all() {
                print_genre(genre);
            }
        }
    }
    Ok(())
}

fn print_genre(genre: &GenreDef) {
    println!("  {}", genre.name.cyan().bold());
    if !genre.description.is_empty() {
        println!("    {}", genre.description);
    }
    for source in &genre.sources {
        println!("    - {}", source.label());
    }
    if !genre.false_positives.is_empty() {
        println!(
            "    {} {}",
            "excluded:".yellow(),
            genre.false_positives.join(", ")
        );
    }
    println!();
}

fn handle_config(action: ConfigAction, base_dir: &Path, config_file: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Config:".green(), path.display());
        }
        ConfigAction::Path => {
            let path = match config_file {
                Some(path) => path.to_path_buf(),
                None => Config::path(base_dir),
            };
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = load_config(base_dir, config_file)?;
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "sitelists", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_build() {
        let cli = Cli::try_parse_from(["sitelists"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sitelists",
            "prepare-vendor",
            "-vv",
            "--date",
            "2015-04-22",
            "--base-dir",
            "/data",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::PrepareVendor)));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.date.as_deref(), Some("2015-04-22"));
        assert_eq!(cli.base_dir, Some(PathBuf::from("/data")));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sitelists", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_resolve_date() {
        assert_eq!(
            resolve_date(Some("2015-04-22")).unwrap(),
            NaiveDate::from_ymd_opt(2015, 4, 22).unwrap()
        );
        assert_eq!(resolve_date(Some("yesterday")).unwrap_err().exit_code(), 5);
    }

    #[test]
    fn test_base_dir_reads_env() {
        let cmd = Cli::command();
        let base_dir = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "base_dir")
            .unwrap();
        assert_eq!(base_dir.get_env(), Some(std::ffi::OsStr::new("SITELISTS_BASE")));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
