//! `reeldiff run` / `reeldiff validate`: config-driven catalog diff.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use reeldiff_recon::load::{load_imdb_csv, load_letterboxd_csv, load_uri_mapping_csv};
use reeldiff_recon::{DiffConfig, DiffInput, DiffReport, ReconError};

use crate::exit_codes::{recon_exit_code, EXIT_DIFFERENCES, EXIT_INVALID_CONFIG, EXIT_RUNTIME};
use crate::markdown::{self, ReportSources};
use crate::CliError;

pub struct RunArgs {
    pub config: PathBuf,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
    pub strict: bool,
}

fn runtime_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_RUNTIME, message: msg.into(), hint: None }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| runtime_err(format!("cannot read {}: {e}", path.display())))
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| runtime_err(format!("cannot create {}: {e}", parent.display())))?;
    }
    std::fs::write(path, contents)
        .map_err(|e| runtime_err(format!("cannot write {}: {e}", path.display())))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn load_config(config_path: &Path) -> Result<DiffConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| runtime_err(format!("cannot read config: {e}")))?;
    DiffConfig::from_toml(&config_str).map_err(|e| CliError {
        code: EXIT_INVALID_CONFIG,
        message: e.to_string(),
        hint: Some(format!("check {}", config_path.display())),
    })
}

fn recon_err(e: ReconError, section: &str) -> CliError {
    let hint = match (&e, section) {
        (ReconError::MissingColumn { .. }, "mapping") => {
            Some("the mapping CSV needs letterboxd_uri and imdb_id headers".to_string())
        }
        (ReconError::MissingColumn { .. }, _) => {
            Some(format!("column names can be overridden under [{section}.columns]"))
        }
        _ => None,
    };
    CliError { code: recon_exit_code(&e), message: e.to_string(), hint }
}

/// Read the exports named by `config`, resolving paths against `base_dir`.
fn load_input(config: &DiffConfig, base_dir: &Path) -> Result<DiffInput, CliError> {
    let imdb_path = base_dir.join(&config.imdb.file);
    let imdb = load_imdb_csv(&read_file(&imdb_path)?, &config.imdb)
        .map_err(|e| recon_err(e, "imdb"))?;

    let letterboxd_path = base_dir.join(&config.letterboxd.file);
    let letterboxd = load_letterboxd_csv(&read_file(&letterboxd_path)?, &config.letterboxd)
        .map_err(|e| recon_err(e, "letterboxd"))?;

    let uri_mapping = match config.mapping {
        Some(ref mapping) => {
            let path = base_dir.join(&mapping.file);
            load_uri_mapping_csv(&read_file(&path)?).map_err(|e| recon_err(e, "mapping"))?
        }
        None => HashMap::new(),
    };

    Ok(DiffInput { imdb, letterboxd, uri_mapping })
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = load_config(&args.config)?;

    // Resolve file paths relative to config file's directory
    let base_dir = args.config.parent().unwrap_or_else(|| Path::new("."));

    tracing::info!(config = %args.config.display(), name = %config.name, "running diff");
    let input = load_input(&config, base_dir)?;

    let now = Utc::now();
    let report = reeldiff_recon::engine::run_at(input, now);

    let json_str = report
        .to_json_pretty()
        .map_err(|e| runtime_err(format!("JSON serialization error: {e}")))?;

    // Flags win over [output]; config paths are relative to the config file.
    let json_path = args
        .output
        .or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    let markdown_path = args
        .markdown
        .or_else(|| config.output.markdown.as_ref().map(|p| base_dir.join(p)));

    if let Some(ref path) = json_path {
        write_file(path, &json_str)?;
    }

    if let Some(ref path) = markdown_path {
        let sources = ReportSources {
            imdb: &config.imdb.file,
            letterboxd: &config.letterboxd.file,
            mapping: config.mapping.as_ref().map(|m| m.file.as_str()),
        };
        write_file(path, &markdown::render(&report, &sources, now.date_naive()))?;
    }

    if args.json {
        println!("{json_str}");
    }

    print_summary(&config.name, &report);

    let s = &report.stats;
    if args.strict && (s.imdb_only > 0 || s.letterboxd_only > 0) {
        return Err(CliError {
            code: EXIT_DIFFERENCES,
            message: "differences found".into(),
            hint: None,
        });
    }

    Ok(())
}

/// Human summary to stderr.
fn print_summary(name: &str, report: &DiffReport) {
    let s = &report.stats;
    eprintln!(
        "{name}: {} IMDb-only ({} with suggestions), {} Letterboxd-only ({} with suggestions), {} resolved by title+year",
        s.imdb_only,
        s.imdb_only_with_fuzzy,
        s.letterboxd_only,
        s.letterboxd_only_with_fuzzy,
        s.resolved_title_year,
    );
    if report.meta.mapped_ids > 0 {
        eprintln!("mapping: {} IMDb IDs backfilled", report.meta.mapped_ids);
    }
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "valid: '{}' ({} vs {}{})",
        config.name,
        config.imdb.file,
        config.letterboxd.file,
        match config.mapping {
            Some(ref m) => format!(", mapping {}", m.file),
            None => String::new(),
        },
    );
    Ok(())
}
