//! Quill entrypoint: a line-oriented shell over the editing engine.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::{Config, load_from};
use core_dict::{IndexOptions, SuggestionIndex};
use core_state::Workspace;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod command;
mod session;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill text engine shell")]
struct Args {
    /// Optional configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Log file written through a non-blocking appender. Filter with `RUST_LOG`.
    #[arg(long = "log-file", default_value = "quill.log")]
    pub log_file: PathBuf,
}

fn configure_logging(log_path: &Path) -> Result<Option<WorkerGuard>> {
    let dir = match log_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .context("log file path has no file name")?;
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Ok(Some(guard)),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => Ok(None),
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn build_workspace(config: &Config) -> Result<Workspace> {
    let effective = config.effective();
    let options = IndexOptions {
        max_suggestions: effective.suggest.max_results,
        min_learn_len: effective.suggest.min_learn_len,
        min_spell_len: effective.spell.min_word_len,
    };
    let seeds = config.seed_words()?;
    let vocabulary = Arc::new(SuggestionIndex::with_words(options, &seeds));
    info!(
        target: "runtime.startup",
        seed_words = seeds.len(),
        vocabulary = vocabulary.len(),
        history_depth = effective.history.max_depth,
        max_suggestions = options.max_suggestions,
        "workspace_ready"
    );
    Ok(Workspace::with_history_capacity(
        vocabulary,
        effective.history.max_depth,
    ))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(&args.log_file)?;
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config_override = args.config.is_some();
    let config = load_from(args.config)?;
    info!(
        target: "runtime.startup",
        config_override,
        config_found = config.source.is_some(),
        "config_resolved"
    );
    let workspace = build_workspace(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let handled = session::run(&workspace, stdin.lock(), stdout.lock())?;
    info!(target: "runtime", handled, documents = workspace.names().len(), "shutdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_uses_config_values() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("quill.toml");
        std::fs::write(
            &cfg_path,
            "[history]\nmax_depth = 2\n[suggest]\nmax_results = 1\n[dictionary]\nseed_words = [\"alpha\", \"alps\"]\n",
        )
        .unwrap();
        let config = load_from(Some(cfg_path)).unwrap();
        let ws = build_workspace(&config).unwrap();
        assert_eq!(ws.autocomplete("al"), vec!["alpha"]);
        let doc = ws.create_document("d", "").unwrap();
        assert_eq!(doc.lock().history().capacity(), 2);
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::parse_from(["quill"]);
        assert_eq!(args.log_file, PathBuf::from("quill.log"));
        assert!(args.config.is_none());
    }
}
