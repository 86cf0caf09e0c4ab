//! CLI entrypoint for estatedesk
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use estatedesk_application::{
    CatalogUseCase, DebouncedSearch, DocumentsUseCase, Notifier, PropertyActions, SearchOutcome,
    SubmitWizardUseCase,
};
use estatedesk_domain::DocumentId;
use estatedesk_infrastructure::{ConfigLoader, FileConfig, HttpPropertyActions, JsonlSubmissionLog};
use estatedesk_presentation::{
    Cli, Command, ConsoleFormatter, ConsoleNotifier, DocumentsCommand, OutputConfig, ScriptError,
    ScriptRunner, SimpleNotifier, WizardScript,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate()?;

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting estatedesk against {}", config.api.base_url);

    let output = OutputConfig {
        color: config.output.color && !cli.no_color,
        currency_symbol: config.output.currency_symbol.clone(),
        show_progress: !cli.quiet,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    // === Dependency Injection ===
    let actions: Arc<dyn PropertyActions> = Arc::new(HttpPropertyActions::new(
        config.api.base_url.clone(),
        config.api.timeout(),
    )?);
    let notifier: Box<dyn Notifier> = if output.show_progress {
        Box::new(ConsoleNotifier::new())
    } else {
        Box::new(SimpleNotifier)
    };

    match command {
        Command::Search { target, query } => {
            let search = DebouncedSearch::with_config(actions, target.into(), &config.behavior());
            match search.search(&query).await? {
                SearchOutcome::Hits(hits) => print!("{}", ConsoleFormatter::search_hits(&hits)),
                SearchOutcome::Skipped => print!(
                    "{}",
                    ConsoleFormatter::placeholder(&format!(
                        "Type at least {} characters to search",
                        config.search.min_query_chars.max(1)
                    ))
                ),
                SearchOutcome::Superseded => {}
            }
        }
        Command::Structure { project } => {
            let catalog = CatalogUseCase::new(actions);
            let project = catalog.find_project(&project).await?;
            let structure = catalog.structure(&project).await?;
            print!(
                "{}",
                ConsoleFormatter::structure(&project, &structure, &output.currency_symbol)
            );
        }
        Command::Availability { project } => {
            let catalog = CatalogUseCase::new(actions);
            let project = catalog.find_project(&project).await?;
            let matrix = catalog.availability(&project).await?;
            print!("{}", ConsoleFormatter::availability(&project, &matrix));
        }
        Command::Templates => {
            let templates = CatalogUseCase::new(actions).templates().await?;
            print!("{}", ConsoleFormatter::templates(&templates));
        }
        Command::Documents { action } => {
            let documents = DocumentsUseCase::new(actions);
            match &action {
                DocumentsCommand::List { .. } => {
                    let Ok(list) = documents.list(&action.filter(), notifier.as_ref()).await else {
                        return Ok(ExitCode::FAILURE);
                    };
                    if !list.is_empty() {
                        print!("{}", ConsoleFormatter::documents(&list));
                    }
                }
                DocumentsCommand::Delete { id } => {
                    if documents
                        .delete(DocumentId(*id), notifier.as_ref())
                        .await
                        .is_err()
                    {
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
        }
        Command::Wizard {
            script,
            dry_run,
            schedule,
        } => {
            return run_wizard(
                actions,
                &config,
                &output,
                notifier.as_ref(),
                &script,
                dry_run,
                schedule,
            )
            .await;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_wizard(
    actions: Arc<dyn PropertyActions>,
    config: &FileConfig,
    output: &OutputConfig,
    notifier: &dyn Notifier,
    path: &Path,
    dry_run: bool,
    show_schedule: bool,
) -> Result<ExitCode> {
    let script = WizardScript::load(path)?;
    let runner = ScriptRunner::new(actions.clone());

    let prepared = match runner.run(&script).await {
        Ok(prepared) => prepared,
        Err(ScriptError::Blocked {
            step,
            title,
            errors,
        }) => {
            eprintln!(
                "{} {} wizard stopped at step {} ({}):",
                "x".red().bold(),
                script.wizard,
                step,
                title
            );
            eprint!("{}", ConsoleFormatter::field_errors(&errors));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if output.show_progress {
        print!(
            "{}",
            ConsoleFormatter::progress(prepared.name(), &prepared.progress())
        );
    }
    if show_schedule {
        match (prepared.schedule(), prepared.lease()) {
            (Some(schedule), _) => print!(
                "{}",
                ConsoleFormatter::schedule(&schedule, &output.currency_symbol)
            ),
            (None, Some((months, rent))) => print!(
                "{}",
                ConsoleFormatter::lease(months, rent, &output.currency_symbol)
            ),
            (None, None) => print!(
                "{}",
                ConsoleFormatter::placeholder("No payment schedule for this wizard")
            ),
        }
    }

    let mut submit = SubmitWizardUseCase::new(actions);
    if let Some(log_path) = &config.logging.submissions {
        match JsonlSubmissionLog::new(log_path) {
            Some(log) => submit = submit.with_logger(Arc::new(log)),
            None => warn!("Submission log {} is not writable", log_path.display()),
        }
    }

    if dry_run {
        let submission = prepared.prepare(&submit)?;
        println!();
        print!("{}", ConsoleFormatter::submission(&submission));
        return Ok(ExitCode::SUCCESS);
    }

    match prepared.submit(&submit, notifier).await {
        Ok(receipt) => {
            if let Some(id) = receipt.id {
                info!("{} created record #{}", prepared.name(), id);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // the notifier already showed the toast
            debug!("Submission failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initialize logging based on verbosity level, optionally mirrored to a file.
fn init_logging(verbose: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Log file {} has no file name", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
