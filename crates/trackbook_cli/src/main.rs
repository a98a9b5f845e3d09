//! CLI inspection entry point.
//!
//! # Responsibility
//! - Verify `trackbook_core` linkage (`ping`).
//! - Print the job board and knowledge summary from the configured store.
//!
//! Read-only: nothing here writes to the store.

use std::process::ExitCode;
use trackbook_core::db::open_db;
use trackbook_core::query::format::{format_applied_date, notes_preview};
use trackbook_core::query::knowledge_filter::group_by_category;
use trackbook_core::{
    init_logging, CoreConfig, JobFilter, JobService, KnowledgeService, KvJobRepository,
    KvKnowledgeRepository, SqliteStore, StatusFilter,
};

const USAGE: &str = "usage: trackbook_cli [ping | board [STATUS] | knowledge]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("ping") => {
            println!("trackbook_core ping={}", trackbook_core::ping());
            println!("trackbook_core version={}", trackbook_core::core_version());
            ExitCode::SUCCESS
        }
        Some("board") => report(|config| print_board(config, args.get(1).map(String::as_str))),
        Some("knowledge") => report(print_knowledge),
        Some(_) => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn report(run: impl FnOnce(&CoreConfig) -> Result<(), String>) -> ExitCode {
    let outcome = CoreConfig::load()
        .map_err(|err| err.to_string())
        .and_then(|config| {
            if let Some(log_dir) = config.log_dir.as_deref() {
                init_logging(&config.log_level, log_dir).map_err(|err| err.to_string())?;
            }
            run(&config)
        });
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn print_board(config: &CoreConfig, status: Option<&str>) -> Result<(), String> {
    ensure_db_dir(config)?;
    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let store = SqliteStore::try_new(&conn).map_err(|err| err.to_string())?;
    let service = JobService::new(KvJobRepository::new(&store));

    let stats = service.stats().map_err(|err| err.user_message())?;
    println!(
        "total={} applied={} interviewing={} offering={}",
        stats.total, stats.applied, stats.interviewing, stats.offering
    );

    let filter = JobFilter {
        status: status.map(StatusFilter::from).unwrap_or_default(),
        ..JobFilter::default()
    };
    for job in service.board(&filter).map_err(|err| err.user_message())? {
        println!(
            "[{}] {} - {} ({})",
            job.status,
            job.company_name,
            job.position,
            format_applied_date(job.applied_date)
        );
        for line in notes_preview(job.notes.as_deref()).lines() {
            println!("    {line}");
        }
    }
    Ok(())
}

fn print_knowledge(config: &CoreConfig) -> Result<(), String> {
    ensure_db_dir(config)?;
    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let store = SqliteStore::try_new(&conn).map_err(|err| err.to_string())?;
    let service = KnowledgeService::new(KvKnowledgeRepository::new(&store));

    let entries = service.list().map_err(|err| err.user_message())?;
    for (category, items) in group_by_category(&entries) {
        if items.is_empty() {
            continue;
        }
        println!("{category} ({})", items.len());
        for knowledge in items {
            println!("  - {} {}", knowledge.title, knowledge.url);
        }
    }
    Ok(())
}

fn ensure_db_dir(config: &CoreConfig) -> Result<(), String> {
    match config.db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create `{}`: {err}", parent.display())),
        _ => Ok(()),
    }
}
