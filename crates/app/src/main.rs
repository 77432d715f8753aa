//! MindSort CLI: dump thoughts, triage them, reframe them, act on them.
//!
//! The process entry point owns the lifecycles the pipelines depend on:
//! it builds the generation client once from settings and passes it into
//! each pipeline call, and it opens the store that holds both persisted
//! collections.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use providers::Generator;
use services::{paths, Store};
use shared::api::{ErrorResponse, ReframeRequest, SortRequest};
use shared::settings::AppSettings;
use shared::Error;
use std::fs;
use std::process::ExitCode;

const USAGE: &str = "mindsort - thought triage and reframing

Usage:
  mindsort sort <text>                 Split a brain dump into categorized thoughts
  mindsort reframe <text> [--id <id>]  Compassionately reframe one thought
  mindsort thoughts                    List triaged thoughts
  mindsort tasks                       List tasks
  mindsort categories                  Show the category taxonomy
  mindsort act <thought-id>            Turn a thought into a task
  mindsort let-go <thought-id>         Let a thought go
  mindsort complete <task-id>          Toggle a task's completion
  mindsort edit-task <task-id> [--title <t>] [--due <YYYY-MM-DD>]
  mindsort delete-task <task-id>       Delete a task
";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<Error>() {
                Some(err) => err.to_string(),
                None => format!("{e:#}"),
            };
            let body = serde_json::to_string(&ErrorResponse::new(message))
                .unwrap_or_else(|_| "{\"error\":\"internal error\"}".to_string());
            eprintln!("{body}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> Result<()> {
    let settings = load_settings();
    let store = Store::open(
        settings
            .data_dir
            .clone()
            .unwrap_or_else(paths::data_dir),
    );

    let mut args = args.into_iter();
    let command = args.next().unwrap_or_default();
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "sort" => {
            let text = rest.join(" ");
            let generator = providers::router::build_generator(&settings.model)?;
            sort(&*generator, &store, text).await
        }
        "reframe" => {
            let (text, id) = split_flag(rest, "--id");
            let generator = providers::router::build_generator(&settings.model)?;
            reframe(&*generator, &store, text, id).await
        }
        "thoughts" => {
            let mut thoughts = store.thoughts();
            for thought in &mut thoughts {
                thought.time_ago = shared::types::time_ago(thought.created_at);
            }
            print_json(&thoughts)
        }
        "tasks" => {
            print_json(&store.tasks())
        }
        "categories" => {
            let taxonomy: Vec<_> = shared::Category::all()
                .iter()
                .map(|cat| {
                    serde_json::json!({
                        "category": cat,
                        "label": cat.display_name(),
                        "description": cat.description(),
                        "color": cat.color_hex(),
                        "insight": cat.insight(),
                    })
                })
                .collect();
            print_json(&taxonomy)
        }
        "act" => {
            let id = single_arg(rest, "act <thought-id>")?;
            let thought = store
                .find_thought(&id)
                .ok_or_else(|| anyhow!("no thought with id {id}"))?;
            let task = store.turn_into_action(&thought);
            print_json(&task)
        }
        "let-go" => {
            let id = single_arg(rest, "let-go <thought-id>")?;
            if !store.let_go(&id) {
                return Err(anyhow!("no thought with id {id}"));
            }
            Ok(())
        }
        "complete" => {
            let id = single_arg(rest, "complete <task-id>")?;
            if !store.toggle_complete(&id) {
                return Err(anyhow!("no task with id {id}"));
            }
            print_json(&store.find_task(&id))
        }
        "edit-task" => edit_task(&store, rest),
        "delete-task" => {
            let id = single_arg(rest, "delete-task <task-id>")?;
            if !store.delete_task(&id) {
                return Err(anyhow!("no task with id {id}"));
            }
            Ok(())
        }
        "" | "help" | "--help" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}\n\n{USAGE}")),
    }
}

async fn sort(generator: &dyn Generator, store: &Store, text: String) -> Result<()> {
    let response = triage::sort_thoughts(generator, &SortRequest { text }).await?;
    store.ingest_thoughts(response.thoughts.clone());
    print_json(&response)
}

async fn reframe(
    generator: &dyn Generator,
    store: &Store,
    thought: String,
    id: Option<String>,
) -> Result<()> {
    let request = ReframeRequest { thought, id };
    let keep = request.id.is_some();
    let response = triage::reframe_thought(generator, &request).await?;
    if keep {
        store.upsert_thought(response.thought.clone());
    }
    print_json(&response)
}

fn edit_task(store: &Store, rest: Vec<String>) -> Result<()> {
    let mut id = None;
    let mut title = None;
    let mut due = None;
    let mut iter = rest.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--title" {
            title = iter.next();
        } else if arg == "--due" {
            due = iter.next();
        } else if id.is_none() {
            id = Some(arg);
        } else {
            return Err(anyhow!("unexpected argument: {arg}"));
        }
    }
    let id = id.ok_or_else(|| anyhow!("usage: edit-task <task-id> [--title <t>] [--due <YYYY-MM-DD>]"))?;
    let due_date = due.map(|raw| parse_due_date(&raw)).transpose()?;

    if !store.edit_task(&id, title, due_date) {
        return Err(anyhow!("no task with id {id}"));
    }
    print_json(&store.find_task(&id))
}

/// Interpret a plain date as noon local time, so calendar-day logic
/// matches what the user meant regardless of time zone.
fn parse_due_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw}, expected YYYY-MM-DD"))?;
    let noon = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| anyhow!("invalid date: {raw}"))?;
    let local = Local
        .from_local_datetime(&noon)
        .single()
        .ok_or_else(|| anyhow!("ambiguous local time for {raw}"))?;
    Ok(local.with_timezone(&Utc))
}

/// Split off a trailing `--flag value` pair; everything else joins into
/// the free-text argument.
fn split_flag(args: Vec<String>, flag: &str) -> (String, Option<String>) {
    let mut text_parts = Vec::new();
    let mut value = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            value = iter.next();
        } else {
            text_parts.push(arg);
        }
    }
    (text_parts.join(" "), value)
}

fn single_arg(rest: Vec<String>, usage: &str) -> Result<String> {
    match rest.as_slice() {
        [id] => Ok(id.clone()),
        _ => Err(anyhow!("usage: mindsort {usage}")),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Settings are best-effort: a missing or unreadable file yields
/// defaults, same as a fresh install.
fn load_settings() -> AppSettings {
    let path = paths::settings_file();
    match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("could not parse {:?}, using defaults: {}", path, e);
                AppSettings::default()
            }
        },
        Err(_) => AppSettings::default(),
    }
}
