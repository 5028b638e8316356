//! Command implementations for the bj CLI.
//!
//! Each function performs one subcommand against the store and returns
//! the text to print. `main` owns process concerns (exit codes, the
//! action log); nothing here writes to stdout directly.

use std::fs;
use std::io::Read;
use std::path::Path;

use crossterm::style::{Color, Stylize, style};

use crate::models::resolve::{Choice, parse_choice, parse_signifier, parse_status};
use crate::models::{self, Item, Record, Signifier, Status};
use crate::render::{RenderOptions, render_line, render_tree};
use crate::storage::{Order, Query, Store};
use crate::{Error, Result, action_log, config, when};

/// Render a titled list of item trees, or the empty message.
fn render_items(
    store: &Store,
    items: &[Item],
    title: &str,
    empty: &str,
    options: &RenderOptions,
) -> Result<String> {
    if items.is_empty() {
        return Ok(empty.to_string());
    }
    let mut out = vec![format!("{}:", style(title).underlined())];
    for item in items {
        out.push(render_tree(item, store, options)?);
    }
    Ok(out.join("\n"))
}

/// Add a new item.
pub fn add(
    store: &mut Store,
    description: &str,
    status: &str,
    signifier: &str,
    parent: Option<i64>,
    time: Option<&str>,
    verbose: bool,
) -> Result<String> {
    let status = parse_status(status)?;
    let signifier = parse_signifier(signifier)?;
    let scheduled_time = match time {
        Some(s) => Some(
            when::parse(s).ok_or_else(|| Error::InvalidInput(format!("unrecognized time: {s}")))?,
        ),
        None => None,
    };

    let mut item = Item::new(description, status)?;
    item.signifier = signifier;
    item.scheduled_time = scheduled_time;
    item.parent_id = parent;
    let item = store.insert(&item)?;

    Ok(format!("{}\nAdded item", render_line(&item, verbose)))
}

/// Show all items, newest first, without children.
pub fn list_all(store: &Store, state: &str, num_items: usize, verbose: bool) -> Result<String> {
    let mut query = Query {
        limit: Some(num_items),
        ..Default::default()
    };
    let (title, empty) = match parse_choice(state)? {
        Some(Choice::Status(status)) => {
            query.status = Some(status);
            (format!("All {status}"), format!("No {status}"))
        }
        Some(Choice::Signifier(signifier)) => {
            query.signifier = Some(signifier);
            (format!("All {signifier}"), format!("No {signifier}"))
        }
        None => ("All items".to_string(), "No items".to_string()),
    };
    let items = store.find(&query)?;
    let options = RenderOptions::new(verbose).without_children();
    render_items(store, &items, &title, &empty, &options)
}

/// Show items scheduled after now, soonest first.
pub fn list_upcoming(
    store: &Store,
    state: &str,
    num_items: usize,
    verbose: bool,
) -> Result<String> {
    let mut query = Query {
        scheduled_after: Some(models::now()),
        order: Order::TimeAsc,
        limit: Some(num_items),
        ..Default::default()
    };
    let (title, empty) = match parse_choice(state)? {
        Some(Choice::Status(status)) => {
            query.status = Some(status);
            (format!("Upcoming {status}"), format!("No upcoming {status}"))
        }
        Some(Choice::Signifier(signifier)) => {
            query.signifier = Some(signifier);
            (
                format!("Upcoming {signifier}"),
                format!("No upcoming {signifier}"),
            )
        }
        None => (
            "Upcoming items".to_string(),
            "No upcoming items".to_string(),
        ),
    };
    let items = store.find(&query)?;
    render_items(store, &items, &title, &empty, &RenderOptions::new(verbose))
}

/// Show priority items, hiding completed children.
pub fn list_pri(store: &Store, num_items: usize, verbose: bool) -> Result<String> {
    let query = Query {
        signifier: Some(Signifier::Priority),
        order: Order::TimeAsc,
        limit: Some(num_items),
        ..Default::default()
    };
    let items = store.find(&query)?;
    let options = RenderOptions::new(verbose).hide_complete_children();
    render_items(
        store,
        &items,
        "Priority items",
        "No priority items",
        &options,
    )
}

/// Show completed items, most recently updated first.
pub fn list_complete(store: &Store, num_items: usize, verbose: bool) -> Result<String> {
    let query = Query {
        status: Some(Status::Complete),
        order: Order::UpdatedDesc,
        limit: Some(num_items),
        ..Default::default()
    };
    let items = store.find(&query)?;
    render_items(
        store,
        &items,
        "Completed items",
        "All past items are completed",
        &RenderOptions::new(verbose),
    )
}

/// Update an item's state or signifier from a free-form token.
pub fn mark(store: &mut Store, token: &str, id: i64, verbose: bool) -> Result<String> {
    store.get(id)?;
    let message = match parse_choice(token)? {
        Some(Choice::Status(status)) => {
            store.set_status(&[id], status)?;
            format!("Marked item {id} as {status}")
        }
        Some(Choice::Signifier(signifier)) => {
            store.set_signifier(id, Some(signifier))?;
            format!("Marked item {id} as {signifier}")
        }
        None => {
            store.set_signifier(id, None)?;
            format!("Cleared signifier for item {id}")
        }
    };
    let item = store.get(id)?;
    let tree = render_tree(&item, store, &RenderOptions::new(verbose))?;
    Ok(format!("{tree}\n{message}"))
}

/// Mark every past-scheduled, non-complete item as complete.
pub fn complete_past(store: &mut Store) -> Result<String> {
    let query = Query {
        scheduled_before: Some(models::now()),
        exclude_status: Some(Status::Complete),
        ..Default::default()
    };
    let items = store.find(&query)?;
    if items.is_empty() {
        return Ok("All past items are complete".to_string());
    }
    let ids: Vec<i64> = items.iter().filter_map(|i| i.id).collect();
    let changed = store.set_status(&ids, Status::Complete)?;
    Ok(format!("Completed {changed} items"))
}

/// Search item descriptions for a substring.
pub fn query(store: &Store, substring: &str, show_complete: bool, verbose: bool) -> Result<String> {
    let mut query = Query {
        description_contains: Some(substring.to_string()),
        order: Order::UpdatedDesc,
        ..Default::default()
    };
    if !show_complete {
        query.exclude_status = Some(Status::Complete);
    }
    let items = store.find(&query)?;
    render_items(
        store,
        &items,
        "Matching items",
        "No matching items found",
        &RenderOptions::new(verbose),
    )
}

/// Delete an item and its subtree, showing what was removed.
pub fn delete(store: &mut Store, id: i64, verbose: bool) -> Result<String> {
    let item = store.get(id)?;
    let tree = render_tree(&item, store, &RenderOptions::new(verbose))?;
    store.delete(id)?;
    Ok(format!("{tree}\nDeleted item {id}"))
}

/// Export all items as a JSON array of records.
pub fn export(store: &Store, file: &str) -> Result<String> {
    let records: Vec<Record> = store.all()?.iter().map(Item::to_record).collect();
    let json = serde_json::to_string_pretty(&records)?;
    match file {
        "-" => Ok(json),
        path => {
            fs::write(path, json + "\n")?;
            Ok(format!("Exported {} items to {path}", records.len()))
        }
    }
}

/// Import items from a JSON array of records.
pub fn import(store: &mut Store, file: &str) -> Result<String> {
    let data = match file {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        path => fs::read_to_string(path)?,
    };
    let records: Vec<Record> = serde_json::from_str(&data)?;
    let mut count = 0;
    for record in &records {
        store.insert(&Item::from_record(record)?)?;
        count += 1;
    }
    Ok(format!("Added {count} items"))
}

/// Annotation legend and current configuration.
pub fn info() -> String {
    let mut lines = vec![format!(
        "bj {} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUJO_GIT_COMMIT"),
        env!("BUJO_BUILD_TIMESTAMP"),
    )];

    lines.push(String::new());
    lines.push(format!("{}", style("States").underlined()));
    for status in Status::all() {
        lines.push(format!(
            "{} {}",
            status.symbol(),
            style(status.value()).with(status.color())
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", style("Signifiers").underlined()));
    for signifier in Signifier::all() {
        let value = if *signifier == Signifier::Priority {
            style(signifier.value()).bold().to_string()
        } else {
            signifier.value().to_string()
        };
        lines.push(format!("{} {}", signifier.symbol(), value));
    }

    lines.push(String::new());
    lines.push(format!("{}", style("Verbose mode").underlined()));
    let env_var = style(config::VERBOSE_ENV).with(Color::Green);
    if config::verbose_default() {
        lines.push(format!(
            "Verbose mode is {}.",
            style("ENABLED").with(Color::Green)
        ));
        lines.push(format!(
            "Disable it by unsetting the {env_var} environment variable:"
        ));
        lines.push(format!("  unset {}", config::VERBOSE_ENV));
    } else {
        lines.push(format!(
            "Verbose mode is {}.",
            style("DISABLED").with(Color::Red)
        ));
        lines.push(format!(
            "Enable it by setting the {env_var} environment variable:"
        ));
        lines.push(format!("  export {}=1", config::VERBOSE_ENV));
    }

    lines.join("\n")
}

/// Recent command history from the action log.
pub fn log(root: &Path, num_entries: usize) -> Result<String> {
    let entries = action_log::recent(root, num_entries)?;
    if entries.is_empty() {
        return Ok("No logged commands".to_string());
    }
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            let outcome = if entry.success {
                "ok".to_string()
            } else {
                format!(
                    "failed: {}",
                    entry.error.as_deref().unwrap_or("unknown error")
                )
            };
            format!(
                "{} {} ({} ms) {}",
                entry.timestamp, entry.command, entry.duration_ms, outcome
            )
        })
        .collect();
    Ok(lines.join("\n"))
}
