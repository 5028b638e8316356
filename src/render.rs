//! Colored, indented tree rendering of items.
//!
//! A rendered line is composed left to right: underlined id (persisted
//! items only), signifier symbol, status symbol, description colored by
//! status, and a dim scheduled time. Priority items render their
//! signifier/status/description block in bold. Children indent two
//! spaces per level.

use crossterm::style::{Stylize, style};

use crate::Result;
use crate::models::{Item, Signifier, Status, format_time};

/// Source of child items, resolved through the store by parent id.
/// Items never hold structural pointers to their children.
pub trait ChildSource {
    fn children_of(&self, parent_id: i64) -> Result<Vec<Item>>;
}

/// Rendering switches. `verbose` appends the full value string after
/// each symbol; callers thread the process-wide default through here.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Render children at all.
    pub children: bool,
    /// Render children whose status is complete. When false, a complete
    /// child's entire subtree is suppressed.
    pub complete_children: bool,
    /// Append full value strings after the symbols.
    pub verbose: bool,
}

impl RenderOptions {
    pub fn new(verbose: bool) -> Self {
        Self {
            children: true,
            complete_children: true,
            verbose,
        }
    }

    pub fn without_children(mut self) -> Self {
        self.children = false;
        self
    }

    pub fn hide_complete_children(mut self) -> Self {
        self.complete_children = false;
        self
    }
}

/// Render a single item as one line, without children.
pub fn render_line(item: &Item, verbose: bool) -> String {
    let mut status_symbol = item.status.symbol().to_string();
    if verbose {
        status_symbol = format!("{} ({})", status_symbol, item.status.value());
    }
    let description = style(item.description.as_str()).with(item.status.color());
    let mut line = format!("{status_symbol} {description}");

    if let Some(signifier) = item.signifier {
        let mut symbol = signifier.symbol().to_string();
        if verbose {
            symbol = format!("{} ({})", symbol, signifier.value());
        }
        line = format!("{symbol} {line}");
        if signifier == Signifier::Priority {
            line = style(line).bold().to_string();
        }
    }

    if let Some(time) = item.scheduled_time {
        line = format!("{} {}", line, style(format_time(time)).dim());
    }

    if let Some(id) = item.id {
        line = format!("{} {}", style(id).underlined(), line);
    }

    line
}

/// Render an item and, recursively, its children.
pub fn render_tree(
    item: &Item,
    source: &dyn ChildSource,
    options: &RenderOptions,
) -> Result<String> {
    let mut blocks = vec![render_line(item, options.verbose)];

    if options.children {
        if let Some(id) = item.id {
            for child in source.children_of(id)? {
                if !options.complete_children && child.status == Status::Complete {
                    continue;
                }
                let sub = render_tree(&child, source, options)?;
                let indented: Vec<String> =
                    sub.lines().map(|line| format!("  {line}")).collect();
                blocks.push(indented.join("\n"));
            }
        }
    }

    Ok(blocks.join("\n"))
}
