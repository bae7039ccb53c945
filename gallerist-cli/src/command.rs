//! Command parsing for the interactive prompt.

/// One parsed user command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Navigate to a one-based page.
    Page(u32),
    /// Navigate to the next page.
    Next,
    /// Navigate to the previous page.
    Prev,
    /// Replace the current page's selection with these 1-based row ordinals.
    Select(Vec<usize>),
    /// Select the first N rows of the current page.
    First(i64),
    /// Clear the current page's selection.
    Clear,
    /// Show command help.
    Help,
    /// Exit the browser.
    Quit,
}

pub const USAGE: &str = "commands:
  page N | p N     go to page N
  next | n         next page
  prev | b         previous page
  sel I,J,K        select rows I,J,K on this page (replaces the page's selection)
  first N | f N    select the first N rows of this page
  clear            clear this page's selection
  help | h         show this help
  quit | q         exit";

/// Parses one input line. Errors are user-facing messages.
pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(USAGE.to_string());
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments\n{USAGE}"));
    }

    match (head, arg) {
        ("page" | "p", Some(n)) => n
            .parse::<u32>()
            .map(Command::Page)
            .map_err(|_| format!("not a page number: {n}")),
        ("next" | "n", None) => Ok(Command::Next),
        ("prev" | "b", None) => Ok(Command::Prev),
        ("sel" | "s", Some(list)) => parse_rows(list).map(Command::Select),
        ("sel" | "s", None) => Ok(Command::Select(Vec::new())),
        ("first" | "f", Some(n)) => n
            .parse::<i64>()
            .map(Command::First)
            .map_err(|_| format!("not a count: {n}")),
        ("page" | "p", None) => Err("page needs a number".to_string()),
        ("first" | "f", None) => Err("first needs a count".to_string()),
        ("clear", None) => Ok(Command::Clear),
        ("help" | "h", None) => Ok(Command::Help),
        ("quit" | "q" | "exit", None) => Ok(Command::Quit),
        _ => Err(format!("unknown command: {line}\n{USAGE}")),
    }
}

/// Parses a comma-separated list of 1-based row ordinals, collapsing
/// duplicates while keeping first-seen order.
fn parse_rows(list: &str) -> Result<Vec<usize>, String> {
    let mut rows = Vec::new();
    for part in list.split(',').filter(|p| !p.is_empty()) {
        let row: usize = part
            .trim()
            .parse()
            .map_err(|_| format!("not a row number: {part}"))?;
        if row == 0 {
            return Err("rows are numbered from 1".to_string());
        }
        if !rows.contains(&row) {
            rows.push(row);
        }
    }
    Ok(rows)
}
