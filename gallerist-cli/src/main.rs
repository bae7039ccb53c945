//! Interactive terminal front-end for the artwork catalog browser.

mod command;
mod render;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use gallerist_lib::ArticClient;
use gallerist_lib::browser::{Browser, BrowserEvent, BrowserObserver};
use gallerist_lib::model::Artwork;
use log::warn;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::command::Command;

/// Holds the most recent user-facing notice from browser events until the
/// next redraw picks it up.
#[derive(Clone, Default)]
struct NoticeBoard {
    last: Arc<Mutex<Option<String>>>,
}

impl NoticeBoard {
    fn take(&self) -> Option<String> {
        self.last.lock().unwrap().take()
    }
}

impl BrowserObserver for NoticeBoard {
    fn notify(&self, event: &BrowserEvent) {
        let notice = match event {
            BrowserEvent::FetchFailed { page, message } => {
                Some(format!("could not load page {page}: {message}"))
            }
            BrowserEvent::BulkApplied { selected, .. } => {
                Some(format!("selected the first {selected} rows"))
            }
            _ => None,
        };
        if let Some(notice) = notice {
            *self.last.lock().unwrap() = Some(notice);
        }
    }
}

#[tokio::main]
async fn main() {
    let log_file = File::create("gallerist-cli.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let browser = Browser::new(ArticClient::builder().build());
    let notices = NoticeBoard::default();
    browser.subscribe(notices.clone());

    println!("gallerist - Art Institute of Chicago catalog browser");
    println!("{}", command::USAGE);

    if let Err(e) = browser.goto_page(1).await {
        warn!("initial fetch failed: {e}");
    }
    render::draw(&browser, notices.take());

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", command::USAGE),
            Ok(cmd) => {
                apply(&browser, cmd).await;
                render::draw(&browser, notices.take());
            }
            Err(message) => println!("{message}"),
        }
        prompt();
    }
}

async fn apply(browser: &Browser<ArticClient>, cmd: Command) {
    match cmd {
        Command::Page(page) => go(browser, page).await,
        Command::Next => {
            let current = browser.current_page().unwrap_or(0);
            let last = browser.total_pages().max(1) as u32;
            go(browser, (current + 1).min(last)).await;
        }
        Command::Prev => {
            let current = browser.current_page().unwrap_or(2);
            go(browser, current.saturating_sub(1).max(1)).await;
        }
        Command::Select(rows) => {
            let Some(page) = browser.current_page() else {
                warn!("selection edit before any page loaded");
                return;
            };
            let snapshot = browser.snapshot();
            // Ordinals out of range are dropped; the parser already
            // collapsed duplicates, so the records are unique by id.
            let records: Vec<Artwork> = rows
                .iter()
                .filter_map(|row| snapshot.records().get(row - 1).cloned())
                .collect();
            browser.edit_selection(page, records);
        }
        Command::First(n) => browser.select_first_n(n),
        Command::Clear => browser.select_first_n(0),
        // Handled in the main loop.
        Command::Help | Command::Quit => {}
    }
}

async fn go(browser: &Browser<ArticClient>, page: u32) {
    if let Err(e) = browser.goto_page(page).await {
        // The NoticeBoard already carries the user-facing message.
        warn!("navigation to page {page} failed: {e}");
    }
}

fn prompt() {
    print!("gallerist> ");
    let _ = io::stdout().flush();
}
