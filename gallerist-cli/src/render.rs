//! Table rendering for the terminal surface.

use gallerist_lib::browser::Browser;
use gallerist_lib::model::{Artwork, RecordKey};
use gallerist_lib::source::RecordSource;

const TITLE_WIDTH: usize = 34;
const ARTIST_WIDTH: usize = 24;
const ORIGIN_WIDTH: usize = 14;

/// Prints the current page: table, status line, and an optional notice.
pub fn draw<S>(browser: &Browser<S>, notice: Option<String>)
where
    S: RecordSource<Record = Artwork>,
{
    let snapshot = browser.snapshot();
    let selected_ids: Vec<i64> = browser
        .active_selection()
        .iter()
        .map(RecordKey::key)
        .collect();

    println!();
    print!("{}", table(snapshot.records(), &selected_ids));
    println!(
        "{}",
        status(
            browser.current_page(),
            browser.total_pages(),
            browser.total_count(),
            selected_ids.len(),
        )
    );
    if let Some(notice) = notice {
        println!("note: {notice}");
    }
}

/// Formats one page of artworks as a fixed-width table. Selected rows are
/// marked in the `sel` column.
pub fn table(records: &[Artwork], selected_ids: &[i64]) -> String {
    let mut out = format!(
        "{:>3}  {}  {:>7}  {:<TITLE_WIDTH$}  {:<ARTIST_WIDTH$}  {:<ORIGIN_WIDTH$}  {}\n",
        "row", "sel", "id", "title", "artist", "origin", "date",
    );
    for (i, artwork) in records.iter().enumerate() {
        let mark = if selected_ids.contains(&artwork.key()) {
            "[x]"
        } else {
            "[ ]"
        };
        out.push_str(&format!(
            "{:>3}  {}  {:>7}  {:<TITLE_WIDTH$}  {:<ARTIST_WIDTH$}  {:<ORIGIN_WIDTH$}  {}\n",
            i + 1,
            mark,
            artwork.id,
            clip(artwork.title.as_deref().unwrap_or(""), TITLE_WIDTH),
            clip(artwork.artist_display.as_deref().unwrap_or(""), ARTIST_WIDTH),
            clip(artwork.place_of_origin.as_deref().unwrap_or(""), ORIGIN_WIDTH),
            date_range(artwork),
        ));
    }
    out
}

fn status(page: Option<u32>, total_pages: usize, total: usize, selected: usize) -> String {
    match page {
        Some(page) => format!(
            "page {page}/{total_pages} | {total} records | {selected} selected on this page"
        ),
        None => "no page loaded".to_string(),
    }
}

/// First line of `text`, clipped to `width` characters.
fn clip(text: &str, width: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= width {
        return line.to_string();
    }
    let mut out: String = line.chars().take(width - 1).collect();
    out.push('~');
    out
}

fn date_range(artwork: &Artwork) -> String {
    match (artwork.date_start, artwork.date_end) {
        (Some(start), Some(end)) if start == end => start.to_string(),
        (Some(start), Some(end)) => format!("{start}-{end}"),
        (Some(start), None) => start.to_string(),
        (None, Some(end)) => end.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(id: i64, title: &str) -> Artwork {
        Artwork {
            id,
            title: Some(title.to_string()),
            place_of_origin: Some("France".to_string()),
            artist_display: Some("Paul Cézanne\nFrench, 1839-1906".to_string()),
            inscriptions: None,
            date_start: Some(1873),
            date_end: Some(1875),
        }
    }

    #[test]
    fn test_table_marks_selected_rows() {
        let records = vec![artwork(1, "First"), artwork(2, "Second")];

        let out = table(&records, &[2]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("[ ]"));
        assert!(lines[1].contains("First"));
        assert!(lines[2].contains("[x]"));
        assert!(lines[2].contains("Second"));
        // Multi-line artist attributions collapse to their first line.
        assert!(lines[1].contains("Paul Cézanne"));
        assert!(!out.contains("French, 1839-1906"));
    }

    #[test]
    fn test_clip_keeps_short_text_and_shortens_long() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("exactly ten", 11), "exactly ten");
        assert_eq!(clip("a very long artwork title", 10), "a very lo~");
    }

    #[test]
    fn test_date_range_forms() {
        let mut a = artwork(1, "t");
        assert_eq!(date_range(&a), "1873-1875");
        a.date_end = Some(1873);
        assert_eq!(date_range(&a), "1873");
        a.date_end = None;
        assert_eq!(date_range(&a), "1873");
        a.date_start = None;
        assert_eq!(date_range(&a), "");
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            status(Some(2), 11, 105, 3),
            "page 2/11 | 105 records | 3 selected on this page"
        );
        assert_eq!(status(None, 0, 0, 0), "no page loaded");
    }
}
