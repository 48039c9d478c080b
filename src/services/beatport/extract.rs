//! Pulls track rows out of a rendered Beatport search page.
//!
//! The selectors are coupled to the site's current markup.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::RowError;

/// Marker carried by every track row in the search results table.
pub const ROW_SELECTOR: &str = r#"[data-testid="tracks-table-row"]"#;

/// Artist text longer than this (in characters) is treated as noise.
const MAX_ARTISTS_LEN: usize = 200;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector `{}`: {}", css, e))
}

static ROW: LazyLock<Selector> = LazyLock::new(|| selector(ROW_SELECTOR));
static TITLE_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("div.cell.title a[title]"));
static ARTIST_NAMES: LazyLock<Selector> =
    LazyLock::new(|| selector("div.cell.title .ArtistNames-sc-f2e950a1-0"));
static TITLE_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| selector("div.cell.title .container"));
static GENRE_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("div.cell.bpm a[title]"));

/// Raw fields of one search result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    pub title: String,
    /// Empty when no strategy could find the artists.
    pub artists: String,
    pub genre: String,
}

/// One way of finding a row's artists. Returns `None` to defer to the next.
pub type ArtistStrategy = fn(ElementRef<'_>) -> Option<String>;

/// Artist strategies in the order they are tried.
pub const ARTIST_STRATEGIES: &[(&str, ArtistStrategy)] = &[
    ("artist names element", artists_from_names_element),
    ("title container lines", artists_from_container_lines),
];

/// Extract every well-formed row from the page. Malformed rows are skipped.
pub fn parse_rows(html: &str) -> Vec<SearchRow> {
    let document = Html::parse_document(html);
    document
        .select(&ROW)
        .enumerate()
        .filter_map(|(index, row)| match extract_row(row) {
            Ok(row) => Some(row),
            Err(e) => {
                log::debug!("Skipping search result row {}: {}", index, e);
                None
            }
        })
        .collect()
}

pub fn extract_row(row: ElementRef<'_>) -> Result<SearchRow, RowError> {
    let title_anchor = row
        .select(&TITLE_ANCHOR)
        .next()
        .ok_or(RowError::MissingElement("title anchor"))?;
    let title_attr = title_anchor.value().attr("title").unwrap_or_default().trim();
    let visible_title = collapsed_text(title_anchor);
    let title = if visible_title.is_empty() {
        title_attr.to_string()
    } else {
        visible_title
    };

    let artists = extract_artists(row, ARTIST_STRATEGIES);

    let genre = row
        .select(&GENRE_ANCHOR)
        .next()
        .and_then(|anchor| anchor.value().attr("title"))
        .ok_or(RowError::MissingElement("genre anchor"))?
        .trim()
        .to_string();

    Ok(SearchRow {
        title,
        artists,
        genre,
    })
}

/// Run the strategies in order; the first to return `Some` wins.
pub fn extract_artists(row: ElementRef<'_>, strategies: &[(&str, ArtistStrategy)]) -> String {
    for (name, strategy) in strategies {
        if let Some(artists) = strategy(row) {
            log::trace!("Artists found via {}: {:?}", name, artists);
            return artists;
        }
    }
    String::new()
}

fn artists_from_names_element(row: ElementRef<'_>) -> Option<String> {
    row.select(&ARTIST_NAMES).next().map(collapsed_text)
}

/// Treats each child element of the title container as a rendered line. The
/// first line is the title; the rest are the artists. Once the container is
/// found this settles the artists, as `""` when the text is too long to be a
/// credit.
fn artists_from_container_lines(row: ElementRef<'_>) -> Option<String> {
    let container = row.select(&TITLE_CONTAINER).next()?;
    let lines: Vec<String> = container
        .children()
        .filter_map(ElementRef::wrap)
        .map(collapsed_text)
        .filter(|line| !line.is_empty())
        .collect();
    let artists = lines.iter().skip(1).cloned().collect::<Vec<_>>().join("\n");
    let artists = artists.trim();

    if artists.chars().count() > MAX_ARTISTS_LEN {
        return Some(String::new());
    }
    Some(artists.to_string())
}

/// All descendant text with whitespace runs collapsed to single spaces.
fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{search_page, track_row};

    fn first_row(html: &str) -> Result<SearchRow, RowError> {
        let document = Html::parse_document(html);
        let row = document.select(&ROW).next().expect("fixture has a row");
        extract_row(row)
    }

    #[test]
    fn test_extract_row() {
        let html = search_page(&[track_row(
            "Track B",
            "Track B (Club Mix)",
            Some("Artist X"),
            Some("House"),
        )]);

        let row = first_row(&html).unwrap();
        assert_eq!(
            row,
            SearchRow {
                title: "Track B (Club Mix)".to_string(),
                artists: "Artist X".to_string(),
                genre: "House".to_string(),
            }
        );
    }

    #[test]
    fn test_title_falls_back_to_attribute() {
        let html = search_page(&[track_row("Strobe", "   ", None, Some("Progressive House"))]);

        let row = first_row(&html).unwrap();
        assert_eq!(row.title, "Strobe");
        assert_eq!(row.artists, "");
    }

    #[test]
    fn test_missing_genre_anchor() {
        let html = search_page(&[track_row("Track A", "Track A", Some("Artist X"), None)]);
        assert_eq!(
            first_row(&html),
            Err(RowError::MissingElement("genre anchor"))
        );
    }

    #[test]
    fn test_empty_genre_is_kept() {
        let html = search_page(&[track_row("Track A", "Track A", Some("Artist X"), Some(" "))]);

        let row = first_row(&html).unwrap();
        assert_eq!(row.genre, "");
        assert_eq!(row.title, "Track A");
    }

    #[test]
    fn test_missing_title_anchor() {
        let html = search_page(&[r#"
            <div data-testid="tracks-table-row">
              <div class="cell title"><div class="container"><span>No link</span></div></div>
              <div class="cell bpm"><a title="Techno">Techno</a></div>
            </div>"#
            .to_string()]);
        assert_eq!(
            first_row(&html),
            Err(RowError::MissingElement("title anchor"))
        );
    }

    #[test]
    fn test_artists_from_container_fallback() {
        let html = search_page(&[r#"
            <div data-testid="tracks-table-row">
              <div class="cell title">
                <div class="container">
                  <a href="/track/opus/1" title="Opus">Opus</a>
                  <div class="ArtistNames-sc-renamed"><a href="/artist/1">Eric Prydz</a></div>
                </div>
              </div>
              <div class="cell bpm"><a title="Progressive House">Progressive House</a></div>
            </div>"#
            .to_string()]);

        let row = first_row(&html).unwrap();
        assert_eq!(row.artists, "Eric Prydz");
        assert_eq!(row.title, "Opus");
    }

    #[test]
    fn test_overlong_container_artists_are_dropped() {
        let noise = "x".repeat(MAX_ARTISTS_LEN + 1);
        let html = search_page(&[format!(
            r#"
            <div data-testid="tracks-table-row">
              <div class="cell title">
                <div class="container">
                  <a title="Opus">Opus</a>
                  <div>{}</div>
                </div>
              </div>
              <div class="cell bpm"><a title="Progressive House">Progressive House</a></div>
            </div>"#,
            noise
        )]);

        let row = first_row(&html).unwrap();
        assert_eq!(row.artists, "");

        // The overlong text ends the search; later strategies are not consulted.
        fn fixed(_: ElementRef<'_>) -> Option<String> {
            Some("Fixed".to_string())
        }
        let document = Html::parse_document(&html);
        let row = document.select(&ROW).next().unwrap();
        let strategies: [(&str, ArtistStrategy); 2] = [
            ("title container lines", artists_from_container_lines),
            ("fixed", fixed),
        ];
        assert_eq!(extract_artists(row, &strategies), "");
    }

    #[test]
    fn test_strategies_are_tried_in_order() {
        fn never(_: ElementRef<'_>) -> Option<String> {
            None
        }
        fn fixed(_: ElementRef<'_>) -> Option<String> {
            Some("Fixed".to_string())
        }

        let html = search_page(&[track_row("T", "T", Some("Artist X"), Some("House"))]);
        let document = Html::parse_document(&html);
        let row = document.select(&ROW).next().unwrap();

        let both: [(&str, ArtistStrategy); 2] = [("never", never), ("fixed", fixed)];
        let only_never: [(&str, ArtistStrategy); 1] = [("never", never)];

        assert_eq!(extract_artists(row, &both), "Fixed");
        assert_eq!(extract_artists(row, &only_never), "");
        assert_eq!(extract_artists(row, ARTIST_STRATEGIES), "Artist X");
    }

    #[test]
    fn test_parse_rows_skips_malformed_rows() {
        let html = search_page(&[
            track_row("Track A", "Track A", Some("Artist X"), Some("Techno")),
            track_row("Track B", "Track B", Some("Artist X"), None),
            track_row("Track C", "Track C", Some("Artist X"), Some("Trance")),
        ]);

        let rows = parse_rows(&html);
        let genres: Vec<&str> = rows.iter().map(|r| r.genre.as_str()).collect();
        assert_eq!(genres, vec!["Techno", "Trance"]);
    }

    #[test]
    fn test_parse_rows_without_results() {
        assert!(parse_rows("<html><body><p>No results</p></body></html>").is_empty());
    }
}
