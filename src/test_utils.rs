/// One Beatport-style track row.
///
/// `artists: None` leaves out the artist names element; `genre: None` leaves
/// out the genre anchor.
pub fn track_row(
    title_attr: &str,
    visible_title: &str,
    artists: Option<&str>,
    genre: Option<&str>,
) -> String {
    let artists = artists
        .map(|a| {
            format!(
                r#"<div class="ArtistNames-sc-f2e950a1-0"><a href="/artist/1">{}</a></div>"#,
                a
            )
        })
        .unwrap_or_default();
    let genre = genre
        .map(|g| format!(r#"<a href="/genre/1" title="{}">{}</a>"#, g, g))
        .unwrap_or_default();

    format!(
        r#"
        <div data-testid="tracks-table-row" class="Table-style__TableRow">
          <div class="cell title">
            <div class="container">
              <a href="/track/1" title="{}">{}</a>
              {}
            </div>
          </div>
          <div class="cell bpm">{}</div>
        </div>"#,
        title_attr, visible_title, artists, genre
    )
}

/// A search results page wrapping the given rows.
pub fn search_page(rows: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html><body><div class="Table-style__Table">{}</div></body></html>"#,
        rows.join("\n")
    )
}
