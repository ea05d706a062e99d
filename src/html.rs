//! Minimal HTML table extraction
//!
//! Just enough scanning to pull the rows out of a machine-generated
//! concordance table: case-insensitive tag-block search plus tag
//! stripping with whitespace normalization.

fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the next `<open ...>...</close>` block at or after `from`.
/// Returns the byte range covering the whole block.
fn next_tag_block_ci(s: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open_lc = to_lower(open);
    let close_lc = to_lower(close);
    let start = lc.get(from..)?.find(&open_lc)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close_lc)?;
    let end = open_end + end_rel + close.len();
    Some((start, end))
}

/// The text between a block's opening and closing tags
fn inner_after_open_tag(block: &str) -> &str {
    let Some(open_end) = block.find('>') else {
        return "";
    };
    let Some(close_start) = block.rfind('<') else {
        return "";
    };
    if close_start > open_end {
        &block[open_end + 1..close_start]
    } else {
        ""
    }
}

/// Drop tags and collapse whitespace runs to single spaces
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract every `<tr>` of the document as a vector of cell texts.
/// `<td>` and `<th>` cells both count; tags inside cells are stripped.
pub fn table_rows(html: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut cursor = 0;
    while let Some((row_start, row_end)) = next_tag_block_ci(html, "<tr", "</tr>", cursor) {
        let row = &html[row_start..row_end];
        let inner = inner_after_open_tag(row);

        let mut cells = Vec::new();
        let mut cell_cursor = 0;
        loop {
            let td = next_tag_block_ci(inner, "<td", "</td>", cell_cursor);
            let th = next_tag_block_ci(inner, "<th", "</th>", cell_cursor);
            let block = match (td, th) {
                (Some(a), Some(b)) => Some(if a.0 < b.0 { a } else { b }),
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (None, None) => None,
            };
            let Some((start, end)) = block else { break };
            cells.push(strip_tags(inner_after_open_tag(&inner[start..end])));
            cell_cursor = end;
        }

        rows.push(cells);
        cursor = row_end;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>T1</b>  <i>var</i>"), "T1 var");
        assert_eq!(strip_tags("plain"), "plain");
        assert_eq!(strip_tags("<br/>"), "");
    }

    #[test]
    fn test_table_rows() {
        let html = r#"
            <table>
              <TR><th>T#</th><th>Bonn</th></TR>
              <tr><td>T1</td><td><b>ZB1</b></td></tr>
              <tr class="odd"><td>T2</td><td>~</td></tr>
            </table>
        "#;
        let rows = table_rows(html);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["T#", "Bonn"]);
        assert_eq!(rows[1], vec!["T1", "ZB1"]);
        assert_eq!(rows[2], vec!["T2", "~"]);
    }

    #[test]
    fn test_rows_without_cells() {
        let rows = table_rows("<tr></tr>");
        assert_eq!(rows, vec![Vec::<String>::new()]);
    }
}
