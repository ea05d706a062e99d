use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Rows")]
    rows: String,
}

/// Render table/count pairs as a rounded table
pub fn stats_table(stats: &[(&str, usize)]) -> String {
    if stats.is_empty() {
        return String::new();
    }
    let rows: Vec<StatsRow> = stats
        .iter()
        .map(|(table, count)| StatsRow {
            table: table.to_string(),
            rows: count.to_string(),
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_table_renders_all_rows() {
        let rendered = stats_table(&[("catalog_signs", 3141), ("blocks", 0)]);
        assert!(rendered.contains("catalog_signs"));
        assert!(rendered.contains("3141"));
        assert!(rendered.contains("blocks"));
    }

    #[test]
    fn test_empty_stats_table() {
        assert_eq!(stats_table(&[]), "");
    }
}
