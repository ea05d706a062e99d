//! SQL construction for the three search views
//!
//! Conditions and their parameters are pushed in lockstep, so the
//! parameter vector always lines up with the `?` placeholders.

use rusqlite::types::Value;

use super::filters::{Page, SearchFilters, SortBy};
use crate::storage::CATALOG_SIGN_COLUMNS;

/// An accumulating WHERE clause: each pushed condition is ANDed
#[derive(Debug, Default)]
pub struct Predicates {
    conds: Vec<String>,
    params: Vec<Value>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition with no parameters
    pub fn push(&mut self, cond: &str) {
        self.conds.push(cond.to_string());
    }

    /// Add a condition together with its parameters, in placeholder order
    pub fn push_with<I>(&mut self, cond: &str, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.conds.push(cond.to_string());
        self.params.extend(values);
    }

    /// `""` when empty, otherwise `"WHERE a AND b AND ..."`
    pub fn where_clause(&self) -> String {
        if self.conds.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conds.join(" AND "))
        }
    }

    pub fn into_params(self) -> Vec<Value> {
        self.params
    }
}

/// A built search: shared predicates, a COUNT query, and a page query
#[derive(Debug)]
pub struct SearchQuery {
    pub count_sql: String,
    pub page_sql: String,
    /// Parameters for the COUNT query (the page query appends LIMIT/OFFSET)
    pub params: Vec<Value>,
}

impl SearchQuery {
    /// Parameters for the page query: the predicate parameters followed
    /// by LIMIT and OFFSET
    pub fn page_params(&self, page: Page) -> Vec<Value> {
        let mut params = self.params.clone();
        params.push(Value::Integer(page.page_size as i64));
        params.push(Value::Integer(page.offset() as i64));
        params
    }
}

fn like(value: &str) -> Value {
    Value::Text(format!("%{}%", value))
}

/// Build the signs search (catalog_signs with usage counts)
pub fn signs_query(filters: &SearchFilters) -> SearchQuery {
    let mut preds = Predicates::new();

    let q = filters.query.trim();
    if !q.is_empty() {
        preds.push_with(
            "(graphcode LIKE ? OR mhd_code LIKE ? OR thompson_code LIKE ? OR \
             syllabic_value LIKE ? OR english_translation LIKE ? OR logographic_value LIKE ?)",
            std::iter::repeat_with(|| like(q)).take(6),
        );
    }

    if filters.has_image {
        preds.push("primary_image_url IS NOT NULL AND primary_image_url != ''");
    }
    if filters.has_roboflow {
        preds.push("(SELECT COUNT(*) FROM roboflow_instances r WHERE r.catalog_sign_id = cs.id) > 0");
    }
    if let Some(volume) = &filters.volume {
        preds.push_with("volume = ?", [Value::Text(volume.clone())]);
    }
    if let Some(word_class) = &filters.word_class {
        preds.push_with("word_class = ?", [Value::Text(word_class.clone())]);
    }
    if let Some(technique) = &filters.technique {
        preds.push_with("technique = ?", [Value::Text(technique.clone())]);
    }
    if let Some(distribution) = &filters.distribution {
        preds.push_with("distribution = ?", [Value::Text(distribution.clone())]);
    }

    let where_clause = preds.where_clause();
    let order = match filters.sort {
        SortBy::Code => "cs.graphcode, cs.id",
        SortBy::Frequency => "grapheme_count DESC, cs.id",
    };

    SearchQuery {
        count_sql: format!("SELECT COUNT(*) FROM catalog_signs cs {where_clause}"),
        page_sql: format!(
            "SELECT {CATALOG_SIGN_COLUMNS}, \
             (SELECT COUNT(*) FROM graphemes g WHERE g.catalog_sign_id = cs.id) as grapheme_count, \
             (SELECT COUNT(*) FROM roboflow_instances r WHERE r.catalog_sign_id = cs.id) as roboflow_count \
             FROM catalog_signs cs {where_clause} ORDER BY {order} LIMIT ? OFFSET ?"
        ),
        params: preds.into_params(),
    }
}

/// Build the blocks search (summary projection, ordered by sort_order)
pub fn blocks_query(filters: &SearchFilters) -> SearchQuery {
    let mut preds = Predicates::new();

    let q = filters.query.trim();
    if !q.is_empty() {
        preds.push_with(
            "(mhd_block_id LIKE ? OR artifact_code LIKE ? OR block_english LIKE ? OR \
             block_maya1 LIKE ? OR event_calendar LIKE ?)",
            std::iter::repeat_with(|| like(q)).take(5),
        );
    }

    if filters.has_date {
        preds.push("event_calendar IS NOT NULL AND event_calendar != ''");
    }
    let artifact = filters.artifact.trim();
    if !artifact.is_empty() {
        preds.push_with("artifact_code LIKE ?", [like(artifact)]);
    }
    if let Some(region) = &filters.region {
        preds.push_with("region = ?", [Value::Text(region.clone())]);
    }
    let site = filters.site.trim();
    if !site.is_empty() {
        preds.push_with("site_name LIKE ?", [like(site)]);
    }

    let where_clause = preds.where_clause();

    SearchQuery {
        count_sql: format!("SELECT COUNT(*) FROM blocks {where_clause}"),
        page_sql: format!(
            "SELECT id, mhd_block_id as block_id, artifact_code, block_maya1, block_english, \
             event_calendar, block_image1_url as block_img, site_name, region \
             FROM blocks {where_clause} ORDER BY sort_order LIMIT ? OFFSET ?"
        ),
        params: preds.into_params(),
    }
}

const GRAPHEME_JOINS: &str = "FROM graphemes g \
     LEFT JOIN blocks b ON g.block_id = b.id \
     LEFT JOIN catalog_signs cs ON g.catalog_sign_id = cs.id";

/// Build the graphemes search (joined with block and catalog context)
pub fn graphemes_query(filters: &SearchFilters) -> SearchQuery {
    let mut preds = Predicates::new();

    let q = filters.query.trim();
    if !q.is_empty() {
        preds.push_with(
            "(g.grapheme_code LIKE ? OR g.artifact_code LIKE ? OR \
             b.block_english LIKE ? OR b.block_maya1 LIKE ?)",
            std::iter::repeat_with(|| like(q)).take(4),
        );
    }

    if filters.has_image {
        preds.push("cs.primary_image_url IS NOT NULL AND cs.primary_image_url != ''");
    }
    if filters.has_date {
        preds.push("b.event_calendar IS NOT NULL AND b.event_calendar != ''");
    }
    let artifact = filters.artifact.trim();
    if !artifact.is_empty() {
        preds.push_with("g.artifact_code LIKE ?", [like(artifact)]);
    }
    if let Some(region) = &filters.region {
        preds.push_with("b.region = ?", [Value::Text(region.clone())]);
    }

    let where_clause = preds.where_clause();

    SearchQuery {
        count_sql: format!("SELECT COUNT(*) {GRAPHEME_JOINS} {where_clause}"),
        page_sql: format!(
            "SELECT g.id, g.block_id, g.catalog_sign_id, g.grapheme_code, \
             g.grapheme_logosyll, g.grapheme_hyphenated, g.grapheme_maya, g.grapheme_english, \
             g.artifact_code, g.location_summary, \
             b.block_maya1, b.block_english, b.event_calendar, b.block_image1_url as block_img, \
             cs.mhd_code_sub, cs.syllabic_value, cs.primary_image_url \
             {GRAPHEME_JOINS} {where_clause} ORDER BY g.id LIMIT ? OFFSET ?"
        ),
        params: preds.into_params(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_count(sql: &str) -> usize {
        sql.matches('?').count()
    }

    fn text(v: &Value) -> &str {
        match v {
            Value::Text(s) => s,
            other => panic!("expected text value, got {:?}", other),
        }
    }

    #[test]
    fn test_no_filters_no_where() {
        let query = signs_query(&SearchFilters::default());
        assert_eq!(query.count_sql, "SELECT COUNT(*) FROM catalog_signs cs ");
        assert!(query.params.is_empty());
        // Page query still carries LIMIT/OFFSET placeholders
        assert_eq!(placeholder_count(&query.page_sql), 2);
    }

    #[test]
    fn test_predicates_are_anded_in_order() {
        let filters = SearchFilters {
            query: "jaguar".to_string(),
            has_image: true,
            volume: Some("Classic".to_string()),
            word_class: Some("noun".to_string()),
            ..Default::default()
        };
        let query = signs_query(&filters);

        // Conditions joined with AND, in push order
        let where_idx = query.count_sql.find("WHERE").unwrap();
        let clause = &query.count_sql[where_idx..];
        let like_idx = clause.find("graphcode LIKE").unwrap();
        let img_idx = clause.find("primary_image_url IS NOT NULL").unwrap();
        let vol_idx = clause.find("volume = ?").unwrap();
        let class_idx = clause.find("word_class = ?").unwrap();
        assert!(like_idx < img_idx && img_idx < vol_idx && vol_idx < class_idx);
        assert!(clause.matches(" AND ").count() >= 3);

        // Parameter order matches placeholder order: 6 LIKE params, then
        // the two dropdown values (has_image binds nothing)
        assert_eq!(query.params.len(), 8);
        for param in &query.params[..6] {
            assert_eq!(text(param), "%jaguar%");
        }
        assert_eq!(text(&query.params[6]), "Classic");
        assert_eq!(text(&query.params[7]), "noun");

        // Placeholder counts line up with the parameter vectors
        assert_eq!(placeholder_count(&query.count_sql), query.params.len());
        let page = Page::new(2);
        assert_eq!(
            placeholder_count(&query.page_sql),
            query.page_params(page).len()
        );
    }

    #[test]
    fn test_page_params_append_limit_offset() {
        let query = blocks_query(&SearchFilters {
            artifact: "YAX".to_string(),
            ..Default::default()
        });
        let params = query.page_params(Page::with_size(3, 48));
        assert_eq!(params.len(), 3);
        assert_eq!(text(&params[0]), "%YAX%");
        assert!(matches!(params[1], Value::Integer(48)));
        assert!(matches!(params[2], Value::Integer(96)));
    }

    #[test]
    fn test_blocks_filters() {
        let filters = SearchFilters {
            query: "K'inich".to_string(),
            has_date: true,
            region: Some("Usmacinta".to_string()),
            site: "Palenque".to_string(),
            ..Default::default()
        };
        let query = blocks_query(&filters);

        assert!(query.count_sql.contains("event_calendar IS NOT NULL"));
        assert!(query.count_sql.contains("region = ?"));
        assert!(query.count_sql.contains("site_name LIKE ?"));
        // 5 LIKE + region + site
        assert_eq!(query.params.len(), 7);
        assert_eq!(text(&query.params[5]), "Usmacinta");
        assert_eq!(text(&query.params[6]), "%Palenque%");
    }

    #[test]
    fn test_graphemes_joins_present_in_both_queries() {
        let query = graphemes_query(&SearchFilters {
            query: "ba".to_string(),
            has_image: true,
            ..Default::default()
        });
        assert!(query.count_sql.contains("LEFT JOIN blocks b"));
        assert!(query.count_sql.contains("LEFT JOIN catalog_signs cs"));
        assert!(query.page_sql.contains("LEFT JOIN catalog_signs cs"));
        assert_eq!(query.params.len(), 4);
        assert_eq!(placeholder_count(&query.count_sql), 4);
    }

    #[test]
    fn test_frequency_sort_changes_order_clause() {
        let filters = SearchFilters {
            sort: SortBy::Frequency,
            ..Default::default()
        };
        let query = signs_query(&filters);
        assert!(query.page_sql.contains("ORDER BY grapheme_count DESC, cs.id"));
    }
}
