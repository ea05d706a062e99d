//! Search execution over the catalog store

use serde::Serialize;

use super::filters::{Page, SearchFilters};
use super::query;
use crate::block::BlockSummary;
use crate::catalog::SignHit;
use crate::grapheme::GraphemeHit;
use crate::storage::CatalogStore;
use crate::Result;

/// One page of results plus the total across all pages
#[derive(Debug, Serialize)]
pub struct SearchResults<T> {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub results: Vec<T>,
}

impl<T> SearchResults<T> {
    pub fn has_next_page(&self) -> bool {
        self.page * self.page_size < self.total
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }
}

/// Search engine for the catalog views
pub struct SearchEngine<'a> {
    store: &'a CatalogStore,
}

impl<'a> SearchEngine<'a> {
    /// Create a new search engine
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Search catalog signs
    pub fn search_signs(&self, filters: &SearchFilters, page: Page) -> Result<SearchResults<SignHit>> {
        let built = query::signs_query(filters);
        let total = self.store.query_count(&built.count_sql, &built.params)?;
        let results = self
            .store
            .query_sign_hits(&built.page_sql, &built.page_params(page))?;
        Ok(SearchResults {
            total,
            page: page.page,
            page_size: page.page_size,
            results,
        })
    }

    /// Search blocks
    pub fn search_blocks(
        &self,
        filters: &SearchFilters,
        page: Page,
    ) -> Result<SearchResults<BlockSummary>> {
        let built = query::blocks_query(filters);
        let total = self.store.query_count(&built.count_sql, &built.params)?;
        let results = self
            .store
            .query_block_summaries(&built.page_sql, &built.page_params(page))?;
        Ok(SearchResults {
            total,
            page: page.page,
            page_size: page.page_size,
            results,
        })
    }

    /// Search graphemes
    pub fn search_graphemes(
        &self,
        filters: &SearchFilters,
        page: Page,
    ) -> Result<SearchResults<GraphemeHit>> {
        let built = query::graphemes_query(filters);
        let total = self.store.query_count(&built.count_sql, &built.params)?;
        let results = self
            .store
            .query_grapheme_hits(&built.page_sql, &built.page_params(page))?;
        Ok(SearchResults {
            total,
            page: page.page,
            page_size: page.page_size,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::NewBlock;
    use crate::catalog::NewCatalogSign;

    fn seeded_store(n: usize) -> CatalogStore {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let signs: Vec<NewCatalogSign> = (0..n)
            .map(|i| NewCatalogSign {
                mhd_code: format!("{:04}", i),
                graphcode: Some(format!("{:04}bt", i)),
                english_translation: Some(if i % 2 == 0 { "jaguar" } else { "lord" }.to_string()),
                primary_image_url: if i % 3 == 0 {
                    Some(format!("https://img.example/{i}.png"))
                } else {
                    None
                },
                ..Default::default()
            })
            .collect();
        store.insert_catalog_signs(&signs).unwrap();
        store
    }

    #[test]
    fn test_adjacent_pages_neither_skip_nor_duplicate() {
        let store = seeded_store(10);
        let engine = SearchEngine::new(&store);
        let filters = SearchFilters::default();

        let mut seen = Vec::new();
        for page_no in 1..=4 {
            let page = Page::with_size(page_no, 3);
            let results = engine.search_signs(&filters, page).unwrap();
            assert_eq!(results.total, 10);
            seen.extend(results.results.iter().map(|hit| hit.sign.id));
        }

        // All 10 rows, each exactly once, in a stable order
        assert_eq!(seen.len(), 10);
        let mut deduped = seen.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), 10);
        let mut sorted = seen.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 10);
    }

    #[test]
    fn test_next_prev_flags() {
        let store = seeded_store(10);
        let engine = SearchEngine::new(&store);
        let filters = SearchFilters::default();

        let first = engine.search_signs(&filters, Page::with_size(1, 4)).unwrap();
        assert!(first.has_next_page());
        assert!(!first.has_prev_page());

        let last = engine.search_signs(&filters, Page::with_size(3, 4)).unwrap();
        assert_eq!(last.results.len(), 2);
        assert!(!last.has_next_page());
        assert!(last.has_prev_page());
    }

    #[test]
    fn test_text_and_toggle_filters_restrict_results() {
        let store = seeded_store(10);
        let engine = SearchEngine::new(&store);

        let jaguar = engine
            .search_signs(
                &SearchFilters {
                    query: "jaguar".to_string(),
                    ..Default::default()
                },
                Page::default(),
            )
            .unwrap();
        assert_eq!(jaguar.total, 5);

        let with_images = engine
            .search_signs(
                &SearchFilters {
                    has_image: true,
                    ..Default::default()
                },
                Page::default(),
            )
            .unwrap();
        assert_eq!(with_images.total, 4); // ids 0, 3, 6, 9
    }

    #[test]
    fn test_block_search_empty_db() {
        let store = CatalogStore::open_in_memory().unwrap();
        let engine = SearchEngine::new(&store);
        let results = engine
            .search_blocks(&SearchFilters::default(), Page::default())
            .unwrap();
        assert_eq!(results.total, 0);
        assert!(results.results.is_empty());
    }

    #[test]
    fn test_grapheme_search_joins_block_fields() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store
            .insert_blocks(&[NewBlock {
                mhd_block_id: "YAX-1".to_string(),
                artifact_code: "YAX".to_string(),
                block_english: Some("his jaguar throne".to_string()),
                event_calendar: Some("9.15.10.0.1".to_string()),
                sort_order: Some(1),
                ..Default::default()
            }])
            .unwrap();
        let block_id = store.block_key_map().unwrap()["YAX-1"];
        store
            .insert_graphemes(&[crate::grapheme::NewGrapheme {
                block_id,
                grapheme_code: "0580bt".to_string(),
                artifact_code: Some("YAX".to_string()),
                ..Default::default()
            }])
            .unwrap();

        let engine = SearchEngine::new(&store);
        let results = engine
            .search_graphemes(
                &SearchFilters {
                    query: "jaguar".to_string(),
                    has_date: true,
                    ..Default::default()
                },
                Page::default(),
            )
            .unwrap();
        assert_eq!(results.total, 1);
        let hit = &results.results[0];
        assert_eq!(hit.grapheme_code, "0580bt");
        assert_eq!(hit.block_english.as_deref(), Some("his jaguar throne"));
        assert_eq!(hit.event_calendar.as_deref(), Some("9.15.10.0.1"));
    }
}
