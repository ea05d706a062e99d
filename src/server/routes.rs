use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::search::{Page, SearchEngine, SearchFilters, SortBy, ViewMode};
use crate::server::AppState;
use crate::storage::CatalogStore;

#[derive(Deserialize)]
pub struct SignListParams {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub mode: Option<String>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub has_image: Option<bool>,
    pub has_roboflow: Option<bool>,
    pub has_date: Option<bool>,
    pub volume: Option<String>,
    pub word_class: Option<String>,
    pub technique: Option<String>,
    pub distribution: Option<String>,
    pub region: Option<String>,
    pub artifact: Option<String>,
    pub site: Option<String>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// "all" and empty both mean the dropdown is inactive
fn dropdown(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "all")
}

impl SearchParams {
    pub fn view_mode(&self) -> Result<ViewMode, String> {
        match &self.mode {
            Some(mode) => ViewMode::from_str(mode),
            None => Ok(ViewMode::Signs),
        }
    }

    pub fn to_filters(&self) -> Result<SearchFilters, String> {
        let sort = match &self.sort {
            Some(sort) => SortBy::from_str(sort)?,
            None => SortBy::default(),
        };
        Ok(SearchFilters {
            query: self.q.clone().unwrap_or_default(),
            has_image: self.has_image.unwrap_or(false),
            has_roboflow: self.has_roboflow.unwrap_or(false),
            has_date: self.has_date.unwrap_or(false),
            volume: dropdown(self.volume.clone()),
            word_class: dropdown(self.word_class.clone()),
            technique: dropdown(self.technique.clone()),
            distribution: dropdown(self.distribution.clone()),
            region: dropdown(self.region.clone()),
            artifact: self.artifact.clone().unwrap_or_default(),
            site: self.site.clone().unwrap_or_default(),
            sort,
        })
    }

    pub fn to_page(&self) -> Page {
        Page::new(self.page.unwrap_or(1))
    }
}

fn open_store(state: &AppState) -> Result<CatalogStore, (StatusCode, Json<ErrorResponse>)> {
    CatalogStore::open(&state.database_path)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))
}

/// GET /api/signs?q= - legacy sign list with instance counts
pub async fn list_signs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SignListParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = open_store(&state)?;
    let signs = store
        .list_signs(params.q.as_deref().unwrap_or(""))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;
    Ok(Json(serde_json::to_value(&signs).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?))
}

/// GET /api/sign/{id} - one legacy sign with its instances.
/// The sign is null rather than 404 when the id is unknown.
pub async fn get_sign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = open_store(&state)?;
    let sign = store
        .get_sign(id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;
    let instances = store
        .instances_for_sign(id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(serde_json::json!({
        "sign": sign,
        "instances": instances,
    })))
}

/// GET /api/search - catalog search across the three view modes
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let mode = params
        .view_mode()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })))?;
    let filters = params
        .to_filters()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })))?;
    let page = params.to_page();

    let store = open_store(&state)?;
    let engine = SearchEngine::new(&store);

    let value = match mode {
        ViewMode::Signs => engine
            .search_signs(&filters, page)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))
            .and_then(|r| serde_json::to_value(&r).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() }))))?,
        ViewMode::Blocks => engine
            .search_blocks(&filters, page)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))
            .and_then(|r| serde_json::to_value(&r).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() }))))?,
        ViewMode::Graphemes => engine
            .search_graphemes(&filters, page)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))
            .and_then(|r| serde_json::to_value(&r).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() }))))?,
    };

    Ok(Json(value))
}

/// GET /api/filters - distinct dropdown options
pub async fn get_filters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = open_store(&state)?;
    let options = store
        .filter_options()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;
    Ok(Json(serde_json::to_value(&options).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?))
}

/// GET /api/stats - row counts per table
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = open_store(&state)?;
    let stats = store
        .stats()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;
    Ok(Json(serde_json::to_value(&stats).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropdown_all_is_inactive() {
        assert_eq!(dropdown(Some("all".to_string())), None);
        assert_eq!(dropdown(Some("".to_string())), None);
        assert_eq!(
            dropdown(Some("Classic".to_string())),
            Some("Classic".to_string())
        );
        assert_eq!(dropdown(None), None);
    }

    fn empty_params() -> SearchParams {
        SearchParams {
            mode: None,
            q: None,
            page: None,
            has_image: None,
            has_roboflow: None,
            has_date: None,
            volume: None,
            word_class: None,
            technique: None,
            distribution: None,
            region: None,
            artifact: None,
            site: None,
            sort: None,
        }
    }

    #[test]
    fn test_params_defaults() {
        let params = empty_params();
        assert_eq!(params.view_mode().unwrap(), ViewMode::Signs);
        let filters = params.to_filters().unwrap();
        assert_eq!(filters.active_count(), 0);
        assert_eq!(params.to_page().page, 1);
    }

    #[test]
    fn test_params_conversion() {
        let params = SearchParams {
            mode: Some("graphemes".to_string()),
            q: Some("jaguar".to_string()),
            page: Some(3),
            has_date: Some(true),
            volume: Some("all".to_string()),
            artifact: Some("YAX".to_string()),
            ..empty_params()
        };
        assert_eq!(params.view_mode().unwrap(), ViewMode::Graphemes);
        let filters = params.to_filters().unwrap();
        assert_eq!(filters.query, "jaguar");
        assert!(filters.has_date);
        assert_eq!(filters.volume, None);
        assert_eq!(filters.artifact, "YAX");
        assert_eq!(params.to_page().offset(), 96);
    }

    #[test]
    fn test_bad_mode_rejected() {
        let params = SearchParams {
            mode: Some("codices".to_string()),
            ..empty_params()
        };
        assert!(params.view_mode().is_err());
    }
}
