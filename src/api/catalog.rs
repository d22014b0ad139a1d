//! Catalog API endpoints.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::catalog::CatalogFilter;
use crate::models::{CatalogRecipe, Category};
use crate::AppState;

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Search text matched against name and description.
    #[serde(default)]
    pub q: String,
    /// Category id (default: all).
    #[serde(default)]
    pub category: Option<String>,
}

/// A recipe card with its badge color.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    #[serde(flatten)]
    pub recipe: CatalogRecipe,
    pub difficulty_color: &'static str,
}

impl From<&CatalogRecipe> for RecipeCard {
    fn from(recipe: &CatalogRecipe) -> Self {
        Self {
            recipe: recipe.clone(),
            difficulty_color: recipe.difficulty.badge_color(),
        }
    }
}

/// Filtered catalog view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub category: Category,
    pub heading: &'static str,
    pub count: usize,
    pub recipes: Vec<RecipeCard>,
}

/// Category bar entry.
#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub id: Category,
    pub name: &'static str,
}

/// GET /api/catalog - Filter the catalog by category and search text.
pub async fn browse_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> ApiResult<CatalogView> {
    let mut filter = CatalogFilter::new();
    filter.set_search_query(params.q);
    if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
        filter.select_category(Category::parse(category)?);
    }

    let visible = filter.visible(&state.catalog);
    let view = CatalogView {
        category: filter.selected_category(),
        heading: filter.heading(),
        count: visible.len(),
        recipes: visible.into_iter().map(RecipeCard::from).collect(),
    };

    success(view)
}

/// GET /api/catalog/categories - List the category bar.
pub async fn list_categories() -> ApiResult<Vec<CategoryEntry>> {
    success(
        Category::all_categories()
            .into_iter()
            .map(|category| CategoryEntry {
                id: category,
                name: category.display_name(),
            })
            .collect(),
    )
}

/// GET /api/catalog/:id - Recipe details.
pub async fn get_catalog_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<RecipeCard> {
    let recipe = state.catalog.get(&id)?;
    success(RecipeCard::from(recipe))
}
