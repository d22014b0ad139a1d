//! Recipe catalog and its search-and-category filter.
//!
//! The catalog is a fixed list built at startup. Filtering is a pure pass over it that
//! keeps declaration order.

use crate::errors::AppError;
use crate::models::{CatalogRecipe, Category, Difficulty};

/// The immutable recipe catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<CatalogRecipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<CatalogRecipe>) -> Self {
        Self { recipes }
    }

    /// The catalog shipped with the app.
    pub fn sample() -> Self {
        Self::new(sample_recipes())
    }

    pub fn recipes(&self) -> &[CatalogRecipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Look up a recipe for the details view.
    pub fn get(&self, id: &str) -> Result<&CatalogRecipe, AppError> {
        self.recipes
            .iter()
            .find(|recipe| recipe.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
    }
}

/// Recipes matching `category` and containing `query` in name or description.
///
/// Matching is case-insensitive. An empty query matches everything.
pub fn filter_recipes<'a>(
    recipes: &'a [CatalogRecipe],
    category: Category,
    query: &str,
) -> Vec<&'a CatalogRecipe> {
    let needle = query.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| category == Category::All || recipe.category == category)
        .filter(|recipe| {
            recipe.name.to_lowercase().contains(&needle)
                || recipe.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Search box and category bar state of the recipes screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    search_query: String,
    selected_category: Category,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_category(&self) -> Category {
        self.selected_category
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    pub fn select_category(&mut self, category: Category) {
        self.selected_category = category;
    }

    /// The recipes currently shown.
    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a CatalogRecipe> {
        filter_recipes(catalog.recipes(), self.selected_category, &self.search_query)
    }

    pub fn result_count(&self, catalog: &Catalog) -> usize {
        self.visible(catalog).len()
    }

    /// Section title above the results.
    pub fn heading(&self) -> &'static str {
        self.selected_category.display_name()
    }
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: &str,
    name: &str,
    prep_time: &str,
    description: &str,
    image: &str,
    category: Category,
    is_favorite: bool,
    difficulty: Difficulty,
    ingredients: &[&str],
) -> CatalogRecipe {
    CatalogRecipe {
        id: id.to_string(),
        name: name.to_string(),
        prep_time: prep_time.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        category,
        is_favorite,
        difficulty,
        ingredients: ingredients.iter().map(|item| item.to_string()).collect(),
    }
}

fn sample_recipes() -> Vec<CatalogRecipe> {
    vec![
        recipe(
            "1",
            "Blueberry Pancakes",
            "20 mins",
            "Fluffy pancakes with fresh blueberries",
            "https://images.unsplash.com/photo-1567620905732-2d1ec7ab7445?w=300&h=200&fit=crop",
            Category::Breakfast,
            true,
            Difficulty::Easy,
            &[
                "1 cup all-purpose flour",
                "1 tbsp sugar",
                "1 tsp baking powder",
                "1 egg",
                "1 cup milk",
                "1/2 cup blueberries",
                "Butter for cooking",
            ],
        ),
        recipe(
            "2",
            "Avocado Toast",
            "10 mins",
            "Creamy avocado on toasted artisan bread",
            "https://images.unsplash.com/photo-1541519227354-08fa5d50c44d?w=300&h=200&fit=crop",
            Category::Breakfast,
            false,
            Difficulty::Easy,
            &[
                "2 slices artisan bread",
                "1 ripe avocado",
                "1 tsp lemon juice",
                "Pinch of chili flakes",
                "Salt and pepper",
            ],
        ),
        recipe(
            "3",
            "Caesar Salad",
            "15 mins",
            "Classic salad with romaine and parmesan",
            "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=300&h=200&fit=crop",
            Category::Lunch,
            true,
            Difficulty::Easy,
            &[
                "1 head romaine lettuce",
                "1/2 cup shaved parmesan",
                "1 cup croutons",
                "1/4 cup Caesar dressing",
            ],
        ),
        recipe(
            "4",
            "Grilled Salmon",
            "25 mins",
            "Perfectly grilled salmon with herbs",
            "https://images.unsplash.com/photo-1519708227418-c8fd9a32b7a2?w=300&h=200&fit=crop",
            Category::Dinner,
            false,
            Difficulty::Medium,
            &[
                "2 salmon fillets",
                "2 tbsp olive oil",
                "1 lemon",
                "Fresh dill and parsley",
                "Salt and pepper",
            ],
        ),
        recipe(
            "5",
            "Chocolate Cake",
            "45 mins",
            "Rich and moist chocolate cake",
            "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=300&h=200&fit=crop",
            Category::Dessert,
            true,
            Difficulty::Medium,
            &[
                "2 cups all-purpose flour",
                "3/4 cup cocoa powder",
                "2 cups sugar",
                "2 eggs",
                "1 cup buttermilk",
                "1/2 cup vegetable oil",
            ],
        ),
        recipe(
            "6",
            "Veggie Stir Fry",
            "20 mins",
            "Colorful vegetables in savory sauce",
            "https://images.unsplash.com/photo-1563245372-f21724e3856d?w=300&h=200&fit=crop",
            Category::Vegetarian,
            false,
            Difficulty::Easy,
            &[
                "1 bell pepper",
                "1 cup broccoli florets",
                "1 carrot",
                "2 tbsp soy sauce",
                "1 tsp grated ginger",
            ],
        ),
        recipe(
            "7",
            "Pasta Carbonara",
            "30 mins",
            "Creamy pasta with bacon and cheese",
            "https://images.unsplash.com/photo-1621996346565-e3dbc353d2e5?w=300&h=200&fit=crop",
            Category::Dinner,
            true,
            Difficulty::Medium,
            &[
                "200 g spaghetti",
                "100 g bacon",
                "2 eggs",
                "1/2 cup grated pecorino",
                "Black pepper",
            ],
        ),
        recipe(
            "8",
            "Berry Smoothie",
            "5 mins",
            "Refreshing mixed berry smoothie",
            "https://images.unsplash.com/photo-1553530666-ba11a7da3888?w=300&h=200&fit=crop",
            Category::Quick,
            false,
            Difficulty::Easy,
            &[
                "1 cup mixed berries",
                "1 banana",
                "1 cup yogurt",
                "1/2 cup milk",
            ],
        ),
    ]
}
