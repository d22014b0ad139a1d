//! Catalog recipe model: the read-only sample recipes browsed on the recipes screen.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Recipe category. `All` is the filter sentinel and never a recipe's own category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Vegetarian,
    Quick,
}

impl Category {
    /// Every category in the order the category bar shows them.
    pub fn all_categories() -> [Category; 7] {
        [
            Category::All,
            Category::Breakfast,
            Category::Lunch,
            Category::Dinner,
            Category::Dessert,
            Category::Vegetarian,
            Category::Quick,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Breakfast => "breakfast",
            Category::Lunch => "lunch",
            Category::Dinner => "dinner",
            Category::Dessert => "dessert",
            Category::Vegetarian => "vegetarian",
            Category::Quick => "quick",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::All => "All Recipes",
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Dessert => "Desserts",
            Category::Vegetarian => "Vegetarian",
            Category::Quick => "Quick Meals",
        }
    }

    /// Parse a category id such as `"breakfast"`.
    pub fn parse(id: &str) -> Result<Self, AppError> {
        let id = id.trim();
        Category::all_categories()
            .into_iter()
            .find(|category| category.id() == id)
            .ok_or_else(|| AppError::Validation(format!("Unknown category: {}", id)))
    }
}

/// Preparation difficulty, shown as a colored badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn badge_color(&self) -> &'static str {
        match self {
            Difficulty::Easy => "#4CAF50",
            Difficulty::Medium => "#FF9800",
            Difficulty::Hard => "#F44336",
        }
    }
}

/// A catalog recipe. Defined once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecipe {
    pub id: String,
    pub name: String,
    pub prep_time: String,
    pub description: String,
    pub image: String,
    pub category: Category,
    pub is_favorite: bool,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("breakfast").unwrap(), Category::Breakfast);
        assert_eq!(Category::parse(" all ").unwrap(), Category::All);
        assert!(matches!(
            Category::parse("brunch"),
            Err(AppError::Validation(_))
        ));
        // ids are lowercase only
        assert!(Category::parse("Lunch").is_err());
    }

    #[test]
    fn test_category_ids_match_serde() {
        for category in Category::all_categories() {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.id());
        }
    }

    #[test]
    fn test_difficulty_badge_colors() {
        assert_eq!(Difficulty::Easy.badge_color(), "#4CAF50");
        assert_eq!(Difficulty::Medium.badge_color(), "#FF9800");
        assert_eq!(Difficulty::Hard.badge_color(), "#F44336");
    }
}
