//! Servings-based recipe scaling.

use crate::cooking::units::parse_amount;
use crate::recipe_parser::{Ingredient, Recipe};

/// Returns a copy of the recipe scaled to `target_servings`.
///
/// Only amounts that parse as numbers are scaled; free-text amounts like
/// "to taste" are carried over verbatim. This is a convenience view of the
/// same recipe, so the id is preserved.
pub fn scale_recipe(recipe: &Recipe, target_servings: u32) -> Recipe {
    let target = target_servings.max(1);
    let current = recipe.servings.max(1);
    if target == current {
        return recipe.clone();
    }
    let factor = f64::from(target) / f64::from(current);

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|ingredient| match parse_amount(&ingredient.amount) {
            Some(value) => Ingredient {
                amount: format_amount(value * factor),
                ..ingredient.clone()
            },
            None => ingredient.clone(),
        })
        .collect();

    Recipe {
        servings: target,
        ingredients,
        ..recipe.clone()
    }
}

fn format_amount(value: f64) -> String {
    let rendered = format!("{:.2}", value);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, amount: &str, unit: &str) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount: amount.to_string(),
            unit: unit.to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_numeric_amounts_scale() {
        let recipe = Recipe {
            servings: 2,
            ingredients: vec![
                ingredient("flour", "1 1/2", "cup"),
                ingredient("milk", "200", "ml"),
            ],
            ..Recipe::default()
        };
        let scaled = scale_recipe(&recipe, 4);
        assert_eq!(scaled.servings, 4);
        assert_eq!(scaled.ingredients[0].amount, "3");
        assert_eq!(scaled.ingredients[1].amount, "400");
    }

    #[test]
    fn test_free_text_amounts_survive() {
        let recipe = Recipe {
            servings: 4,
            ingredients: vec![ingredient("salt", "to taste", "")],
            ..Recipe::default()
        };
        let scaled = scale_recipe(&recipe, 8);
        assert_eq!(scaled.ingredients[0].amount, "to taste");
    }

    #[test]
    fn test_scaling_down_formats_fractions_as_decimals() {
        let recipe = Recipe {
            servings: 4,
            ingredients: vec![ingredient("butter", "1", "cup")],
            ..Recipe::default()
        };
        let scaled = scale_recipe(&recipe, 2);
        assert_eq!(scaled.ingredients[0].amount, "0.5");
    }

    #[test]
    fn test_same_servings_is_identity() {
        let recipe = Recipe {
            servings: 4,
            ingredients: vec![ingredient("rice", "1/3", "cup")],
            ..Recipe::default()
        };
        assert_eq!(scale_recipe(&recipe, 4), recipe);
    }
}
