//! Rough nutrition estimates for recipes.
//!
//! Matching is by case-insensitive substring against a small food table and
//! deliberately ignores quantities and units: every matched ingredient
//! contributes one typical-portion entry. The result is an order-of-magnitude
//! estimate for display, nothing more.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::recipe_parser::Recipe;

const NAME_COL: &str = "name";
const KCAL_COL: &str = "kcal";
const PROTEIN_COL: &str = "protein_g";
const CARB_COL: &str = "carbs_g";
const FAT_COL: &str = "fat_g";

/// Typical-portion values for one matched ingredient.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FoodEntry {
    pub name: String,
    pub kcal: Option<f32>,
    pub protein_g: Option<f32>,
    pub carbs_g: Option<f32>,
    pub fat_g: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NutritionEstimate {
    pub kcal: Option<f32>,
    pub protein_g: Option<f32>,
    pub carbs_g: Option<f32>,
    pub fat_g: Option<f32>,
    /// How many ingredients found a table match; callers can use this to
    /// qualify the estimate ("based on 4 of 7 ingredients").
    pub matched_ingredients: usize,
    pub total_ingredients: usize,
}

impl NutritionEstimate {
    /// Divides the totals across the recipe's servings.
    pub fn per_serving(&self, servings: u32) -> NutritionEstimate {
        let divisor = servings.max(1) as f32;
        NutritionEstimate {
            kcal: self.kcal.map(|v| v / divisor),
            protein_g: self.protein_g.map(|v| v / divisor),
            carbs_g: self.carbs_g.map(|v| v / divisor),
            fat_g: self.fat_g.map(|v| v / divisor),
            matched_ingredients: self.matched_ingredients,
            total_ingredients: self.total_ingredients,
        }
    }
}

fn entry(name: &str, kcal: f32, protein: f32, carbs: f32, fat: f32) -> FoodEntry {
    FoodEntry {
        name: name.to_string(),
        kcal: Some(kcal),
        protein_g: Some(protein),
        carbs_g: Some(carbs),
        fat_g: Some(fat),
    }
}

/// Lookup table over typical-portion food values.
#[derive(Debug, Clone)]
pub struct NutritionTable {
    entries: Vec<FoodEntry>,
}

impl NutritionTable {
    /// The built-in table. Keys are ordered so that more specific names win
    /// ("chicken broth" before "chicken").
    pub fn built_in() -> Self {
        NutritionTable {
            entries: vec![
                entry("chicken broth", 15.0, 1.5, 1.0, 0.5),
                entry("chicken", 239.0, 27.0, 0.0, 14.0),
                entry("beef", 250.0, 26.0, 0.0, 15.0),
                entry("pork", 242.0, 27.0, 0.0, 14.0),
                entry("salmon", 208.0, 20.0, 0.0, 13.0),
                entry("shrimp", 99.0, 24.0, 0.2, 0.3),
                entry("tofu", 76.0, 8.0, 1.9, 4.8),
                entry("egg", 72.0, 6.3, 0.4, 4.8),
                entry("rice", 205.0, 4.3, 44.5, 0.4),
                entry("pasta", 220.0, 8.1, 43.2, 1.3),
                entry("noodle", 219.0, 7.3, 40.3, 3.3),
                entry("spaghetti", 220.0, 8.1, 43.2, 1.3),
                entry("bread", 79.0, 2.7, 14.7, 1.0),
                entry("flour", 455.0, 12.9, 95.4, 1.2),
                entry("potato", 161.0, 4.3, 36.6, 0.2),
                entry("bean", 127.0, 8.7, 22.8, 0.5),
                entry("lentil", 230.0, 17.9, 39.9, 0.8),
                entry("cheese", 113.0, 7.0, 0.4, 9.3),
                entry("coconut milk", 445.0, 4.6, 6.4, 48.2),
                entry("milk", 103.0, 8.0, 12.2, 2.4),
                entry("yogurt", 100.0, 17.0, 6.0, 0.7),
                entry("cream", 101.0, 0.6, 0.8, 10.8),
                entry("butter", 102.0, 0.1, 0.0, 11.5),
                entry("olive oil", 119.0, 0.0, 0.0, 13.5),
                entry("oil", 120.0, 0.0, 0.0, 13.6),
                entry("sugar", 49.0, 0.0, 12.6, 0.0),
                entry("honey", 64.0, 0.1, 17.3, 0.0),
                entry("tomato", 22.0, 1.1, 4.8, 0.2),
                entry("onion", 44.0, 1.2, 10.3, 0.1),
                entry("carrot", 25.0, 0.6, 6.0, 0.1),
                entry("spinach", 7.0, 0.9, 1.1, 0.1),
                entry("broccoli", 31.0, 2.5, 6.0, 0.3),
                entry("pepper", 24.0, 1.0, 5.5, 0.2),
                entry("mushroom", 15.0, 2.2, 2.3, 0.2),
                entry("avocado", 240.0, 3.0, 12.8, 22.0),
                entry("banana", 105.0, 1.3, 27.0, 0.4),
                entry("apple", 95.0, 0.5, 25.1, 0.3),
                entry("chocolate", 155.0, 1.4, 16.8, 9.2),
            ],
        }
    }

    /// Loads a replacement table from CSV with columns
    /// `name,kcal,protein_g,carbs_g,fat_g`. Rows with empty names are
    /// skipped; unparseable numbers become blanks rather than errors.
    pub fn from_csv(csv_path: &Path) -> Result<Self> {
        let entries = load_nutrition_csv(csv_path)?;
        Ok(NutritionTable { entries })
    }

    /// First table entry whose key appears in the ingredient name.
    pub fn lookup(&self, ingredient_name: &str) -> Option<&FoodEntry> {
        let needle = ingredient_name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| needle.contains(&entry.name.to_lowercase()))
    }

    /// Sums typical-portion values over every matched ingredient.
    pub fn estimate_recipe(&self, recipe: &Recipe) -> NutritionEstimate {
        let mut estimate = NutritionEstimate {
            total_ingredients: recipe.ingredients.len(),
            ..NutritionEstimate::default()
        };

        for ingredient in &recipe.ingredients {
            let Some(food) = self.lookup(&ingredient.name) else {
                continue;
            };
            estimate.matched_ingredients += 1;
            macro_rules! add_optional {
                ($field:ident) => {
                    if let Some(value) = food.$field {
                        estimate.$field = Some(estimate.$field.unwrap_or(0.0) + value);
                    }
                };
            }
            add_optional!(kcal);
            add_optional!(protein_g);
            add_optional!(carbs_g);
            add_optional!(fat_g);
        }

        estimate
    }
}

fn parse_optional_f32(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok()
}

fn load_nutrition_csv(csv_path: &Path) -> Result<Vec<FoodEntry>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!(
            "Nutrition CSV file not found at: {:?}",
            csv_path
        ));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open nutrition CSV file at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
    };
    let name_idx = col(NAME_COL)?;
    let kcal_idx = col(KCAL_COL)?;
    let protein_idx = col(PROTEIN_COL)?;
    let carb_idx = col(CARB_COL)?;
    let fat_idx = col(FAT_COL)?;

    let mut entries = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let name = record
            .get(name_idx)
            .ok_or_else(|| anyhow::anyhow!("Missing name at row {}", row_index))?
            .trim()
            .to_string();
        if name.is_empty() {
            continue;
        }

        entries.push(FoodEntry {
            name,
            kcal: record.get(kcal_idx).and_then(parse_optional_f32),
            protein_g: record.get(protein_idx).and_then(parse_optional_f32),
            carbs_g: record.get(carb_idx).and_then(parse_optional_f32),
            fat_g: record.get(fat_idx).and_then(parse_optional_f32),
        });
    }

    if entries.is_empty() {
        return Err(anyhow::anyhow!(
            "No nutrition data loaded from {:?}",
            csv_path
        ));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_parser::Ingredient;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn recipe_with(names: &[&str]) -> Recipe {
        Recipe {
            servings: 2,
            ingredients: names
                .iter()
                .map(|name| Ingredient {
                    name: name.to_string(),
                    ..Ingredient::default()
                })
                .collect(),
            ..Recipe::default()
        }
    }

    #[test]
    fn test_substring_lookup_prefers_specific_entries() {
        let table = NutritionTable::built_in();
        assert_eq!(table.lookup("low-sodium chicken broth").unwrap().name, "chicken broth");
        assert_eq!(table.lookup("boneless chicken thighs").unwrap().name, "chicken");
        assert!(table.lookup("star anise").is_none());
    }

    #[test]
    fn test_estimate_sums_matches_and_counts_misses() {
        let table = NutritionTable::built_in();
        let recipe = recipe_with(&["chicken breast", "white rice", "saffron threads"]);
        let estimate = table.estimate_recipe(&recipe);
        assert_eq!(estimate.total_ingredients, 3);
        assert_eq!(estimate.matched_ingredients, 2);
        assert_eq!(estimate.kcal, Some(239.0 + 205.0));

        let per_serving = estimate.per_serving(recipe.servings);
        assert_eq!(per_serving.kcal, Some((239.0 + 205.0) / 2.0));
    }

    #[test]
    fn test_estimate_of_empty_recipe_is_blank() {
        let table = NutritionTable::built_in();
        let estimate = table.estimate_recipe(&recipe_with(&[]));
        assert_eq!(estimate, NutritionEstimate::default());
    }

    #[test]
    fn test_csv_loading() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "name,kcal,protein_g,carbs_g,fat_g")?;
        writeln!(file, "seitan,104,21,4,0.5")?;
        writeln!(file, "jackfruit,95,,23.2,0.3")?;
        writeln!(file, ",10,10,10,10")?;
        file.flush()?;

        let table = NutritionTable::from_csv(file.path())?;
        let seitan = table.lookup("smoked seitan").unwrap();
        assert_eq!(seitan.kcal, Some(104.0));
        let jackfruit = table.lookup("young jackfruit").unwrap();
        assert_eq!(jackfruit.kcal, None);
        assert!(table.lookup("chicken").is_none());
        Ok(())
    }

    #[test]
    fn test_csv_missing_column_errors() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "name,kcal,protein_g,carbs_g")?;
        writeln!(file, "seitan,104,21,4")?;
        file.flush()?;

        let result = NutritionTable::from_csv(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Column 'fat_g' not found"));
        Ok(())
    }
}
