//! Extraction of structured recipe payloads from free-form assistant text.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker pair the model is instructed to wrap its recipe JSON in.
pub const RECIPE_OPEN: &str = "[RECIPE]";
pub const RECIPE_CLOSE: &str = "[/RECIPE]";

/// World-cuisine tags used to scope both prompts and canned replies.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Italian,
    French,
    Spanish,
    Greek,
    MiddleEastern,
    Indian,
    Chinese,
    Japanese,
    Korean,
    Thai,
    Vietnamese,
    Mexican,
    American,
    #[default]
    International,
}

impl Region {
    pub const ALL: [Region; 14] = [
        Region::Italian,
        Region::French,
        Region::Spanish,
        Region::Greek,
        Region::MiddleEastern,
        Region::Indian,
        Region::Chinese,
        Region::Japanese,
        Region::Korean,
        Region::Thai,
        Region::Vietnamese,
        Region::Mexican,
        Region::American,
        Region::International,
    ];

    /// Human-readable label, also used when prompting the model.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Italian => "Italian",
            Region::French => "French",
            Region::Spanish => "Spanish",
            Region::Greek => "Greek",
            Region::MiddleEastern => "Middle Eastern",
            Region::Indian => "Indian",
            Region::Chinese => "Chinese",
            Region::Japanese => "Japanese",
            Region::Korean => "Korean",
            Region::Thai => "Thai",
            Region::Vietnamese => "Vietnamese",
            Region::Mexican => "Mexican",
            Region::American => "American",
            Region::International => "International",
        }
    }

    /// Coerces a model-supplied tag. Unrecognized input falls back to
    /// `International` rather than failing the whole recipe.
    pub fn from_tag(tag: &str) -> Region {
        let normalized = normalize_tag(tag);
        Region::ALL
            .iter()
            .copied()
            .find(|r| normalize_tag(r.label()) == normalized)
            .unwrap_or(Region::International)
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Either every cuisine or one selected region.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn label(&self) -> &'static str {
        match self {
            RegionFilter::All => "all",
            RegionFilter::Only(region) => region.label(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    fn from_tag(tag: &str) -> Difficulty {
        match tag.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for Ingredient {
    fn default() -> Self {
        Ingredient {
            name: String::new(),
            amount: "1".to_string(),
            unit: String::new(),
            notes: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub region: Region,
    pub cuisine: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tips: Vec<String>,
    pub tags: Vec<String>,
}

/// The single fallback table every coerced field defaults from.
impl Default for Recipe {
    fn default() -> Self {
        Recipe {
            id: String::new(),
            name: "Untitled Recipe".to_string(),
            region: Region::International,
            cuisine: "International".to_string(),
            description: String::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            servings: 4,
            difficulty: Difficulty::Medium,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tips: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl Recipe {
    /// True when at least one ingredient has a non-empty name. Callers that
    /// derive shopping lists treat a recipe failing this as "nothing to add".
    pub fn has_usable_ingredients(&self) -> bool {
        self.ingredients.iter().any(|i| !i.name.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub prose: String,
    pub recipe: Option<Recipe>,
}

/// Splits assistant text into prose and an optional recipe.
///
/// Absence of a fenced block is the common case, not an error. A block that
/// is present but malformed is logged and swallowed so the chat can carry on
/// with text-only output.
pub fn parse(raw_text: &str) -> ParsedReply {
    let Some(found) = locate_fenced_block(raw_text) else {
        return ParsedReply {
            prose: raw_text.trim().to_string(),
            recipe: None,
        };
    };

    let recipe = match coerce_recipe(&found.block) {
        Ok(recipe) => Some(recipe),
        Err(err) => {
            log::warn!("discarding malformed recipe block: {}", err);
            None
        }
    };

    ParsedReply {
        prose: found.prose,
        recipe,
    }
}

struct FencedBlock {
    prose: String,
    block: String,
}

fn locate_fenced_block(raw_text: &str) -> Option<FencedBlock> {
    let open = raw_text.find(RECIPE_OPEN)?;
    let body_start = open + RECIPE_OPEN.len();
    let close_rel = raw_text[body_start..].find(RECIPE_CLOSE)?;
    let body_end = body_start + close_rel;

    let block = strip_markdown_fences(raw_text[body_start..body_end].trim()).to_string();
    let mut prose = String::with_capacity(raw_text.len());
    prose.push_str(&raw_text[..open]);
    prose.push_str(&raw_text[body_end + RECIPE_CLOSE.len()..]);

    Some(FencedBlock {
        prose: prose.trim().to_string(),
        block,
    })
}

// Models wrap JSON in markdown fences even when told not to.
fn strip_markdown_fences(block: &str) -> &str {
    let mut inner = block;
    if let Some(rest) = inner.strip_prefix("```json") {
        inner = rest.trim_start();
    } else if let Some(rest) = inner.strip_prefix("```") {
        inner = rest.trim_start();
    }
    if let Some(rest) = inner.strip_suffix("```") {
        inner = rest.trim_end();
    }
    inner
}

#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(alias = "title")]
    name: Option<String>,
    region: Option<String>,
    cuisine: Option<String>,
    description: Option<String>,
    #[serde(rename = "prepTime", alias = "prep_time")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime", alias = "cook_time")]
    cook_time: Option<String>,
    servings: Option<serde_json::Value>,
    difficulty: Option<String>,
    ingredients: Option<serde_json::Value>,
    instructions: Option<serde_json::Value>,
    tips: Option<serde_json::Value>,
    tags: Option<serde_json::Value>,
}

/// One entry of the model's ingredients array. The model emits strings,
/// objects with varying key names, and occasionally garbage; every shape
/// maps to exactly one `Ingredient` so ordinals line up with the original.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIngredientEntry {
    Text(String),
    Entry(RawIngredient),
    Unrecognized(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct RawIngredient {
    #[serde(alias = "ingredient")]
    name: Option<String>,
    #[serde(alias = "quantity")]
    amount: Option<serde_json::Value>,
    unit: Option<String>,
    notes: Option<String>,
}

fn coerce_recipe(block: &str) -> Result<Recipe, serde_json::Error> {
    let raw: RawRecipe = serde_json::from_str(block)?;
    let defaults = Recipe::default();

    Ok(Recipe {
        id: Uuid::new_v4().to_string(),
        name: non_empty(raw.name).unwrap_or(defaults.name),
        region: raw
            .region
            .as_deref()
            .map(Region::from_tag)
            .unwrap_or(defaults.region),
        cuisine: non_empty(raw.cuisine).unwrap_or(defaults.cuisine),
        description: non_empty(raw.description).unwrap_or(defaults.description),
        prep_time: non_empty(raw.prep_time).unwrap_or(defaults.prep_time),
        cook_time: non_empty(raw.cook_time).unwrap_or(defaults.cook_time),
        servings: coerce_servings(raw.servings).unwrap_or(defaults.servings),
        difficulty: raw
            .difficulty
            .as_deref()
            .map(Difficulty::from_tag)
            .unwrap_or(defaults.difficulty),
        ingredients: coerce_ingredients(raw.ingredients),
        instructions: coerce_string_list(raw.instructions),
        tips: coerce_string_list(raw.tips),
        tags: coerce_string_list(raw.tags),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn coerce_servings(value: Option<serde_json::Value>) -> Option<u32> {
    match value? {
        serde_json::Value::Number(n) => {
            n.as_f64().filter(|v| *v >= 1.0).map(|v| v.round() as u32)
        }
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok().filter(|v| *v >= 1),
        _ => None,
    }
}

fn coerce_string_list(value: Option<serde_json::Value>) -> Vec<String> {
    match value {
        Some(serde_json::Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn coerce_ingredients(value: Option<serde_json::Value>) -> Vec<Ingredient> {
    let Some(serde_json::Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .into_iter()
        .map(|entry| {
            let raw: RawIngredientEntry = serde_json::from_value(entry)
                .unwrap_or(RawIngredientEntry::Unrecognized(serde_json::Value::Null));
            coerce_ingredient(raw)
        })
        .collect()
}

fn coerce_ingredient(entry: RawIngredientEntry) -> Ingredient {
    match entry {
        RawIngredientEntry::Text(name) => Ingredient {
            name: name.trim().to_string(),
            ..Ingredient::default()
        },
        RawIngredientEntry::Entry(raw) => Ingredient {
            name: non_empty(raw.name).unwrap_or_else(|| "Unknown ingredient".to_string()),
            amount: coerce_amount(raw.amount),
            unit: raw.unit.map(|u| u.trim().to_string()).unwrap_or_default(),
            notes: non_empty(raw.notes),
        },
        RawIngredientEntry::Unrecognized(_) => Ingredient {
            name: "Unknown ingredient".to_string(),
            ..Ingredient::default()
        },
    }
}

fn coerce_amount(value: Option<serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => "1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prose_passes_through() {
        let text = "  Here's a tip: always salt your pasta water.  ";
        let reply = parse(text);
        assert!(reply.recipe.is_none());
        assert_eq!(reply.prose, text.trim());
    }

    #[test]
    fn test_unterminated_block_is_treated_as_prose() {
        let text = "Sure! [RECIPE] {\"name\": \"Broken\"";
        let reply = parse(text);
        assert!(reply.recipe.is_none());
        assert_eq!(reply.prose, text.trim());
    }

    #[test]
    fn test_malformed_block_is_swallowed() {
        let text = "Here you go!\n[RECIPE] { this is not json } [/RECIPE]\nEnjoy!";
        let reply = parse(text);
        assert!(reply.recipe.is_none());
        assert_eq!(reply.prose, "Here you go!\n\nEnjoy!");
    }

    #[test]
    fn test_well_formed_block_is_extracted() {
        let text = r#"Try this one.
[RECIPE]
{
  "name": "Quick Carbonara",
  "region": "italian",
  "cuisine": "Roman",
  "prepTime": "10 minutes",
  "cookTime": "15 minutes",
  "servings": 2,
  "difficulty": "Easy",
  "ingredients": [
    {"name": "spaghetti", "amount": "200", "unit": "g"},
    {"ingredient": "guanciale", "quantity": "75", "unit": "g", "notes": "diced"},
    "2 eggs"
  ],
  "instructions": ["Boil pasta.", "Fry guanciale.", "Combine off heat."],
  "tags": ["pasta", "quick"]
}
[/RECIPE]
Buon appetito."#;
        let reply = parse(text);
        assert_eq!(reply.prose, "Try this one.\n\nBuon appetito.");
        let recipe = reply.recipe.expect("recipe should parse");
        assert_eq!(recipe.name, "Quick Carbonara");
        assert_eq!(recipe.region, Region::Italian);
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.ingredients[1].name, "guanciale");
        assert_eq!(recipe.ingredients[1].amount, "75");
        assert_eq!(recipe.ingredients[1].notes.as_deref(), Some("diced"));
        assert_eq!(recipe.ingredients[2].name, "2 eggs");
        assert_eq!(recipe.ingredients[2].amount, "1");
        assert!(!recipe.id.is_empty());
    }

    #[test]
    fn test_ingredient_count_and_order_preserved() {
        let text =
            r#"[RECIPE]{"name":"X","ingredients":["a",{"name":"b"},42,{"unit":"g"},"e"]}[/RECIPE]"#;
        let recipe = parse(text).recipe.expect("recipe should parse");
        assert_eq!(recipe.ingredients.len(), 5);
        assert_eq!(recipe.ingredients[0].name, "a");
        assert_eq!(recipe.ingredients[1].name, "b");
        assert_eq!(recipe.ingredients[2].name, "Unknown ingredient");
        assert_eq!(recipe.ingredients[3].name, "Unknown ingredient");
        assert_eq!(recipe.ingredients[4].name, "e");
    }

    #[test]
    fn test_scalar_defaults_applied() {
        let text = r#"[RECIPE]{"name":"Mystery Stew","ingredients":["water"]}[/RECIPE]"#;
        let recipe = parse(text).recipe.expect("recipe should parse");
        assert_eq!(recipe.region, Region::International);
        assert_eq!(recipe.cuisine, "International");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert!(recipe.instructions.is_empty());
        assert!(recipe.tips.is_empty());
    }

    #[test]
    fn test_servings_accepts_numeric_string() {
        let text = r#"[RECIPE]{"name":"X","servings":"6","ingredients":["salt"]}[/RECIPE]"#;
        assert_eq!(parse(text).recipe.unwrap().servings, 6);

        let text = r#"[RECIPE]{"name":"X","servings":"several","ingredients":["salt"]}[/RECIPE]"#;
        assert_eq!(parse(text).recipe.unwrap().servings, 4);

        let text = r#"[RECIPE]{"name":"X","servings":0,"ingredients":["salt"]}[/RECIPE]"#;
        assert_eq!(parse(text).recipe.unwrap().servings, 4);
    }

    #[test]
    fn test_markdown_fences_inside_markers_are_stripped() {
        let text =
            "[RECIPE]\n```json\n{\"name\":\"Fenced\",\"ingredients\":[\"rice\"]}\n```\n[/RECIPE]";
        let recipe = parse(text).recipe.expect("recipe should parse");
        assert_eq!(recipe.name, "Fenced");
    }

    #[test]
    fn test_empty_ingredient_list_is_permitted() {
        let text = r#"[RECIPE]{"name":"Idea Only","ingredients":[]}[/RECIPE]"#;
        let recipe = parse(text).recipe.expect("recipe should parse");
        assert!(recipe.ingredients.is_empty());
        assert!(!recipe.has_usable_ingredients());
    }

    #[test]
    fn test_non_array_ingredients_coerce_to_empty() {
        let text = r#"[RECIPE]{"name":"Odd Shape","ingredients":"flour and water"}[/RECIPE]"#;
        let recipe = parse(text).recipe.expect("recipe should parse");
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_title_alias_accepted() {
        let text = r#"[RECIPE]{"title":"Aliased","ingredients":["salt"]}[/RECIPE]"#;
        assert_eq!(parse(text).recipe.unwrap().name, "Aliased");
    }

    #[test]
    fn test_region_tag_coercion() {
        assert_eq!(Region::from_tag("middle eastern"), Region::MiddleEastern);
        assert_eq!(Region::from_tag("Middle-Eastern"), Region::MiddleEastern);
        assert_eq!(Region::from_tag("ITALIAN"), Region::Italian);
        assert_eq!(Region::from_tag("from the moon"), Region::International);
    }
}
