//! Deterministic fallback responder.
//!
//! Keeps the product usable with no credential and no network: replies are
//! chosen by keyword containment against a fixed, ordered rule table (first
//! match wins), with a region-keyed line when nothing matches. Every recipe
//! returned here is a complete literal; nothing on this path is parsed.

use uuid::Uuid;

use crate::cooking::units::{convert_volume, substitutions_for};
use crate::recipe_parser::{Difficulty, Ingredient, Recipe, Region, RegionFilter};

#[derive(Debug, Clone)]
pub struct DemoReply {
    pub text: String,
    pub recipe: Option<Recipe>,
}

type RuleHandler = fn(&str, RegionFilter) -> DemoReply;

/// Ordered rule table; earlier entries shadow later ones, so "vegetarian
/// pasta" resolves as a vegetarian ask.
const RULES: &[(&[&str], RuleHandler)] = &[
    (&["vegetarian", "vegan", "plant-based", "meatless"], vegetarian_reply),
    (&["substitute", "substitution", "instead of", "replace"], substitution_reply),
    (&["convert", "conversion", "how many ml", "how many grams"], conversion_reply),
    (&["pasta", "spaghetti", "noodle"], pasta_reply),
    (&["chicken"], chicken_reply),
    (&["soup", "stew", "broth"], soup_reply),
    (&["breakfast", "brunch"], breakfast_reply),
    (&["dessert", "sweet", "cake", "cookie", "chocolate"], dessert_reply),
    (&["recipe", "cook", "make", "dinner", "lunch", "meal"], signature_reply),
];

pub fn respond(message: &str, region: RegionFilter) -> DemoReply {
    let lowered = message.to_lowercase();
    for (keywords, handler) in RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return handler(&lowered, region);
        }
    }
    fallback_reply(region)
}

fn ing(amount: &str, unit: &str, name: &str) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        amount: amount.to_string(),
        unit: unit.to_string(),
        notes: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn canned(
    name: &str,
    region: Region,
    cuisine: &str,
    description: &str,
    prep_time: &str,
    cook_time: &str,
    servings: u32,
    difficulty: Difficulty,
    ingredients: Vec<Ingredient>,
    instructions: &[&str],
    tips: &[&str],
    tags: &[&str],
) -> Recipe {
    Recipe {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        region,
        cuisine: cuisine.to_string(),
        description: description.to_string(),
        prep_time: prep_time.to_string(),
        cook_time: cook_time.to_string(),
        servings,
        difficulty,
        ingredients,
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
        tips: tips.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
    }
}

fn vegetarian_reply(_message: &str, _region: RegionFilter) -> DemoReply {
    let recipe = canned(
        "Rainbow Vegetable Stir-Fry",
        Region::International,
        "Fusion",
        "A fast weeknight stir-fry that works with whatever vegetables are in the fridge.",
        "15 minutes",
        "10 minutes",
        2,
        Difficulty::Easy,
        vec![
            ing("2", "tbsp", "vegetable oil"),
            ing("1", "", "red bell pepper"),
            ing("1", "cup", "broccoli florets"),
            ing("1", "cup", "snap peas"),
            ing("2", "", "garlic cloves"),
            ing("3", "tbsp", "soy sauce"),
            ing("1", "tbsp", "honey"),
            ing("2", "cups", "cooked rice"),
        ],
        &[
            "Heat the oil in a wok over high heat.",
            "Stir-fry the garlic for 30 seconds, then add the vegetables.",
            "Cook for 5-6 minutes until crisp-tender.",
            "Stir in the soy sauce and honey, toss, and serve over rice.",
        ],
        &["Keep the heat high and the vegetables moving so they stay crisp."],
        &["vegetarian", "quick", "healthy"],
    );
    DemoReply {
        text: "Here's a colorful vegetarian stir-fry that comes together in under half an hour."
            .to_string(),
        recipe: Some(recipe),
    }
}

fn pasta_reply(_message: &str, _region: RegionFilter) -> DemoReply {
    let recipe = canned(
        "Spaghetti Aglio e Olio",
        Region::Italian,
        "Italian",
        "The midnight pasta of Naples: garlic, olive oil, chili, and little else.",
        "5 minutes",
        "15 minutes",
        2,
        Difficulty::Easy,
        vec![
            ing("200", "g", "spaghetti"),
            ing("4", "", "garlic cloves"),
            ing("1/3", "cup", "olive oil"),
            ing("1/2", "tsp", "red pepper flakes"),
            ing("1/4", "cup", "chopped parsley"),
            ing("to taste", "", "salt"),
        ],
        &[
            "Cook the spaghetti in well-salted water until just shy of al dente.",
            "Gently sizzle the sliced garlic in olive oil until pale gold.",
            "Add the pepper flakes, then the drained pasta with a splash of pasta water.",
            "Toss until glossy, fold in the parsley, and serve.",
        ],
        &["Reserve a cup of pasta water; the starch makes the sauce cling."],
        &["pasta", "quick", "vegetarian"],
    );
    DemoReply {
        text: "You can't beat aglio e olio when the pantry is nearly empty.".to_string(),
        recipe: Some(recipe),
    }
}

fn chicken_reply(_message: &str, _region: RegionFilter) -> DemoReply {
    let recipe = canned(
        "Weeknight Chicken Curry",
        Region::Indian,
        "Indian",
        "A forgiving coconut-based curry built on pantry spices.",
        "15 minutes",
        "25 minutes",
        4,
        Difficulty::Medium,
        vec![
            ing("500", "g", "chicken thighs"),
            ing("1", "", "onion"),
            ing("2", "tbsp", "curry powder"),
            ing("400", "ml", "coconut milk"),
            ing("2", "", "tomatoes"),
            ing("2", "tbsp", "vegetable oil"),
            ing("to taste", "", "salt"),
        ],
        &[
            "Brown the chicken in oil and set it aside.",
            "Soften the diced onion, then bloom the curry powder for a minute.",
            "Add the chopped tomatoes and coconut milk and bring to a simmer.",
            "Return the chicken and simmer gently for 20 minutes.",
        ],
        &["Thighs stay juicier than breasts through the simmer."],
        &["chicken", "curry", "comfort food"],
    );
    DemoReply {
        text: "A reliable chicken curry; the spice level is entirely up to you.".to_string(),
        recipe: Some(recipe),
    }
}

fn soup_reply(_message: &str, _region: RegionFilter) -> DemoReply {
    let recipe = canned(
        "Hearty Minestrone",
        Region::Italian,
        "Italian",
        "A vegetable-packed soup that improves overnight.",
        "20 minutes",
        "40 minutes",
        6,
        Difficulty::Easy,
        vec![
            ing("2", "tbsp", "olive oil"),
            ing("1", "", "onion"),
            ing("2", "", "carrots"),
            ing("2", "", "celery stalks"),
            ing("400", "g", "canned tomatoes"),
            ing("400", "g", "canned cannellini beans"),
            ing("1.5", "l", "vegetable broth"),
            ing("100", "g", "small pasta"),
        ],
        &[
            "Sweat the onion, carrot, and celery in olive oil until soft.",
            "Add the tomatoes and broth and simmer for 20 minutes.",
            "Add the beans and pasta and cook until the pasta is tender.",
            "Season and serve with grated cheese.",
        ],
        &[],
        &["soup", "vegetarian", "make-ahead"],
    );
    DemoReply {
        text: "Minestrone is the answer to a crowded vegetable drawer.".to_string(),
        recipe: Some(recipe),
    }
}

fn breakfast_reply(_message: &str, _region: RegionFilter) -> DemoReply {
    let recipe = canned(
        "One-Pan Shakshuka",
        Region::MiddleEastern,
        "Middle Eastern",
        "Eggs poached in a spiced tomato and pepper sauce.",
        "10 minutes",
        "20 minutes",
        2,
        Difficulty::Easy,
        vec![
            ing("2", "tbsp", "olive oil"),
            ing("1", "", "onion"),
            ing("1", "", "red bell pepper"),
            ing("400", "g", "canned tomatoes"),
            ing("1", "tsp", "ground cumin"),
            ing("1", "tsp", "sweet paprika"),
            ing("4", "", "eggs"),
            ing("to taste", "", "salt"),
        ],
        &[
            "Soften the onion and pepper in olive oil.",
            "Add the spices and tomatoes and simmer until thickened.",
            "Make four wells, crack in the eggs, and cover.",
            "Cook until the whites are set, about 6 minutes.",
        ],
        &["Serve straight from the pan with warm bread."],
        &["breakfast", "eggs", "vegetarian"],
    );
    DemoReply {
        text: "Shakshuka: breakfast, lunch, or dinner, no one will complain.".to_string(),
        recipe: Some(recipe),
    }
}

fn dessert_reply(_message: &str, _region: RegionFilter) -> DemoReply {
    let recipe = canned(
        "Five-Minute Chocolate Mug Cake",
        Region::American,
        "American",
        "A single-serving cake for emergencies.",
        "2 minutes",
        "90 seconds",
        1,
        Difficulty::Easy,
        vec![
            ing("4", "tbsp", "flour"),
            ing("2", "tbsp", "sugar"),
            ing("2", "tbsp", "cocoa powder"),
            ing("1/4", "tsp", "baking powder"),
            ing("3", "tbsp", "milk"),
            ing("1", "tbsp", "vegetable oil"),
        ],
        &[
            "Whisk the dry ingredients in a large mug.",
            "Stir in the milk and oil until smooth.",
            "Microwave on high for 70-90 seconds.",
            "Let it rest for a minute before digging in.",
        ],
        &["Underbake slightly; it keeps cooking in the mug."],
        &["dessert", "chocolate", "quick"],
    );
    DemoReply {
        text: "Dessert for one, ready before the kettle boils.".to_string(),
        recipe: Some(recipe),
    }
}

fn substitution_reply(message: &str, _region: RegionFilter) -> DemoReply {
    // The whole lowercased message is the haystack; the substitution table
    // matches by substring, so "what can I use instead of butter" just works.
    let text = match substitutions_for(message) {
        Some(options) => {
            let mut lines = vec!["Here's what I'd reach for:".to_string()];
            for option in options {
                lines.push(format!("• {}", option));
            }
            lines.join("\n")
        }
        None => "Tell me which ingredient you need to swap (butter, eggs, buttermilk, \
                 sour cream, brown sugar, baking powder...) and I'll suggest an alternative."
            .to_string(),
    };
    DemoReply { text, recipe: None }
}

fn conversion_reply(_message: &str, _region: RegionFilter) -> DemoReply {
    let cup_ml = convert_volume(1.0, "cup", "ml").unwrap_or(236.59);
    let text = format!(
        "Handy kitchen conversions:\n\
         • 1 cup = {:.0} ml\n\
         • 1 tbsp = 3 tsp = 14.8 ml\n\
         • 1 oz = 28.3 g, 1 lb = 454 g\n\
         • 350°F = 177°C\n\
         Ask me to convert a specific amount and I'll do the math.",
        cup_ml
    );
    DemoReply { text, recipe: None }
}

fn signature_reply(_message: &str, region: RegionFilter) -> DemoReply {
    let target = match region {
        RegionFilter::All => Region::International,
        RegionFilter::Only(region) => region,
    };
    let recipe = signature_recipe(target);
    DemoReply {
        text: format!(
            "How about a {} classic? Here's {}.",
            recipe.region.label(),
            recipe.name
        ),
        recipe: Some(recipe),
    }
}

/// One emblematic dish per region, used for generic "cook me something" asks.
fn signature_recipe(region: Region) -> Recipe {
    match region {
        Region::Italian => canned(
            "Margherita Pizza",
            region,
            "Italian",
            "Tomato, mozzarella, and basil on a blistered crust.",
            "2 hours",
            "10 minutes",
            2,
            Difficulty::Medium,
            vec![
                ing("300", "g", "pizza dough"),
                ing("100", "ml", "tomato passata"),
                ing("125", "g", "fresh mozzarella"),
                ing("1", "handful", "basil leaves"),
                ing("1", "tbsp", "olive oil"),
            ],
            &[
                "Stretch the dough into a thin round.",
                "Spread the passata and tear over the mozzarella.",
                "Bake as hot as your oven goes until blistered.",
                "Finish with basil and olive oil.",
            ],
            &[],
            &["pizza", "classic"],
        ),
        Region::French => canned(
            "Ratatouille",
            region,
            "French",
            "Provençal stewed summer vegetables.",
            "25 minutes",
            "45 minutes",
            4,
            Difficulty::Medium,
            vec![
                ing("1", "", "eggplant"),
                ing("2", "", "zucchini"),
                ing("1", "", "red bell pepper"),
                ing("4", "", "tomatoes"),
                ing("1", "", "onion"),
                ing("3", "tbsp", "olive oil"),
            ],
            &[
                "Dice all the vegetables.",
                "Sauté each vegetable separately in olive oil.",
                "Combine, season, and stew gently for 30 minutes.",
            ],
            &["Cooking the vegetables separately keeps their character."],
            &["vegetarian", "classic"],
        ),
        Region::Spanish => canned(
            "Tortilla Española",
            region,
            "Spanish",
            "Slow-cooked potato and onion omelette.",
            "15 minutes",
            "30 minutes",
            4,
            Difficulty::Medium,
            vec![
                ing("4", "", "potatoes"),
                ing("1", "", "onion"),
                ing("6", "", "eggs"),
                ing("1", "cup", "olive oil"),
                ing("to taste", "", "salt"),
            ],
            &[
                "Gently poach sliced potatoes and onion in olive oil.",
                "Drain, fold into beaten eggs, and rest 10 minutes.",
                "Cook in a nonstick pan, flipping once with a plate.",
            ],
            &[],
            &["eggs", "tapas"],
        ),
        Region::Greek => canned(
            "Horiatiki (Greek Salad)",
            region,
            "Greek",
            "The village salad: no lettuce, plenty of olive oil.",
            "15 minutes",
            "0 minutes",
            4,
            Difficulty::Easy,
            vec![
                ing("4", "", "tomatoes"),
                ing("1", "", "cucumber"),
                ing("1", "", "red onion"),
                ing("200", "g", "feta"),
                ing("1", "handful", "kalamata olives"),
                ing("4", "tbsp", "olive oil"),
                ing("1", "tsp", "dried oregano"),
            ],
            &[
                "Cut the vegetables into chunky pieces.",
                "Top with a slab of feta and the olives.",
                "Dress with olive oil and oregano; do not toss.",
            ],
            &[],
            &["salad", "vegetarian", "no-cook"],
        ),
        Region::MiddleEastern => canned(
            "Creamy Hummus",
            region,
            "Levantine",
            "Silky chickpea and tahini dip.",
            "10 minutes",
            "0 minutes",
            6,
            Difficulty::Easy,
            vec![
                ing("400", "g", "canned chickpeas"),
                ing("1/2", "cup", "tahini"),
                ing("2", "", "garlic cloves"),
                ing("1/4", "cup", "lemon juice"),
                ing("1/2", "tsp", "ground cumin"),
                ing("4", "tbsp", "ice water"),
            ],
            &[
                "Blend the tahini and lemon juice until pale.",
                "Add chickpeas, garlic, and cumin; blend until smooth.",
                "Stream in ice water until creamy. Season with salt.",
            ],
            &["Peeling the chickpeas is tedious but worth it."],
            &["vegetarian", "dip", "no-cook"],
        ),
        Region::Indian => canned(
            "Chana Masala",
            region,
            "Indian",
            "Spiced chickpeas in a tangy tomato gravy.",
            "15 minutes",
            "30 minutes",
            4,
            Difficulty::Medium,
            vec![
                ing("2", "tbsp", "vegetable oil"),
                ing("1", "", "onion"),
                ing("2", "tsp", "garam masala"),
                ing("1", "tsp", "ground cumin"),
                ing("400", "g", "canned tomatoes"),
                ing("800", "g", "canned chickpeas"),
            ],
            &[
                "Brown the onion deeply in oil.",
                "Bloom the spices, then add tomatoes and simmer.",
                "Add chickpeas and cook until the gravy thickens.",
            ],
            &[],
            &["vegetarian", "vegan", "curry"],
        ),
        Region::Chinese => canned(
            "Egg Fried Rice",
            region,
            "Chinese",
            "Day-old rice, high heat, and a well-seasoned wok.",
            "10 minutes",
            "8 minutes",
            2,
            Difficulty::Easy,
            vec![
                ing("3", "cups", "cold cooked rice"),
                ing("3", "", "eggs"),
                ing("2", "", "scallions"),
                ing("2", "tbsp", "vegetable oil"),
                ing("1", "tbsp", "soy sauce"),
            ],
            &[
                "Scramble the eggs in a hot wok and set aside.",
                "Fry the rice, breaking up clumps, until toasted.",
                "Return the eggs, add soy sauce and scallions, toss.",
            ],
            &["Day-old rice fries; fresh rice steams."],
            &["rice", "quick"],
        ),
        Region::Japanese => canned(
            "Chicken Teriyaki",
            region,
            "Japanese",
            "Glossy soy-mirin glazed chicken.",
            "10 minutes",
            "15 minutes",
            2,
            Difficulty::Easy,
            vec![
                ing("400", "g", "chicken thighs"),
                ing("3", "tbsp", "soy sauce"),
                ing("3", "tbsp", "mirin"),
                ing("1", "tbsp", "sugar"),
                ing("1", "tbsp", "vegetable oil"),
            ],
            &[
                "Sear the chicken skin-side down until golden.",
                "Add soy, mirin, and sugar.",
                "Reduce to a glaze, turning to coat.",
            ],
            &[],
            &["chicken", "weeknight"],
        ),
        Region::Korean => canned(
            "Bibimbap Bowl",
            region,
            "Korean",
            "Rice topped with seasoned vegetables, egg, and gochujang.",
            "30 minutes",
            "15 minutes",
            2,
            Difficulty::Medium,
            vec![
                ing("2", "cups", "cooked short-grain rice"),
                ing("1", "cup", "spinach"),
                ing("1", "", "carrot"),
                ing("1", "cup", "bean sprouts"),
                ing("2", "", "eggs"),
                ing("2", "tbsp", "gochujang"),
                ing("1", "tbsp", "sesame oil"),
            ],
            &[
                "Season each vegetable separately with sesame oil and salt.",
                "Fry the eggs sunny-side up.",
                "Arrange everything over rice and serve with gochujang.",
            ],
            &[],
            &["rice", "bowl"],
        ),
        Region::Thai => canned(
            "Pad Krapow Gai",
            region,
            "Thai",
            "Holy basil chicken stir-fry, hotter than you think.",
            "10 minutes",
            "8 minutes",
            2,
            Difficulty::Easy,
            vec![
                ing("400", "g", "ground chicken"),
                ing("4", "", "garlic cloves"),
                ing("3", "", "bird's eye chilies"),
                ing("2", "tbsp", "oyster sauce"),
                ing("1", "tbsp", "fish sauce"),
                ing("1", "cup", "thai basil leaves"),
            ],
            &[
                "Pound the garlic and chilies to a rough paste.",
                "Stir-fry the paste, then the chicken, over high heat.",
                "Season with the sauces and wilt in the basil.",
            ],
            &["Serve with rice and a crispy fried egg."],
            &["chicken", "spicy", "quick"],
        ),
        Region::Vietnamese => canned(
            "Quick Chicken Pho",
            region,
            "Vietnamese",
            "A weeknight shortcut to the aromatic noodle soup.",
            "15 minutes",
            "30 minutes",
            4,
            Difficulty::Medium,
            vec![
                ing("1.5", "l", "chicken broth"),
                ing("1", "", "onion"),
                ing("1", "piece", "ginger"),
                ing("2", "", "star anise"),
                ing("300", "g", "rice noodles"),
                ing("300", "g", "cooked chicken"),
                ing("1", "handful", "fresh herbs"),
            ],
            &[
                "Char the onion and ginger, then simmer in broth with star anise.",
                "Strain, season with fish sauce, and keep hot.",
                "Pour over noodles and chicken; top with herbs.",
            ],
            &[],
            &["soup", "noodles"],
        ),
        Region::Mexican => canned(
            "Tacos de Frijoles",
            region,
            "Mexican",
            "Refried bean tacos with quick-pickled onion.",
            "15 minutes",
            "10 minutes",
            3,
            Difficulty::Easy,
            vec![
                ing("400", "g", "refried beans"),
                ing("6", "", "corn tortillas"),
                ing("1", "", "red onion"),
                ing("2", "", "limes"),
                ing("100", "g", "queso fresco"),
                ing("1", "", "avocado"),
            ],
            &[
                "Pickle thin-sliced onion in lime juice with a pinch of salt.",
                "Warm the beans and char the tortillas.",
                "Fill, then top with onion, cheese, and avocado.",
            ],
            &[],
            &["vegetarian", "tacos", "quick"],
        ),
        Region::American => canned(
            "Buttermilk Pancakes",
            region,
            "American",
            "Tall, fluffy diner-style pancakes.",
            "10 minutes",
            "15 minutes",
            4,
            Difficulty::Easy,
            vec![
                ing("2", "cups", "flour"),
                ing("2", "tbsp", "sugar"),
                ing("2", "tsp", "baking powder"),
                ing("2", "cups", "buttermilk"),
                ing("2", "", "eggs"),
                ing("4", "tbsp", "melted butter"),
            ],
            &[
                "Whisk the dry ingredients; whisk the wet separately.",
                "Combine until just mixed; lumps are fine.",
                "Griddle over medium heat until bubbles burst, then flip.",
            ],
            &["Rest the batter 10 minutes for taller pancakes."],
            &["breakfast", "classic"],
        ),
        Region::International => canned(
            "Grain Bowl with Tahini Dressing",
            region,
            "International",
            "A template bowl: grains, roast vegetables, greens, dressing.",
            "15 minutes",
            "30 minutes",
            2,
            Difficulty::Easy,
            vec![
                ing("1", "cup", "quinoa"),
                ing("2", "cups", "roasted vegetables"),
                ing("2", "cups", "baby spinach"),
                ing("3", "tbsp", "tahini"),
                ing("1", "", "lemon"),
                ing("1", "tbsp", "olive oil"),
            ],
            &[
                "Cook the quinoa and let it steam dry.",
                "Whisk tahini with lemon juice and water to a pourable dressing.",
                "Assemble bowls and drizzle generously.",
            ],
            &[],
            &["vegetarian", "healthy", "bowl"],
        ),
    }
}

fn fallback_reply(region: RegionFilter) -> DemoReply {
    let text = match region {
        RegionFilter::All => "I'm running in offline demo mode, but I can still help! Ask me \
                              for a recipe (try \"a quick vegetarian dinner\"), an ingredient \
                              substitution, or a unit conversion."
            .to_string(),
        RegionFilter::Only(region) => format!(
            "I'm running in offline demo mode, but I know my way around {} cooking. Ask me \
             for a classic {} dish, a substitution, or a unit conversion.",
            region.label(),
            region.label()
        ),
    };
    DemoReply { text, recipe: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vegetarian_dinner_returns_tagged_recipe() {
        let reply = respond("vegetarian dinner", RegionFilter::All);
        let recipe = reply.recipe.expect("demo should return a recipe");
        assert!(recipe.tags.iter().any(|t| t == "vegetarian"));
        assert!(recipe.has_usable_ingredients());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "vegetarian" outranks "pasta" in the rule table
        let reply = respond("a vegetarian pasta please", RegionFilter::All);
        assert_eq!(reply.recipe.unwrap().name, "Rainbow Vegetable Stir-Fry");
    }

    #[test]
    fn test_substitution_rule_uses_the_lookup_table() {
        let reply = respond(
            "what can I use instead of butter?",
            RegionFilter::All,
        );
        assert!(reply.recipe.is_none());
        assert!(reply.text.contains("margarine"));
    }

    #[test]
    fn test_generic_ask_is_region_keyed() {
        let reply = respond("cook me something", RegionFilter::Only(Region::Thai));
        let recipe = reply.recipe.unwrap();
        assert_eq!(recipe.region, Region::Thai);
        assert_eq!(recipe.name, "Pad Krapow Gai");
    }

    #[test]
    fn test_fallback_line_mentions_region() {
        let reply = respond("xyzzy", RegionFilter::Only(Region::Greek));
        assert!(reply.recipe.is_none());
        assert!(reply.text.contains("Greek"));

        let reply = respond("xyzzy", RegionFilter::All);
        assert!(reply.recipe.is_none());
        assert!(reply.text.contains("demo mode"));
    }

    #[test]
    fn test_every_signature_recipe_is_complete() {
        for region in Region::ALL {
            let recipe = signature_recipe(region);
            assert!(recipe.has_usable_ingredients(), "{:?}", region);
            assert!(!recipe.instructions.is_empty(), "{:?}", region);
            assert!(recipe.servings >= 1, "{:?}", region);
            assert_eq!(recipe.region, region);
        }
    }
}
