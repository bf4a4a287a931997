//! Kitchen unit conversions and ingredient substitutions.
//!
//! Everything here is a pure table lookup. Amounts are free text coming out
//! of recipes ("1/2", "1 1/2", "to taste"), so parsing is best-effort and a
//! failed parse means "leave the value alone", never an error.

/// Milliliters per canonical volume unit.
const ML_PER_UNIT: &[(&str, f64)] = &[
    ("ml", 1.0),
    ("l", 1000.0),
    ("tsp", 4.92892),
    ("tbsp", 14.7868),
    ("fl oz", 29.5735),
    ("cup", 236.588),
    ("pint", 473.176),
    ("quart", 946.353),
    ("gallon", 3785.41),
];

/// Grams per canonical weight unit.
const G_PER_UNIT: &[(&str, f64)] = &[
    ("g", 1.0),
    ("kg", 1000.0),
    ("oz", 28.3495),
    ("lb", 453.592),
];

/// Maps the spellings found in recipe text onto canonical unit names.
const UNIT_ALIASES: &[(&str, &str)] = &[
    ("milliliter", "ml"),
    ("milliliters", "ml"),
    ("millilitre", "ml"),
    ("millilitres", "ml"),
    ("mls", "ml"),
    ("liter", "l"),
    ("liters", "l"),
    ("litre", "l"),
    ("litres", "l"),
    ("teaspoon", "tsp"),
    ("teaspoons", "tsp"),
    ("tsps", "tsp"),
    ("tablespoon", "tbsp"),
    ("tablespoons", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbs", "tbsp"),
    ("fluid ounce", "fl oz"),
    ("fluid ounces", "fl oz"),
    ("floz", "fl oz"),
    ("cups", "cup"),
    ("pints", "pint"),
    ("pt", "pint"),
    ("quarts", "quart"),
    ("qt", "quart"),
    ("gallons", "gallon"),
    ("gal", "gallon"),
    ("gram", "g"),
    ("grams", "g"),
    ("gr", "g"),
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("kgs", "kg"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    ("pound", "lb"),
    ("pounds", "lb"),
    ("lbs", "lb"),
];

/// Common substitutions, matched by substring against the ingredient name.
/// Entry order matters: "buttermilk" must come before "butter".
const SUBSTITUTIONS: &[(&str, &[&str])] = &[
    (
        "buttermilk",
        &["1 cup milk + 1 tbsp lemon juice, rested 5 minutes"],
    ),
    (
        "butter",
        &[
            "margarine (1:1)",
            "coconut oil (1:1)",
            "olive oil (use 3/4 the amount)",
        ],
    ),
    (
        "egg",
        &[
            "1/4 cup unsweetened applesauce per egg",
            "1 tbsp ground flaxseed + 3 tbsp water, rested 10 minutes",
        ],
    ),
    (
        "heavy cream",
        &["3/4 cup milk + 1/4 cup melted butter"],
    ),
    ("sour cream", &["plain Greek yogurt (1:1)"]),
    (
        "brown sugar",
        &["1 cup white sugar + 1 tbsp molasses"],
    ),
    (
        "baking powder",
        &["1/4 tsp baking soda + 1/2 tsp cream of tartar per tsp"],
    ),
    (
        "white wine",
        &["chicken broth (1:1)", "apple cider vinegar diluted 1:1 with water"],
    ),
    ("garlic", &["1/8 tsp garlic powder per clove"]),
    ("fresh herbs", &["one third the amount of dried herbs"]),
];

const UNICODE_FRACTIONS: &[(char, f64)] = &[
    ('¼', 0.25),
    ('½', 0.5),
    ('¾', 0.75),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
];

/// Resolves a unit spelling to its canonical name, or None if unknown.
pub fn normalize_unit(unit: &str) -> Option<&'static str> {
    let trimmed = unit.trim().to_lowercase();
    let trimmed = trimmed.trim_end_matches('.');
    if let Some(canonical) = ML_PER_UNIT
        .iter()
        .chain(G_PER_UNIT.iter())
        .find(|(name, _)| *name == trimmed)
        .map(|(name, _)| *name)
    {
        return Some(canonical);
    }
    UNIT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map(|(_, canonical)| *canonical)
}

fn factor_in(table: &[(&str, f64)], unit: &str) -> Option<f64> {
    let canonical = normalize_unit(unit)?;
    table
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, factor)| *factor)
}

/// Converts between two volume units. None if either unit is not a volume.
pub fn convert_volume(amount: f64, from: &str, to: &str) -> Option<f64> {
    Some(amount * factor_in(ML_PER_UNIT, from)? / factor_in(ML_PER_UNIT, to)?)
}

/// Converts between two weight units. None if either unit is not a weight.
pub fn convert_weight(amount: f64, from: &str, to: &str) -> Option<f64> {
    Some(amount * factor_in(G_PER_UNIT, from)? / factor_in(G_PER_UNIT, to)?)
}

/// Tries volume first, then weight. There is no volume↔weight bridge here;
/// that would need density data this module deliberately does not carry.
pub fn convert(amount: f64, from: &str, to: &str) -> Option<f64> {
    convert_volume(amount, from, to).or_else(|| convert_weight(amount, from, to))
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Parses a free-text amount: "2", "0.75", "1/2", "1 1/2", "½".
/// Returns None for anything non-numeric ("to taste", "1-2", "a pinch").
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut total = 0.0;
    let mut matched = false;
    for part in trimmed.split_whitespace() {
        if let Some(value) = parse_amount_part(part) {
            total += value;
            matched = true;
        } else {
            return None;
        }
    }
    matched.then_some(total)
}

fn parse_amount_part(part: &str) -> Option<f64> {
    if let Some(&(_, value)) = UNICODE_FRACTIONS
        .iter()
        .find(|(symbol, _)| part.chars().eq(std::iter::once(*symbol)))
    {
        return Some(value);
    }
    if let Some((numerator, denominator)) = part.split_once('/') {
        let n = numerator.trim().parse::<f64>().ok()?;
        let d = denominator.trim().parse::<f64>().ok()?;
        if d == 0.0 {
            return None;
        }
        return Some(n / d);
    }
    part.parse::<f64>().ok()
}

/// Substitution suggestions for an ingredient, by case-insensitive substring.
pub fn substitutions_for(ingredient: &str) -> Option<&'static [&'static str]> {
    let needle = ingredient.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    SUBSTITUTIONS
        .iter()
        .find(|(key, _)| needle.contains(key))
        .map(|(_, options)| *options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_cup_in_ml() {
        let ml = convert_volume(0.5, "cup", "ml").unwrap();
        assert!((ml - 118.29).abs() < 0.01, "got {}", ml);
    }

    #[test]
    fn test_volume_aliases() {
        let a = convert_volume(3.0, "tablespoons", "tsp").unwrap();
        assert!((a - 9.0).abs() < 1e-9);
        assert_eq!(normalize_unit("Cups"), Some("cup"));
        assert_eq!(normalize_unit("fl oz"), Some("fl oz"));
        assert_eq!(normalize_unit("parsecs"), None);
    }

    #[test]
    fn test_weight_conversion() {
        let g = convert_weight(1.0, "lb", "g").unwrap();
        assert!((g - 453.592).abs() < 0.001);
        assert!(convert_weight(1.0, "cup", "g").is_none());
    }

    #[test]
    fn test_convert_tries_both_tables() {
        assert!(convert(1.0, "kg", "oz").is_some());
        assert!(convert(1.0, "cup", "tbsp").is_some());
        assert!(convert(1.0, "cup", "g").is_none());
    }

    #[test]
    fn test_temperature() {
        assert!((fahrenheit_to_celsius(350.0) - 176.666).abs() < 0.01);
        assert!((celsius_to_fahrenheit(180.0) - 356.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_amount_shapes() {
        assert_eq!(parse_amount("2"), Some(2.0));
        assert_eq!(parse_amount("0.75"), Some(0.75));
        assert_eq!(parse_amount("1/2"), Some(0.5));
        assert_eq!(parse_amount("1 1/2"), Some(1.5));
        assert_eq!(parse_amount("½"), Some(0.5));
        assert_eq!(parse_amount("to taste"), None);
        assert_eq!(parse_amount("1-2"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1/0"), None);
    }

    #[test]
    fn test_substitution_lookup() {
        let subs = substitutions_for("unsalted butter").unwrap();
        assert!(subs.iter().any(|s| s.contains("margarine")));
        // buttermilk must not fall through to the butter entry
        let subs = substitutions_for("buttermilk").unwrap();
        assert!(subs[0].contains("lemon juice"));
        assert!(substitutions_for("dragon fruit").is_none());
    }
}
