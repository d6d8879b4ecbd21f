use crate::core::aggregator::format_quantity;
use crate::domain::model::Nutrition;
use indexmap::IndexMap;

pub const NOT_AVAILABLE: &str = "N/A";

/// Headline nutrients of a recipe, each as `"<amount> <unit>"` or `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNutrients {
    pub calories: String,
    pub protein: String,
    pub fat: String,
    pub carbohydrates: String,
}

impl Default for KeyNutrients {
    fn default() -> Self {
        Self {
            calories: NOT_AVAILABLE.to_string(),
            protein: NOT_AVAILABLE.to_string(),
            fat: NOT_AVAILABLE.to_string(),
            carbohydrates: NOT_AVAILABLE.to_string(),
        }
    }
}

pub fn key_nutrients(nutrition: Option<&Nutrition>) -> KeyNutrients {
    let mut key = KeyNutrients::default();

    for nutrient in nutrition.iter().flat_map(|n| n.nutrients.iter()) {
        let value = match nutrient.amount {
            Some(amount) => format!("{} {}", format_quantity(amount), nutrient.unit)
                .trim_end()
                .to_string(),
            None => NOT_AVAILABLE.to_string(),
        };
        match nutrient.name.to_lowercase().as_str() {
            "calories" => key.calories = value,
            "protein" => key.protein = value,
            "fat" => key.fat = value,
            "carbohydrates" => key.carbohydrates = value,
            _ => {}
        }
    }

    key
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    WellRated,
    Reasonable,
    NotRecommended,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Rating::WellRated
        } else if score >= 50.0 {
            Rating::Reasonable
        } else {
            Rating::NotRecommended
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rating::WellRated => "Receita muito bem avaliada pelos nossos utilizadores.",
            Rating::Reasonable => "Receita com uma avaliacão razoavel.",
            Rating::NotRecommended => "Receita pouco recomendada pelos nossos utilizadores.",
        }
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

pub fn taste_lines(taste: &IndexMap<String, f64>) -> Vec<String> {
    taste
        .iter()
        .map(|(key, value)| {
            format!(" {}: {}", capitalize(key), format_quantity(*value))
        })
        .collect()
}
