use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reads an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One ingredient of a recipe as consumed by the shopping-list aggregation.
/// `quantity` is the metric amount; `None` counts as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity: Some(quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: u64,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

impl From<&RecipeInformation> for RecipeRecord {
    fn from(info: &RecipeInformation) -> Self {
        let ingredients = info
            .extended_ingredients
            .iter()
            .map(|ingredient| IngredientLine {
                name: ingredient.name.clone(),
                quantity: ingredient.metric_amount(),
            })
            .collect();

        Self {
            id: info.id,
            ingredients,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFrame {
    #[default]
    Day,
    Week,
}

impl TimeFrame {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            TimeFrame::Day => "day",
            TimeFrame::Week => "week",
        }
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dia" | "day" => Ok(TimeFrame::Day),
            "semana" | "week" => Ok(TimeFrame::Week),
            other => Err(format!("unknown time frame '{}'", other)),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealPlanRequest {
    pub time_frame: TimeFrame,
    pub target_calories: Option<u32>,
    pub diet: Option<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSearch {
    pub ingredients: Vec<String>,
    pub number: usize,
    pub diet: Option<String>,
    pub intolerances: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanNutrients {
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbohydrates: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub nutrients: Option<PlanNutrients>,
}

/// Response of the meal-plan generator. Daily plans fill `meals`, weekly
/// plans fill `week` keyed by day name in the order the API sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub nutrients: Option<PlanNutrients>,
    #[serde(default)]
    pub week: Option<IndexMap<String, DayPlan>>,
}

impl MealPlan {
    pub fn all_meals(&self) -> Vec<&Meal> {
        let weekly = self
            .week
            .iter()
            .flat_map(|days| days.values())
            .flat_map(|day| day.meals.iter());
        self.meals.iter().chain(weekly).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, alias = "unitShort")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measures {
    #[serde(default)]
    pub metric: Option<Measure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedIngredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub measures: Option<Measures>,
}

impl ExtendedIngredient {
    pub fn metric_amount(&self) -> Option<f64> {
        self.measures
            .as_ref()
            .and_then(|m| m.metric.as_ref())
            .and_then(|metric| metric.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub taste: Option<IndexMap<String, f64>>,
    #[serde(default)]
    pub aggregate_likes: Option<i64>,
    #[serde(default)]
    pub spoonacular_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub measures: Option<Measures>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aisle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub aisle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ShoppingItem>,
}

/// Shopping list kept server-side for a Spoonacular user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub aisles: Vec<Aisle>,
    #[serde(default)]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "utilizador")]
    pub user: String,
    #[serde(rename = "comentario")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub recipe_id: u64,
    pub title: String,
    pub viewed_at: DateTime<Utc>,
}
