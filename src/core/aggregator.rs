//! Shopping-list aggregation.
//!
//! Quantities are summed per ingredient name across any number of recipes.
//! Names are compared exactly as the provider returns them, so `"Flour"` and
//! `"flour"` stay separate entries. Totals are kept unrounded; rounding only
//! happens in [`render`].

use crate::domain::model::RecipeRecord;
use indexmap::IndexMap;

/// Ingredient name to accumulated metric quantity, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedList {
    totals: IndexMap<String, f64>,
}

impl AggregatedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every ingredient of `recipe`. Missing quantities count as zero.
    pub fn merge(&mut self, recipe: &RecipeRecord) {
        for ingredient in &recipe.ingredients {
            let quantity = ingredient.quantity.unwrap_or(0.0);
            *self.totals.entry(ingredient.name.clone()).or_insert(0.0) += quantity;
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.totals.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }
}

pub fn aggregate<'a, I>(recipes: I) -> AggregatedList
where
    I: IntoIterator<Item = &'a RecipeRecord>,
{
    let mut list = AggregatedList::new();
    for recipe in recipes {
        list.merge(recipe);
    }
    list
}

/// Round to two decimals; whole numbers keep one decimal place (`3.0`).
pub fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        rounded.to_string()
    }
}

/// One `"<name>: <quantity>"` line per ingredient, in insertion order.
pub fn render(list: &AggregatedList) -> Vec<String> {
    list.iter()
        .map(|(name, total)| format!("{}: {}", name, format_quantity(total)))
        .collect()
}
