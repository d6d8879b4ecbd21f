use crate::core::aggregator::{format_quantity, render, AggregatedList};
use crate::domain::model::{RecipeRecord, ShoppingList};
use crate::domain::ports::{RecipeProvider, Storage};
use crate::utils::error::{PlannerError, Result};

pub const SHOPPING_LIST_HEADER: &str = "Lista de compras:";

/// Writes an aggregated list as plain text under the data directory.
pub struct ShoppingListWriter<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> ShoppingListWriter<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub fn to_text(list: &AggregatedList) -> String {
        let mut text = String::from(SHOPPING_LIST_HEADER);
        text.push('\n');
        for line in render(list) {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }

    /// Replaces any previous list and returns where it was written.
    pub async fn write(&self, list: &AggregatedList) -> Result<String> {
        let text = Self::to_text(list);
        tracing::debug!(
            "Writing shopping list with {} ingredients to {}",
            list.len(),
            self.file_name
        );
        self.storage
            .write_file(&self.file_name, text.as_bytes())
            .await?;
        Ok(self.storage.describe(&self.file_name))
    }
}

/// Recipes that could be fetched, plus the ids that failed with their errors.
#[derive(Debug, Default)]
pub struct ResolvedRecipes {
    pub records: Vec<RecipeRecord>,
    pub skipped: Vec<(u64, PlannerError)>,
}

/// Fetch each recipe in order. A failed fetch never stops the others.
pub async fn resolve_recipe_records<P>(provider: &P, recipe_ids: &[u64]) -> ResolvedRecipes
where
    P: RecipeProvider + ?Sized,
{
    let mut resolved = ResolvedRecipes::default();

    for &recipe_id in recipe_ids {
        match provider.recipe_information(recipe_id).await {
            Ok(info) => resolved.records.push(RecipeRecord::from(&info)),
            Err(e) => {
                tracing::warn!("Skipping recipe {} in shopping list: {}", recipe_id, e);
                resolved.skipped.push((recipe_id, e));
            }
        }
    }

    resolved
}

/// Lines for the shopping list the recipe service keeps for a user.
pub fn render_remote_shopping_list(list: &ShoppingList) -> Vec<String> {
    let mut lines = Vec::new();

    for aisle in &list.aisles {
        lines.push(format!("Secção: {}", aisle.aisle));
        for item in &aisle.items {
            let metric = item.measures.as_ref().and_then(|m| m.metric.as_ref());
            let amount = metric
                .and_then(|m| m.amount)
                .map(format_quantity)
                .unwrap_or_else(|| "N/A".to_string());
            let unit = metric.and_then(|m| m.unit.as_deref()).unwrap_or("");
            lines.push(format!(" - {}: {} {}", item.name, amount, unit).trim_end().to_string());
        }
    }

    lines.push(format!(
        "Total estimado: {}€",
        format_quantity(list.cost.unwrap_or(0.0))
    ));
    lines
}
