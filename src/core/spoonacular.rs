use crate::domain::model::{
    Instruction, MealPlan, MealPlanRequest, RecipeInformation, RecipeSearch, RecipeSummary,
    ShoppingList,
};
use crate::domain::ports::{ConfigProvider, RecipeProvider};
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RecipeSummary>,
}

#[derive(Debug, Deserialize)]
struct SubstitutesResponse {
    #[serde(default)]
    substitutes: Option<Vec<String>>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the subset of the Spoonacular API the planner uses.
/// The key travels as the `apiKey` query parameter on every call.
pub struct SpoonacularClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl SpoonacularClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = Url::parse(config.base_url()).map_err(|e| PlannerError::ConfigError {
            message: format!("Invalid API base URL '{}': {}", config.base_url(), e),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key().to_string(),
        })
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PlannerError::ConfigError {
                message: format!("API base URL '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T> {
        let endpoint = format!("/{}", segments.join("/"));
        let url = self.endpoint_url(segments)?;

        tracing::debug!("GET {} {:?}", endpoint, params);
        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} responded {}", endpoint, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::ApiStatusError {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn generate_meal_plan(&self, request: &MealPlanRequest) -> Result<MealPlan> {
        let mut params = vec![("timeFrame", request.time_frame.as_query_value().to_string())];
        if let Some(calories) = request.target_calories {
            params.push(("targetCalories", calories.to_string()));
        }
        if let Some(diet) = &request.diet {
            params.push(("diet", diet.clone()));
        }
        if !request.exclude.is_empty() {
            params.push(("exclude", request.exclude.join(",")));
        }

        self.get_json(&["mealplanner", "generate"], &params).await
    }

    async fn search_recipes(&self, search: &RecipeSearch) -> Result<Vec<RecipeSummary>> {
        let mut params = vec![
            ("includeIngredients", search.ingredients.join(",")),
            ("number", search.number.to_string()),
            // maximize used ingredients
            ("ranking", "1".to_string()),
            ("ignorePantry", "true".to_string()),
        ];
        if let Some(diet) = &search.diet {
            params.push(("diet", diet.clone()));
        }
        if !search.intolerances.is_empty() {
            params.push(("intolerances", search.intolerances.join(",")));
        }

        let response: SearchResponse = self
            .get_json(&["recipes", "complexSearch"], &params)
            .await?;
        Ok(response.results)
    }

    async fn recipe_information(&self, recipe_id: u64) -> Result<RecipeInformation> {
        let params = [
            ("includeNutrition", "true".to_string()),
            ("addTasteData", "true".to_string()),
        ];
        self.get_json(&["recipes", &recipe_id.to_string(), "information"], &params)
            .await
    }

    async fn analyzed_instructions(&self, recipe_id: u64) -> Result<Vec<Instruction>> {
        let params = [("stepBreakdown", "true".to_string())];
        self.get_json(
            &["recipes", &recipe_id.to_string(), "analyzedInstructions"],
            &params,
        )
        .await
    }

    async fn ingredient_substitutes(&self, ingredient: &str) -> Result<Vec<String>> {
        let params = [("ingredientName", ingredient.to_string())];
        let response: SubstitutesResponse = self
            .get_json(&["food", "ingredients", "substitutes"], &params)
            .await?;

        match response.substitutes {
            Some(substitutes) => Ok(substitutes),
            None => {
                tracing::info!(
                    "No substitutes for '{}': {}",
                    ingredient,
                    response.message.unwrap_or_default()
                );
                Ok(Vec::new())
            }
        }
    }

    async fn shopping_list(&self, username: &str, hash: &str) -> Result<ShoppingList> {
        let params = [("hash", hash.to_string())];
        self.get_json(&["mealplanner", username, "shopping-list"], &params)
            .await
    }
}
