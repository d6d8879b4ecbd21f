use crate::domain::model::{
    Instruction, MealPlan, MealPlanRequest, RecipeInformation, RecipeSearch, RecipeSummary,
    ShoppingList,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location a relative path resolves to, for messages shown to the user.
    fn describe(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn data_dir(&self) -> &str;
    fn comments_file(&self) -> &str;
    fn history_file(&self) -> &str;
    fn shopping_list_file(&self) -> &str;
    fn number_of_recipes(&self) -> usize;
}

/// Read-only access to the recipe service.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn generate_meal_plan(&self, request: &MealPlanRequest) -> Result<MealPlan>;
    async fn search_recipes(&self, search: &RecipeSearch) -> Result<Vec<RecipeSummary>>;
    async fn recipe_information(&self, recipe_id: u64) -> Result<RecipeInformation>;
    async fn analyzed_instructions(&self, recipe_id: u64) -> Result<Vec<Instruction>>;
    async fn ingredient_substitutes(&self, ingredient: &str) -> Result<Vec<String>>;
    async fn shopping_list(&self, username: &str, hash: &str) -> Result<ShoppingList>;
}
