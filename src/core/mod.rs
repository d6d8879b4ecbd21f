pub mod aggregator;
pub mod comments;
pub mod history;
pub mod json_file;
pub mod nutrition;
pub mod shopping;
pub mod spoonacular;

pub use crate::domain::model::{IngredientLine, RecipeRecord};
pub use crate::domain::ports::{ConfigProvider, RecipeProvider, Storage};
pub use crate::utils::error::Result;
