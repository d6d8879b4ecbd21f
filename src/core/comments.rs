use crate::core::json_file;
use crate::domain::model::Comment;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use indexmap::IndexMap;

type CommentsByRecipe = IndexMap<String, Vec<Comment>>;

/// User comments per recipe, kept in one JSON object keyed by recipe id.
/// Recipe keys stay in the order they were first written.
pub struct CommentStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> CommentStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub async fn add(&self, recipe_id: u64, user: &str, text: &str) -> Result<()> {
        let mut comments: CommentsByRecipe =
            json_file::read_or_default(&self.storage, &self.file_name).await;

        comments
            .entry(recipe_id.to_string())
            .or_default()
            .push(Comment {
                user: user.to_string(),
                text: text.to_string(),
            });

        json_file::write_pretty(&self.storage, &self.file_name, &comments).await?;
        tracing::debug!("Stored comment by '{}' on recipe {}", user, recipe_id);
        Ok(())
    }

    pub async fn for_recipe(&self, recipe_id: u64) -> Vec<Comment> {
        let mut comments: CommentsByRecipe =
            json_file::read_or_default(&self.storage, &self.file_name).await;
        comments.shift_remove(&recipe_id.to_string()).unwrap_or_default()
    }
}
