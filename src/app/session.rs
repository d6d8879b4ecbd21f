use crate::app::prompt::{split_list, Console};
use crate::core::aggregator::{aggregate, format_quantity, render, AggregatedList};
use crate::core::comments::CommentStore;
use crate::core::history::HistoryStore;
use crate::core::nutrition::{key_nutrients, taste_lines, Rating, NOT_AVAILABLE};
use crate::core::shopping::{
    render_remote_shopping_list, resolve_recipe_records, ShoppingListWriter, SHOPPING_LIST_HEADER,
};
use crate::domain::model::{
    MealPlanRequest, RecipeInformation, RecipeRecord, RecipeSearch, RecipeSummary, TimeFrame,
};
use crate::domain::ports::{ConfigProvider, RecipeProvider, Storage};
use crate::utils::error::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};

const RECENT_HISTORY_SHOWN: usize = 5;
const SEPARATOR_WIDTH: usize = 70;

fn or_na<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Answers collected before the session branches into plan or search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub diet: Option<String>,
    pub ingredients: Vec<String>,
    pub intolerances: Vec<String>,
}

/// The interactive dialogue: one linear pass of prompts per run.
pub struct Session<P, S, R, W>
where
    P: RecipeProvider,
    S: Storage + Clone,
    R: BufRead,
    W: Write,
{
    provider: P,
    comments: CommentStore<S>,
    history: HistoryStore<S>,
    shopping_list: ShoppingListWriter<S>,
    number_of_recipes: usize,
    console: Console<R, W>,
}

impl<P, S, R, W> Session<P, S, R, W>
where
    P: RecipeProvider,
    S: Storage + Clone,
    R: BufRead,
    W: Write,
{
    pub fn new<C: ConfigProvider>(config: &C, provider: P, storage: S, input: R, output: W) -> Self {
        Self {
            provider,
            comments: CommentStore::new(storage.clone(), config.comments_file()),
            history: HistoryStore::new(storage.clone(), config.history_file()),
            shopping_list: ShoppingListWriter::new(storage, config.shopping_list_file()),
            number_of_recipes: config.number_of_recipes(),
            console: Console::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    pub async fn run(&mut self) -> Result<()> {
        self.greet().await?;
        let preferences = self.ask_preferences()?;

        if self
            .console
            .confirm("\nDeseja que lhe seja fornecido um plano de refeições?(sim/nao): ")?
        {
            self.meal_plan(&preferences).await
        } else {
            self.recipe_search(&preferences).await
        }
    }

    async fn greet(&mut self) -> Result<()> {
        self.console
            .say("Bem vindo ao Planeador de Refeições Inteligentes")?;

        let recent = self.history.recent(RECENT_HISTORY_SHOWN).await;
        if !recent.is_empty() {
            self.console.say("\nReceitas vistas recentemente:")?;
            for entry in recent {
                self.console.say(format!(
                    " - {} ({})",
                    entry.title,
                    entry.viewed_at.format("%Y-%m-%d %H:%M")
                ))?;
            }
        }

        self.console.say("\nOpções de dieta disponíveis: ")?;
        self.console.say(
            "- vegetarian\n- vegan\n- gluten free\n- ketogenic\n- pescetarian\n- paleo\n- etc...\n",
        )
    }

    fn ask_preferences(&mut self) -> Result<Preferences> {
        let diet = self
            .console
            .ask("Qual o tipo de dieta que deseja seguir: ")?
            .to_lowercase();
        let ingredients = self
            .console
            .ask_list("Que ingredientes tens disponiveis no momento(separados por virgulas): ")?;
        let intolerances = split_list(
            &self
                .console
                .ask("Que intolerâncias alimentares tens(separar por virgulas): ")?
                .to_lowercase(),
        );

        let preferences = Preferences {
            diet: (!diet.is_empty()).then_some(diet),
            ingredients,
            intolerances,
        };
        tracing::debug!("Preferences: {:?}", preferences);
        Ok(preferences)
    }

    async fn meal_plan(&mut self, preferences: &Preferences) -> Result<()> {
        let time_frame = match self
            .console
            .ask("Qual o período do plano?(dia/semana): ")?
            .parse::<TimeFrame>()
        {
            Ok(time_frame) => time_frame,
            Err(e) => {
                tracing::warn!("{}, using a daily plan", e);
                self.console.say("Período inválido, será gerado um plano diário.")?;
                TimeFrame::Day
            }
        };

        let calories_answer = self.console.ask("Qual a meta de calorias para o plano? ")?;
        let target_calories = if calories_answer.is_empty() {
            None
        } else {
            match calories_answer.parse::<u32>() {
                Ok(calories) => Some(calories),
                Err(_) => {
                    self.console.say("Valor de calorias inserido é invalido.")?;
                    None
                }
            }
        };

        let request = MealPlanRequest {
            time_frame,
            target_calories,
            diet: preferences.diet.clone(),
            exclude: preferences.intolerances.clone(),
        };

        let plan = match self.provider.generate_meal_plan(&request).await {
            Ok(plan) => plan,
            Err(e) => {
                tracing::error!("Meal plan generation failed: {}", e);
                self.console
                    .say(format!("Erro ao gerar plano de refeições: {}", e))?;
                return self
                    .console
                    .say("Não foi possível criar o teu plano de refeições.");
            }
        };

        let meals = plan.all_meals();
        if meals.is_empty() {
            return self.console.say("Não há refeições disponiveis no plano.");
        }

        self.console
            .say("\nO teu plano de refeições já está disponível. Aqui estão as refeições:")?;
        for (i, meal) in meals.iter().enumerate() {
            self.console.say(format!(
                "{}.{} (Doses: {}, Tempo de preparo: {} minutos)",
                i + 1,
                meal.title,
                or_na(meal.servings),
                or_na(meal.ready_in_minutes)
            ))?;
        }

        if let Some(nutrients) = &plan.nutrients {
            self.console.say(format!(
                "Total do plano: {} kcal | {} g proteina | {} g gordura | {} g hidratos",
                or_na(nutrients.calories.map(format_quantity)),
                or_na(nutrients.protein.map(format_quantity)),
                or_na(nutrients.fat.map(format_quantity)),
                or_na(nutrients.carbohydrates.map(format_quantity))
            ))?;
        }

        let meal_ids: Vec<u64> = meals.iter().map(|meal| meal.id).collect();
        if self
            .console
            .confirm("\nDeseja gerar a lista de compras para este plano?(sim/nao): ")?
        {
            self.shopping_list_for_meals(&meal_ids).await?;
        }
        Ok(())
    }

    async fn shopping_list_for_meals(&mut self, meal_ids: &[u64]) -> Result<()> {
        let resolved = resolve_recipe_records(&self.provider, meal_ids).await;
        for (recipe_id, e) in &resolved.skipped {
            self.console.say(format!(
                "Erro ao obter detalhes da receita {}: {}",
                recipe_id, e
            ))?;
        }

        let list = aggregate(&resolved.records);
        self.present_and_save(&list).await
    }

    async fn present_and_save(&mut self, list: &AggregatedList) -> Result<()> {
        self.console.say(format!("\n{}", SHOPPING_LIST_HEADER))?;
        for line in render(list) {
            self.console.say(format!(" - {}", line))?;
        }

        match self.shopping_list.write(list).await {
            Ok(location) => self
                .console
                .say(format!("Lista de compras guardada em {}", location)),
            Err(e) => {
                tracing::error!("Could not save shopping list: {}", e);
                self.console
                    .say(format!("Não foi possível guardar a lista de compras: {}", e))
            }
        }
    }

    async fn recipe_search(&mut self, preferences: &Preferences) -> Result<()> {
        self.console
            .say("\nApresentar receitas com ingredientes disponiveis.")?;

        let search = RecipeSearch {
            ingredients: preferences.ingredients.clone(),
            number: self.number_of_recipes,
            diet: preferences.diet.clone(),
            intolerances: preferences.intolerances.clone(),
        };
        let recipes = match self.provider.search_recipes(&search).await {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::error!("Recipe search failed: {}", e);
                self.console.say(format!("Erro ao obter receitas: {}", e))?;
                Vec::new()
            }
        };

        if !recipes.is_empty() {
            self.console.say(format!(
                "\nReceitas disponiveis {} com os ingredientes fornecidos:\n",
                recipes.len()
            ))?;
            for (i, recipe) in recipes.iter().enumerate() {
                self.console.say(format!("{}.{}", i + 1, recipe.title))?;
            }
        }

        let Some(chosen) = self.choose_recipe(&recipes)? else {
            return self.console.say("Escolha inválida.");
        };

        match self.provider.recipe_information(chosen.id).await {
            Ok(info) => self.recipe_details(&info).await?,
            Err(e) => {
                tracing::error!("Could not load recipe {}: {}", chosen.id, e);
                self.console.say(format!(
                    "Erro ao obter detalhes da receita {}: {}",
                    chosen.id, e
                ))?;
                self.console
                    .say("Não foi possível obter os detalhes da receita escolhida.")?;
            }
        }

        self.remote_shopping_list().await
    }

    fn choose_recipe(&mut self, recipes: &[RecipeSummary]) -> Result<Option<RecipeSummary>> {
        let answer = self
            .console
            .ask("\nEscolha o número da receita que deseja observar detalhadamente: ")?;

        let chosen = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| recipes.get(index))
            .cloned();
        Ok(chosen)
    }

    async fn recipe_details(&mut self, info: &RecipeInformation) -> Result<()> {
        self.show_summary(info)?;
        self.show_instructions(info.id).await?;

        if let Some(taste) = info.taste.as_ref().filter(|t| !t.is_empty()) {
            self.console.say("\nPerfil de sabor:")?;
            for line in taste_lines(taste) {
                self.console.say(line)?;
            }
        }

        if let Err(e) = self.history.record(info.id, &info.title).await {
            tracing::warn!("Could not update history: {}", e);
        }

        self.show_comments(info.id).await?;
        self.offer_comment(info.id).await?;

        self.console.say("=".repeat(SEPARATOR_WIDTH))?;
        self.console.say("\n")?;

        self.offer_substitutes().await?;

        if self.console.confirm(
            "\nDeseja guardar os ingredientes desta receita numa lista de compras?(sim/nao): ",
        )? {
            let list = aggregate([&RecipeRecord::from(info)]);
            self.present_and_save(&list).await?;
        }
        Ok(())
    }

    fn show_summary(&mut self, info: &RecipeInformation) -> Result<()> {
        let nutrients = key_nutrients(info.nutrition.as_ref());

        self.console.say(format!("\n{}", info.title))?;
        self.console.say(format!(
            "Tempo de preparo: {} min",
            or_na(info.ready_in_minutes)
        ))?;
        self.console
            .say(format!("Número doses: {}", or_na(info.servings)))?;
        self.console
            .say(format!("\nIngredientes necessarios para {}: ", info.title))?;
        for ingredient in &info.extended_ingredients {
            self.console.say(format!(" - {}", ingredient.name))?;
        }
        self.console.say(format!(
            "Valores Nutricionais: {} | {} proteina | {} gordura | {} hidratos",
            nutrients.calories, nutrients.protein, nutrients.fat, nutrients.carbohydrates
        ))?;

        let score = info.spoonacular_score.map(|s| (s * 100.0).round() / 100.0);
        self.console.say("\nAvaliações da receita:")?;
        self.console
            .say(format!(" - Likes: {}", or_na(info.aggregate_likes)))?;
        self.console
            .say(format!(
                " - Pontuação Spoonacular: {}/100",
                or_na(score.map(format_quantity))
            ))?;
        if let Some(score) = score {
            self.console.say(Rating::from_score(score).message())?;
        }
        Ok(())
    }

    async fn show_instructions(&mut self, recipe_id: u64) -> Result<()> {
        let instructions = match self.provider.analyzed_instructions(recipe_id).await {
            Ok(instructions) => instructions,
            Err(e) => {
                tracing::warn!("Instructions for recipe {} unavailable: {}", recipe_id, e);
                Vec::new()
            }
        };

        let steps: Vec<_> = instructions
            .iter()
            .flat_map(|instruction| instruction.steps.iter())
            .collect();
        if steps.is_empty() {
            return self.console.say("\nModo de preparo não disponivel.");
        }

        self.console.say("\nModo de preparo:")?;
        for (position, step) in steps.into_iter().enumerate() {
            let number = step.number.unwrap_or(position as u32 + 1);
            self.console
                .say(format!("Passo {}: {}", number, step.step))?;
        }
        Ok(())
    }

    async fn show_comments(&mut self, recipe_id: u64) -> Result<()> {
        let comments = self.comments.for_recipe(recipe_id).await;
        if comments.is_empty() {
            return self
                .console
                .say("\nAinda não existem comentários para esta receita.");
        }

        self.console
            .say("\nComentários de utilizadores sobre esta receita:")?;
        for comment in comments {
            self.console
                .say(format!("- {}: {}", comment.user, comment.text))?;
        }
        Ok(())
    }

    async fn offer_comment(&mut self, recipe_id: u64) -> Result<()> {
        if !self
            .console
            .confirm("\nDeseja adicionar um comentario sobre esta receita?(sim/nao): ")?
        {
            return Ok(());
        }

        let user = self.console.ask("Insira o seu nome de utilizador: ")?;
        let text = self.console.ask("Escreva o seu comentario: ")?;
        match self.comments.add(recipe_id, &user, &text).await {
            Ok(()) => self.console.say("Comentario guardado com sucesso."),
            Err(e) => {
                tracing::error!("Could not save comment: {}", e);
                self.console
                    .say(format!("Não foi possível guardar o comentario: {}", e))
            }
        }
    }

    async fn offer_substitutes(&mut self) -> Result<()> {
        if !self.console.confirm(
            "\nDeseja receber sugestões de substitutos para algum ingrediente desta receita?(sim/nao): ",
        )? {
            return Ok(());
        }

        let ingredient = self
            .console
            .ask("Qual o nome do ingrediente que deseja procurar por substitutos:  ")?;
        let substitutes = match self.provider.ingredient_substitutes(&ingredient).await {
            Ok(substitutes) => substitutes,
            Err(e) => {
                self.console.say(format!(
                    "Erro ao obter substitutos para {}: {}",
                    ingredient, e
                ))?;
                Vec::new()
            }
        };

        if substitutes.is_empty() {
            return self.console.say(format!(
                "\nInfelizmente, não foi possivel encontrar substitutos para {}.",
                ingredient
            ));
        }

        self.console
            .say(format!("\nSubstitutos para {}:", ingredient))?;
        for substitute in substitutes {
            self.console.say(format!(" - {}", substitute))?;
        }
        Ok(())
    }

    async fn remote_shopping_list(&mut self) -> Result<()> {
        if !self
            .console
            .confirm("\nDeseja observar a sua lista de compras?(sim/nao): ")?
        {
            return Ok(());
        }

        let username = self.console.ask("Insira o seu username: ")?;
        let hash = self.console.ask("Insira o seu hash de usuario: ")?;

        match self.provider.shopping_list(&username, &hash).await {
            Ok(list) => {
                self.console
                    .say("\nAqui está a sua lista de compras organizada:\n")?;
                for line in render_remote_shopping_list(&list) {
                    self.console.say(line)?;
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Shopping list for '{}' unavailable: {}", username, e);
                self.console
                    .say(format!("Erro ao obter a lista de compras: {}", e))?;
                self.console.say("Não foi possivel obter a lista de compras.")
            }
        }
    }
}
