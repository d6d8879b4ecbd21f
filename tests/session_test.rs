use httpmock::prelude::*;
use meal_planner::{LocalStorage, Session, Settings, SpoonacularClient};
use std::io::Cursor;
use tempfile::TempDir;

fn answers(lines: &[&str]) -> Cursor<String> {
    let mut script = lines.join("\n");
    script.push('\n');
    Cursor::new(script)
}

async fn run_session(server: &MockServer, data_dir: &TempDir, input: Cursor<String>) -> String {
    try_run_session(server, data_dir, input).await.unwrap()
}

async fn try_run_session(
    server: &MockServer,
    data_dir: &TempDir,
    input: Cursor<String>,
) -> anyhow::Result<String> {
    let data_path = data_dir
        .path()
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("temp dir is not UTF-8"))?
        .to_string();
    let settings = Settings::new("test-key")
        .with_base_url(server.base_url())
        .with_data_dir(data_path.clone());

    let provider = SpoonacularClient::new(&settings)?;
    let storage = LocalStorage::new(data_path);
    let mut session = Session::new(&settings, provider, storage, input, Vec::new());

    session.run().await?;
    Ok(String::from_utf8(session.into_output())?)
}

fn recipe_info(id: u64, title: &str, ingredients: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "readyInMinutes": 15,
        "servings": 2,
        "extendedIngredients": ingredients
    })
}

fn metric(name: &str, amount: f64, unit: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "measures": {"metric": {"amount": amount, "unitShort": unit, "unitLong": unit}}
    })
}

#[tokio::test]
async fn test_meal_plan_builds_shopping_list() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let plan_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/mealplanner/generate")
            .query_param("apiKey", "test-key")
            .query_param("timeFrame", "day")
            .query_param("targetCalories", "2000")
            .query_param("diet", "vegetarian");
        then.status(200).json_body(serde_json::json!({
            "meals": [
                {"id": 1, "title": "Pancakes", "readyInMinutes": 20, "servings": 2},
                {"id": 2, "title": "Omelette", "readyInMinutes": 10, "servings": 1},
                {"id": 3, "title": "Mystery Stew"}
            ],
            "nutrients": {"calories": 1987.5}
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/recipes/1/information");
        then.status(200).json_body(recipe_info(
            1,
            "Pancakes",
            serde_json::json!([metric("flour", 200.0, "g"), metric("egg", 2.0, "")]),
        ));
    });
    server.mock(|when, then| {
        when.method(GET).path("/recipes/2/information");
        then.status(200).json_body(recipe_info(
            2,
            "Omelette",
            serde_json::json!([metric("egg", 3.0, ""), metric("milk", 100.0, "ml")]),
        ));
    });
    server.mock(|when, then| {
        when.method(GET).path("/recipes/3/information");
        then.status(500).body("upstream failure");
    });

    let output = run_session(
        &server,
        &data_dir,
        answers(&["Vegetarian", "tomato, rice", "", "sim", "dia", "2000", "sim"]),
    )
    .await;

    plan_mock.assert();
    assert!(output.contains("1.Pancakes (Doses: 2, Tempo de preparo: 20 minutos)"));
    assert!(output.contains("3.Mystery Stew (Doses: N/A, Tempo de preparo: N/A minutos)"));
    assert!(output.contains("Total do plano: 1987.5 kcal | N/A g proteina"));
    assert!(output.contains("Erro ao obter detalhes da receita 3"));
    assert!(output.contains(" - egg: 5.0"));

    let saved = std::fs::read_to_string(data_dir.path().join("lista_compras.txt")).unwrap();
    assert_eq!(
        saved,
        "Lista de compras:\nflour: 200.0\negg: 5.0\nmilk: 100.0\n"
    );
}

#[tokio::test]
async fn test_invalid_calories_still_generates_plan() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let plan_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/mealplanner/generate")
            .query_param("timeFrame", "week")
            .query_param("exclude", "gluten,dairy");
        then.status(200).json_body(serde_json::json!({
            "week": {
                "monday": {"meals": [{"id": 1, "title": "Oats", "servings": 1, "readyInMinutes": 5}]},
                "tuesday": {"meals": [{"id": 2, "title": "Soup", "servings": 4, "readyInMinutes": 45}]}
            }
        }));
    });

    let output = run_session(
        &server,
        &data_dir,
        answers(&["", "", "Gluten, Dairy", "sim", "semana", "muitas", "nao"]),
    )
    .await;

    plan_mock.assert();
    assert!(output.contains("Valor de calorias inserido é invalido."));
    assert!(output.contains("2.Soup (Doses: 4, Tempo de preparo: 45 minutos)"));
    assert!(!data_dir.path().join("lista_compras.txt").exists());
}

#[tokio::test]
async fn test_recipe_search_full_walkthrough() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/recipes/complexSearch")
            .query_param("includeIngredients", "tomato")
            .query_param("number", "5");
        then.status(200).json_body(serde_json::json!({
            "results": [{"id": 10, "title": "Tomato Soup"}, {"id": 11, "title": "Tomato Salad"}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/recipes/10/information")
            .query_param("includeNutrition", "true")
            .query_param("addTasteData", "true");
        then.status(200).json_body(serde_json::json!({
            "id": 10,
            "title": "Tomato Soup",
            "readyInMinutes": 30,
            "servings": 4,
            "aggregateLikes": 120,
            "spoonacularScore": 85.1234,
            "extendedIngredients": [
                {"name": "tomato", "measures": {"metric": {"amount": 400.0, "unitShort": "g"}}},
                {"name": "salt"}
            ],
            "nutrition": {"nutrients": [
                {"name": "Calories", "amount": 180.0, "unit": "kcal"},
                {"name": "Protein", "amount": 4.5, "unit": "g"}
            ]},
            "taste": {"sweetness": 22.5, "saltiness": 40.0}
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/recipes/10/analyzedInstructions")
            .query_param("stepBreakdown", "true");
        then.status(200).json_body(serde_json::json!([
            {"name": "", "steps": [
                {"number": 1, "step": "Chop the tomatoes."},
                {"number": 2, "step": "Simmer for 20 minutes."}
            ]}
        ]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/food/ingredients/substitutes")
            .query_param("ingredientName", "salt");
        then.status(200).json_body(serde_json::json!({
            "ingredient": "salt",
            "substitutes": ["1 tsp = 1 tsp soy sauce"],
            "message": "Found 1 substitutes for the ingredient."
        }));
    });

    let output = run_session(
        &server,
        &data_dir,
        answers(&[
            "", "tomato", "", "nao", "1", "sim", "ana", "Muito boa!", "sim", "salt", "sim", "nao",
        ]),
    )
    .await;

    search_mock.assert();
    assert!(output.contains("Receitas disponiveis 2 com os ingredientes fornecidos:"));
    assert!(output.contains("2.Tomato Salad"));
    assert!(output.contains("Número doses: 4"));
    assert!(output.contains("Valores Nutricionais: 180.0 kcal | 4.5 g proteina | N/A gordura"));
    assert!(output.contains(" - Pontuação Spoonacular: 85.12/100"));
    assert!(output.contains("Receita muito bem avaliada pelos nossos utilizadores."));
    assert!(output.contains("Passo 2: Simmer for 20 minutes."));
    assert!(output.contains(" Sweetness: 22.5"));
    assert!(output.contains("Ainda não existem comentários para esta receita."));
    assert!(output.contains("Comentario guardado com sucesso."));
    assert!(output.contains(" - 1 tsp = 1 tsp soy sauce"));

    let saved = std::fs::read_to_string(data_dir.path().join("lista_compras.txt")).unwrap();
    assert_eq!(saved, "Lista de compras:\ntomato: 400.0\nsalt: 0.0\n");

    let comments: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(data_dir.path().join("comentarios.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(comments["10"][0]["utilizador"], "ana");
    assert_eq!(comments["10"][0]["comentario"], "Muito boa!");

    let history: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(data_dir.path().join("historico.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(history[0]["recipe_id"], 10);
}

#[tokio::test]
async fn test_previous_comments_and_history_are_shown() {
    let data_dir = TempDir::new().unwrap();
    std::fs::write(
        data_dir.path().join("comentarios.json"),
        r#"{"10": [{"utilizador": "rui", "comentario": "Demasiado sal"}]}"#,
    )
    .unwrap();
    std::fs::write(
        data_dir.path().join("historico.json"),
        r#"[{"recipe_id": 10, "title": "Tomato Soup", "viewed_at": "2026-01-02T10:30:00Z"}]"#,
    )
    .unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/recipes/complexSearch");
        then.status(200)
            .json_body(serde_json::json!({"results": [{"id": 10, "title": "Tomato Soup"}]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/recipes/10/information");
        then.status(200)
            .json_body(recipe_info(10, "Tomato Soup", serde_json::json!([])));
    });
    server.mock(|when, then| {
        when.method(GET).path("/recipes/10/analyzedInstructions");
        then.status(200).json_body(serde_json::json!([]));
    });

    let output = run_session(
        &server,
        &data_dir,
        answers(&["", "tomato", "", "nao", "1", "nao", "nao", "nao", "nao"]),
    )
    .await;

    assert!(output.contains("Receitas vistas recentemente:"));
    assert!(output.contains(" - Tomato Soup (2026-01-02 10:30)"));
    assert!(output.contains("- rui: Demasiado sal"));
    assert!(output.contains("Modo de preparo não disponivel."));
    assert!(output.contains(" - Pontuação Spoonacular: N/A/100"));
}

#[tokio::test]
async fn test_invalid_choice_ends_session() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/recipes/complexSearch");
        then.status(200)
            .json_body(serde_json::json!({"results": [{"id": 10, "title": "Tomato Soup"}]}));
    });
    let details_mock = server.mock(|when, then| {
        when.method(GET).path("/recipes/10/information");
        then.status(200)
            .json_body(recipe_info(10, "Tomato Soup", serde_json::json!([])));
    });

    let output = run_session(
        &server,
        &data_dir,
        answers(&["", "tomato", "", "nao", "9"]),
    )
    .await;

    assert!(output.contains("Escolha inválida."));
    assert!(!output.contains("Deseja observar a sua lista de compras"));
    details_mock.assert_hits(0);
}

#[tokio::test]
async fn test_failed_details_still_offers_remote_list() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/recipes/complexSearch");
        then.status(200)
            .json_body(serde_json::json!({"results": [{"id": 10, "title": "Tomato Soup"}]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/recipes/10/information");
        then.status(404).body("not found");
    });
    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/mealplanner/ana/shopping-list")
            .query_param("hash", "abc123");
        then.status(200).json_body(serde_json::json!({
            "aisles": [
                {"aisle": "Produce", "items": [
                    {"name": "tomato", "measures": {"metric": {"amount": 400.0, "unit": "g"}}}
                ]}
            ],
            "cost": 2.499
        }));
    });

    let output = run_session(
        &server,
        &data_dir,
        answers(&["", "tomato", "", "nao", "1", "sim", "ana", "abc123"]),
    )
    .await;

    list_mock.assert();
    assert!(output.contains("Erro ao obter detalhes da receita 10"));
    assert!(output.contains("Secção: Produce"));
    assert!(output.contains(" - tomato: 400.0 g"));
    assert!(output.contains("Total estimado: 2.5€"));
}

#[tokio::test]
async fn test_search_failure_is_reported() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/recipes/complexSearch");
        then.status(401).body("invalid key");
    });

    // no results: any number is an invalid choice
    let output = run_session(
        &server,
        &data_dir,
        answers(&["", "tomato", "", "nao", "1"]),
    )
    .await;

    assert!(output.contains("Erro ao obter receitas"));
    assert!(output.contains("Escolha inválida."));
}

#[tokio::test]
async fn test_partial_recipe_payloads_still_contribute_ingredients() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/mealplanner/generate");
        then.status(200).json_body(serde_json::json!({
            "meals": [{"id": 1, "title": "Bread"}, {"id": 2}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/recipes/1/information");
        then.status(200).json_body(serde_json::json!({
            "id": 1,
            "title": "Bread",
            "extendedIngredients": [metric("flour", 200.0, "g")],
            "nutrition": {"nutrients": [{"name": "Calories", "unit": "kcal"}]}
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/recipes/2/information");
        then.status(200).json_body(serde_json::json!({
            "id": 2,
            "extendedIngredients": [metric("egg", 3.0, "")]
        }));
    });

    let output = run_session(
        &server,
        &data_dir,
        answers(&["", "", "", "sim", "dia", "", "sim"]),
    )
    .await;

    assert!(!output.contains("Erro ao obter detalhes"));
    let saved = std::fs::read_to_string(data_dir.path().join("lista_compras.txt")).unwrap();
    assert_eq!(saved, "Lista de compras:\nflour: 200.0\negg: 3.0\n");
}
