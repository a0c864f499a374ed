//! HTTP 수준 테스트
//!
//! 실제 소켓 없이 `routes::router()`를 axum-test의 `TestServer`로 직접 호출합니다.
//! 테스트마다 마이그레이션과 카탈로그가 적용된 새 인메모리 DB를 씁니다.

use std::collections::HashMap;

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use foodgram::{
    db,
    middleware::auth::create_access_token,
    routes::{self, AppState},
    services::catalog::{self, Catalog},
};
use serde_json::{json, Value};

const SECRET: &str = "test-secret";
const PUBLIC_URL: &str = "https://food.example";

const CATALOG: &str = r##"{
    "tags": [
        { "name": "Завтрак", "color": "#E26C2D", "slug": "breakfast" },
        { "name": "Обед", "color": "#49B64E", "slug": "lunch" }
    ],
    "ingredients": [
        { "name": "соль", "measurement_unit": "г" },
        { "name": "молоко", "measurement_unit": "мл" },
        { "name": "мука", "measurement_unit": "г" }
    ]
}"##;

struct TestApp {
    server: TestServer,
    /// slug → tag id
    tags: HashMap<String, String>,
    /// ingredient name → ingredient id
    ingredients: HashMap<String, String>,
}

struct TestUser {
    id: String,
    token: String,
}

async fn spawn_app() -> TestApp {
    let pool = db::connect("sqlite::memory:", 1).await.unwrap();
    db::migrate(&pool).await.unwrap();
    let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
    catalog::load(&pool, &catalog).await.unwrap();

    let state = AppState {
        pool,
        jwt_secret: SECRET.to_string(),
        public_url: PUBLIC_URL.to_string(),
        min_value: 1,
        short_code_length: 6,
    };
    let server = TestServer::new(routes::router(state)).unwrap();

    let tags = server.get("/api/tags").await.json::<Value>()["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| (t["slug"].as_str().unwrap().to_string(), t["id"].as_str().unwrap().to_string()))
        .collect();
    let ingredients = server.get("/api/ingredients").await.json::<Value>()["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| (i["name"].as_str().unwrap().to_string(), i["id"].as_str().unwrap().to_string()))
        .collect();

    TestApp {
        server,
        tags,
        ingredients,
    }
}

impl TestApp {
    async fn register(&self, username: &str) -> TestUser {
        let response = self
            .server
            .post("/api/users")
            .json(&json!({
                "email": format!("{}@example.com", username),
                "username": username,
                "first_name": "Test",
                "last_name": "User",
                "password": "very-secret-pass",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let id = response.json::<Value>()["id"].as_str().unwrap().to_string();
        let token = create_access_token(&id, SECRET, chrono::Duration::hours(1)).unwrap();
        TestUser { id, token }
    }

    fn tag(&self, slug: &str) -> String {
        self.tags[slug].clone()
    }

    fn ingredient(&self, name: &str) -> String {
        self.ingredients[name].clone()
    }

    fn recipe_body(&self, ingredients: &[(&str, i64)], tags: &[&str]) -> Value {
        json!({
            "ingredients": ingredients
                .iter()
                .map(|(name, amount)| json!({ "id": self.ingredient(name), "amount": amount }))
                .collect::<Vec<_>>(),
            "tags": tags.iter().map(|slug| self.tag(slug)).collect::<Vec<_>>(),
            "image": "recipes/images/dish.png",
            "name": "Блины",
            "text": "Смешать и пожарить.",
            "cooking_time": 25,
        })
    }

    async fn create_recipe(&self, user: &TestUser, body: &Value) -> Value {
        let response = self
            .server
            .post("/api/recipes")
            .authorization_bearer(&user.token)
            .json(body)
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    async fn recipe_count(&self) -> usize {
        self.server.get("/api/recipes").await.json::<Value>()["recipes"]
            .as_array()
            .unwrap()
            .len()
    }
}

fn ids(values: &Value) -> Vec<String> {
    let mut ids: Vec<String> = values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn health_reports_ok() {
    let app = spawn_app().await;
    let body = app.server.get("/api/health").await.json::<Value>();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_returns_full_read_shape() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;

    let recipe = app
        .create_recipe(&chef, &app.recipe_body(&[("мука", 200), ("молоко", 300)], &["breakfast"]))
        .await;

    assert_eq!(recipe["name"], "Блины");
    assert_eq!(recipe["cooking_time"], 25);
    assert_eq!(recipe["author"]["id"], chef.id.as_str());
    assert_eq!(recipe["author"]["is_subscribed"], false);
    assert_eq!(recipe["tags"][0]["slug"], "breakfast");
    assert_eq!(recipe["ingredients"].as_array().unwrap().len(), 2);
    assert_eq!(recipe["is_favorited"], false);
    assert_eq!(recipe["is_in_shopping_cart"], false);
}

#[tokio::test]
async fn anonymous_flags_are_false_not_omitted() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;
    let recipe = app
        .create_recipe(&chef, &app.recipe_body(&[("соль", 1)], &["lunch"]))
        .await;
    let id = recipe["id"].as_str().unwrap();

    app.server
        .post(&format!("/api/recipes/{}/favorite", id))
        .authorization_bearer(&chef.token)
        .await
        .assert_status(StatusCode::CREATED);

    let anonymous = app.server.get(&format!("/api/recipes/{}", id)).await.json::<Value>();
    assert_eq!(anonymous["is_favorited"], Value::Bool(false));
    assert_eq!(anonymous["is_in_shopping_cart"], Value::Bool(false));
    assert_eq!(anonymous["author"]["is_subscribed"], Value::Bool(false));

    let owner = app
        .server
        .get(&format!("/api/recipes/{}", id))
        .authorization_bearer(&chef.token)
        .await
        .json::<Value>();
    assert_eq!(owner["is_favorited"], Value::Bool(true));
}

#[tokio::test]
async fn invalid_aggregates_are_rejected_and_not_persisted() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;

    let cases = [
        (app.recipe_body(&[], &["breakfast"]), "ingredients"),
        (app.recipe_body(&[("соль", 1)], &[]), "tags"),
        (app.recipe_body(&[("соль", 1)], &["lunch", "lunch"]), "tags"),
        (app.recipe_body(&[("соль", 1), ("соль", 2)], &["lunch"]), "ingredients"),
        (app.recipe_body(&[("соль", 0)], &["lunch"]), "ingredients"),
    ];

    for (body, field) in cases {
        let response = app
            .server
            .post("/api/recipes")
            .authorization_bearer(&chef.token)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        let error = &body["error"];
        assert_eq!(error["code"], "validation_error");
        assert!(error["fields"][field].is_array(), "missing {} in {}", field, error);
    }

    let mut unknown = app.recipe_body(&[("соль", 1)], &["lunch"]);
    unknown["tags"] = json!(["no-such-tag"]);
    app.server
        .post("/api/recipes")
        .authorization_bearer(&chef.token)
        .json(&unknown)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(app.recipe_count().await, 0);
}

#[tokio::test]
async fn empty_ingredients_is_the_headline_error() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;

    let response = app
        .server
        .post("/api/recipes")
        .authorization_bearer(&chef.token)
        .json(&app.recipe_body(&[], &[]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "At least one ingredient is required"
    );
}

#[tokio::test]
async fn update_replaces_ingredients_and_tags() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;
    let recipe = app
        .create_recipe(
            &chef,
            &app.recipe_body(&[("мука", 200), ("молоко", 300)], &["breakfast", "lunch"]),
        )
        .await;
    let id = recipe["id"].as_str().unwrap();

    let response = app
        .server
        .patch(&format!("/api/recipes/{}", id))
        .authorization_bearer(&chef.token)
        .json(&json!({
            "ingredients": [{ "id": app.ingredient("соль"), "amount": 5 }],
            "tags": [app.tag("lunch")],
            "name": "Суп",
        }))
        .await;
    response.assert_status_ok();

    let updated = app.server.get(&format!("/api/recipes/{}", id)).await.json::<Value>();
    assert_eq!(updated["name"], "Суп");
    assert_eq!(updated["text"], "Смешать и пожарить.");
    assert_eq!(ids(&updated["ingredients"]), vec![app.ingredient("соль")]);
    assert_eq!(updated["ingredients"][0]["amount"], 5);
    assert_eq!(ids(&updated["tags"]), vec![app.tag("lunch")]);
}

#[tokio::test]
async fn only_the_author_may_change_a_recipe() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;
    let guest = app.register("guest").await;
    let recipe = app
        .create_recipe(&chef, &app.recipe_body(&[("соль", 1)], &["lunch"]))
        .await;
    let path = format!("/api/recipes/{}", recipe["id"].as_str().unwrap());

    app.server
        .patch(&path)
        .authorization_bearer(&guest.token)
        .json(&app.recipe_body(&[("мука", 1)], &["lunch"]))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&path)
        .authorization_bearer(&guest.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&path)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .delete(&path)
        .authorization_bearer(&chef.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn anonymous_cannot_create_and_bad_tokens_are_rejected() {
    let app = spawn_app().await;

    app.server
        .post("/api/recipes")
        .json(&app.recipe_body(&[("соль", 1)], &["lunch"]))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .get("/api/recipes")
        .authorization_bearer("not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn favorite_and_cart_membership_rules() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;
    let recipe = app
        .create_recipe(&chef, &app.recipe_body(&[("соль", 1)], &["lunch"]))
        .await;
    let id = recipe["id"].as_str().unwrap();

    for kind in ["favorite", "shopping_cart"] {
        let path = format!("/api/recipes/{}/{}", id, kind);

        let added = app.server.post(&path).authorization_bearer(&chef.token).await;
        added.assert_status(StatusCode::CREATED);
        assert_eq!(
            added.json::<Value>(),
            json!({
                "id": id,
                "name": "Блины",
                "image": "recipes/images/dish.png",
                "cooking_time": 25,
            })
        );

        app.server
            .post(&path)
            .authorization_bearer(&chef.token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        app.server
            .delete(&path)
            .authorization_bearer(&chef.token)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.server
            .delete(&path)
            .authorization_bearer(&chef.token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    app.server
        .post("/api/recipes/missing/favorite")
        .authorization_bearer(&chef.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .post(&format!("/api/recipes/{}/favorite", id))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_filters_by_tag_author_and_membership() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;
    let baker = app.register("baker").await;

    let breakfast = app
        .create_recipe(&chef, &app.recipe_body(&[("мука", 1)], &["breakfast"]))
        .await;
    let lunch = app
        .create_recipe(&baker, &app.recipe_body(&[("соль", 1)], &["lunch"]))
        .await;
    let breakfast_id = breakfast["id"].as_str().unwrap().to_string();
    let lunch_id = lunch["id"].as_str().unwrap().to_string();

    let by_tag = app.server.get("/api/recipes?tags=breakfast").await.json::<Value>();
    assert_eq!(ids(&by_tag["recipes"]), vec![breakfast_id.clone()]);

    let either = app
        .server
        .get("/api/recipes?tags=breakfast&tags=lunch")
        .await
        .json::<Value>();
    assert_eq!(either["recipes"].as_array().unwrap().len(), 2);

    let by_author = app
        .server
        .get(&format!("/api/recipes?author={}", baker.id))
        .await
        .json::<Value>();
    assert_eq!(ids(&by_author["recipes"]), vec![lunch_id.clone()]);

    app.server
        .post(&format!("/api/recipes/{}/favorite", lunch_id))
        .authorization_bearer(&chef.token)
        .await
        .assert_status(StatusCode::CREATED);

    let favorites = app
        .server
        .get("/api/recipes?is_favorited=1")
        .authorization_bearer(&chef.token)
        .await
        .json::<Value>();
    assert_eq!(ids(&favorites["recipes"]), vec![lunch_id]);

    // 익명 요청에서는 멤버십 필터가 무시됩니다.
    let anonymous = app.server.get("/api/recipes?is_favorited=1").await.json::<Value>();
    assert_eq!(anonymous["recipes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn shopping_list_sums_same_ingredient_across_recipes() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;

    let first = app
        .create_recipe(&chef, &app.recipe_body(&[("соль", 5), ("молоко", 200)], &["lunch"]))
        .await;
    let second = app
        .create_recipe(&chef, &app.recipe_body(&[("соль", 3)], &["lunch"]))
        .await;
    for recipe in [&first, &second] {
        app.server
            .post(&format!("/api/recipes/{}/shopping_cart", recipe["id"].as_str().unwrap()))
            .authorization_bearer(&chef.token)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = app
        .server
        .get("/api/recipes/download_shopping_cart")
        .authorization_bearer(&chef.token)
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.text(),
        "Список покупок\n\nмолоко (мл) - 200\nсоль (г) - 8"
    );

    let disposition = response.header(header::CONTENT_DISPOSITION);
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("filename*=UTF-8''chef_"));
}

#[tokio::test]
async fn empty_cart_downloads_header_only() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;

    let response = app
        .server
        .get("/api/recipes/download_shopping_cart")
        .authorization_bearer(&chef.token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.text(), "Список покупок\n\n");

    app.server
        .get("/api/recipes/download_shopping_cart")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn short_link_resolves_or_redirects_to_not_found() {
    let app = spawn_app().await;
    let chef = app.register("chef").await;
    let recipe = app
        .create_recipe(&chef, &app.recipe_body(&[("соль", 1)], &["lunch"]))
        .await;
    let id = recipe["id"].as_str().unwrap();

    let link = app
        .server
        .get(&format!("/api/recipes/{}/get-link", id))
        .await
        .json::<Value>();
    let link = link["short-link"].as_str().unwrap();
    let code = link
        .strip_prefix(&format!("{}/s/", PUBLIC_URL))
        .expect("link starts with the public url");
    assert_eq!(code.len(), 6);

    let hit = app.server.get(&format!("/s/{}", code)).await;
    hit.assert_status(StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        hit.header(header::LOCATION).to_str().unwrap(),
        format!("/recipes/{}", id)
    );

    let miss = app.server.get("/s/zzzzzz").await;
    miss.assert_status(StatusCode::PERMANENT_REDIRECT);
    assert_eq!(miss.header(header::LOCATION).to_str().unwrap(), "/not_found");
}

#[tokio::test]
async fn follow_rules_and_subscription_listing() {
    let app = spawn_app().await;
    let reader = app.register("reader").await;
    let chef = app.register("chef").await;
    for _ in 0..3 {
        app.create_recipe(&chef, &app.recipe_body(&[("соль", 1)], &["lunch"]))
            .await;
    }

    // 자기 자신 구독은 몇 번을 시도해도 거절됩니다.
    for _ in 0..2 {
        app.server
            .post(&format!("/api/users/{}/subscribe", reader.id))
            .authorization_bearer(&reader.token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let subscribed = app
        .server
        .post(&format!("/api/users/{}/subscribe?recipes_limit=1", chef.id))
        .authorization_bearer(&reader.token)
        .await;
    subscribed.assert_status(StatusCode::CREATED);
    let body = subscribed.json::<Value>();
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(body["recipes_count"], 3);

    app.server
        .post(&format!("/api/users/{}/subscribe", chef.id))
        .authorization_bearer(&reader.token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let list = app
        .server
        .get("/api/users/subscriptions?recipes_limit=2")
        .authorization_bearer(&reader.token)
        .await
        .json::<Value>();
    let subscriptions = list["subscriptions"].as_array().unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0]["username"], "chef");
    assert_eq!(subscriptions[0]["recipes"].as_array().unwrap().len(), 2);

    let ignored_limit = app
        .server
        .get("/api/users/subscriptions?recipes_limit=abc")
        .authorization_bearer(&reader.token)
        .await
        .json::<Value>();
    assert_eq!(
        ignored_limit["subscriptions"][0]["recipes"].as_array().unwrap().len(),
        3
    );

    app.server
        .delete(&format!("/api/users/{}/subscribe", chef.id))
        .authorization_bearer(&reader.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .delete(&format!("/api/users/{}/subscribe", chef.id))
        .authorization_bearer(&reader.token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .post("/api/users/missing/subscribe")
        .authorization_bearer(&reader.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn registration_profile_and_password_change() {
    let app = spawn_app().await;
    let ivan = app.register("ivan").await;

    let duplicate = app
        .server
        .post("/api/users")
        .json(&json!({
            "email": "ivan@example.com",
            "username": "ivan2",
            "first_name": "Ivan",
            "last_name": "Petrov",
            "password": "very-secret-pass",
        }))
        .await;
    duplicate.assert_status(StatusCode::BAD_REQUEST);

    let reserved = app
        .server
        .post("/api/users")
        .json(&json!({
            "email": "me@example.com",
            "username": "me",
            "first_name": "Me",
            "last_name": "Myself",
            "password": "very-secret-pass",
        }))
        .await;
    reserved.assert_status(StatusCode::BAD_REQUEST);

    let me = app
        .server
        .get("/api/users/me")
        .authorization_bearer(&ivan.token)
        .await
        .json::<Value>();
    assert_eq!(me["username"], "ivan");
    assert!(me.get("password").is_none());
    assert!(me.get("password_hash").is_none());

    app.server.get("/api/users/me").await.assert_status(StatusCode::UNAUTHORIZED);

    let user = app
        .server
        .get(&format!("/api/users/{}", ivan.id))
        .await
        .json::<Value>();
    assert_eq!(user["is_subscribed"], false);

    app.server
        .post("/api/users/set_password")
        .authorization_bearer(&ivan.token)
        .json(&json!({ "current_password": "wrong-pass", "new_password": "another-pass" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .post("/api/users/set_password")
        .authorization_bearer(&ivan.token)
        .json(&json!({ "current_password": "very-secret-pass", "new_password": "another-pass" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let users = app.server.get("/api/users").await.json::<Value>();
    assert_eq!(users["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn catalog_lookup_and_prefix_search() {
    let app = spawn_app().await;

    let found = app
        .server
        .get("/api/ingredients")
        .add_query_param("name", "мо")
        .await
        .json::<Value>();
    let names: Vec<&str> = found["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["молоко"]);

    let upper = app
        .server
        .get("/api/ingredients")
        .add_query_param("name", "Мол")
        .await
        .json::<Value>();
    assert_eq!(upper["ingredients"][0]["name"], "молоко");
    assert_eq!(upper["ingredients"].as_array().unwrap().len(), 1);

    let tag = app
        .server
        .get(&format!("/api/tags/{}", app.tag("lunch")))
        .await
        .json::<Value>();
    assert_eq!(tag["slug"], "lunch");
    assert_eq!(tag["color"], "#49B64E");

    app.server.get("/api/tags/missing").await.assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/api/ingredients/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn token_for_deleted_user_is_unauthorized() {
    let app = spawn_app().await;
    let author = app.register("author").await;
    let recipe = app
        .create_recipe(&author, &app.recipe_body(&[("соль", 5)], &["lunch"]))
        .await;
    let recipe_id = recipe["id"].as_str().unwrap();

    let ghost = create_access_token("no-such-user", SECRET, chrono::Duration::hours(1)).unwrap();

    let create = app
        .server
        .post("/api/recipes")
        .authorization_bearer(&ghost)
        .json(&app.recipe_body(&[("мука", 100)], &["breakfast"]))
        .await;
    create.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(create.json::<Value>()["error"]["code"], "unauthorized");

    for path in [
        format!("/api/recipes/{}/favorite", recipe_id),
        format!("/api/recipes/{}/shopping_cart", recipe_id),
        format!("/api/users/{}/subscribe", author.id),
    ] {
        app.server
            .post(&path)
            .authorization_bearer(&ghost)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    app.server
        .get("/api/users/me")
        .authorization_bearer(&ghost)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .get("/api/users/subscriptions")
        .authorization_bearer(&ghost)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(app.recipe_count().await, 1);
}

#[tokio::test]
async fn mistyped_body_is_a_validation_error() {
    let app = spawn_app().await;
    let user = app.register("cook").await;

    let mut fractional = app.recipe_body(&[("соль", 5)], &["lunch"]);
    fractional["ingredients"][0]["amount"] = json!(1.5);
    let response = app
        .server
        .post("/api/recipes")
        .authorization_bearer(&user.token)
        .json(&fractional)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["fields"]["ingredients"].is_array());

    let mut wordy = app.recipe_body(&[("соль", 5)], &["lunch"]);
    wordy["cooking_time"] = json!("abc");
    let response = app
        .server
        .post("/api/recipes")
        .authorization_bearer(&user.token)
        .json(&wordy)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]["fields"]["cooking_time"].is_array());

    let response = app
        .server
        .post("/api/users")
        .json(&json!({ "username": "nomail", "first_name": "A", "last_name": "B", "password": "very-secret-pass" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]["fields"]["email"].is_array());

    let response = app
        .server
        .post("/api/recipes")
        .authorization_bearer(&user.token)
        .bytes(axum::body::Bytes::from_static(b"{"))
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "bad_request");

    assert_eq!(app.recipe_count().await, 0);
}
