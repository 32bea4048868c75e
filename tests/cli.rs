use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn recipebox(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("recipebox").unwrap();
    cmd.env("RECIPEBOX_HOME", home.path())
        .env("RECIPEBOX_API_URL", "http://127.0.0.1:1")
        .env_remove("RECIPEBOX_LOG")
        .env_remove("RECIPEBOX_API_KEY");
    cmd
}

fn pie() -> serde_json::Value {
    json!({
        "idMeal": "52874",
        "strMeal": "Beef and Mustard Pie",
        "strCategory": "Beef",
        "strArea": "British",
        "strInstructions": "Preheat the oven to 150C.\r\n\r\nBrown the beef in batches.\r\n\r\nBake the pie for 40 minutes.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/sytuqu1511553755.jpg",
        "strTags": "Meat,Pie",
        "strIngredient1": "Beef",
        "strMeasure1": "1kg",
        "strIngredient2": "Mustard",
        "strMeasure2": "2 tbsp"
    })
}

async fn mock_api() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lookup.php"))
        .and(query_param("i", "52874"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": [pie()] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(query_param("s", "pie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": [pie()] })))
        .mount(&server)
        .await;
    server
}

#[test]
fn empty_favorites_by_default() {
    let home = TempDir::new().unwrap();
    recipebox(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("No favorites yet."));
    recipebox(&home)
        .args(["fav", "count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn blank_search_fails_without_network() {
    let home = TempDir::new().unwrap();
    recipebox(&home)
        .args(["search", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a search keyword."));
}

#[test]
fn unreachable_api_reports_network_error() {
    let home = TempDir::new().unwrap();
    recipebox(&home)
        .args(["search", "pie"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Network error"));
}

#[test]
fn config_round_trip() {
    let home = TempDir::new().unwrap();
    recipebox(&home)
        .args(["config", "timeout-ms", "2500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout-ms set to 2500"));
    recipebox(&home)
        .args(["config", "timeout-ms"])
        .assert()
        .success()
        .stdout("2500\n");
    recipebox(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("debounce-ms").and(predicate::str::contains("300")));
    assert!(home.path().join("config.json").exists());
}

#[tokio::test]
async fn search_then_favorite() {
    let server = mock_api().await;
    let home = TempDir::new().unwrap();

    recipebox(&home)
        .env("RECIPEBOX_API_URL", server.uri())
        .args(["search", "pie"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beef and Mustard Pie"))
        .stdout(predicate::str::contains("Beef · British"));

    recipebox(&home)
        .env("RECIPEBOX_API_URL", server.uri())
        .args(["fav", "add", "52874"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Beef and Mustard Pie to favorites."));

    // Second add is answered from local state.
    recipebox(&home)
        .args(["fav", "add", "52874"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in your favorites"));

    recipebox(&home)
        .args(["fav", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("52874").and(predicate::str::contains("Beef and Mustard Pie")));

    recipebox(&home)
        .args(["fav", "remove", "52874"])
        .assert()
        .success();
    recipebox(&home)
        .args(["fav", "count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[tokio::test]
async fn show_prints_ingredients_and_steps() {
    let server = mock_api().await;
    let home = TempDir::new().unwrap();

    recipebox(&home)
        .env("RECIPEBOX_API_URL", server.uri())
        .args(["show", "52874"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1kg Beef"))
        .stdout(predicate::str::contains("1. Preheat the oven to 150C."))
        .stdout(predicate::str::contains("3. Bake the pie for 40 minutes."))
        .stdout(predicate::str::contains("#Meat #Pie"));
}

#[tokio::test]
async fn browse_only_searches_settled_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(query_param("s", "pie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": [pie()] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(query_param("s", "p"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": null })))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    recipebox(&home)
        .env("RECIPEBOX_API_URL", server.uri())
        .arg("browse")
        .write_stdin("p\npi\npie\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Beef and Mustard Pie"));
}

#[test]
fn require_login_blocks_favorites() {
    let home = TempDir::new().unwrap();
    recipebox(&home)
        .args(["config", "require-login", "true"])
        .assert()
        .success();
    recipebox(&home)
        .args(["fav", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please log in to continue."));
    recipebox(&home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}

#[test]
fn login_without_api_key_is_a_config_error() {
    let home = TempDir::new().unwrap();
    recipebox(&home)
        .args(["login", "cook@example.com", "--password", "Sup3r:secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is not configured"));
}

#[test]
fn weak_password_is_rejected_before_anything_else() {
    let home = TempDir::new().unwrap();
    recipebox(&home)
        .args(["signup", "cook@example.com", "chef"])
        .env("RECIPEBOX_PASSWORD", "short")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}
