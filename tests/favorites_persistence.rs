use recipebox::favorites::{FavoritesStore, STORAGE_ERROR};
use recipebox::model::{FavoriteRecipe, RecipeSummary};
use recipebox::store::backend::StorageBackend;
use recipebox::store::fs_backend::FsBackend;
use recipebox::store::FAVORITES_KEY;
use std::fs;
use tempfile::TempDir;

fn summary(id: &str, name: &str) -> RecipeSummary {
    RecipeSummary {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: format!("https://www.themealdb.com/images/media/meals/{}.jpg", id),
        category: Some("Beef".to_string()),
        area: None,
    }
}

fn open(dir: &TempDir) -> FavoritesStore<FsBackend> {
    let mut store = FavoritesStore::new(FsBackend::new(dir.path().to_path_buf()));
    store.initialize().unwrap();
    store
}

#[test]
fn favorites_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        store.add_favorite(summary("52874", "Beef and Mustard Pie")).unwrap();
        store.add_favorite(summary("52878", "Beef Wellington")).unwrap();
        store.remove_favorite("52874").unwrap();
    }

    let store = open(&dir);
    let ids: Vec<&str> = store.favorites().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["52878"]);
    assert!(store.favorites()[0].added_at().is_some());
}

#[test]
fn blob_uses_external_field_names() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.add_favorite(summary("52874", "Beef and Mustard Pie")).unwrap();

    let blob = store.backend().get_item(FAVORITES_KEY).unwrap().unwrap();
    let raw: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(raw[0]["idMeal"], "52874");
    assert_eq!(raw[0]["strMeal"], "Beef and Mustard Pie");
    assert_eq!(raw[0]["strCategory"], "Beef");
    assert!(raw[0].get("strArea").is_none());
    assert!(raw[0]["dateAdded"].is_string());
}

#[test]
fn reads_blobs_written_by_the_mobile_client() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    backend
        .set_item(
            FAVORITES_KEY,
            r#"[{"idMeal":"52772","strMeal":"Teriyaki Chicken Casserole","strMealThumb":"x.jpg","strCategory":"Chicken","strArea":"Japanese","dateAdded":"2024-03-01T12:00:00.000Z"}]"#,
        )
        .unwrap();

    let store = open(&dir);
    let favorite: &FavoriteRecipe = store.get_favorite("52772").unwrap();
    assert_eq!(favorite.area.as_deref(), Some("Japanese"));
    assert!(favorite.added_at().is_some());
}

#[test]
fn unusual_entries_do_not_cost_the_whole_list() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    backend
        .set_item(
            FAVORITES_KEY,
            r#"[{"idMeal":"52772","strMeal":"Teriyaki Chicken Casserole","strMealThumb":null,"strCategory":null,"dateAdded":"2024-03-01T12:00:00"},
                {"idMeal":"52959","strMeal":"Baked salmon","strMealThumb":"s.jpg","dateAdded":"2024-03-02T12:00:00.000Z"}]"#,
        )
        .unwrap();

    let mut store = open(&dir);
    assert_eq!(store.favorite_count(), 2);
    assert_eq!(store.state().error, None);
    assert_eq!(store.get_favorite("52772").unwrap().thumbnail, "");

    store.add_favorite(summary("52874", "Beef and Mustard Pie")).unwrap();
    let blob = store.backend().get_item(FAVORITES_KEY).unwrap().unwrap();
    let raw: Vec<serde_json::Value> = serde_json::from_str(&blob).unwrap();
    let ids: Vec<&str> = raw.iter().filter_map(|f| f["idMeal"].as_str()).collect();
    assert_eq!(ids, vec!["52772", "52959", "52874"]);
    assert_eq!(raw[0]["dateAdded"], "2024-03-01T12:00:00");
}

#[test]
fn corrupt_file_is_left_alone() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    let path = backend.item_path(FAVORITES_KEY);
    fs::write(&path, "[{\"idMeal\": ").unwrap();

    let mut store = FavoritesStore::new(backend);
    assert!(store.initialize().is_err());
    assert!(store.favorites().is_empty());
    assert_eq!(store.state().error.as_deref(), Some(STORAGE_ERROR));
    assert_eq!(fs::read_to_string(&path).unwrap(), "[{\"idMeal\": ");
}

#[test]
fn clear_removes_the_file() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.add_favorite(summary("52874", "Beef and Mustard Pie")).unwrap();
    let path = store.backend().item_path(FAVORITES_KEY);
    assert!(path.exists());

    store.clear_all_favorites().unwrap();
    assert!(!path.exists());
    assert_eq!(open(&dir).favorite_count(), 0);
}
