//! Durable persistence for the application state.
//!
//! The whole `AppState` is one opaque document under one key in a key-value
//! store. Loading never fails the caller: anything wrong with the stored
//! document (absent, unreadable, unparseable) yields the default state.
//! Saving is best-effort; a failed save is logged and dropped, and the next
//! successful save carries the full current state anyway.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state_store::AppState;

/// Key the aggregate state document lives under.
pub const APP_STATE_KEY: &str = "app_state";
/// Ancillary key for the cached model credential; must not collide with the
/// document key.
pub const CREDENTIAL_KEY: &str = "api_credential";

/// The opaque on-device store the product persists through.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key under a data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read stored value at {:?}", path))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create data directory {:?}", self.root))?;
        let path = self.path_for(key);
        tokio::fs::write(&path, value)
            .await
            .with_context(|| format!("Failed to write stored value at {:?}", path))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to remove stored value at {:?}", path))
            }
        }
    }
}

/// Serializes `AppState` snapshots in and out of a `KeyValueStore`.
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        PersistenceGateway { store }
    }

    /// Loads the persisted state, falling back to defaults on any failure.
    /// Documents from older builds deserialize against per-field defaults,
    /// so missing fields merge in as their default values.
    pub async fn load(&self) -> AppState {
        match self.store.get(APP_STATE_KEY).await {
            Ok(Some(document)) => match serde_json::from_str::<AppState>(&document) {
                Ok(state) => state,
                Err(err) => {
                    log::warn!("stored state failed to parse, starting fresh: {}", err);
                    AppState::default()
                }
            },
            Ok(None) => AppState::default(),
            Err(err) => {
                log::warn!("could not read stored state, starting fresh: {}", err);
                AppState::default()
            }
        }
    }

    /// Full-document overwrite. Failures are logged and dropped.
    pub async fn save(&self, state: &AppState) {
        let document = match serde_json::to_string_pretty(state) {
            Ok(document) => document,
            Err(err) => {
                log::error!("state failed to serialize, skipping save: {}", err);
                return;
            }
        };
        if let Err(err) = self.store.set(APP_STATE_KEY, &document).await {
            log::error!("failed to persist state: {}", err);
        }
    }

    pub async fn load_credential(&self) -> Option<String> {
        match self.store.get(CREDENTIAL_KEY).await {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(err) => {
                log::warn!("could not read cached credential: {}", err);
                None
            }
        }
    }

    pub async fn store_credential(&self, credential: &str) {
        if let Err(err) = self.store.set(CREDENTIAL_KEY, credential).await {
            log::warn!("failed to cache credential: {}", err);
        }
    }

    pub async fn clear_credential(&self) {
        if let Err(err) = self.store.remove(CREDENTIAL_KEY).await {
            log::warn!("failed to clear cached credential: {}", err);
        }
    }
}

/// Spawns the write-behind drain: a single-slot channel where the latest
/// state wins. Transitions stay synchronous; the background task persists
/// whatever snapshot is newest whenever it gets scheduled. The task ends
/// once the sender is dropped.
pub fn spawn_write_behind(
    gateway: Arc<PersistenceGateway>,
    initial: AppState,
) -> (watch::Sender<AppState>, JoinHandle<()>) {
    let (tx, mut rx) = watch::channel(initial);
    let handle = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            gateway.save(&snapshot).await;
        }
    });
    (tx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_parser::{Ingredient, Recipe, Region, RegionFilter};
    use crate::state_store::{NewMessage, Role, StateStore, TodoCategory};
    use tempfile::tempdir;

    fn gateway_in(dir: &std::path::Path) -> PersistenceGateway {
        PersistenceGateway::new(Arc::new(FileStore::new(dir)))
    }

    fn populated_state() -> AppState {
        let mut store = StateStore::new(AppState::default());
        let session = store.create_session(None);
        store.append_message(
            &session,
            NewMessage {
                role: Role::User,
                content: "what should I cook tonight?".to_string(),
                recipe: None,
            },
        );
        let recipe = Recipe {
            id: "r1".to_string(),
            name: "Test Dish".to_string(),
            region: Region::Thai,
            ingredients: vec![Ingredient {
                name: "rice".to_string(),
                amount: "1".to_string(),
                unit: "cup".to_string(),
                notes: Some("jasmine".to_string()),
            }],
            ..Recipe::default()
        };
        store.append_message(
            &session,
            NewMessage {
                role: Role::Assistant,
                content: "How about this?".to_string(),
                recipe: Some(recipe.clone()),
            },
        );
        store.save_recipe(recipe.clone());
        store.add_shopping_list_from_recipe(&recipe);
        store.add_todo("preheat oven".to_string(), TodoCategory::Cooking, None);
        store.set_selected_region(RegionFilter::Only(Region::Thai));
        store.state().clone()
    }

    #[tokio::test]
    async fn test_round_trip_preserves_state() {
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path());
        let state = populated_state();
        gateway.save(&state).await;
        let loaded = gateway.load().await;
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_load_without_document_yields_defaults() {
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path());
        assert_eq!(gateway.load().await, AppState::default());
    }

    #[tokio::test]
    async fn test_load_of_corrupt_document_yields_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(APP_STATE_KEY), "{not json at all").unwrap();
        let gateway = gateway_in(dir.path());
        assert_eq!(gateway.load().await, AppState::default());
    }

    #[tokio::test]
    async fn test_older_document_shape_merges_against_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(APP_STATE_KEY),
            r#"{"todos":[{"id":"t1","text":"old entry"}]}"#,
        )
        .unwrap();
        let gateway = gateway_in(dir.path());
        let loaded = gateway.load().await;
        assert_eq!(loaded.todos.len(), 1);
        assert_eq!(loaded.todos[0].text, "old entry");
        assert!(!loaded.todos[0].completed);
        assert_eq!(loaded.todos[0].category, TodoCategory::Other);
        assert!(loaded.sessions.is_empty());
        assert_eq!(loaded.selected_region, RegionFilter::All);
    }

    #[tokio::test]
    async fn test_credential_key_does_not_collide_with_document() {
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path());
        gateway.store_credential("sk-demo-123").await;
        gateway.save(&populated_state()).await;
        assert_eq!(gateway.load_credential().await.as_deref(), Some("sk-demo-123"));
        assert_ne!(gateway.load().await, AppState::default());
        gateway.clear_credential().await;
        assert_eq!(gateway.load_credential().await, None);
    }

    #[tokio::test]
    async fn test_write_behind_persists_latest_state() {
        let dir = tempdir().unwrap();
        let gateway = Arc::new(gateway_in(dir.path()));
        let (tx, handle) = spawn_write_behind(gateway.clone(), AppState::default());

        let mut store = StateStore::new(AppState::default());
        store.create_session(None);
        let _ = tx.send(store.state().clone());
        store.add_todo("last one wins".to_string(), TodoCategory::Other, None);
        let final_state = store.state().clone();
        let _ = tx.send(final_state.clone());

        drop(tx);
        handle.await.unwrap();

        assert_eq!(gateway.load().await, final_state);
    }
}
