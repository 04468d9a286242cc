//! Key-value store in a single JSON document on disk.

use std::{
    collections::VecDeque,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use reptrack_app::{Settings, SettingsRepository, log};
use reptrack_domain::{ReadError, StorageError, UpdateError};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{KEY_LOG, KEY_SETTINGS};

/// Nothing in here may log while holding the lock, since the logger itself may write
/// to the same file.
pub struct JsonFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFile {
    /// The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Unavailable)?;
        match self.read_document()?.remove(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|_| StorageError::Corrupt(key.to_string())),
            None => Ok(None),
        }
    }

    /// Replaces the value of `key`, even if the stored one cannot be parsed.
    fn set<T: Serialize>(&self, key: &str, value: T) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Unavailable)?;
        let mut document = self.read_document()?;
        document.insert(key.to_string(), to_value(value)?);
        self.write_document(&document)
    }

    fn update<T, F>(&self, key: &str, f: F) -> Result<(), StorageError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T),
    {
        let _guard = self.lock.lock().map_err(|_| StorageError::Unavailable)?;
        let mut document = self.read_document()?;
        let mut value: T = match document.remove(key) {
            Some(value) => serde_json::from_value(value)
                .map_err(|_| StorageError::Corrupt(key.to_string()))?,
            None => T::default(),
        };
        f(&mut value);
        document.insert(key.to_string(), to_value(value)?);
        self.write_document(&document)
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(document).map_err(boxed)?;
        fs::write(&self.path, content).map_err(boxed)
    }

    fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        match fs::read(&self.path) {
            Ok(content) => serde_json::from_slice(&content)
                .map_err(|_| StorageError::Corrupt(self.path.display().to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(boxed(err)),
        }
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, StorageError> {
    serde_json::to_value(value).map_err(boxed)
}

fn boxed(err: impl std::error::Error + Send + Sync + 'static) -> StorageError {
    StorageError::Other(Box::new(err))
}

impl SettingsRepository for JsonFile {
    async fn read_settings(&self) -> Result<Settings, ReadError> {
        Ok(self.get(KEY_SETTINGS)?.unwrap_or_default())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        Ok(self.set(KEY_SETTINGS, settings)?)
    }
}

impl log::Repository for JsonFile {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.get(KEY_LOG)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        self.update(KEY_LOG, |entries: &mut VecDeque<log::Entry>| {
            log::push_entry(entries, entry);
        })
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reptrack_app::{Theme, log::Repository};
    use reptrack_domain::RestDuration;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    fn entry(message: &str) -> log::Entry {
        log::Entry {
            time: chrono::Local::now().to_rfc3339(),
            level: ::log::Level::Warn,
            message: message.to_string(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_file_yields_defaults(dir: TempDir) {
        let store = JsonFile::new(dir.path().join("reptrack.json"));
        assert_eq!(store.read_settings().await.unwrap(), Settings::default());
        assert_eq!(store.read_entries().unwrap(), VecDeque::new());
        assert!(!store.path().exists());
    }

    #[rstest]
    #[tokio::test]
    async fn test_settings_survive_reopening(dir: TempDir) {
        let path = dir.path().join("reptrack.json");
        let settings = Settings {
            rest_duration: RestDuration::new(60).unwrap(),
            theme: Theme::Dark,
        };
        JsonFile::new(&path).write_settings(settings).await.unwrap();
        assert_eq!(JsonFile::new(&path).read_settings().await.unwrap(), settings);
    }

    #[rstest]
    #[tokio::test]
    async fn test_keys_are_independent(dir: TempDir) {
        let store = JsonFile::new(dir.path().join("reptrack.json"));
        store.write_entry(entry("first")).unwrap();
        store.write_settings(Settings::default()).await.unwrap();
        store.write_entry(entry("second")).unwrap();

        let messages = store
            .read_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["second".to_string(), "first".to_string()]);
        assert_eq!(store.read_settings().await.unwrap(), Settings::default());
    }

    #[rstest]
    #[case(r#"{"settings": {"rest_duration": 0}}"#)]
    #[case(r#"{"settings": "dark"}"#)]
    #[tokio::test]
    async fn test_corrupt_settings_are_replaced_on_write(dir: TempDir, #[case] content: &str) {
        let path = dir.path().join("reptrack.json");
        fs::write(&path, content).unwrap();
        let store = JsonFile::new(&path);
        assert!(matches!(
            store.read_settings().await,
            Err(ReadError::Storage(StorageError::Corrupt(key))) if key == "settings"
        ));

        store.write_settings(Settings::default()).await.unwrap();
        assert_eq!(store.read_settings().await.unwrap(), Settings::default());
    }

    #[rstest]
    #[tokio::test]
    async fn test_partial_settings_fill_defaults(dir: TempDir) {
        let path = dir.path().join("reptrack.json");
        fs::write(&path, r#"{"settings": {"theme": "Light"}}"#).unwrap();
        assert_eq!(
            JsonFile::new(&path).read_settings().await.unwrap(),
            Settings {
                rest_duration: RestDuration::DEFAULT,
                theme: Theme::Light,
            }
        );
    }

    #[rstest]
    fn test_unparsable_document(dir: TempDir) {
        let path = dir.path().join("reptrack.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonFile::new(&path);
        assert!(matches!(store.read_entries(), Err(log::Error::Unknown(_))));
        assert!(matches!(
            store.write_entry(entry("lost")),
            Err(log::Error::Unknown(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }
}
