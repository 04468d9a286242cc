use std::{collections::VecDeque, sync::Mutex};

use reptrack_app::{Settings, SettingsRepository, log};
use reptrack_domain::{ReadError, StorageError, UpdateError};

/// Keeps settings for the lifetime of the process.
#[derive(Debug, Default)]
pub struct Preferences {
    settings: Mutex<Option<Settings>>,
}

impl SettingsRepository for Preferences {
    async fn read_settings(&self) -> Result<Settings, ReadError> {
        let settings = self.settings.lock().map_err(|_| StorageError::Unavailable)?;
        Ok((*settings).unwrap_or_default())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        *self.settings.lock().map_err(|_| StorageError::Unavailable)? = Some(settings);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Log {
    entries: Mutex<VecDeque<log::Entry>>,
}

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|err| log::Error::Unknown(err.to_string()))?;
        log::push_entry(&mut entries, entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reptrack_app::{Theme, log::Repository};
    use reptrack_domain::RestDuration;

    use super::*;

    #[tokio::test]
    async fn test_settings_default_until_written() {
        let preferences = Preferences::default();
        assert_eq!(preferences.read_settings().await.unwrap(), Settings::default());

        let settings = Settings {
            rest_duration: RestDuration::new(120).unwrap(),
            theme: Theme::Light,
        };
        preferences.write_settings(settings).await.unwrap();
        assert_eq!(preferences.read_settings().await.unwrap(), settings);
    }

    #[test]
    fn test_log_is_bounded_newest_first() {
        let repository = Log::default();
        for i in 0..=log::MAX_ENTRIES {
            repository.write_entry(log::Entry {
                time: String::new(),
                level: ::log::Level::Info,
                message: i.to_string(),
            })
            .unwrap();
        }
        let entries = repository.read_entries().unwrap();
        assert_eq!(entries.len(), log::MAX_ENTRIES);
        assert_eq!(entries[0].message, log::MAX_ENTRIES.to_string());
        assert_eq!(entries[log::MAX_ENTRIES - 1].message, "1");
    }
}
