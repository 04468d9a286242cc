use std::collections::VecDeque;

use ::log::error;
use reptrack_domain::{ReadError, UpdateError};

use crate::{Settings, SettingsRepository, SettingsService, log};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: log::Repository> log::Service for Service<R> {
    fn get_log_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.repository.read_entries()
    }

    fn add_log_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        self.repository.write_entry(entry)
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, ReadError> {
        self.repository
            .read_settings()
            .await
            .inspect_err(|err| error!("failed to get settings: {err}"))
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        self.repository
            .write_settings(settings)
            .await
            .inspect_err(|err| error!("failed to set settings: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use reptrack_domain::{RestDuration, StorageError};

    use crate::{Theme, log::Service as _};

    use super::*;

    #[derive(Default)]
    struct Repository {
        settings: Mutex<Option<Settings>>,
        entries: Mutex<VecDeque<log::Entry>>,
        fail: bool,
    }

    impl SettingsRepository for Repository {
        async fn read_settings(&self) -> Result<Settings, ReadError> {
            if self.fail {
                return Err(StorageError::Unavailable.into());
            }
            Ok(self.settings.lock().unwrap().unwrap_or_default())
        }

        async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError> {
            if self.fail {
                return Err(StorageError::Unavailable.into());
            }
            *self.settings.lock().unwrap() = Some(settings);
            Ok(())
        }
    }

    impl log::Repository for Repository {
        fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
            Ok(self.entries.lock().unwrap().clone())
        }

        fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
            log::push_entry(&mut self.entries.lock().unwrap(), entry);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_settings_round_trip_through_service() {
        let service = Service::new(Repository::default());
        assert_eq!(service.get_settings().await.unwrap(), Settings::default());

        let settings = Settings {
            rest_duration: RestDuration::new(45).unwrap(),
            theme: Theme::Dark,
        };
        service.set_settings(settings).await.unwrap();
        assert_eq!(service.get_settings().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_settings_errors_are_passed_on() {
        let service = Service::new(Repository {
            fail: true,
            ..Repository::default()
        });
        assert!(matches!(
            service.get_settings().await,
            Err(ReadError::Storage(StorageError::Unavailable))
        ));
        assert!(matches!(
            service.set_settings(Settings::default()).await,
            Err(UpdateError::Storage(StorageError::Unavailable))
        ));
    }

    #[test]
    fn test_log_entries() {
        let service = Service::new(Repository::default());
        service
            .add_log_entry(log::Entry {
                time: String::new(),
                level: ::log::Level::Warn,
                message: "rejected set".to_string(),
            })
            .unwrap();
        assert_eq!(service.get_log_entries().unwrap().len(), 1);
    }
}
