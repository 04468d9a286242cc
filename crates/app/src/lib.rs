#![warn(clippy::pedantic)]

use ::log::warn;

mod driver;
pub mod log;
mod service;
mod settings;

pub use driver::{DriverError, SessionHandle, TICK, Tracker};
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService, Theme};

/// Reads the stored settings, falling back to the defaults if they cannot be read.
pub async fn load_settings(service: &impl SettingsService) -> Settings {
    service.get_settings().await.unwrap_or_else(|err| {
        warn!("using default settings: {err}");
        Settings::default()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reptrack_domain::{ReadError, RestDuration, StorageError, UpdateError};

    use super::*;

    struct Fixed(Option<Settings>);

    impl SettingsService for Fixed {
        async fn get_settings(&self) -> Result<Settings, ReadError> {
            self.0.ok_or(ReadError::Storage(StorageError::Unavailable))
        }

        async fn set_settings(&self, _: Settings) -> Result<(), UpdateError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_settings() {
        let stored = Settings {
            rest_duration: RestDuration::new(45).unwrap(),
            theme: Theme::Dark,
        };
        assert_eq!(load_settings(&Fixed(Some(stored))).await, stored);
        assert_eq!(load_settings(&Fixed(None)).await, Settings::default());
    }
}
