use log::{info, warn};
use url::Url;

const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];

/// A tutorial link that is safe to hand to the system browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialLink(Url);

impl TutorialLink {
    pub fn parse(uri: &str) -> Result<Self, TutorialError> {
        let url = Url::parse(uri.trim()).map_err(|err| TutorialError::Malformed(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TutorialError::Scheme(url.scheme().to_string()));
        }
        let host = url.host_str().unwrap_or_default().to_lowercase();
        if !VIDEO_HOSTS
            .iter()
            .any(|h| host == *h || host.ends_with(&format!(".{h}")))
        {
            return Err(TutorialError::Host(host));
        }
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TutorialError {
    #[error("malformed link: {0}")]
    Malformed(String),
    #[error("unsupported scheme {0}")]
    Scheme(String),
    #[error("unsupported host {0:?}")]
    Host(String),
}

/// Opens links outside the app, usually in the system browser.
pub trait LinkOpener {
    fn open(&self, link: &TutorialLink);
}

/// Opens the link if it passes validation. Rejected links are only logged.
pub fn open_tutorial(uri: Option<&str>, opener: &dyn LinkOpener) -> bool {
    let Some(uri) = uri else {
        return false;
    };
    match TutorialLink::parse(uri) {
        Ok(link) => {
            info!("opening tutorial {}", link.as_str());
            opener.open(&link);
            true
        }
        Err(err) => {
            warn!("not opening tutorial {uri:?}: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl LinkOpener for Recorder {
        fn open(&self, link: &TutorialLink) {
            self.0.borrow_mut().push(link.as_str().to_string());
        }
    }

    #[rstest]
    #[case("https://www.youtube.com/watch?v=abc", true)]
    #[case("http://youtu.be/abc", true)]
    #[case("https://m.YouTube.com/results?search_query=plank", true)]
    #[case("https://vimeo.com/123", true)]
    #[case("ftp://youtube.com/video", false)]
    #[case("javascript:alert(1)", false)]
    #[case("https://example.com/youtube.com", false)]
    #[case("https://youtube.com.evil.example/watch", false)]
    #[case("https://notyoutube.com/watch", false)]
    #[case("not a link", false)]
    #[case("", false)]
    fn test_tutorial_link_parse(#[case] uri: &str, #[case] valid: bool) {
        assert_eq!(TutorialLink::parse(uri).is_ok(), valid);
    }

    #[test]
    fn test_tutorial_link_errors() {
        assert_eq!(
            TutorialLink::parse("ftp://youtube.com/video"),
            Err(TutorialError::Scheme("ftp".to_string()))
        );
        assert_eq!(
            TutorialLink::parse("https://example.com/"),
            Err(TutorialError::Host("example.com".to_string()))
        );
        assert!(matches!(
            TutorialLink::parse("youtube"),
            Err(TutorialError::Malformed(_))
        ));
    }

    #[test]
    fn test_open_tutorial() {
        let opener = Recorder::default();
        assert!(open_tutorial(
            Some("https://www.youtube.com/results?search_query=plank"),
            &opener
        ));
        assert!(!open_tutorial(Some("https://example.com/"), &opener));
        assert!(!open_tutorial(None, &opener));
        assert_eq!(
            *opener.0.borrow(),
            vec!["https://www.youtube.com/results?search_query=plank".to_string()]
        );
    }
}
