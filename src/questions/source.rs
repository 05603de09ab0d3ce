//! Question sources: where the ordered question list comes from.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::SourceError;

use super::model::QuestionSet;

/// A read-only provider of the question list.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable location, used in logs and error messages.
    fn location(&self) -> &str;

    /// Fetch and validate the full question list.
    async fn fetch(&self) -> Result<QuestionSet, SourceError>;
}

/// Reads the question list from a JSON file on disk.
pub struct FileQuestionSource {
    path: PathBuf,
    location: String,
}

impl FileQuestionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<QuestionSet, SourceError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                location: self.location.clone(),
                source,
            })?;
        debug!(location = %self.location, bytes = json.len(), "Read question file");
        QuestionSet::from_json(&json, &self.location)
    }
}

/// Fetches the question list over HTTP(S).
pub struct HttpQuestionSource {
    client: reqwest::Client,
    url: String,
}

impl HttpQuestionSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<QuestionSet, SourceError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::RequestFailed {
                location: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| SourceError::RequestFailed {
            location: self.url.clone(),
            reason: e.to_string(),
        })?;
        debug!(url = %self.url, bytes = body.len(), "Fetched question list");
        QuestionSet::from_json(&body, &self.url)
    }
}

/// Serves an already-loaded question list (tests, embedded data).
pub struct StaticQuestionSource {
    questions: QuestionSet,
}

impl StaticQuestionSource {
    pub fn new(questions: QuestionSet) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    fn location(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<QuestionSet, SourceError> {
        Ok(self.questions.clone())
    }
}

/// Pick a source for a configured location: URLs go over HTTP, anything
/// else is treated as a file path.
pub fn source_for(location: &str) -> Box<dyn QuestionSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpQuestionSource::new(location))
    } else {
        Box::new(FileQuestionSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const BUNDLED: &str = include_str!("../../data/questions.json");

    #[tokio::test]
    async fn file_source_reads_question_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUNDLED.as_bytes()).unwrap();

        let source = FileQuestionSource::new(file.path());
        let set = source.fetch().await.unwrap();
        assert_eq!(set.len(), 5);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileQuestionSource::new(dir.path().join("nope.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{\"id\": 1}]").unwrap();

        let err = FileQuestionSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn static_source_returns_its_questions() {
        let set = QuestionSet::from_json(BUNDLED, "bundled").unwrap();
        let source = StaticQuestionSource::new(set.clone());
        assert_eq!(source.fetch().await.unwrap(), set);
    }

    #[test]
    fn source_for_picks_by_scheme() {
        assert_eq!(
            source_for("https://quiz.example.com/q.json").location(),
            "https://quiz.example.com/q.json"
        );
        assert_eq!(source_for("data/questions.json").location(), "data/questions.json");
    }
}
