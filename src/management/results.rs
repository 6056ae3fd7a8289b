use std::path::PathBuf;

use chrono::Utc;

use crate::types::GameResult;

#[derive(Debug)]
pub enum ResultError {
    IoError(std::io::Error),
    SerdeError(serde_json::Error),
}

impl From<std::io::Error> for ResultError {
    fn from(err: std::io::Error) -> Self {
        ResultError::IoError(err)
    }
}

impl From<serde_json::Error> for ResultError {
    fn from(err: serde_json::Error) -> Self {
        ResultError::SerdeError(err)
    }
}

/// Keeps finished game results in a JSON file in the local data directory.
///
/// The quiz only ever appends one aggregate record per finished round; any
/// richer persistence (users, authentication) belongs to the surrounding
/// application, not here.
pub struct ResultManager {
    results: Vec<GameResult>,
}

impl ResultManager {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    pub async fn load() -> Result<Self, ResultError> {
        let content = async_fs::read_to_string(Self::results_path()).await?;
        let results = serde_json::from_str(&content)?;
        Ok(Self { results })
    }

    /// Appends one aggregate record and saves the file.
    pub async fn record(
        &mut self,
        user: &str,
        score: u32,
        correct: u32,
        incorrect: u32,
    ) -> Result<(), ResultError> {
        self.results.push(GameResult {
            user: user.to_string(),
            score,
            correct,
            incorrect,
            recorded_at: Utc::now().to_rfc3339(),
        });

        self.save().await
    }

    pub fn all(&self) -> &[GameResult] {
        &self.results
    }

    async fn save(&self) -> Result<(), ResultError> {
        let path = Self::results_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.results)?;
        async_fs::write(&path, json).await.map_err(ResultError::from)
    }

    fn results_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("tunequiz/results.json");
        path
    }
}
