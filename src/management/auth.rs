use std::path::PathBuf;

/// Persists the bearer token between runs as plain text.
pub struct TokenManager {
    token: String,
}

impl TokenManager {
    pub fn new(token: String) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, std::io::Error> {
        let content = async_fs::read_to_string(Self::token_path()).await?;
        Ok(Self {
            token: content.trim().to_string(),
        })
    }

    pub async fn persist(&self) -> Result<(), std::io::Error> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        async_fs::write(&path, &self.token).await
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("tunequiz/cache/token.txt");
        path
    }
}
