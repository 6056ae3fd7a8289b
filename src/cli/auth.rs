use crate::{error, spotify, success};

pub async fn auth() {
    match spotify::authenticate().await {
        Ok(_) => success!("Authentication successful. Token cached for future runs."),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
