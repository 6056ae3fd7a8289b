use tabled::Table;

use crate::{info, management::ResultManager, types::ResultTableRow};

/// Prints recorded game results, newest first, optionally for one user.
pub async fn results(user: Option<String>) {
    let manager = match ResultManager::load().await {
        Ok(manager) => manager,
        Err(_) => {
            info!("No results recorded yet.");
            return;
        }
    };

    let mut rows: Vec<ResultTableRow> = manager
        .all()
        .iter()
        .filter(|r| user.as_ref().is_none_or(|u| &r.user == u))
        .map(|r| ResultTableRow {
            date: r.recorded_at.clone(),
            user: r.user.clone(),
            score: r.score,
            correct: r.correct,
            incorrect: r.incorrect,
        })
        .collect();

    if rows.is_empty() {
        info!("No results recorded yet.");
        return;
    }

    rows.sort_by(|a, b| b.date.cmp(&a.date));
    println!("{}", Table::new(rows));
}
