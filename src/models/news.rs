use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::require_non_empty;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NewsPost {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewsRequest {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub author: String,
}

impl NewsRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.title, "title")?;
        require_non_empty(&self.subtitle, "subtitle")?;
        require_non_empty(&self.body, "body")?;
        require_non_empty(&self.author, "author")?;
        Ok(())
    }
}
