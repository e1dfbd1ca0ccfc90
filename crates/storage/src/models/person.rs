use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Person {
    pub person_id: Uuid,
    pub name: String,
}

impl Person {
    /// Creates a person with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            person_id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn with_id(person_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            person_id,
            name: name.into(),
        }
    }
}
