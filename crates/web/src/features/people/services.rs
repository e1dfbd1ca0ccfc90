use sqlx::PgPool;
use storage::{
    dto::{
        common::PagedResult,
        person::{PeopleFilter, PersonResponse},
    },
    error::Result,
    models::Person,
    repository::person::PersonRepository,
    services::people,
};

/// Get people with optional ordering and pagination
pub async fn get_people(pool: &PgPool, filter: &PeopleFilter) -> Result<PagedResult<PersonResponse>> {
    let repo = PersonRepository::new(pool);
    people::get_people(&repo, filter).await
}

/// Add a person
pub async fn add_person(pool: &PgPool, person: &Person) -> Result<()> {
    let repo = PersonRepository::new(pool);
    people::add_person(&repo, person).await
}
