use crate::dto::common::PagedResult;
use crate::dto::person::{PeopleFilter, PersonResponse};
use crate::error::Result;
use crate::models::Person;
use crate::query::PageQuery;
use crate::repository::PersonStore;

use super::fetch_page;

/// Get one page of people, optionally with their entries
pub async fn get_people<S>(store: &S, filter: &PeopleFilter) -> Result<PagedResult<PersonResponse>>
where
    S: PersonStore + ?Sized,
{
    let query = PageQuery::people(filter);
    tracing::debug!(?query, "Querying people");

    fetch_page(store, query).await
}

/// Insert a new person; never merges with an existing row
pub async fn add_person<S>(store: &S, person: &Person) -> Result<()>
where
    S: PersonStore + ?Sized,
{
    store.insert(person).await?;
    tracing::info!(person_id = %person.person_id, "Person added");
    Ok(())
}
