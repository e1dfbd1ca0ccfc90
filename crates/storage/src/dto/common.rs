use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of a filtered, ordered result set.
///
/// `count` is the number of rows matching the filter before paging and
/// `page` is the requested page index after clamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PagedResult<T> {
    pub count: i64,
    pub page: u32,
    pub values: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn new(count: i64, page: u32, values: Vec<T>) -> Self {
        Self {
            count,
            page,
            values,
        }
    }

    pub fn empty() -> Self {
        Self::new(0, 0, Vec::new())
    }
}
