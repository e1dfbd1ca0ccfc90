//! Plain query values handed to the storage adapters.
//!
//! A [`PageQuery`] is a plain value: what to select, how to sort it and which
//! window of rows to return. Adapters translate it once, so the filtering
//! rules below can be tested without a database.

use uuid::Uuid;

use crate::dto::leaderboard::LeaderboardFilter;
use crate::dto::person::PeopleFilter;
use crate::models::LeaderboardEntry;

/// Rows per page.
pub const PAGE_SIZE: i64 = 10;

/// Team size applied to the unfiltered leaderboard when none is requested.
pub const DEFAULT_TEAM_SIZE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Maps the tri-state `order_ascending` parameter; `None` means no
    /// explicit ordering.
    pub fn from_ascending(order_ascending: Option<bool>) -> Option<Self> {
        order_ascending.map(|ascending| {
            if ascending {
                Self::Ascending
            } else {
                Self::Descending
            }
        })
    }
}

/// Which rows of the ordered selection to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// First match only, used for lookups by id.
    Single,
    /// Zero-based page of [`PAGE_SIZE`] rows.
    Page(u32),
}

impl Window {
    pub fn skip(&self) -> i64 {
        match self {
            Self::Single => 0,
            Self::Page(page) => PAGE_SIZE * i64::from(*page),
        }
    }

    pub fn take(&self) -> i64 {
        match self {
            Self::Single => 1,
            Self::Page(_) => PAGE_SIZE,
        }
    }

    /// Page number reported back to the caller before clamping.
    pub fn page_index(&self) -> u32 {
        match self {
            Self::Single => 0,
            Self::Page(page) => *page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery<S> {
    pub selection: S,
    pub sort: Option<SortDirection>,
    pub window: Window,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySelection {
    pub id: Option<Uuid>,
    pub team_size: Option<i32>,
    pub member_id: Option<Uuid>,
}

impl EntrySelection {
    pub fn matches(&self, entry: &LeaderboardEntry, member_ids: &[Uuid]) -> bool {
        self.id.is_none_or(|id| entry.entry_id == id)
            && self.team_size.is_none_or(|size| entry.team_size == size)
            && self
                .member_id
                .is_none_or(|member| member_ids.contains(&member))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonSelection {
    pub id: Option<Uuid>,
    pub include_entries: bool,
}

impl PageQuery<EntrySelection> {
    /// Builds the leaderboard query for `page`.
    ///
    /// A lookup by id ignores everything else. Filtering by member only
    /// applies a team size when one was given; the plain listing falls back
    /// to [`DEFAULT_TEAM_SIZE`].
    pub fn entries(filter: &LeaderboardFilter, page: u32) -> Self {
        if let Some(id) = filter.id {
            return Self {
                selection: EntrySelection {
                    id: Some(id),
                    ..Default::default()
                },
                sort: None,
                window: Window::Single,
            };
        }

        let selection = match filter.filter_person_id {
            Some(member_id) => EntrySelection {
                id: None,
                team_size: filter.team_size,
                member_id: Some(member_id),
            },
            None => EntrySelection {
                id: None,
                team_size: Some(filter.team_size.unwrap_or(DEFAULT_TEAM_SIZE)),
                member_id: None,
            },
        };

        Self {
            selection,
            sort: SortDirection::from_ascending(filter.order_ascending),
            window: Window::Page(page),
        }
    }
}

impl PageQuery<PersonSelection> {
    pub fn people(filter: &PeopleFilter) -> Self {
        match filter.id {
            Some(id) => Self {
                selection: PersonSelection {
                    id: Some(id),
                    include_entries: filter.include_entries,
                },
                sort: None,
                window: Window::Single,
            },
            None => Self {
                selection: PersonSelection {
                    id: None,
                    include_entries: filter.include_entries,
                },
                sort: SortDirection::from_ascending(filter.order_ascending),
                window: Window::Page(filter.page),
            },
        }
    }
}

/// `min(requested, count / PAGE_SIZE)`.
///
/// This is not the exact last page: with 20 rows a request for page 2 stays
/// on page 2 and comes back empty.
pub fn clamp_page(requested: u32, count: i64) -> u32 {
    let upper = (count / PAGE_SIZE).max(0);
    // Result never exceeds `requested`, so it fits back into u32.
    i64::from(requested).min(upper) as u32
}
