//! Common types and data structures

use chrono::NaiveDate;

/// One artwork record from the catalog API.
///
/// The API leaves most text fields null for sparsely catalogued pieces, so
/// everything except the id is optional and substituted at display time.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Artwork {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

/// Pagination block of the catalog API envelope. The API sends more metadata
/// (offset, total_pages, next_url) than the view needs; extra keys are ignored.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ApiPagination {
    pub total: u64,
    pub limit: u32,
    pub current_page: u32,
}

/// Top-level response envelope: `{ pagination: {...}, data: [...] }`
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ArtworkEnvelope {
    pub pagination: ApiPagination,
    pub data: Vec<Artwork>,
}

/// One page of artworks, ready to hand to the view
#[derive(Clone, Debug)]
pub struct ArtworkPage {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub records: Vec<Artwork>,
}

impl From<ArtworkEnvelope> for ArtworkPage {
    fn from(env: ArtworkEnvelope) -> Self {
        Self {
            page: env.pagination.current_page,
            limit: env.pagination.limit,
            total: env.pagination.total,
            records: env.data,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Country {
    pub name: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Representative {
    pub name: String,
}

/// One customer record from the local data provider
#[derive(Clone, Debug, PartialEq)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub country: Country,
    pub company: String,
    pub date: NaiveDate,
    pub status: String,
    pub verified: bool,
    pub activity: u8, // 0..=100
    pub representative: Representative,
    pub balance: f64,
}

/// Row selection behavior for the tables
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Clicking a row replaces the selection
    Single,
    /// Clicking a row toggles it in the selection set
    Multiple,
}

/// Which table is currently shown
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Artworks,
    Customers,
}

/// Lifecycle of the server-paginated view's current page
#[derive(Clone, PartialEq)]
pub enum LoadPhase {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight; previous rows stay on screen dimmed
    Loading,
    /// Rows correspond to the last applied fetch
    Ready,
    /// Last fetch failed; message shown with a retry affordance
    Failed(String),
}

/// Column to sort by in the customers view
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CustomerSortColumn {
    Name,
    Country,
    Date,
    Balance,
}

/// Sort direction for the customers view
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}
