//! Browse parameter normalization for the listing filter/sort/paginate
//! pipeline.
//!
//! All query input is caller-hostile: malformed ids are ignored, unknown sort
//! modes fall back to the default, and out-of-range page numbers clamp. The
//! browse path never rejects a request over its parameters.

use crate::types::DbId;

/// Fixed number of listings per results page.
pub const PAGE_SIZE: i64 = 12;

/// Result ordering for a browse request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Most recently listed first (the default).
    #[default]
    Newest,
    /// Price ascending.
    PriceLowHigh,
    /// Price descending.
    PriceHighLow,
}

impl SortMode {
    /// Parse the `sort` query parameter. Anything other than the two
    /// recognized modes (including absence) falls back to [`SortMode::Newest`].
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("low-high") => SortMode::PriceLowHigh,
            Some("high-low") => SortMode::PriceHighLow,
            _ => SortMode::Newest,
        }
    }

    /// The ORDER BY clause for this mode. The `id` tiebreak gives every mode
    /// a total order, so page boundaries are stable across requests.
    pub fn order_by(self) -> &'static str {
        match self {
            SortMode::Newest => "listed_date DESC, id DESC",
            SortMode::PriceLowHigh => "price ASC, id ASC",
            SortMode::PriceHighLow => "price DESC, id DESC",
        }
    }
}

/// Visibility restriction for a browse request.
///
/// Public callers are always bound to [`Visibility::VisibleOnly`] regardless
/// of what they send; only the staff surface parses this parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    VisibleOnly,
    HiddenOnly,
    All,
}

impl Visibility {
    /// Parse the `visibility` query parameter, defaulting to visible-only.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("hidden") => Visibility::HiddenOnly,
            Some("all") => Visibility::All,
            _ => Visibility::VisibleOnly,
        }
    }

    /// SQL bind value for an `is_visible` predicate: `Some(flag)` restricts
    /// to that flag, `None` applies no restriction.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Visibility::VisibleOnly => Some(true),
            Visibility::HiddenOnly => Some(false),
            Visibility::All => None,
        }
    }
}

/// Parse an id-valued filter parameter. Absent, empty, or non-numeric input
/// yields `None`, which drops the filter rather than failing the request.
pub fn parse_id_param(param: Option<&str>) -> Option<DbId> {
    param?.trim().parse().ok()
}

/// Number of pages needed for `total_count` items, never less than 1 so an
/// empty result set still has a valid "page 1".
pub fn total_pages(total_count: i64) -> i64 {
    ((total_count + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

/// Normalize the `page` query parameter against the page count.
///
/// Non-numeric or absent input clamps to the first page; anything past the
/// end clamps to the last page. Never errors.
pub fn clamp_page(param: Option<&str>, total_pages: i64) -> i64 {
    let requested = param
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1);
    requested.clamp(1, total_pages)
}
