//! Price bucket range parsing.
//!
//! Price buckets are stored as display labels (`"$50,000 - $100,000"`,
//! `"$250,000+"`) and parsed at query time into half-open numeric intervals.
//! The upper bound is exclusive: a listing priced exactly at the bucket
//! maximum falls into the next bucket, not this one.

use std::str::FromStr;

use rust_decimal::Decimal;

/// A half-open price interval `[min, max)`.
///
/// `max = None` means the interval is unbounded above (`[min, ∞)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Whether a price falls inside this range. The lower bound is inclusive,
    /// the upper bound exclusive.
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && self.max.is_none_or(|max| price < max)
    }
}

/// Parse a bucket label into a [`PriceRange`].
///
/// - `$` and `,` are stripped before parsing.
/// - `"A - B"` parses to `[A, B)`.
/// - A trailing `+` parses to `[A, ∞)`.
/// - Anything unparseable returns `None`; callers treat that as "no price
///   filter", never as an error.
pub fn parse_price_range(label: &str) -> Option<PriceRange> {
    let cleaned: String = label.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();

    if let Some(open) = cleaned.strip_suffix('+') {
        let min = Decimal::from_str(open.trim()).ok()?;
        return Some(PriceRange { min, max: None });
    }

    let (lo, hi) = cleaned.split_once('-')?;
    let min = Decimal::from_str(lo.trim()).ok()?;
    let max = Decimal::from_str(hi.trim()).ok()?;
    Some(PriceRange {
        min,
        max: Some(max),
    })
}
