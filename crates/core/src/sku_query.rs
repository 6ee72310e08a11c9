//! SKU list query contract: search, ordering, and categorical filters.

use crate::error::CoreError;
use crate::pagination::PageRequest;

/// SKUs with a return percentage strictly above this are "high return rate".
pub const HIGH_RETURN_RATE_THRESHOLD: f64 = 5.0;

/// SKUs with a content score strictly below this are "low content score".
pub const LOW_CONTENT_SCORE_THRESHOLD: f64 = 6.0;

pub const FILTER_HIGH_RETURN_RATE: &str = "high_return_rate";
pub const FILTER_LOW_CONTENT_SCORE: &str = "low_content_score";

/// Categorical list filter selected with `filter_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkuFilter {
    HighReturnRate,
    LowContentScore,
}

impl SkuFilter {
    /// Parse a `filter_type` value (case-insensitive). Blank means no filter.
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, CoreError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        match raw.to_ascii_lowercase().as_str() {
            FILTER_HIGH_RETURN_RATE => Ok(Some(Self::HighReturnRate)),
            FILTER_LOW_CONTENT_SCORE => Ok(Some(Self::LowContentScore)),
            _ => Err(CoreError::Validation(format!(
                "Invalid filter_type '{raw}'. Must be one of: \
                 {FILTER_HIGH_RETURN_RATE}, {FILTER_LOW_CONTENT_SCORE}"
            ))),
        }
    }

    /// Exclusive lower bound on `return_percentage`, if this filter sets one.
    pub fn min_return_percentage(&self) -> Option<f64> {
        matches!(self, Self::HighReturnRate).then_some(HIGH_RETURN_RATE_THRESHOLD)
    }

    /// Exclusive upper bound on `content_score`, if this filter sets one.
    pub fn max_content_score(&self) -> Option<f64> {
        matches!(self, Self::LowContentScore).then_some(LOW_CONTENT_SCORE_THRESHOLD)
    }
}

/// Sortable SKU columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkuSortField {
    Name,
    Sales,
    ReturnPercentage,
    ContentScore,
}

impl SkuSortField {
    pub const ALL: [Self; 4] = [
        Self::Name,
        Self::Sales,
        Self::ReturnPercentage,
        Self::ContentScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Sales => "sales",
            Self::ReturnPercentage => "return_percentage",
            Self::ContentScore => "content_score",
        }
    }
}

/// Requested ordering. Defaults to `name` ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkuOrdering {
    pub field: SkuSortField,
    pub descending: bool,
}

impl Default for SkuOrdering {
    fn default() -> Self {
        Self {
            field: SkuSortField::Name,
            descending: false,
        }
    }
}

impl SkuOrdering {
    /// Parse an `ordering` value such as `sales` or `-content_score`.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };
        let (descending, name) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let field = SkuSortField::ALL
            .into_iter()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| {
                let allowed: Vec<&str> = SkuSortField::ALL.iter().map(|f| f.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid ordering '{raw}'. Must be one of: {} (prefix with '-' for descending)",
                    allowed.join(", ")
                ))
            })?;
        Ok(Self { field, descending })
    }
}

/// A fully validated SKU list query.
#[derive(Debug, Clone, Default)]
pub struct SkuListQuery {
    /// Case-insensitive substring to look for in `name`.
    pub search: Option<String>,
    pub filter: Option<SkuFilter>,
    pub ordering: SkuOrdering,
    pub page: PageRequest,
}

impl SkuListQuery {
    /// Build a query from raw query-string values.
    pub fn parse(
        search: Option<&str>,
        filter_type: Option<&str>,
        ordering: Option<&str>,
        page: Option<&str>,
        page_size: Option<&str>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            filter: SkuFilter::parse(filter_type)?,
            ordering: SkuOrdering::parse(ordering)?,
            page: PageRequest::parse(page, page_size)?,
        })
    }

    /// `ILIKE` pattern for the search term, with wildcards in the input
    /// escaped so they match literally.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(like_pattern)
    }
}

/// Wrap `term` in `%...%`, escaping `\`, `%` and `_`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
