//! Query descriptions handed to the entity store: which rows match and in what
//! order they come back. Stores execute these; they never see raw client input.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::Video;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSortField {
    CreatedAt,
    Views,
    Duration,
    Title,
}

impl VideoSortField {
    pub fn parse(raw: &str) -> ApiResult<Self> {
        match raw {
            "createdAt" => Ok(VideoSortField::CreatedAt),
            "views" => Ok(VideoSortField::Views),
            "duration" => Ok(VideoSortField::Duration),
            "title" => Ok(VideoSortField::Title),
            other => Err(ApiError::validation_with(
                "Invalid sortBy",
                vec![format!(
                    "unsupported sort field '{}', expected one of createdAt, views, duration, title",
                    other
                )],
            )),
        }
    }

    /// SQL sort key for the field. Titles compare bytewise so both stores agree.
    pub fn sort_key(&self) -> &'static str {
        match self {
            VideoSortField::CreatedAt => "created_at",
            VideoSortField::Views => "views",
            VideoSortField::Duration => "duration",
            VideoSortField::Title => "title COLLATE \"C\"",
        }
    }

    fn compare(&self, a: &Video, b: &Video) -> Ordering {
        match self {
            VideoSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            VideoSortField::Views => a.views.cmp(&b.views),
            VideoSortField::Duration => a.duration.total_cmp(&b.duration),
            VideoSortField::Title => a.title.cmp(&b.title),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> ApiResult<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ApiError::validation(format!(
                "Invalid sortType '{}', expected asc or desc",
                raw
            ))),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: VideoSortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Builds a sort from the optional `sortBy`/`sortType` pair. A direction
    /// without a field is still validated but sorts nothing.
    pub fn from_params(sort_by: Option<&str>, sort_type: Option<&str>) -> ApiResult<Option<Self>> {
        let direction = match sort_type {
            Some(raw) if !raw.trim().is_empty() => SortDirection::parse(raw.trim())?,
            _ => SortDirection::default(),
        };
        match sort_by {
            Some(raw) if !raw.trim().is_empty() => Ok(Some(SortSpec {
                field: VideoSortField::parse(raw.trim())?,
                direction,
            })),
            _ => Ok(None),
        }
    }

    /// Ordering for two videos under this sort. Ties are left `Equal` so a
    /// stable sort keeps insertion order.
    pub fn compare(&self, a: &Video, b: &Video) -> Ordering {
        let ord = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Match and sort stages of the video listing.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoQuery {
    pub owner: Uuid,
    pub search: Vec<String>,
    pub sort: Option<SortSpec>,
}

impl VideoQuery {
    pub fn new(owner: Uuid, text: Option<&str>, sort: Option<SortSpec>) -> Self {
        Self {
            owner,
            search: search_terms(text),
            sort,
        }
    }

    /// True when `video` passes the match stage.
    pub fn matches(&self, video: &Video) -> bool {
        video.owner == self.owner && self.matches_text(video)
    }

    fn matches_text(&self, video: &Video) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let title = video.title.to_lowercase();
        let description = video.description.to_lowercase();
        self.search
            .iter()
            .any(|term| title.contains(term.as_str()) || description.contains(term.as_str()))
    }

    /// `ILIKE` patterns for the search terms, with wildcards escaped.
    pub fn like_patterns(&self) -> Vec<String> {
        self.search
            .iter()
            .map(|term| format!("%{}%", escape_like(term)))
            .collect()
    }
}

/// Splits free text into lowercase terms; blank input yields no terms.
pub fn search_terms(text: Option<&str>) -> Vec<String> {
    text.map(|t| t.split_whitespace().map(str::to_lowercase).collect())
        .unwrap_or_default()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
