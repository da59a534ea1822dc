//! Core operations. Each function validates its inputs, runs the store
//! queries it needs, and returns a typed result or an `ApiError`.

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod videos;

/// Parses an entity id taken from a path or query string.
pub fn parse_id(raw: &str, entity: &str) -> ApiResult<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::validation(format!("{} id is required", capitalize(entity))));
    }
    Uuid::parse_str(raw).map_err(|_| ApiError::validation(format!("Invalid {} id", entity)))
}

/// Returns the trimmed value of a required text field, rejecting blanks.
pub fn require_text(field: &str, value: Option<String>) -> ApiResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("{} is required", field))),
    }
}

/// Fails with `Forbidden` unless `actor` owns the entity.
pub fn ensure_owner(owner: Uuid, actor: Uuid, action: &str) -> ApiResult<()> {
    if owner == actor {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!("You are not authorized to {}", action)))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_non_uuid() {
        assert!(matches!(parse_id("65a1f0c2e4b0", "video"), Err(ApiError::Validation { .. })));
        match parse_id("  ", "video") {
            Err(err) => assert_eq!(err.to_string(), "Video id is required"),
            Ok(_) => panic!("blank id must be rejected"),
        }
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "video").unwrap(), id);
    }

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("Content", Some("  hi ".to_string())).unwrap(), "hi");
        assert!(require_text("Content", Some("   ".to_string())).is_err());
        assert!(require_text("Content", None).is_err());
    }
}
