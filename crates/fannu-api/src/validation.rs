//! Declarative field rules, run before any write. Each check appends a
//! field-scoped message; callers short-circuit with 422 when the list is
//! non-empty. Cross-entity business rules (capacity vs. reservations) are
//! deliberately not checked here.

use chrono::{DateTime, Utc};

use fannu_types::models::{BroadcastSegment, DropKind};

use crate::error::FieldError;

// Text limits count characters, not bytes.
pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_BODY_LEN: usize = 1000;

pub fn validate_drop_kind(kind: &str, errors: &mut Vec<FieldError>) -> Option<DropKind> {
    let parsed = DropKind::parse(kind);
    if parsed.is_none() {
        errors.push(FieldError::new(
            "kind",
            "must be one of EVENT, MERCH, CONTENT, CUSTOM",
        ));
    }
    parsed
}

/// Shared between create and update; runs on the merged field set.
pub fn validate_drop_fields(
    title: &str,
    description: Option<&str>,
    price: i64,
    capacity: Option<i64>,
    starts_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
    errors: &mut Vec<FieldError>,
) {
    if title.trim().is_empty() {
        errors.push(FieldError::new("title", "must not be empty"));
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.push(FieldError::new(
            "title",
            format!("must be at most {} characters", MAX_TITLE_LEN),
        ));
    }

    if let Some(desc) = description {
        if desc.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(FieldError::new(
                "description",
                format!("must be at most {} characters", MAX_DESCRIPTION_LEN),
            ));
        }
    }

    if price < 0 {
        errors.push(FieldError::new("price", "must not be negative"));
    }

    if let Some(cap) = capacity {
        if cap < 1 {
            errors.push(FieldError::new("capacity", "must be at least 1"));
        }
    }

    if let Some(end) = ends_at {
        if end <= starts_at {
            errors.push(FieldError::new("ends_at", "must be after starts_at"));
        }
    }
}

pub fn validate_broadcast_segment(
    segment: &str,
    errors: &mut Vec<FieldError>,
) -> Option<BroadcastSegment> {
    let parsed = BroadcastSegment::parse(segment);
    if parsed.is_none() {
        errors.push(FieldError::new("segment", "must be ALL or VIP"));
    }
    parsed
}

pub fn validate_broadcast_body(body: &str, errors: &mut Vec<FieldError>) {
    if body.trim().is_empty() {
        errors.push(FieldError::new("body", "must not be empty"));
    } else if body.chars().count() > MAX_BODY_LEN {
        errors.push(FieldError::new(
            "body",
            format!("must be at most {} characters", MAX_BODY_LEN),
        ));
    }
}

/// Loose E.164 shape: leading `+`, then 7 to 15 digits.
pub fn validate_phone(phone: &str, errors: &mut Vec<FieldError>) {
    let digits = phone.strip_prefix('+');
    let ok = match digits {
        Some(rest) => {
            (7..=15).contains(&rest.len()) && rest.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    };
    if !ok {
        errors.push(FieldError::new(
            "phone",
            "must look like +251911111111 (international format)",
        ));
    }
}

/// Slugs end up in public URLs: lowercase alphanumeric and hyphens, 3-40
/// chars, no leading or trailing hyphen.
pub fn validate_slug(slug: &str, errors: &mut Vec<FieldError>) {
    let ok = (3..=40).contains(&slug.len())
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        && !slug.starts_with('-')
        && !slug.ends_with('-');
    if !ok {
        errors.push(FieldError::new(
            "slug",
            "must be 3-40 lowercase letters, digits, or hyphens",
        ));
    }
}

pub fn validate_display_name(display_name: &str, errors: &mut Vec<FieldError>) {
    if display_name.trim().is_empty() {
        errors.push(FieldError::new("display_name", "must not be empty"));
    } else if display_name.chars().count() > 80 {
        errors.push(FieldError::new(
            "display_name",
            "must be at most 80 characters",
        ));
    }
}

pub fn validate_username(username: &str, errors: &mut Vec<FieldError>) {
    if !(3..=32).contains(&username.chars().count()) {
        errors.push(FieldError::new(
            "username",
            "must be 3-32 characters",
        ));
    }
}

pub fn validate_password(password: &str, errors: &mut Vec<FieldError>) {
    if password.chars().count() < 8 {
        errors.push(FieldError::new(
            "password",
            "must be at least 8 characters",
        ));
    }
}

pub fn validate_booking_settings(
    booking_rate: Option<i64>,
    deposit_percent: Option<i64>,
    errors: &mut Vec<FieldError>,
) {
    if let Some(rate) = booking_rate {
        if rate < 0 {
            errors.push(FieldError::new("booking_rate", "must not be negative"));
        }
    }
    if let Some(pct) = deposit_percent {
        if !(0..=100).contains(&pct) {
            errors.push(FieldError::new(
                "deposit_percent",
                "must be between 0 and 100",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut errors = vec![];
        validate_drop_fields(
            "Rooftop show",
            None,
            -1,
            None,
            ts("2026-09-05T18:00:00+00:00"),
            None,
            &mut errors,
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn unknown_drop_kind_is_rejected() {
        let mut errors = vec![];
        assert!(validate_drop_kind("RAFFLE", &mut errors).is_none());
        assert_eq!(errors[0].field, "kind");

        let mut errors = vec![];
        assert_eq!(
            validate_drop_kind("CONTENT", &mut errors),
            Some(DropKind::Content)
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn window_must_end_after_it_starts() {
        let mut errors = vec![];
        validate_drop_fields(
            "Q&A",
            None,
            0,
            Some(10),
            ts("2026-09-05T18:00:00+00:00"),
            Some(ts("2026-09-05T17:00:00+00:00")),
            &mut errors,
        );
        assert_eq!(errors[0].field, "ends_at");
    }

    #[test]
    fn multiple_failures_are_all_reported() {
        let mut errors = vec![];
        validate_drop_fields(
            "",
            None,
            -500,
            Some(0),
            Utc.with_ymd_and_hms(2026, 9, 5, 18, 0, 0).unwrap(),
            None,
            &mut errors,
        );
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "price", "capacity"]);
    }

    #[test]
    fn phone_shape() {
        let mut errors = vec![];
        validate_phone("+251911111111", &mut errors);
        assert!(errors.is_empty());

        for bad in ["251911111111", "+12ab", "+123", "", "+1234567890123456"] {
            let mut errors = vec![];
            validate_phone(bad, &mut errors);
            assert_eq!(errors.len(), 1, "expected rejection for {:?}", bad);
        }
    }

    #[test]
    fn slug_shape() {
        let mut errors = vec![];
        validate_slug("selam-tesfaye", &mut errors);
        assert!(errors.is_empty());

        for bad in ["ab", "Selam", "-selam", "selam-", "sela m"] {
            let mut errors = vec![];
            validate_slug(bad, &mut errors);
            assert_eq!(errors.len(), 1, "expected rejection for {:?}", bad);
        }
    }

    #[test]
    fn broadcast_rules() {
        let mut errors = vec![];
        assert_eq!(
            validate_broadcast_segment("VIP", &mut errors),
            Some(BroadcastSegment::Vip)
        );
        validate_broadcast_body("show tonight, link in bio", &mut errors);
        assert!(errors.is_empty());

        let mut errors = vec![];
        validate_broadcast_segment("FRIENDS", &mut errors);
        validate_broadcast_body("", &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn text_limits_count_characters_not_bytes() {
        // 100 Ethiopic characters is 300 bytes but well under the 120 limit.
        let title = "ሀ".repeat(100);
        let mut errors = vec![];
        validate_drop_fields(
            &title,
            None,
            0,
            None,
            ts("2026-09-05T18:00:00+00:00"),
            None,
            &mut errors,
        );
        assert!(errors.is_empty());

        let mut errors = vec![];
        validate_drop_fields(
            &"ሀ".repeat(121),
            None,
            0,
            None,
            ts("2026-09-05T18:00:00+00:00"),
            None,
            &mut errors,
        );
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn username_and_password_bounds() {
        let mut errors = vec![];
        validate_username("selam", &mut errors);
        validate_password("long-enough", &mut errors);
        assert!(errors.is_empty());

        let mut errors = vec![];
        validate_username("ab", &mut errors);
        validate_password("short", &mut errors);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["username", "password"]);
    }

    #[test]
    fn deposit_percent_bounds() {
        let mut errors = vec![];
        validate_booking_settings(Some(50000), Some(101), &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "deposit_percent");
    }
}
