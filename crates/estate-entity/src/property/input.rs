//! Lenient coercion of client-supplied property fields.
//!
//! Listing forms arrive as loosely typed text (multipart fields or JSON
//! scalars rendered to strings). Numeric fields never reject a request:
//! whatever cannot be read as a number becomes zero.

use estate_core::error::AppError;

/// Property fields exactly as the client sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPropertyFields {
    pub user_id: Option<String>,
    pub location: Option<String>,
    pub age: Option<String>,
    pub floor_plan: Option<String>,
    pub bedrooms: Option<String>,
    pub additional_facilities: Option<String>,
    pub garden: Option<String>,
    pub parking: Option<String>,
    pub proximity_facilities: Option<String>,
    pub proximity_main_roads: Option<String>,
    pub tax_records: Option<String>,
}

/// A property ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub user_id: i32,
    pub location: Option<String>,
    pub age: Option<String>,
    pub floor_plan: Option<String>,
    pub bedrooms: Option<i32>,
    pub additional_facilities: Option<String>,
    pub garden: bool,
    pub parking: bool,
    pub proximity_facilities: Option<i32>,
    pub proximity_main_roads: Option<i32>,
    pub tax_records: Option<f64>,
    pub photo_url: Option<String>,
}

/// A full replacement of a property's editable columns.
///
/// `photo_url` is only written when `Some`; the stored URL is kept otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChanges {
    pub location: Option<String>,
    pub age: Option<String>,
    pub floor_plan: Option<String>,
    pub bedrooms: i32,
    pub additional_facilities: Option<String>,
    pub garden: bool,
    pub parking: bool,
    pub proximity_facilities: i32,
    pub proximity_main_roads: i32,
    pub tax_records: f64,
    pub photo_url: Option<String>,
}

impl RawPropertyFields {
    /// Store a named form field. Returns `false` for names that are not property fields.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "user_id" => &mut self.user_id,
            "location" => &mut self.location,
            "age" => &mut self.age,
            "floor_plan" => &mut self.floor_plan,
            "bedrooms" => &mut self.bedrooms,
            "additional_facilities" => &mut self.additional_facilities,
            "garden" => &mut self.garden,
            "parking" => &mut self.parking,
            "proximity_facilities" => &mut self.proximity_facilities,
            "proximity_main_roads" => &mut self.proximity_main_roads,
            "tax_records" => &mut self.tax_records,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Coerce into an insert command. `user_id` is the only required field.
    ///
    /// Absent numeric fields stay absent; present but unreadable ones become zero.
    pub fn into_new_property(self) -> Result<NewProperty, AppError> {
        let user_id = self
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::validation("user_id is required"))?
            .parse::<i32>()
            .map_err(|_| AppError::validation("user_id must be an integer"))?;

        Ok(NewProperty {
            user_id,
            location: self.location,
            age: self.age,
            floor_plan: self.floor_plan,
            bedrooms: self.bedrooms.as_deref().map(coerce_int),
            additional_facilities: self.additional_facilities,
            garden: is_truthy(self.garden.as_deref()),
            parking: is_truthy(self.parking.as_deref()),
            proximity_facilities: self.proximity_facilities.as_deref().map(coerce_int),
            proximity_main_roads: self.proximity_main_roads.as_deref().map(coerce_int),
            tax_records: self.tax_records.as_deref().map(coerce_decimal),
            photo_url: None,
        })
    }

    /// Coerce into an update command. Absent numeric fields become zero.
    pub fn into_changes(self) -> PropertyChanges {
        PropertyChanges {
            location: self.location,
            age: self.age,
            floor_plan: self.floor_plan,
            bedrooms: self.bedrooms.as_deref().map(coerce_int).unwrap_or(0),
            additional_facilities: self.additional_facilities,
            garden: is_truthy(self.garden.as_deref()),
            parking: is_truthy(self.parking.as_deref()),
            proximity_facilities: self
                .proximity_facilities
                .as_deref()
                .map(coerce_int)
                .unwrap_or(0),
            proximity_main_roads: self
                .proximity_main_roads
                .as_deref()
                .map(coerce_int)
                .unwrap_or(0),
            tax_records: self.tax_records.as_deref().map(coerce_decimal).unwrap_or(0.0),
            photo_url: None,
        }
    }
}

/// Read the leading integer of `s`, or 0 when there is none.
///
/// Leading whitespace and a sign are accepted; parsing stops at the first
/// non-digit, so `"12abc"` reads as 12. Values outside `i32` read as 0.
pub fn coerce_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, rest) = split_sign(s);
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0;
    }

    rest[..digits_len]
        .parse::<i64>()
        .ok()
        .map(|v| if negative { -v } else { v })
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(0)
}

/// Read the longest leading decimal number of `s`, or 0.0 when there is none.
pub fn coerce_decimal(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Whether a flag value means "yes": `1` or `true` (any case).
pub fn is_truthy(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => false,
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int("3"), 3);
        assert_eq!(coerce_int("  42 "), 42);
        assert_eq!(coerce_int("-7"), -7);
        assert_eq!(coerce_int("12abc"), 12);
        assert_eq!(coerce_int("abc"), 0);
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("-"), 0);
        assert_eq!(coerce_int("3.9"), 3);
        assert_eq!(coerce_int("99999999999"), 0);
    }

    #[test]
    fn test_coerce_decimal() {
        assert_eq!(coerce_decimal("1200.50"), 1200.5);
        assert_eq!(coerce_decimal("  .5"), 0.5);
        assert_eq!(coerce_decimal("7."), 7.0);
        assert_eq!(coerce_decimal("-3.25kg"), -3.25);
        assert_eq!(coerce_decimal("1e3"), 1000.0);
        assert_eq!(coerce_decimal("2e"), 2.0);
        assert_eq!(coerce_decimal("x"), 0.0);
        assert_eq!(coerce_decimal("."), 0.0);
        assert_eq!(coerce_decimal(""), 0.0);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("true")));
        assert!(is_truthy(Some("TRUE")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(Some("false")));
        assert!(!is_truthy(Some("yes")));
        assert!(!is_truthy(None));
    }

    #[test]
    fn test_set_ignores_unknown_fields() {
        let mut raw = RawPropertyFields::default();
        assert!(raw.set("bedrooms", "2".to_string()));
        assert!(!raw.set("photo", "ignored".to_string()));
        assert_eq!(raw.bedrooms.as_deref(), Some("2"));
    }

    #[test]
    fn test_new_property_requires_user_id() {
        let err = RawPropertyFields::default().into_new_property().unwrap_err();
        assert_eq!(err.message, "user_id is required");

        let raw = RawPropertyFields {
            user_id: Some("seven".to_string()),
            ..Default::default()
        };
        let err = raw.into_new_property().unwrap_err();
        assert_eq!(err.message, "user_id must be an integer");
    }

    #[test]
    fn test_new_property_coercion() {
        let raw = RawPropertyFields {
            user_id: Some("5".to_string()),
            location: Some("Riverside".to_string()),
            bedrooms: Some("3".to_string()),
            garden: Some("true".to_string()),
            proximity_facilities: Some("n/a".to_string()),
            tax_records: Some("1200.50".to_string()),
            ..Default::default()
        };

        let new = raw.into_new_property().unwrap();
        assert_eq!(new.user_id, 5);
        assert_eq!(new.bedrooms, Some(3));
        assert!(new.garden);
        assert!(!new.parking);
        assert_eq!(new.proximity_facilities, Some(0));
        assert_eq!(new.proximity_main_roads, None);
        assert_eq!(new.tax_records, Some(1200.5));
        assert_eq!(new.photo_url, None);
    }

    #[test]
    fn test_changes_default_to_zero() {
        let raw = RawPropertyFields {
            bedrooms: Some("abc".to_string()),
            parking: Some("1".to_string()),
            ..Default::default()
        };

        let changes = raw.into_changes();
        assert_eq!(changes.bedrooms, 0);
        assert!(changes.parking);
        assert!(!changes.garden);
        assert_eq!(changes.proximity_facilities, 0);
        assert_eq!(changes.proximity_main_roads, 0);
        assert_eq!(changes.tax_records, 0.0);
        assert_eq!(changes.location, None);
    }
}
