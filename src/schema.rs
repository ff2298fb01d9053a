// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Declarative form schemas.
//!
//! Each form the client submits (registration, login, the three profile
//! kinds, and the two searches) is described once as a list of fields. The
//! same description drives required-field checks, request body building and
//! search query strings, so the screens never hand-roll field handling.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::Role;

/// How a field is entered and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Parsed as a float before submission; unparseable input becomes NaN
    Number,
    Email,
    Password,
    /// Local file path, uploaded as a multipart file part
    Image,
}

/// One input of a form.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name
    pub name: &'static str,
    /// Label shown to the user
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required,
    }
}

/// Ordered field list for one form.
#[derive(Debug)]
pub struct FormSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

use FieldKind::*;

pub static REGISTRATION: FormSchema = FormSchema {
    name: "registration",
    fields: &[
        field("name", "Name", Text, true),
        field("email", "Email", Email, true),
        field("password", "Password", Password, true),
    ],
};

pub static LOGIN: FormSchema = FormSchema {
    name: "login",
    fields: &[
        field("email", "Email", Email, true),
        field("password", "Password", Password, true),
    ],
};

pub static ATHLETE_PROFILE: FormSchema = FormSchema {
    name: "athlete profile",
    fields: &[
        field("high_school_name", "High School Name", Text, true),
        field("positions", "Positions", Text, true),
        field("youtube_video_link", "YouTube Video Link", Text, false),
        field("height", "Height", Number, true),
        field("weight", "Weight", Number, true),
        field("bio", "Bio", Multiline, true),
        field("state", "State", Text, true),
        field("throwing_arm", "Throwing Arm", Text, false),
        field("batting_arm", "Batting Arm", Text, false),
        field("profile_picture", "Profile Picture", Image, false),
    ],
};

pub static COACH_PROFILE: FormSchema = FormSchema {
    name: "coach profile",
    fields: &[
        field("name", "Name", Text, false),
        field("team_needs", "Team Needs", Text, true),
        field("school_name", "School Name", Text, true),
        field("position_within_org", "Position", Text, true),
        field("division", "Division", Text, false),
        field("state", "State", Text, false),
        field("bio", "Bio", Multiline, true),
        field("profile_picture", "Profile Picture", Image, false),
    ],
};

pub static SCOUT_PROFILE: FormSchema = FormSchema {
    name: "scout profile",
    fields: &[],
};

pub static ATHLETE_SEARCH: FormSchema = FormSchema {
    name: "athlete search",
    fields: &[
        field("high_school_name", "High School Name", Text, false),
        field("positions", "Positions", Text, false),
        field("bio", "Bio", Text, false),
        field("height", "Height", Text, false),
        field("weight", "Weight", Text, false),
    ],
};

pub static COACH_SEARCH: FormSchema = FormSchema {
    name: "coach search",
    fields: &[
        field("team_needs", "Team Needs", Text, false),
        field("school_name", "School Name", Text, false),
        // The search endpoint filters on `position`, unlike the profile
        // bodies which use `position_within_org`
        field("position", "Position", Text, false),
        field("bio", "Bio", Text, false),
    ],
};

/// Profile form for a role.
pub fn profile_schema(role: Role) -> &'static FormSchema {
    match role {
        Role::Athlete => &ATHLETE_PROFILE,
        Role::Coach => &COACH_PROFILE,
        Role::Scout => &SCOUT_PROFILE,
    }
}

/// In-memory form state: raw strings keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    values: BTreeMap<String, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Value of a field, or `""` when unset.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value, or `None` when unset or blank.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        let value = self.get(name).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Copy every non-blank value from `other` over this form.
    pub fn overlay(&mut self, other: &FormInput) {
        for (name, value) in &other.values {
            if !value.trim().is_empty() {
                self.values.insert(name.clone(), value.clone());
            }
        }
    }

    /// Parse `key=value` pairs, e.g. from command-line arguments.
    pub fn from_pairs<I, S>(pairs: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got {pair:?}"))?;
            input.set(key.trim(), value);
        }
        Ok(input)
    }
}

/// Float conversion for numeric fields.
///
/// Reads the longest leading decimal number after any leading whitespace
/// and ignores the rest, so "6 ft" is 6 and "180lbs" is 180. Input with no
/// leading number yields NaN.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        // An exponent marker without digits is not part of the number
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Text form of a converted number, spelling infinities the way the backend
/// parses them.
fn number_text(n: f64) -> String {
    if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields sent as values rather than file uploads.
    pub fn value_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.kind != FieldKind::Image)
    }

    /// Names in `input` that this form does not know about.
    pub fn unknown_fields<'a>(&self, input: &'a FormInput) -> Vec<&'a str> {
        input
            .values
            .keys()
            .map(String::as_str)
            .filter(|name| self.field(name).is_none())
            .collect()
    }

    /// Check every required field is present.
    ///
    /// All missing fields are reported together, by label. Blank input
    /// counts as missing.
    pub fn validate(&self, input: &FormInput) -> Result<()> {
        let missing: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.required && input.non_empty(f.name).is_none())
            .map(|f| f.label.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            tracing::debug!(form = self.name, missing = ?missing, "Form validation failed");
            Err(AppError::Validation(missing))
        }
    }

    /// Text parts for a multipart create request.
    ///
    /// Blank optional fields are omitted. Numbers are float-converted, so
    /// "6.10" is sent as "6.1" and "tall" as "NaN".
    pub fn multipart_fields(&self, input: &FormInput) -> Vec<(&'static str, String)> {
        self.value_fields()
            .filter_map(|f| {
                let value = input.non_empty(f.name)?;
                let encoded = match f.kind {
                    FieldKind::Number => number_text(parse_number(value)),
                    _ => value.to_string(),
                };
                Some((f.name, encoded))
            })
            .collect()
    }

    /// JSON body for a partial update.
    ///
    /// Every value field is present; blank input is sent as `null`, as are
    /// numbers that fail to parse (JSON cannot carry NaN).
    pub fn json_body(&self, input: &FormInput) -> Map<String, Value> {
        self.value_fields()
            .map(|f| {
                let value = match (input.non_empty(f.name), f.kind) {
                    (None, _) => Value::Null,
                    (Some(raw), FieldKind::Number) => serde_json::Number::from_f64(parse_number(raw))
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    (Some(raw), _) => Value::String(raw.to_string()),
                };
                (f.name.to_string(), value)
            })
            .collect()
    }

    /// Prefill form state from a record returned by the backend.
    pub fn input_from_record(&self, record: &Value) -> FormInput {
        let mut input = FormInput::new();
        for f in self.value_fields() {
            let value = match record.get(f.name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => String::new(),
            };
            input.set(f.name, value);
        }
        input
    }

    /// Query parameters for the non-blank fields, in declaration order.
    pub fn query_pairs(&self, input: &FormInput) -> Vec<(&'static str, String)> {
        self.value_fields()
            .filter_map(|f| input.non_empty(f.name).map(|v| (f.name, v.to_string())))
            .collect()
    }

    /// Percent-encoded query string; empty when no filter is set.
    pub fn query_string(&self, input: &FormInput) -> String {
        self.query_pairs(input)
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_reports_all_missing_fields() {
        let input = FormInput::new().with("name", "Sam").with("email", "  ");
        match REGISTRATION.validate(&input) {
            Err(AppError::Validation(missing)) => assert_eq!(missing, vec!["Email", "Password"]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_athlete_optional_fields_not_required() {
        let input = FormInput::new()
            .with("high_school_name", "Central")
            .with("positions", "Pitcher")
            .with("height", "6.1")
            .with("weight", "180")
            .with("bio", "Lefty")
            .with("state", "CA");
        assert!(ATHLETE_PROFILE.validate(&input).is_ok());
    }

    #[test]
    fn test_scout_has_nothing_to_validate() {
        assert!(SCOUT_PROFILE.validate(&FormInput::new()).is_ok());
        assert!(SCOUT_PROFILE.json_body(&FormInput::new()).is_empty());
    }

    #[test]
    fn test_multipart_fields_convert_numbers() {
        let input = FormInput::new()
            .with("high_school_name", "Central")
            .with("height", "6.10")
            .with("weight", "heavy")
            .with("youtube_video_link", "")
            .with("profile_picture", "/tmp/me.png");
        let fields = ATHLETE_PROFILE.multipart_fields(&input);
        assert_eq!(
            fields,
            vec![
                ("high_school_name", "Central".to_string()),
                ("height", "6.1".to_string()),
                ("weight", "NaN".to_string()),
            ]
        );

        let input = FormInput::new().with("height", "6 ft").with("weight", "180lbs");
        assert_eq!(
            ATHLETE_PROFILE.multipart_fields(&input),
            vec![("height", "6".to_string()), ("weight", "180".to_string())]
        );
        let input = FormInput::new().with("height", "tall");
        assert_eq!(
            ATHLETE_PROFILE.multipart_fields(&input),
            vec![("height", "NaN".to_string())]
        );
    }

    #[test]
    fn test_parse_number_reads_leading_number() {
        assert_eq!(parse_number("6.1ft"), 6.1);
        assert_eq!(parse_number("  -2.5e2 meters"), -250.0);
        assert_eq!(parse_number("5."), 5.0);
        assert_eq!(parse_number(".75in"), 0.75);
        assert_eq!(parse_number("3e"), 3.0);
        assert_eq!(parse_number("1e+x"), 1.0);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(number_text(parse_number("-Infinity")), "-Infinity");
        assert!(parse_number("").is_nan());
        assert!(parse_number(".").is_nan());
        assert!(parse_number("-").is_nan());
        assert!(parse_number("ft 6").is_nan());
    }

    #[test]
    fn test_json_body_nulls_blank_fields() {
        let input = FormInput::new()
            .with("team_needs", "Catcher")
            .with("bio", "");
        let body = COACH_PROFILE.json_body(&input);
        assert_eq!(body["team_needs"], Value::String("Catcher".into()));
        assert_eq!(body["bio"], Value::Null);
        assert_eq!(body["school_name"], Value::Null);
        assert!(!body.contains_key("profile_picture"));
    }

    #[test]
    fn test_json_body_unparseable_number_is_null() {
        let input = FormInput::new().with("height", "tall").with("weight", "180");
        let body = ATHLETE_PROFILE.json_body(&input);
        assert_eq!(body["height"], Value::Null);
        assert_eq!(body["weight"], serde_json::json!(180.0));
    }

    #[test]
    fn test_query_string_skips_empty_filters() {
        let input = FormInput::new()
            .with("high_school_name", "St. Mary's")
            .with("positions", "")
            .with("weight", " ");
        assert_eq!(
            ATHLETE_SEARCH.query_string(&input),
            "high_school_name=St.%20Mary%27s"
        );
        assert_eq!(ATHLETE_SEARCH.query_string(&FormInput::new()), "");
    }

    #[test]
    fn test_query_pairs_follow_declaration_order() {
        let input = FormInput::new().with("bio", "fast").with("team_needs", "Pitcher");
        let names: Vec<_> = COACH_SEARCH.query_pairs(&input).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["team_needs", "bio"]);
    }

    #[test]
    fn test_input_from_record() {
        let record = serde_json::json!({"high_school_name": "Central", "height": 6.1, "bio": null});
        let input = ATHLETE_PROFILE.input_from_record(&record);
        assert_eq!(input.get("high_school_name"), "Central");
        assert_eq!(input.get("height"), "6.1");
        assert_eq!(input.get("bio"), "");
    }

    #[test]
    fn test_from_pairs() {
        let input = FormInput::from_pairs(["bio=Likes = signs", "state=CA"]).unwrap();
        assert_eq!(input.get("bio"), "Likes = signs");
        assert!(FormInput::from_pairs(["novalue"]).is_err());
        assert_eq!(ATHLETE_PROFILE.unknown_fields(&input), Vec::<&str>::new());
        assert_eq!(
            COACH_SEARCH.unknown_fields(&FormInput::new().with("height", "6")),
            vec!["height"]
        );
    }

    #[test]
    fn test_overlay_keeps_existing_for_blank() {
        let mut base = FormInput::new().with("bio", "old").with("state", "CA");
        base.overlay(&FormInput::new().with("bio", "new").with("state", ""));
        assert_eq!(base.get("bio"), "new");
        assert_eq!(base.get("state"), "CA");
    }
}
