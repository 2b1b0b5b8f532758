//! Form binding: write the collaborator's `personalInfo` onto the form.
//!
//! The collaborator has shipped several naming conventions (`name`,
//! `fullname`, `firstname`/`lastname`, `phone` vs `phone_number`). The table
//! below keeps every observed key. Where two keys name the same control the
//! first one present wins; no field is ever derived from another.

use crate::form::{FormField, PersonalInfoForm};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Response keys read for each form control, in priority order.
pub const FIELD_SOURCES: &[(FormField, &[&str])] = &[
    (FormField::FirstName, &["firstname"]),
    (FormField::LastName, &["lastname"]),
    (FormField::FullName, &["fullname", "name"]),
    (FormField::Email, &["email"]),
    (FormField::Phone, &["phone_number", "phone"]),
    (FormField::Address, &["address"]),
    (FormField::ZipCode, &["zip_code"]),
    (FormField::DocumentType, &["document_type"]),
    (FormField::DocumentNumber, &["document_number"]),
    (FormField::BirthCountry, &["birth_country"]),
    (FormField::BirthDate, &["birth_date"]),
    (FormField::Gender, &["gender"]),
    (FormField::ResidenceCountry, &["residence_country"]),
    (FormField::Province, &["province"]),
    (FormField::City, &["city"]),
];

/// Flat `key → text` view of the `personalInfo` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalInfo {
    fields: BTreeMap<String, String>,
}

impl PersonalInfo {
    /// Keep strings verbatim and render numbers and booleans as JSON text.
    /// `null`, arrays and objects are treated as absent.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .filter_map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((k.clone(), text))
            })
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PersonalInfo {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// First present source key for `field`, or `""`.
pub fn resolve_field(info: &PersonalInfo, field: FormField) -> &str {
    FIELD_SOURCES
        .iter()
        .find(|(f, _)| *f == field)
        .and_then(|(_, keys)| keys.iter().find_map(|k| info.get(k)))
        .unwrap_or("")
}

/// Write every mapped field, consuming `info`.
///
/// Returns the fields in the order they were written so callers can
/// forward per-field events.
pub fn bind_personal_info(
    info: PersonalInfo,
    form: &mut PersonalInfoForm,
    now: Instant,
    highlight: Duration,
) -> Vec<FormField> {
    let unmapped = info
        .fields
        .keys()
        .filter(|k| !FIELD_SOURCES.iter().any(|(_, keys)| keys.contains(&k.as_str())))
        .count();
    if unmapped > 0 {
        debug!("{} personalInfo keys have no form control", unmapped);
    }

    FIELD_SOURCES
        .iter()
        .map(|(field, _)| {
            let value = resolve_field(&info, *field);
            debug!("{} ← {:?}", field, value);
            form.set(*field, value, now, highlight);
            *field
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(v: Value) -> PersonalInfo {
        PersonalInfo::from_json_object(v.as_object().expect("object"))
    }

    #[test]
    fn table_covers_every_field_once() {
        for f in FormField::ALL {
            assert_eq!(
                FIELD_SOURCES.iter().filter(|(g, _)| *g == f).count(),
                1,
                "{f} must appear exactly once"
            );
        }
    }

    #[test]
    fn email_only_response_blanks_everything_else() {
        let mut form = PersonalInfoForm::new();
        form.set(FormField::City, "stale", Instant::now(), Duration::from_secs(1));

        let written = bind_personal_info(
            info(json!({"email": "a@b.com"})),
            &mut form,
            Instant::now(),
            Duration::from_secs(1),
        );

        assert_eq!(written.len(), FormField::ALL.len());
        for (field, value) in form.iter() {
            if field == FormField::Email {
                assert_eq!(value, "a@b.com");
            } else {
                assert_eq!(value, "", "{field} should be blank");
            }
        }
    }

    #[test]
    fn fullname_preferred_over_name() {
        let i = info(json!({"name": "J. Doe", "fullname": "Jane Doe"}));
        assert_eq!(resolve_field(&i, FormField::FullName), "Jane Doe");
        let i = info(json!({"name": "J. Doe"}));
        assert_eq!(resolve_field(&i, FormField::FullName), "J. Doe");
    }

    #[test]
    fn phone_falls_back_to_legacy_key() {
        let i = info(json!({"phone": "555-0100"}));
        assert_eq!(resolve_field(&i, FormField::Phone), "555-0100");
    }

    #[test]
    fn names_are_not_split_or_joined() {
        let i = info(json!({"fullname": "Jane Doe"}));
        assert_eq!(resolve_field(&i, FormField::FirstName), "");
        assert_eq!(resolve_field(&i, FormField::LastName), "");
    }

    #[test]
    fn values_are_written_verbatim() {
        let mut form = PersonalInfoForm::new();
        bind_personal_info(
            info(json!({"email": "  not an email <script>", "zip_code": 28001, "gender": null})),
            &mut form,
            Instant::now(),
            Duration::from_secs(1),
        );
        assert_eq!(form.value(FormField::Email), "  not an email <script>");
        assert_eq!(form.value(FormField::ZipCode), "28001");
        assert_eq!(form.value(FormField::Gender), "");
    }

    #[test]
    fn every_written_field_is_marked() {
        let t0 = Instant::now();
        let mut form = PersonalInfoForm::new();
        bind_personal_info(PersonalInfo::default(), &mut form, t0, Duration::from_secs(1));
        for f in FormField::ALL {
            assert!(form.is_highlighted(f, t0));
            assert!(!form.is_highlighted(f, t0 + Duration::from_secs(1)));
        }
    }
}
