//! The personal-information form the pipeline fills in.
//!
//! Headless stand-in for the page's `<form>`: one text value per
//! [`FormField`] plus a per-field "just updated" mark that expires on its
//! own deadline.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// A named control of the personal-information form.
///
/// The set is the union of the fields seen across collaborator versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    Address,
    ZipCode,
    DocumentType,
    DocumentNumber,
    BirthCountry,
    BirthDate,
    Gender,
    ResidenceCountry,
    Province,
    City,
}

impl FormField {
    pub const ALL: [FormField; 15] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::Address,
        FormField::ZipCode,
        FormField::DocumentType,
        FormField::DocumentNumber,
        FormField::BirthCountry,
        FormField::BirthDate,
        FormField::Gender,
        FormField::ResidenceCountry,
        FormField::Province,
        FormField::City,
    ];

    /// Control id on the page.
    pub fn id(self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::FullName => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::ZipCode => "zipCode",
            FormField::DocumentType => "documentType",
            FormField::DocumentNumber => "documentNumber",
            FormField::BirthCountry => "birthCountry",
            FormField::BirthDate => "birthDate",
            FormField::Gender => "gender",
            FormField::ResidenceCountry => "residenceCountry",
            FormField::Province => "province",
            FormField::City => "city",
        }
    }

    /// Look a field up by its control id.
    pub fn from_id(id: &str) -> Option<FormField> {
        FormField::ALL.into_iter().find(|f| f.id() == id)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Default)]
struct FieldSlot {
    value: String,
    highlight_until: Option<Instant>,
}

/// Current values of every [`FormField`].
///
/// Serialises as a `{ "<control id>": "<value>" }` object.
#[derive(Debug, Clone)]
pub struct PersonalInfoForm {
    slots: BTreeMap<FormField, FieldSlot>,
}

impl Default for PersonalInfoForm {
    fn default() -> Self {
        Self {
            slots: FormField::ALL
                .into_iter()
                .map(|f| (f, FieldSlot::default()))
                .collect(),
        }
    }
}

impl PersonalInfoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FormField) -> &str {
        self.slots.get(&field).map_or("", |s| s.value.as_str())
    }

    /// Write `value` and mark the field as just updated until
    /// `now + highlight`.
    pub fn set(&mut self, field: FormField, value: impl Into<String>, now: Instant, highlight: Duration) {
        let slot = self.slots.entry(field).or_default();
        slot.value = value.into();
        slot.highlight_until = Some(now + highlight);
    }

    /// `true` while the field's "just updated" mark has not expired.
    pub fn is_highlighted(&self, field: FormField, now: Instant) -> bool {
        self.slots
            .get(&field)
            .and_then(|s| s.highlight_until)
            .is_some_and(|until| now < until)
    }

    /// Clear every value and mark.
    pub fn reset(&mut self) {
        for slot in self.slots.values_mut() {
            *slot = FieldSlot::default();
        }
    }

    /// `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.slots.iter().map(|(f, s)| (*f, s.value.as_str()))
    }

    /// `true` when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.slots.values().all(|s| s.value.is_empty())
    }
}

impl Serialize for PersonalInfoForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.id(), value)?;
        }
        map.end()
    }
}
