//! Audit trail of a populate call.

use crate::SkipReason;

/// What happened to one property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyStatus {
    /// A value was coerced and assigned.
    Assigned,
    /// No candidate key was present; the property kept its value.
    Absent,
    /// A key was present but the value was not assigned.
    Skipped(SkipReason),
}

/// Outcome for one property of the populated type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyOutcome {
    property: String,
    key: Option<String>,
    status: PropertyStatus,
}

impl PropertyOutcome {
    /// Property name.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// JSON key that matched, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Result for the property.
    #[must_use]
    pub const fn status(&self) -> &PropertyStatus {
        &self.status
    }
}

/// Per-property results of populating one object, in descriptor order.
///
/// Nested objects do not contribute entries; their skips are logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportReport {
    type_name: &'static str,
    outcomes: Vec<PropertyOutcome>,
}

impl ImportReport {
    pub(crate) const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, property: &str, key: Option<&str>, status: PropertyStatus) {
        self.outcomes.push(PropertyOutcome {
            property: property.to_owned(),
            key: key.map(str::to_owned),
            status,
        });
    }

    /// Name of the populated type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Every outcome, in descriptor order.
    #[must_use]
    pub fn outcomes(&self) -> &[PropertyOutcome] {
        &self.outcomes
    }

    /// Status of the named property.
    #[must_use]
    pub fn status(&self, property: &str) -> Option<&PropertyStatus> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.property == property)
            .map(PropertyOutcome::status)
    }

    /// Names of assigned properties.
    pub fn assigned(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == PropertyStatus::Assigned)
            .map(PropertyOutcome::property)
    }

    /// Skipped properties with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.status {
            PropertyStatus::Skipped(reason) => Some((outcome.property(), reason)),
            PropertyStatus::Assigned | PropertyStatus::Absent => None,
        })
    }

    /// `true` when no present key was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped().next().is_none()
    }
}
