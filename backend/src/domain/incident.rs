//! Incident aggregate and its validated field types.
//!
//! Incidents carry a free-form title and description plus two enumerated
//! workflow fields. Any status may move to any other status; there is no
//! enforced transition graph.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::Patch;

/// Maximum number of characters accepted in an incident title.
pub const TITLE_MAX_CHARS: usize = 200;

/// Page size applied when a list request does not specify one.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Validation failures raised while building incident values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncidentValidationError {
    /// Title was blank once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Title exceeded [`TITLE_MAX_CHARS`].
    #[error("title must be at most {max} characters (got {actual})")]
    TitleTooLong { max: usize, actual: usize },
    /// Status was not one of the known workflow states.
    #[error("status must be one of Open, In_Progress, Resolved")]
    UnknownStatus { value: String },
    /// Priority was not one of the known levels.
    #[error("priority must be one of Low, Medium, High")]
    UnknownPriority { value: String },
    /// A non-nullable field was explicitly set to null.
    #[error("{field} must not be null")]
    NullNotAllowed { field: &'static str },
}

impl IncidentValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::UnknownStatus { .. } => "status",
            Self::UnknownPriority { .. } => "priority",
            Self::NullNotAllowed { field } => *field,
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::UnknownStatus { .. } => "invalid_status",
            Self::UnknownPriority { .. } => "invalid_priority",
            Self::NullNotAllowed { .. } => "null_not_allowed",
        }
    }

    /// Offending value, when the failure was caused by an unknown literal.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::UnknownStatus { value } | Self::UnknownPriority { value } => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Storage-assigned incident identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncidentId(i64);

impl IncidentId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty incident title of at most [`TITLE_MAX_CHARS`] characters.
///
/// The title is stored exactly as supplied; only the emptiness check trims.
///
/// # Examples
/// ```
/// use incident_tracker::domain::IncidentTitle;
///
/// let title = IncidentTitle::new("Server down").unwrap();
/// assert_eq!(title.as_str(), "Server down");
/// assert!(IncidentTitle::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentTitle(String);

impl IncidentTitle {
    /// Validate and wrap a title.
    pub fn new(value: impl Into<String>) -> Result<Self, IncidentValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IncidentValidationError::EmptyTitle);
        }
        let actual = value.chars().count();
        if actual > TITLE_MAX_CHARS {
            return Err(IncidentValidationError::TitleTooLong {
                max: TITLE_MAX_CHARS,
                actual,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the title text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $error:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical wire and storage representation.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = IncidentValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $text => Ok(Self::$variant), )+
                    other => Err(IncidentValidationError::$error {
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Workflow state of an incident.
    pub enum IncidentStatus: UnknownStatus {
        /// Newly reported and not yet picked up.
        Open => "Open",
        /// Someone is working on it.
        InProgress => "In_Progress",
        /// Closed out.
        Resolved => "Resolved",
    }
}

string_enum! {
    /// Urgency of an incident.
    pub enum IncidentPriority: UnknownPriority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

impl Default for IncidentStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl Default for IncidentPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Validated input for creating an incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    pub title: IncidentTitle,
    pub description: Option<String>,
    pub status: IncidentStatus,
    pub priority: IncidentPriority,
}

impl NewIncident {
    /// Build a create command from raw request strings, applying defaults
    /// for omitted status and priority.
    ///
    /// # Examples
    /// ```
    /// use incident_tracker::domain::{IncidentPriority, IncidentStatus, NewIncident};
    ///
    /// let incident = NewIncident::try_from_parts("Server down", None, None, None).unwrap();
    /// assert_eq!(incident.status, IncidentStatus::Open);
    /// assert_eq!(incident.priority, IncidentPriority::Medium);
    /// ```
    pub fn try_from_parts(
        title: &str,
        description: Option<String>,
        status: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Self, IncidentValidationError> {
        Ok(Self {
            title: IncidentTitle::new(title)?,
            description,
            status: status.map(str::parse).transpose()?.unwrap_or_default(),
            priority: priority.map(str::parse).transpose()?.unwrap_or_default(),
        })
    }
}

/// Sparse set of field changes applied by a partial update.
///
/// `None` on a non-nullable field and [`Patch::Absent`] on the description
/// leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentChanges {
    pub title: Option<IncidentTitle>,
    pub description: Patch<String>,
    pub status: Option<IncidentStatus>,
    pub priority: Option<IncidentPriority>,
}

fn required<T>(field: &'static str, patch: Patch<T>) -> Result<Option<T>, IncidentValidationError> {
    match patch {
        Patch::Absent => Ok(None),
        Patch::Null => Err(IncidentValidationError::NullNotAllowed { field }),
        Patch::Value(value) => Ok(Some(value)),
    }
}

impl IncidentChanges {
    /// Build changes from raw request patches.
    ///
    /// Explicit `null` clears the description but is rejected for the
    /// title, status and priority, which are not nullable.
    pub fn try_from_patches(
        title: Patch<String>,
        description: Patch<String>,
        status: Patch<String>,
        priority: Patch<String>,
    ) -> Result<Self, IncidentValidationError> {
        let title = required("title", title)?.map(IncidentTitle::new).transpose()?;
        let status = required("status", status)?
            .map(|value| value.parse())
            .transpose()?;
        let priority = required("priority", priority)?
            .map(|value| value.parse())
            .transpose()?;
        Ok(Self {
            title,
            description,
            status,
            priority,
        })
    }

    /// Whether no field would be applied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_absent()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Ordering applied when listing incidents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncidentSort {
    /// Newest first; ties broken by descending id.
    #[default]
    CreatedAtDesc,
    /// Storage order; no guarantee is made.
    Unsorted,
}

impl IncidentSort {
    /// Interpret a `sort_by` request value. Only `created_at` has a defined
    /// order; anything else is accepted and left unsorted.
    pub fn from_sort_by(value: &str) -> Self {
        if value == "created_at" {
            Self::CreatedAtDesc
        } else {
            Self::Unsorted
        }
    }
}

/// Status filter applied when listing incidents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncidentStatusFilter {
    /// No filter; every status is listed.
    #[default]
    Any,
    /// Only incidents in this status.
    Only(IncidentStatus),
    /// A value no stored incident can hold, so nothing is listed.
    NoMatch,
}

impl IncidentStatusFilter {
    /// Interpret a `status` request value. An empty value means no filter and
    /// an unrecognised one matches nothing.
    ///
    /// # Examples
    /// ```
    /// use incident_tracker::domain::{IncidentStatus, IncidentStatusFilter};
    ///
    /// assert_eq!(IncidentStatusFilter::from_status(""), IncidentStatusFilter::Any);
    /// assert_eq!(
    ///     IncidentStatusFilter::from_status("Resolved"),
    ///     IncidentStatusFilter::Only(IncidentStatus::Resolved)
    /// );
    /// assert_eq!(IncidentStatusFilter::from_status("open"), IncidentStatusFilter::NoMatch);
    /// ```
    pub fn from_status(value: &str) -> Self {
        if value.is_empty() {
            return Self::Any;
        }
        value.parse().map_or(Self::NoMatch, Self::Only)
    }

    /// Whether an incident in `status` passes the filter.
    pub fn matches(self, status: IncidentStatus) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => wanted == status,
            Self::NoMatch => false,
        }
    }
}

/// Filter, sort and window applied by the list use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidentListQuery {
    pub status: IncidentStatusFilter,
    pub sort: IncidentSort,
    pub skip: u32,
    pub limit: u32,
}

impl Default for IncidentListQuery {
    fn default() -> Self {
        Self {
            status: IncidentStatusFilter::Any,
            sort: IncidentSort::default(),
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Parameter object used to reconstruct a persisted incident.
#[derive(Debug, Clone)]
pub struct IncidentDraft {
    pub id: IncidentId,
    pub title: IncidentTitle,
    pub description: Option<String>,
    pub status: IncidentStatus,
    pub priority: IncidentPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A tracked incident as persisted by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    id: IncidentId,
    title: IncidentTitle,
    description: Option<String>,
    status: IncidentStatus,
    priority: IncidentPriority,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<IncidentDraft> for Incident {
    fn from(draft: IncidentDraft) -> Self {
        let IncidentDraft {
            id,
            title,
            description,
            status,
            priority,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            title,
            description,
            status,
            priority,
            created_at,
            updated_at,
        }
    }
}

impl Incident {
    pub fn id(&self) -> IncidentId {
        self.id
    }

    pub fn title(&self) -> &IncidentTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> IncidentStatus {
        self.status
    }

    pub fn priority(&self) -> IncidentPriority {
        self.priority
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last modifying update; `None` until the first one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_titles_are_rejected(#[case] title: &str) {
        assert_eq!(
            IncidentTitle::new(title),
            Err(IncidentValidationError::EmptyTitle)
        );
    }

    #[rstest]
    fn title_length_counts_characters() {
        let at_limit = "é".repeat(TITLE_MAX_CHARS);
        assert!(IncidentTitle::new(at_limit).is_ok());

        let over = "x".repeat(TITLE_MAX_CHARS + 1);
        assert_eq!(
            IncidentTitle::new(over),
            Err(IncidentValidationError::TitleTooLong {
                max: TITLE_MAX_CHARS,
                actual: TITLE_MAX_CHARS + 1,
            })
        );
    }

    #[rstest]
    #[case("Open", IncidentStatus::Open)]
    #[case("In_Progress", IncidentStatus::InProgress)]
    #[case("Resolved", IncidentStatus::Resolved)]
    fn statuses_parse_from_wire_names(#[case] raw: &str, #[case] expected: IncidentStatus) {
        assert_eq!(raw.parse::<IncidentStatus>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("open")]
    #[case("In Progress")]
    #[case("Bogus")]
    fn unknown_statuses_are_rejected(#[case] raw: &str) {
        let err = raw.parse::<IncidentStatus>().expect_err("unknown status");
        assert_eq!(err.field(), "status");
        assert_eq!(err.value(), Some(raw));
    }

    #[rstest]
    fn priorities_cover_all_levels() {
        let names: Vec<_> = IncidentPriority::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, ["Low", "Medium", "High"]);
        assert!("Urgent".parse::<IncidentPriority>().is_err());
    }

    #[rstest]
    fn new_incident_applies_defaults() {
        let incident = NewIncident::try_from_parts("Server down", None, None, None)
            .expect("valid incident");
        assert_eq!(incident.status, IncidentStatus::Open);
        assert_eq!(incident.priority, IncidentPriority::Medium);
        assert!(incident.description.is_none());
    }

    #[rstest]
    fn new_incident_rejects_unknown_status() {
        let err = NewIncident::try_from_parts("Server down", None, Some("Bogus"), None)
            .expect_err("invalid status");
        assert_eq!(err.code(), "invalid_status");
    }

    #[rstest]
    #[case(Patch::Null, Patch::Absent, Patch::Absent, "title")]
    #[case(Patch::Absent, Patch::Null, Patch::Absent, "status")]
    #[case(Patch::Absent, Patch::Absent, Patch::Null, "priority")]
    fn null_is_rejected_for_required_fields(
        #[case] title: Patch<String>,
        #[case] status: Patch<String>,
        #[case] priority: Patch<String>,
        #[case] field: &str,
    ) {
        let err = IncidentChanges::try_from_patches(title, Patch::Absent, status, priority)
            .expect_err("null must be rejected");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), "null_not_allowed");
    }

    #[rstest]
    fn null_description_clears_it() {
        let changes = IncidentChanges::try_from_patches(
            Patch::Absent,
            Patch::Null,
            Patch::Absent,
            Patch::Absent,
        )
        .expect("valid changes");
        assert_eq!(changes.description, Patch::Null);
        assert!(!changes.is_empty());
    }

    #[rstest]
    fn absent_fields_produce_empty_changes() {
        assert!(IncidentChanges::default().is_empty());
    }

    #[rstest]
    #[case("created_at", IncidentSort::CreatedAtDesc)]
    #[case("title", IncidentSort::Unsorted)]
    #[case("", IncidentSort::Unsorted)]
    fn sort_by_only_understands_created_at(#[case] raw: &str, #[case] expected: IncidentSort) {
        assert_eq!(IncidentSort::from_sort_by(raw), expected);
    }

    #[rstest]
    #[case("", IncidentStatusFilter::Any)]
    #[case("In_Progress", IncidentStatusFilter::Only(IncidentStatus::InProgress))]
    #[case("Bogus", IncidentStatusFilter::NoMatch)]
    #[case(" Open", IncidentStatusFilter::NoMatch)]
    fn status_filter_from_query_value(#[case] raw: &str, #[case] expected: IncidentStatusFilter) {
        assert_eq!(IncidentStatusFilter::from_status(raw), expected);
    }

    #[rstest]
    fn unmatched_filter_excludes_every_status() {
        for status in [
            IncidentStatus::Open,
            IncidentStatus::InProgress,
            IncidentStatus::Resolved,
        ] {
            assert!(!IncidentStatusFilter::NoMatch.matches(status));
            assert!(IncidentStatusFilter::Any.matches(status));
        }
    }
}
