use thiserror::Error;

/// Structured rejection kinds for edit-time and submit-time rule checks.
///
/// The engine never produces user-facing prose beyond `Display`; HTTP status
/// mapping and JSON shaping happen in the `api` layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Daily total would exceed 24 hours (currently {current}, would become {after})")]
    BoundExceeded { current: String, after: String },

    #[error("A single permission entry may not exceed 3 hours (got {hours:.2}h)")]
    PermissionTooLong { hours: f64 },

    #[error("Monthly permission quota exceeded: {used} of 3 units already used, this entry needs {attempted}")]
    QuotaExceeded { used: u32, attempted: u32 },

    #[error("Cell is not editable: {0}")]
    NotEditable(#[from] NotEditableReason),

    #[error("No shift selected for: {}", days.join(", "))]
    ShiftNotSelected { days: Vec<String> },

    #[error("Weekly total {actual} is below the required minimum {required}")]
    InsufficientHours { required: String, actual: String },

    #[error("{day}: on-premises time {on_premises} exceeds the reported total {total}")]
    OnPremisesMismatch {
        day: String,
        on_premises: String,
        total: String,
    },

    #[error("{day}: project hours reported but no on-premises time was recorded")]
    ProjectWithoutPresence { day: String },

    #[error("Enter at least some data before saving")]
    EmptyDraft,

    #[error("Timesheet was modified by another session; reload and retry")]
    EditConflict,
}

impl EngineError {
    /// Stable machine-readable code for API payloads; `Display` stays the
    /// human-facing message.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::BoundExceeded { .. } => "BoundExceeded",
            EngineError::PermissionTooLong { .. } => "PermissionTooLong",
            EngineError::QuotaExceeded { .. } => "QuotaExceeded",
            EngineError::NotEditable(_) => "NotEditable",
            EngineError::ShiftNotSelected { .. } => "ShiftNotSelected",
            EngineError::InsufficientHours { .. } => "InsufficientHours",
            EngineError::OnPremisesMismatch { .. } => "OnPremisesMismatch",
            EngineError::ProjectWithoutPresence { .. } => "ProjectWithoutPresence",
            EngineError::EmptyDraft => "EmptyDraft",
            EngineError::EditConflict => "EditConflict",
        }
    }
}

/// Why an edit was silently reverted before any value parsing happened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotEditableReason {
    #[error("row does not exist")]
    NoSuchRow,
    #[error("day index out of range")]
    NoSuchDay,
    #[error("row is system-managed")]
    RowLocked,
    #[error("day is consumed by an approved leave")]
    DayLocked,
    #[error("no shift selected for this day")]
    ShiftMissing,
    #[error("choose a task first")]
    TaskMissing,
    #[error("choose a project first")]
    ProjectMissing,
    #[error("day is fully covered by a leave or holiday entry")]
    DayCovered,
    #[error("another row already holds a permission entry for this day")]
    PermissionTaken,
    #[error("timesheet is no longer a draft")]
    NotDraft,
}
