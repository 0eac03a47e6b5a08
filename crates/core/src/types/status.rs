//! Status enums for costing documents.

use serde::{Deserialize, Serialize};

/// Approval status of a cost sheet.
///
/// Drives which workflow actions are offered and whether the line-item
/// tables may still be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Being edited, not yet submitted.
    #[default]
    Draft,
    /// Submitted and waiting for an approver.
    Pending,
    /// Approved; line items are frozen.
    Approved,
    /// Rejected by an approver.
    Rejected,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid approval status: {s}")),
        }
    }
}

/// Document submission flag, independent of [`ApprovalStatus`].
///
/// Serialized as the host framework's integer codes (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum DocStatus {
    /// Mutable draft (0).
    #[default]
    Draft,
    /// Submitted (1).
    Submitted,
    /// Cancelled (2).
    Cancelled,
}

impl DocStatus {
    /// Whether the document may still be mutated.
    #[must_use]
    pub const fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl TryFrom<u8> for DocStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Draft),
            1 => Ok(Self::Submitted),
            2 => Ok(Self::Cancelled),
            _ => Err(format!("invalid docstatus: {code}")),
        }
    }
}

impl From<DocStatus> for u8 {
    fn from(status: DocStatus) -> Self {
        match status {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }
}
