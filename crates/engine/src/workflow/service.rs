//! The approval workflow collaborator and an in-memory implementation.

use std::collections::BTreeMap;

use chrono::Utc;
use garment_costing_core::{ApprovalStatus, BusinessKey, CostSheetId, DocStatus};
use tracing::{info, instrument};

use super::{WorkflowAction, WorkflowError};
use crate::config::EngineConfig;
use crate::cost_sheet::CostDocument;

/// State transitions a cost sheet form can request.
///
/// In production these are remote calls into the host system; the form only
/// needs to know whether they succeeded.
pub trait ApprovalWorkflow {
    /// Move a draft sheet to pending.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] if the sheet is missing or not a draft.
    fn submit_for_approval(&mut self, id: CostSheetId) -> Result<(), WorkflowError>;

    /// Approve a pending sheet.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] if the sheet is missing or not pending.
    fn approve(&mut self, id: CostSheetId, approver: &str) -> Result<(), WorkflowError>;

    /// Reject a pending sheet. An empty reason is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] if the sheet is missing or not pending.
    fn reject(&mut self, id: CostSheetId, reason: &str) -> Result<(), WorkflowError>;

    /// Copy a sheet into a new draft version and return the new ID.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] if the sheet is missing.
    fn create_new_version(
        &mut self,
        id: CostSheetId,
        remark: &str,
    ) -> Result<CostSheetId, WorkflowError>;
}

/// The set of sheets that are versions of one another.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Family {
    /// Sheets sharing a business key.
    Key(BusinessKey),
    /// Keyless sheets descending from the same root sheet.
    Lineage(CostSheetId),
}

/// Workflow collaborator holding cost sheets in memory.
///
/// Applies the same transition rules as the host system: every save
/// revalidates the sheet, versions are numbered per business key, and only
/// the newest version of a business key is flagged as latest. Sheets without
/// a business key are only versions of the sheets they were copied from or
/// into.
#[derive(Debug, Clone)]
pub struct InMemoryApprovalWorkflow {
    config: EngineConfig,
    sheets: BTreeMap<CostSheetId, CostDocument>,
    next_id: CostSheetId,
}

impl InMemoryApprovalWorkflow {
    /// An empty store.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            config,
            sheets: BTreeMap::new(),
            next_id: CostSheetId::new(1),
        }
    }

    /// Store a new sheet on behalf of `creator` and return its ID.
    ///
    /// Fills insert defaults (business key, version 1, creator) and
    /// recomputes every derived field.
    #[instrument(skip(self, sheet))]
    pub fn insert(&mut self, mut sheet: CostDocument, creator: &str) -> CostSheetId {
        let id = self.next_id;
        self.next_id = id.next();

        sheet.id = Some(id);
        sheet.prepare_for_insert(creator);
        sheet.validate(&self.config);

        info!(
            sheet_id = %id,
            business_key = ?sheet.business_key,
            version_no = ?sheet.version_no,
            "Cost sheet inserted"
        );
        self.sheets.insert(id, sheet);
        id
    }

    /// A stored sheet.
    #[must_use]
    pub fn get(&self, id: CostSheetId) -> Option<&CostDocument> {
        self.sheets.get(&id)
    }

    /// All versions of the sheet, oldest first.
    #[must_use]
    pub fn versions_of(&self, id: CostSheetId) -> Vec<&CostDocument> {
        let Some(family) = self.sheets.get(&id).and_then(|sheet| self.family(sheet)) else {
            return Vec::new();
        };
        self.sheets
            .values()
            .filter(|other| self.family(other).as_ref() == Some(&family))
            .collect()
    }

    fn family(&self, sheet: &CostDocument) -> Option<Family> {
        if let Some(key) = &sheet.business_key {
            return Some(Family::Key(key.clone()));
        }
        let mut root = sheet;
        while let Some(parent) = root.parent_version_id.and_then(|id| self.sheets.get(&id)) {
            root = parent;
        }
        root.id.map(Family::Lineage)
    }

    fn sheet_mut(&mut self, id: CostSheetId) -> Result<&mut CostDocument, WorkflowError> {
        self.sheets.get_mut(&id).ok_or(WorkflowError::NotFound(id))
    }

    /// Apply a status transition guarded by the expected current status.
    fn transition<F>(
        &mut self,
        id: CostSheetId,
        action: WorkflowAction,
        from: ApprovalStatus,
        apply: F,
    ) -> Result<(), WorkflowError>
    where
        F: FnOnce(&mut CostDocument),
    {
        let config = self.config;
        let sheet = self.sheet_mut(id)?;
        if sheet.status != from {
            return Err(WorkflowError::InvalidTransition {
                action,
                status: sheet.status,
            });
        }
        apply(sheet);
        sheet.validate(&config);
        info!(sheet_id = %id, %action, status = %sheet.status, "Cost sheet transitioned");
        Ok(())
    }
}

impl Default for InMemoryApprovalWorkflow {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ApprovalWorkflow for InMemoryApprovalWorkflow {
    #[instrument(skip(self))]
    fn submit_for_approval(&mut self, id: CostSheetId) -> Result<(), WorkflowError> {
        self.transition(
            id,
            WorkflowAction::SubmitForApproval,
            ApprovalStatus::Draft,
            |sheet| sheet.status = ApprovalStatus::Pending,
        )
    }

    #[instrument(skip(self))]
    fn approve(&mut self, id: CostSheetId, approver: &str) -> Result<(), WorkflowError> {
        self.transition(id, WorkflowAction::Approve, ApprovalStatus::Pending, |sheet| {
            sheet.status = ApprovalStatus::Approved;
            sheet.approver = Some(approver.to_owned());
            sheet.approved_at = Some(Utc::now());
        })
    }

    #[instrument(skip(self))]
    fn reject(&mut self, id: CostSheetId, reason: &str) -> Result<(), WorkflowError> {
        self.transition(id, WorkflowAction::Reject, ApprovalStatus::Pending, |sheet| {
            sheet.status = ApprovalStatus::Rejected;
            if !reason.trim().is_empty() {
                sheet.version_remark = Some(reason.to_owned());
            }
        })
    }

    #[instrument(skip(self))]
    fn create_new_version(
        &mut self,
        id: CostSheetId,
        remark: &str,
    ) -> Result<CostSheetId, WorkflowError> {
        let source = self.sheets.get(&id).ok_or(WorkflowError::NotFound(id))?;

        let max_version = self
            .versions_of(id)
            .into_iter()
            .filter_map(|other| other.version_no)
            .max()
            .unwrap_or(0);
        let source_version = source.version_no.unwrap_or(1);

        let mut copy = source.clone();
        copy.id = None;
        copy.version_no = Some(max_version + 1);
        copy.is_latest_version = true;
        copy.parent_version_id = Some(id);
        copy.version_remark = Some(if remark.trim().is_empty() {
            format!("copied from version {source_version}")
        } else {
            remark.to_owned()
        });
        copy.status = ApprovalStatus::Draft;
        copy.docstatus = DocStatus::Draft;
        copy.approver = None;
        copy.approved_at = None;

        let creator = copy.creator.clone().unwrap_or_default();
        let new_id = self.insert(copy, &creator);

        let superseded: Vec<CostSheetId> = self
            .versions_of(new_id)
            .into_iter()
            .filter_map(|other| other.id)
            .filter(|other_id| *other_id != new_id)
            .collect();
        for other_id in superseded {
            self.sheet_mut(other_id)?.is_latest_version = false;
        }
        info!(sheet_id = %id, new_sheet_id = %new_id, "Created new cost sheet version");
        Ok(new_id)
    }
}
