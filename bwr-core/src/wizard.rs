//! The three-step complaint wizard.
//!
//! `Identity -> Details -> Confirmation`, strictly forward. The only way
//! back is `restart` from the confirmation step, which also clears the draft.

use crate::complaint::{
    ComplaintCategory, ComplaintDraft, ComplaintSubmission, IdentityField, ReservoirChoice,
};
use log::info;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Identity,
    Details,
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Identity,
        WizardStep::Details,
        WizardStep::Confirmation,
    ];

    /// 1-based step number
    pub fn number(&self) -> usize {
        match self {
            WizardStep::Identity => 1,
            WizardStep::Details => 2,
            WizardStep::Confirmation => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Identity => "Информация за теб",
            WizardStep::Details => "Данни за сигнала",
            WizardStep::Confirmation => "Сигналът е подаден!",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.number())
    }
}

/// Why a wizard action was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Required field is empty: {0}")]
    MissingIdentityField(IdentityField),

    #[error("A description is required for the \"other\" category")]
    MissingComplaintText,

    #[error("Cannot {action} on step {step}")]
    WrongStep {
        step: WizardStep,
        action: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picker {
    Reservoir,
    Category,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplaintWizard {
    step: WizardStep,
    draft: ComplaintDraft,
    open_picker: Option<Picker>,
}

impl ComplaintWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ComplaintDraft {
        &self.draft
    }

    pub fn open_picker(&self) -> Option<Picker> {
        self.open_picker
    }

    /// Width of the progress bar: 0, 50 or 100.
    pub fn progress_percent(&self) -> u8 {
        ((self.step.number() - 1) * 50) as u8
    }

    fn require(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                step: self.step,
                action,
            })
        }
    }

    pub fn set_identity(&mut self, field: IdentityField, value: String) {
        self.draft.set_identity(field, value);
    }

    pub fn set_complaint_text(&mut self, value: String) {
        self.draft.complaint_text = value;
    }

    /// The free-text field is shown and required only for `Other`.
    pub fn requires_complaint_text(&self) -> bool {
        self.draft
            .category
            .map(|c| c.requires_text())
            .unwrap_or(false)
    }

    /// Move from Identity to Details once every identity field is filled in.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::Identity => {
                if let Some(field) = self.draft.missing_identity() {
                    return Err(WizardError::MissingIdentityField(field));
                }
                self.step = WizardStep::Details;
                Ok(self.step)
            }
            step => Err(WizardError::WrongStep {
                step,
                action: "advance",
            }),
        }
    }

    pub fn toggle_picker(&mut self, picker: Picker) -> Result<(), WizardError> {
        self.require(WizardStep::Details, "open a picker")?;
        self.open_picker = if self.open_picker == Some(picker) {
            None
        } else {
            Some(picker)
        };
        Ok(())
    }

    pub fn close_picker(&mut self) {
        self.open_picker = None;
    }

    pub fn select_reservoir(&mut self, id: &str, name: &str) -> Result<(), WizardError> {
        self.require(WizardStep::Details, "select a reservoir")?;
        self.draft.reservoir = Some(ReservoirChoice {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.open_picker = None;
        Ok(())
    }

    pub fn select_category(&mut self, category: ComplaintCategory) -> Result<(), WizardError> {
        self.require(WizardStep::Details, "select a category")?;
        if !category.requires_text() {
            self.draft.complaint_text.clear();
        }
        self.draft.category = Some(category);
        self.open_picker = None;
        Ok(())
    }

    /// Finalize the draft. The caller sends the returned payload; the wizard
    /// moves on without waiting for the response.
    pub fn submit(&mut self) -> Result<ComplaintSubmission, WizardError> {
        self.require(WizardStep::Details, "submit")?;
        if self.requires_complaint_text() && self.draft.complaint_text.trim().is_empty() {
            return Err(WizardError::MissingComplaintText);
        }
        let submission = self.draft.to_submission();
        info!(
            "Complaint submitted for reservoir {:?}",
            submission.dam_id.as_deref().unwrap_or("-")
        );
        self.draft = ComplaintDraft::default();
        self.open_picker = None;
        self.step = WizardStep::Confirmation;
        Ok(submission)
    }

    /// "Пропусни": start over with an empty draft.
    pub fn restart(&mut self) -> Result<(), WizardError> {
        self.require(WizardStep::Confirmation, "restart")?;
        *self = Self::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_identity(wizard: &mut ComplaintWizard, mask: u8) {
        for (bit, field) in IdentityField::ALL.into_iter().enumerate() {
            let value = if mask & (1 << bit) != 0 { "x" } else { "" };
            wizard.set_identity(field, value.to_string());
        }
    }

    fn wizard_on_details() -> ComplaintWizard {
        let mut wizard = ComplaintWizard::new();
        fill_identity(&mut wizard, 0b1111);
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn test_advance_blocked_while_any_identity_field_empty() {
        for mask in 0u8..16 {
            let mut wizard = ComplaintWizard::new();
            fill_identity(&mut wizard, mask);
            let result = wizard.advance();
            if mask == 0b1111 {
                assert_eq!(result, Ok(WizardStep::Details));
            } else {
                assert!(
                    matches!(result, Err(WizardError::MissingIdentityField(_))),
                    "mask {:04b} should block",
                    mask
                );
                assert_eq!(wizard.step(), WizardStep::Identity);
            }
        }
    }

    #[test]
    fn test_whitespace_is_empty() {
        let mut wizard = ComplaintWizard::new();
        fill_identity(&mut wizard, 0b1111);
        wizard.set_identity(IdentityField::Email, "   ".to_string());
        assert_eq!(
            wizard.advance(),
            Err(WizardError::MissingIdentityField(IdentityField::Email))
        );
    }

    #[test]
    fn test_other_requires_text() {
        let mut wizard = wizard_on_details();
        wizard.select_category(ComplaintCategory::Other).unwrap();
        assert!(wizard.requires_complaint_text());
        assert_eq!(wizard.submit(), Err(WizardError::MissingComplaintText));
        assert_eq!(wizard.step(), WizardStep::Details);

        wizard.set_complaint_text("Тръбата е спукана".to_string());
        let submission = wizard.submit().unwrap();
        assert!(submission
            .description
            .ends_with("Друг проблем. Допълнителна информация: Тръбата е спукана"));
        assert_eq!(submission.complaint_text.as_deref(), Some("Тръбата е спукана"));
        assert_eq!(wizard.step(), WizardStep::Confirmation);
    }

    #[test]
    fn test_non_other_category_clears_text() {
        let mut wizard = wizard_on_details();
        wizard.select_category(ComplaintCategory::Other).unwrap();
        wizard.set_complaint_text("нещо".to_string());
        wizard
            .select_category(ComplaintCategory::IllegalFishing)
            .unwrap();
        assert!(wizard.draft().complaint_text.is_empty());
        assert!(!wizard.requires_complaint_text());
    }

    #[test]
    fn test_selection_closes_picker() {
        let mut wizard = wizard_on_details();
        wizard.toggle_picker(Picker::Reservoir).unwrap();
        assert_eq!(wizard.open_picker(), Some(Picker::Reservoir));
        wizard.select_reservoir("res-x", "Reservoir X").unwrap();
        assert_eq!(wizard.open_picker(), None);

        wizard.toggle_picker(Picker::Category).unwrap();
        wizard
            .select_category(ComplaintCategory::WaterPollution)
            .unwrap();
        assert_eq!(wizard.open_picker(), None);
    }

    #[test]
    fn test_submit_clears_draft_and_restart_returns_to_identity() {
        let mut wizard = wizard_on_details();
        wizard.select_reservoir("res-x", "Reservoir X").unwrap();
        wizard
            .select_category(ComplaintCategory::WaterPollution)
            .unwrap();
        let submission = wizard.submit().unwrap();
        assert_eq!(
            submission.description,
            "Подавам сигнал за язовир Reservoir X за проблем Забелязах, че водата ми е замърсена."
        );
        assert_eq!(wizard.draft(), &ComplaintDraft::default());
        assert_eq!(wizard.progress_percent(), 100);

        assert!(wizard.advance().is_err());
        wizard.restart().unwrap();
        assert_eq!(wizard.step(), WizardStep::Identity);
        assert_eq!(wizard.progress_percent(), 0);
    }

    #[test]
    fn test_details_actions_rejected_on_other_steps() {
        let mut wizard = ComplaintWizard::new();
        assert!(matches!(
            wizard.select_category(ComplaintCategory::Other),
            Err(WizardError::WrongStep { .. })
        ));
        assert!(wizard.select_reservoir("a", "b").is_err());
        assert!(wizard.submit().is_err());
        assert!(wizard.restart().is_err());
        assert!(wizard.toggle_picker(Picker::Reservoir).is_err());
        assert_eq!(wizard.open_picker(), None);
        assert_eq!(wizard.draft().reservoir, None);
    }
}
