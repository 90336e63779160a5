//! Filing complaints from the command line.
//!
//! Runs the flags through [`ComplaintWizard`] so the CLI enforces the same
//! rules as the web form before anything is sent.

use bwr_core::client::ApiClient;
use bwr_core::complaint::{ComplaintCategory, ComplaintSubmission, IdentityField};
use bwr_core::reservoir::find_reservoir;
use bwr_core::wizard::ComplaintWizard;
use log::{info, warn};

/// Raw flag values for one complaint.
#[derive(Debug, Clone, Default)]
pub struct ComplaintArgs {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub dam_id: Option<String>,
    pub category: Option<String>,
    pub text: Option<String>,
}

/// Walk the wizard with `args`. `dam_name` is the display name of
/// `args.dam_id`, when it could be looked up.
pub fn build_submission(
    args: &ComplaintArgs,
    dam_name: Option<&str>,
) -> anyhow::Result<ComplaintSubmission> {
    let mut wizard = ComplaintWizard::new();
    wizard.set_identity(IdentityField::Name, args.name.clone());
    wizard.set_identity(IdentityField::Phone, args.phone.clone());
    wizard.set_identity(IdentityField::Email, args.email.clone());
    wizard.set_identity(IdentityField::Address, args.address.clone());
    wizard.advance()?;

    if let Some(id) = &args.dam_id {
        wizard.select_reservoir(id, dam_name.unwrap_or(id))?;
    }
    if let Some(key) = &args.category {
        let category = ComplaintCategory::from_key(key).ok_or_else(|| {
            let keys: Vec<&str> = ComplaintCategory::ALL.iter().map(|c| c.key()).collect();
            anyhow::anyhow!("unknown category {:?}, expected one of {}", key, keys.join(", "))
        })?;
        wizard.select_category(category)?;
    }
    if let Some(text) = &args.text {
        wizard.set_complaint_text(text.clone());
    }
    Ok(wizard.submit()?)
}

/// Validate, then `POST /complaints` unless `dry_run`.
pub async fn run_complain(
    client: &ApiClient,
    args: ComplaintArgs,
    dry_run: bool,
) -> anyhow::Result<()> {
    let dam_name = match &args.dam_id {
        Some(id) => match client.list_dams(0, client.config().page_limit).await {
            Ok(dams) => find_reservoir(&dams, id).map(|d| d.display_name().to_string()),
            Err(e) => {
                warn!("Could not look up reservoir names: {}", e);
                None
            }
        },
        None => None,
    };

    let submission = build_submission(&args, dam_name.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&submission)?);
    if dry_run {
        info!("Dry run, complaint not sent");
        return Ok(());
    }

    let response = client.submit_complaint(&submission).await?;
    info!("Complaint accepted: {}", response);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bwr_core::wizard::WizardError;

    fn args() -> ComplaintArgs {
        ComplaintArgs {
            name: "Иван Петров".to_string(),
            phone: "0888123456".to_string(),
            email: "ivan@example.bg".to_string(),
            address: "ул. Витоша 1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_submission() {
        let args = ComplaintArgs {
            dam_id: Some("d1".to_string()),
            category: Some("illegal-fishing".to_string()),
            ..args()
        };
        let submission = build_submission(&args, Some("Искър")).unwrap();
        assert_eq!(submission.dam_id.as_deref(), Some("d1"));
        assert_eq!(
            submission.description,
            "Подавам сигнал за язовир Искър за проблем Забелязах незаконен риболов."
        );
        assert_eq!(submission.complaint_text, None);
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        let args = ComplaintArgs {
            phone: "  ".to_string(),
            ..args()
        };
        let err = build_submission(&args, None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<WizardError>(),
            Some(&WizardError::MissingIdentityField(IdentityField::Phone))
        );
    }

    #[test]
    fn test_other_requires_text() {
        let args = ComplaintArgs {
            category: Some("other".to_string()),
            ..args()
        };
        let err = build_submission(&args, None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<WizardError>(),
            Some(&WizardError::MissingComplaintText)
        );

        let args = ComplaintArgs {
            text: Some("Теч от стената".to_string()),
            ..args
        };
        let submission = build_submission(&args, None).unwrap();
        assert_eq!(submission.complaint_text.as_deref(), Some("Теч от стената"));
    }

    #[test]
    fn test_unknown_category() {
        let args = ComplaintArgs {
            category: Some("noise".to_string()),
            ..args()
        };
        assert!(build_submission(&args, None).is_err());
    }
}
