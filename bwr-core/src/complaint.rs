//! Complaint draft, categories and the submission payload.

use serde::Serialize;
use std::fmt;

const UNKNOWN_RESERVOIR: &str = "Неизвестен";
const UNKNOWN_CATEGORY: &str = "Неуточнен";

/// What the complaint is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplaintCategory {
    WaterLossRoute,
    FutureBad,
    WaterPollution,
    IllegalBuilding,
    IllegalFishing,
    Other,
}

impl ComplaintCategory {
    pub const ALL: [ComplaintCategory; 6] = [
        ComplaintCategory::WaterLossRoute,
        ComplaintCategory::FutureBad,
        ComplaintCategory::WaterPollution,
        ComplaintCategory::IllegalBuilding,
        ComplaintCategory::IllegalFishing,
        ComplaintCategory::Other,
    ];

    /// Stable key used in forms.
    pub fn key(&self) -> &'static str {
        match self {
            ComplaintCategory::WaterLossRoute => "water-loss-route",
            ComplaintCategory::FutureBad => "future-bad",
            ComplaintCategory::WaterPollution => "water-polution",
            ComplaintCategory::IllegalBuilding => "illegal-building",
            ComplaintCategory::IllegalFishing => "illegal-fishing",
            ComplaintCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintCategory::WaterLossRoute => {
                "Открих, че по маршрута на моята вода, има много загуби."
            }
            ComplaintCategory::FutureBad => {
                "Открих, че според изчисленията на тази платформа, в бъдеще язовирът ми ще претърпи бедствие."
            }
            ComplaintCategory::WaterPollution => "Забелязах, че водата ми е замърсена.",
            ComplaintCategory::IllegalBuilding => {
                "Забелязах незаконно строителство в района на язовира."
            }
            ComplaintCategory::IllegalFishing => "Забелязах незаконен риболов.",
            ComplaintCategory::Other => "Друг проблем.",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Only "other" needs a free-text description.
    pub fn requires_text(&self) -> bool {
        matches!(self, ComplaintCategory::Other)
    }
}

/// The four identity inputs of the first wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityField {
    Name,
    Phone,
    Email,
    Address,
}

impl IdentityField {
    pub const ALL: [IdentityField; 4] = [
        IdentityField::Name,
        IdentityField::Phone,
        IdentityField::Email,
        IdentityField::Address,
    ];

    /// Form input name.
    pub fn key(&self) -> &'static str {
        match self {
            IdentityField::Name => "name",
            IdentityField::Phone => "phone",
            IdentityField::Email => "user_email",
            IdentityField::Address => "address",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdentityField::Name => "Пълно име",
            IdentityField::Phone => "Телефонен номер",
            IdentityField::Email => "Имейл адрес",
            IdentityField::Address => "Адрес",
        }
    }

    /// HTML input type.
    pub fn input_type(&self) -> &'static str {
        match self {
            IdentityField::Phone => "tel",
            IdentityField::Email => "email",
            _ => "text",
        }
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A reservoir picked in the details step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservoirChoice {
    pub id: String,
    pub name: String,
}

/// In-progress complaint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplaintDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub reservoir: Option<ReservoirChoice>,
    pub category: Option<ComplaintCategory>,
    pub complaint_text: String,
}

impl ComplaintDraft {
    pub fn identity(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::Name => &self.name,
            IdentityField::Phone => &self.phone,
            IdentityField::Email => &self.email,
            IdentityField::Address => &self.address,
        }
    }

    pub fn set_identity(&mut self, field: IdentityField, value: String) {
        match field {
            IdentityField::Name => self.name = value,
            IdentityField::Phone => self.phone = value,
            IdentityField::Email => self.email = value,
            IdentityField::Address => self.address = value,
        }
    }

    /// First identity field that is blank, in form order.
    pub fn missing_identity(&self) -> Option<IdentityField> {
        IdentityField::ALL
            .into_iter()
            .find(|f| self.identity(*f).trim().is_empty())
    }

    fn extra_text(&self) -> Option<&str> {
        Some(self.complaint_text.trim()).filter(|t| !t.is_empty())
    }

    /// Human-readable summary sent as `description`.
    pub fn compose_description(&self) -> String {
        let reservoir = self
            .reservoir
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or(UNKNOWN_RESERVOIR);
        let problem = self
            .category
            .map(|c| c.label().trim_end_matches('.'))
            .unwrap_or(UNKNOWN_CATEGORY);
        let mut description = format!(
            "Подавам сигнал за язовир {} за проблем {}.",
            reservoir, problem
        );
        if let Some(text) = self.extra_text() {
            description.push_str(" Допълнителна информация: ");
            description.push_str(text);
        }
        description
    }

    pub fn to_submission(&self) -> ComplaintSubmission {
        ComplaintSubmission {
            name: self.name.trim().to_string(),
            user_email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            dam_id: self.reservoir.as_ref().map(|r| r.id.clone()),
            description: self.compose_description(),
            subject: self.category.map(|c| c.label().to_string()),
            complaint_text: self.extra_text().map(str::to_string),
        }
    }
}

/// Body of `POST /complaints`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplaintSubmission {
    pub name: String,
    pub user_email: String,
    pub phone: String,
    pub address: String,
    pub dam_id: Option<String>,
    pub description: String,
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complaint_text: Option<String>,
}

/// Social networks offered on the confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Facebook,
    X,
    LinkedIn,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 3] = [ShareTarget::Facebook, ShareTarget::X, ShareTarget::LinkedIn];

    pub fn name(&self) -> &'static str {
        match self {
            ShareTarget::Facebook => "Facebook",
            ShareTarget::X => "X",
            ShareTarget::LinkedIn => "LinkedIn",
        }
    }

    pub fn share_url(&self, page_url: &str) -> String {
        let encoded = percent_encode(page_url);
        match self {
            ShareTarget::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded)
            }
            ShareTarget::X => format!("https://twitter.com/intent/tweet?url={}", encoded),
            ShareTarget::LinkedIn => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                encoded
            ),
        }
    }
}

/// Percent-encode everything except RFC 3986 unreserved characters.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
