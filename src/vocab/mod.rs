//! Canonical vocabulary: the closed enumerations every normalized entity
//! field must belong to, independent of any one CRA's raw wording.

pub mod tables;

use serde::{Deserialize, Serialize};

/// Source systems whose data can appear in one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    Equifax,
    Experian,
    Transunion,
    /// Pseudo-source for subject-level data not attributed to any single CRA
    Composite,
    /// Raw source tag the mapper could not canonicalize
    Unknown,
}

impl SourceSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSystem::Equifax => "equifax",
            SourceSystem::Experian => "experian",
            SourceSystem::Transunion => "transunion",
            SourceSystem::Composite => "composite",
            SourceSystem::Unknown => "unknown",
        }
    }

    /// The three real CRAs, in the fixed order used for fallback table scans.
    pub fn agencies() -> [SourceSystem; 3] {
        [
            SourceSystem::Equifax,
            SourceSystem::Experian,
            SourceSystem::Transunion,
        ]
    }
}

impl std::fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    CreditCard,
    Loan,
    Mortgage,
    CurrentAccount,
    Overdraft,
    Utility,
    Telecoms,
    MailOrder,
    HirePurchase,
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::CreditCard => "credit_card",
            AccountType::Loan => "loan",
            AccountType::Mortgage => "mortgage",
            AccountType::CurrentAccount => "current_account",
            AccountType::Overdraft => "overdraft",
            AccountType::Utility => "utility",
            AccountType::Telecoms => "telecoms",
            AccountType::MailOrder => "mail_order",
            AccountType::HirePurchase => "hire_purchase",
            AccountType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Open,
    Closed,
    Settled,
    Defaulted,
    Dormant,
    Unknown,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Open => "open",
            AccountStatus::Closed => "closed",
            AccountStatus::Settled => "settled",
            AccountStatus::Defaulted => "defaulted",
            AccountStatus::Dormant => "dormant",
            AccountStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    UpToDate,
    InArrears,
    ArrangementToPay,
    Defaulted,
    WrittenOff,
    Repossession,
    NoData,
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::UpToDate => "up_to_date",
            PaymentStatus::InArrears => "in_arrears",
            PaymentStatus::ArrangementToPay => "arrangement_to_pay",
            PaymentStatus::Defaulted => "defaulted",
            PaymentStatus::WrittenOff => "written_off",
            PaymentStatus::Repossession => "repossession",
            PaymentStatus::NoData => "no_data",
            PaymentStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    CreditApplication,
    IdentityCheck,
    AccountReview,
    DebtCollection,
    Quotation,
    Other,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::CreditApplication => "credit_application",
            SearchType::IdentityCheck => "identity_check",
            SearchType::AccountReview => "account_review",
            SearchType::DebtCollection => "debt_collection",
            SearchType::Quotation => "quotation",
            SearchType::Other => "other",
        }
    }

    /// Default visibility for a search of this type when the raw data
    /// carries no explicit hard/soft marker.
    pub fn default_visibility(&self) -> SearchVisibility {
        match self {
            SearchType::CreditApplication | SearchType::DebtCollection => SearchVisibility::Hard,
            SearchType::IdentityCheck
            | SearchType::AccountReview
            | SearchType::Quotation
            | SearchType::Other => SearchVisibility::Soft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchVisibility {
    Hard,
    Soft,
}

impl SearchVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchVisibility::Hard => "hard",
            SearchVisibility::Soft => "soft",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressRole {
    Current,
    Previous,
    Linked,
    Correspondence,
}

impl AddressRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressRole::Current => "current",
            AddressRole::Previous => "previous",
            AddressRole::Linked => "linked",
            AddressRole::Correspondence => "correspondence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectoralChangeType {
    Added,
    Removed,
    Confirmed,
    Other,
}

impl ElectoralChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectoralChangeType::Added => "added",
            ElectoralChangeType::Removed => "removed",
            ElectoralChangeType::Confirmed => "confirmed",
            ElectoralChangeType::Other => "other",
        }
    }
}
