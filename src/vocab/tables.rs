//! Per-source mapping tables translating raw CRA vocabulary into canonical
//! values. Keys are stored pre-normalized (trimmed, lowercase); lookups scan
//! the owning source's table first, then the remaining tables in the fixed
//! order they appear here.

use once_cell::sync::Lazy;

use super::{
    AccountStatus, AccountType, AddressRole, ElectoralChangeType, PaymentStatus, SearchType,
    SearchVisibility, SourceSystem,
};

pub type Table<T> = &'static [(&'static str, T)];
pub type SourceTables<T> = Vec<(SourceSystem, Table<T>)>;

/// Raw source-system tags, as each rendering writes them. Broker-site
/// aliases and the pre-rebrand Callcredit name map onto TransUnion.
pub static SOURCE_SYSTEM_TABLE: Lazy<Vec<(&'static str, SourceSystem)>> = Lazy::new(|| {
    vec![
        ("equifax", SourceSystem::Equifax),
        ("eqf", SourceSystem::Equifax),
        ("equifax ltd", SourceSystem::Equifax),
        ("experian", SourceSystem::Experian),
        ("exp", SourceSystem::Experian),
        ("experian ltd", SourceSystem::Experian),
        ("transunion", SourceSystem::Transunion),
        ("trans union", SourceSystem::Transunion),
        ("tu", SourceSystem::Transunion),
        ("callcredit", SourceSystem::Transunion),
        ("call credit", SourceSystem::Transunion),
        ("composite", SourceSystem::Composite),
        ("subject", SourceSystem::Composite),
    ]
});

pub static ACCOUNT_TYPE_TABLES: Lazy<SourceTables<AccountType>> = Lazy::new(|| {
    vec![
        (
            SourceSystem::Equifax,
            &[
                ("credit card", AccountType::CreditCard),
                ("budget card", AccountType::CreditCard),
                ("charge card", AccountType::CreditCard),
                ("bank loan", AccountType::Loan),
                ("unsecured loan", AccountType::Loan),
                ("payday loan", AccountType::Loan),
                ("mortgage", AccountType::Mortgage),
                ("current account", AccountType::CurrentAccount),
                ("overdraft", AccountType::Overdraft),
                ("utility", AccountType::Utility),
                ("communications", AccountType::Telecoms),
                ("mail order", AccountType::MailOrder),
                ("hire purchase", AccountType::HirePurchase),
            ],
        ),
        (
            SourceSystem::Experian,
            &[
                ("credit card / store card", AccountType::CreditCard),
                ("credit/store card", AccountType::CreditCard),
                ("store card", AccountType::CreditCard),
                ("loan", AccountType::Loan),
                ("secured loan", AccountType::Loan),
                ("mortgage account", AccountType::Mortgage),
                ("bank account", AccountType::CurrentAccount),
                ("basic bank account", AccountType::CurrentAccount),
                ("overdraft facility", AccountType::Overdraft),
                ("gas supply", AccountType::Utility),
                ("electricity supply", AccountType::Utility),
                ("water supply", AccountType::Utility),
                ("telecommunications supplier", AccountType::Telecoms),
                ("mobile phone", AccountType::Telecoms),
                ("home shopping", AccountType::MailOrder),
                ("hire purchase/conditional sale", AccountType::HirePurchase),
            ],
        ),
        (
            SourceSystem::Transunion,
            &[
                ("credit card", AccountType::CreditCard),
                ("revolving credit", AccountType::CreditCard),
                ("personal loan", AccountType::Loan),
                ("fixed term loan", AccountType::Loan),
                ("mortgage", AccountType::Mortgage),
                ("current account", AccountType::CurrentAccount),
                ("utilities", AccountType::Utility),
                ("telco", AccountType::Telecoms),
                ("mail order account", AccountType::MailOrder),
                ("motor finance", AccountType::HirePurchase),
                ("rental agreement", AccountType::Other),
            ],
        ),
    ]
});

pub static ACCOUNT_STATUS_TABLES: Lazy<SourceTables<AccountStatus>> = Lazy::new(|| {
    vec![
        (
            SourceSystem::Equifax,
            &[
                ("open", AccountStatus::Open),
                ("active", AccountStatus::Open),
                ("closed", AccountStatus::Closed),
                ("settled", AccountStatus::Settled),
                ("satisfied", AccountStatus::Settled),
                ("default", AccountStatus::Defaulted),
                ("dormant", AccountStatus::Dormant),
            ],
        ),
        (
            SourceSystem::Experian,
            &[
                ("open", AccountStatus::Open),
                ("up to date", AccountStatus::Open),
                ("closed", AccountStatus::Closed),
                ("account closed", AccountStatus::Closed),
                ("settled", AccountStatus::Settled),
                ("defaulted", AccountStatus::Defaulted),
                ("inactive", AccountStatus::Dormant),
            ],
        ),
        (
            SourceSystem::Transunion,
            &[
                ("open", AccountStatus::Open),
                ("live", AccountStatus::Open),
                ("closed", AccountStatus::Closed),
                ("settled", AccountStatus::Settled),
                ("default", AccountStatus::Defaulted),
                ("dormant", AccountStatus::Dormant),
            ],
        ),
    ]
});

/// Single-character/numeric payment codes, per CRA wire vocabulary.
pub static PAYMENT_CODE_TABLES: Lazy<SourceTables<PaymentStatus>> = Lazy::new(|| {
    vec![
        (
            SourceSystem::Equifax,
            &[
                ("0", PaymentStatus::UpToDate),
                ("1", PaymentStatus::InArrears),
                ("2", PaymentStatus::InArrears),
                ("3", PaymentStatus::InArrears),
                ("4", PaymentStatus::InArrears),
                ("5", PaymentStatus::InArrears),
                ("6", PaymentStatus::InArrears),
                ("d", PaymentStatus::Defaulted),
                ("i", PaymentStatus::ArrangementToPay),
                ("r", PaymentStatus::Repossession),
                ("u", PaymentStatus::NoData),
            ],
        ),
        (
            SourceSystem::Experian,
            &[
                ("ok", PaymentStatus::UpToDate),
                ("0", PaymentStatus::UpToDate),
                ("1", PaymentStatus::InArrears),
                ("2", PaymentStatus::InArrears),
                ("3", PaymentStatus::InArrears),
                ("4", PaymentStatus::InArrears),
                ("5", PaymentStatus::InArrears),
                ("6", PaymentStatus::InArrears),
                ("d", PaymentStatus::Defaulted),
                ("ap", PaymentStatus::ArrangementToPay),
                ("w", PaymentStatus::WrittenOff),
                ("re", PaymentStatus::Repossession),
                ("u", PaymentStatus::NoData),
            ],
        ),
        (
            SourceSystem::Transunion,
            &[
                ("ok", PaymentStatus::UpToDate),
                ("0", PaymentStatus::UpToDate),
                ("1", PaymentStatus::InArrears),
                ("2", PaymentStatus::InArrears),
                ("3", PaymentStatus::InArrears),
                ("4", PaymentStatus::InArrears),
                ("5", PaymentStatus::InArrears),
                ("6", PaymentStatus::InArrears),
                ("d", PaymentStatus::Defaulted),
                ("ap", PaymentStatus::ArrangementToPay),
                ("se", PaymentStatus::UpToDate),
                ("n", PaymentStatus::NoData),
            ],
        ),
    ]
});

/// Descriptive payment-status phrases used by the broker-site aggregator's
/// rendering, keyed by exact (normalized) phrase rather than code.
pub static PAYMENT_PHRASE_TABLE: Lazy<Vec<(&'static str, PaymentStatus)>> = Lazy::new(|| {
    vec![
        ("clean payment", PaymentStatus::UpToDate),
        ("up to date", PaymentStatus::UpToDate),
        ("paid on time", PaymentStatus::UpToDate),
        ("late payment", PaymentStatus::InArrears),
        ("missed payment", PaymentStatus::InArrears),
        ("1 month late", PaymentStatus::InArrears),
        ("2 months late", PaymentStatus::InArrears),
        ("3+ months late", PaymentStatus::InArrears),
        ("in arrears", PaymentStatus::InArrears),
        ("arrangement to pay", PaymentStatus::ArrangementToPay),
        ("reduced payment arrangement", PaymentStatus::ArrangementToPay),
        ("default", PaymentStatus::Defaulted),
        ("defaulted", PaymentStatus::Defaulted),
        ("written off", PaymentStatus::WrittenOff),
        ("repossession", PaymentStatus::Repossession),
        ("no data", PaymentStatus::NoData),
        ("not reported", PaymentStatus::NoData),
        ("no update received", PaymentStatus::NoData),
    ]
});

pub static SEARCH_TYPE_TABLES: Lazy<SourceTables<SearchType>> = Lazy::new(|| {
    vec![
        (
            SourceSystem::Equifax,
            &[
                ("credit application", SearchType::CreditApplication),
                ("application", SearchType::CreditApplication),
                ("identity check", SearchType::IdentityCheck),
                ("id verification", SearchType::IdentityCheck),
                ("account review", SearchType::AccountReview),
                ("debt collection", SearchType::DebtCollection),
                ("quotation", SearchType::Quotation),
            ],
        ),
        (
            SourceSystem::Experian,
            &[
                ("credit application search", SearchType::CreditApplication),
                ("application search", SearchType::CreditApplication),
                ("identification check", SearchType::IdentityCheck),
                ("anti money laundering", SearchType::IdentityCheck),
                ("account management", SearchType::AccountReview),
                ("debt collector search", SearchType::DebtCollection),
                ("quotation search", SearchType::Quotation),
            ],
        ),
        (
            SourceSystem::Transunion,
            &[
                ("credit application", SearchType::CreditApplication),
                ("identity verification", SearchType::IdentityCheck),
                ("account review", SearchType::AccountReview),
                ("tracing", SearchType::DebtCollection),
                ("debt collection", SearchType::DebtCollection),
                ("soft quote", SearchType::Quotation),
                ("quotation", SearchType::Quotation),
            ],
        ),
    ]
});

pub static SEARCH_VISIBILITY_TABLE: Lazy<Vec<(&'static str, SearchVisibility)>> =
    Lazy::new(|| {
        vec![
            ("hard", SearchVisibility::Hard),
            ("hard search", SearchVisibility::Hard),
            ("recorded", SearchVisibility::Hard),
            ("soft", SearchVisibility::Soft),
            ("soft search", SearchVisibility::Soft),
            ("unrecorded", SearchVisibility::Soft),
        ]
    });

pub static ADDRESS_ROLE_TABLES: Lazy<SourceTables<AddressRole>> = Lazy::new(|| {
    vec![
        (
            SourceSystem::Equifax,
            &[
                ("current", AddressRole::Current),
                ("current address", AddressRole::Current),
                ("previous", AddressRole::Previous),
                ("previous address", AddressRole::Previous),
                ("linked", AddressRole::Linked),
                ("linked address", AddressRole::Linked),
            ],
        ),
        (
            SourceSystem::Experian,
            &[
                ("current address", AddressRole::Current),
                ("present address", AddressRole::Current),
                ("former address", AddressRole::Previous),
                ("previous address", AddressRole::Previous),
                ("associated address", AddressRole::Linked),
                ("correspondence address", AddressRole::Correspondence),
            ],
        ),
        (
            SourceSystem::Transunion,
            &[
                ("current", AddressRole::Current),
                ("previous", AddressRole::Previous),
                ("linked", AddressRole::Linked),
                ("mailing", AddressRole::Correspondence),
            ],
        ),
    ]
});

pub static ELECTORAL_CHANGE_TABLES: Lazy<SourceTables<ElectoralChangeType>> = Lazy::new(|| {
    vec![
        (
            SourceSystem::Equifax,
            &[
                ("added", ElectoralChangeType::Added),
                ("registered", ElectoralChangeType::Added),
                ("removed", ElectoralChangeType::Removed),
                ("deregistered", ElectoralChangeType::Removed),
                ("confirmed", ElectoralChangeType::Confirmed),
            ],
        ),
        (
            SourceSystem::Experian,
            &[
                ("added to roll", ElectoralChangeType::Added),
                ("registered", ElectoralChangeType::Added),
                ("removed from roll", ElectoralChangeType::Removed),
                ("no change", ElectoralChangeType::Confirmed),
            ],
        ),
        (
            SourceSystem::Transunion,
            &[
                ("added", ElectoralChangeType::Added),
                ("removed", ElectoralChangeType::Removed),
                ("still registered", ElectoralChangeType::Confirmed),
            ],
        ),
    ]
});
