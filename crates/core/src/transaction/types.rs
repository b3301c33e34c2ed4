//! Transaction domain types.

use campfin_shared::types::{Money, TransactionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a form code does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Direction of money flow relative to the committee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received.
    Contribution,
    /// Money paid out.
    Disbursement,
}

impl TransactionKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contribution => "contribution",
            Self::Disbursement => "disbursement",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of the contributing or receiving party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A natural person.
    Individual,
    /// Sole proprietorship.
    SoleProprietorship,
    /// Partnership (divisible ownership).
    Partnership,
    /// Corporation.
    Corporation,
    /// Labor union.
    Union,
    /// Association.
    Association,
    /// Limited liability company (divisible ownership).
    Llc,
    /// Political action committee.
    PoliticalActionCommittee,
    /// Political committee.
    PoliticalCommittee,
    /// Any other organization.
    Other,
}

impl EntityType {
    /// Every entity type, in form order.
    pub const ALL: [Self; 10] = [
        Self::Individual,
        Self::SoleProprietorship,
        Self::Partnership,
        Self::Corporation,
        Self::Union,
        Self::Association,
        Self::Llc,
        Self::PoliticalActionCommittee,
        Self::PoliticalCommittee,
        Self::Other,
    ];

    /// Parse a form code (`Ind`, `Solep`, `Part`, ...), case-insensitive.
    pub fn parse(s: &str) -> Result<Self, ParseEnumError> {
        match s.trim().to_lowercase().as_str() {
            "ind" | "individual" => Ok(Self::Individual),
            "solep" => Ok(Self::SoleProprietorship),
            "part" => Ok(Self::Partnership),
            "corp" => Ok(Self::Corporation),
            "union" => Ok(Self::Union),
            "assoc" => Ok(Self::Association),
            "llc" => Ok(Self::Llc),
            "pac" => Ok(Self::PoliticalActionCommittee),
            "plc" => Ok(Self::PoliticalCommittee),
            "oth" | "other" => Ok(Self::Other),
            _ => Err(ParseEnumError::new("entity type", s)),
        }
    }

    /// Returns the form code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Individual => "Ind",
            Self::SoleProprietorship => "Solep",
            Self::Partnership => "Part",
            Self::Corporation => "Corp",
            Self::Union => "Union",
            Self::Association => "Assoc",
            Self::Llc => "Llc",
            Self::PoliticalActionCommittee => "Pac",
            Self::PoliticalCommittee => "Plc",
            Self::Other => "Oth",
        }
    }

    /// Returns true for every non-individual entity.
    #[must_use]
    pub fn is_organization(&self) -> bool {
        !matches!(self, Self::Individual)
    }

    /// Returns true when fractional owners must be apportioned to 100%.
    #[must_use]
    pub fn has_divisible_ownership(&self) -> bool {
        matches!(self, Self::Partnership | Self::Llc)
    }
}

/// Settlement mechanism for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash.
    Cash,
    /// Paper check.
    Check,
    /// Credit card.
    Credit,
    /// ACH transfer.
    Ach,
    /// Wire transfer.
    Wire,
    /// Debit card.
    Debit,
    /// Transfer between committees or accounts.
    Transfer,
    /// Goods or services instead of money.
    InKind,
}

impl PaymentMethod {
    /// Every payment method, in form order.
    pub const ALL: [Self; 8] = [
        Self::Cash,
        Self::Check,
        Self::Credit,
        Self::Ach,
        Self::Wire,
        Self::Debit,
        Self::Transfer,
        Self::InKind,
    ];

    /// Parse a form label, case-insensitive.
    pub fn parse(s: &str) -> Result<Self, ParseEnumError> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "check" => Ok(Self::Check),
            "credit" => Ok(Self::Credit),
            "ach" => Ok(Self::Ach),
            "wire" => Ok(Self::Wire),
            "debit" => Ok(Self::Debit),
            "transfer" => Ok(Self::Transfer),
            "in-kind" | "inkind" | "in_kind" => Ok(Self::InKind),
            _ => Err(ParseEnumError::new("payment method", s)),
        }
    }
}

/// Regulatory expense category attached to disbursements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PurposeCode {
    /// Bank fees.
    Bkfee,
    /// Bookkeeping.
    Bkkp,
    /// Credit card payment.
    Ccp,
    /// Campaign mailings.
    Cmail,
    /// Political contributions.
    Cntrb,
    /// Campaign consultant.
    Consl,
    /// Constituent services.
    Consv,
    /// Fundraising.
    Fundr,
    /// Interest expense.
    Int,
    /// Campaign literature.
    Liter,
    /// Lawn signs.
    Lwnsn,
    /// Office expenses.
    Office,
    /// Other.
    Other,
    /// Payroll.
    Payrl,
    /// Petition expenses.
    Petit,
    /// Polling costs.
    Polls,
    /// Postage.
    Posta,
    /// Campaign printing.
    Print,
    /// Professional services.
    Profl,
    /// Radio advertising.
    Radio,
    /// Reimbursement.
    Reimb,
    /// Office rent.
    Rento,
    /// Television advertising.
    Tvads,
    /// Utilities.
    Utils,
    /// Voter registration.
    Voter,
    /// Campaign worker wages.
    Wages,
}

impl PurposeCode {
    /// Placeholder option shown before a purpose is chosen.
    pub const PLACEHOLDER: &'static str = "-- Purpose --";

    /// Parse a form value. Placeholder and unknown codes yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim().to_uppercase();
        let parsed = match code.as_str() {
            "BKFEE" => Self::Bkfee,
            "BKKP" => Self::Bkkp,
            "CCP" => Self::Ccp,
            "CMAIL" => Self::Cmail,
            "CNTRB" => Self::Cntrb,
            "CONSL" => Self::Consl,
            "CONSV" => Self::Consv,
            "FUNDR" => Self::Fundr,
            "INT" => Self::Int,
            "LITER" => Self::Liter,
            "LWNSN" => Self::Lwnsn,
            "OFFICE" => Self::Office,
            "OTHER" => Self::Other,
            "PAYRL" => Self::Payrl,
            "PETIT" => Self::Petit,
            "POLLS" => Self::Polls,
            "POSTA" => Self::Posta,
            "PRINT" => Self::Print,
            "PROFL" => Self::Profl,
            "RADIO" => Self::Radio,
            "REIMB" => Self::Reimb,
            "RENTO" => Self::Rento,
            "TVADS" => Self::Tvads,
            "UTILS" => Self::Utils,
            "VOTER" => Self::Voter,
            "WAGES" => Self::Wages,
            _ => return None,
        };
        Some(parsed)
    }
}

/// Postal address fields shared by parties and owners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street address.
    pub address_line1: Option<String>,
    /// Apartment, suite, etc.
    pub address_line2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State as selected in the form (may be the `-- State --` placeholder).
    pub state: Option<String>,
    /// ZIP code.
    pub postal_code: Option<String>,
}

/// The payer of a contribution or the recipient of a disbursement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyInfo {
    /// Given name (individuals).
    pub first_name: Option<String>,
    /// Family name (individuals).
    pub last_name: Option<String>,
    /// Entity name (organizations, disbursement recipients).
    pub organization_name: Option<String>,
    /// Postal address.
    #[serde(flatten)]
    pub address: Address,
    /// Contact email (contributions only).
    pub email: Option<String>,
    /// Contact phone (contributions only).
    pub phone_number: Option<String>,
}

/// Fields that only apply to some payment methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Check number (checks).
    pub check_number: Option<String>,
    /// Kind of in-kind contribution, e.g. "Service/Facilities Provided".
    pub in_kind_type: Option<String>,
    /// Free-text description of goods or services given.
    pub in_kind_description: Option<String>,
}

/// A contribution or disbursement as submitted by the form layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Record identifier.
    pub id: TransactionId,
    /// Contribution or disbursement.
    pub kind: TransactionKind,
    /// Payer or recipient classification.
    pub entity_type: EntityType,
    /// Settlement mechanism.
    pub payment_method: PaymentMethod,
    /// Amount in dollars (never negative).
    pub amount: Money,
    /// Payment date.
    pub date: NaiveDate,
    /// Payer or recipient.
    pub party: PartyInfo,
    /// Raw purpose code selection (disbursements only).
    pub purpose_code: Option<String>,
    /// Method-specific fields.
    #[serde(default)]
    pub payment: PaymentDetails,
    /// Set once matched against the bank; the record is immutable afterwards.
    #[serde(default)]
    pub verified: bool,
}

impl TransactionRecord {
    /// Creates an unverified record with empty party and payment details.
    #[must_use]
    pub fn new(
        kind: TransactionKind,
        entity_type: EntityType,
        payment_method: PaymentMethod,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            entity_type,
            payment_method,
            amount,
            date,
            party: PartyInfo::default(),
            purpose_code: None,
            payment: PaymentDetails::default(),
            verified: false,
        }
    }

    /// Parsed purpose code, if one was selected.
    #[must_use]
    pub fn purpose(&self) -> Option<PurposeCode> {
        self.purpose_code.as_deref().and_then(PurposeCode::parse)
    }

    /// Returns true when submission requires a balanced ownership ledger.
    #[must_use]
    pub fn requires_ownership(&self) -> bool {
        self.kind == TransactionKind::Contribution && self.entity_type.has_divisible_ownership()
    }
}
