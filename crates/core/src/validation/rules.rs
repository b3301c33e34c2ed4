//! Declarative field rule matrix.
//!
//! Each (kind, entity type, payment method) combination maps to an ordered
//! list of rules. Order is significant: the validator reports the first
//! failing rule only.

use std::collections::HashMap;

use crate::transaction::{EntityType, PaymentMethod, PurposeCode, TransactionKind, TransactionRecord};

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Entity or recipient name.
    OrganizationName,
    /// Street address.
    AddressLine1,
    /// City.
    City,
    /// State select.
    State,
    /// ZIP code.
    PostalCode,
    /// Disbursement purpose select.
    PurposeCode,
    /// Check number.
    CheckNumber,
    /// In-kind category.
    InKindType,
    /// In-kind description.
    InKindDescription,
}

impl Field {
    /// Form field name as used by the UI layer.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::OrganizationName => "organizationName",
            Self::AddressLine1 => "addressLine1",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postalCode",
            Self::PurposeCode => "purposeCode",
            Self::CheckNumber => "checkNumber",
            Self::InKindType => "inKindType",
            Self::InKindDescription => "inKindDescription",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything the validator can read fields from.
pub trait FieldSource {
    /// Raw value of `field`, or `None` when the source has no such input.
    fn field_value(&self, field: Field) -> Option<&str>;
}

/// What "present" means for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Non-blank text.
    Text,
    /// A select whose value is not the placeholder option.
    Select {
        /// Placeholder option text, e.g. `-- State --`.
        placeholder: &'static str,
    },
    /// A select that must hold a known purpose code.
    PurposeCode,
}

impl Presence {
    /// Returns true when `value` counts as supplied.
    #[must_use]
    pub fn is_present(&self, value: Option<&str>) -> bool {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return false;
        };
        match self {
            Self::Text => true,
            Self::Select { placeholder } => value != *placeholder,
            Self::PurposeCode => PurposeCode::parse(value).is_some(),
        }
    }
}

/// One mandatory field with its presence check and user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// The field checked.
    pub field: Field,
    /// How absence is detected.
    pub presence: Presence,
    /// Message reported when the field is absent.
    pub message: &'static str,
}

impl FieldRule {
    const fn text(field: Field, message: &'static str) -> Self {
        Self {
            field,
            presence: Presence::Text,
            message,
        }
    }

    const fn select(field: Field, placeholder: &'static str, message: &'static str) -> Self {
        Self {
            field,
            presence: Presence::Select { placeholder },
            message,
        }
    }

    /// Returns true when `source` satisfies this rule.
    #[must_use]
    pub fn is_satisfied_by<S: FieldSource + ?Sized>(&self, source: &S) -> bool {
        self.presence.is_present(source.field_value(self.field))
    }
}

/// Placeholder option of the state select.
pub const STATE_PLACEHOLDER: &str = "-- State --";

const INDIVIDUAL_NAME: &[FieldRule] = &[
    FieldRule::text(Field::FirstName, "First Name is missing."),
    FieldRule::text(Field::LastName, "Last Name is missing."),
];

const ENTITY_NAME: &[FieldRule] = &[FieldRule::text(
    Field::OrganizationName,
    "Entity name is missing.",
)];

const ADDRESS: &[FieldRule] = &[
    FieldRule::text(Field::AddressLine1, "Address 1 is missing."),
    FieldRule::text(Field::City, "City is missing."),
    FieldRule::select(Field::State, STATE_PLACEHOLDER, "State is missing."),
    FieldRule::text(Field::PostalCode, "Postal Code is missing."),
];

const PURPOSE: &[FieldRule] = &[FieldRule {
    field: Field::PurposeCode,
    presence: Presence::PurposeCode,
    message: "Purpose Code is missing.",
}];

const CHECK: &[FieldRule] = &[FieldRule::text(Field::CheckNumber, "Check Number is missing.")];

const IN_KIND: &[FieldRule] = &[
    FieldRule::text(Field::InKindType, "In-Kind type is missing."),
    FieldRule::text(Field::InKindDescription, "In-Kind description is missing."),
];

/// Rules applied to each owner of a divisible organization.
pub const OWNER_RULES: &[FieldRule] = &[
    FieldRule::text(Field::FirstName, "Owner First name is missing."),
    FieldRule::text(Field::LastName, "Owner Last name is missing."),
    FieldRule::text(Field::AddressLine1, "Owner Address 1 is missing."),
    FieldRule::text(Field::City, "Owner City is missing."),
    FieldRule::text(Field::PostalCode, "Owner Postal Code is missing."),
];

/// Composite lookup key of the rule matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleKey {
    /// Contribution or disbursement.
    pub kind: TransactionKind,
    /// Party classification.
    pub entity_type: EntityType,
    /// Settlement mechanism.
    pub payment_method: PaymentMethod,
}

impl RuleKey {
    /// Key for a record.
    #[must_use]
    pub fn of(record: &TransactionRecord) -> Self {
        Self {
            kind: record.kind,
            entity_type: record.entity_type,
            payment_method: record.payment_method,
        }
    }

    /// Ordered rules for this combination as declared by the tables above.
    fn standard_rules(self) -> Vec<FieldRule> {
        let party: &[&[FieldRule]] = match (self.kind, self.entity_type) {
            (TransactionKind::Contribution, EntityType::Individual) => &[INDIVIDUAL_NAME, ADDRESS],
            (TransactionKind::Contribution, _) => &[ENTITY_NAME, ADDRESS],
            (TransactionKind::Disbursement, _) => &[ENTITY_NAME, ADDRESS, PURPOSE],
        };
        let method: &[FieldRule] = match (self.kind, self.payment_method) {
            (_, PaymentMethod::Check) => CHECK,
            (TransactionKind::Contribution, PaymentMethod::InKind) => IN_KIND,
            _ => &[],
        };
        party
            .iter()
            .copied()
            .chain(std::iter::once(method))
            .flatten()
            .copied()
            .collect()
    }
}

/// The full rule matrix plus the owner rule list.
#[derive(Debug, Clone)]
pub struct FieldRuleSet {
    rules: HashMap<RuleKey, Vec<FieldRule>>,
}

impl FieldRuleSet {
    /// Builds the standard matrix covering every combination.
    #[must_use]
    pub fn standard() -> Self {
        let mut rules = HashMap::new();
        for kind in [TransactionKind::Contribution, TransactionKind::Disbursement] {
            for entity_type in EntityType::ALL {
                for payment_method in PaymentMethod::ALL {
                    let key = RuleKey {
                        kind,
                        entity_type,
                        payment_method,
                    };
                    rules.insert(key, key.standard_rules());
                }
            }
        }
        Self { rules }
    }

    /// Ordered rules for a combination. Unknown combinations have none.
    #[must_use]
    pub fn rules_for(
        &self,
        kind: TransactionKind,
        entity_type: EntityType,
        payment_method: PaymentMethod,
    ) -> &[FieldRule] {
        self.get(RuleKey {
            kind,
            entity_type,
            payment_method,
        })
    }

    /// Ordered rules for a key.
    #[must_use]
    pub fn get(&self, key: RuleKey) -> &[FieldRule] {
        self.rules.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the rules of one combination.
    pub fn set(&mut self, key: RuleKey, rules: Vec<FieldRule>) {
        self.rules.insert(key, rules);
    }

    /// Rules applied to each owner, see [`OWNER_RULES`].
    #[must_use]
    pub fn owner_rules(&self) -> &'static [FieldRule] {
        OWNER_RULES
    }

    /// Number of combinations in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when the matrix is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for FieldRuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl FieldSource for TransactionRecord {
    fn field_value(&self, field: Field) -> Option<&str> {
        let party = &self.party;
        match field {
            Field::FirstName => party.first_name.as_deref(),
            Field::LastName => party.last_name.as_deref(),
            Field::OrganizationName => party.organization_name.as_deref(),
            Field::AddressLine1 => party.address.address_line1.as_deref(),
            Field::City => party.address.city.as_deref(),
            Field::State => party.address.state.as_deref(),
            Field::PostalCode => party.address.postal_code.as_deref(),
            Field::PurposeCode => self.purpose_code.as_deref(),
            Field::CheckNumber => self.payment.check_number.as_deref(),
            Field::InKindType => self.payment.in_kind_type.as_deref(),
            Field::InKindDescription => self.payment.in_kind_description.as_deref(),
        }
    }
}
