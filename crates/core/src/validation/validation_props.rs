//! Property-based tests for record validation.

use campfin_shared::types::Money;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::rules::{Field, FieldRuleSet, Presence};
use super::validator::Validator;
use crate::transaction::{
    Address, EntityType, PartyInfo, PaymentDetails, PaymentMethod, PurposeCode,
    TransactionKind, TransactionRecord,
};

const ALL_FIELDS: [Field; 11] = [
    Field::FirstName,
    Field::LastName,
    Field::OrganizationName,
    Field::AddressLine1,
    Field::City,
    Field::State,
    Field::PostalCode,
    Field::PurposeCode,
    Field::CheckNumber,
    Field::InKindType,
    Field::InKindDescription,
];

fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Contribution),
        Just(TransactionKind::Disbursement),
    ]
}

fn arb_entity() -> impl Strategy<Value = EntityType> {
    prop::sample::select(EntityType::ALL.to_vec())
}

fn arb_method() -> impl Strategy<Value = PaymentMethod> {
    prop::sample::select(PaymentMethod::ALL.to_vec())
}

/// Values the validator must treat as not filled in.
fn arb_blank() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[ \t]{1,4}".prop_map(Some),
    ]
}

fn complete(kind: TransactionKind, entity_type: EntityType, method: PaymentMethod) -> TransactionRecord {
    let mut record = TransactionRecord::new(
        kind,
        entity_type,
        method,
        Money::new(Decimal::new(2500, 2)),
        NaiveDate::from_ymd_opt(2022, 2, 14).unwrap(),
    );
    record.party = PartyInfo {
        first_name: Some("Maria".into()),
        last_name: Some("Chen".into()),
        organization_name: Some("Harbor Print LLC".into()),
        address: Address {
            address_line1: Some("77 Water St".into()),
            address_line2: None,
            city: Some("Portland".into()),
            state: Some("Maine".into()),
            postal_code: Some("04101".into()),
        },
        email: None,
        phone_number: None,
    };
    record.purpose_code = Some("PRINT".into());
    record.payment = PaymentDetails {
        check_number: Some("1042".into()),
        in_kind_type: Some("Goods Provided".into()),
        in_kind_description: Some("Yard signs".into()),
    };
    record
}

fn set_field(record: &mut TransactionRecord, field: Field, value: Option<String>) {
    let slot = match field {
        Field::FirstName => &mut record.party.first_name,
        Field::LastName => &mut record.party.last_name,
        Field::OrganizationName => &mut record.party.organization_name,
        Field::AddressLine1 => &mut record.party.address.address_line1,
        Field::City => &mut record.party.address.city,
        Field::State => &mut record.party.address.state,
        Field::PostalCode => &mut record.party.address.postal_code,
        Field::PurposeCode => &mut record.purpose_code,
        Field::CheckNumber => &mut record.payment.check_number,
        Field::InKindType => &mut record.payment.in_kind_type,
        Field::InKindDescription => &mut record.payment.in_kind_description,
    };
    *slot = value;
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A fully populated record passes for every combination.
    #[test]
    fn prop_complete_record_is_valid(
        kind in arb_kind(),
        entity_type in arb_entity(),
        method in arb_method(),
    ) {
        let validator = Validator::default();
        let record = complete(kind, entity_type, method);
        prop_assert!(validator.validate(&record).is_ok());
        prop_assert!(validator.validate_all(&record).is_empty());
    }

    /// Blanking a required field reports exactly that field's message,
    /// even when later fields are blank too.
    #[test]
    fn prop_first_blank_field_wins(
        kind in arb_kind(),
        entity_type in arb_entity(),
        method in arb_method(),
        index in any::<prop::sample::Index>(),
        blank in arb_blank(),
        clear_later in any::<bool>(),
    ) {
        let rules = FieldRuleSet::standard();
        let list = rules.rules_for(kind, entity_type, method);
        let pos = index.index(list.len());
        let target = list[pos];

        let mut record = complete(kind, entity_type, method);
        let value = match (target.presence, blank.is_some()) {
            (Presence::Select { placeholder }, true) => Some(placeholder.to_string()),
            (Presence::PurposeCode, true) => Some(PurposeCode::PLACEHOLDER.to_string()),
            _ => blank,
        };
        set_field(&mut record, target.field, value);
        if clear_later {
            for rule in &list[pos + 1..] {
                set_field(&mut record, rule.field, None);
            }
        }

        let err = Validator::new(rules.clone()).validate(&record).unwrap_err();
        prop_assert_eq!(err.field, target.field);
        prop_assert_eq!(err.message, target.message);
    }

    /// Fields outside the combination's rule list never affect the outcome.
    #[test]
    fn prop_unlisted_fields_are_ignored(
        kind in arb_kind(),
        entity_type in arb_entity(),
        method in arb_method(),
    ) {
        let rules = FieldRuleSet::standard();
        let listed: Vec<Field> = rules
            .rules_for(kind, entity_type, method)
            .iter()
            .map(|rule| rule.field)
            .collect();

        let mut record = complete(kind, entity_type, method);
        for field in ALL_FIELDS {
            if !listed.contains(&field) {
                set_field(&mut record, field, None);
            }
        }
        prop_assert!(Validator::new(rules).validate(&record).is_ok());
    }
}
