//! Property-based tests for the ownership ledger.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::OwnershipError;
use super::ledger::OwnershipLedger;
use super::types::OwnerInput;
use crate::transaction::Address;

#[derive(Debug, Clone)]
enum Op {
    Add(Decimal),
    Edit(usize, Decimal),
    Remove(usize),
}

/// Strategy for a percentage from 0.01 to 150.00.
fn percent() -> impl Strategy<Value = Decimal> {
    (1i64..=15_000i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => percent().prop_map(Op::Add),
        2 => (any::<usize>(), percent()).prop_map(|(i, p)| Op::Edit(i, p)),
        2 => any::<usize>().prop_map(Op::Remove),
    ]
}

fn input(percent: Decimal) -> OwnerInput {
    OwnerInput {
        first_name: Some("Ana".into()),
        last_name: Some("Lopez".into()),
        address: Address {
            address_line1: Some("1 Main St".into()),
            address_line2: None,
            city: Some("Albany".into()),
            state: None,
            postal_code: Some("12207".into()),
        },
        percent,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The total always equals the sum of the owners currently present.
    #[test]
    fn prop_total_tracks_every_mutation(ops in prop::collection::vec(op(), 0..40)) {
        let mut ledger = OwnershipLedger::new();
        let mut model: Vec<Decimal> = Vec::new();

        for op in ops {
            match op {
                Op::Add(p) => {
                    ledger.add(input(p)).unwrap();
                    model.push(p);
                }
                Op::Edit(i, p) if !model.is_empty() => {
                    let i = i % model.len();
                    let id = ledger.owners()[i].id;
                    ledger.edit(id, input(p)).unwrap();
                    model[i] = p;
                }
                Op::Remove(i) if !model.is_empty() => {
                    let i = i % model.len();
                    let id = ledger.owners()[i].id;
                    ledger.remove(id).unwrap();
                    model.remove(i);
                }
                Op::Edit(..) | Op::Remove(_) => {}
            }

            let expected: Decimal = model.iter().copied().sum();
            prop_assert_eq!(ledger.total_percent(), expected);
            prop_assert_eq!(ledger.remaining_percent(), dec!(100) - expected);
            prop_assert_eq!(ledger.len(), model.len());
            prop_assert_eq!(ledger.owners_view_error().is_some(), expected > dec!(100));
        }
    }

    /// Entry order does not change the total.
    #[test]
    fn prop_total_is_order_independent(
        percents in prop::collection::vec(percent(), 1..10),
    ) {
        let mut forward = OwnershipLedger::new();
        let mut backward = OwnershipLedger::new();
        for p in &percents {
            forward.add(input(*p)).unwrap();
        }
        for p in percents.iter().rev() {
            backward.add(input(*p)).unwrap();
        }
        prop_assert_eq!(forward.total_percent(), backward.total_percent());
    }

    /// Any split of 100 submits; shifting one owner by ±d reports d.
    #[test]
    fn prop_delta_is_sign_independent(
        first in 1i64..9_999i64,
        shift in 1i64..5_000i64,
    ) {
        let a = Decimal::new(first, 2);
        let b = dec!(100) - a;
        let d = Decimal::new(shift, 2);

        let mut balanced = OwnershipLedger::new();
        balanced.add(input(a)).unwrap();
        balanced.add(input(b)).unwrap();
        prop_assert!(balanced.submit().is_ok());

        let mut over = OwnershipLedger::new();
        over.add(input(a)).unwrap();
        over.add(input(b + d)).unwrap();

        let expected = OwnershipError::TotalOff { required: dec!(100), delta: d.normalize() };
        prop_assert_eq!(over.submit().unwrap_err(), expected.clone());

        if b > d {
            let mut under = OwnershipLedger::new();
            under.add(input(a)).unwrap();
            under.add(input(b - d)).unwrap();
            prop_assert_eq!(under.submit().unwrap_err(), expected);
        }
    }
}
