//! Property-based tests for reconciliation matching.

use campfin_shared::ReconciliationConfig;
use campfin_shared::types::Money;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::matcher::ReconciliationMatcher;
use super::session::ReconciliationSession;
use super::types::{BlockReason, ReconciliationBatch, Verdict};
use crate::transaction::{EntityType, PaymentMethod, TransactionKind, TransactionRecord};

/// Strategy for disbursement amounts at or below the default 400.00 ceiling.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=40_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Contribution),
        Just(TransactionKind::Disbursement),
    ]
}

fn batch(kind: TransactionKind, target: Decimal, amounts: &[Decimal]) -> ReconciliationBatch {
    let transactions = amounts
        .iter()
        .map(|amount| {
            TransactionRecord::new(
                kind,
                EntityType::Individual,
                PaymentMethod::Ach,
                Money::new(*amount),
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            )
        })
        .collect();
    ReconciliationBatch::from_config(
        kind,
        Money::new(target),
        transactions,
        &ReconciliationConfig::default(),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A selection under the ceiling reconciles exactly when the cents agree.
    #[test]
    fn prop_exact_total_is_eligible(
        kind in arb_kind(),
        amounts in prop::collection::vec(arb_amount(), 1..12),
        off_by in 1i64..500i64,
    ) {
        let sum: Decimal = amounts.iter().copied().sum();
        let matcher = ReconciliationMatcher::default();

        let matching = batch(kind, sum, &amounts);
        let ids: Vec<_> = matching.transactions().iter().map(|tx| tx.id).collect();
        prop_assert!(matcher.evaluate(&matching, &ids).unwrap().can_submit());

        let drifted = batch(kind, sum + Decimal::new(off_by, 2), &amounts);
        let ids: Vec<_> = drifted.transactions().iter().map(|tx| tx.id).collect();
        let eligibility = matcher.evaluate(&drifted, &ids).unwrap();
        let is_mismatch = matches!(
            eligibility.verdict,
            Verdict::Blocked(BlockReason::TotalMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }

    /// Selection order never changes the verdict or the total.
    #[test]
    fn prop_selection_order_is_irrelevant(
        amounts in prop::collection::vec(arb_amount(), 1..10),
        target_cents in 0i64..400_000i64,
    ) {
        let b = batch(TransactionKind::Disbursement, Decimal::new(target_cents, 2), &amounts);
        let forward: Vec<_> = b.transactions().iter().map(|tx| tx.id).collect();
        let backward: Vec<_> = forward.iter().rev().copied().collect();
        let matcher = ReconciliationMatcher::default();

        let a = matcher.evaluate(&b, &forward).unwrap();
        let z = matcher.evaluate(&b, &backward).unwrap();
        prop_assert_eq!(a.selected_total, z.selected_total);
        prop_assert_eq!(a.can_submit(), z.can_submit());
    }

    /// One oversized disbursement blocks the selection whatever the target.
    #[test]
    fn prop_ceiling_blocks_regardless_of_total(
        amounts in prop::collection::vec(arb_amount(), 0..8),
        excess in 1i64..100_000i64,
    ) {
        let mut amounts = amounts;
        amounts.push(Decimal::new(40_000 + excess, 2));
        let sum: Decimal = amounts.iter().copied().sum();

        let b = batch(TransactionKind::Disbursement, sum, &amounts);
        let ids: Vec<_> = b.transactions().iter().map(|tx| tx.id).collect();
        let eligibility = ReconciliationMatcher::default().evaluate(&b, &ids).unwrap();
        let is_limit = matches!(
            eligibility.verdict,
            Verdict::Blocked(BlockReason::LimitExceeded { .. })
        );
        prop_assert!(is_limit);
    }

    /// Submission verifies the whole selection or nothing.
    #[test]
    fn prop_submit_is_all_or_nothing(
        amounts in prop::collection::vec(arb_amount(), 1..10),
        picks in prop::collection::vec(any::<bool>(), 10),
        target_cents in 0i64..400_000i64,
    ) {
        let b = batch(TransactionKind::Disbursement, Decimal::new(target_cents, 2), &amounts);
        let mut session = ReconciliationSession::new(b, ReconciliationMatcher::default());
        let ids: Vec<_> = session.batch().transactions().iter().map(|tx| tx.id).collect();
        for (id, pick) in ids.iter().zip(&picks) {
            if *pick {
                session.toggle(*id).unwrap();
            }
        }
        let selected = session.selection().to_vec();
        let before = session.batch().clone();

        match session.submit() {
            Ok(set) => {
                prop_assert_eq!(&set.verified_ids, &selected);
                for tx in session.batch().transactions() {
                    prop_assert_eq!(tx.verified, selected.contains(&tx.id));
                }
            }
            Err(_) => {
                prop_assert_eq!(session.batch(), &before);
                prop_assert_eq!(session.selection(), selected.as_slice());
            }
        }
    }
}
