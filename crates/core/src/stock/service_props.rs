//! Property-based tests for StockLedger.
//!
//! Stock stays non-negative, borrow/return conserves units across the
//! available and damaged pools, and a failed approval yields no changes.

use proptest::prelude::*;
use uuid::Uuid;

use crate::requisition::types::{OrderLine, OrderStatus};
use crate::stock::error::LedgerError;
use crate::stock::service::StockLedger;
use crate::stock::types::{
    BorrowRequest, BorrowSnapshot, BorrowerType, ReturnRequest, StockLevel,
};

fn arb_level() -> impl Strategy<Value = StockLevel> {
    (0u128..8, 0i32..500, 0i32..50).prop_map(|(id, quantity, damaged)| StockLevel {
        consumable_id: Uuid::from_u128(id),
        name: format!("item-{id}"),
        quantity,
        damaged,
        returnable: true,
    })
}

fn arb_borrower_type() -> impl Strategy<Value = BorrowerType> {
    prop_oneof![Just(BorrowerType::Student), Just(BorrowerType::Staff)]
}

fn arb_order() -> impl Strategy<Value = (Vec<StockLevel>, Vec<OrderLine>)> {
    let stock = prop::collection::vec(0i32..100, 1..6).prop_map(|quantities| {
        quantities
            .into_iter()
            .enumerate()
            .map(|(i, quantity)| StockLevel {
                consumable_id: Uuid::from_u128(i as u128),
                name: format!("item-{i}"),
                quantity,
                damaged: 0,
                returnable: false,
            })
            .collect::<Vec<_>>()
    });

    stock.prop_flat_map(|stock| {
        let ids: Vec<Uuid> = stock.iter().map(|s| s.consumable_id).collect();
        let lines = prop::collection::vec(
            (prop::sample::select(ids), 1i32..60).prop_map(|(consumable_id, quantity)| {
                OrderLine {
                    consumable_id,
                    quantity,
                }
            }),
            1..8,
        );
        (Just(stock), lines)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A borrow succeeds exactly when it fits, and never overdraws.
    #[test]
    fn prop_borrow_never_overdraws(
        level in arb_level(),
        quantity in 1i32..600,
        borrower_type in arb_borrower_type(),
    ) {
        let request = BorrowRequest {
            consumable_id: level.consumable_id,
            borrower_name: "Borrower".to_string(),
            borrower_type,
            quantity,
        };

        match StockLedger::plan_borrow(Uuid::new_v4(), &level, &request, "admin") {
            Ok(plan) => {
                prop_assert!(quantity <= level.quantity);
                prop_assert!(plan.change.quantity_after >= 0);
                prop_assert_eq!(plan.change.quantity_delta(), -i64::from(quantity));
                prop_assert_eq!(plan.change.damaged_delta(), 0);
            }
            Err(LedgerError::InsufficientStock { available, requested, .. }) => {
                prop_assert!(quantity > level.quantity);
                prop_assert_eq!(available, level.quantity);
                prop_assert_eq!(requested, quantity);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    /// Borrow b then return (r, b - r): quantity ends at start - b + r and
    /// damaged grows by b - r.
    #[test]
    fn prop_borrow_return_conserves_units(
        level in arb_level(),
        borrow_fraction in 1u32..=100,
        returned_fraction in 0u32..=100,
    ) {
        prop_assume!(level.quantity > 0);
        let borrowed = i32::try_from(
            (u32::try_from(level.quantity).unwrap() * borrow_fraction).div_ceil(100),
        )
        .unwrap()
        .max(1);
        let returned = i32::try_from(
            u32::try_from(borrowed).unwrap() * returned_fraction / 100,
        )
        .unwrap();
        let damaged = borrowed - returned;

        let request = BorrowRequest {
            consumable_id: level.consumable_id,
            borrower_name: "Borrower".to_string(),
            borrower_type: BorrowerType::Staff,
            quantity: borrowed,
        };
        let borrow = StockLedger::plan_borrow(Uuid::new_v4(), &level, &request, "admin").unwrap();

        let after_borrow = StockLevel {
            quantity: borrow.change.quantity_after,
            ..level.clone()
        };
        let snapshot = BorrowSnapshot {
            borrow_id: borrow.borrow_id,
            consumable_id: level.consumable_id,
            quantity: borrowed,
            returned: false,
        };
        let ret = StockLedger::plan_return(
            Uuid::new_v4(),
            &snapshot,
            &after_borrow,
            &ReturnRequest {
                borrow_id: borrow.borrow_id,
                returned_quantity: returned,
                damaged_quantity: damaged,
            },
            "admin",
        )
        .unwrap();

        prop_assert_eq!(ret.change.quantity_after, level.quantity - borrowed + returned);
        prop_assert_eq!(ret.change.damaged_after, level.damaged + damaged);
        prop_assert_eq!(
            i64::from(ret.change.quantity_after) + i64::from(ret.change.damaged_after),
            i64::from(level.quantity) + i64::from(level.damaged)
        );
    }

    /// Any return whose parts do not sum to the borrowed quantity is refused.
    #[test]
    fn prop_return_mismatch_rejected(
        level in arb_level(),
        borrowed in 1i32..100,
        returned in 0i32..150,
        damaged in 0i32..150,
    ) {
        prop_assume!(returned + damaged != borrowed);
        let snapshot = BorrowSnapshot {
            borrow_id: Uuid::new_v4(),
            consumable_id: level.consumable_id,
            quantity: borrowed,
            returned: false,
        };
        let request = ReturnRequest {
            borrow_id: snapshot.borrow_id,
            returned_quantity: returned,
            damaged_quantity: damaged,
        };

        let result = StockLedger::plan_return(Uuid::new_v4(), &snapshot, &level, &request, "admin");
        prop_assert_eq!(
            result.err(),
            Some(LedgerError::QuantityMismatch { expected: borrowed, provided: returned + damaged })
        );
    }

    /// Approval either fits every consumable or yields no plan at all.
    #[test]
    fn prop_approval_atomic((stock, lines) in arb_order()) {
        let requested = StockLedger::requested_per_consumable(&lines).unwrap();
        let fits = requested.iter().all(|(id, qty)| {
            stock.iter().any(|s| s.consumable_id == *id && *qty <= s.quantity)
        });

        let result =
            StockLedger::plan_approval(Uuid::new_v4(), OrderStatus::Pending, &lines, &stock, "admin");

        if fits {
            let plan = result.unwrap();
            prop_assert_eq!(plan.changes.len(), requested.len());
            for change in &plan.changes {
                prop_assert!(change.quantity_after >= 0);
                prop_assert_eq!(
                    -change.quantity_delta(),
                    i64::from(requested[&change.consumable_id])
                );
            }
            let ids: Vec<Uuid> = plan.changes.iter().map(|c| c.consumable_id).collect();
            let mut sorted = ids.clone();
            sorted.sort();
            prop_assert_eq!(ids, sorted);
        } else {
            let first_short = requested
                .iter()
                .find(|(id, qty)| {
                    stock.iter().any(|s| s.consumable_id == **id && **qty > s.quantity)
                })
                .map(|(id, _)| *id);
            match result {
                Err(LedgerError::InsufficientStock { consumable_id, .. }) => {
                    prop_assert_eq!(Some(consumable_id), first_short);
                }
                other => prop_assert!(false, "expected InsufficientStock, got {other:?}"),
            }
        }
    }

    /// Only pending orders can be decided.
    #[test]
    fn prop_terminal_orders_untouchable(approved in any::<bool>()) {
        let status = if approved { OrderStatus::Approved } else { OrderStatus::Rejected };
        let result = StockLedger::plan_rejection(Uuid::new_v4(), status, "admin");
        prop_assert_eq!(
            result.err(),
            Some(LedgerError::InvalidState { current_status: status })
        );
    }
}
