//! Property-based tests for RequisitionService.

use proptest::prelude::*;
use uuid::Uuid;

use crate::requisition::service::RequisitionService;
use crate::requisition::types::{OrderLine, OrderStatus};
use crate::stock::error::LedgerError;

fn arb_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::Pending),
        Just(OrderStatus::Approved),
        Just(OrderStatus::Rejected),
    ]
}

fn arb_lines() -> impl Strategy<Value = Vec<OrderLine>> {
    prop::collection::vec(
        (0u128..6, 1i32..1_000).prop_map(|(id, quantity)| OrderLine {
            consumable_id: Uuid::from_u128(id),
            quantity,
        }),
        1..20,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Only pending orders can be decided; terminal orders report their status.
    #[test]
    fn prop_transitions_only_from_pending(status in arb_status()) {
        let approve = RequisitionService::approve(status, "admin");
        let reject = RequisitionService::reject(status, "admin");

        if status == OrderStatus::Pending {
            prop_assert_eq!(approve.unwrap().new_status(), OrderStatus::Approved);
            prop_assert_eq!(reject.unwrap().new_status(), OrderStatus::Rejected);
        } else {
            let approve_is_invalid_state = matches!(
                approve,
                Err(LedgerError::InvalidState { current_status }) if current_status == status
            );
            let reject_is_invalid_state = matches!(
                reject,
                Err(LedgerError::InvalidState { current_status }) if current_status == status
            );
            prop_assert!(approve_is_invalid_state);
            prop_assert!(reject_is_invalid_state);
        }
    }

    /// Merging preserves the total requested per consumable and yields unique, sorted ids.
    #[test]
    fn prop_merge_preserves_totals(lines in arb_lines()) {
        let merged = RequisitionService::merge_lines(&lines).unwrap();

        for window in merged.windows(2) {
            prop_assert!(window[0].consumable_id < window[1].consumable_id);
        }

        for line in &merged {
            let expected: i32 = lines
                .iter()
                .filter(|l| l.consumable_id == line.consumable_id)
                .map(|l| l.quantity)
                .sum();
            prop_assert_eq!(line.quantity, expected);
        }

        let total_in: i64 = lines.iter().map(|l| i64::from(l.quantity)).sum();
        let total_out: i64 = merged.iter().map(|l| i64::from(l.quantity)).sum();
        prop_assert_eq!(total_in, total_out);
    }
}
