//! Property tests for cart and checkout behavior.

use proptest::prelude::*;

use boxoffice::BoxOfficeError;
use boxoffice_testkit::{apply_ops, cart_ops, event_draft, fixed_timestamp, TestFixture};

proptest! {
    #[test]
    fn repeated_adds_merge_into_one_entry(qtys in prop::collection::vec(1u32..=50, 1..10)) {
        let mut fixture = TestFixture::with_sample_events();
        let id = fixture.event_ids[0];
        for &qty in &qtys {
            fixture.office.add_to_cart(id, qty).unwrap();
        }
        let cart = fixture.office.cart();
        prop_assert_eq!(cart.len(), 1);
        prop_assert_eq!(cart.quantity_of(id), qtys.iter().sum::<u32>());
    }

    #[test]
    fn update_to_zero_matches_remove(ops in cart_ops(3, 20), slot in 0usize..3) {
        let mut updated = TestFixture::with_sample_events();
        let mut removed = TestFixture::with_sample_events();
        apply_ops(&mut updated.office, &updated.event_ids.clone(), &ops);
        apply_ops(&mut removed.office, &removed.event_ids.clone(), &ops);

        let id = updated.event_ids[slot];
        updated.office.update_cart_quantity(id, 0);
        removed.office.remove_from_cart(id);

        prop_assert!(!updated.office.cart().contains(id));
        prop_assert_eq!(updated.office.cart(), removed.office.cart());
    }

    #[test]
    fn cart_entries_stay_unique_and_positive(ops in cart_ops(3, 30)) {
        let mut fixture = TestFixture::with_sample_events();
        let ids = fixture.event_ids.clone();
        apply_ops(&mut fixture.office, &ids, &ops);

        let items = fixture.office.cart().items();
        prop_assert!(items.iter().all(|i| i.quantity > 0));
        for (i, a) in items.iter().enumerate() {
            prop_assert!(items[i + 1..].iter().all(|b| b.event_id != a.event_id));
        }
    }

    #[test]
    fn validate_matches_seat_oracle(ops in cart_ops(3, 30)) {
        let mut fixture = TestFixture::with_sample_events();
        let ids = fixture.event_ids.clone();
        apply_ops(&mut fixture.office, &ids, &ops);

        let office = &fixture.office;
        let expected = office.cart().items().iter().all(|item| {
            office
                .event(item.event_id)
                .map_or(false, |e| item.quantity <= e.remaining_seats)
        });
        prop_assert_eq!(office.validate_cart(), expected);
    }

    #[test]
    fn checkout_conserves_seats(ops in cart_ops(3, 30)) {
        let mut fixture = TestFixture::with_sample_events();
        let ids = fixture.event_ids.clone();
        apply_ops(&mut fixture.office, &ids, &ops);

        let before_seats = fixture.total_remaining();
        let before_number = fixture.office.next_order_number();
        let before_cart = fixture.office.cart().clone();
        let in_cart: u64 = before_cart.items().iter().map(|i| u64::from(i.quantity)).sum();
        let valid = fixture.office.validate_cart();
        let expected_total = fixture.office.cart_total();

        match fixture.office.checkout_at(fixed_timestamp()) {
            Ok(order) => {
                prop_assert!(valid);
                prop_assert_eq!(order.number, before_number);
                prop_assert_eq!(u64::from(order.seat_count()), in_cart);
                prop_assert!((order.total - expected_total).abs() < 1e-9);
                prop_assert_eq!(fixture.total_remaining(), before_seats - in_cart);
                prop_assert!(fixture.office.cart().is_empty());
                prop_assert_eq!(fixture.office.next_order_number(), before_number.next());
                prop_assert_eq!(fixture.office.orders().unwrap().len(), 1);
            }
            Err(BoxOfficeError::EmptyCart) => {
                prop_assert!(before_cart.is_empty());
            }
            Err(BoxOfficeError::InsufficientAvailability { .. }) => {
                prop_assert!(!valid);
                prop_assert_eq!(fixture.total_remaining(), before_seats);
                prop_assert_eq!(fixture.office.cart(), &before_cart);
                prop_assert_eq!(fixture.office.next_order_number(), before_number);
                prop_assert!(fixture.office.orders().unwrap().is_empty());
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn added_events_are_listed_unless_duplicate(drafts in prop::collection::vec(event_draft(), 1..8)) {
        let mut fixture = TestFixture::new();
        let mut keys = Vec::new();
        for draft in drafts {
            let key = draft.key();
            let result = fixture.office.add_event(draft);
            if keys.contains(&key) {
                prop_assert!(matches!(result, Err(BoxOfficeError::DuplicateEvent(_))), "expected duplicate");
            } else {
                prop_assert!(result.is_ok());
                keys.push(key);
            }
        }
        prop_assert_eq!(fixture.office.list_events(true).len(), keys.len());
    }

    #[test]
    fn same_key_is_duplicate_whatever_the_disabled_flag(draft in event_draft(), flip in any::<bool>()) {
        let mut fixture = TestFixture::new();
        fixture.office.add_event(draft.clone()).unwrap();

        let mut again = draft;
        if flip {
            again.disabled = !again.disabled;
        }
        prop_assert!(
            matches!(fixture.office.add_event(again), Err(BoxOfficeError::DuplicateEvent(_))),
            "expected duplicate"
        );
        prop_assert_eq!(fixture.office.list_events(true).len(), 1);
    }
}
