//! Sharing schemas and validators across threads.

use std::thread;

use sentinel_validator::prelude::*;

schema! {
    pub struct Ticket {
        #[rule(RuleAttachment::quantity(1, 10).with_message("seats"))]
        pub seats: i64,
        #[rule(RuleAttachment::email().with_message("email"))]
        pub contact: String,
    }
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shared_types_are_send_and_sync() {
    assert_send_sync::<Schema>();
    assert_send_sync::<RuleAttachment>();
    assert_send_sync::<ValidationErrors>();
    assert_send_sync::<ValidationOutcome>();
    assert_send_sync::<Password>();
    assert_send_sync::<FileConstraint>();
    assert_send_sync::<DateTimeRange>();
    assert_send_sync::<EnumMember>();
    assert_send_sync::<Email>();
    assert_send_sync::<InRange<rust_decimal::Decimal>>();
}

#[test]
fn parallel_validation_shares_one_schema() {
    let tickets: Vec<Ticket> = (0..64)
        .map(|i| Ticket {
            seats: i % 16,
            contact: if i % 3 == 0 {
                "broken".to_string()
            } else {
                format!("user{i}@example.com")
            },
        })
        .collect();

    let expected: Vec<usize> = tickets
        .iter()
        .map(|t| usize::from(!(1..=10).contains(&t.seats)) + usize::from(!t.contact.contains('@')))
        .collect();

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = tickets
            .chunks(8)
            .map(|chunk| scope.spawn(move || chunk.iter().map(|t| collect(t).len()).collect::<Vec<_>>()))
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(counts, expected);

    let first = &tickets[0];
    let schema = first.schema();
    assert!(tickets.iter().all(|t| std::ptr::eq(t.schema(), schema)));
}
