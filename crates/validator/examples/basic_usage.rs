//! Declaring a schema on a struct and collecting every violation.
//!
//! Run with `RUST_LOG=sentinel_validator=debug` to see the per-rule log.

use rust_decimal::Decimal;
use sentinel_validator::prelude::*;
use tracing_subscriber::EnvFilter;

field_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Status { Pending, Paid, Shipped }
}

schema! {
    #[derive(Debug)]
    pub struct Order {
        #[rule(RuleAttachment::email().with_message("email is not valid"))]
        pub email: Option<String>,
        #[rule(RuleAttachment::phone().with_message("phone is not valid"))]
        pub phone: Option<String>,
        #[rule(RuleAttachment::quantity(1, 100).with_message("qty must be 1-100"))]
        pub qty: Option<i64>,
        #[rule(RuleAttachment::price(Decimal::new(1, 2), Decimal::from(999_999)).with_message("price out of range"))]
        #[rule(RuleAttachment::decimal(6, 2).with_message("price has too many digits"))]
        pub price: Option<Decimal>,
        #[rule(RuleAttachment::date("yyyy-MM-dd").with_message("date must be yyyy-MM-dd"))]
        pub placed_on: Option<String>,
        #[rule(RuleAttachment::enum_of::<Status>().with_message("unknown status"))]
        pub status: Option<Status>,
    }
}

fn report(label: &str, order: &Order) {
    match sentinel_validator::validate(order) {
        Ok(()) => println!("{label}: valid"),
        Err(errors) => {
            println!("{label}: {} violation(s)", errors.len());
            for error in errors.iter() {
                println!(
                    "  {:<10} {:<18} {}",
                    error.field.as_deref().unwrap_or("-"),
                    error.code,
                    error.message
                );
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let valid = Order {
        email: Some("buyer@example.com".into()),
        phone: Some("13812345678".into()),
        qty: Some(80),
        price: Some(Decimal::new(1999, 2)),
        placed_on: Some("2024-02-29".into()),
        status: Some(Status::Paid),
    };
    report("valid order", &valid);

    let broken = Order {
        email: Some("buyer.example.com".into()),
        phone: Some("12345".into()),
        qty: Some(200),
        price: Some(Decimal::new(1, 3)),
        placed_on: Some("2023-02-29".into()),
        status: None,
    };
    report("broken order", &broken);

    let outcome = collect(&broken);
    println!("messages: {:?}", outcome.messages());
}
