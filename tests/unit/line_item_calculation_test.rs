// Property-based tests for per-row totals
//
// Properties tested:
// 1. net = quantity × unit_price, total = net + tax
// 2. Exempt rows never carry tax, whatever their code
// 3. compute() is idempotent
// 4. Raising quantity or price never lowers the row total
// 5. Invalid rows are rejected with the offending field

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::TestDataFactory;

use tasa::invoices::LineItem;

fn cents(v: u64) -> Decimal {
    Decimal::from(v) / Decimal::from(100)
}

fn tax_code() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("01"), Just("02"), Just("03"), Just("06"), Just("EX")]
}

proptest! {
    #[test]
    fn test_row_arithmetic(
        quantity in 1u32..1_000,
        price_cents in 0u64..10_000_000,
        code in tax_code(),
    ) {
        let quantity = Decimal::from(quantity);
        let price = cents(price_cents);
        let item = TestDataFactory::item(quantity, price, code);

        let amounts = TestDataFactory::calculator().compute(&item).unwrap();

        prop_assert_eq!(amounts.net, quantity * price);
        prop_assert_eq!(amounts.total, amounts.net + amounts.tax);
        prop_assert_eq!(amounts.tax, amounts.net * amounts.rate / Decimal::ONE_HUNDRED);
        prop_assert!(amounts.tax >= Decimal::ZERO);
    }

    #[test]
    fn test_exempt_rows_never_taxed(
        quantity in 1u32..1_000,
        price_cents in 0u64..10_000_000,
        code in tax_code(),
    ) {
        let item = TestDataFactory::item(Decimal::from(quantity), cents(price_cents), code).exempt();
        let amounts = TestDataFactory::calculator().compute(&item).unwrap();

        prop_assert!(amounts.exempt);
        prop_assert_eq!(amounts.tax, Decimal::ZERO);
        prop_assert_eq!(amounts.total, amounts.net);
    }

    #[test]
    fn test_compute_is_idempotent(
        quantity in 1u32..1_000,
        price_cents in 0u64..10_000_000,
        code in tax_code(),
    ) {
        let calculator = TestDataFactory::calculator();
        let item = TestDataFactory::item(Decimal::from(quantity), cents(price_cents), code);

        let first = calculator.compute(&item).unwrap();
        let second = calculator.compute(&item).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_total_monotonic_in_price_and_quantity(
        quantity in 1u32..500,
        extra_quantity in 0u32..500,
        price_cents in 0u64..1_000_000,
        extra_cents in 0u64..1_000_000,
        code in tax_code(),
    ) {
        let calculator = TestDataFactory::calculator();
        let base = TestDataFactory::item(Decimal::from(quantity), cents(price_cents), code);
        let more_units = TestDataFactory::item(
            Decimal::from(quantity + extra_quantity),
            cents(price_cents),
            code,
        );
        let pricier = TestDataFactory::item(
            Decimal::from(quantity),
            cents(price_cents + extra_cents),
            code,
        );

        let base_total = calculator.compute(&base).unwrap().total;
        prop_assert!(calculator.compute(&more_units).unwrap().total >= base_total);
        prop_assert!(calculator.compute(&pricier).unwrap().total >= base_total);
    }

    #[test]
    fn test_non_positive_quantity_rejected(quantity in -1_000i64..=0) {
        let result = LineItem::new("P", Decimal::from(quantity), dec!(1), "01");
        let err = result.unwrap_err();
        prop_assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn test_negative_price_rejected(price_cents in 1u64..1_000_000) {
        let result = LineItem::new("P", dec!(1), -cents(price_cents), "01");
        let err = result.unwrap_err();
        prop_assert_eq!(err.field(), Some("unit_price"));
    }
}

#[test]
fn test_fractional_quantities_for_weighed_products() {
    let item = LineItem::new("QUESO", dec!(1), dec!(12.00), "01")
        .unwrap()
        .fractional();
    let mut item = item;
    item.set_quantity(dec!(0.750)).unwrap();

    let amounts = TestDataFactory::calculator().compute(&item).unwrap();
    assert_eq!(amounts.net, dec!(9.00));
    assert_eq!(amounts.tax, dec!(1.44));
}

#[test]
fn test_luxury_and_withheld_rates() {
    let calculator = TestDataFactory::calculator();

    let luxury = calculator
        .compute(&TestDataFactory::item(dec!(1), dec!(200), "03"))
        .unwrap();
    assert_eq!(luxury.tax, dec!(62));

    let withheld = calculator
        .compute(&TestDataFactory::item(dec!(1), dec!(200), "06"))
        .unwrap();
    assert_eq!(withheld.tax, Decimal::ZERO);
    assert!(!withheld.exempt);
}

#[test]
fn test_percentage_tax_selection() {
    let amounts = TestDataFactory::calculator()
        .compute(&TestDataFactory::item(dec!(2), dec!(10), "8%"))
        .unwrap();
    assert_eq!(amounts.rate, dec!(8));
    assert_eq!(amounts.tax, dec!(1.6));
}
