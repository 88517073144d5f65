// Property-based tests for the tax aliquot resolver
//
// Properties tested:
// 1. Every fiscal code resolves to its configured percentage
// 2. A percentage in the table resolves to itself, whatever its formatting
// 3. Anything outside the table fails unless a default rate is configured
// 4. Resolution is deterministic

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tasa::taxes::{AliquotResolver, TaxCode, TaxTable};
use tasa::PricingError;

fn strict() -> AliquotResolver {
    AliquotResolver::new(TaxTable::default(), None)
}

#[test]
fn test_codes_resolve_to_table_rates() {
    let resolver = strict();
    for (code, rate) in TaxTable::default().entries() {
        assert_eq!(resolver.resolve(code.as_code()).unwrap(), rate, "code {}", code);
        assert_eq!(resolver.resolve_code(code), rate);
    }
    assert_eq!(resolver.resolve("EX").unwrap(), Decimal::ZERO);
}

#[test]
fn test_invalid_code_error_names_input() {
    let err = strict().resolve(" 04 ").unwrap_err();
    assert_eq!(err.to_string(), "Invalid tax code: 04");
    assert_eq!(err.field(), Some("tax_code"));
}

#[test]
fn test_empty_input_is_invalid() {
    assert!(matches!(
        strict().resolve(""),
        Err(PricingError::InvalidTaxCode(_))
    ));
}

#[test]
fn test_reduced_code_context_is_configurable() {
    let luxury_reduced = AliquotResolver::new(
        TaxTable {
            reduced: dec!(31),
            ..TaxTable::default()
        },
        None,
    );
    assert_eq!(strict().resolve("02").unwrap(), dec!(8));
    assert_eq!(luxury_reduced.resolve("02").unwrap(), dec!(31));
}

proptest! {
    #[test]
    fn test_known_percentages_resolve_to_themselves(
        index in 0usize..4,
        trailing_zeros in 0u32..4,
        with_percent_sign in any::<bool>(),
    ) {
        let table = TaxTable::default();
        let rate = table.entries()[index].1;

        let mut text = rate.to_string();
        if trailing_zeros > 0 {
            text = format!("{}.{}", text, "0".repeat(trailing_zeros as usize));
        }
        if with_percent_sign {
            text.push('%');
        }

        let resolved = strict().resolve(&text).unwrap();
        prop_assert_eq!(resolved, rate);
    }

    #[test]
    fn test_unknown_percentages_are_rejected(percent in 1u32..100) {
        prop_assume!(![8u32, 16, 31].contains(&percent));
        let result = strict().resolve(&percent.to_string());
        prop_assert!(matches!(result, Err(PricingError::InvalidTaxCode(_))));
    }

    #[test]
    fn test_explicit_default_covers_unknown_input(
        garbage in "[a-z]{1,8}",
        default_percent in 0u32..=100,
    ) {
        prop_assume!(garbage != "ex" && garbage != "e");
        let default_rate = Decimal::from(default_percent);
        let resolver = AliquotResolver::new(TaxTable::default(), Some(default_rate));
        prop_assert_eq!(resolver.resolve(&garbage).unwrap(), default_rate);
    }

    #[test]
    fn test_resolution_is_deterministic(input in "[0-9EXex%. ]{0,6}") {
        let resolver = strict();
        let first = resolver.resolve(&input).ok();
        let second = resolver.resolve(&input).ok();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_code_of_normalises_percentages() {
    let resolver = strict();
    assert_eq!(resolver.code_of("16%"), Some(TaxCode::General));
    assert_eq!(resolver.code_of("31"), Some(TaxCode::Luxury));
    assert_eq!(resolver.code_of("abc"), None);
}
