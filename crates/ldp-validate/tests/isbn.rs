//! Integration tests for identifier flagging over DataFrames.

use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series};
use proptest::prelude::*;

use ldp_validate::{flag_valid_identifiers, is_valid_isbn13_shape};

fn catalogue_df(isbns: Vec<Option<&str>>) -> DataFrame {
    let cols: Vec<Column> = vec![Series::new("isbn".into(), isbns).into()];
    DataFrame::new(cols).unwrap()
}

#[test]
fn flags_each_row_and_counts_invalid() {
    let mut df = catalogue_df(vec![
        Some("978-0-123456-78-9"),
        Some("invalid"),
        Some("123"),
        None,
    ]);

    let invalid = flag_valid_identifiers(&mut df, "isbn", "isbn_valid").unwrap();

    assert_eq!(invalid, 3);
    let flags = df.column("isbn_valid").unwrap();
    assert_eq!(flags.dtype(), &DataType::Boolean);
    let values: Vec<bool> = flags.bool().unwrap().into_iter().flatten().collect();
    assert_eq!(values, vec![true, false, false, false]);
}

#[test]
fn missing_source_column_is_an_error() {
    let mut df = catalogue_df(vec![Some("9780123456789")]);
    assert!(flag_valid_identifiers(&mut df, "ISBN", "isbn_valid").is_err());
}

proptest! {
    /// Exactly 13 digits with any hyphen placement is valid shape.
    #[test]
    fn thirteen_digits_always_valid(digits in "[0-9]{13}", hyphen_pos in 0usize..14) {
        let mut s = digits.clone();
        s.insert(hyphen_pos.min(s.len()), '-');
        prop_assert!(is_valid_isbn13_shape(&s));
    }

    /// Any digit count other than 13 is invalid regardless of hyphens.
    #[test]
    fn wrong_digit_count_always_invalid(s in "[0-9-]{0,40}") {
        let digit_count = s.chars().filter(char::is_ascii_digit).count();
        prop_assume!(digit_count != 13);
        prop_assert!(!is_valid_isbn13_shape(&s));
    }
}
