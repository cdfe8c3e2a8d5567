//! Cell address arithmetic for worksheets.
//!
//! Columns are 1-based and written in bijective base 26: `A`..`Z`, then `AA`,
//! `AB`, ... with no zero digit. A cell reference is the column letters
//! followed by the 1-based row number, e.g. `B2`.

/// Column index of a cell reference such as `"AA10"` (gives 27).
///
/// Only the leading run of ASCII letters is read, case-insensitively. A
/// reference with no leading letter (`"10"`, `"$A$1"`, `""`) gives column 1;
/// callers that care can check [`has_column_letters`] first. Absurdly long
/// letter runs saturate at `u32::MAX` instead of overflowing.
pub fn column_index_of(reference: &str) -> u32 {
    let mut index = 0u32;
    for b in reference.bytes().take_while(u8::is_ascii_alphabetic) {
        let digit = (b.to_ascii_uppercase() - b'A' + 1) as u32;
        index = index.saturating_mul(26).saturating_add(digit);
    }
    index.max(1)
}

/// Whether `reference` starts with at least one column letter.
#[inline]
pub fn has_column_letters(reference: &str) -> bool {
    reference
        .as_bytes()
        .first()
        .is_some_and(u8::is_ascii_alphabetic)
}

/// Column letters for a 1-based column index (27 gives `"AA"`).
///
/// Index 0 is outside the domain and gives an empty string.
pub fn column_letters_of(index: u32) -> String {
    // u32::MAX needs 7 letters
    let mut buf = [0u8; 7];
    let mut pos = buf.len();
    let mut n = index;

    while n > 0 {
        n -= 1;
        pos -= 1;
        buf[pos] = b'A' + (n % 26) as u8;
        n /= 26;
    }

    buf[pos..].iter().map(|&b| b as char).collect()
}

/// Cell reference for a 1-based row and column, e.g. `coordinate(2, 2) == "B2"`.
#[inline]
pub fn coordinate(row: u32, column: u32) -> String {
    let mut reference = column_letters_of(column);
    reference.push_str(&row.to_string());
    reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_index_of() {
        assert_eq!(column_index_of("A1"), 1);
        assert_eq!(column_index_of("Z9"), 26);
        assert_eq!(column_index_of("AA10"), 27);
        assert_eq!(column_index_of("az3"), 52);
        assert_eq!(column_index_of("XFD1048576"), 16384);
    }

    #[test]
    fn test_column_index_fallback() {
        assert_eq!(column_index_of(""), 1);
        assert_eq!(column_index_of("10"), 1);
        assert_eq!(column_index_of("$B$2"), 1);
        assert!(!has_column_letters("$B$2"));
        assert!(has_column_letters("b2"));
    }

    #[test]
    fn test_column_index_saturates() {
        assert_eq!(column_index_of(&"Z".repeat(40)), u32::MAX);
    }

    #[test]
    fn test_column_letters_of() {
        assert_eq!(column_letters_of(1), "A");
        assert_eq!(column_letters_of(26), "Z");
        assert_eq!(column_letters_of(27), "AA");
        assert_eq!(column_letters_of(702), "ZZ");
        assert_eq!(column_letters_of(703), "AAA");
        assert_eq!(column_letters_of(0), "");
        assert_eq!(column_letters_of(u32::MAX), "MWLQKWU");
    }

    #[test]
    fn test_coordinate() {
        assert_eq!(coordinate(2, 2), "B2");
        assert_eq!(coordinate(10, 27), "AA10");
    }

    proptest! {
        #[test]
        fn letters_round_trip(letters in "[A-Za-z]{1,3}") {
            prop_assert_eq!(column_letters_of(column_index_of(&letters)), letters.to_ascii_uppercase());
        }

        #[test]
        fn index_round_trip(index in 1u32..=100_000) {
            prop_assert_eq!(column_index_of(&coordinate(7, index)), index);
        }
    }
}
