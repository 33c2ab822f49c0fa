//! Value ordering shared by sorting, merging and filtering
//!
//! Values compare as strings in which every maximal run of ASCII digits is
//! read as one number: `"9" < "10"`, `"file2" < "file10"`. All other bytes
//! compare by value. Two values compare `Equal` only if they are byte-for-byte
//! identical (`"01"` and `"1"` differ: the run with fewer leading zeros sorts
//! first), so the order is total and agrees with `==`.

use std::cmp::Ordering;

/// Compares two queue values.
///
/// # Example
///
/// ```rust
/// use linked_queue::compare;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare("8", "13"), Ordering::Less);
/// assert_eq!(compare("a10", "a9"), Ordering::Greater);
/// assert_eq!(compare("apple", "banana"), Ordering::Less);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    let mut a = a.as_bytes();
    let mut b = b.as_bytes();

    loop {
        match (a.first(), b.first()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (digits_a, rest_a) = split_digits(a);
                let (digits_b, rest_b) = split_digits(b);
                match compare_numbers(digits_a, digits_b) {
                    Ordering::Equal => {
                        a = rest_a;
                        b = rest_b;
                    }
                    ord => return ord,
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(y);
                }
                a = &a[1..];
                b = &b[1..];
            }
        }
    }
}

/// Splits off the leading run of ASCII digits.
fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let end = s.iter().position(|c| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn compare_numbers(a: &[u8], b: &[u8]) -> Ordering {
    let trim = |s: &[u8]| -> usize { s.iter().take_while(|&&c| c == b'0').count() };
    let (sig_a, sig_b) = (&a[trim(a)..], &b[trim(b)..]);

    sig_a
        .len()
        .cmp(&sig_b.len())
        .then_with(|| sig_a.cmp(sig_b))
        .then_with(|| a.len().cmp(&b.len()))
}
