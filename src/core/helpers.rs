//! Small shared helpers for membership toggles and field validation.

/// Minimum length enforced by [`validate_min_length`] when callers use the default.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Message returned for values shorter than `min` characters.
pub fn min_length_message(min: usize) -> String {
    format!("Must have atleast {min} characters")
}

/// Return a copy of `set` with `id` removed when present, appended otherwise.
pub fn toggle_membership<T: PartialEq + Clone>(id: &T, set: &[T]) -> Vec<T> {
    if set.contains(id) {
        set.iter().filter(|member| *member != id).cloned().collect()
    } else {
        let mut next = set.to_vec();
        next.push(id.clone());
        next
    }
}

pub fn is_member<T: PartialEq>(id: &T, set: &[T]) -> bool {
    set.contains(id)
}

/// Leading numeric text of `raw` after any whitespace: an optional sign and
/// digits, plus a decimal part and exponent when `fraction` is set.
/// Whatever follows the number is ignored, so `"12abc"` yields `"12"`.
pub fn numeric_prefix(raw: &str, fraction: bool) -> &str {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |from: usize| {
        from + bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = if matches!(bytes.first(), Some(b'+' | b'-')) { 1 } else { 0 };
    end = digits_from(end);
    if fraction {
        if bytes.get(end) == Some(&b'.') {
            end = digits_from(end + 1);
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }
    }
    &s[..end]
}

/// Validate that `value` is present and at least `min` characters long.
///
/// Returns the error message on failure, `None` when the value is acceptable.
pub fn validate_min_length(value: Option<&str>, min: usize) -> Option<String> {
    match value {
        Some(v) if v.chars().count() >= min => None,
        _ => Some(min_length_message(min)),
    }
}
