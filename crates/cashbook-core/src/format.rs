//! Currency and sort-code formatting.

use std::sync::OnceLock;

use regex::Regex;

static SORT_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn sort_code_regex() -> &'static Regex {
    SORT_CODE_REGEX.get_or_init(|| {
        Regex::new(r"^(\d\d)(-?((\d\d)(-?(\d\d)?)?)?)?$").expect("sort code regex is valid")
    })
}

/// Parses a `data-amount` value in pounds into pence.
///
/// Anything that is not a finite number counts as zero.
pub fn parse_pence(amount: &str) -> i64 {
    match amount.trim().parse::<f64>() {
        Ok(pounds) if pounds.is_finite() => (pounds * 100.0).round() as i64,
        _ => {
            tracing::debug!(amount, "Ignoring unparsable amount");
            0
        },
    }
}

/// Inserts `,` between groups of three digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats pence as `£1,234.50`.
pub fn format_pounds(pence: i64) -> String {
    let sign = if pence < 0 { "-" } else { "" };
    let pence = pence.unsigned_abs();
    let pounds = group_thousands(&(pence / 100).to_string());
    format!("£{sign}{pounds}.{:02}", pence % 100)
}

/// Cleans and regroups sort-code input as the user types.
///
/// Everything except digits and hyphens is dropped. If what remains is a
/// prefix of a sort code it is regrouped as `NN-NN-NN`; otherwise the
/// cleaned text is returned unchanged.
pub fn format_sort_code(input: &str) -> String {
    let cleaned: String = input.chars().filter(|c| c.is_ascii_digit() || *c == '-').collect();
    let Some(caps) = sort_code_regex().captures(&cleaned) else {
        return cleaned;
    };
    let mut out = String::with_capacity(8);
    for group in [1, 4, 6] {
        if let Some(m) = caps.get(group) {
            if !out.is_empty() {
                out.push('-');
            }
            out.push_str(m.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pence() {
        assert_eq!(parse_pence("12.50"), 1250);
        assert_eq!(parse_pence(" 0.1 "), 10);
        assert_eq!(parse_pence("1000"), 100_000);
        assert_eq!(parse_pence("abc"), 0);
        assert_eq!(parse_pence(""), 0);
        assert_eq!(parse_pence("NaN"), 0);
    }

    #[test]
    fn test_format_pounds() {
        assert_eq!(format_pounds(0), "£0.00");
        assert_eq!(format_pounds(5), "£0.05");
        assert_eq!(format_pounds(123_456_789), "£1,234,567.89");
        assert_eq!(format_pounds(100_000), "£1,000.00");
        assert_eq!(format_pounds(-1250), "£-12.50");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }

    #[test]
    fn test_sort_code_regrouping() {
        assert_eq!(format_sort_code("112233"), "11-22-33");
        assert_eq!(format_sort_code("11 22 33"), "11-22-33");
        assert_eq!(format_sort_code("11-2233"), "11-22-33");
        assert_eq!(format_sort_code("1122"), "11-22");
        assert_eq!(format_sort_code("12-"), "12");
        assert_eq!(format_sort_code("1"), "1");
        assert_eq!(format_sort_code(""), "");
    }

    #[test]
    fn test_sort_code_keeps_non_matching_input_cleaned() {
        assert_eq!(format_sort_code("123"), "123");
        assert_eq!(format_sort_code("1122334"), "1122334");
        assert_eq!(format_sort_code("a1b2c"), "12");
        assert_eq!(format_sort_code("11--22"), "11--22");
    }

    #[test]
    fn test_sort_code_is_idempotent() {
        for input in ["112233", "11-22", "1", "123", "ab-12-3x4", "11223344"] {
            let once = format_sort_code(input);
            assert_eq!(format_sort_code(&once), once, "input {input:?}");
        }
    }
}
