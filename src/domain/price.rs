// src/domain/price.rs

/// Convert a Korean price string to an integer amount in KRW.
///
/// "15억" -> 1_500_000_000, "3억 5,000" -> 350_000_000. The remainder after
/// 억 is in 만원 units. Plain digit strings pass through; anything else is 0.
pub fn clean_price(price: &str) -> i64 {
    let cleaned = price.replace(',', "");
    let cleaned = cleaned.trim();

    if let Some((eok_part, man_part)) = cleaned.split_once('억') {
        let eok_part = eok_part.trim();
        let man_part = man_part.trim();

        let eok_val = if eok_part.is_empty() {
            0
        } else {
            eok_part.parse::<i64>().unwrap_or(0) * 100_000_000
        };
        let man_val = if man_part.is_empty() {
            0
        } else {
            man_part.parse::<i64>().unwrap_or(0) * 10_000
        };

        eok_val + man_val
    } else {
        cleaned.parse::<i64>().unwrap_or(0)
    }
}

/// Format a KRW amount in 억 units for display, e.g. 1_050_000_000 -> "10.5억".
pub fn format_eok(amount: i64) -> String {
    format!("{:.1}억", amount as f64 / 100_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_eok() {
        assert_eq!(clean_price("15억"), 1_500_000_000);
    }

    #[test]
    fn parses_eok_with_remainder() {
        assert_eq!(clean_price("3억 5,000"), 350_000_000);
        assert_eq!(clean_price("10억 5,000"), 1_050_000_000);
    }

    #[test]
    fn parses_plain_digits() {
        assert_eq!(clean_price("25000"), 25_000);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(clean_price("가격협의"), 0);
        assert_eq!(clean_price(""), 0);
    }

    #[test]
    fn formats_eok() {
        assert_eq!(format_eok(1_050_000_000), "10.5억");
        assert_eq!(format_eok(350_000_000), "3.5억");
    }
}
