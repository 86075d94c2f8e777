//! Money primitives. Every amount in the system is integer paise; rupees only
//! exist at the formatting boundary.

/// Integer minor-currency units (1 rupee = 100 paise).
pub type Paise = i64;

/// Flat MVP convenience fee (₹249) applied when a cart carries none.
pub const DEFAULT_CONVENIENCE_FEE: Paise = 24_900;

/// Convert whole rupees to paise.
pub fn to_paise(rupees: i64) -> Paise {
    rupees * 100
}

/// Percentage of an amount, rounded half away from zero (`Math.round`
/// semantics for non-negative operands). The rate is the only float in the
/// pipeline; the result is integer paise.
pub fn percent_of(amount: Paise, percent: f64) -> Paise {
    ((amount as f64) * percent / 100.0).round() as Paise
}

/// Format paise as rupees with Indian digit grouping, e.g. `₹1,23,456` or
/// `₹249.50`. Fractional rupees are shown only when present.
pub fn format_inr(paise: Paise) -> String {
    let rupees = paise / 100;
    let rem = paise % 100;
    if rem == 0 {
        format!("\u{20B9}{}", group_indian(rupees))
    } else {
        format!("\u{20B9}{}.{:02}", group_indian(rupees), rem)
    }
}

/// Indian grouping: last three digits, then groups of two.
fn group_indian(n: i64) -> String {
    let digits = n.abs().to_string();
    let sign = if n < 0 { "-" } else { "" };
    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{sign}{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_paise() {
        assert_eq!(to_paise(18570), 1_857_000);
        assert_eq!(to_paise(249), 24_900);
    }

    #[test]
    fn test_percent_rounds_half_away_from_zero() {
        assert_eq!(percent_of(20_000, 5.0), 1_000);
        // 50 * 1% = 0.5 -> rounds up, not to even
        assert_eq!(percent_of(50, 1.0), 1);
        assert_eq!(percent_of(250, 1.0), 3);
        assert_eq!(percent_of(0, 5.0), 0);
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(group_indian(600), "600");
        assert_eq!(group_indian(1_200), "1,200");
        assert_eq!(group_indian(123_456), "1,23,456");
        assert_eq!(group_indian(10_000_000), "1,00,00,000");
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(60_000), "\u{20B9}600");
        assert_eq!(format_inr(120_000), "\u{20B9}1,200");
        assert_eq!(format_inr(24_950), "\u{20B9}249.50");
    }
}
