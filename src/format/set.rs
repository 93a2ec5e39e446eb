use crate::number::Real;
use crate::set::{Bound, Interval, RealSubset};

pub const WHOLE_LINE: &str = "All real numbers (-∞, ∞)";

/// Interval notation for a subset of the reals.
///
/// Union members print left to right joined by ` ∪ `, whatever order they
/// are stored in.
pub fn format_real_subset(set: &RealSubset) -> String {
    match set {
        RealSubset::WholeLine => WHOLE_LINE.to_string(),
        RealSubset::Interval(interval) => format_interval(interval),
        RealSubset::Union(parts) => {
            let mut parts: Vec<&RealSubset> = parts.iter().collect();
            parts.sort_by(|a, b| match (sort_key(a), sort_key(b)) {
                (Some(x), Some(y)) => x.display_order(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
            parts
                .into_iter()
                .map(format_real_subset)
                .collect::<Vec<_>>()
                .join(" ∪ ")
        }
        RealSubset::Finite(points) => format_points(points),
        RealSubset::Empty => "∅".to_string(),
    }
}

fn format_interval(interval: &Interval) -> String {
    let open_lower = interval.lower_open || !interval.lower.is_finite();
    let open_upper = interval.upper_open || !interval.upper.is_finite();
    format!(
        "{}{}, {}{}",
        if open_lower { '(' } else { '[' },
        format_bound(&interval.lower),
        format_bound(&interval.upper),
        if open_upper { ')' } else { ']' },
    )
}

fn format_bound(bound: &Bound) -> String {
    match bound {
        Bound::NegInfinity => "-∞".to_string(),
        Bound::Finite(value) => value.to_string(),
        Bound::PosInfinity => "∞".to_string(),
    }
}

fn format_points(points: &[Real]) -> String {
    let mut points: Vec<&Real> = points.iter().collect();
    points.sort_by(|a, b| a.cmp_value(b));
    let body = points
        .into_iter()
        .map(Real::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

// Smallest piece of a union member, used to order members for display.
fn sort_key(set: &RealSubset) -> Option<Interval> {
    set.pieces()
        .into_iter()
        .min_by(|a, b| a.display_order(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_points() {
        assert_eq!(format_real_subset(&RealSubset::Empty), "∅");
        assert_eq!(
            format_real_subset(&RealSubset::Finite(vec![Real::integer(3), Real::integer(-1)])),
            "{-1, 3}"
        );
    }

    #[test]
    fn infinite_ends_print_open() {
        let interval = Interval {
            lower: Bound::NegInfinity,
            upper: Bound::Finite(Real::integer(2)),
            lower_open: false,
            upper_open: false,
        };
        assert_eq!(format_interval(&interval), "(-∞, 2]");
    }
}
