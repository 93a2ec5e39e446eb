//! Subsets of the real line: intervals, unions and finite point sets.

use std::cmp::Ordering;

use crate::number::Real;

#[derive(Clone, Debug, PartialEq)]
pub enum Bound {
    NegInfinity,
    Finite(Real),
    PosInfinity,
}

impl Bound {
    pub fn is_finite(&self) -> bool {
        matches!(self, Bound::Finite(_))
    }

    pub fn as_real(&self) -> Option<&Real> {
        match self {
            Bound::Finite(r) => Some(r),
            _ => None,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Bound::NegInfinity => f64::NEG_INFINITY,
            Bound::Finite(r) => r.to_f64(),
            Bound::PosInfinity => f64::INFINITY,
        }
    }

    /// Total order with the infinities at the ends.
    pub fn compare(&self, other: &Bound) -> Ordering {
        match (self, other) {
            (Bound::NegInfinity, Bound::NegInfinity) | (Bound::PosInfinity, Bound::PosInfinity) => {
                Ordering::Equal
            }
            (Bound::NegInfinity, _) | (_, Bound::PosInfinity) => Ordering::Less,
            (_, Bound::NegInfinity) | (Bound::PosInfinity, _) => Ordering::Greater,
            (Bound::Finite(a), Bound::Finite(b)) => a.cmp_value(b),
        }
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl From<Real> for Bound {
    fn from(value: Real) -> Self {
        Bound::Finite(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    pub lower: Bound,
    pub upper: Bound,
    pub lower_open: bool,
    pub upper_open: bool,
}

impl Interval {
    /// Infinite ends are always stored open.
    pub fn new(lower: Bound, upper: Bound, lower_open: bool, upper_open: bool) -> Self {
        let lower_open = lower_open || !lower.is_finite();
        let upper_open = upper_open || !upper.is_finite();
        Interval {
            lower,
            upper,
            lower_open,
            upper_open,
        }
    }

    pub fn open(lower: Bound, upper: Bound) -> Self {
        Interval::new(lower, upper, true, true)
    }

    pub fn closed(lower: Bound, upper: Bound) -> Self {
        Interval::new(lower, upper, false, false)
    }

    pub fn point(value: Real) -> Self {
        Interval::closed(Bound::Finite(value.clone()), Bound::Finite(value))
    }

    pub fn is_empty(&self) -> bool {
        match self.lower.compare(&self.upper) {
            Ordering::Greater => true,
            Ordering::Equal => self.lower_open || self.upper_open,
            Ordering::Less => false,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.lower.compare(&self.upper) == Ordering::Equal && !self.is_empty()
    }

    pub fn is_whole_line(&self) -> bool {
        self.lower == Bound::NegInfinity && self.upper == Bound::PosInfinity
    }

    pub fn contains(&self, value: &Real) -> bool {
        let point = Bound::Finite(value.clone());
        let above = match self.lower.compare(&point) {
            Ordering::Less => true,
            Ordering::Equal => !self.lower_open,
            Ordering::Greater => false,
        };
        let below = match point.compare(&self.upper) {
            Ordering::Less => true,
            Ordering::Equal => !self.upper_open,
            Ordering::Greater => false,
        };
        above && below
    }

    pub fn contains_f64(&self, x: f64) -> bool {
        let (lo, hi) = (self.lower.to_f64(), self.upper.to_f64());
        let above = if self.lower_open { x > lo } else { x >= lo };
        let below = if self.upper_open { x < hi } else { x <= hi };
        above && below
    }

    /// Ordering used for display and merging: lower bound, then upper bound,
    /// then a closed lower end before an open one.
    pub fn display_order(&self, other: &Interval) -> Ordering {
        self.lower
            .compare(&other.lower)
            .then_with(|| self.upper.compare(&other.upper))
            .then_with(|| self.lower_open.cmp(&other.lower_open))
    }

    fn without_point(&self, value: &Real) -> Vec<Interval> {
        if !self.contains(value) {
            return vec![self.clone()];
        }
        let point = Bound::Finite(value.clone());
        let left = Interval::new(self.lower.clone(), point.clone(), self.lower_open, true);
        let right = Interval::new(point, self.upper.clone(), true, self.upper_open);
        [left, right].into_iter().filter(|i| !i.is_empty()).collect()
    }

    // Overlapping, or touching with at least one closed end.
    fn joins(&self, next: &Interval) -> bool {
        match self.upper.compare(&next.lower) {
            Ordering::Greater => true,
            Ordering::Equal => !(self.upper_open && next.lower_open),
            Ordering::Less => false,
        }
    }

    fn merge(&mut self, next: Interval) {
        match self.upper.compare(&next.upper) {
            Ordering::Less => {
                self.upper = next.upper;
                self.upper_open = next.upper_open;
            }
            Ordering::Equal => self.upper_open = self.upper_open && next.upper_open,
            Ordering::Greater => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RealSubset {
    WholeLine,
    Interval(Interval),
    Union(Vec<RealSubset>),
    Finite(Vec<Real>),
    Empty,
}

impl RealSubset {
    pub fn interval(interval: Interval) -> Self {
        RealSubset::from_pieces(vec![interval])
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().is_empty()
    }

    /// The set as disjoint-or-not intervals; points become degenerate intervals.
    pub fn pieces(&self) -> Vec<Interval> {
        match self {
            RealSubset::WholeLine => vec![Interval::open(Bound::NegInfinity, Bound::PosInfinity)],
            RealSubset::Interval(i) if i.is_empty() => Vec::new(),
            RealSubset::Interval(i) => vec![i.clone()],
            RealSubset::Union(parts) => parts.iter().flat_map(RealSubset::pieces).collect(),
            RealSubset::Finite(points) => points.iter().cloned().map(Interval::point).collect(),
            RealSubset::Empty => Vec::new(),
        }
    }

    pub fn contains(&self, value: &Real) -> bool {
        self.pieces().iter().any(|i| i.contains(value))
    }

    pub fn contains_f64(&self, x: f64) -> bool {
        self.pieces().iter().any(|i| i.contains_f64(x))
    }

    /// The set minus finitely many points.
    pub fn remove_points(&self, points: &[Real]) -> RealSubset {
        let mut pieces = self.pieces();
        for point in points {
            pieces = pieces
                .iter()
                .flat_map(|piece| piece.without_point(point))
                .collect();
        }
        RealSubset::from_pieces(pieces)
    }

    /// Union of sets: sorted, with overlapping or touching pieces merged.
    pub fn union(sets: impl IntoIterator<Item = RealSubset>) -> RealSubset {
        let mut pieces: Vec<Interval> = sets
            .into_iter()
            .flat_map(|s| s.pieces())
            .filter(|i| !i.is_empty())
            .collect();
        pieces.sort_by(Interval::display_order);

        let mut merged: Vec<Interval> = Vec::new();
        for piece in pieces {
            match merged.last_mut() {
                Some(last) if last.joins(&piece) => last.merge(piece),
                _ => merged.push(piece),
            }
        }
        RealSubset::from_pieces(merged)
    }

    fn from_pieces(mut pieces: Vec<Interval>) -> RealSubset {
        pieces.retain(|i| !i.is_empty());
        if pieces.iter().any(Interval::is_whole_line) {
            return RealSubset::WholeLine;
        }
        if !pieces.is_empty() && pieces.iter().all(Interval::is_degenerate) {
            return RealSubset::Finite(
                pieces
                    .into_iter()
                    .filter_map(|i| i.lower.as_real().cloned())
                    .collect(),
            );
        }
        let mut parts: Vec<RealSubset> = pieces
            .into_iter()
            .map(|i| match i.lower.as_real() {
                Some(point) if i.is_degenerate() => RealSubset::Finite(vec![point.clone()]),
                _ => RealSubset::Interval(i),
            })
            .collect();
        match parts.len() {
            0 => RealSubset::Empty,
            1 => parts.remove(0),
            _ => RealSubset::Union(parts),
        }
    }
}
