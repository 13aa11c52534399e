// crates/regionmap-core/src/labels.rs

//! # Label Placement
//!
//! Greedy, first-seen-wins collision filter over candidate label anchors.
//! A candidate survives only when it keeps at least the minimum separation
//! from every label accepted before it. Rejected labels are dropped, never
//! moved or merged.

use crate::geometry::LatLng;

/// Minimum separation between two label anchors, in coordinate degrees.
pub const DEFAULT_MIN_SEPARATION: f64 = 0.02;

/// A label candidate: something to show at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCandidate<T> {
    pub item: T,
    pub at: LatLng,
}

impl<T> LabelCandidate<T> {
    pub fn new(item: T, at: LatLng) -> Self {
        Self { item, at }
    }
}

/// Lazy iterator returned by [`place_labels`].
///
/// Yields accepted candidates in input order. It is driven once per dataset
/// load; every `next` call only looks at the anchors already accepted.
pub struct LabelPlacer<I> {
    candidates: I,
    accepted: Vec<LatLng>,
    min_separation: f64,
}

impl<I, T> Iterator for LabelPlacer<I>
where
    I: Iterator<Item = LabelCandidate<T>>,
{
    type Item = LabelCandidate<T>;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref() {
            let too_close = self
                .accepted
                .iter()
                .any(|p| p.distance(&candidate.at) < self.min_separation);
            if too_close {
                continue;
            }
            self.accepted.push(candidate.at);
            return Some(candidate);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.candidates.size_hint().1)
    }
}

impl<I, T> std::iter::FusedIterator for LabelPlacer<I> where
    I: std::iter::FusedIterator<Item = LabelCandidate<T>>
{
}

/// Filters `candidates` so that accepted anchors are pairwise at least
/// `min_separation` apart.
///
/// # Example
///
/// ```rust
/// use regionmap_core::geometry::LatLng;
/// use regionmap_core::labels::{place_labels, LabelCandidate};
///
/// let candidates = vec![
///     LabelCandidate::new("A", LatLng::new(1.0, 99.0)),
///     LabelCandidate::new("B", LatLng::new(1.001, 99.0)),
///     LabelCandidate::new("C", LatLng::new(1.5, 99.0)),
/// ];
/// let kept: Vec<_> = place_labels(candidates, 0.02).map(|c| c.item).collect();
/// assert_eq!(kept, ["A", "C"]);
/// ```
pub fn place_labels<C, T>(candidates: C, min_separation: f64) -> LabelPlacer<C::IntoIter>
where
    C: IntoIterator<Item = LabelCandidate<T>>,
{
    LabelPlacer {
        candidates: candidates.into_iter(),
        accepted: Vec::new(),
        min_separation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(name: &'static str, lat: f64, lng: f64) -> LabelCandidate<&'static str> {
        LabelCandidate::new(name, LatLng::new(lat, lng))
    }

    #[test]
    fn first_of_two_close_points_wins() {
        let kept: Vec<_> = place_labels(vec![c("A", 0.0, 0.0), c("B", 0.0, 0.001)], 0.02)
            .map(|c| c.item)
            .collect();
        assert_eq!(kept, ["A"]);

        let kept: Vec<_> = place_labels(vec![c("B", 0.0, 0.001), c("A", 0.0, 0.0)], 0.02)
            .map(|c| c.item)
            .collect();
        assert_eq!(kept, ["B"]);
    }

    #[test]
    fn exactly_min_separation_is_accepted() {
        let kept = place_labels(vec![c("A", 0.0, 0.0), c("B", 0.0, 0.5)], 0.5).count();
        assert_eq!(kept, 2);
    }

    #[test]
    fn rejected_points_do_not_block_later_ones() {
        // B is dropped for being close to A; C is close to B but far from A.
        let kept: Vec<_> = place_labels(
            vec![c("A", 0.0, 0.0), c("B", 0.0, 0.015), c("C", 0.0, 0.025)],
            0.02,
        )
        .map(|c| c.item)
        .collect();
        assert_eq!(kept, ["A", "C"]);
    }

    #[test]
    fn accepted_pairs_respect_separation() {
        let mut candidates = Vec::new();
        for i in 0..40 {
            for j in 0..40 {
                let lat = 1.7 + (i as f64) * 0.007 + ((i * j) % 3) as f64 * 0.001;
                let lng = 98.8 + (j as f64) * 0.009;
                candidates.push(LabelCandidate::new((i, j), LatLng::new(lat, lng)));
            }
        }
        let kept: Vec<_> = place_labels(candidates, DEFAULT_MIN_SEPARATION).collect();
        assert!(!kept.is_empty());
        for (n, a) in kept.iter().enumerate() {
            for b in &kept[n + 1..] {
                assert!(a.at.distance(&b.at) >= DEFAULT_MIN_SEPARATION);
            }
        }
    }

    #[test]
    fn placement_is_lazy() {
        let mut seen = 0;
        let source = (0..1000).map(|i| {
            seen += 1;
            c("x", i as f64, 0.0)
        });
        let first: Vec<_> = place_labels(source, 0.5).take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(seen, 2);
    }
}
