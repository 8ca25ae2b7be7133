//! Genre-aware ordering
//!
//! Groups the set into genre blocks, visits blocks in affinity order
//! starting from the largest, and smooths each block internally.

use crate::config::SequenceOptions;
use crate::strategies::greedy::{Consistent, HarmonicFlow};
use crate::strategies::traits::OrderingStrategy;
use crate::strategies::{collect_order, first_max_by};
use crate::types::Track;

/// Bucket label for tracks without a usable genre
pub const MIXED_BUCKET: &str = "Mixed";

/// Known close relationships between genres (symmetric, lowercase)
const GENRE_AFFINITY: &[(&str, &str, f64)] = &[
    ("house", "deep house", 0.9),
    ("house", "tech house", 0.9),
    ("house", "progressive house", 0.85),
    ("house", "disco", 0.8),
    ("tech house", "techno", 0.85),
    ("techno", "minimal", 0.85),
    ("techno", "hard techno", 0.9),
    ("progressive house", "trance", 0.8),
    ("trance", "progressive trance", 0.9),
    ("drum & bass", "jungle", 0.9),
    ("drum & bass", "dubstep", 0.6),
    ("dubstep", "trap", 0.7),
    ("hip hop", "r&b", 0.8),
    ("hip hop", "trap", 0.8),
    ("disco", "funk", 0.85),
    ("pop", "dance", 0.8),
];

/// Affinity for pairs missing from the table, before weighting
const DEFAULT_AFFINITY: f64 = 0.5;

/// Genre blocks joined in affinity order; falls back to Harmonic Flow when
/// genre mixing is disabled.
pub struct GenreFlow;

impl OrderingStrategy for GenreFlow {
    fn arrange(&self, tracks: &[Track], tolerance: f64, options: &SequenceOptions) -> Vec<Track> {
        if tracks.len() < 2 {
            return tracks.to_vec();
        }
        if !options.genre_mixing {
            return HarmonicFlow.arrange(tracks, tolerance, options);
        }

        let buckets = bucket_by_genre(tracks);
        let mut ordered = Vec::with_capacity(tracks.len());
        for bucket in visit_order(&buckets, options.genre_weight) {
            let (_, members) = &buckets[bucket];
            let block = collect_order(tracks, members);
            ordered.extend(Consistent.arrange(&block, tolerance, options));
        }
        ordered
    }

    fn name(&self) -> &'static str {
        "genre-flow"
    }
}

/// Group track indices by genre, buckets in order of first appearance
fn bucket_by_genre(tracks: &[Track]) -> Vec<(String, Vec<usize>)> {
    let mut buckets: Vec<(String, Vec<usize>)> = Vec::new();
    for (i, track) in tracks.iter().enumerate() {
        let label = if track.has_unknown_genre()
            || track.genre.trim().eq_ignore_ascii_case(MIXED_BUCKET)
        {
            MIXED_BUCKET.to_string()
        } else {
            track.genre.trim().to_lowercase()
        };
        match buckets.iter_mut().find(|(name, _)| *name == label) {
            Some((_, members)) => members.push(i),
            None => buckets.push((label, vec![i])),
        }
    }
    buckets
}

/// Start at the largest bucket, then keep moving to the unvisited bucket
/// with the highest affinity to the current one
fn visit_order(buckets: &[(String, Vec<usize>)], genre_weight: f64) -> Vec<usize> {
    let Some(start) = first_max_by(buckets, |(_, members)| members.len() as f64) else {
        return vec![];
    };

    let mut unvisited: Vec<usize> = (0..buckets.len()).filter(|&b| b != start).collect();
    let mut order = vec![start];
    while !unvisited.is_empty() {
        let current = &buckets[order[order.len() - 1]].0;
        let pos = first_max_by(&unvisited, |&b| genre_affinity(current, &buckets[b].0, genre_weight))
            .unwrap_or(0);
        order.push(unvisited.remove(pos));
    }
    order
}

/// Affinity between two genre labels, scaled down as `genre_weight`
/// (preference for keeping genres apart) grows
pub fn genre_affinity(a: &str, b: &str, genre_weight: f64) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    let base = GENRE_AFFINITY
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, affinity)| *affinity)
        .unwrap_or(DEFAULT_AFFINITY);
    base * (1.0 - genre_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::*;

    #[test]
    fn test_affinity_lookup() {
        assert_eq!(genre_affinity("House", "Tech House", 0.0), 0.9);
        assert_eq!(genre_affinity("tech house", "house", 0.0), 0.9);
        assert_eq!(genre_affinity("House", "Jungle", 0.0), 0.5);
        assert_eq!(genre_affinity("House", "Jungle", 0.3), 0.5 * (1.0 - 0.3));
        assert_eq!(genre_affinity("House", "Deep House", 1.0), 0.0);
    }

    #[test]
    fn test_buckets_fold_unknown_into_mixed() {
        let tracks = vec![
            Track::new("a", 124.0, "8A", 50).with_genre("House"),
            Track::new("b", 124.0, "8A", 50),
            Track::new("c", 124.0, "8A", 50).with_genre("house"),
            Track::new("d", 124.0, "8A", 50).with_genre(""),
        ];
        let buckets = bucket_by_genre(&tracks);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0], ("house".to_string(), vec![0, 2]));
        assert_eq!(buckets[1], (MIXED_BUCKET.to_string(), vec![1, 3]));
    }

    #[test]
    fn test_literal_mixed_genre_shares_the_mixed_bucket() {
        let tracks = vec![
            Track::new("a", 124.0, "8A", 50),
            Track::new("b", 124.0, "8A", 50).with_genre("Mixed"),
            Track::new("c", 124.0, "8A", 50).with_genre(" mixed "),
        ];
        let buckets = bucket_by_genre(&tracks);
        assert_eq!(buckets, vec![(MIXED_BUCKET.to_string(), vec![0, 1, 2])]);
    }

    #[test]
    fn test_genre_blocks_stay_contiguous() {
        let tracks = vec![
            Track::new("h1", 124.0, "8A", 50).with_genre("House"),
            Track::new("j1", 170.0, "8A", 80).with_genre("Jungle"),
            Track::new("h2", 125.0, "9A", 55).with_genre("House"),
            Track::new("t1", 126.0, "8A", 60).with_genre("Tech House"),
            Track::new("h3", 123.0, "8A", 45).with_genre("House"),
        ];
        let out = GenreFlow.arrange(&tracks, 6.0, &SequenceOptions::default());
        let genres: Vec<&str> = out.iter().map(|t| t.genre.as_str()).collect();
        // House is largest, Tech House is closest to it, Jungle last
        assert_eq!(genres, vec!["House", "House", "House", "Tech House", "Jungle"]);
        assert!(is_permutation(&tracks, &out));
    }

    #[test]
    fn test_disabled_mixing_delegates_to_harmonic_flow() {
        let tracks = sample_set();
        let options = SequenceOptions {
            genre_mixing: false,
            ..Default::default()
        };
        assert_eq!(
            GenreFlow.arrange(&tracks, 6.0, &options),
            HarmonicFlow.arrange(&tracks, 6.0, &options)
        );
    }
}
