//! IMDb (1-10) <-> Letterboxd (0.5-5 stars) rating conversion.
//!
//! The mapping is deliberately non-linear: IMDb 1 and 2 are rarely used, so
//! both land on half a star, and 2.5 stars folds into IMDb 5.

/// Stars for IMDb scores 1..=10, indexed by `score - 1`.
const TEN_TO_STARS: [f64; 10] = [0.5, 0.5, 1.0, 1.5, 2.0, 3.0, 3.5, 4.0, 4.5, 5.0];

const STARS_TO_TEN: [(f64, i32); 10] = [
    (0.5, 2),
    (1.0, 3),
    (1.5, 4),
    (2.0, 5),
    (2.5, 5),
    (3.0, 6),
    (3.5, 7),
    (4.0, 8),
    (4.5, 9),
    (5.0, 10),
];

/// Returned by [`to_ten_scale`] when the rounded value misses the table.
/// Not reachable for finite input.
pub const TEN_SCALE_FALLBACK: i32 = 5;

/// Convert an IMDb score to stars. Input is clamped to 1..=10.
pub fn to_half_step_scale(score: i32) -> f64 {
    let idx = (score.clamp(1, 10) - 1) as usize;
    TEN_TO_STARS[idx]
}

/// Convert stars to an IMDb score. Rounds to the nearest half star (halves
/// round up) and clamps to 0.5..=5.0 first.
pub fn to_ten_scale(stars: f64) -> i32 {
    let rounded = ((stars * 2.0).round() / 2.0).clamp(0.5, 5.0);
    match STARS_TO_TEN.iter().find(|(s, _)| *s == rounded) {
        Some(&(_, score)) => score,
        None => {
            log::warn!("rating {stars} has no ten-scale entry, using {TEN_SCALE_FALLBACK}");
            TEN_SCALE_FALLBACK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_to_stars_table() {
        let expected = [0.5, 0.5, 1.0, 1.5, 2.0, 3.0, 3.5, 4.0, 4.5, 5.0];
        for (score, stars) in (1..=10).zip(expected) {
            assert_eq!(to_half_step_scale(score), stars, "score {score}");
        }
    }

    #[test]
    fn ten_to_stars_clamps() {
        assert_eq!(to_half_step_scale(0), 0.5);
        assert_eq!(to_half_step_scale(-3), 0.5);
        assert_eq!(to_half_step_scale(11), 5.0);
        assert_eq!(to_half_step_scale(i32::MAX), 5.0);
    }

    #[test]
    fn stars_to_ten_table() {
        let cases = [
            (0.5, 2),
            (1.0, 3),
            (1.5, 4),
            (2.0, 5),
            (2.5, 5),
            (3.0, 6),
            (3.5, 7),
            (4.0, 8),
            (4.5, 9),
            (5.0, 10),
        ];
        for (stars, score) in cases {
            assert_eq!(to_ten_scale(stars), score, "stars {stars}");
        }
    }

    #[test]
    fn stars_round_to_half_then_clamp() {
        assert_eq!(to_ten_scale(3.74), 7); // 3.5
        assert_eq!(to_ten_scale(3.75), 8); // half up -> 4.0
        assert_eq!(to_ten_scale(0.2), 2); // 0.0 -> clamped 0.5
        assert_eq!(to_ten_scale(0.0), 2);
        assert_eq!(to_ten_scale(-1.0), 2);
        assert_eq!(to_ten_scale(7.0), 10);
    }

    #[test]
    fn non_finite_falls_back() {
        assert_eq!(to_ten_scale(f64::NAN), TEN_SCALE_FALLBACK);
        assert_eq!(to_ten_scale(f64::INFINITY), 10);
    }
}
