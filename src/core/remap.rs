/// Minimum volume (in litres) any allocation can receive
pub const ALLOCATION_FLOOR: i64 = 1000;

/// Map a raw fertility score to an allocated water volume
///
/// Linear remap: scale by 100, round to the nearest integer, then clamp
/// below at [`ALLOCATION_FLOOR`]. Monotonic above the floor.
pub fn allocation_volume(score: f64) -> i64 {
    let scaled = (score * 100.0).round() as i64;
    scaled.max(ALLOCATION_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_scores_hit_the_floor() {
        assert_eq!(allocation_volume(0.0), 1000);
        assert_eq!(allocation_volume(5.0), 1000);
        assert_eq!(allocation_volume(9.99), 1000);
        assert_eq!(allocation_volume(-3.0), 1000);
    }

    #[test]
    fn test_floor_boundary_is_exact() {
        // 10.0 scales to exactly the floor; the next hundredth clears it
        assert_eq!(allocation_volume(10.0), 1000);
        assert_eq!(allocation_volume(10.01), 1001);
    }

    #[test]
    fn test_scale_and_round_above_floor() {
        assert_eq!(allocation_volume(12.345), 1235);
        assert_eq!(allocation_volume(20.0), 2000);
        assert_eq!(allocation_volume(87.654), 8765);
    }

    #[test]
    fn test_remap_is_monotonic() {
        let scores = [0.0, 2.5, 9.99, 10.0, 15.3, 42.0, 99.9];
        let volumes: Vec<i64> = scores.iter().map(|s| allocation_volume(*s)).collect();

        for pair in volumes.windows(2) {
            assert!(pair[0] <= pair[1], "volumes not monotonic: {:?}", volumes);
        }
    }
}
