use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Maps an id to a stable point in `[-1, 1] x [-1, 1]`, uniform over ids.
/// Used for deterministic initial node placement.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn format_count(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 10_000 {
        format!("{:.1}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("src/parser.rs");
        let (x2, y2) = stable_pair("src/parser.rs");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }

    #[test]
    fn format_count_picks_units() {
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(12_500), "12.5k");
        assert_eq!(format_count(3_200_000), "3.2M");
    }
}
