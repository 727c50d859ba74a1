use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub const KILO_OFFSET: usize = 10;
pub const MEGA_OFFSET: usize = 20;
pub const GIGA_OFFSET: usize = 30;
pub const KB: usize = 1 << KILO_OFFSET;
pub const MB: usize = 1 << MEGA_OFFSET;
pub const GB: usize = 1 << GIGA_OFFSET;

#[macro_export]
macro_rules! debugging {
    () => {
        false
    };
}

#[macro_export]
macro_rules! debug {
    () => {
        if $crate::debugging!() {
            println!();
        }
    };
    ($($arg:tt)*) => {{
        if $crate::debugging!() {
            println!($($arg)*);
        }
    }};
}

pub fn adapt_unit(size_b: usize) -> String {
    match size_b {
        s if s < KB => format!("{}B", s),
        s if s < MB => format!("{}KB", s >> KILO_OFFSET),
        s if s < GB => format!("{}MB", s >> MEGA_OFFSET),
        s => format!("{}GB", s >> GIGA_OFFSET),
    }
}

/// Mean of the measured latencies and the half-width of its 95% confidence
/// interval (normal approximation).
pub fn mean_ci(latencies: &Vec<Duration>) -> (Duration, Duration) {
    if latencies.is_empty() {
        return (Duration::default(), Duration::default());
    }

    let n = latencies.len() as f64;
    let mean = latencies.iter().map(Duration::as_secs_f64).sum::<f64>() / n;
    let variance = latencies
        .iter()
        .map(|latency| (latency.as_secs_f64() - mean).powi(2))
        .sum::<f64>()
        / n;
    let ci = 1.96 * (variance / n).sqrt();

    (Duration::from_secs_f64(mean), Duration::from_secs_f64(ci))
}

pub fn mean_ci_str(latencies: &Vec<Duration>) -> String {
    let (mean, ci) = mean_ci(latencies);
    format!("{:.3?} ± {:.3?}", mean, ci)
}

/// Deterministic pseudo-random bytes for synthetic inputs.
pub fn random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut arr = vec![0; size];
    rng.fill_bytes(&mut arr);
    arr
}

pub fn throughput_mb_s(nb_bytes: usize, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    (nb_bytes as f64 / MB as f64) / secs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_adaptation() {
        assert_eq!(adapt_unit(512), "512B");
        assert_eq!(adapt_unit(4 * KB), "4KB");
        assert_eq!(adapt_unit(16 * MB), "16MB");
        assert_eq!(adapt_unit(2 * GB), "2GB");
    }

    #[test]
    fn mean_ci_of_identical_samples_has_no_spread() {
        let latencies = vec![Duration::from_millis(10); 8];
        let (mean, ci) = mean_ci(&latencies);
        assert_eq!(mean, Duration::from_millis(10));
        assert_eq!(ci, Duration::default());
    }

    #[test]
    fn mean_ci_of_nothing_is_zero() {
        assert_eq!(mean_ci(&vec![]), (Duration::default(), Duration::default()));
    }

    #[test]
    fn random_data_is_seed_stable() {
        assert_eq!(random_data(1024, 10), random_data(1024, 10));
        assert_ne!(random_data(1024, 10), random_data(1024, 11));
    }

    #[test]
    fn throughput_over_one_second() {
        let mb_s = throughput_mb_s(8 * MB, Duration::from_secs(1));
        assert!((mb_s - 8.0).abs() < f64::EPSILON);
    }
}
