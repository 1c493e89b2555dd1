//! Session seed selection: an explicit `--seed` flag wins, otherwise a
//! runtime seed is mixed from clock, pid, and a process-local counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    mix_seed((now_nanos as u64) ^ ((now_nanos >> 64) as u64) ^ pid.rotate_left(21) ^ counter)
}

pub fn resolve_seed_from_args(args: &[String], generated_seed: u64) -> Result<SeedChoice, String> {
    let mut selected = None;
    let mut pending_value = false;

    for argument in args.iter().skip(1) {
        if pending_value {
            set_once(&mut selected, parse_seed_value(argument)?)?;
            pending_value = false;
            continue;
        }
        if argument == "--seed" {
            pending_value = true;
        } else if let Some(raw) = argument.strip_prefix("--seed=") {
            set_once(&mut selected, parse_seed_value(raw)?)?;
        }
    }
    if pending_value {
        return Err("missing value for --seed".to_string());
    }

    Ok(match selected {
        Some(seed) => SeedChoice::Cli(seed),
        None => SeedChoice::Generated(generated_seed),
    })
}

fn set_once(slot: &mut Option<u64>, seed: u64) -> Result<(), String> {
    if slot.is_some() {
        return Err("seed provided more than once".to_string());
    }
    *slot = Some(seed);
    Ok(())
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn falls_back_to_the_generated_seed() {
        let choice = resolve_seed_from_args(&as_args(&["game"]), 31_337).unwrap();
        assert_eq!(choice, SeedChoice::Generated(31_337));
    }

    #[test]
    fn parses_separate_and_inline_flag_forms() {
        let separate = resolve_seed_from_args(&as_args(&["game", "--seed", "4242"]), 1).unwrap();
        assert_eq!(separate, SeedChoice::Cli(4_242));
        let inline = resolve_seed_from_args(&as_args(&["game", "--seed=2026"]), 1).unwrap();
        assert_eq!(inline, SeedChoice::Cli(2_026));
    }

    #[test]
    fn rejects_missing_or_malformed_values() {
        assert!(resolve_seed_from_args(&as_args(&["game", "--seed"]), 1).is_err());
        assert!(resolve_seed_from_args(&as_args(&["game", "--seed=abc"]), 1).is_err());
    }

    #[test]
    fn rejects_a_duplicate_seed_flag() {
        let err = resolve_seed_from_args(&as_args(&["game", "--seed=1", "--seed", "2"]), 1)
            .unwrap_err();
        assert!(err.contains("more than once"), "{err}");
    }

    #[test]
    fn generated_seeds_differ_between_calls() {
        assert_ne!(generate_runtime_seed(), generate_runtime_seed());
    }
}
