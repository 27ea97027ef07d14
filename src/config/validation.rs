//! Configuration checks using Validation.
//!
//! Every rule is evaluated and all failures are reported together, so an
//! operator fixing a config file sees the whole list in one pass.

use crate::config::error::ConfigViolation;
use crate::config::MachineConfig;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Largest accepted delay: the width of a 32-bit millisecond counter.
pub const MAX_DELAY_MS: u64 = u32::MAX as u64;

pub const MIN_POLL_INTERVAL_MS: u64 = 1;
pub const MAX_POLL_INTERVAL_MS: u64 = 1_000;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

fn check_delay(config: &MachineConfig) -> Check {
    if config.delay_ms > MAX_DELAY_MS {
        Validation::fail(ConfigViolation::DelayTooLong {
            delay_ms: config.delay_ms,
            max: MAX_DELAY_MS,
        })
    } else {
        Validation::success(())
    }
}

fn check_poll_interval(config: &MachineConfig) -> Check {
    if (MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&config.poll_interval_ms) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::PollIntervalOutOfRange {
            poll_interval_ms: config.poll_interval_ms,
            min: MIN_POLL_INTERVAL_MS,
            max: MAX_POLL_INTERVAL_MS,
        })
    }
}

fn check_step_limit(config: &MachineConfig) -> Check {
    if config.max_steps == Some(0) {
        Validation::fail(ConfigViolation::ZeroStepLimit)
    } else {
        Validation::success(())
    }
}

/// Run every check, accumulating ALL violations.
pub fn validate(config: &MachineConfig) -> Check {
    let checks = vec![
        check_delay(config),
        check_poll_interval(config),
        check_step_limit(config),
    ];
    Validation::all_vec(checks).map(|_| ())
}
