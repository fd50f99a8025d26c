//! Grow a fatigue crack from initial crack size until failure.
//!
//! The crack is grown one constant amplitude cycle at a time with a
//! forward Euler step of the da/dN equation. There is no step size
//! control, each cycle is one step.

use crate::dadn::{CrackState, DaDn};
use crate::COMMENT;
use log::{info, warn};
use std::f64::consts::PI;
use std::fmt;

pub mod elements;

/// The smallest sampling stride of a trace.
pub const MIN_STRIDE: u64 = 500;

/// Number of samples aimed for when the cycle budget is large.
pub const TARGET_SAMPLES: u64 = 1000;

/// Start, finish and budget of a crack growth calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthLimits {
    /// Initial crack length (m)
    pub a_initial: f64,
    /// Crack length at which the member has failed (m)
    pub a_final: f64,
    /// Maximum number of cycles to run for
    pub cycle_limit: u64,
    /// Minimum stress of every cycle (MPa)
    pub sigma_min: f64,
}

impl GrowthLimits {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.a_initial > 0.0) {
            return Err(format!(
                "initial crack length ({}) must be greater than zero",
                self.a_initial
            ));
        }
        if !(self.a_initial < self.a_final) {
            return Err(format!(
                "initial crack length ({}) must be less than the final crack length ({})",
                self.a_initial, self.a_final
            ));
        }
        if self.cycle_limit == 0 {
            return Err("cycle limit must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Cycles between recorded samples.
    pub fn stride(&self) -> u64 {
        MIN_STRIDE.max(self.cycle_limit / TARGET_SAMPLES)
    }
}

/// A recorded point of the crack growth history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub cycle: u64,
    /// crack length at the end of the cycle
    pub a: f64,
}

/// How a crack growth calculation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The crack reached the final length during this cycle.
    Failed { cycle: u64 },
    /// The whole cycle budget was used without reaching the final length.
    Survived { cycles: u64 },
}

impl Outcome {
    /// Cycle at which the calculation stopped.
    pub fn cycles(&self) -> u64 {
        match *self {
            Outcome::Failed { cycle } => cycle,
            Outcome::Survived { cycles } => cycles,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Outcome::Failed { cycle } => write!(f, "failed at cycle {}", cycle),
            Outcome::Survived { cycles } => write!(f, "no failure within {} cycles", cycles),
        }
    }
}

/// Sampled crack growth history of one member.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub samples: Vec<Sample>,
    pub outcome: Outcome,
}

impl Trace {
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn final_length(&self) -> Option<f64> {
        self.last().map(|sample| sample.a)
    }
}

/// Stress intensity range for a through crack of length `a`.
pub fn delta_k(smax: f64, smin: f64, a: f64) -> f64 {
    (smax - smin) * (PI * a).sqrt()
}

/// check if the crack has reached the failure length.
pub fn reached_limit(a: f64, a_final: f64) -> bool {
    a >= a_final
}

/// Grow a crack under constant amplitude cycles with peak stress `smax`.
///
/// The first sample is always the initial crack, then a sample is
/// kept every `limits.stride()` cycles and at the cycle where the
/// crack reaches `limits.a_final`. When the budget runs out the last
/// cycle is also kept so the trace always ends where the calculation
/// stopped.
pub fn grow_crack(
    smax: f64,
    limits: &GrowthLimits,
    dadn: &(dyn DaDn + Send + Sync),
) -> Result<Trace, String> {
    limits.validate()?;
    // a negative range would shrink the crack with an odd exponent
    if !(smax >= limits.sigma_min) {
        return Err(format!(
            "peak stress ({}) must not be less than the minimum stress ({})",
            smax, limits.sigma_min
        ));
    }

    let stride = limits.stride();
    let mut a = limits.a_initial;
    let mut samples = Vec::with_capacity((limits.cycle_limit / stride) as usize + 2);
    samples.push(Sample { cycle: 0, a });

    for cycle in 1..=limits.cycle_limit {
        let dk = delta_k(smax, limits.sigma_min, a);
        a += dadn.dadn(dk, &CrackState { a });

        if a.is_nan() {
            return Err(format!(
                "crack length is not a number at cycle {} (smax {}, smin {}, dk {})",
                cycle, smax, limits.sigma_min, dk
            ));
        }

        let failed = reached_limit(a, limits.a_final);
        if cycle % stride == 0 || failed {
            samples.push(Sample { cycle, a });
        }

        if failed {
            info!("Failure occurs at cycle {} for {} MPa stress", cycle, smax);
            return Ok(Trace {
                samples,
                outcome: Outcome::Failed { cycle },
            });
        }
    }

    if limits.cycle_limit % stride != 0 {
        samples.push(Sample {
            cycle: limits.cycle_limit,
            a,
        });
    }
    warn!(
        "No failure within {} cycles for {} MPa stress, crack length {:e} m",
        limits.cycle_limit, smax, a
    );

    Ok(Trace {
        samples,
        outcome: Outcome::Survived {
            cycles: limits.cycle_limit,
        },
    })
}

pub fn display_trace_header(name: &str) {
    println!("{}{}", COMMENT, name);
    println!("{:>12} {:>14}", "cycle", "a");
}

// print every sample of a trace
pub fn display_trace(trace: &Trace) {
    for sample in &trace.samples {
        println!("{:12} {:14.6e}", sample.cycle, sample.a);
    }
    println!("{}{}", COMMENT, trace.outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dadn::{make_model, relabel_parameters};

    fn cfrp() -> Box<dyn DaDn + Send + Sync> {
        let params = relabel_parameters(&[1.08e-12, 3.5], "paris").unwrap();
        make_model("paris:cfrp", &params).unwrap()
    }

    fn limits(cycle_limit: u64) -> GrowthLimits {
        GrowthLimits {
            a_initial: 0.001,
            a_final: 0.02,
            cycle_limit,
            sigma_min: 30.0,
        }
    }

    #[test]
    fn delta_k_is_range_times_root_pi_a() {
        let dk = delta_k(192.0, 30.0, 0.001);
        assert!((dk - 162.0 * (PI * 0.001).sqrt()).abs() <= f64::EPSILON);
        assert!(delta_k(30.0, 30.0, 0.5).abs() <= f64::EPSILON);
    }

    #[test]
    fn stride_has_a_floor() {
        assert_eq!(limits(1_000).stride(), 500);
        assert_eq!(limits(1_000_000).stride(), 1_000);
        assert_eq!(limits(2_000_000).stride(), 2_000);
    }

    #[test]
    fn reference_member_fails_before_budget() {
        let trace = grow_crack(192.0, &limits(1_000_000), &*cfrp()).unwrap();

        match trace.outcome {
            Outcome::Failed { cycle } => assert!(cycle < 1_000_000),
            Outcome::Survived { .. } => panic!("expected failure, got {}", trace.outcome),
        }
        assert!(trace.final_length().unwrap() >= 0.02);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let dadn = cfrp();
        let first = grow_crack(192.0, &limits(1_000_000), &*dadn).unwrap();
        let second = grow_crack(192.0, &limits(1_000_000), &*dadn).unwrap();

        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.samples.len(), second.samples.len());
        for (x, y) in first.samples.iter().zip(second.samples.iter()) {
            assert_eq!(x.cycle, y.cycle);
            assert_eq!(x.a.to_bits(), y.a.to_bits());
        }
    }

    #[test]
    fn trace_is_ordered_and_ends_at_termination() {
        for &budget in &[1_000, 123_457, 1_000_000] {
            let trace = grow_crack(250.0, &limits(budget), &*cfrp()).unwrap();

            assert_eq!(trace.samples[0], Sample { cycle: 0, a: 0.001 });
            for pair in trace.samples.windows(2) {
                assert!(pair[1].cycle > pair[0].cycle);
                assert!(pair[1].a >= pair[0].a);
            }
            assert_eq!(trace.last().unwrap().cycle, trace.outcome.cycles());
            assert!(trace.outcome.cycles() <= budget);
        }
    }

    #[test]
    fn failure_cycle_is_sampled_once() {
        let trace = grow_crack(300.0, &limits(1_000_000), &*cfrp()).unwrap();
        let cycle = trace.outcome.cycles();
        let count = trace.samples.iter().filter(|s| s.cycle == cycle).count();
        assert_eq!(count, 1);
        // samples before failure sit on the stride
        let stride = limits(1_000_000).stride();
        for sample in &trace.samples[..trace.samples.len() - 1] {
            assert_eq!(sample.cycle % stride, 0);
        }
    }

    #[test]
    fn doubling_budget_keeps_failure_cycle() {
        let dadn = cfrp();
        let short = grow_crack(192.0, &limits(1_000_000), &*dadn).unwrap();
        let long = grow_crack(192.0, &limits(2_000_000), &*dadn).unwrap();

        assert!(short.outcome.is_failure());
        assert_eq!(short.outcome, long.outcome);
    }

    #[test]
    fn larger_stress_never_lives_longer() {
        let dadn = cfrp();
        let mut previous = u64::MAX;
        for &smax in &[192.0, 210.0, 250.0, 300.0, 365.0] {
            let cycles = grow_crack(smax, &limits(1_000_000), &*dadn)
                .unwrap()
                .outcome
                .cycles();
            assert!(cycles <= previous);
            previous = cycles;
        }
    }

    #[test]
    fn small_budget_survives() {
        let trace = grow_crack(192.0, &limits(1_000), &*cfrp()).unwrap();

        assert_eq!(trace.outcome, Outcome::Survived { cycles: 1_000 });
        assert!(!trace.outcome.is_failure());
        let cycles: Vec<u64> = trace.samples.iter().map(|s| s.cycle).collect();
        assert_eq!(cycles, vec![0, 500, 1_000]);
        assert!(trace.final_length().unwrap() < 0.02);
    }

    #[test]
    fn odd_budget_keeps_last_cycle() {
        let trace = grow_crack(100.0, &limits(1_234), &*cfrp()).unwrap();
        let cycles: Vec<u64> = trace.samples.iter().map(|s| s.cycle).collect();
        assert_eq!(cycles, vec![0, 500, 1_000, 1_234]);
    }

    #[test]
    fn zero_range_never_grows() {
        let trace = grow_crack(30.0, &limits(2_000), &*cfrp()).unwrap();
        assert!(trace.samples.iter().all(|s| (s.a - 0.001).abs() <= f64::EPSILON));
        assert_eq!(trace.outcome, Outcome::Survived { cycles: 2_000 });
    }

    #[test]
    fn negative_range_is_reported() {
        let result = grow_crack(10.0, &limits(1_000), &*cfrp());
        assert!(result.is_err());
    }

    #[test]
    fn negative_range_with_integer_exponent_is_reported() {
        // an odd integer exponent would give a negative growth rate
        let params = relabel_parameters(&[1e-6, 3.0], "paris").unwrap();
        let dadn = make_model("paris", &params).unwrap();
        let result = grow_crack(10.0, &limits(2_000), &*dadn);

        assert!(result.is_err());
        assert!(grow_crack(30.0, &limits(2_000), &*dadn).is_ok());
    }

    #[test]
    fn invalid_limits_are_rejected() {
        let dadn = cfrp();
        let mut bad = limits(1_000);
        bad.a_initial = 0.05;
        assert!(grow_crack(192.0, &bad, &*dadn).is_err());

        let mut bad = limits(1_000);
        bad.a_initial = 0.0;
        assert!(grow_crack(192.0, &bad, &*dadn).is_err());

        assert!(grow_crack(192.0, &limits(0), &*dadn).is_err());
    }

    #[test]
    fn outcome_display_names_both_cases() {
        assert_eq!(Outcome::Failed { cycle: 12 }.to_string(), "failed at cycle 12");
        assert_eq!(
            Outcome::Survived { cycles: 40 }.to_string(),
            "no failure within 40 cycles"
        );
    }
}
