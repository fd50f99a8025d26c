//! Run the crack growth calculation for each structural member.

use super::{grow_crack, GrowthLimits, Trace};
use crate::dadn::DaDn;
use crate::COMMENT;
use rayon::prelude::*;

/// Observed peak stresses for one structural member.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementLoadCase {
    pub name: String,
    /// peak cyclic stresses (MPa)
    pub stresses: Vec<f64>,
}

impl ElementLoadCase {
    pub fn new(name: &str, stresses: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            stresses: stresses.to_vec(),
        }
    }

    /// Representative peak stress, the arithmetic mean of the observations.
    pub fn mean_stress(&self) -> Result<f64, String> {
        if self.stresses.is_empty() {
            return Err(format!("element '{}' has no stress values", self.name));
        }
        Ok(self.stresses.iter().sum::<f64>() / self.stresses.len() as f64)
    }

    /// Parse a case of the form `name=s1,s2,...`.
    pub fn from_text(input: &str) -> Result<Self, String> {
        let mut parts = input.splitn(2, '=');
        let name = parts.next().unwrap_or("").trim();
        let values = match parts.next() {
            Some(values) => values,
            None => return Err(format!("Invalid element format (expected name=s1,s2,...): {}", input)),
        };
        if name.is_empty() {
            return Err(format!("Missing element name in: {}", input));
        }

        let stresses = values
            .split(',')
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|why| format!("Invalid stress value '{}' for '{}': {}", v, name, why))
            })
            .collect::<Result<Vec<f64>, String>>()?;

        Ok(Self {
            name: name.to_string(),
            stresses,
        })
    }
}

/// Members of the platform with the stresses taken from the finite
/// element model of the structure.
pub fn default_elements() -> Vec<ElementLoadCase> {
    vec![
        ElementLoadCase::new("Diagonal Element", &[192.0, 255.0, 253.0, 259.0, 288.0, 365.0]),
        ElementLoadCase::new(
            "Bottom Side Element",
            &[192.0, 192.0, 192.0, 197.0, 197.0, 201.0, 209.0, 218.0, 201.0, 207.0, 206.0, 212.0],
        ),
        ElementLoadCase::new(
            "Bottom Front Element",
            &[
                192.0, 198.9, 199.4, 203.4, 204.2, 206.5, 209.6, 215.7, 213.8, 213.9, 218.0, 216.7,
                216.7, 303.4,
            ],
        ),
        ElementLoadCase::new("Vertical Element", &[192.0, 226.0, 257.0, 318.0]),
    ]
}

/// Crack growth result for one member.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementResult {
    pub name: String,
    pub mean_stress: f64,
    pub trace: Trace,
}

/// Grow a crack in every member with the same material and limits.
///
/// The members are independent so they are calculated in parallel;
/// the results come back in the same order as `cases`.
pub fn run_elements(
    cases: &[ElementLoadCase],
    limits: &GrowthLimits,
    dadn: &(dyn DaDn + Send + Sync),
) -> Result<Vec<ElementResult>, String> {
    limits.validate()?;

    cases
        .par_iter()
        .map(|case| -> Result<ElementResult, String> {
            let mean_stress = case.mean_stress()?;
            let trace = grow_crack(mean_stress, limits, dadn)
                .map_err(|why| format!("element '{}': {}", case.name, why))?;
            Ok(ElementResult {
                name: case.name.clone(),
                mean_stress,
                trace,
            })
        })
        .collect()
}

/// Print the table of cycles to failure for each member.
pub fn display_failure_table(results: &[ElementResult]) {
    let width = results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("Element".len());

    println!("{}Fatigue Failure Cycles for Each Element", COMMENT);
    println!(
        "{:<width$} {:>12} {:>16} {:>14}",
        "Element",
        "Mean Stress",
        "Failure Cycles",
        "Outcome",
        width = width
    );
    for result in results {
        let outcome = if result.trace.outcome.is_failure() {
            "failed"
        } else {
            "survived"
        };
        println!(
            "{:<width$} {:12.3} {:16} {:>14}",
            result.name,
            result.mean_stress,
            result.trace.outcome.cycles(),
            outcome,
            width = width
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dadn::{make_model, relabel_parameters};
    use crate::grow::Outcome;

    fn limits() -> GrowthLimits {
        GrowthLimits {
            a_initial: 0.001,
            a_final: 0.02,
            cycle_limit: 1_000_000,
            sigma_min: 30.0,
        }
    }

    fn cfrp() -> Box<dyn DaDn + Send + Sync> {
        let params = relabel_parameters(&[1.08e-12, 3.5], "paris").unwrap();
        make_model("paris", &params).unwrap()
    }

    #[test]
    fn mean_of_observations() {
        let case = ElementLoadCase::new("Vertical Element", &[192.0, 226.0, 257.0, 318.0]);
        assert!((case.mean_stress().unwrap() - 248.25).abs() < 1e-12);
    }

    #[test]
    fn empty_case_is_an_error() {
        let case = ElementLoadCase::new("Empty", &[]);
        assert!(case.mean_stress().is_err());
        assert!(run_elements(&[case], &limits(), &*cfrp()).is_err());
    }

    #[test]
    fn parse_element_text() {
        let case = ElementLoadCase::from_text("Top Beam=100, 200,300").unwrap();
        assert_eq!(case.name, "Top Beam");
        assert_eq!(case.stresses, vec![100.0, 200.0, 300.0]);

        assert!(ElementLoadCase::from_text("Top Beam").is_err());
        assert!(ElementLoadCase::from_text("=1,2").is_err());
        assert!(ElementLoadCase::from_text("Top=1,x").is_err());
    }

    #[test]
    fn results_keep_input_order() {
        let cases = default_elements();
        let results = run_elements(&cases, &limits(), &*cfrp()).unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Diagonal Element",
                "Bottom Side Element",
                "Bottom Front Element",
                "Vertical Element"
            ]
        );
    }

    #[test]
    fn every_default_member_fails_within_budget() {
        let results = run_elements(&default_elements(), &limits(), &*cfrp()).unwrap();
        for result in &results {
            assert!(result.trace.outcome.is_failure(), "{}", result.name);
            assert!(result.mean_stress > 192.0);
        }
    }

    #[test]
    fn parallel_matches_single_member_runs() {
        let dadn = cfrp();
        let cases = default_elements();
        let results = run_elements(&cases, &limits(), &*dadn).unwrap();

        for (case, result) in cases.iter().zip(results.iter()) {
            let single = grow_crack(case.mean_stress().unwrap(), &limits(), &*dadn).unwrap();
            assert_eq!(single, result.trace);
        }
    }

    #[test]
    fn higher_stresses_fail_no_later() {
        let dadn = cfrp();
        let base = vec![ElementLoadCase::new("a", &[200.0, 220.0])];
        let raised = vec![ElementLoadCase::new("a", &[210.0, 240.0])];

        let base = run_elements(&base, &limits(), &*dadn).unwrap();
        let raised = run_elements(&raised, &limits(), &*dadn).unwrap();

        match (base[0].trace.outcome, raised[0].trace.outcome) {
            (Outcome::Failed { cycle: b }, Outcome::Failed { cycle: r }) => assert!(r <= b),
            other => panic!("unexpected outcomes {:?}", other),
        }
    }
}
