//! da/dN equations for calculating crack growth.
//!
//! The growth rate depends only on the stress intensity range
//! $\Delta K$ for the current cycle. The crack state is passed along
//! so that equations with a memory effect can be added behind the
//! same trait.

use std::collections::BTreeMap;
use std::fmt;

/// Defines the state of the crack for any dadn equation that requires
/// some sort of memory.
#[derive(Debug, Clone, Copy)]
pub struct CrackState {
    /// length of the crack
    pub a: f64,
}

/// A standard definition of variable names used in dadn equations.
///
/// The rust style is being intentionally disregarded here, as
/// case may matter in some equations.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterLabel {
    c,
    m,
}

impl ParameterLabel {
    /// Return a printable value for the label.
    // This text is what the user types into the --parameters
    // argument, so keep it short.
    fn text(&self) -> &'static str {
        match *self {
            ParameterLabel::c => "c",
            ParameterLabel::m => "m",
        }
    }

    pub fn from_text(input: &str) -> Option<ParameterLabel> {
        match input {
            "c" => Some(ParameterLabel::c),
            "m" => Some(ParameterLabel::m),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Trait for `DaDn` function that can be used for crack growth
pub trait DaDn {
    /// Display the crack growth equation
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result;

    /// Crack growth increment for a single cycle with stress
    /// intensity range `delta_k`.
    fn dadn(&self, delta_k: f64, state: &CrackState) -> f64;

    /// Update the equation parameters
    fn update_parameters(&mut self, params: &BTreeMap<ParameterLabel, f64>);

    fn get_name(&self) -> &str;
}

impl fmt::Display for dyn DaDn + Send + Sync {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        DaDn::fmt(self, f)
    }
}

/// data for Paris equation
/// $$ dadn = C \Delta K^m $$
#[derive(Debug, Clone)]
pub struct Paris {
    c: f64,
    m: f64,
}

/// Paris equation
/// da/dN = c (\Delta K)^m
/// parameters = [c, m]
impl Paris {
    pub const NAME: &'static str = "paris";
    pub const UNITS: &'static str = "m";

    pub const PARAMETER_LABELS: &'static [ParameterLabel] =
        &[ParameterLabel::c, ParameterLabel::m];

    pub fn new(params: &BTreeMap<ParameterLabel, f64>) -> Paris {
        Paris {
            c: params[&ParameterLabel::c],
            m: params[&ParameterLabel::m],
        }
    }
}

impl DaDn for Paris {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "da/dN ({}) = {:e} * ΔK ^ {} [Paris63]",
            Paris::UNITS,
            self.c,
            self.m
        )
    }

    // No clamping of delta_k, the integrator never passes a negative range.
    fn dadn(&self, delta_k: f64, _state: &CrackState) -> f64 {
        self.c * delta_k.powf(self.m)
    }

    fn update_parameters(&mut self, params: &BTreeMap<ParameterLabel, f64>) {
        if let Some(c) = params.get(&ParameterLabel::c) {
            self.c = *c;
        }
        if let Some(m) = params.get(&ParameterLabel::m) {
            self.m = *m;
        }
    }

    fn get_name(&self) -> &str {
        Paris::NAME
    }
}

/// Build a dadn model from its name, e.g. `paris` or `paris:cfrp`.
///
/// Only the part before the colon selects the equation, the rest
/// names the material the parameters came from.
pub fn make_model(
    model_name: &str,
    params: &BTreeMap<ParameterLabel, f64>,
) -> Result<Box<dyn DaDn + Send + Sync>, String> {
    let dadn = model_name.split(':').next().unwrap_or("");

    let parameters_verified = match dadn {
        Paris::NAME => verify_parameters(params, Paris::PARAMETER_LABELS),
        _ => {
            return Err(format!("Unknown dadn equation: {:?}", model_name));
        }
    };

    if !parameters_verified {
        return Err(format!(
            "Incorrect parameters given for {}: {:?}",
            dadn, params
        ));
    }

    match dadn {
        Paris::NAME => Ok(Box::new(Paris::new(params)) as Box<dyn DaDn + Send + Sync>),
        _ => Err(format!("Cannot create dadn equation: {:?}", model_name)),
    }
}

/// Map a list of values onto the sorted parameter labels of the equation.
pub fn relabel_parameters(
    data: &[f64],
    model_name: &str,
) -> Result<BTreeMap<ParameterLabel, f64>, String> {
    let model_name = model_name.split(':').next().unwrap_or("");

    let mut parameter_labels = match model_name {
        Paris::NAME => Paris::PARAMETER_LABELS.to_owned(),
        _ => {
            return Err(format!("Unknown dadn equation: {:?}", model_name));
        }
    };

    if data.len() != parameter_labels.len() {
        return Err(format!(
            "Number of values does not match number of labels: {:?} {:?}",
            data, parameter_labels
        ));
    }

    parameter_labels.sort();

    Ok(parameter_labels
        .into_iter()
        .zip(data.iter().cloned())
        .collect())
}

/// Verify that the parameters given on the command line are complete and correct
pub fn verify_parameters(
    given: &BTreeMap<ParameterLabel, f64>,
    expected: &'static [ParameterLabel],
) -> bool {
    given.len() == expected.len() && expected.iter().all(|key| given.contains_key(key))
}
