use super::dadn::*;
use crate::options::FloatOptions;
use fatigue::{
    grow::{
        elements::{run_elements, ElementResult},
        GrowthLimits,
    },
    material,
};

/// Crack growth limits, with the minimum stress taken from the
/// material when it was not given.
pub fn get_limits(options: &FloatOptions) -> Result<GrowthLimits, String> {
    let sigma_min = match options.sigma_min {
        Some(sigma_min) => sigma_min,
        None => match material::get_material(&options.dadn) {
            Some(material) => material.properties.sigma_min,
            None => material::Properties::default().sigma_min,
        },
    };

    let limits = GrowthLimits {
        a_initial: options.a,
        a_final: options.a_limit,
        cycle_limit: options.cycle_limit,
        sigma_min,
    };
    limits.validate()?;

    Ok(limits)
}

/// Grow a crack in every member of the options. Returns the equation
/// message along with the results.
pub fn run_growth(options: &FloatOptions) -> Result<(String, Vec<ElementResult>), String> {
    let (params, message) = get_dadn_params(options)?;
    let dadn = get_dadn(options, &params)?;
    let limits = get_limits(options)?;

    let message = format!("{}\n{}da/dN equation: {}", message, fatigue::COMMENT, dadn);
    let results = run_elements(&options.elements, &limits, &*dadn)?;

    Ok((message, results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::get_default_options;
    use fatigue::grow::elements::ElementLoadCase;

    #[test]
    fn limits_take_minimum_stress_from_material() {
        let options = get_default_options();
        let limits = get_limits(&options).unwrap();

        assert!((limits.sigma_min - 30.0).abs() <= f64::EPSILON);
        assert!((limits.a_initial - 0.001).abs() <= f64::EPSILON);
        assert!((limits.a_final - 0.02).abs() <= f64::EPSILON);
        assert_eq!(limits.cycle_limit, 1_000_000);
    }

    #[test]
    fn given_minimum_stress_wins() {
        let mut options = get_default_options();
        options.sigma_min = Some(0.0);
        assert!(get_limits(&options).unwrap().sigma_min.abs() <= f64::EPSILON);
    }

    #[test]
    fn inverted_crack_limits_are_an_error() {
        let mut options = get_default_options();
        options.a_limit = options.a / 2.0;
        assert!(get_limits(&options).is_err());
        assert!(run_growth(&options).is_err());
    }

    #[test]
    fn run_growth_keeps_member_order() {
        let mut options = get_default_options();
        options.cycle_limit = 2000;
        options.elements = vec![
            ElementLoadCase::new("low", &[150.0]),
            ElementLoadCase::new("high", &[400.0]),
        ];
        let (message, results) = run_growth(&options).unwrap();

        assert!(message.contains("Paris"));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "low");
        assert_eq!(results[1].name, "high");
    }
}
