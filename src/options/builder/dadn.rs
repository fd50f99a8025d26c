use crate::options::FloatOptions;
use fatigue::{
    dadn::{self, relabel_parameters, DaDn},
    material, COMMENT,
};

pub fn get_dadn(options: &FloatOptions, params: &[f64]) -> Result<Box<dyn DaDn + Send + Sync>, String> {
    // This relies on the params being sorted in the same order as the
    // labels of the equation
    let remapped_params = relabel_parameters(params, &options.dadn)?;
    dadn::make_model(&options.dadn, &remapped_params)
}

/// Parameter values for the equation, from the command line if given,
/// otherwise from the material database. The message says which.
pub fn get_dadn_params(options: &FloatOptions) -> Result<(Vec<f64>, String), String> {
    if !options.params.is_empty() {
        let params = options.params.values().cloned().collect::<Vec<f64>>();
        return Ok((params, format!("{}Using provided dadn parameters", COMMENT)));
    }

    match material::get_material(&options.dadn) {
        Some(result) => Ok((
            result.params.values().cloned().collect(),
            format!(
                "{}No parameters given, obtaining from material library for {}",
                COMMENT, options.dadn
            ),
        )),
        None => Err(format!(
            "Unknown material '{}', or no material or parameters have been provided",
            options.dadn
        )),
    }
}
