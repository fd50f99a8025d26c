/// These are the data structures for command line options as well as
/// the initial default values.

use std::collections::BTreeMap;
use std::fmt;

use fatigue::dadn::ParameterLabel;
use fatigue::dynamics::{HarmonicForce, Oscillator, TimeSpan};
use fatigue::grow::elements::{default_elements, ElementLoadCase};
use fatigue::statics::TriangleFrame;
use fatigue::{beam, material, COMMENT};

pub mod builder;
pub mod clap;

arg_enum! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Analysis {
        Grow,
        Reactions,
        Beam,
        Dynamics,
        Frame,
        Sketch,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verbosity {
    Verbose,
    Terse,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TerminatingOutput {
    List,
    None,
}

/// Shear and moment diagram request.
#[derive(Debug, Clone)]
pub struct BeamOptions {
    /// Single span to analyse, otherwise every beam of the frame
    pub length: Option<f64>,
    /// Distributed load (N/m), defaults to the beam weight per length
    pub load: Option<f64>,
    pub points: usize,
    pub plot: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DynamicsOptions {
    pub oscillator: Oscillator,
    pub force: HarmonicForce,
    pub span: TimeSpan,
    pub plot: Option<String>,
}

/// Option data for all the analyses.
#[derive(Debug, Clone)]
pub struct FloatOptions {
    /// Which analysis to run
    pub analysis: Analysis,
    /// Type of output
    pub output: TerminatingOutput,
    /// Level of verbosity
    pub verbosity: Verbosity,
    /// Name of the built-in material, e.g. paris:cfrp
    pub dadn: String,
    /// Explicit parameters that take the place of the material values.
    // A BTreeMap keeps the labels sorted for relabelling.
    pub params: BTreeMap<ParameterLabel, f64>,
    /// Initial crack length (m)
    pub a: f64,
    /// Crack length at failure (m)
    pub a_limit: f64,
    /// Maximum number of cycles to run for
    pub cycle_limit: u64,
    /// Minimum stress of each cycle, taken from the material when not given (MPa)
    pub sigma_min: Option<f64>,
    /// Members to grow a crack in
    pub elements: Vec<ElementLoadCase>,
    /// Print every sample of each trace
    pub trace: bool,
    /// svg file for the crack growth curves
    pub plot: Option<String>,
    pub frame: TriangleFrame,
    /// svg file for the frame model with its loads and reactions
    pub reactions_plot: Option<String>,
    pub beam: BeamOptions,
    pub dynamics: DynamicsOptions,
    /// svg file for the structure sketch
    pub sketch_outfile: String,
}

impl fmt::Display for FloatOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}analysis: {:?}", COMMENT, self.analysis)?;
        writeln!(f, "{}dadn: {:?}", COMMENT, self.dadn)?;
        writeln!(f, "{}params: {:?}", COMMENT, self.params)?;
        writeln!(f, "{}a: {:?}", COMMENT, self.a)?;
        writeln!(f, "{}a_limit: {:?}", COMMENT, self.a_limit)?;
        writeln!(f, "{}cycle_limit: {:?}", COMMENT, self.cycle_limit)?;
        writeln!(f, "{}sigma_min: {:?}", COMMENT, self.sigma_min)?;
        for element in &self.elements {
            writeln!(f, "{}element: {} {:?}", COMMENT, element.name, element.stresses)?;
        }
        writeln!(f, "{}plot: {:?}", COMMENT, self.plot)?;

        match self.analysis {
            Analysis::Reactions => {
                writeln!(f, "{}frame: {:?}", COMMENT, self.frame)?;
                writeln!(f, "{}reactions_plot: {:?}", COMMENT, self.reactions_plot)?
            }
            Analysis::Beam => writeln!(f, "{}beam: {:?}", COMMENT, self.beam)?,
            Analysis::Dynamics => writeln!(f, "{}dynamics: {:?}", COMMENT, self.dynamics)?,
            _ => (),
        }
        write!(f, "{}sketch_outfile: {:?}", COMMENT, self.sketch_outfile)
    }
}

pub fn get_default_options() -> FloatOptions {
    FloatOptions {
        analysis: Analysis::Grow,
        output: TerminatingOutput::None,
        verbosity: Verbosity::Terse,

        // crack growth
        dadn: material::DEFAULT_MATERIAL.to_string(),
        params: BTreeMap::new(),
        a: 0.001,
        a_limit: 0.02,
        cycle_limit: 1_000_000,
        sigma_min: None,
        elements: default_elements(),
        trace: false,
        plot: None,

        // support structure checks
        frame: TriangleFrame::default(),
        reactions_plot: None,
        beam: BeamOptions {
            length: None,
            load: None,
            points: beam::DEFAULT_STATIONS,
            plot: None,
        },
        dynamics: DynamicsOptions {
            oscillator: Oscillator::default(),
            force: HarmonicForce::default(),
            span: TimeSpan::default(),
            plot: None,
        },
        sketch_outfile: "structure.svg".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_grow_the_built_in_elements() {
        let options = get_default_options();
        assert_eq!(options.analysis, Analysis::Grow);
        assert_eq!(options.elements.len(), 4);
        assert_eq!(options.cycle_limit, 1_000_000);
        assert!(material::get_material(&options.dadn).is_some());
    }

    #[test]
    fn display_lists_the_material() {
        let text = format!("{}", get_default_options());
        assert!(text.contains("paris:cfrp"));
        assert!(text.contains("Diagonal Element"));
    }
}
