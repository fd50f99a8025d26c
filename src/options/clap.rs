use std::collections::BTreeMap;

use crate::options::{Analysis, FloatOptions, TerminatingOutput, Verbosity};
use clap::{App, Arg, ArgMatches, SubCommand};
use fatigue::dadn::ParameterLabel;
use fatigue::grow::elements::ElementLoadCase;
use fatigue::statics::{Point, GRAVITY};
use log::error;

/// Options that control the crack growth calculation. They are
/// accepted at the top level and by the `grow` subcommand.
fn growth_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("material")
            .short("d")
            .long("material")
            .value_name("NAME")
            .help("select the built-in material for the da/dN equation (default paris:cfrp)")
            .takes_value(true),
        Arg::with_name("params")
            .short("p")
            .long("parameters")
            .value_name("c=C,m=M")
            .help("set the Paris law parameters instead of using the material values")
            .use_delimiter(false)
            .takes_value(true),
        Arg::with_name("smin")
            .long("smin")
            .value_name("STRESS")
            .help("set the minimum stress of each cycle (default from the material, 30 MPa)")
            .allow_hyphen_values(true)
            .takes_value(true),
        Arg::with_name("astart")
            .long("astart")
            .value_name("LENGTH")
            .help("set the initial crack length (default 0.001 m)")
            .takes_value(true),
        Arg::with_name("aend")
            .long("aend")
            .value_name("LENGTH")
            .help("set the crack length at which the member fails (default 0.02 m)")
            .takes_value(true),
        Arg::with_name("cycle_limit")
            .long("cycle_limit")
            .value_name("N")
            .help("maximum number of cycles to run for (default 1000000)")
            .takes_value(true),
        Arg::with_name("element")
            .short("e")
            .long("element")
            .value_name("NAME=S1,S2,...")
            .help("grow a crack in a member with these peak stresses. Repeat for more members. Replaces the built-in members")
            .multiple(true)
            .number_of_values(1)
            .use_delimiter(false)
            .takes_value(true),
        Arg::with_name("trace")
            .long("trace")
            .help("print every sample of the crack growth curve for each member"),
        Arg::with_name("plot")
            .long("plot")
            .value_name("FILE")
            .help("draw the crack growth curves to an svg file")
            .takes_value(true),
    ]
}

fn plot_arg() -> Arg<'static, 'static> {
    Arg::with_name("plot")
        .long("plot")
        .value_name("FILE")
        .help("draw the result to an svg file")
        .takes_value(true)
}

/// Get the options from the command line.
pub fn get_options_clap(line: &str, options: &mut FloatOptions) {
    let process = App::new("floatgrow: fatigue and structural checks for a floating wind platform")
        .version(crate_version!())
        .about(include_str!("../description.md"))
        .args(&growth_args())

        .arg(Arg::with_name("list")
             .long("list")
             .help("list the built-in materials, members and analyses"))

        .arg(Arg::with_name("verbose")
             .short("v")
             .long("verbose")
             .help("print the options in use"))

        .subcommand(SubCommand::with_name("grow")
                    .about("grow a fatigue crack in each member until failure (default)")
                    .args(&growth_args()))

        .subcommand(SubCommand::with_name("reactions")
                    .about("support reactions of the triangular frame under self weight and turbines")
                    .arg(Arg::with_name("float2")
                         .long("float2")
                         .value_name("X,Y")
                         .help("position of the roller float B (default 100,0)")
                         .require_delimiter(true)
                         .allow_hyphen_values(true)
                         .takes_value(true))
                    .arg(Arg::with_name("apex")
                         .long("apex")
                         .value_name("X,Y")
                         .help("position of the apex C carrying the turbines (default 100,50)")
                         .require_delimiter(true)
                         .allow_hyphen_values(true)
                         .takes_value(true))
                    .arg(Arg::with_name("beam_mass")
                         .long("beam_mass")
                         .value_name("KG")
                         .help("mass of each beam (default 1000 kg)")
                         .takes_value(true))
                    .arg(Arg::with_name("turbine_mass")
                         .long("turbine_mass")
                         .value_name("KG")
                         .help("mass of each turbine (default 500 kg)")
                         .takes_value(true))
                    .arg(Arg::with_name("turbines")
                         .long("turbines")
                         .value_name("N")
                         .help("number of turbines at the apex (default 2)")
                         .takes_value(true))
                    .arg(plot_arg()))

        .subcommand(SubCommand::with_name("beam")
                    .about("shear force and bending moment along a uniformly loaded beam")
                    .arg(Arg::with_name("length")
                         .long("length")
                         .value_name("LENGTH")
                         .help("span of a single beam (default: every beam of the frame)")
                         .takes_value(true))
                    .arg(Arg::with_name("load")
                         .long("load")
                         .value_name("N/M")
                         .help("distributed load (default: beam weight per unit length)")
                         .allow_hyphen_values(true)
                         .takes_value(true))
                    .arg(Arg::with_name("points")
                         .long("points")
                         .value_name("N")
                         .help("number of stations along the beam (default 100)")
                         .takes_value(true))
                    .arg(plot_arg()))

        .subcommand(SubCommand::with_name("dynamics")
                    .about("response of the platform to a harmonic wave force")
                    .arg(Arg::with_name("mass")
                         .long("mass")
                         .value_name("KG")
                         .help("mass of the platform (default 1e6 kg)")
                         .takes_value(true))
                    .arg(Arg::with_name("damping")
                         .long("damping")
                         .value_name("NS/M")
                         .help("damping coefficient (default 5e3 N s/m)")
                         .takes_value(true))
                    .arg(Arg::with_name("stiffness")
                         .long("stiffness")
                         .value_name("N/M")
                         .help("stiffness (default 1e7 N/m)")
                         .takes_value(true))
                    .arg(Arg::with_name("amplitude")
                         .long("amplitude")
                         .value_name("N")
                         .help("amplitude of the wave force (default 1e6 N)")
                         .takes_value(true))
                    .arg(Arg::with_name("frequency")
                         .long("frequency")
                         .value_name("HZ")
                         .help("frequency of the wave force (default 0.1 Hz)")
                         .takes_value(true))
                    .arg(Arg::with_name("duration")
                         .long("duration")
                         .value_name("SECONDS")
                         .help("length of time to simulate (default 60 s)")
                         .takes_value(true))
                    .arg(Arg::with_name("points")
                         .long("points")
                         .value_name("N")
                         .help("number of output times (default 1000)")
                         .takes_value(true))
                    .arg(plot_arg()))

        .subcommand(SubCommand::with_name("frame")
                    .about("plane frame analysis of the two member test frame"))

        .subcommand(SubCommand::with_name("sketch")
                    .about("draw the 3D layout of the support structure")
                    .arg(Arg::with_name("outfile")
                         .short("o")
                         .long("outfile")
                         .value_name("FILE")
                         .help("svg file to write (default structure.svg)")
                         .takes_value(true)));

    // turn the commands into matches
    let matches = if line.is_empty() {
        // this will get them directly from the command line
        process.get_matches()
    } else {
        // get them from the string
        // add command word since it skips first argument
        process.get_matches_from(("floatgrow ".to_string() + line.trim()).split(' '))
    };

    if let Err(why) = apply_matches(&matches, options) {
        error!("Error: {}", why);
        std::process::exit(1)
    }
}

fn apply_matches(matches: &ArgMatches, options: &mut FloatOptions) -> Result<(), String> {
    if matches.is_present("list") {
        options.output = TerminatingOutput::List;
    }
    if matches.is_present("verbose") {
        options.verbosity = Verbosity::Verbose;
    }

    if let Some(name) = matches.subcommand_name() {
        options.analysis = name.parse::<Analysis>()?;
    }

    apply_growth(matches, options)?;

    match matches.subcommand() {
        ("grow", Some(sub)) => apply_growth(sub, options),
        ("reactions", Some(sub)) => apply_reactions(sub, options),
        ("beam", Some(sub)) => apply_beam(sub, options),
        ("dynamics", Some(sub)) => apply_dynamics(sub, options),
        ("sketch", Some(sub)) => {
            if let Some(outfile) = sub.value_of("outfile") {
                options.sketch_outfile = outfile.to_string();
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn apply_growth(matches: &ArgMatches, options: &mut FloatOptions) -> Result<(), String> {
    if let Some(material) = matches.value_of("material") {
        options.dadn = material.to_string();
    }
    if let Some(params) = matches.value_of("params") {
        options.params = parse_parameters(params)?;
    }
    if let Ok(smin) = value_t!(matches, "smin", f64) {
        options.sigma_min = Some(smin);
    }
    if let Ok(astart) = value_t!(matches, "astart", f64) {
        options.a = astart;
    }
    if let Ok(aend) = value_t!(matches, "aend", f64) {
        options.a_limit = aend;
    }
    if let Ok(cycle_limit) = value_t!(matches, "cycle_limit", u64) {
        options.cycle_limit = cycle_limit;
    }
    if let Some(elements) = matches.values_of("element") {
        options.elements = elements
            .map(ElementLoadCase::from_text)
            .collect::<Result<Vec<_>, String>>()?;
    }
    if matches.is_present("trace") {
        options.trace = true;
    }
    if let Some(plot) = matches.value_of("plot") {
        options.plot = Some(plot.to_string());
    }

    Ok(())
}

fn apply_reactions(matches: &ArgMatches, options: &mut FloatOptions) -> Result<(), String> {
    if let Ok(float2) = values_t!(matches, "float2", f64) {
        options.frame.b = parse_point(&float2, "float2")?;
    }
    if let Ok(apex) = values_t!(matches, "apex", f64) {
        options.frame.c = parse_point(&apex, "apex")?;
    }
    if let Ok(beam_mass) = value_t!(matches, "beam_mass", f64) {
        options.frame.beam_weight = beam_mass * GRAVITY;
    }
    if let Ok(turbine_mass) = value_t!(matches, "turbine_mass", f64) {
        options.frame.turbine_weight = turbine_mass * GRAVITY;
    }
    if let Ok(turbines) = value_t!(matches, "turbines", u32) {
        options.frame.turbine_count = turbines;
    }
    if let Some(plot) = matches.value_of("plot") {
        options.reactions_plot = Some(plot.to_string());
    }

    Ok(())
}

fn apply_beam(matches: &ArgMatches, options: &mut FloatOptions) -> Result<(), String> {
    if let Ok(length) = value_t!(matches, "length", f64) {
        options.beam.length = Some(length);
    }
    if let Ok(load) = value_t!(matches, "load", f64) {
        options.beam.load = Some(load);
    }
    if let Ok(points) = value_t!(matches, "points", usize) {
        options.beam.points = points;
    }
    if let Some(plot) = matches.value_of("plot") {
        options.beam.plot = Some(plot.to_string());
    }

    Ok(())
}

fn apply_dynamics(matches: &ArgMatches, options: &mut FloatOptions) -> Result<(), String> {
    let dynamics = &mut options.dynamics;

    if let Ok(mass) = value_t!(matches, "mass", f64) {
        dynamics.oscillator.mass = mass;
    }
    if let Ok(damping) = value_t!(matches, "damping", f64) {
        dynamics.oscillator.damping = damping;
    }
    if let Ok(stiffness) = value_t!(matches, "stiffness", f64) {
        dynamics.oscillator.stiffness = stiffness;
    }
    if let Ok(amplitude) = value_t!(matches, "amplitude", f64) {
        dynamics.force.amplitude = amplitude;
    }
    if let Ok(frequency) = value_t!(matches, "frequency", f64) {
        dynamics.force.frequency = frequency;
    }
    if let Ok(duration) = value_t!(matches, "duration", f64) {
        dynamics.span.end = dynamics.span.start + duration;
    }
    if let Ok(points) = value_t!(matches, "points", usize) {
        dynamics.span.points = points;
    }
    if let Some(plot) = matches.value_of("plot") {
        dynamics.plot = Some(plot.to_string());
    }

    Ok(())
}

fn parse_point(values: &[f64], name: &str) -> Result<Point, String> {
    match values {
        [x, y] => Ok(Point::new(*x, *y)),
        _ => Err(format!(
            "--{} expects two values X,Y but received {}",
            name,
            values.len()
        )),
    }
}

// Input expected as a comma separated list of paired values, of the
// form label=f64
// e.g. c=1.08e-12,m=3.5
fn parse_parameters(input: &str) -> Result<BTreeMap<ParameterLabel, f64>, String> {
    let mut result = BTreeMap::new();

    for pair in input.split(',') {
        let key_value = pair.split('=').collect::<Vec<&str>>();
        if key_value.len() != 2 {
            return Err(format!("Invalid parameter format: {}", pair));
        }

        let key = ParameterLabel::from_text(key_value[0].trim())
            .ok_or_else(|| format!("Unknown parameter label: {}", key_value[0]))?;

        let value = key_value[1]
            .trim()
            .parse::<f64>()
            .map_err(|why| format!("Invalid parameter value: {}. {}", key_value[1], why))?;

        result.insert(key, value);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::get_default_options;

    #[test]
    fn parse_parameters_works_on_paris_labels() {
        let result = parse_parameters("c=1.5e-10,m=3.2").unwrap();

        assert_eq!(result.len(), 2);
        assert!((result[&ParameterLabel::c] - 1.5e-10).abs() <= f64::EPSILON);
        assert!((result[&ParameterLabel::m] - 3.2).abs() <= f64::EPSILON);
    }

    #[test]
    fn parse_parameters_rejects_bad_input() {
        assert!(parse_parameters("c=1e-10,q=3").is_err());
        assert!(parse_parameters("c=1e-10,m").is_err());
        assert!(parse_parameters("c=abc").is_err());
    }

    #[test]
    fn parse_point_needs_two_values() {
        let p = parse_point(&[3.0, 4.0], "apex").unwrap();
        assert_eq!(p, Point::new(3.0, 4.0));
        assert!(parse_point(&[1.0], "apex").is_err());
    }

    #[test]
    fn growth_options_at_top_level() {
        let mut options = get_default_options();
        get_options_clap(
            "--astart 0.002 --cycle_limit 5000 --element Pile=200,210 --element Brace=300",
            &mut options,
        );

        assert_eq!(options.analysis, Analysis::Grow);
        assert!((options.a - 0.002).abs() <= f64::EPSILON);
        assert_eq!(options.cycle_limit, 5000);
        assert_eq!(options.elements.len(), 2);
        assert_eq!(options.elements[0].name, "Pile");
        assert_eq!(options.elements[0].stresses, vec![200.0, 210.0]);
        assert_eq!(options.elements[1].name, "Brace");
    }

    #[test]
    fn growth_options_in_subcommand() {
        let mut options = get_default_options();
        get_options_clap("grow --material paris:grp --smin 10 --trace", &mut options);

        assert_eq!(options.analysis, Analysis::Grow);
        assert_eq!(options.dadn, "paris:grp");
        assert_eq!(options.sigma_min, Some(10.0));
        assert!(options.trace);
    }

    #[test]
    fn subcommands_select_the_analysis() {
        let mut options = get_default_options();
        get_options_clap("dynamics --mass 2e6 --duration 30 --points 301", &mut options);
        assert_eq!(options.analysis, Analysis::Dynamics);
        assert!((options.dynamics.oscillator.mass - 2e6).abs() <= f64::EPSILON);
        assert!((options.dynamics.span.end - 30.0).abs() <= f64::EPSILON);
        assert_eq!(options.dynamics.span.points, 301);

        let mut options = get_default_options();
        get_options_clap("reactions --apex 50,40 --turbines 3", &mut options);
        assert_eq!(options.analysis, Analysis::Reactions);
        assert_eq!(options.frame.c, Point::new(50.0, 40.0));
        assert_eq!(options.frame.turbine_count, 3);
        assert_eq!(options.reactions_plot, None);

        let mut options = get_default_options();
        get_options_clap("reactions --plot model.svg", &mut options);
        assert_eq!(options.reactions_plot, Some("model.svg".to_string()));
        // the growth curves keep their own file
        assert_eq!(options.plot, None);

        let mut options = get_default_options();
        get_options_clap("beam --length 20 --load 150 --points 11", &mut options);
        assert_eq!(options.analysis, Analysis::Beam);
        assert_eq!(options.beam.length, Some(20.0));
        assert_eq!(options.beam.load, Some(150.0));
        assert_eq!(options.beam.points, 11);

        let mut options = get_default_options();
        get_options_clap("sketch --outfile layout.svg", &mut options);
        assert_eq!(options.analysis, Analysis::Sketch);
        assert_eq!(options.sketch_outfile, "layout.svg");
    }

    #[test]
    fn list_is_a_terminating_output() {
        let mut options = get_default_options();
        get_options_clap("--list", &mut options);
        assert_eq!(options.output, TerminatingOutput::List);
    }
}
