/// floatgrow
///
/// Fatigue life and structural checks for the support structure of a
/// floating offshore wind turbine.
///
/// The main calculation grows a through crack in each structural
/// member under constant amplitude loading using Paris' law and
/// reports the cycle at which the crack reaches the failure length.
/// The peak stress of each member is the mean of the stresses
/// observed in the finite element model of the platform.
///
/// Most of the calculations are done through calls to the associated
/// **fatigue** library. The main program turns the command line flags
/// into a **FloatOptions** structure, runs the requested analysis and
/// writes out the results.
///
/// Think of the program flow as
///
/// 1. Read the command line over the default options
/// 2. Pick the analysis from the subcommand
/// 3. Build the library values from the options
/// 4. Run the analysis
/// 5. Write out the tables and any requested svg files

#[macro_use]
extern crate clap;
extern crate env_logger;
extern crate fatigue;
extern crate log;

use fatigue::grow::elements::{display_failure_table, ElementResult};
use fatigue::grow::{display_trace, display_trace_header, Outcome};
use fatigue::plot::Chart;
use fatigue::sketch::Structure;
use fatigue::{beam, dynamics, frame, statics, COMMENT};
use log::{error, info};
use options::{builder, clap::get_options_clap, Analysis, FloatOptions, TerminatingOutput};

mod list;
mod options;

fn main() {
    env_logger::init();

    let mut options = options::get_default_options();
    get_options_clap("", &mut options);
    println!("{}floatgrow: version {}", COMMENT, crate_version!());
    println!("{}", COMMENT);
    if options.verbosity == options::Verbosity::Verbose {
        println!("{}Options: ", COMMENT);
        println!("{}", options);
    }

    // Any request for info output terminates the program
    if options.output == TerminatingOutput::List {
        list::print_list();
        std::process::exit(0);
    }

    let result = match options.analysis {
        Analysis::Grow => grow(&options),
        Analysis::Reactions => reactions(&options),
        Analysis::Beam => beam_diagram(&options),
        Analysis::Dynamics => dynamic_response(&options),
        Analysis::Frame => frame_analysis(),
        Analysis::Sketch => sketch(&options),
    };

    if let Err(why) = result {
        error!("Error: {}", why);
        std::process::exit(1)
    }
}

fn grow(options: &FloatOptions) -> Result<(), String> {
    let (message, results) = builder::grow::run_growth(options)?;
    println!("{}", message);

    if options.trace {
        for result in &results {
            display_trace_header(&result.name);
            display_trace(&result.trace);
        }
    }

    display_failure_table(&results);

    if let Some(file) = &options.plot {
        growth_chart(&results, options.a_limit).save(file)?;
        println!("{}Crack growth curves written to file '{}'", COMMENT, file);
    }

    Ok(())
}

fn growth_chart(results: &[ElementResult], a_limit: f64) -> Chart {
    let mut chart = Chart::new(
        "Crack Growth Over Cycles for Different Elements",
        "Cycles",
        "Crack Length (m)",
    );
    for result in results {
        let points = result
            .trace
            .samples
            .iter()
            .map(|s| (s.cycle as f64, s.a))
            .collect();
        chart.add_series(&growth_label(result), points);
    }
    chart.add_reference("Failure Threshold", a_limit);
    chart
}

fn growth_label(result: &ElementResult) -> String {
    match result.trace.outcome {
        Outcome::Failed { cycle } => format!("{} - Failure at {} cycles", result.name, cycle),
        Outcome::Survived { cycles } => {
            format!("{} - No failure within {} cycles", result.name, cycles)
        }
    }
}

fn reactions(options: &FloatOptions) -> Result<(), String> {
    let reactions = options.frame.solve_reactions()?;
    statics::display_reactions(&reactions);

    if let Some(file) = &options.reactions_plot {
        statics::save_model(&options.frame, &reactions, file)?;
        println!("{}Structural model written to file '{}'", COMMENT, file);
    }

    Ok(())
}

fn beam_diagram(options: &FloatOptions) -> Result<(), String> {
    // (name, span, load) for each beam to draw
    let spans = match options.beam.length {
        Some(length) => {
            let load = options
                .beam
                .load
                .unwrap_or(options.frame.beam_weight / length);
            vec![("beam".to_string(), length, load)]
        }
        None => {
            let reactions = options.frame.solve_reactions()?;
            ["AB", "AC", "BC"]
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let load = options.beam.load.unwrap_or(reactions.distributed[i]);
                    (name.to_string(), reactions.lengths[i], load)
                })
                .collect()
        }
    };

    let mut chart = Chart::new(
        "Shear Force and Bending Moment Distribution",
        "Beam Length (m)",
        "Force (N) / Moment (N m)",
    );

    for (name, length, load) in spans {
        let stations = beam::distribution(length, load, options.beam.points)?;

        println!("{}Beam {}: span {:.3} m, load {:.3} N/m", COMMENT, name, length, load);
        println!("{:>12} {:>14} {:>14}", "x", "shear", "moment");
        for station in &stations {
            println!("{:12.4} {:14.4} {:14.4}", station.x, station.shear, station.moment);
        }

        chart.add_series(
            &format!("{} shear (N)", name),
            stations.iter().map(|s| (s.x, s.shear)).collect(),
        );
        chart.add_series(
            &format!("{} moment (N m)", name),
            stations.iter().map(|s| (s.x, s.moment)).collect(),
        );
    }

    if let Some(file) = &options.beam.plot {
        chart.save(file)?;
        println!("{}Beam diagram written to file '{}'", COMMENT, file);
    }

    Ok(())
}

fn dynamic_response(options: &FloatOptions) -> Result<(), String> {
    let settings = &options.dynamics;
    let samples = dynamics::respond(
        &settings.oscillator,
        &settings.force,
        &settings.span,
        dynamics::State::default(),
    )?;

    println!(
        "{}Natural frequency {:.4} rad/s, damping ratio {:.3e}",
        COMMENT,
        settings.oscillator.natural_frequency(),
        settings.oscillator.damping_ratio()
    );
    println!("{:>12} {:>16} {:>16}", "time", "displacement", "velocity");
    for sample in &samples {
        println!("{:12.4} {:16.6e} {:16.6e}", sample.time, sample.displacement, sample.velocity);
    }

    let peak = samples.iter().map(|s| s.displacement.abs()).fold(0.0, f64::max);
    info!("peak displacement {:e} m", peak);

    if let Some(file) = &settings.plot {
        response_chart(&samples).save(file)?;
        println!("{}Response written to file '{}'", COMMENT, file);
    }

    Ok(())
}

fn response_chart(samples: &[dynamics::ResponseSample]) -> Chart {
    let mut chart = Chart::new(
        "Dynamic Response of Floating Platform",
        "Time (s)",
        "Response",
    );
    chart
        .add_series(
            "Displacement (m)",
            samples.iter().map(|s| (s.time, s.displacement)).collect(),
        )
        .add_series(
            "Velocity (m/s)",
            samples.iter().map(|s| (s.time, s.velocity)).collect(),
        );
    chart
}

fn frame_analysis() -> Result<(), String> {
    let result = frame::default_frame()?.analyse()?;
    frame::display_frame_result(&result);
    Ok(())
}

fn sketch(options: &FloatOptions) -> Result<(), String> {
    let structure = Structure::default();

    println!("{}Member lengths", COMMENT);
    for (start, end, length) in structure.member_lengths()? {
        println!("{:>14} {:>14} {:10.4}", start, end, length);
    }

    structure.save(&options.sketch_outfile)?;
    println!("{}Structure sketch written to file '{}'", COMMENT, options.sketch_outfile);
    Ok(())
}
