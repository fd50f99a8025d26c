//! Single degree of freedom response of the platform to a harmonic
//! wave force.
//!
//! Solves m x'' + c x' + k x = F0 sin(2 pi f t) with the classic
//! fourth order Runge-Kutta method on a fixed step.

use std::f64::consts::PI;

/// Mass, damping and stiffness of the idealised platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    /// mass (kg)
    pub mass: f64,
    /// damping coefficient (N s/m)
    pub damping: f64,
    /// stiffness (N/m)
    pub stiffness: f64,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            mass: 1e6,
            damping: 5e3,
            stiffness: 1e7,
        }
    }
}

impl Oscillator {
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.mass > 0.0) {
            return Err(format!("mass must be positive, got {}", self.mass));
        }
        if self.stiffness < 0.0 || self.damping < 0.0 {
            return Err(format!(
                "stiffness ({}) and damping ({}) must not be negative",
                self.stiffness, self.damping
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicForce {
    /// force amplitude (N)
    pub amplitude: f64,
    /// frequency (Hz)
    pub frequency: f64,
}

impl Default for HarmonicForce {
    fn default() -> Self {
        Self {
            amplitude: 1e6,
            frequency: 0.1,
        }
    }
}

impl HarmonicForce {
    pub fn at(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * t).sin()
    }
}

/// Output times and integration resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSpan {
    pub start: f64,
    pub end: f64,
    /// number of output times, including both ends
    pub points: usize,
    /// integration steps between output times
    pub substeps: usize,
}

impl Default for TimeSpan {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 60.0,
            points: 1000,
            substeps: 10,
        }
    }
}

/// Displacement and velocity at one output time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseSample {
    pub time: f64,
    pub displacement: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    pub displacement: f64,
    pub velocity: f64,
}

fn derivative(osc: &Oscillator, force: &HarmonicForce, t: f64, s: State) -> State {
    State {
        displacement: s.velocity,
        velocity: (force.at(t) - osc.damping * s.velocity - osc.stiffness * s.displacement)
            / osc.mass,
    }
}

fn rk4_step(osc: &Oscillator, force: &HarmonicForce, t: f64, s: State, h: f64) -> State {
    let shift = |s: State, k: State, f: f64| State {
        displacement: s.displacement + f * k.displacement,
        velocity: s.velocity + f * k.velocity,
    };

    let k1 = derivative(osc, force, t, s);
    let k2 = derivative(osc, force, t + h / 2.0, shift(s, k1, h / 2.0));
    let k3 = derivative(osc, force, t + h / 2.0, shift(s, k2, h / 2.0));
    let k4 = derivative(osc, force, t + h, shift(s, k3, h));

    State {
        displacement: s.displacement
            + h / 6.0 * (k1.displacement + 2.0 * k2.displacement + 2.0 * k3.displacement + k4.displacement),
        velocity: s.velocity
            + h / 6.0 * (k1.velocity + 2.0 * k2.velocity + 2.0 * k3.velocity + k4.velocity),
    }
}

/// Integrate the response from `initial` over `span`.
pub fn respond(
    osc: &Oscillator,
    force: &HarmonicForce,
    span: &TimeSpan,
    initial: State,
) -> Result<Vec<ResponseSample>, String> {
    osc.validate()?;
    if !(span.end > span.start) {
        return Err(format!(
            "end time ({}) must be after start time ({})",
            span.end, span.start
        ));
    }
    if span.points < 2 || span.substeps == 0 {
        return Err(format!(
            "need at least 2 output points and 1 substep, got {} and {}",
            span.points, span.substeps
        ));
    }

    let interval = (span.end - span.start) / (span.points - 1) as f64;
    let h = interval / span.substeps as f64;

    let mut state = initial;
    let mut samples = Vec::with_capacity(span.points);
    samples.push(ResponseSample {
        time: span.start,
        displacement: state.displacement,
        velocity: state.velocity,
    });

    for i in 1..span.points {
        let t0 = span.start + interval * (i - 1) as f64;
        for j in 0..span.substeps {
            state = rk4_step(osc, force, t0 + h * j as f64, state, h);
        }
        samples.push(ResponseSample {
            time: span.start + interval * i as f64,
            displacement: state.displacement,
            velocity: state.velocity,
        });
    }

    Ok(samples)
}
