//! Shear force and bending moment along a simply supported beam
//! carrying a uniformly distributed load.

/// Shear and moment at one position along the beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamStation {
    /// distance from the left support (m)
    pub x: f64,
    /// shear force (N)
    pub shear: f64,
    /// bending moment (N m)
    pub moment: f64,
}

/// Number of stations used when none is given.
pub const DEFAULT_STATIONS: usize = 100;

pub fn shear(length: f64, load: f64, x: f64) -> f64 {
    load * (length / 2.0 - x)
}

pub fn moment(length: f64, load: f64, x: f64) -> f64 {
    load * x * (length - x) / 2.0
}

/// `points` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Sample shear and moment at `points` stations over a span of
/// `length` carrying `load` per unit length.
pub fn distribution(length: f64, load: f64, points: usize) -> Result<Vec<BeamStation>, String> {
    if !(length > 0.0) {
        return Err(format!("beam length must be positive, got {}", length));
    }
    if points < 2 {
        return Err(format!("need at least 2 stations along the beam, got {}", points));
    }

    Ok(linspace(0.0, length, points)
        .into_iter()
        .map(|x| BeamStation {
            x,
            shear: shear(length, load, x),
            moment: moment(length, load, x),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(0.0, 100.0, 100);
        assert_eq!(xs.len(), 100);
        assert!(xs[0].abs() <= f64::EPSILON);
        assert!((xs[99] - 100.0).abs() <= f64::EPSILON);
        assert!((xs[1] - 100.0 / 99.0).abs() < 1e-12);
    }

    #[test]
    fn end_shears_and_midspan_moment() {
        let (length, load) = (100.0, 98.1);
        let stations = distribution(length, load, 101).unwrap();

        assert!((stations[0].shear - load * length / 2.0).abs() < 1e-9);
        assert!((stations[100].shear + load * length / 2.0).abs() < 1e-9);
        assert!(stations[0].moment.abs() < 1e-9);
        assert!(stations[100].moment.abs() < 1e-9);
        assert!((stations[50].moment - load * length * length / 8.0).abs() < 1e-6);
        assert!(stations[50].shear.abs() < 1e-9);
    }

    #[test]
    fn shear_is_slope_of_moment() {
        let (length, load) = (50.0, 196.2);
        let stations = distribution(length, load, 200).unwrap();

        for pair in stations.windows(2) {
            let slope = (pair[1].moment - pair[0].moment) / (pair[1].x - pair[0].x);
            let mid_shear = (pair[0].shear + pair[1].shear) / 2.0;
            assert!((slope - mid_shear).abs() < 1e-6 * load * length);
        }
    }

    #[test]
    fn bad_inputs_are_rejected() {
        assert!(distribution(0.0, 1.0, 10).is_err());
        assert!(distribution(10.0, 1.0, 1).is_err());
    }
}
