//! Plot boundary for simulation output.
//!
//! A [`MotionPlots`] checks that a trajectory and its time grid line up, then
//! splits them into the three series of the motion figure: x against t,
//! y against t, and the planar path y against x. Drawing is left to a
//! [`Plotter`] implementation; [`CsvPlotter`] writes the series as text.

use std::io::Write;

use log::debug;

use crate::common::PlotError;
use crate::objects::phase_state::PhaseState;
use crate::world::scene::Simulation;

pub const FIGURE_TITLE: &str = "Motion Simulation";
pub const TIME_LABEL: &str = "t(seconds)";
pub const X_LABEL: &str = "x(m)";
pub const Y_LABEL: &str = "y(m)";

/// One 2-D line plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    fn new(x_label: &'static str, y_label: &'static str, xs: &[f64], ys: &[f64]) -> Self {
        Series {
            x_label,
            y_label,
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
        }
    }
}

/// The three plots of a motion simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPlots {
    pub title: &'static str,
    pub x_vs_t: Series,
    pub y_vs_t: Series,
    pub y_vs_x: Series,
}

impl MotionPlots {
    /// Fails if `states` and `times` differ in length.
    pub fn new(states: &[PhaseState], times: &[f64]) -> Result<Self, PlotError> {
        if states.len() != times.len() {
            return Err(PlotError::LengthMismatch { states: states.len(), times: times.len() });
        }

        let xs: Vec<f64> = states.iter().map(|s| s.position.x).collect();
        let ys: Vec<f64> = states.iter().map(|s| s.position.y).collect();

        Ok(MotionPlots {
            title: FIGURE_TITLE,
            x_vs_t: Series::new(TIME_LABEL, X_LABEL, times, &xs),
            y_vs_t: Series::new(TIME_LABEL, Y_LABEL, times, &ys),
            y_vs_x: Series::new(X_LABEL, Y_LABEL, &xs, &ys),
        })
    }

    pub fn from_simulation(simulation: &Simulation) -> Result<Self, PlotError> {
        Self::new(&simulation.states, &simulation.times)
    }

    /// The series in figure order (top to bottom).
    pub fn series(&self) -> [&Series; 3] {
        [&self.x_vs_t, &self.y_vs_t, &self.y_vs_x]
    }
}

/// Something that can draw a [`MotionPlots`].
pub trait Plotter {
    fn render(&mut self, plots: &MotionPlots) -> Result<(), PlotError>;
}

/// Writes each series as a CSV block headed by its axis labels.
pub struct CsvPlotter<W: Write> {
    writer: W,
}

impl<W: Write> CsvPlotter<W> {
    pub fn new(writer: W) -> Self {
        CsvPlotter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Plotter for CsvPlotter<W> {
    fn render(&mut self, plots: &MotionPlots) -> Result<(), PlotError> {
        writeln!(self.writer, "# {}", plots.title)?;
        for series in plots.series() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{},{}", series.x_label, series.y_label)?;
            for (x, y) in &series.points {
                writeln!(self.writer, "{},{}", x, y)?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Validates a trajectory against its time grid and hands it to `plotter`.
pub fn plot<P: Plotter + ?Sized>(
    states: &[PhaseState],
    times: &[f64],
    plotter: &mut P,
) -> Result<(), PlotError> {
    let plots = MotionPlots::new(states, times)?;
    debug!("plotting {} points", times.len());
    plotter.render(&plots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<PhaseState> {
        vec![
            PhaseState::from_array([0.0, 5.0, 1.0, 0.0]),
            PhaseState::from_array([1.0, 4.0, 1.0, -2.0]),
            PhaseState::from_array([2.0, 1.0, 1.0, -4.0]),
        ]
    }

    #[test]
    fn test_motion_plots_series() {
        let plots = MotionPlots::new(&states(), &[0.0, 1.0, 2.0]).unwrap();
        assert_eq!(plots.title, "Motion Simulation");
        assert_eq!(plots.x_vs_t.points, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(plots.y_vs_t.points, vec![(0.0, 5.0), (1.0, 4.0), (2.0, 1.0)]);
        assert_eq!(plots.y_vs_x.points, vec![(0.0, 5.0), (1.0, 4.0), (2.0, 1.0)]);
        assert_eq!(plots.y_vs_x.x_label, X_LABEL);
        assert_eq!(plots.y_vs_t.x_label, TIME_LABEL);
    }

    #[test]
    fn test_motion_plots_length_mismatch() {
        assert_eq!(
            MotionPlots::new(&states(), &[0.0, 1.0]),
            Err(PlotError::LengthMismatch { states: 3, times: 2 })
        );
    }

    #[test]
    fn test_csv_plotter() {
        let mut plotter = CsvPlotter::new(Vec::new());
        plot(&states()[..2], &[0.0, 0.5], &mut plotter).unwrap();
        let text = String::from_utf8(plotter.into_inner()).unwrap();
        let expected = "# Motion Simulation\n\
                        \n\
                        t(seconds),x(m)\n0,0\n0.5,1\n\
                        \n\
                        t(seconds),y(m)\n0,5\n0.5,4\n\
                        \n\
                        x(m),y(m)\n0,5\n1,4\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_plot_rejects_before_rendering() {
        struct Counting(usize);
        impl Plotter for Counting {
            fn render(&mut self, _plots: &MotionPlots) -> Result<(), PlotError> {
                self.0 += 1;
                Ok(())
            }
        }
        let mut counter = Counting(0);
        assert!(plot(&states(), &[0.0], &mut counter).is_err());
        assert_eq!(counter.0, 0);
        plot(&states(), &[0.0, 1.0, 2.0], &mut counter).unwrap();
        assert_eq!(counter.0, 1);
    }
}
