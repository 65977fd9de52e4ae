use outflow_core::{GalaxyParameters, OutflowState};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};

use crate::error::RunError;

/// One recorded step: the outflow state and the galaxy as it was at that
/// step (the SMBH mass grows along the run)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub state: OutflowState,
    pub galaxy: GalaxyParameters,
}

/// Why the step loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    MaxSteps,
    MaxTime,
    MaxRadius,
}

impl Termination {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MaxSteps => "max steps",
            Self::MaxTime => "max time",
            Self::MaxRadius => "max radius",
        }
    }
}

/// Ordered outflow history of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
    termination: Termination,
}

impl Trajectory {
    pub fn new(points: Vec<TrajectoryPoint>, termination: Termination) -> Self {
        Self {
            points,
            termination,
        }
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn into_points(self) -> Vec<TrajectoryPoint> {
        self.points
    }

    /// Keep only points whose radius is above `floor`
    pub fn above_radius(mut self, floor: f64) -> Self {
        self.points.retain(|point| point.state.radius > floor);
        self
    }

    /// Draw `min(output_length, len)` points with replacement, each weighted
    /// by its step length so the sample is close to uniform in time.
    pub fn resample<R: Rng + ?Sized>(
        &self,
        output_length: usize,
        rng: &mut R,
    ) -> Result<Self, RunError> {
        let weights = WeightedIndex::new(self.points.iter().map(|point| point.state.timestep))?;
        let size = output_length.min(self.points.len());
        let points = (0..size)
            .map(|_| self.points[weights.sample(rng)])
            .collect();

        Ok(Self::new(points, self.termination))
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
