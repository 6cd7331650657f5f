use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Debug, PartialEq, Eq)]
pub enum TrackError {
    Empty,
    UnpairedKeys(usize, usize),
    BadTime(usize),
    UnorderedTimes(usize),
}

impl Display for TrackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::Empty => write!(f, "Track has no keyframes"),
            TrackError::UnpairedKeys(times, values) => {
                write!(
                    f,
                    "Unpaired track keys: {} times, {} values",
                    times, values
                )
            }
            TrackError::BadTime(index) => {
                write!(f, "Track time #{} is not a finite ratio in [0, 1]", index)
            }
            TrackError::UnorderedTimes(index) => {
                write!(f, "Track time #{} is not greater than its predecessor", index)
            }
        }
    }
}

impl Error for TrackError {}

/// A single scalar keyframe curve on the normalized `[0, 1]` time domain.
///
/// Independent of skeleton extraction; kept alongside it because runtime
/// animation consumes both.
#[derive(Debug, Clone)]
pub struct FloatTrack {
    times: Vec<f32>,
    values: Vec<f32>,
}

impl FloatTrack {
    /// Builds a track from paired key times and values. Times must be
    /// finite, inside `[0, 1]` and strictly increasing.
    pub fn new(times: Vec<f32>, values: Vec<f32>) -> Result<Self, TrackError> {
        if times.len() != values.len() {
            return Err(TrackError::UnpairedKeys(times.len(), values.len()));
        }
        if times.is_empty() {
            return Err(TrackError::Empty);
        }
        for (index, &time) in times.iter().enumerate() {
            if !time.is_finite() || !(0.0..=1.0).contains(&time) {
                return Err(TrackError::BadTime(index));
            }
            if index > 0 && time <= times[index - 1] {
                return Err(TrackError::UnorderedTimes(index));
            }
        }
        Ok(Self { times, values })
    }

    pub fn times(&self) -> &[f32] {
        &self.times
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Samples the track at `ratio`, clamped to `[0, 1]`.
    ///
    /// Linear interpolation between the two bracketing keys; outside the
    /// keyed range the nearest key's value is returned.
    pub fn sample(&self, ratio: f32) -> f32 {
        let ratio = ratio.clamp(0.0, 1.0);

        // First key with a time strictly greater than the sampled ratio.
        let next = self.times.partition_point(|&time| time <= ratio);
        if next == 0 {
            return self.values[0];
        }
        // partition_point returns len when ratio is at or past the last
        // key, so step back onto the last interval.
        let next = next.min(self.times.len() - 1);
        if next == 0 {
            return self.values[0];
        }

        let (tk0, tk1) = (self.times[next - 1], self.times[next]);
        let (vk0, vk1) = (self.values[next - 1], self.values[next]);
        // Clamped so a ratio past the last key holds its value instead of
        // extrapolating.
        let alpha = ((ratio - tk0) / (tk1 - tk0)).clamp(0.0, 1.0);
        vk0 + (vk1 - vk0) * alpha
    }
}

#[cfg(test)]
mod test {
    use super::{FloatTrack, TrackError};

    #[test]
    fn test_validation() {
        assert_eq!(
            FloatTrack::new(vec![], vec![]).unwrap_err(),
            TrackError::Empty
        );
        assert_eq!(
            FloatTrack::new(vec![0.0, 1.0], vec![1.0]).unwrap_err(),
            TrackError::UnpairedKeys(2, 1)
        );
        assert_eq!(
            FloatTrack::new(vec![0.0, 1.5], vec![1.0, 2.0]).unwrap_err(),
            TrackError::BadTime(1)
        );
        assert_eq!(
            FloatTrack::new(vec![0.5, 0.5], vec![1.0, 2.0]).unwrap_err(),
            TrackError::UnorderedTimes(1)
        );
    }

    #[test]
    fn test_single_key_is_constant() {
        let track = FloatTrack::new(vec![0.5], vec![3.0]).unwrap();
        assert_eq!(track.sample(0.0), 3.0);
        assert_eq!(track.sample(0.5), 3.0);
        assert_eq!(track.sample(1.0), 3.0);
    }

    #[test]
    fn test_linear_interpolation() {
        let track = FloatTrack::new(vec![0.0, 0.5, 1.0], vec![0.0, 2.0, 1.0]).unwrap();
        assert_eq!(track.sample(0.0), 0.0);
        assert_eq!(track.sample(0.25), 1.0);
        assert_eq!(track.sample(0.5), 2.0);
        assert_eq!(track.sample(0.75), 1.5);
        assert_eq!(track.sample(1.0), 1.0);
    }

    #[test]
    fn test_sample_clamps_time() {
        let track = FloatTrack::new(vec![0.0, 1.0], vec![4.0, 8.0]).unwrap();
        assert_eq!(track.sample(-1.0), 4.0);
        assert_eq!(track.sample(2.0), 8.0);
    }

    #[test]
    fn test_clamp_to_edge_keys() {
        let track = FloatTrack::new(vec![0.25, 0.75], vec![1.0, 3.0]).unwrap();
        // Before the first key and after the last one, the edge value holds.
        assert_eq!(track.sample(0.0), 1.0);
        assert_eq!(track.sample(0.5), 2.0);
        assert_eq!(track.sample(1.0), 3.0);
    }
}
