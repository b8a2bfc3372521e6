/// Picks every Nth decoded frame of a video.
///
/// Frame counts are 1-based: with an interval of 25 the frames numbered
/// 25, 50, 75, ... are analysed, and a video shorter than the interval
/// contributes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSampler {
    interval: usize,
}

impl FrameSampler {
    /// An interval of zero is treated as one.
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn is_sampled(&self, frame_count: usize) -> bool {
        frame_count > 0 && frame_count % self.interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_interval_picks_multiples() {
        let sampler = FrameSampler::new(25);
        let picked: Vec<usize> = (1..=100).filter(|&c| sampler.is_sampled(c)).collect();
        assert_eq!(picked, vec![25, 50, 75, 100]);
    }

    #[test]
    fn test_interval_one_picks_everything() {
        let sampler = FrameSampler::new(1);
        assert!((1..=10).all(|c| sampler.is_sampled(c)));
    }

    #[rstest]
    #[case(4, 0, false)]
    #[case(4, 3, false)]
    #[case(4, 4, true)]
    #[case(4, 8, true)]
    #[case(4, 9, false)]
    fn test_is_sampled(#[case] interval: usize, #[case] count: usize, #[case] expected: bool) {
        assert_eq!(FrameSampler::new(interval).is_sampled(count), expected);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        assert_eq!(FrameSampler::new(0).interval(), 1);
    }
}
