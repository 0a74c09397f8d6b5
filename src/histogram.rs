//! Fixed-binning 1-D histograms of event quantities

use crate::numeric::Float;

/// Histogram with uniform bins over [x_min, x_max), plus flow counters
///
/// Values below x_min go to the underflow counter, values at or above x_max
/// go to the overflow counter, as in ROOT's TH1.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram1D {
    /// Histogram name
    pub name: String,

    /// Histogram title
    pub title: String,

    /// Lower edge of the first bin
    pub x_min: Float,

    /// Upper edge of the last bin
    pub x_max: Float,

    /// Per-bin contents, excluding under/overflow
    contents: Vec<Float>,

    /// Number of values below x_min
    pub underflow: Float,

    /// Number of values at or above x_max (or NaN)
    pub overflow: Float,

    /// Total number of fills
    pub entries: usize,
}
//
impl Histogram1D {
    /// Book an empty histogram
    pub fn new(name: &str, title: &str, n_bins: usize, x_min: Float, x_max: Float) -> Self {
        assert!(n_bins > 0, "A histogram needs at least one bin");
        assert!(x_min < x_max, "Histogram range must not be empty");
        Self {
            name: name.to_owned(),
            title: title.to_owned(),
            x_min,
            x_max,
            contents: vec![0.; n_bins],
            underflow: 0.,
            overflow: 0.,
            entries: 0,
        }
    }

    /// Number of bins, excluding under/overflow
    pub fn n_bins(&self) -> usize {
        self.contents.len()
    }

    /// Width of every bin
    pub fn bin_width(&self) -> Float {
        (self.x_max - self.x_min) / self.n_bins() as Float
    }

    /// Bin in which a value falls, if within range
    pub fn find_bin(&self, x: Float) -> Option<usize> {
        if !(x >= self.x_min && x < self.x_max) {
            return None;
        }
        // Rounding may push values just below x_max into a nonexistent bin
        let bin = ((x - self.x_min) / self.bin_width()) as usize;
        Some(bin.min(self.n_bins() - 1))
    }

    /// Record one value
    pub fn fill(&mut self, x: Float) {
        self.entries += 1;
        match self.find_bin(x) {
            Some(bin) => self.contents[bin] += 1.,
            None if x < self.x_min => self.underflow += 1.,
            None => self.overflow += 1.,
        }
    }

    /// Record a sequence of values
    pub fn fill_all(&mut self, values: &[Float]) {
        for &x in values {
            self.fill(x);
        }
    }

    /// Add up the contents of another histogram with the same binning
    pub fn merge(&mut self, other: &Self) {
        assert_eq!(self.n_bins(), other.n_bins(), "Binnings should match");
        assert_eq!(self.x_min, other.x_min, "Binnings should match");
        assert_eq!(self.x_max, other.x_max, "Binnings should match");
        for (mine, theirs) in self.contents.iter_mut().zip(&other.contents) {
            *mine += theirs;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.entries += other.entries;
    }

    /// Contents of all bins, excluding under/overflow
    pub fn contents(&self) -> &[Float] {
        &self.contents
    }

    /// Sum of in-range bin contents
    pub fn integral(&self) -> Float {
        self.contents.iter().sum()
    }

    /// Largest bin content
    pub fn maximum(&self) -> Float {
        self.contents.iter().copied().fold(0., Float::max)
    }

    /// Mean of the in-range values, estimated from bin centers
    pub fn mean(&self) -> Option<Float> {
        let integral = self.integral();
        if integral == 0. {
            return None;
        }
        let width = self.bin_width();
        let weighted_sum = self
            .contents
            .iter()
            .enumerate()
            .map(|(bin, &count)| count * (self.x_min + (bin as Float + 0.5) * width))
            .sum::<Float>();
        Some(weighted_sum / integral)
    }
}
