//! Mechanism for loading and sharing the analysis configuration

use crate::{
    numeric::Float,
    toptag::{MassWindow, TopCut},
    Result,
};

use eyre::{ensure, format_err, WrapErr};
use log::info;

use std::{fs, path::PathBuf, str::FromStr};

/// Analysis configuration
#[derive(Debug)]
pub struct Configuration {
    /// Event file to be read
    pub input_file: PathBuf,

    /// Name of the record store within the event file
    pub store_name: String,

    /// Top identification working point
    pub top_cut: TopCut,

    /// Column to be drawn into the histogram
    pub hist_column: String,

    /// Number of histogram bins
    pub hist_bins: usize,

    /// Lower edge of the histogram range
    pub hist_min: Float,

    /// Upper edge of the histogram range
    pub hist_max: Float,

    /// Where the rendered histogram goes
    pub image_file: PathBuf,

    /// Where the selection results go
    pub results_file: PathBuf,
}
//
impl Configuration {
    /// Load the configuration from a file, check it, and log it
    pub fn load(file_name: &str) -> Result<Self> {
        let config_str = fs::read_to_string(file_name)?;
        let config = Self::parse(&config_str)?;
        config.print();
        Ok(config)
    }

    /// Decode and check the contents of a configuration file
    pub fn parse(config_str: &str) -> Result<Self> {
        // Configuration items are the first non-whitespace chunk of text on
        // each line, blank lines are ignored, anything after the value is a
        // free-form comment.
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // Items come in a fixed order, each one is labeled with the field it
        // ends up in so that a bad or missing line can be named
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| format_err!("Missing configuration of {}", name))
        };

        // Decode the configuration items into concrete values
        let config = Configuration {
            input_file: next_item("input_file")?.parse::<PathBuf>()?,
            store_name: next_item("store_name")?.parse::<String>()?,
            top_cut: TopCut::new(
                MassWindow::new(
                    next_item("top_mass_min")?.parse::<Float>()?,
                    next_item("top_mass_max")?.parse::<Float>()?,
                ),
                next_item("top_score_cut")?.parse::<Float>()?,
            ),
            hist_column: next_item("hist_column")?.parse::<String>()?,
            hist_bins: next_item("hist_bins")?.parse::<usize>()?,
            hist_min: next_item("hist_min")?.parse::<Float>()?,
            hist_max: next_item("hist_max")?.parse::<Float>()?,
            image_file: next_item("image_file")?.parse::<PathBuf>()?,
            results_file: next_item("results_file")?.parse::<PathBuf>()?,
        };

        // Check that the top working point makes sense
        let window = config.top_cut.mass_window;
        ensure!(
            window.min < window.max,
            "Top mass window [{}, {}] is empty",
            window.min,
            window.max
        );
        ensure!(
            config.top_cut.score_cut.is_finite(),
            "Top score cut must be a finite number"
        );

        // Check that a histogram can be booked
        ensure!(config.hist_bins > 0, "Please use at least one histogram bin");
        ensure!(
            config.hist_min < config.hist_max,
            "Histogram range [{}, {}] is empty",
            config.hist_min,
            config.hist_max
        );

        Ok(config)
    }

    /// Log the configuration
    pub fn print(&self) {
        info!("Input file        : {}", self.input_file.display());
        info!("Record store      : {}", self.store_name);
        info!("Top mass window   : {:?}", self.top_cut.mass_window);
        info!("Top score cut     : {}", self.top_cut.score_cut);
        info!("Histogram column  : {}", self.hist_column);
        info!(
            "Histogram binning : {} bins in [{}, {})",
            self.hist_bins, self.hist_min, self.hist_max
        );
        info!("Image file        : {}", self.image_file.display());
        info!("Results file      : {}", self.results_file.display());
    }
}

/// Raw text of one configuration line, with the name of its destination field
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: ::std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))
    }
}
