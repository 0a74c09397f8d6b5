//! This module is in charge of outputting the final selection results to the
//! standard output and various files

use crate::{
    event::IndexPair,
    numeric::Float,
    render,
    resfin::FinalResults,
    Result,
};

use eyre::WrapErr;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    time::Duration,
};

/// Number of significant digits in file output
const SIG_DIGITS: usize = 6;

/// Output the selection results to the console and to disk
pub fn dump_results(results: &FinalResults, elapsed_time: Duration) -> Result<()> {
    let cfg = results.cfg;

    // Print out the cutflow on stdout
    results.print();

    // Draw the requested histogram
    render::save_png(&results.histogram, &cfg.image_file)?;

    // Write the results file
    let file = File::create(&cfg.results_file)
        .wrap_err_with(|| format!("Failed to create {}", cfg.results_file.display()))?;
    let mut out = BufWriter::new(file);
    write_results(&mut out, results, elapsed_time)
        .and_then(|()| out.flush())
        .wrap_err_with(|| format!("Failed to write {}", cfg.results_file.display()))
}

/// Write the selection results in text form
fn write_results(
    out: &mut impl Write,
    results: &FinalResults,
    elapsed_time: Duration,
) -> io::Result<()> {
    let cfg = results.cfg;
    let cutflow = &results.cutflow;
    let hist = &results.histogram;

    // Timestamp of when the run ended
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    write_kv(out, ("Date", timestamp.as_str()))?;
    write_kv(out, ("Elapsed time (s)", elapsed_time.as_secs_f64() as Float))?;
    writeln!(out, "---------------------------------------------")?;

    // Analysis setup
    let input = cfg.input_file.display().to_string();
    write_kv(out, ("Event file", input.as_str()))?;
    write_kv(out, ("Record store", cfg.store_name.as_str()))?;
    let window = cfg.top_cut.mass_window;
    write_kv(out, ("Top mass window, min (GeV)", window.min))?;
    write_kv(out, ("Top mass window, max (GeV)", window.max))?;
    write_kv(out, ("TvsQCD score cut", cfg.top_cut.score_cut))?;
    writeln!(out, "---------------------------------------------")?;

    // Cutflow
    write_kv(out, ("Number of events", cutflow.events))?;
    write_kv(out, ("... with a back-to-back dijet", cutflow.dijet_events))?;
    write_kv(out, ("... with at least one top jet", cutflow.top_events))?;
    write_kv(out, ("Dijet efficiency", cutflow.efficiency(cutflow.dijet_events)))?;
    write_kv(out, ("Top efficiency", cutflow.efficiency(cutflow.top_events)))?;
    writeln!(out, "---------------------------------------------")?;

    // Histogram summary
    write_kv(out, ("Histogram", hist.name.as_str()))?;
    write_kv(out, ("Title", hist.title.as_str()))?;
    write_kv(out, ("Number of bins", hist.n_bins()))?;
    write_kv(out, ("Lower edge", hist.x_min))?;
    write_kv(out, ("Upper edge", hist.x_max))?;
    write_kv(out, ("Entries", hist.entries))?;
    write_kv(out, ("Integral", hist.integral()))?;
    write_kv(out, ("Underflow", hist.underflow))?;
    write_kv(out, ("Overflow", hist.overflow))?;
    if let Some(mean) = hist.mean() {
        write_kv(out, ("Mean", mean))?;
    }

    // Per-event derived fields
    writeln!(out)?;
    writeln!(out, "{:>9} {:>15} {:>15}", "event", "DijetIdxs", "TopIdxs")?;
    for (event, selection) in results.selections.iter().enumerate() {
        let top_idxs = selection.top_idxs.map_or_else(|| "-".to_owned(), format_pair);
        writeln!(
            out,
            "{:>9} {:>15} {:>15}",
            event,
            format_pair(selection.dijet_idxs),
            top_idxs
        )?;
    }
    Ok(())
}

/// Display a pair of jet indices
fn format_pair(pair: IndexPair) -> String {
    format!("{{{}, {}}}", pair[0], pair[1])
}

/// Key-value text output with a fixed-size key column
fn write_kv(out: &mut impl Write, (key, value): (&str, impl WriteField)) -> io::Result<()> {
    write!(out, " {:<31}: ", key)?;
    value.write(out)?;
    writeln!(out)
}

/// Trait implemented by things which can be written as a results field
trait WriteField: Sized {
    /// Write down `self` to the output
    fn write(self, out: &mut impl Write) -> io::Result<()>;
}

impl WriteField for &str {
    fn write(self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl WriteField for usize {
    fn write(self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl WriteField for Float {
    // Results files have always used %g for floats, this is a close match
    fn write(self, out: &mut impl Write) -> io::Result<()> {
        write_engineering(out, self, SIG_DIGITS)
    }
}

/// Write a floating-point number using "engineering" notation
///
/// Analogous to the %g format of the C printf function, this method switches
/// between naive and scientific notation for floating-point numbers when the
/// number being printed becomes so small that printing leading zeroes could end
/// up larger than the scientific notation, or so large that we would be forced
/// to print more significant digits than requested.
///
fn write_engineering(writer: &mut impl Write, x: Float, sig_digits: usize) -> io::Result<()> {
    if x == 0. {
        // Zero is special because you can't take its log
        return write!(writer, "0");
    }

    let log_x = x.abs().log10();
    if !(-4. ..(sig_digits as Float)).contains(&log_x) {
        return write!(writer, "{:.1$e}", x, sig_digits - 1);
    }

    // Rust's precision controls the number of digits after the decimal point,
    // so it must be adjusted to the magnitude for a constant number of
    // significant digits.
    let int_digits = log_x.floor() as isize + 1;
    let precision = (sig_digits as isize - int_digits).max(0) as usize;

    // Trailing zeros and decimal point are dropped, as %g does
    let with_zeros = format!("{:.1$}", x, precision);
    if with_zeros.contains('.') {
        write!(
            writer,
            "{}",
            with_zeros.trim_end_matches('0').trim_end_matches('.')
        )
    } else {
        write!(writer, "{}", with_zeros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resacc::{
            tests::{config_for, sample_records},
            ResultsAccumulator,
        },
        selection::EventSelection,
    };

    fn engineering(x: Float) -> String {
        let mut buffer = Vec::new();
        write_engineering(&mut buffer, x, SIG_DIGITS).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn percent_g_formatting() {
        assert_eq!(engineering(0.), "0");
        assert_eq!(engineering(400.), "400");
        assert_eq!(engineering(0.94), "0.94");
        assert_eq!(engineering(-172.5), "-172.5");
        assert_eq!(engineering(0.001), "0.001");
        assert_eq!(engineering(1234567.), "1.23457e6");
        assert_eq!(engineering(0.00001), "1.00000e-5");
    }

    #[test]
    fn results_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_for("FatJet_msoftdrop");
        cfg.image_file = dir.path().join("hist.png");
        cfg.results_file = dir.path().join("results.out");

        let mut acc = ResultsAccumulator::new(&cfg);
        for record in sample_records() {
            let selection = EventSelection::new(&cfg.top_cut, &record).unwrap();
            acc.integrate(&record, selection).unwrap();
        }
        dump_results(&acc.finalize(), Duration::from_millis(1500)).unwrap();

        assert!(cfg.image_file.exists());
        let text = std::fs::read_to_string(&cfg.results_file).unwrap();
        assert!(text.contains(" Number of events               : 5\n"), "{text}");
        assert!(text.contains(" ... with a back-to-back dijet  : 3\n"), "{text}");
        assert!(text.contains(" Elapsed time (s)               : 1.5\n"), "{text}");
        assert!(text.contains("        0          {0, 1}          {1, 0}"), "{text}");
        assert!(text.contains("        3         {0, -1}               -"), "{text}");
    }
}
