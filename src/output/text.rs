//! Human-readable text output

use crate::config::Config;
use crate::stats::TrialStats;
use crate::worker::ExperimentOutcome;

/// The one-line result summary
///
/// `"<avg> words read on average, or approx <books> books, over <n> <experiment> trials"`
pub fn summary_line(stats: &TrialStats, outcome: &ExperimentOutcome, config: &Config) -> String {
    let avg = stats.mean().unwrap_or(0.0);
    let books = stats.books(config.model.words_per_book).unwrap_or(0.0);

    format!(
        "{:.0} words read on average, or approx {:.1} books, over {} {} trials",
        avg,
        books,
        stats.count(),
        outcome.experiment
    )
}

/// Print results to console
///
/// Always prints the summary line. With `detailed` output it adds the spread
/// of results and how trials were distributed over the workers.
pub fn print_results(outcome: &mut ExperimentOutcome, config: &Config) {
    let stats = outcome.aggregator.aggregate().clone();
    println!("{}", summary_line(&stats, outcome, config));

    if !config.output.detailed {
        return;
    }

    let words_per_book = config.model.words_per_book;

    println!();
    println!("═══════════════════════════════════════════════════════════");
    println!("                    TRIAL RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Experiment:  {} (threshold {})", outcome.experiment, config.run.threshold);
    println!("Model:       {} of {} words, zipf s={} v={}",
             format_number(config.model.words_to_learn),
             format_number(config.model.vocab_size),
             config.model.zipf_s,
             config.model.zipf_v);
    println!("Elapsed:     {:.3}s on {} workers", outcome.elapsed.as_secs_f64(), outcome.workers);
    println!();

    println!("Words read:");
    if let (Some(min), Some(max)) = (stats.min(), stats.max()) {
        println!("  Min:    {} ({:.1} books)", format_number(min), min as f64 / words_per_book as f64);
        println!("  Mean:   {:.0}", stats.mean().unwrap_or(0.0));
        println!("  Max:    {} ({:.1} books)", format_number(max), max as f64 / words_per_book as f64);
        if let Some(stddev) = stats.stddev() {
            println!("  Stddev: {:.0}", stddev);
        }

        println!();
        println!("  Percentiles:");
        for &p in &[50.0, 90.0, 99.0] {
            if let Some(val) = stats.percentile(p) {
                println!("    p{:<4}: {}", p, format_number(val));
            }
        }
    }

    println!();
    println!("Per-worker trials:");
    for (worker_id, worker_stats) in outcome.aggregator.per_worker() {
        println!("  worker {:>3}: {} trials, mean {:.0} words",
                 worker_id,
                 worker_stats.count(),
                 worker_stats.mean().unwrap_or(0.0));
    }
    println!("  busy time: {:.3}s", outcome.aggregator.busy_time().as_secs_f64());
}

/// Format number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
