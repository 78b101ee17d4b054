//! `raylut` command-line entrypoint.
//!
//! Prints the raycaster lookup tables as C++ literals, runs the line-height
//! calibration, and sweeps the approximation error. Reports can be viewed as
//! terminal charts (crossterm, framebuffer renderer) or dumped as plain text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing_subscriber::EnvFilter;

use raylut::config::LutConfig;
use raylut::core::{
    sweep, CalibrationReport, Calibrator, ErrorSample, ErrorSummary, LineHeightApproximator,
    LineHeightTable, TableSet,
};
use raylut::term::{
    analysis_chart, calibration_chart, to_plain_text, Chart, ChartView, FrameBuffer,
    TerminalRenderer, Viewport,
};

/// Viewport used for `--plain` output.
const PLAIN_VIEWPORT: Viewport = Viewport {
    width: 100,
    height: 40,
};

#[derive(Parser, Debug)]
#[command(name = "raylut", version, about = "Fixed-point lookup tables for a raycasting renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file; omitted fields keep the reference values
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the camera, delta-dist, sine and line-height tables as C++ literals
    Tables {
        /// Take bracket 0 from a fresh calibration instead of the configuration
        #[arg(long)]
        calibrate: bool,
    },

    /// Search for the bracket 0 value with the smallest worst-case error
    Calibrate {
        /// Print the calibration report as JSON
        #[arg(long)]
        json: bool,
        /// Show max/avg error per candidate as a chart
        #[arg(long)]
        plot: bool,
        /// Print the chart as plain text instead of opening the viewer
        #[arg(long, requires = "plot")]
        plain: bool,
    },

    /// Compare the approximation against exact division over a distance sweep
    Analyze {
        /// Bracket 0 value to install (default: uncalibrated closed form)
        #[arg(long = "override", value_name = "N", conflicts_with = "optimal")]
        override_value: Option<i16>,
        /// Calibrate first and analyze the optimal table
        #[arg(long)]
        optimal: bool,
        /// Show heights and error as charts
        #[arg(long)]
        plot: bool,
        /// Print the charts as plain text instead of opening the viewer
        #[arg(long, requires = "plot")]
        plain: bool,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => LutConfig::load(path)?,
        None => LutConfig::default(),
    };

    match cli.command {
        Command::Tables { calibrate } => print_tables(&config, calibrate),
        Command::Calibrate { json, plot, plain } => calibrate(&config, json, plot, plain),
        Command::Analyze {
            override_value,
            optimal,
            plot,
            plain,
        } => analyze(&config, override_value, optimal, plot, plain),
        Command::Config => {
            println!("{}", config.to_json_pretty()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_tables(config: &LutConfig, calibrate: bool) -> Result<()> {
    let mut params = config.tables;
    if calibrate {
        let best = Calibrator::new(config.calibration)?
            .run()
            .context("calibrating bracket 0")?;
        params.line_height_override = best.candidate_value;
    }

    let tables = TableSet::generate(&params).context("generating tables")?;
    for line in tables.emit() {
        println!("{line}");
    }
    Ok(())
}

fn calibrate(config: &LutConfig, json: bool, plot: bool, plain: bool) -> Result<()> {
    let calibrator = Calibrator::new(config.calibration)?;
    let trials = calibrator.trials()?;
    let report = calibrator.report_from(&trials)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_calibration(&report);
    }

    if plot {
        let chart = calibration_chart(&trials, &report.best);
        show(&[chart], plain)?;
    }
    Ok(())
}

fn print_calibration(report: &CalibrationReport) {
    let best = &report.best;
    println!(
        "optimal lhTableApprox[0] = {} (0x{:04X})",
        best.candidate_value, best.candidate_value
    );
    println!("  max error: {} px", best.max_abs_error);
    println!("  avg error: {:.3} px", best.avg_abs_error);
    println!(
        "  searched:  {} candidates x {} distances",
        report.candidates_tested, report.samples_per_candidate
    );
}

fn analyze(
    config: &LutConfig,
    override_value: Option<i16>,
    optimal: bool,
    plot: bool,
    plain: bool,
) -> Result<()> {
    let geometry = &config.tables;
    let closed_form = LineHeightTable::closed_form(geometry.screen_height, geometry.max_int_distance)?;

    let (title, table) = if optimal {
        let table = Calibrator::new(config.calibration)?.calibrated_table()?;
        (format!("Optimal table (lhTableApprox[0] = {})", table.entries()[0]), table)
    } else if let Some(value) = override_value {
        let table = closed_form
            .with_override(value)
            .with_context(|| format!("installing override {value}"))?;
        (format!("Override lhTableApprox[0] = {value}"), table)
    } else {
        ("Closed-form table".to_string(), closed_form.clone())
    };

    let samples = run_sweep(table, config)?;
    print_summary(&title, &samples);

    if plot {
        let mut charts = vec![analysis_chart(&title, &samples)];
        // Second tab for side-by-side comparison with the uncalibrated table.
        if optimal || override_value.is_some() {
            let baseline = run_sweep(closed_form, config)?;
            charts.push(analysis_chart("Closed-form table", &baseline));
        }
        show(&charts, plain)?;
    }
    Ok(())
}

fn run_sweep(table: LineHeightTable, config: &LutConfig) -> Result<Vec<ErrorSample>> {
    let screen_height = table.screen_height();
    let approx = LineHeightApproximator::new(table);
    let samples = sweep(&approx, screen_height, config.analysis).context("analysis sweep")?;
    tracing::info!(samples = samples.len(), "swept analysis domain");
    Ok(samples)
}

fn print_summary(title: &str, samples: &[ErrorSample]) {
    println!("{title}");
    match ErrorSummary::from_samples(samples) {
        Some(summary) => {
            println!("  samples:   {}", summary.samples);
            println!(
                "  max error: {} px at perpWallDist {:.3}",
                summary.max_abs_error,
                summary.worst_distance as f64 / 256.0
            );
            println!("  avg error: {:.3} px", summary.avg_abs_error);
        }
        None => println!("  no samples"),
    }
}

/// Plain-text dump, or the interactive viewer (Tab cycles charts, q/Esc quits).
fn show(charts: &[Chart], plain: bool) -> Result<()> {
    let view = ChartView::default();
    if plain {
        for chart in charts {
            print!("{}", to_plain_text(&view.render(chart, PLAIN_VIEWPORT)));
        }
        return Ok(());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = view_loop(&mut term, &view, charts);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn view_loop(term: &mut TerminalRenderer, view: &ChartView, charts: &[Chart]) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut current = 0usize;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut chart = charts[current].clone();
        if charts.len() > 1 {
            chart.footer = Some(format!(
                "[{}/{}] Tab: next chart  q: quit",
                current + 1,
                charts.len()
            ));
        } else {
            chart.footer = Some("q: quit".to_string());
        }
        view.render_into(&chart, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Tab => current = (current + 1) % charts.len(),
                KeyCode::BackTab => current = (current + charts.len() - 1) % charts.len(),
                _ => {}
            },
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
