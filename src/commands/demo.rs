//! Demo command implementation.
//!
//! The demo command:
//! 1. Builds a tracer from the config file (if any) and CLI flags
//! 2. Runs a sample order-processing workload, one checkpoint per step
//! 3. Ends the session, printing the summary when it passes the print gate

use super::models::DemoArgs;
use anyhow::{Context, Result};
use log::{debug, info};
use quick_trace::tracer::{ManualClock, Sink, StdoutSink};
use quick_trace::{load_config, OutputStyle, Tracer, TracerBuilder};
use std::thread;
use std::time::{Duration, Instant};

/// Steps of the sample workload and how long each one takes
pub const WORKLOAD: [(&str, Duration); 9] = [
    ("Validate request", Duration::from_micros(400)),
    ("Load customer", Duration::from_millis(42)),
    ("Check inventory (warehouse A)", Duration::from_millis(12)),
    ("Check inventory (warehouse B)", Duration::from_millis(15)),
    ("Check inventory (warehouse C)", Duration::from_millis(11)),
    ("Calculate pricing", Duration::from_millis(6)),
    ("Charge payment", Duration::from_millis(180)),
    ("Write order", Duration::from_millis(55)),
    ("Send confirmation", Duration::from_micros(750)),
];

/// Execute the demo command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Demo command arguments
///
/// # Errors
/// * Config file read or parse failures
pub fn execute_demo(args: DemoArgs) -> Result<()> {
    let start_time = Instant::now();
    info!("Starting demo workload ({} steps)", WORKLOAD.len());

    match record_demo(&args, StdoutSink)? {
        Some(text) => debug!("Printed summary ({} bytes)", text.len()),
        None => info!("Summary not printed (silent session or below the print condition)"),
    }

    info!("Demo completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Run the workload and end the session, emitting through `sink`
///
/// **Public** - used by execute_demo and tests
///
/// # Returns
/// The emitted summary, if one was printed
pub fn record_demo(args: &DemoArgs, sink: impl Sink) -> Result<Option<String>> {
    let builder = demo_builder(args)?.sink(sink);

    let clock = ManualClock::new();
    let mut tracer = if args.simulate {
        builder.clock(clock.clone()).build()
    } else {
        builder.build()
    };

    run_workload(&mut tracer, args.simulate.then_some(&clock));
    Ok(tracer.end())
}

/// Render one simulated session in every style
///
/// **Public** - called from main.rs for the `styles` command
pub fn execute_styles(no_color: bool) -> Result<()> {
    for style in OutputStyle::ALL {
        let text = render_style(style, !no_color);
        println!("── {} ──", style);
        println!("{}", text);
    }
    Ok(())
}

/// Simulated workload rendered in `style`
///
/// **Public** - used by execute_styles and tests
pub fn render_style(style: OutputStyle, color: bool) -> String {
    let clock = ManualClock::new();
    let mut tracer = quick_trace::tracer!(format!("Order Processing ({})", style))
        .style(style)
        .silent(true)
        .color(color)
        .clock(clock.clone())
        .build();

    run_workload(&mut tracer, Some(&clock));
    tracer.end();
    tracer.render()
}

/// Validate demo arguments
///
/// **Public** - can be called before execute_demo for early validation
pub fn validate_args(args: &DemoArgs) -> Result<()> {
    if args.group_ms == Some(0) {
        anyhow::bail!("--group must be greater than 0");
    }

    if let (Some(slow), Some(hide)) = (args.slow_only_ms, args.hide_fast_ms) {
        if hide > slow {
            debug!("--hide-fast {}ms is stricter than --slow-only {}ms", hide, slow);
        }
    }

    if let Some(path) = &args.config {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    }

    Ok(())
}

/// Builder from the config file, then the CLI flags on top
///
/// **Private** - internal helper for record_demo
fn demo_builder(args: &DemoArgs) -> Result<TracerBuilder> {
    let mut builder = quick_trace::tracer!("Order Processing");

    if let Some(path) = &args.config {
        let config = load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        debug!("Loaded config: {:?}", config);
        builder = builder.config(&config);
    }

    if let Some(style) = args.style {
        builder = builder.style(style);
    }
    if let Some(ms) = args.slow_only_ms {
        builder = builder.show_slow_only(Duration::from_millis(ms));
    }
    if let Some(ms) = args.hide_fast_ms {
        builder = builder.hide_ultra_fast(Duration::from_millis(ms));
    }
    if let Some(ms) = args.group_ms {
        builder = builder.group_similar(Duration::from_millis(ms));
    }
    if let Some(ms) = args.min_total_ms {
        builder = builder.min_total_duration(Duration::from_millis(ms));
    }
    if args.silent {
        builder = builder.silent(true);
    }
    if args.no_color {
        builder = builder.color(false);
    }

    Ok(builder)
}

/// One checkpoint per workload step
///
/// **Private** - advances `clock` when given, sleeps otherwise
fn run_workload(tracer: &mut Tracer, clock: Option<&ManualClock>) {
    for (label, duration) in WORKLOAD {
        match clock {
            Some(clock) => clock.advance(duration),
            None => thread::sleep(duration),
        }
        tracer.checkpoint(label);
    }
}
