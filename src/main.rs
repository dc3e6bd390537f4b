// SPDX-License-Identifier: MIT
//
// huepath: sample a color path from the command line.
//
// Wires the two library crates together:
//
//   hue-space → Hsl, cylinder positions, position functions
//   hue-path  → anchors, the interpolation engine, random generators
//
// Flow:
//
//   args → PathConfig + anchors (given, or random from --seed)
//        → ColorPath → optional randomize / hue shift
//        → samples (or a single color_at) → stdout as text or JSON
//
// Logs go to stderr; -v raises the level, so stdout stays pipeable.

use std::io::{self, Write};

use clap::{ArgAction, Parser};
use miette::{IntoDiagnostic, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::Level;

use hue_path::config::DEFAULT_NUM_POINTS;
use hue_path::{ColorPath, PathConfig, random};
use hue_space::{AxisFunctions, Hsl, PositionFunction};

// ─── Arguments ───────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "huepath", version)]
#[command(about = "Interpolate a palette along a path through anchor colors")]
#[command(next_line_help = true)]
struct Cli {
    /// Anchor color as `H,S,L`: hue in degrees, saturation and lightness in
    /// 0..1. Repeat for more anchors. Without any, anchors are random.
    #[arg(short, long = "anchor", value_name = "H,S,L", value_parser = parse_hsl, allow_hyphen_values = true)]
    anchors: Vec<Hsl>,

    /// Seed for random anchors and --randomize.
    #[arg(long)]
    seed: Option<u64>,

    /// How many random anchors to generate when none are given.
    #[arg(long, value_name = "N", default_value_t = 2)]
    random_anchors: usize,

    /// Samples along the whole path.
    #[arg(short = 'n', long = "points", default_value_t = DEFAULT_NUM_POINTS)]
    points: usize,

    /// Position function for the x axis.
    #[arg(long, value_name = "NAME")]
    fx: Option<String>,

    /// Position function for the y axis.
    #[arg(long, value_name = "NAME")]
    fy: Option<String>,

    /// Position function for the z (lightness) axis.
    #[arg(long, value_name = "NAME")]
    fz: Option<String>,

    /// Position function for every axis; per-axis flags override it.
    #[arg(long = "fn-all", value_name = "NAME")]
    fn_all: Option<String>,

    /// Close the path back to the first anchor.
    #[arg(long)]
    closed_loop: bool,

    /// Map lightness to height as 1 − l.
    #[arg(long)]
    invert_lightness: bool,

    /// Mirror the easing curves on every other segment.
    #[arg(long)]
    mirror: bool,

    /// Rotate every anchor hue by this many degrees.
    #[arg(long, value_name = "DEGREES", default_value_t = 0.0, allow_negative_numbers = true)]
    shift_hue: f64,

    /// Jitter the anchors once after building the path.
    #[arg(long)]
    randomize: bool,

    /// Print only the color at this global progress (clamped to 0..1).
    #[arg(long, value_name = "T", allow_negative_numbers = true)]
    at: Option<f64>,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,

    /// List the position function names and exit.
    #[arg(long)]
    list_functions: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Parse `H,S,L` into a color. Whitespace around components is allowed.
fn parse_hsl(s: &str) -> std::result::Result<Hsl, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let &[h, sat, l] = parts.as_slice() else {
        return Err(format!("expected H,S,L with three components, got '{s}'"));
    };
    let num = |label: &str, v: &str| {
        v.parse::<f64>()
            .map_err(|_| format!("{label} component '{v}' is not a number"))
    };
    Ok(Hsl::new(num("hue", h)?, num("saturation", sat)?, num("lightness", l)?))
}

/// Look up a function by name. Unknown names log a warning and fall back
/// to linear so a typo never aborts a run.
fn resolve_function(name: &str) -> PositionFunction {
    PositionFunction::from_name(name).unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to linear");
        PositionFunction::Linear
    })
}

fn build_config(cli: &Cli) -> PathConfig {
    let mut functions = cli
        .fn_all
        .as_deref()
        .map_or_else(AxisFunctions::default, |name| {
            AxisFunctions::uniform(resolve_function(name))
        });
    if let Some(name) = cli.fx.as_deref() {
        functions.x = resolve_function(name);
    }
    if let Some(name) = cli.fy.as_deref() {
        functions.y = resolve_function(name);
    }
    if let Some(name) = cli.fz.as_deref() {
        functions.z = resolve_function(name);
    }

    PathConfig {
        num_points: cli.points,
        functions,
        closed_loop: cli.closed_loop,
        inverted_lightness: cli.invert_lightness,
        mirror_alternate_segments: cli.mirror,
    }
}

fn build_path(cli: &Cli, config: PathConfig, rng: &mut StdRng) -> Result<ColorPath> {
    if !cli.anchors.is_empty() {
        return Ok(ColorPath::new(cli.anchors.iter().copied(), config)?);
    }
    let path = if cli.random_anchors <= 2 {
        ColorPath::random_pair(rng, config)?
    } else {
        ColorPath::new(random::spaced_anchor_colors(cli.random_anchors, 20.0, rng), config)?
    };
    tracing::info!(anchors = ?path.anchors().colors(), "generated random anchors");
    Ok(path)
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ─── Output ──────────────────────────────────────────────────────────────────

fn write_functions(out: &mut impl Write) -> io::Result<()> {
    for f in PositionFunction::all() {
        writeln!(out, "{:<14} {}", f.name(), f.legacy_name())?;
    }
    Ok(())
}

fn write_samples(out: &mut impl Write, path: &ColorPath, json: bool) -> Result<()> {
    if json {
        let doc = serde_json::json!({
            "snapshot": path.snapshot(),
            "samples": path.samples(),
        });
        let text = serde_json::to_string_pretty(&doc).into_diagnostic()?;
        writeln!(out, "{text}").into_diagnostic()?;
        return Ok(());
    }
    for (i, p) in path.samples().iter().enumerate() {
        writeln!(out, "{i:>3}  {}  segment {} t {:.3}", p.color, p.segment, p.t).into_diagnostic()?;
    }
    Ok(())
}

fn write_color_at(out: &mut impl Write, path: &ColorPath, t: f64, json: bool) -> Result<()> {
    let point = path.point_at(t);
    if json {
        let doc = serde_json::json!({ "t": t, "point": point });
        let text = serde_json::to_string_pretty(&doc).into_diagnostic()?;
        writeln!(out, "{text}").into_diagnostic()?;
    } else {
        writeln!(out, "{}", point.color).into_diagnostic()?;
    }
    Ok(())
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list_functions {
        return write_functions(&mut out).into_diagnostic();
    }

    let mut rng = cli
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let config = build_config(&cli);
    let mut path = build_path(&cli, config, &mut rng)?;

    if cli.randomize {
        random::randomize(&mut path, &mut rng);
    }
    if cli.shift_hue != 0.0 {
        path.shift_hue(cli.shift_hue);
    }

    match cli.at {
        Some(t) => write_color_at(&mut out, &path, t, cli.json),
        None => write_samples(&mut out, &path, cli.json),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use hue_path::PathError;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("huepath").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parse_hsl_accepts_spaces() {
        assert_eq!(parse_hsl("120, 0.5 ,0.25"), Ok(Hsl::new(120.0, 0.5, 0.25)));
    }

    #[test]
    fn parse_hsl_rejects_bad_input() {
        assert!(parse_hsl("120,0.5").is_err());
        assert!(parse_hsl("1,2,3,4").is_err());
        let err = parse_hsl("red,0.5,0.5").unwrap_err();
        assert!(err.contains("hue"), "{err}");
    }

    #[test]
    fn negative_hue_anchor_parses() {
        let c = cli(&["-a", "-30,1,0.5", "-a", "90,1,0.5", "--shift-hue", "-15"]);
        assert_eq!(c.anchors[0], Hsl::new(-30.0, 1.0, 0.5));
        assert_eq!(c.shift_hue, -15.0);
    }

    #[test]
    fn config_from_flags() {
        let c = cli(&[
            "--fn-all", "arc", "--fz", "smooth-step", "-n", "9", "--closed-loop", "--mirror",
        ]);
        let config = build_config(&c);
        assert_eq!(config.num_points, 9);
        assert!(config.closed_loop);
        assert!(config.mirror_alternate_segments);
        assert!(!config.inverted_lightness);
        assert_eq!(config.functions.x, PositionFunction::Arc);
        assert_eq!(config.functions.y, PositionFunction::Arc);
        assert_eq!(config.functions.z, PositionFunction::SmoothStep);
    }

    #[test]
    fn unknown_function_falls_back_to_linear() {
        let config = build_config(&cli(&["--fx", "wobbly"]));
        assert_eq!(config.functions.x, PositionFunction::Linear);
        assert_eq!(config.functions.y, AxisFunctions::default().y);
    }

    #[test]
    fn zero_points_is_reported() {
        let c = cli(&["-a", "0,1,0.5", "-a", "90,1,0.5", "-n", "0"]);
        let mut rng = StdRng::seed_from_u64(1);
        let report = build_path(&c, build_config(&c), &mut rng).unwrap_err();
        assert_eq!(
            report.downcast_ref::<PathError>(),
            Some(&PathError::InvalidSampleCount { requested: 0 })
        );
    }

    #[test]
    fn seeded_random_anchors_are_stable() {
        let c = cli(&["--seed", "7", "--random-anchors", "4"]);
        let a = build_path(&c, build_config(&c), &mut StdRng::seed_from_u64(7)).unwrap();
        let b = build_path(&c, build_config(&c), &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.anchors().len(), 4);
        assert_eq!(a.anchors().colors(), b.anchors().colors());
    }

    #[test]
    fn text_output_has_one_line_per_sample() {
        let c = cli(&["-a", "0,1,0.5", "-a", "120,1,0.5", "-n", "5"]);
        let path = build_path(&c, build_config(&c), &mut StdRng::seed_from_u64(0)).unwrap();
        let mut buf = Vec::new();
        write_samples(&mut buf, &path, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().next().unwrap().contains("hsl(0.00, 1.0000, 0.5000)"));
    }

    #[test]
    fn json_output_carries_snapshot_and_samples() {
        let c = cli(&["-a", "0,1,0.5", "-a", "120,1,0.5", "-n", "4", "--closed-loop"]);
        let path = build_path(&c, build_config(&c), &mut StdRng::seed_from_u64(0)).unwrap();
        let mut buf = Vec::new();
        write_samples(&mut buf, &path, true).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["samples"].as_array().map(Vec::len), Some(4));
        assert_eq!(doc["snapshot"]["config"]["closed_loop"], serde_json::json!(true));
        assert_eq!(doc["samples"][0]["color"], serde_json::json!([0.0, 1.0, 0.5]));
    }

    #[test]
    fn color_at_output_clamps() {
        let c = cli(&["-a", "0,1,0.5", "-a", "120,1,0.5"]);
        let path = build_path(&c, build_config(&c), &mut StdRng::seed_from_u64(0)).unwrap();
        let mut low = Vec::new();
        let mut start = Vec::new();
        write_color_at(&mut low, &path, -3.0, false).unwrap();
        write_color_at(&mut start, &path, 0.0, false).unwrap();
        assert_eq!(low, start);
    }

    #[test]
    fn function_list_names_every_function() {
        let mut buf = Vec::new();
        write_functions(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), PositionFunction::all().len());
        assert!(text.contains("smooth-step"));
    }
}
