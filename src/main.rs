//! Energy transition simulator entry point: CLI wiring and config-driven runs.

use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

use energy_transition::config::ScenarioConfig;
use energy_transition::io::export::export_csv;
use energy_transition::sweep::run_sweep;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    horizon_override: Option<usize>,
    out: Option<String>,
    sweep: bool,
    quiet: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("energy-transition - two-sector energy market and capital dynamics");
    eprintln!();
    eprintln!("Usage: energy-transition [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --horizon <n>            Override the number of periods (>= 2)");
    eprintln!("  --out <path>             Export per-period results to CSV");
    eprintln!("  --sweep                  Run the scenario's parameter sweep instead");
    eprintln!("  --quiet                  Do not print per-period lines");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after simulation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        horizon_override: None,
        out: None,
        sweep: false,
        quiet: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--horizon" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --horizon requires an integer argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.horizon_override = Some(n);
                } else {
                    eprintln!("error: --horizon value \"{}\" is not a valid integer", args[i]);
                    process::exit(1);
                }
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --out requires a path argument");
                    process::exit(1);
                }
                cli.out = Some(args[i].clone());
            }
            "--sweep" => {
                cli.sweep = true;
            }
            "--quiet" | "-q" => {
                cli.quiet = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut config = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(horizon) = cli.horizon_override {
        config.simulation.horizon = horizon;
    }

    // Validate and convert to domain types
    let scenario = match config.build() {
        Ok(scenario) => scenario,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    if cli.sweep {
        let points = config.sweep.points();
        for outcome in run_sweep(&scenario, &points) {
            let p = outcome.point;
            match outcome.result {
                Ok(summary) => println!(
                    "alpha={:.4} beta={:.4} phi={:.4} | final K={:.3} min K={:.3} max K={:.3} | p={:.6}",
                    p.alpha,
                    p.beta,
                    p.phi,
                    summary.final_capital,
                    summary.min_capital,
                    summary.max_capital,
                    summary.final_energy_price
                ),
                Err(e) => println!(
                    "alpha={:.4} beta={:.4} phi={:.4} | error: {e}",
                    p.alpha, p.beta, p.phi
                ),
            }
        }
        return;
    }

    let out = match scenario.run() {
        Ok(out) => out,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    // Print per-period results
    if !cli.quiet {
        for r in &out.run.periods {
            println!("{r}");
        }
    }

    // Print summary report
    println!("\n{}", out.summary);
    match out.steady_state {
        Some(ss) => println!(
            "Steady state:          K*={:.3} p*={:.6}",
            ss.capital, ss.energy_price
        ),
        None => println!("Steady state:          none (renewables cover demand)"),
    }

    // Export CSV if requested
    if let Some(ref path) = cli.out {
        if let Err(e) = export_csv(&out.run.periods, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Periods written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(energy_transition::api::AppState::new(scenario, out));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(energy_transition::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
