use std::path::PathBuf;
use std::process;

use grovebound_core::GameConfig;
use grovebound_harness::report;
use grovebound_harness::runner::SessionRunner;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut seed: Option<u32> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut tick_count = 7200u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed = Some(parse_value(&args, i, "--seed"));
            }
            "--ticks" => {
                i += 1;
                tick_count = parse_value(&args, i, "--ticks");
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(value_at(&args, i, "--config")));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(value_at(&args, i, "--output")));
            }
            "--help" | "-h" => {
                eprintln!("Usage: arena-harness [OPTIONS]");
                eprintln!("  --seed <n>       World seed (default: from config, else random)");
                eprintln!("  --ticks <n>      Tick budget at 60 ticks/s (default: 7200)");
                eprintln!("  --config <path>  RON game configuration");
                eprintln!("  --output <path>  Save the run report as JSON");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    if seed.is_some() {
        config.world.seed = seed;
    }
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("ERROR: {}", e);
        }
        eprintln!("{} configuration errors, exiting with code 1", errors.len());
        process::exit(1);
    }

    let result = SessionRunner::new(tick_count).run(config);

    println!("\n## Session Summary\n");
    println!("{}", report::format_markdown(&result));

    if let Some(ref path) = output_path {
        let report = report::Report {
            label: format!("arena-harness-{}", result.seed),
            config_path: config_path.as_ref().map(|p| p.display().to_string()),
            result,
        };
        if let Err(e) = report::save_report(path, &report) {
            eprintln!("ERROR: failed to save report to {}: {}", path.display(), e);
            process::exit(1);
        }
        log::info!("Saved report to {}", path.display());
    }

    log::info!("Harness complete.");
}

fn value_at<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value_at(args, i, flag);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Invalid {} value: {}", flag, raw);
            process::exit(1);
        }
    }
}
