use anyhow::Context;
use oeis_normalizer::config::charmap::CharacterPolicies;
use oeis_normalizer::logging::{self, codes, LogLevel};
use oeis_normalizer::{batch, log_success, output, storage};
use std::env;
use std::path::{Path, PathBuf};

struct CliOptions {
    database_path: PathBuf,
    limit: Option<usize>,
    quiet: bool,
    fail_fast: bool,
    log_level: LogLevel,
    charmap_path: Option<PathBuf>,
    json_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <database.sqlite3> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args)?;

    logging::init_global_logging(options.log_level).map_err(anyhow::Error::msg)?;

    let charmap = load_charmap(options.charmap_path.as_deref())?;
    let batch_config = batch::BatchConfig {
        limit: options.limit,
        progress_reporting: !options.quiet,
        fail_fast: options.fail_fast,
        charmap,
    };

    let pool = storage::connect_readonly(&options.database_path).await?;
    let raw_entries = storage::fetch_entries(&pool, options.limit).await?;
    pool.close().await;

    println!(
        "Processing {} entries from {}",
        raw_entries.len(),
        options.database_path.display()
    );

    let results = batch::process_entries(raw_entries, &batch_config);

    print_batch_results(&results);
    logging::print_cargo_style_summary();

    let write_start = std::time::Instant::now();
    let paths = output::write_artifacts(&results.entries, &options.database_path)
        .context("failed to write artifacts")?;
    log_success!(codes::success::ARTIFACTS_WRITTEN, "Artifacts written",
        "full" => paths.full.display(),
        "reduced" => paths
            .reduced
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string()),
        "elapsed_ms" => write_start.elapsed().as_millis()
    );

    if let Some(json_path) = &options.json_path {
        output::write_json_entries(&results.entries, json_path)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
        println!("JSON entries written to {}", json_path.display());
    }

    if results.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("OEIS Normalizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Validates and normalizes crawled OEIS entries into binary artifacts");
    println!();
    println!("USAGE:");
    println!("    {} <database.sqlite3> [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <database.sqlite3>  SQLite database produced by the crawler");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --limit N           Process at most N entries");
    println!("    --quiet             Suppress progress reporting");
    println!("    --fail-fast         Stop at the first fatal entry failure");
    println!("    --log-level LEVEL   error, warning, info, or debug (default: info)");
    println!("    --charmap FILE      TOML file overriding permitted directive characters");
    println!("    --json FILE         Also write entries as a JSON array");
    println!();
    println!("OUTPUT:");
    println!("    <db-stem>.entries.bin        All normalized entries");
    println!("    <db-stem>-10000.entries.bin  First 10000 entries (large runs only)");
    println!();
    println!("    Cargo-style per-entry report of every error and warning,");
    println!("    followed by a batch summary. Exit code 1 if any entry failed.");
}

fn parse_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions {
        database_path: PathBuf::from(&args[1]),
        limit: None,
        quiet: false,
        fail_fast: false,
        log_level: LogLevel::Info,
        charmap_path: None,
        json_path: None,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--limit" => {
                let value = args
                    .get(i + 1)
                    .context("--limit requires a number")?
                    .parse::<usize>()
                    .context("--limit requires a number")?;
                options.limit = Some(value);
                i += 1;
            }
            "--quiet" => {
                options.quiet = true;
            }
            "--fail-fast" => {
                options.fail_fast = true;
            }
            "--log-level" => {
                let value = args.get(i + 1).context("--log-level requires a level")?;
                options.log_level = LogLevel::from_str(value)
                    .ok_or_else(|| anyhow::anyhow!("unknown log level '{}'", value))?;
                i += 1;
            }
            "--charmap" => {
                let value = args.get(i + 1).context("--charmap requires a file path")?;
                options.charmap_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--json" => {
                let value = args.get(i + 1).context("--json requires a file path")?;
                options.json_path = Some(PathBuf::from(value));
                i += 1;
            }
            other => {
                anyhow::bail!("unknown option '{}'", other);
            }
        }
        i += 1;
    }

    Ok(options)
}

fn load_charmap(path: Option<&Path>) -> anyhow::Result<CharacterPolicies> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            CharacterPolicies::from_toml_str(&text)
                .with_context(|| format!("invalid character map {}", path.display()))
        }
        None => Ok(CharacterPolicies::default()),
    }
}

fn print_batch_results(results: &batch::BatchResults) {
    println!();
    println!("Batch Processing Summary:");
    println!("  Entries processed: {}", results.total_processed());
    println!("  Normalized: {}", results.entries.len());
    println!("    clean: {}", results.clean_entries());
    println!("    with warnings: {}", results.entries_with_diagnostics);
    println!("  Failed: {}", results.failures.len());
    println!("  Warnings emitted: {}", results.diagnostic_count);
    println!("  Total time: {:.2}s", results.duration.as_secs_f64());

    if !results.failures.is_empty() {
        println!();
        println!("Failed Entries:");
        for (_, error) in &results.failures {
            println!("  {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(rest: &[&str]) -> Vec<String> {
        let mut all = vec!["oeis_normalizer".to_string(), "oeis.sqlite3".to_string()];
        all.extend(rest.iter().map(|s| s.to_string()));
        all
    }

    #[test]
    fn test_parse_options_defaults() {
        let options = parse_options(&args(&[])).unwrap();
        assert_eq!(options.database_path, PathBuf::from("oeis.sqlite3"));
        assert_eq!(options.limit, None);
        assert!(!options.quiet);
        assert!(!options.fail_fast);
        assert_eq!(options.log_level, LogLevel::Info);
    }

    #[test]
    fn test_parse_options_full() {
        let options = parse_options(&args(&[
            "--limit",
            "50",
            "--quiet",
            "--fail-fast",
            "--log-level",
            "debug",
            "--json",
            "out.json",
        ]))
        .unwrap();

        assert_eq!(options.limit, Some(50));
        assert!(options.quiet);
        assert!(options.fail_fast);
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.json_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_parse_options_rejects_unknown_flag() {
        assert!(parse_options(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_parse_options_rejects_bad_limit() {
        assert!(parse_options(&args(&["--limit", "many"])).is_err());
    }
}
