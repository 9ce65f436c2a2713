use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use contrast_audit::advisory::{advisor_from_config, Advisor};
use contrast_audit::math::color_parse::{parse_color, parse_font_size};
use contrast_audit::math::{hex, suggest, wcag};
use contrast_audit::renderer::{PageRenderer, RenderedPage, SnapshotRenderer};
use contrast_audit::report::{build_rows, render_text, AuditFailure, AuditOutcome, AuditReport};
use contrast_audit::{engine, AuditConfig, SizeClass};

mod cli;
use cli::{Args, Command, Format};

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("CONTRAST_AUDIT_LOG").unwrap_or_else(|_| "contrast_audit=info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AuditConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => AuditConfig::default(),
    };
    if let Some(target) = args.target {
        config.target = target.into();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), wcag_target = %config.target, "contrast-audit starting");

    match args.command {
        Command::Audit {
            snapshots,
            format,
            skip_zero_area,
            explain,
        } => {
            config.skip_zero_area |= skip_zero_area;
            config.advisory.enabled |= explain;
            audit(&snapshots, format, &config)
        }
        Command::Report { input, explain } => {
            config.advisory.enabled |= explain;
            report(&input, &config)
        }
        Command::Check {
            foreground,
            background,
            font_size,
        } => check(&foreground, &background, &font_size, &config),
        Command::Suggest { background, ratio } => {
            let bg = parse_color(&background).ok_or_else(|| anyhow!("unrecognized color: {background}"))?;
            println!("{}", hex::rgb_to_hex(suggest::suggest_color(bg, ratio)));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn audit(snapshots: &[std::path::PathBuf], format: Format, config: &AuditConfig) -> Result<ExitCode> {
    // Load every dump first, then audit the loaded pages in parallel.
    let mut pages: Vec<RenderedPage> = Vec::new();
    let mut load_failures: Vec<Option<AuditFailure>> = Vec::new();
    for path in snapshots {
        match SnapshotRenderer::new(path).render(&path.display().to_string()) {
            Ok(page) => {
                pages.push(page);
                load_failures.push(None);
            }
            Err(err) => load_failures.push(Some(AuditFailure::new(err.to_string()))),
        }
    }
    let summaries = engine::audit_pages(&pages, config);
    let mut completed = summaries.iter().zip(pages);

    let outcomes: Vec<AuditOutcome> = load_failures
        .into_iter()
        .filter_map(|failure| match failure {
            Some(failure) => Some(AuditOutcome::Failed(failure)),
            None => completed
                .next()
                .map(|(summary, page)| AuditOutcome::Completed(AuditReport::from_summary(summary, page.screenshot))),
        })
        .collect();

    match format {
        Format::Json => {
            let json = if outcomes.len() == 1 {
                serde_json::to_string(&outcomes[0])?
            } else {
                serde_json::to_string(&outcomes)?
            };
            println!("{json}");
        }
        Format::Text => {
            let advisor = advisor_from_config(&config.advisory);
            for (path, outcome) in snapshots.iter().zip(&outcomes) {
                println!("== {}", path.display());
                print_outcome(outcome, config, advisor.as_deref());
            }
        }
    }

    Ok(exit_code(&outcomes))
}

fn report(input: &Path, config: &AuditConfig) -> Result<ExitCode> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?
    };
    let outcome: AuditOutcome = serde_json::from_str(&raw).context("parsing audit result")?;
    let advisor = advisor_from_config(&config.advisory);
    print_outcome(&outcome, config, advisor.as_deref());
    Ok(exit_code(std::slice::from_ref(&outcome)))
}

fn print_outcome(outcome: &AuditOutcome, config: &AuditConfig, advisor: Option<&dyn Advisor>) {
    match outcome {
        AuditOutcome::Completed(report) => {
            let rows = build_rows(report, config, advisor);
            print!("{}", render_text(report, &rows));
        }
        AuditOutcome::Failed(failure) => {
            eprintln!("Audit failed: {}", failure.error);
        }
    }
}

fn check(foreground: &str, background: &str, font_size: &str, config: &AuditConfig) -> Result<ExitCode> {
    let fg = parse_color(foreground).ok_or_else(|| anyhow!("unrecognized color: {foreground}"))?;
    let bg = parse_color(background).ok_or_else(|| anyhow!("unrecognized color: {background}"))?;
    let size = parse_font_size(font_size).map_or(SizeClass::Normal, SizeClass::from_px);

    let ratio = wcag::contrast_ratio(fg, bg);
    let required = wcag::required_ratio(size, config.target);
    let passes = ratio >= required;

    println!("Contrast: {ratio:.2}:1");
    println!("Level: {}", wcag::classify(ratio, size));
    println!("Required ({}): {required}", config.target);
    if passes {
        println!("Result: pass");
    } else {
        println!("Result: fail, suggested {}", hex::rgb_to_hex(suggest::suggest_color(bg, required)));
    }
    Ok(if passes { ExitCode::SUCCESS } else { ExitCode::from(2) })
}

fn exit_code(outcomes: &[AuditOutcome]) -> ExitCode {
    if outcomes.iter().any(AuditOutcome::is_failure) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
