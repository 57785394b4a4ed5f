//! CLI entry point for vmguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `vmguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use vmguard_app::{
    AuditInput, ExplainOutput, InventorySource, JsonlSink, ReportSink, TracingSink, format_rules,
    parse_report_json, render_annotations, render_markdown, resolve_rules, run_audit, run_explain,
    runtime_error_receipt, serialize_report, to_renderable, verdict_exit_code,
};
use vmguard_settings::Overrides;
use vmguard_types::{AuditReceipt, Verdict};

#[derive(Parser, Debug)]
#[command(
    name = "vmguard",
    version,
    about = "Compliance audit for virtual machine inventories"
)]
struct Cli {
    /// Path to vmguard config TOML. A missing file means defaults.
    #[arg(long, global = true, default_value = "vmguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (baseline|none).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Log at debug level.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the inventory and write artifacts.
    Check {
        /// Inventory snapshot: a JSON file, or a directory of `*.json` files.
        #[arg(long)]
        inventory: Utf8PathBuf,

        /// Where to write the JSON receipt.
        #[arg(long, default_value = "artifacts/vmguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/vmguard/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Also write one JSON line per violation to this path.
        #[arg(long)]
        jsonl_out: Option<Utf8PathBuf>,

        /// Evaluate resources concurrently.
        #[arg(long)]
        parallel: bool,
    },

    /// Render markdown from an existing JSON receipt.
    Md {
        /// Path to the JSON receipt.
        #[arg(long, default_value = "artifacts/vmguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON receipt.
    Annotations {
        /// Path to the JSON receipt.
        #[arg(long, default_value = "artifacts/vmguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a built-in rule with remediation guidance.
    Explain {
        /// The rule name (e.g., "disk.os_encryption").
        rule: String,
    },

    /// Print the resolved rule set in evaluation order.
    Rules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet, cli.log_json)?;

    match cli.cmd {
        Commands::Check {
            ref inventory,
            ref report_out,
            write_markdown,
            ref markdown_out,
            ref jsonl_out,
            parallel,
        } => cmd_check(
            &cli,
            inventory,
            report_out,
            write_markdown.then_some(markdown_out.as_path()),
            jsonl_out.as_deref(),
            parallel,
        ),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { ref rule } => cmd_explain(rule),
        Commands::Rules => cmd_rules(&cli),
    }
}

fn init_tracing(verbose: bool, quiet: bool, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };

    // RUST_LOG overrides the flags.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for rendered output.
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    }
    .map_err(|e| anyhow::anyhow!("init tracing: {e}"))
}

fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(config = %path, "no config file; using defaults");
            Ok(String::new())
        }
        Err(e) => Err(e).with_context(|| format!("read config: {}", path)),
    }
}

fn overrides(cli: &Cli, parallel: bool) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        // The flag can only switch parallelism on; the config decides otherwise.
        parallel: parallel.then_some(true),
    }
}

fn cmd_check(
    cli: &Cli,
    inventory: &Utf8Path,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
    jsonl_out: Option<&Utf8Path>,
    parallel: bool,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(&cli.config)?;

        let output = run_audit(AuditInput {
            config_text: &cfg_text,
            overrides: overrides(cli, parallel),
            inventory: InventorySource::Path(inventory),
        })?;
        let receipt = output.receipt;

        write_report_file(report_out, &receipt).context("write report json")?;

        if let Some(md_path) = markdown_out {
            let md = render_markdown(&to_renderable(&receipt));
            write_text_file(md_path, &md).context("write markdown")?;
        }

        let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(TracingSink)];
        if let Some(path) = jsonl_out {
            sinks.push(Box::new(JsonlSink::new(path)));
        }
        for sink in &sinks {
            sink.record(&receipt)?;
        }

        if receipt.verdict == Verdict::Error
            && let Some(failure) = &receipt.error
        {
            eprintln!("vmguard error: {}", failure.message);
        }

        Ok(verdict_exit_code(receipt.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let receipt = runtime_error_receipt(&format!("{err:#}"));
            let _ = write_report_file(report_out, &receipt);
            eprintln!("vmguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, receipt: &AuditReceipt) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(receipt).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let receipt = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&receipt));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let receipt = parse_report_json(&report_text)?;
    let annotations = render_annotations(&to_renderable(&receipt), max);

    for annotation in annotations {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(rule: &str) -> anyhow::Result<()> {
    match run_explain(rule) {
        ExplainOutput::Found(exp) => {
            print!("{}", vmguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            rule,
            available_rules,
        } => {
            eprint!("{}", vmguard_app::format_not_found(&rule, available_rules));
            std::process::exit(1);
        }
    }
}

fn cmd_rules(cli: &Cli) -> anyhow::Result<()> {
    let cfg_text = read_config(&cli.config)?;
    let resolved = resolve_rules(&cfg_text, overrides(cli, false))?;
    print!("{}", format_rules(&resolved));
    Ok(())
}
