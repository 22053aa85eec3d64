//! Command-line surface and the run loop behind it.

use anyhow::{bail, Context};
use authsift_core::config::{Config, OutputFormat};
use authsift_core::export::export_to_path;
use authsift_core::report::{EventFilter, Summary};
use authsift_core::{EventParser, ParsedEvent};
use authsift_feeds::{ingest_all, FileFeed, IngestReport, LineFeed, StdinFeed};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "authsift", about = "Classify sshd authentication logs into security events")]
pub struct Cli {
    /// Log files to read; `-` reads stdin. Defaults to `[input] path`.
    pub inputs: Vec<PathBuf>,

    /// Where to write events. Defaults to `[output] path`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Sink format. Defaults to `[output] format`.
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Config file to layer over the built-in defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep events on or after this date (YYYY-MM-DD).
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Keep events on or before this date (YYYY-MM-DD).
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// Keep only these event ids; repeat for several.
    #[arg(long = "event", value_name = "ID")]
    pub events: Vec<String>,

    /// Skip the summary report.
    #[arg(long)]
    pub no_summary: bool,

    /// Write debug logs to /tmp/authsift-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// What one run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// Counters summed over every feed.
    pub report: IngestReport,
    /// Events kept after filtering and written to `output`.
    pub events_written: usize,
    /// `None` when nothing was parsed and no file was written.
    pub output: Option<PathBuf>,
    pub summary: Option<Summary>,
}

impl Cli {
    fn filter(&self) -> EventFilter {
        let mut filter = EventFilter::new();
        if let Some(d) = self.since {
            filter = filter.since(d);
        }
        if let Some(d) = self.until {
            filter = filter.until(d);
        }
        if !self.events.is_empty() {
            filter = filter.event_ids(self.events.iter().cloned());
        }
        filter
    }

    /// One feed per input. Stdin can only be read once, so `-` may appear
    /// at most once.
    fn feeds(&self, config: &Config) -> anyhow::Result<Vec<Box<dyn LineFeed>>> {
        let inputs = if self.inputs.is_empty() {
            vec![config.input.path.clone()]
        } else {
            self.inputs.clone()
        };
        if inputs.iter().filter(|p| p.as_os_str() == "-").count() > 1 {
            bail!("stdin (`-`) given more than once");
        }
        Ok(inputs
            .into_iter()
            .map(|p| -> Box<dyn LineFeed> {
                if p.as_os_str() == "-" {
                    Box::new(StdinFeed)
                } else {
                    Box::new(FileFeed::new(p))
                }
            })
            .collect())
    }
}

/// Load config, ingest every input, filter, export and summarise.
pub async fn run(cli: &Cli) -> anyhow::Result<RunOutcome> {
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let catalogue = config.catalogue().context("compiling event catalogue")?;
    tracing::info!(patterns = catalogue.len(), "catalogue loaded");

    let reconciler = config.reconciler().context("configuring timestamp reconciliation")?;

    let feeds = cli.feeds(&config)?;
    for feed in &feeds {
        feed.check().with_context(|| format!("opening {}", feed.name()))?;
    }

    let parser = EventParser::new(Arc::new(catalogue), reconciler);
    let outputs = ingest_all(feeds, parser, config.report.progress_interval)
        .await
        .context("ingesting input")?;

    let mut report = IngestReport { source: "total".to_string(), ..Default::default() };
    let mut events: Vec<ParsedEvent> = Vec::new();
    for out in outputs {
        report.absorb(&out.report);
        events.extend(out.events);
    }

    if report.parsed == 0 {
        tracing::warn!(lines = report.total_lines, "no events parsed; nothing written");
        return Ok(RunOutcome { report, events_written: 0, output: None, summary: None });
    }

    let events = cli.filter().apply(events);
    if events.is_empty() {
        tracing::warn!(parsed = report.parsed, "filter matched no events; nothing written");
        return Ok(RunOutcome { report, events_written: 0, output: None, summary: None });
    }

    let path = cli.output.clone().unwrap_or_else(|| config.output.path.clone());
    let format = cli.format.map(OutputFormat::from).unwrap_or(config.output.format);
    export_to_path(&events, format, &path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), events = events.len(), %format, "events written");

    let summary = (!cli.no_summary).then(|| Summary::from_events(&events, &config.report));
    Ok(RunOutcome { report, events_written: events.len(), output: Some(path), summary })
}
