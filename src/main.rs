use authsift::app::{run, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/authsift-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("authsift debug log started; tail -f /tmp/authsift-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let outcome = run(&cli).await?;
    let r = &outcome.report;

    println!("lines read        : {}", r.total_lines);
    println!("events parsed     : {}", r.parsed);
    println!("lines skipped     : {}", r.skipped);
    println!("unparsed stamps   : {}", r.unparsed_timestamps);
    if r.total_lines > 0 {
        println!("success rate      : {:.1}%", r.success_rate());
    }

    match &outcome.output {
        Some(path) => println!("wrote {} events to {}", outcome.events_written, path.display()),
        None => println!("no events to write; nothing written"),
    }

    if let Some(summary) = &outcome.summary {
        println!();
        println!("{summary}");
    }
    Ok(())
}
