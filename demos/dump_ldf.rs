//! Print a summary of an LDF.
//!
//! Run with: cargo run --example dump_ldf -- path/to/file.ldf [--json]
//!
//! Set `RUST_LOG=ldf_rs=debug` to see what the parser skips.

use ldf_rs::LdfParser;
use tracing_subscriber::EnvFilter;

fn main() -> ldf_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: dump_ldf <file.ldf> [--json]");
        std::process::exit(2);
    };
    let json = args.any(|a| a == "--json");

    let document = LdfParser::from_file(&path)?.parse_all()?;

    if json {
        #[cfg(feature = "serde")]
        println!("{}", document.to_json()?);
        #[cfg(not(feature = "serde"))]
        eprintln!("built without the serde feature");
        return Ok(());
    }

    let header = document.header();
    println!("=== {} ===", path);
    println!(
        "protocol {}, {} kbps",
        header.protocol_version.as_deref().unwrap_or("?"),
        header.speed_kbps.map_or("?".to_string(), |s| s.to_string())
    );

    if let Some(nodes) = document.nodes() {
        println!(
            "master {} ({} ms base, {} ms jitter), slaves: {}",
            nodes.master,
            nodes.timer_base_ms,
            nodes.jitter_ms,
            nodes.slaves.join(", ")
        );
    }

    println!("\n{} signals, {} frames", document.signals().len(), document.frames().len());
    for (name, frame) in document.frames() {
        println!(
            "  {:24} id {:#04x}  {:>2} bytes  from {:12} [{}]",
            name,
            frame.identifier,
            frame.response_length,
            frame.publisher,
            frame.signals.keys().collect::<Vec<_>>().join(", ")
        );
    }

    for (name, table) in document.schedule_tables() {
        println!(
            "\nschedule {} ({} slots, {} ms cycle)",
            name,
            table.slots.len(),
            table.cycle_time_ms()
        );
        for slot in &table.slots {
            println!("  {:30} {:>6} ms", slot.command, slot.delay_ms);
        }
    }

    Ok(())
}
