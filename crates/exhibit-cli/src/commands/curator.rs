//! Curator command handler

use crate::error::CliError;
use exhibit::{Exhibit, Exhibition, Schedule};
use tracing::info;

fn print_exhibit(exhibit: &Exhibit) {
    println!("\n🎨 {}", exhibit.title());
    println!("{}", exhibit.statement.body());
    match &exhibit.image {
        Some(image) => println!("🖼️  {}", image.path),
        None => println!("⚠️  No image was generated"),
    }
    for caption in &exhibit.captions {
        println!("   {}", caption);
    }
}

pub async fn run_curator(exhibition: &Exhibition, once: bool, always: bool) -> Result<(), CliError> {
    let curator = exhibition.curator();
    curator.prepare().await?;

    if once {
        let exhibit = curator.generate_once().await?;
        print_exhibit(&exhibit);
        return Ok(());
    }

    let schedule = if always {
        Schedule::Always
    } else {
        exhibition.schedule()?
    };
    if let Schedule::Daily(window) = &schedule {
        println!("🕰️  Opening hours: {} - {}", window.start, window.end);
    }

    let monitor = exhibition.monitor("Curator");
    tokio::select! {
        _ = monitor.supervise_when(|| schedule.is_open(), || curator.run_exhibition(&schedule)) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, closing the exhibition");
            println!("\n👋 Exhibition closed");
        }
    }

    Ok(())
}
