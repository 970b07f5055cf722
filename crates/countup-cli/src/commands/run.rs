use anyhow::{bail, Result};
use tracing::{info, warn};

use countup_core::{AppConfig, Phase, ProgressiveRun};

use super::CountArgs;

pub async fn run(args: &CountArgs, config: &AppConfig) -> Result<()> {
    let options = args.options(&config.animation);
    let printer = args.printer(&config.output);
    let (from, to) = args.endpoints()?;

    let run = ProgressiveRun::new(from, to, options)?;
    let handle = run.clone();
    run.start(move |value, step| {
        if let Err(e) = printer.value(value, step) {
            warn!("Failed to write step {}: {}", step, e);
            handle.cancel();
        }
    })?;

    let phase = tokio::select! {
        phase = run.finished() => phase,
        _ = tokio::signal::ctrl_c() => {
            run.cancel();
            Phase::Canceled
        }
    };
    printer.finish()?;

    match phase {
        Phase::Finished => Ok(()),
        Phase::Canceled => {
            info!("Count stopped at {} (step {})", run.value(), run.step());
            Ok(())
        }
        other => bail!("Count ended in the {} phase", other),
    }
}
