use std::time::Duration;

use anyhow::Result;

use countup_core::{AppConfig, ProgressiveNumber};

use super::CountArgs;

pub fn run(args: &CountArgs, config: &AppConfig) -> Result<()> {
    let options = args.options(&config.animation);
    let printer = args.printer(&config.output);
    let (from, to) = args.endpoints()?;

    let mut number = ProgressiveNumber::new(from, to, options)?;
    let delay = number.delay();

    printer.planned(&number.value(), number.step(), false, Duration::ZERO)?;

    let mut fired: u32 = 0;
    loop {
        let step = number.advance();
        fired = fired.saturating_add(1);
        printer.planned(&step.value, step.step, step.done, delay.saturating_mul(fired))?;
        if step.done {
            break;
        }
    }
    printer.finish()?;

    Ok(())
}
