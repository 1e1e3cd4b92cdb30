#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::process::ExitCode;

use rtp_inspect::config::Config;

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    simple_logger::init_with_level(config.log.level.as_level())?;

    if config.input.files.is_empty() {
        log::warn!("No packet files are given, there is nothing to inspect.");

        return Ok(ExitCode::SUCCESS);
    }

    let report = rtp_inspect::inspect(&config);
    log::info!(
        "inspection done: parsed={}, rejected={}",
        report.parsed,
        report.rejected
    );

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
