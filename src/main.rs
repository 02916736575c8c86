// std imports
use std::io::{self, BufRead, IsTerminal, stdout};
use std::process;

// third-party imports
use clap::Parser;
use env_logger::{self as logger};

// local imports
use pagewise::{
    cli, config, console,
    error::*,
    paging::{AnyPager, NullPager, page},
    settings::Settings,
};

const PAGEWISE_DEBUG_LOG: &str = "PAGEWISE_DEBUG_LOG";
const PAGEWISE_DEBUG_LOG_STYLE: &str = "PAGEWISE_DEBUG_LOG_STYLE";

/// Exit code used when the pager process reported a failure.
const PAGER_FAILED: i32 = 141;

// ---

fn bootstrap(opt: &cli::Opt) -> Result<Settings> {
    if std::env::var(PAGEWISE_DEBUG_LOG).is_ok() {
        logger::Builder::from_env(
            logger::Env::new()
                .filter(PAGEWISE_DEBUG_LOG)
                .write_style(PAGEWISE_DEBUG_LOG_STYLE),
        )
        .format_timestamp_micros()
        .init();
        log::debug!("logging initialized");
    } else {
        logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .format_timestamp_millis()
            .init()
    }

    config::load(opt.config.as_deref())
}

fn run() -> Result<bool> {
    let opt = cli::Opt::parse_from(wild::args());
    let settings = bootstrap(&opt)?;

    let output = stdout();
    let interactive = output.is_terminal();
    let enabled = opt.paging_mode(&settings).enabled(interactive);

    let mut pager = if enabled {
        let input = prompt_input(opt.reads_stdin());
        opt.options(&settings, enabled).build(output.lock(), input, interactive)
    } else {
        // the text still has to reach a redirected output
        AnyPager::Null(NullPager::new(output.lock(), true))
    };
    log::debug!("paging with {:?}", pager.strategy());

    page(&mut pager, opt.content())
}

fn prompt_input(content_from_stdin: bool) -> Box<dyn BufRead> {
    console::prompt_input(content_from_stdin).unwrap_or_else(|e| {
        log::debug!("no input for prompts: {e}");
        Box::new(io::empty())
    })
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(PAGER_FAILED),
        Err(err) => {
            err.log();
            process::exit(1);
        }
    }
}
