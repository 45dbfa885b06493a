//! Debounced search driven from stdin
//!
//! Each input line is the search box's current value, as if the user had
//! typed it. Queries are printed when the debouncer fires; at end of input
//! the pending query is flushed instead of waiting out the delay.

use crate::system_config;
use anyhow::{Context, Result};
use debounce::{Delay, TokioTimer};
use navbar::{SearchBar, SearchDone};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

pub async fn run(delay_override: Option<i64>) -> Result<()> {
    let config = system_config::load()?;
    let delay = match delay_override {
        Some(ms) => Delay::from_millis(ms).context("Invalid --delay-ms")?,
        None => config.search_delay()?,
    };

    let timer = TokioTimer::current()?;
    let bar = SearchBar::new(
        |query: String, done: SearchDone| {
            println!("search: {}", query);
            done.finish();
        },
        delay,
        timer,
    );
    info!("Search debounce set to {}", delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(value) => bar.input(value),
                    None => break,
                }
            }
            _ = &mut shutdown => {
                if bar.cancel() {
                    warn!("Interrupted, pending search dropped");
                }
                return Ok(());
            }
        }
    }

    bar.flush();
    info!("{} searches issued", bar.searches_issued());
    Ok(())
}
