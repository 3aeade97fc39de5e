//! Command-line surface.

use std::time::Duration;

use clap::Parser;

use crate::feed::DEFAULT_FEED_URL;
use crate::notify::DEFAULT_ENDPOINT;

#[derive(Debug, Clone, Parser)]
#[command(name = "mstreamb0t", version)]
#[command(about = "Bot that notifies you when a specified manga is released on MangaStream")]
pub struct Cli {
    /// Comma-separated manga names to watch for
    #[arg(long, env = "MANGA_NAMES", default_value = "")]
    pub manga_names: String,

    /// Update interval (ex. 5ms, 10s, 1m, 3h)
    #[arg(long, default_value = "1m", value_parser = parse_interval)]
    pub interval: Duration,

    /// Run once and exit, do not run as a daemon
    #[arg(long)]
    pub once: bool,

    /// Release feed to poll
    #[arg(long, env = "MSTREAMB0T_FEED_URL", default_value = DEFAULT_FEED_URL, hide = true)]
    pub feed_url: String,

    /// Pushbullet API base URL
    #[arg(long, env = "PUSHBULLET_URL", default_value = DEFAULT_ENDPOINT, hide = true)]
    pub pushbullet_url: String,
}

/// Clap value parser for Go-style durations such as `90s`, `1h30m` or `1.5h`.
///
/// Supported units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`. The result must be
/// longer than zero since it drives a ticker.
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    let input = s.trim();
    if input.is_empty() {
        return Err("duration cannot be empty".to_string());
    }

    let mut total = 0f64;
    let mut rest = input;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return Err(format!("invalid duration {:?}", s));
        }
        let value: f64 = rest[..num_len]
            .parse()
            .map_err(|_| format!("invalid duration {:?}", s))?;
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => return Err(format!("missing unit in duration {:?}", s)),
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, s)),
        };
        rest = &rest[unit_len..];
        total += value * nanos_per_unit;
    }

    if total < 1.0 || !total.is_finite() {
        return Err(format!("duration must be positive, got {:?}", s));
    }
    Ok(Duration::from_nanos(total as u64))
}

/// Render a duration the way `parse_interval` reads it, e.g. `1m0s`,
/// `1h30m0s` or `5ms`.
pub fn format_interval(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < 1_000_000_000 {
        let (scale, unit) = if nanos < 1_000 {
            (1, "ns")
        } else if nanos < 1_000_000 {
            (1_000, "µs")
        } else {
            (1_000_000, "ms")
        };
        return format!("{}{}", with_fraction(nanos / scale, nanos % scale, scale), unit);
    }

    let secs = d.as_secs();
    let (hours, minutes) = (secs / 3600, secs / 60 % 60);
    let seconds = with_fraction(
        u128::from(secs % 60),
        u128::from(d.subsec_nanos()),
        1_000_000_000,
    );
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

fn with_fraction(whole: u128, frac: u128, scale: u128) -> String {
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", frac, width = scale.ilog10() as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
