use clap::Args;
use focuslog_core::error::Result;
use focuslog_core::{Config, Distraction, DistractionType, SessionReport, SessionState, ValidationError};

use crate::render;

#[derive(Args)]
pub struct ReportArgs {
    /// Session length in whole minutes
    #[arg(long)]
    pub duration: u64,
    /// A distraction as TYPE@MINUTE, e.g. quick@3 or major_break@12.5 (repeatable)
    #[arg(long = "distraction", value_name = "TYPE@MINUTE")]
    pub distractions: Vec<String>,
    /// Heatmap bucket width in minutes (defaults to the configured value)
    #[arg(long)]
    pub interval: Option<u64>,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse `TYPE@MINUTE` into a distraction relative to a session starting at 0.
fn parse_distraction(arg: &str) -> Result<Distraction, ValidationError> {
    let invalid = |message: &str| ValidationError::InvalidValue {
        field: "distraction".into(),
        message: format!("'{arg}': {message}"),
    };

    let (kind, minute) = arg
        .split_once('@')
        .ok_or_else(|| invalid("expected TYPE@MINUTE"))?;
    let kind: DistractionType = kind.parse()?;
    let minute: f64 = minute
        .trim()
        .parse()
        .map_err(|_| invalid("minute is not a number"))?;
    if !minute.is_finite() {
        return Err(invalid("minute is not a number"));
    }
    Ok(Distraction::new(kind, (minute * 60_000.0).round() as i64))
}

pub fn run(args: ReportArgs, config: &Config) -> Result<()> {
    let interval = match args.interval {
        Some(0) => {
            return Err(ValidationError::InvalidValue {
                field: "interval".into(),
                message: "must be greater than zero".into(),
            }
            .into())
        }
        Some(interval) => interval,
        None => config.heatmap_interval(),
    };

    let mut distractions = args
        .distractions
        .iter()
        .map(|arg| parse_distraction(arg))
        .collect::<Result<Vec<_>, _>>()?;
    distractions.sort_by_key(|d| d.timestamp);

    let state = SessionState {
        is_active: false,
        start_time: Some(0),
        end_time: Some(args.duration as i64 * 60_000),
        distractions,
        duration: args.duration,
    };
    let report = SessionReport::from_state(&state, interval);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::report_text(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_and_minute() {
        let d = parse_distraction("quick@3").unwrap();
        assert_eq!(d.kind, DistractionType::QuickCheck);
        assert_eq!(d.timestamp, 180_000);

        let d = parse_distraction("major_break@12.5").unwrap();
        assert_eq!(d.kind, DistractionType::MajorBreak);
        assert_eq!(d.timestamp, 750_000);

        let d = parse_distraction("d@-1").unwrap();
        assert_eq!(d.timestamp, -60_000);
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(matches!(
            parse_distraction("quick"),
            Err(ValidationError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_distraction("quick@soon"),
            Err(ValidationError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_distraction("nap@3"),
            Err(ValidationError::UnknownDistractionType(_))
        ));
    }
}
