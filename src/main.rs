use anyhow::{bail, Context, Result};
use std::env;
use tracing_subscriber::EnvFilter;

use saju_engine::{analyze, BirthInput, Gender, NoLunarConverter};

const USAGE: &str = "usage: saju-engine YEAR MONTH DAY HOUR GENDER [--lunar] [--leap] [--compact]";

struct CliArgs {
    input: BirthInput,
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    run_chart(&cli)
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let (flags, positional): (Vec<&String>, Vec<&String>) =
        args.iter().partition(|arg| arg.starts_with("--"));

    let mut lunar = false;
    let mut leap_month = false;
    let mut compact = false;
    for flag in flags {
        match flag.as_str() {
            "--lunar" => lunar = true,
            "--leap" => leap_month = true,
            "--compact" => compact = true,
            other => bail!("unknown flag {}\n{}", other, USAGE),
        }
    }

    if positional.len() != 5 {
        bail!("expected 5 arguments, got {}\n{}", positional.len(), USAGE);
    }

    let year: i32 = positional[0].parse().context("YEAR must be an integer")?;
    let month: u32 = positional[1].parse().context("MONTH must be an integer")?;
    let day: u32 = positional[2].parse().context("DAY must be an integer")?;
    let hour: u32 = positional[3].parse().context("HOUR must be an integer")?;
    let gender: Gender = positional[4].parse()?;

    let input = if lunar {
        BirthInput::lunar(year, month, day, leap_month, hour, gender)
    } else {
        BirthInput::solar(year, month, day, hour, gender)
    };

    Ok(CliArgs { input, compact })
}

fn run_chart(cli: &CliArgs) -> Result<()> {
    let input = &cli.input;

    eprintln!("🔮 Saju Engine v{}", saju_engine::VERSION);
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "\n📅 Birth: {}-{:02}-{:02} {:02}시 ({}) {}",
        input.year,
        input.month,
        input.day,
        input.hour,
        input.gender.korean(),
        if matches!(input.calendar, saju_engine::CalendarKind::Lunar { .. }) { "음력" } else { "양력" }
    );

    // No calendar service is wired into the CLI; lunar input fails explicitly
    let report = analyze(input, &NoLunarConverter).context("chart computation failed")?;

    eprintln!("✓ {}", report.summary());
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    let json = if cli.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_engine::CalendarKind;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_solar_args() {
        let cli = parse_args(&args(&["1990", "5", "15", "14", "male"])).unwrap();
        assert_eq!(cli.input, BirthInput::solar(1990, 5, 15, 14, Gender::Male));
        assert!(!cli.compact);
    }

    #[test]
    fn test_parse_lunar_flags_anywhere() {
        let cli = parse_args(&args(&["--lunar", "1990", "4", "21", "--leap", "14", "여", "--compact"])).unwrap();
        assert_eq!(cli.input.calendar, CalendarKind::Lunar { leap_month: true });
        assert_eq!(cli.input.gender, Gender::Female);
        assert!(cli.compact);
    }

    #[test]
    fn test_parse_rejects_bad_args() {
        assert!(parse_args(&args(&["1990", "5", "15"])).is_err());
        assert!(parse_args(&args(&["1990", "5", "15", "14", "male", "--verbose"])).is_err());
        assert!(parse_args(&args(&["1990", "five", "15", "14", "male"])).is_err());
    }
}
