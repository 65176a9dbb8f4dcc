use anyhow::Context;
use flexi_logger::Logger;
use lexopt::{Arg, Parser, ValueExt};
use monthpager::{CalendarArithmetic, DatedRecord, DayCell, Gregorian, MonthWindow, WindowConfig};
use std::io::{self, Write};
use std::iter::successors;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, Weekday};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    today: Option<Date>,
    week_start: Option<Weekday>,
    forward: usize,
    backward: usize,
    jump_to_today: bool,
    records: Vec<Date>,
    yearly: bool,
    verbosity: u8,
}

impl Options {
    fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week-start") => {
                    opts.week_start = Some(parser.value()?.parse_with(parse_weekday)?);
                }
                Arg::Short('f') | Arg::Long("forward") => {
                    opts.forward = parser.value()?.parse()?;
                }
                Arg::Short('b') | Arg::Long("backward") => {
                    opts.backward = parser.value()?.parse()?;
                }
                Arg::Short('t') | Arg::Long("today") => opts.jump_to_today = true,
                Arg::Short('r') | Arg::Long("record") => {
                    opts.records.push(parser.value()?.parse_with(parse_ymd)?);
                }
                Arg::Short('y') | Arg::Long("yearly") => opts.yearly = true,
                Arg::Short('v') | Arg::Long("verbose") => {
                    opts.verbosity = opts.verbosity.saturating_add(1);
                }
                Arg::Value(value) if opts.today.is_none() => {
                    opts.today = Some(value.parse_with(parse_ymd)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                // Must be queried before any other threads exist
                let mut calendar =
                    Gregorian::local().context("failed to determine local UTC offset")?;
                let _logger = Logger::try_with_env_or_str(opts.log_level())
                    .context("failed to configure logging")?
                    .start()
                    .context("failed to start logger")?;
                if let Some(today) = opts.today {
                    calendar = calendar.pinned(today);
                }
                let offset = calendar.offset();
                let config = WindowConfig::new().with_match_record_year(!opts.yearly);
                let mut window = MonthWindow::with_config(calendar, config);
                window.initialize(
                    WindowConfig::DEFAULT_START,
                    opts.week_start.unwrap_or(WindowConfig::DEFAULT_FIRST_WEEKDAY),
                    opts.records.iter().map(|d| d.midnight().assume_offset(offset)),
                );
                for _ in 0..opts.forward {
                    window.page_forward();
                }
                for _ in 0..opts.backward {
                    window.page_backward();
                }
                if opts.jump_to_today {
                    window.jump_to_today();
                }
                let mut out = io::stdout().lock();
                render(&window, &mut out).context("failed to write calendar")?;
                out.flush().context("failed to write calendar")?;
                Ok(())
            }
            Command::Help => {
                println!("Usage: monthpager [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Show a sliding window of month grids, optionally paged forwards or backwards");
                println!();
                println!("The positional date, if given, is used as today's date.");
                println!();
                println!("Options:");
                println!("  -w, --week-start <DAY>    Start weeks on the given day [default: Sunday]");
                println!("  -f, --forward <N>         Page forward N times");
                println!("  -b, --backward <N>        Page backward N times (after paging forward)");
                println!("  -t, --today               Jump back to today's month after paging");
                println!("  -r, --record <YYYY-MM-DD> Mark a date as having a record; may be repeated");
                println!("  -y, --yearly              Match records on month & day regardless of year");
                println!("  -v, --verbose             Increase log verbosity; may be repeated");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown day of the week: {0:?}")]
struct UnknownWeekday(String);

/// Accepts a weekday's English name or any prefix of it at least three
/// letters long, case-insensitively
fn parse_weekday(s: &str) -> Result<Weekday, UnknownWeekday> {
    let wanted = s.to_ascii_lowercase();
    if wanted.len() >= 3 {
        if let Some(wd) = successors(Some(Weekday::Monday), |wd| Some(wd.next()))
            .take(7)
            .find(|wd| wd.to_string().to_ascii_lowercase().starts_with(&wanted))
        {
            return Ok(wd);
        }
    }
    Err(UnknownWeekday(s.to_owned()))
}

/// Write the resident months (the displayed one in brackets), a weekday
/// header, and the displayed month's grid
fn render<C, R, W>(window: &MonthWindow<C, R>, out: &mut W) -> io::Result<()>
where
    C: CalendarArithmetic,
    R: DatedRecord,
    W: Write,
{
    let displayed = window.displayed_index();
    let months = window
        .pages()
        .iter()
        .enumerate()
        .map(|(i, page)| {
            if i == displayed {
                format!("[{}]", page.label())
            } else {
                page.label()
            }
        })
        .collect::<Vec<_>>();
    writeln!(out, "{}", months.join(" "))?;
    writeln!(out)?;
    let Some(page) = window.displayed_page() else {
        return Ok(());
    };
    for wd in window.week_order() {
        let abbrev = wd.to_string().chars().take(2).collect::<String>();
        write!(out, "{abbrev:^5}")?;
    }
    writeln!(out)?;
    if page.is_empty() {
        writeln!(out, "(no days)")?;
    }
    for week in page.weeks() {
        for cell in week {
            write!(out, "{}", cell_text(cell))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn cell_text<R>(cell: &DayCell<R>) -> String {
    if cell.is_blank() {
        return String::from("     ");
    }
    let day = cell.day_of_month();
    let mark = if cell.records().is_empty() { ' ' } else { '*' };
    if cell.is_today() {
        format!("[{day:>2}]{mark}")
    } else {
        format!(" {day:>2}{mark} ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::OffsetDateTime;

    fn parse_args(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("monthpager").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse_args(&[]).ok(), Some(Command::Run(Options::default())));
    }

    #[test]
    fn test_parse_everything() {
        let cmd = parse_args(&[
            "-w", "mon", "--forward", "3", "-b1", "-t", "-r", "2024-02-29", "--record=2024-03-01",
            "-y", "-vv", "2024-05-17",
        ]);
        let expected = Options {
            today: Some(date!(2024 - 05 - 17)),
            week_start: Some(Weekday::Monday),
            forward: 3,
            backward: 1,
            jump_to_today: true,
            records: vec![date!(2024 - 02 - 29), date!(2024 - 03 - 01)],
            yearly: true,
            verbosity: 2,
        };
        assert_eq!(cmd.ok(), Some(Command::Run(expected)));
    }

    #[test]
    fn test_parse_help_wins() {
        assert_eq!(parse_args(&["-f", "2", "--help"]).ok(), Some(Command::Help));
        assert_eq!(parse_args(&["-V"]).ok(), Some(Command::Version));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&["2024-13-01"]).is_err());
        assert!(parse_args(&["2024-01-01", "2024-01-02"]).is_err());
        assert!(parse_args(&["-w", "tu"]).is_err());
        assert!(parse_args(&["-f", "-1"]).is_err());
        assert!(parse_args(&["--bogus"]).is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Sunday"), Ok(Weekday::Sunday));
        assert_eq!(parse_weekday("THU"), Ok(Weekday::Thursday));
        assert_eq!(parse_weekday("tues"), Ok(Weekday::Tuesday));
        assert_eq!(
            parse_weekday("Sundays"),
            Err(UnknownWeekday(String::from("Sundays")))
        );
        assert!(parse_weekday("").is_err());
    }

    #[test]
    fn test_log_level() {
        let mut opts = Options::default();
        assert_eq!(opts.log_level(), "warn");
        opts.verbosity = 2;
        assert_eq!(opts.log_level(), "debug");
        opts.verbosity = 9;
        assert_eq!(opts.log_level(), "trace");
    }

    #[test]
    fn test_render() {
        let mut window =
            MonthWindow::new(Gregorian::utc().pinned(date!(2026 - 10 - 16)));
        window.initialize(
            WindowConfig::DEFAULT_START,
            Weekday::Sunday,
            [datetime!(2026-10-05 0:00 UTC)],
        );
        let mut buf = Vec::new();
        assert!(render(&window, &mut buf).is_ok());
        let text = String::from_utf8(buf).unwrap_or_default();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            lines.first().copied(),
            Some("2026-08 2026-09 [2026-10] 2026-11 2026-12")
        );
        let words = |i: usize| {
            lines
                .get(i)
                .map(|ln| ln.split_whitespace().collect::<Vec<_>>())
                .unwrap_or_default()
        };
        assert_eq!(words(2), ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
        assert_eq!(words(3), ["1", "2", "3"]);
        assert_eq!(words(4), ["4", "5*", "6", "7", "8", "9", "10"]);
        assert_eq!(words(5), ["11", "12", "13", "14", "15", "[16]", "17"]);
        assert_eq!(lines.len(), 3 + 6);
    }

    #[test]
    fn test_render_empty_page() {
        let mut window: MonthWindow<Gregorian, OffsetDateTime> =
            MonthWindow::new(Gregorian::utc().pinned(date!(9999 - 12 - 01)));
        window.initialize(WindowConfig::DEFAULT_START, Weekday::Monday, []);
        window.page_forward();
        let mut buf = Vec::new();
        assert!(render(&window, &mut buf).is_ok());
        let text = String::from_utf8(buf).unwrap_or_default();
        assert!(text.starts_with("9999-10 9999-11 9999-12 [10000-01] 10000-02\n"));
        assert!(text.contains("(no days)"));
    }
}
