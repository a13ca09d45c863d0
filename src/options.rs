use regex::Regex;
use std::{
    sync::OnceLock,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use thiserror::Error;
use toruslife::{Budget, RenderMode};

const DEFAULT_COLS: usize = 75;
const DEFAULT_ROWS: usize = 20;
const DEFAULT_DELAY_SECS: i64 = 1;
const USAGE: &str = "usage: toruslife [options]";

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("{0}")]
    Parse(#[from] getopts::Fail),
    #[error("size must be COLSxROWS with positive values, got '{0}'")]
    BadSize(String),
    #[error("delay must not be negative, got {0}")]
    NegativeDelay(i64),
    #[error("invalid value '{value}' for --{name}")]
    BadNumber { name: &'static str, value: String },
    #[error("loading a board from '{0}' is not supported yet, use --random")]
    FileUnsupported(String),
}
impl OptionsError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Parse(_) | Self::BadNumber { .. } => 1,
            Self::BadSize(_) => 3,
            Self::NegativeDelay(_) => 5,
            Self::FileUnsupported(_) => 255,
        }
    }
}

/// What the command line asked the program to do
pub enum Invocation {
    Run(Args),
    Help(String),
    Version,
}

/// Everything the simulation loop needs, validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub seed: Option<u64>,
    pub budget: Budget,
    pub delay: Duration,
    pub mode: RenderMode,
    pub console: bool,
    pub stats_file: Option<String>,
}

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("h", "help", "show this help and exit");
        opts.optflag("v", "version", "show the version and exit");
        opts.optopt(
            "d",
            "delay",
            "seconds between generations, or 0 for none (default 1)",
            "SECS",
        );
        opts.optopt(
            "g",
            "gens",
            "max number of generations, or -1 for infinite (default)",
            "COUNT",
        );
        opts.optopt("s", "size", "board size (default 75x20)", "COLSxROWS");
        opts.optflag("r", "random", "randomize the board");
        opts.optopt(
            "",
            "seed",
            "randomize the board from a fixed seed (implies --random)",
            "SEED",
        );
        opts.optopt("f", "file", "load the board from a file (not supported yet)", "FILE");
        opts.optflag("n", "neighbors", "render neighbor counts instead of cells");
        opts.optflag("c", "console", "redraw the board in place");
        opts.optopt("", "stats", "write stats csv to file", "FILE");
        opts
    }

    pub fn parse<T: AsRef<str>>(args: &[T]) -> Result<Invocation, OptionsError> {
        let opts = Self::options();
        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            return Ok(Invocation::Help(opts.usage(USAGE)));
        }
        if matches.opt_present("version") {
            return Ok(Invocation::Version);
        }
        if !matches.free.is_empty() {
            log::warn!("ignoring extra arguments: {:?}", matches.free);
        }
        Ok(Invocation::Run(Self { matches }))
    }
    pub fn from_env() -> Result<Invocation, OptionsError> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::parse(env.get(1..).unwrap_or_default())
    }

    pub fn help() -> String {
        Self::options().usage(USAGE)
    }

    fn number(&self, name: &'static str) -> Result<Option<i64>, OptionsError> {
        self.matches
            .opt_str(name)
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| OptionsError::BadNumber { name, value })
            })
            .transpose()
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    /// Whether the board starts randomized, either flag asks for it
    pub fn random(&self) -> bool {
        self.matches.opt_present("random") || self.matches.opt_present("seed")
    }
    pub fn render_mode(&self) -> RenderMode {
        if self.matches.opt_present("neighbors") {
            RenderMode::Neighbors
        } else {
            RenderMode::Cells
        }
    }

    pub fn budget(&self) -> Result<Budget, OptionsError> {
        Ok(Budget::from_count(self.number("gens")?.unwrap_or(-1)))
    }
    pub fn delay(&self) -> Result<Duration, OptionsError> {
        match self.number("delay")?.unwrap_or(DEFAULT_DELAY_SECS) {
            secs if secs < 0 => Err(OptionsError::NegativeDelay(secs)),
            secs => Ok(Duration::from_secs(secs as u64)),
        }
    }

    pub fn seed(&self) -> Result<Option<u64>, OptionsError> {
        if !self.random() {
            return Ok(None);
        }
        let seed = match self.matches.opt_str("seed") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| OptionsError::BadNumber { name: "seed", value })?,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        };
        Ok(Some(seed))
    }

    /// The `(rows, cols)` of the board
    pub fn grid_size(&self) -> Result<(usize, usize), OptionsError> {
        let default = if self.console() {
            terminal_grid_size()
        } else {
            (DEFAULT_ROWS, DEFAULT_COLS)
        };
        match self.matches.opt_str("size") {
            Some(size) => parse_size(&size, default.0),
            None => Ok(default),
        }
    }

    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("file")
    }
    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }

    pub fn config(&self) -> Result<Config, OptionsError> {
        if let Some(file) = self.input_file() {
            return Err(OptionsError::FileUnsupported(file));
        }
        let (rows, cols) = self.grid_size()?;
        Ok(Config {
            rows,
            cols,
            seed: self.seed()?,
            budget: self.budget()?,
            delay: self.delay()?,
            mode: self.render_mode(),
            console: self.console(),
            stats_file: self.stats_file(),
        })
    }
}

/// Fits a board to the current terminal, leaving room for the frame's
/// leading line break and the cursor line
fn terminal_grid_size() -> (usize, usize) {
    match crossterm::terminal::size() {
        Ok((cols, rows)) => (
            usize::from(rows).saturating_sub(2).max(1),
            usize::from(cols).max(1),
        ),
        Err(err) => {
            log::warn!("cannot read terminal size, using defaults: {}", err);
            (DEFAULT_ROWS, DEFAULT_COLS)
        }
    }
}

/// Parses a `COLSxROWS` string into `(rows, cols)`
///
/// The rows part may be left out, in which case `default_rows` is used.
fn parse_size(size: &str, default_rows: usize) -> Result<(usize, usize), OptionsError> {
    static SIZE_RE: OnceLock<Regex> = OnceLock::new();
    let re = SIZE_RE.get_or_init(|| {
        Regex::new(r"^\s*(\d+)(?:[xX](\d+))?\s*$").expect("valid size pattern")
    });

    let bad_size = || OptionsError::BadSize(size.to_owned());
    let caps = re.captures(size).ok_or_else(bad_size)?;
    let cols: usize = caps[1].parse().map_err(|_| bad_size())?;
    let rows: usize = match caps.get(2) {
        Some(rows) => rows.as_str().parse().map_err(|_| bad_size())?,
        None => default_rows,
    };
    if rows == 0 || cols == 0 {
        return Err(bad_size());
    }
    Ok((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Args {
        match Args::parse(args).expect("valid arguments") {
            Invocation::Run(args) => args,
            _ => panic!("expected a run invocation"),
        }
    }

    fn config(list: &[&str]) -> Result<Config, OptionsError> {
        args(list).config()
    }

    #[test]
    fn defaults_match_classic_board() {
        let config = config(&[]).expect("default config");

        assert_eq!((config.rows, config.cols), (20, 75));
        assert_eq!(config.budget, Budget::Unbounded);
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!(config.seed, None);
        assert_eq!(config.mode, RenderMode::Cells);
        assert!(!config.console);
    }

    #[test]
    fn size_is_cols_by_rows() {
        let config = config(&["--size", "10x4"]).expect("sized config");

        assert_eq!((config.rows, config.cols), (4, 10));
    }

    #[test]
    fn size_without_rows_keeps_default_rows() {
        assert_eq!(parse_size("30", 20).expect("cols only"), (20, 30));
    }

    #[test]
    fn bad_sizes_are_rejected() {
        for size in ["0x5", "5x0", "axb", "5x", "-3x4", ""] {
            let err = parse_size(size, 20).expect_err(size);
            assert_eq!(err.exit_code(), 3, "{}", size);
        }
    }

    #[test]
    fn negative_delay_is_rejected() {
        let err = config(&["-d", "-2"]).expect_err("negative delay");

        assert!(matches!(err, OptionsError::NegativeDelay(-2)));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn zero_delay_means_no_sleep() {
        let config = config(&["--delay", "0"]).expect("zero delay");

        assert_eq!(config.delay, Duration::ZERO);
    }

    #[test]
    fn generations_accept_infinite_sentinel() {
        assert_eq!(config(&["-g", "-1"]).unwrap().budget, Budget::Unbounded);
        assert_eq!(config(&["-g", "25"]).unwrap().budget, Budget::Remaining(25));
    }

    #[test]
    fn malformed_numbers_are_usage_errors() {
        let err = config(&["--gens", "many"]).expect_err("bad count");

        assert!(matches!(err, OptionsError::BadNumber { name: "gens", .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn random_uses_given_seed() {
        let config = config(&["-r", "--seed", "99"]).expect("seeded config");

        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn seed_alone_randomizes() {
        let args = args(&["--seed", "9", "-s", "4x2"]);

        assert!(args.random());
        assert_eq!(args.config().expect("seeded config").seed, Some(9));
    }

    #[test]
    fn random_does_not_need_size_first() {
        let config = config(&["-r", "-s", "8x6"]).expect("random before size");

        assert!(config.seed.is_some());
        assert_eq!((config.rows, config.cols), (6, 8));
    }

    #[test]
    fn file_loading_is_unsupported() {
        let err = config(&["-f", "board.txt"]).expect_err("file input");

        assert!(matches!(err, OptionsError::FileUnsupported(_)));
        assert_eq!(err.exit_code(), 255);
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert!(matches!(Args::parse(&["-h", "-f", "x"]), Ok(Invocation::Help(_))));
        assert!(matches!(Args::parse(&["--version"]), Ok(Invocation::Version)));
    }

    #[test]
    fn unknown_option_is_a_parse_error() {
        let err = Args::parse(&["--bogus"]).err().expect("unknown option");

        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn neighbors_flag_switches_mode() {
        assert_eq!(args(&["-n"]).render_mode(), RenderMode::Neighbors);
    }
}
