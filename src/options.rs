use anyhow::{Context, Result, bail};
use sparselife::Cell;
use std::{str::FromStr, time::Duration};

const DEFAULT_GRID: (i64, i64) = (64, 64);
const DEFAULT_GENS: u64 = 100;
const CONSOLE_SLEEP: Duration = Duration::from_millis(100);

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in interactive console mode");
        opts.optflag("p", "print", "print the final board to stdout");
        opts.optopt("i", "input", "read the initial board from an RLE file", "FILE");
        opts.optopt("o", "output", "write the final board to an RLE file", "FILE");
        opts.optopt("w", "width", "width of the generated board", "WIDTH");
        opts.optopt("h", "height", "height of the generated board", "HEIGHT");
        opts.optopt(
            "f",
            "fill",
            "how to fill the generated board: random, alternating, all, empty",
            "TYPE",
        );
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "number of generations to simulate", "COUNT");
        opts
    }

    /// Parses the arguments, `None` when only help was requested
    pub fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let opts = Self::options();
        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .context("invalid arguments")?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: sparselife [options]"));
            return Ok(None);
        }

        let args = Self { matches };
        // surface malformed values now rather than mid-simulation
        args.grid_size()?;
        args.fill_mode()?;
        args.generations()?;
        args.sleep()?;
        Ok(Some(args))
    }

    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().skip(1).collect::<Vec<_>>();
        Self::new(&env)
    }

    fn get<V>(&self, name: &str) -> Result<Option<V>>
    where
        V: FromStr,
        V::Err: std::error::Error + Send + Sync + 'static,
    {
        self.matches
            .opt_get(name)
            .with_context(|| format!("invalid value for --{name}"))
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn print(&self) -> bool {
        self.matches.opt_present("print")
    }

    /// `None` runs until interrupted, which only console mode allows
    pub fn generations(&self) -> Result<Option<u64>> {
        match self.get("gens")? {
            Some(gens) => Ok(Some(gens)),
            None if self.console() => Ok(None),
            None => Ok(Some(DEFAULT_GENS)),
        }
    }
    pub fn sleep(&self) -> Result<Option<Duration>> {
        Ok(match self.get("sleep")? {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(CONSOLE_SLEEP),
            None => None,
        })
    }

    pub fn grid_size(&self) -> Result<(i64, i64)> {
        let width = self.get("width")?.unwrap_or(DEFAULT_GRID.0);
        let height = self.get("height")?.unwrap_or(DEFAULT_GRID.1);
        if width < 0 || height < 0 {
            bail!("grid size must not be negative, got {width}x{height}");
        }
        Ok((width, height))
    }
    pub fn fill_mode(&self) -> Result<FillMode> {
        let mode = self.matches.opt_str("fill");
        FillMode::new(mode.as_deref().unwrap_or("random"))
    }

    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }
    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new(s: &str) -> Result<Self> {
        Ok(match s {
            "random" => Self::Random,
            "alternating" => Self::Alternating,
            "all" => Self::All,
            "empty" => Self::Empty,
            other => bail!("unknown fill mode `{other}`"),
        })
    }

    fn fill_cell<R: rand::Rng>(&self, cell: Cell, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }

    pub fn create_alive(self, w: i64, h: i64) -> Vec<Cell> {
        if self == Self::Empty {
            return Vec::new();
        }

        let mut rng = rand::rng();
        (0..h)
            .flat_map(|y| (0..w).map(move |x| Cell { x, y }))
            .filter(|&cell| self.fill_cell(cell, &mut rng))
            .collect()
    }
}
