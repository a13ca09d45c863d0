use std::{
    io::{self, Write},
    path::Path,
    time::{Duration, Instant},
};
use toruslife::Simulation;

const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// A single generation of a run, as written to the stats csv
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    generation: u64,
    delta_micros: u128,
    alive: usize,
}

/// Follows a [`Simulation`] as it runs
///
/// Throughput is logged at debug level every half second. Per-generation
/// samples are only kept when they are going to be saved.
pub struct RunStats {
    samples: Option<Vec<Sample>>,
    last_sample: Instant,
    last_report: Instant,
    since_report: u64,
}

impl RunStats {
    pub fn new(keep_samples: bool) -> Self {
        let now = Instant::now();
        Self {
            samples: keep_samples.then(Vec::new),
            last_sample: now,
            last_report: now,
            since_report: 0,
        }
    }

    /// Records the generation `sim` has just reached
    pub fn record(&mut self, sim: &Simulation) {
        let alive = sim.universe().alive_count();
        if let Some(report) = self.record_at(sim.generation(), alive, Instant::now()) {
            log::debug!("{}", report);
        }
    }

    fn record_at(&mut self, generation: u64, alive: usize, now: Instant) -> Option<String> {
        if let Some(samples) = &mut self.samples {
            samples.push(Sample {
                generation,
                delta_micros: now.saturating_duration_since(self.last_sample).as_micros(),
                alive,
            });
        }
        self.last_sample = now;
        self.since_report += 1;

        let elapsed = now.saturating_duration_since(self.last_report);
        if elapsed < REPORT_INTERVAL {
            return None;
        }
        let per_sec = self.since_report as f64 / elapsed.as_secs_f64();
        self.last_report = now;
        self.since_report = 0;
        Some(format!(
            "{:.02}gen/s generation:{}, alive:{}",
            per_sec, generation, alive
        ))
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"gen,delta_t,alive\n")?;
        for sample in self.samples.iter().flatten() {
            writeln!(
                out,
                "{},{},{}",
                sample.generation, sample.delta_micros, sample.alive
            )?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}
