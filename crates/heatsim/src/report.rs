//! Unconditional stdout summary: a single CSV line, printed once for the
//! whole run (the in-process stand-in for "rank 0 prints"), independent
//! of the logging level, so a run is always machine-checkable from its
//! console output.

/// The inputs the report needs beyond the final grids themselves: the
/// refined domain shape, the process layout, the tile size, the thread
/// count the intra-rank scheduler used, and the run's wall-clock time.
pub struct RunReport {
    pub rows: usize,
    pub cols: usize,
    pub bs: usize,
    pub ranks: usize,
    pub threads: usize,
    pub timesteps: usize,
    pub elapsed_secs: f64,
}

impl RunReport {
    /// Million cell updates per second: `rows*cols*timesteps / elapsed / 1e6`.
    pub fn mcups(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        (self.rows * self.cols * self.timesteps) as f64 / self.elapsed_secs / 1.0e6
    }

    /// Render the CSV line with fields in order: rows, cols,
    /// rows_per_rank, total, total_per_rank, bs, ranks, threads,
    /// timesteps, time, performance.
    pub fn to_csv_line(&self) -> String {
        let total = self.rows * self.cols;
        let rows_per_rank = self.rows / self.ranks.max(1);
        let total_per_rank = total / self.ranks.max(1);
        format!(
            "rows,{},cols,{},rows_per_rank,{},total,{},total_per_rank,{},bs,{},ranks,{},threads,{},timesteps,{},time,{:.6},performance,{:.6}",
            self.rows,
            self.cols,
            rows_per_rank,
            total,
            total_per_rank,
            self.bs,
            self.ranks,
            self.threads,
            self.timesteps,
            self.elapsed_secs,
            self.mcups(),
        )
    }
}

/// Print the report CSV line to stdout.
pub fn print_report(report: &RunReport) {
    println!("{}", report.to_csv_line());
}
