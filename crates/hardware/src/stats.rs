//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived metrics.
//! 2. **Hazards:** Load-use and functional-unit stall cycles, squashed instructions.
//! 3. **Branch prediction:** Resolved branches, mispredictions, BTB hits, and accuracy.
//! 4. **Functional units:** Multiplier and divider operations, flagged divider faults.

use std::fmt::Write as _;
use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired), halt included.
    pub instructions_retired: u64,

    /// Cycles decode stalled on a load-use dependency.
    pub stalls_load_use: u64,
    /// Cycles decode stalled while the multiplier or divider was busy.
    pub stalls_unit: u64,
    /// Wrong-path instructions squashed after a misprediction.
    pub flushed: u64,

    /// Branches and jumps resolved in EX.
    pub branches: u64,
    /// Resolutions whose next PC differed from the prediction.
    pub mispredictions: u64,
    /// Fetches that hit in the BTB.
    pub btb_hits: u64,

    /// Operations started in the multiplier.
    pub mul_ops: u64,
    /// Operations started in the divider.
    pub div_ops: u64,
    /// Divider results flagged as divide-by-zero or overflow.
    pub div_faults: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            stalls_load_use: 0,
            stalls_unit: 0,
            flushed: 0,
            branches: 0,
            mispredictions: 0,
            btb_hits: 0,
            mul_ops: 0,
            div_ops: 0,
            div_faults: 0,
        }
    }
}

/// Section names accepted by [`SimStats::report`].
pub const STATS_SECTIONS: &[&str] = &["summary", "hazards", "branch", "units"];

const RULE: &str = "----------------------------------------------------------";
const BANNER: &str = "==========================================================";

impl SimStats {
    /// Cycles per retired instruction; zero before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Fraction of resolved branches whose next PC was predicted correctly.
    ///
    /// Returns `1.0` when no branch has been resolved yet.
    pub fn accuracy(&self) -> f64 {
        if self.branches == 0 {
            return 1.0;
        }
        let correct = self.branches.saturating_sub(self.mispredictions);
        correct as f64 / self.branches as f64
    }

    /// Renders the selected sections; an empty selection renders all of them.
    pub fn report(&self, sections: &[&str]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| *x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;
        let mut out = String::new();

        let _ = writeln!(out, "\n{BANNER}");
        let _ = writeln!(out, "RV32IM PIPELINE SIMULATION STATISTICS");
        let _ = writeln!(out, "{BANNER}");
        if want("summary") {
            let ipc = self.instructions_retired as f64 / cyc;
            let _ = writeln!(out, "host_seconds             {:.4} s", seconds);
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_ipc                  {:.4}", ipc);
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "{RULE}");
        }
        if want("hazards") {
            let _ = writeln!(out, "HAZARDS");
            let _ = writeln!(
                out,
                "  stalls.load_use        {} ({:.2}%)",
                self.stalls_load_use,
                pct(self.stalls_load_use)
            );
            let _ = writeln!(
                out,
                "  stalls.unit            {} ({:.2}%)",
                self.stalls_unit,
                pct(self.stalls_unit)
            );
            let _ = writeln!(out, "  flushed                {}", self.flushed);
            let _ = writeln!(out, "{RULE}");
        }
        if want("branch") {
            let _ = writeln!(out, "BRANCH PREDICTION");
            let _ = writeln!(out, "  bp.resolved            {}", self.branches);
            let _ = writeln!(out, "  bp.mispredicts         {}", self.mispredictions);
            let _ = writeln!(out, "  bp.accuracy            {:.2}%", self.accuracy() * 100.0);
            let _ = writeln!(out, "  btb.hits               {}", self.btb_hits);
            let _ = writeln!(out, "{RULE}");
        }
        if want("units") {
            let _ = writeln!(out, "FUNCTIONAL UNITS");
            let _ = writeln!(out, "  mul.ops                {}", self.mul_ops);
            let _ = writeln!(out, "  div.ops                {}", self.div_ops);
            let _ = writeln!(out, "  div.faults             {}", self.div_faults);
        }
        let _ = writeln!(out, "{BANNER}");
        out
    }

    /// Prints the selected sections to stdout.
    pub fn print_sections(&self, sections: &[&str]) {
        print!("{}", self.report(sections));
    }

    /// Prints all sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
