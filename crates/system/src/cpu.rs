use cpustat_core::{CategoryMode, CounterSnapshot, PercentageVector};

/// Per-counter progress between two snapshots.
///
/// A counter that went backwards (reset, wrap, VM migration) contributes 0
/// rather than a negative amount, and the total is the sum of the clamped
/// deltas, so no percentage is ever negative.
#[derive(Debug, Clone, Copy, Default)]
struct Deltas {
    user:    f64,
    nice:    f64,
    system:  f64,
    idle:    f64,
    iowait:  f64,
    irq:     f64,
    softirq: f64,
    steal:   f64,
}

impl Deltas {
    fn between(prev: &CounterSnapshot, curr: &CounterSnapshot) -> Self {
        // `f64::max` also maps a NaN difference to 0.
        let d = |p: f64, c: f64| (c - p).max(0.0);
        Self {
            user:    d(prev.user, curr.user),
            nice:    d(prev.nice, curr.nice),
            system:  d(prev.system, curr.system),
            idle:    d(prev.idle, curr.idle),
            iowait:  d(prev.iowait, curr.iowait),
            irq:     d(prev.irq, curr.irq),
            softirq: d(prev.softirq, curr.softirq),
            steal:   d(prev.steal, curr.steal),
        }
    }

    fn total(&self) -> f64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }
}

fn percent(n: f64, total: f64) -> f64 {
    n * 100.0 / total
}

/// Share of elapsed CPU time per category of `mode` between `prev` and `curr`.
///
/// Returns all zeros when no time elapsed.  In [`CategoryMode::Compact`] the
/// idle bucket is the residual, so the three values always sum to 100.
/// [`CategoryMode::Detailed`] values are computed independently and are not
/// renormalized.
pub fn delta(prev: &CounterSnapshot, curr: &CounterSnapshot, mode: CategoryMode) -> PercentageVector {
    let d = Deltas::between(prev, curr);
    let total = d.total();

    if total <= 0.0 || !total.is_finite() {
        return mode.zeros();
    }

    match mode {
        CategoryMode::Compact => {
            let work = d.user + d.nice + d.system;
            let steal = d.steal;
            let idle = (total - steal - work).max(0.0);

            vec![percent(work, total), percent(steal, total), percent(idle, total)]
        }
        CategoryMode::Detailed => vec![
            percent(d.user, total),
            percent(d.nice, total),
            percent(d.system, total),
            percent(d.idle, total),
            percent(d.iowait, total),
            percent(d.irq + d.softirq, total),
            percent(d.steal, total),
        ],
    }
}
