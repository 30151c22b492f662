use chrono::{DateTime, Local};

/// Percentages for the active categories, in [`CategoryMode::categories`] order.
pub type PercentageVector = Vec<f64>;

/// A point-in-time reading of the machine-wide cumulative CPU time counters.
///
/// Values are in clock ticks since boot.  Counters the kernel does not
/// report (older kernels lack `steal`, `iowait`, …) read as `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSnapshot {
    pub user:    f64,
    pub nice:    f64,
    pub system:  f64,
    pub idle:    f64,
    pub iowait:  f64,
    pub irq:     f64,
    pub softirq: f64,
    pub steal:   f64,
    /// Wall-clock time the counters were read.
    pub taken_at: DateTime<Local>,
}

impl Default for CounterSnapshot {
    fn default() -> Self {
        Self {
            user:     0.0,
            nice:     0.0,
            system:   0.0,
            idle:     0.0,
            iowait:   0.0,
            irq:      0.0,
            softirq:  0.0,
            steal:    0.0,
            taken_at: Local::now(),
        }
    }
}

impl CounterSnapshot {
    /// Sum of every counter.
    #[must_use]
    pub fn total(&self) -> f64 {
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

/// One bucket of CPU time attribution as shown on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    User,
    Nice,
    System,
    Idle,
    Iowait,
    /// `irq` and `softirq` combined.
    Irq,
    Steal,
}

impl Category {
    /// Legend label shown in the chart title.
    pub fn label(self) -> &'static str {
        match self {
            Category::Work   => "Work",
            Category::User   => "User",
            Category::Nice   => "Nice",
            Category::System => "System",
            Category::Idle   => "Idle",
            Category::Iowait => "IOwait",
            Category::Irq    => "IRQ",
            Category::Steal  => "Steal",
        }
    }

    /// Key used for this category in the `[theme.colors]` config table.
    pub fn key(self) -> &'static str {
        match self {
            Category::Work   => "work",
            Category::User   => "user",
            Category::Nice   => "nice",
            Category::System => "system",
            Category::Idle   => "idle",
            Category::Iowait => "iowait",
            Category::Irq    => "irq",
            Category::Steal  => "steal",
        }
    }

    /// Named terminal color used when the config doesn't override it.
    pub fn default_color(self) -> &'static str {
        match self {
            Category::Work | Category::User => "green",
            Category::Nice                  => "cyan",
            Category::System                => "yellow",
            Category::Idle                  => "blue",
            Category::Iowait                => "white",
            Category::Irq                   => "magenta",
            Category::Steal                 => "red",
        }
    }
}

/// Which set of categories the chart breaks CPU time into.
///
/// Chosen once at startup and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryMode {
    /// Work (user + nice + system), Steal, Idle (everything else).
    #[default]
    Compact,
    /// User, Nice, System, Idle, IOwait, IRQ (irq + softirq), Steal.
    Detailed,
}

const COMPACT: [Category; 3] = [Category::Work, Category::Steal, Category::Idle];

const DETAILED: [Category; 7] = [
    Category::User,
    Category::Nice,
    Category::System,
    Category::Idle,
    Category::Iowait,
    Category::Irq,
    Category::Steal,
];

impl CategoryMode {
    pub fn from_detailed(detailed: bool) -> Self {
        if detailed {
            CategoryMode::Detailed
        } else {
            CategoryMode::Compact
        }
    }

    /// Categories in stacking order (bottom of the bar first).
    pub fn categories(self) -> &'static [Category] {
        match self {
            CategoryMode::Compact  => &COMPACT,
            CategoryMode::Detailed => &DETAILED,
        }
    }

    /// Length of every [`PercentageVector`] produced in this mode.
    pub fn len(self) -> usize {
        self.categories().len()
    }

    /// An all-zero vector of the right length for this mode.
    pub fn zeros(self) -> PercentageVector {
        vec![0.0; self.len()]
    }
}
