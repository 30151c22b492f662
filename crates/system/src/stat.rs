use chrono::Local;
use cpustat_core::{CounterSnapshot, CpuStatError, Result};
use procfs::{
    CpuTime, ExplicitSystemInfo, FromBufReadSI, KernelStats, LocalSystemInfo, ProcError,
    SystemInfoInterface,
};
use std::fs::File;
use std::io::{BufReader, Seek};
use std::path::{Path, PathBuf};

/// Anything that can produce machine-wide cumulative CPU time counters.
pub trait CounterSource {
    /// Read the counters once.  Errors are unrecoverable for the caller.
    fn snapshot(&mut self) -> Result<CounterSnapshot>;
}

/// Reads the aggregate `cpu` line of `/proc/stat`.
pub struct ProcStat {
    path: PathBuf,
    /// Kept open between samples and rewound before each read.
    reader: BufReader<File>,
    sysinfo: ExplicitSystemInfo,
}

fn gather_system_info() -> std::result::Result<ExplicitSystemInfo, ProcError> {
    let sysinfo = LocalSystemInfo;
    Ok(ExplicitSystemInfo {
        boot_time_secs: sysinfo.boot_time_secs()?,
        ticks_per_second: sysinfo.ticks_per_second(),
        page_size: sysinfo.page_size(),
        is_little_endian: sysinfo.is_little_endian(),
    })
}

impl ProcStat {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .map_err(|e| CpuStatError::Source(format!("cannot open '{}': {e}", path.display())))?;
        let sysinfo = gather_system_info()
            .map_err(|e| CpuStatError::Source(format!("cannot gather system info: {e}")))?;

        tracing::debug!("Reading CPU counters from {}", path.display());

        Ok(Self {
            path,
            reader: BufReader::new(file),
            sysinfo,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CounterSource for ProcStat {
    fn snapshot(&mut self) -> Result<CounterSnapshot> {
        self.reader.rewind()?;
        let stats = KernelStats::from_buf_read(&mut self.reader, &self.sysinfo).map_err(|e| {
            CpuStatError::Source(format!("cannot parse '{}': {e}", self.path.display()))
        })?;
        Ok(to_snapshot(&stats.total))
    }
}

/// Convert the kernel's tick counters; fields missing on old kernels read as 0.
fn to_snapshot(time: &CpuTime) -> CounterSnapshot {
    let opt = |v: Option<u64>| v.unwrap_or(0) as f64;
    CounterSnapshot {
        user:     time.user as f64,
        nice:     time.nice as f64,
        system:   time.system as f64,
        idle:     time.idle as f64,
        iowait:   opt(time.iowait),
        irq:      opt(time.irq),
        softirq:  opt(time.softirq),
        steal:    opt(time.steal),
        taken_at: Local::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn stat_file(cpu_line: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{cpu_line}").unwrap();
        writeln!(file, "cpu0 {}", cpu_line.trim_start_matches("cpu").trim()).unwrap();
        writeln!(file, "intr 0").unwrap();
        writeln!(file, "ctxt 1000").unwrap();
        writeln!(file, "btime 1700000000").unwrap();
        writeln!(file, "processes 42").unwrap();
        writeln!(file, "procs_running 1").unwrap();
        writeln!(file, "procs_blocked 0").unwrap();
        file
    }

    #[test]
    fn reads_aggregate_line() {
        let file = stat_file("cpu  110 1 60 830 4 2 3 5 0 0");
        let mut source = ProcStat::open(file.path()).unwrap();
        let snap = source.snapshot().unwrap();

        assert_eq!(snap.user, 110.0);
        assert_eq!(snap.nice, 1.0);
        assert_eq!(snap.system, 60.0);
        assert_eq!(snap.idle, 830.0);
        assert_eq!(snap.iowait, 4.0);
        assert_eq!(snap.irq, 2.0);
        assert_eq!(snap.softirq, 3.0);
        assert_eq!(snap.steal, 5.0);
    }

    #[test]
    fn rereads_after_rewind() {
        let file = stat_file("cpu  1 2 3 4 5 6 7 8 0 0");
        let mut source = ProcStat::open(file.path()).unwrap();
        let first = source.snapshot().unwrap();
        let second = source.snapshot().unwrap();
        assert_eq!(first.total(), second.total());
    }

    #[test]
    fn missing_file_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcStat::open(dir.path().join("stat")).err().unwrap();
        assert!(matches!(err, CpuStatError::Source(_)));
    }

    #[test]
    fn live_proc_stat_is_readable() {
        if !Path::new("/proc/stat").exists() {
            return;
        }
        let mut source = ProcStat::open("/proc/stat").unwrap();
        assert!(source.snapshot().unwrap().total() > 0.0);
    }
}
