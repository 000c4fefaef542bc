use std::num::NonZeroUsize;
use std::thread;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// 取得邏輯 CPU 數量（至少為 1）
#[must_use]
pub fn logical_cpu_count() -> usize {
    let system =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));
    let count = system.cpus().len();

    if count > 0 {
        count
    } else {
        thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }
}
