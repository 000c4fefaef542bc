//! 片段擷取工作排程
//!
//! 固定數量的工作執行緒共用一個容量為 0 的同步通道：
//! 送出工作時會阻塞直到有閒置的執行緒接手。全部送出後關閉通道，
//! 閒置執行緒隨即結束，忙碌中的執行緒完成手上的工作後結束。
//! 任何一個片段失敗時停止派送，等待執行中的工作結束後回傳第一個錯誤。

use super::manifest_parser::Clip;
use anyhow::{Result, anyhow};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// 單一擷取工作：片段、已決定的輸出路徑與共用的輸入檔路徑
#[derive(Debug, Clone)]
pub struct ClipJob {
    pub input_path: Arc<Path>,
    pub clip: Clip,
    pub output_path: PathBuf,
}

/// 執行單一擷取工作
pub trait ClipExtractor: Sync {
    fn extract(&self, job: &ClipJob) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub submitted: usize,
    pub completed: usize,
}

#[derive(Default)]
struct DispatchState {
    failed: AtomicBool,
    first_error: Mutex<Option<anyhow::Error>>,
    completed: AtomicUsize,
}

impl DispatchState {
    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn record_failure(&self, err: anyhow::Error) {
        self.failed.store(true, Ordering::SeqCst);
        let mut slot = self
            .first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err);
        }
    }
}

pub struct TaskScheduler {
    worker_count: usize,
}

impl TaskScheduler {
    #[must_use]
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
        }
    }

    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// 依序派送所有工作，所有執行緒結束後才回傳
    pub fn run<E, I>(&self, jobs: I, extractor: &E) -> Result<DispatchSummary>
    where
        E: ClipExtractor,
        I: IntoIterator<Item = ClipJob>,
    {
        info!("啟動 {} 個工作執行緒", self.worker_count());

        let (sender, receiver) = mpsc::sync_channel::<ClipJob>(0);
        let receiver = Arc::new(Mutex::new(receiver));
        let state = DispatchState::default();

        let submitted = thread::scope(|scope| {
            for worker_id in 0..self.worker_count() {
                let receiver = Arc::clone(&receiver);
                let state = &state;
                scope.spawn(move || worker_loop(worker_id, &receiver, extractor, state));
            }
            // 最後一個執行緒結束時通道的接收端隨之關閉，送出端便不會永久阻塞
            drop(receiver);

            let mut submitted = 0;
            for job in jobs {
                if state.has_failed() {
                    break;
                }
                debug!("派送片段: {}", job.output_path.display());
                if sender.send(job).is_err() {
                    break;
                }
                submitted += 1;
            }
            drop(sender);

            submitted
        });

        let completed = state.completed.load(Ordering::SeqCst);
        let first_error = state
            .first_error
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(err) = first_error {
            return Err(err);
        }
        if state.failed.into_inner() {
            return Err(anyhow!("擷取工作失敗"));
        }

        info!("所有擷取工作已完成，共 {completed} 個片段");
        Ok(DispatchSummary {
            submitted,
            completed,
        })
    }
}

fn worker_loop<E: ClipExtractor>(
    worker_id: usize,
    receiver: &Mutex<Receiver<ClipJob>>,
    extractor: &E,
    state: &DispatchState,
) {
    loop {
        if state.has_failed() {
            break;
        }

        let job = {
            let Ok(receiver) = receiver.lock() else {
                break;
            };
            receiver.recv()
        };
        let Ok(job) = job else {
            debug!("[worker {worker_id}] 沒有更多工作，結束");
            break;
        };

        if state.has_failed() {
            debug!("[worker {worker_id}] 已有片段失敗，略過 {}", job.clip.name);
            break;
        }

        info!("[worker {worker_id}] 開始擷取 {}", job.clip);
        match extractor.extract(&job) {
            Ok(()) => {
                state.completed.fetch_add(1, Ordering::SeqCst);
                info!(
                    "[worker {worker_id}] 擷取完成: {}",
                    job.output_path.display()
                );
            }
            Err(e) => {
                error!(
                    "[worker {worker_id}] 擷取失敗: {}",
                    job.output_path.display()
                );
                state.record_failure(e);
                break;
            }
        }
    }
}
