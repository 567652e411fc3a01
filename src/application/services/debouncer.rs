//! Debouncer - 输入合并
//!
//! 输入稳定 `quiet` 时长后才触发回调；新输入重置计时，`cancel` 丢弃待触发的输入。
//! 与任何渲染循环无关，由独立的 tokio 任务驱动。

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

enum DebounceMsg<T> {
    Input(T),
    Cancel,
}

/// 防抖触发器
///
/// 丢弃后后台任务随之退出，未触发的输入被丢弃
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<DebounceMsg<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn<F, Fut>(quiet: Duration, on_fire: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(quiet, rx, on_fire));
        Self { tx }
    }

    /// 提交新输入，重置计时
    pub fn push(&self, value: T) {
        if self.tx.send(DebounceMsg::Input(value)).is_err() {
            tracing::debug!("Debouncer stopped, input dropped");
        }
    }

    /// 取消待触发的输入
    pub fn cancel(&self) {
        let _ = self.tx.send(DebounceMsg::Cancel);
    }
}

async fn run<T, F, Fut>(
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<DebounceMsg<T>>,
    mut on_fire: F,
) where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pending: Option<T> = None;
    let timer = tokio::time::sleep(quiet);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(DebounceMsg::Input(value)) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + quiet);
                }
                Some(DebounceMsg::Cancel) => pending = None,
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    on_fire(value).await;
                }
            }
        }
    }
}
