//! Favorites Ledger - 收藏集合
//!
//! 乐观更新：内存集合立即翻转，序列化后的完整集合交给后台写入任务按顺序落盘。
//! 写入失败只记录日志，不回滚、不重试。

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use crate::application::ports::{KeyValueStorePort, FAVORITES_KEY};
use crate::domain::voice::VoiceId;
use crate::domain::FavoritesSet;

enum PersistCommand {
    Write(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// 收藏集合的唯一持有者
pub struct FavoritesLedger {
    state: watch::Sender<FavoritesSet>,
    writer: mpsc::UnboundedSender<PersistCommand>,
}

impl FavoritesLedger {
    /// 从存储恢复收藏集合；读取失败或内容损坏时从空集合开始
    pub async fn load(store: Arc<dyn KeyValueStorePort>) -> Self {
        let initial = match store.get(FAVORITES_KEY).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<FavoritesSet>(&bytes) {
                Ok(set) => {
                    tracing::info!(count = set.len(), "Favorites restored");
                    set
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt favorites payload, starting empty");
                    FavoritesSet::new()
                }
            },
            Ok(None) => FavoritesSet::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read favorites, starting empty");
                FavoritesSet::new()
            }
        };

        Self::with_initial(store, initial)
    }

    /// 使用给定初始集合创建，并启动后台写入任务
    pub fn with_initial(store: Arc<dyn KeyValueStorePort>, initial: FavoritesSet) -> Self {
        let (state, _) = watch::channel(initial);
        let (writer, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store, rx));
        Self { state, writer }
    }

    /// 当前集合快照
    pub fn current(&self) -> FavoritesSet {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FavoritesSet> {
        self.state.subscribe()
    }

    /// 翻转收藏状态，返回新集合
    ///
    /// 翻转与入队在同一临界区内完成，保证写入顺序与翻转顺序一致
    pub fn toggle(&self, voice_id: &VoiceId) -> FavoritesSet {
        let mut updated = FavoritesSet::new();

        self.state.send_modify(|set| {
            *set = set.toggled(voice_id);
            updated = set.clone();

            match serde_json::to_vec(set) {
                Ok(bytes) => {
                    if self.writer.send(PersistCommand::Write(bytes)).is_err() {
                        tracing::warn!(voice_id = %voice_id, "Favorites writer stopped, change kept in memory only");
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to serialize favorites");
                }
            }
        });

        tracing::debug!(
            voice_id = %voice_id,
            is_favorite = updated.contains(voice_id),
            count = updated.len(),
            "Favorite toggled"
        );
        updated
    }

    /// 等待此前入队的所有写入完成（无论成功与否）
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.writer.send(PersistCommand::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}

async fn run_writer(
    store: Arc<dyn KeyValueStorePort>,
    mut rx: mpsc::UnboundedReceiver<PersistCommand>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            PersistCommand::Write(bytes) => {
                if let Err(e) = store.set(FAVORITES_KEY, bytes).await {
                    tracing::warn!(error = %e, "Failed to persist favorites");
                }
            }
            PersistCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("Favorites writer stopped");
}
