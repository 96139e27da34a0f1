//! 按键串行化的异步互斥锁
//!
//! 同一键上的写操作在进程内排队执行，不同键互不影响。
//! 数据库层仍以事务保证原子性，这里只减少同一主体上的写冲突。

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

pub struct KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    locks: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Clone for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
        }
    }

    /// 获取键对应的锁，返回的守卫释放时自动清理空闲条目
    pub async fn lock(&self, key: K) -> KeyedGuard<K> {
        let mutex = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;

        KeyedGuard {
            key,
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// 当前登记的键数量
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

pub struct KeyedGuard<K>
where
    K: Eq + Hash + Clone,
{
    key: K,
    locks: Arc<DashMap<K, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K> Drop for KeyedGuard<K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        // 先释放互斥锁，守卫内部持有的 Arc 随之释放
        self.guard.take();
        // 只剩表内引用时说明无人等待，可以移除
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
