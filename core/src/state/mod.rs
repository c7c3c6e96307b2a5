//! # 状态管理模块
//!
//! 负责管理店面的目录状态、购物车状态以及启动时的快照恢复。
//!
//! ## 设计原则
//!
//! 1. **单写者**：所有状态变更都经过 `Store::dispatch`，在同一把写锁内按顺序执行
//! 2. **结构共享**：根状态的每个分支都是 `Arc`，动作只重建它触及的分支
//! 3. **纯函数归约**：归约器不做 I/O，持久化在归约之后由观察者完成
//! 4. **启动门控**：快照合并完成之前拿不到可分发的 `Store`
//! 5. **容错恢复**：损坏或过期的快照只会丢弃条目，不会报错

pub mod manager;
mod observer;
pub mod reducer;
pub mod snapshot;
pub mod transitions;
pub mod types;

pub use manager::{PendingStore, Store, StoreOptions};
pub use reducer::{reduce, rehydrate, RehydrateReport};
pub use snapshot::{encode_snapshot, PersistedState, SNAPSHOT_VERSION};
pub use transitions::{StateTransition, StorePhase, TransitionError};
pub use types::{RootState, StateEvent, SubState};
