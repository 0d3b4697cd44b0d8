pub mod intrusive_list;
pub mod shard;
pub mod slot_arena;

pub use intrusive_list::IntrusiveList;
pub use shard::{ShardSelector, ShardStrategy, DEFAULT_SHARDS};
pub use slot_arena::{SlotArena, SlotId};
