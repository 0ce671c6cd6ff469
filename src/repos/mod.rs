/*
 * Responsibility
 * - 永続化の抽象 (PostRepo / UserRepo) と実装 (Postgres / in-memory) の公開
 * - handler からは trait object だけを見る
 */
pub mod error;
pub mod memory;
pub mod pg;
pub mod post_repo;
pub mod user_repo;

pub use memory::MemoryStore;
pub use pg::PgStore;
pub use post_repo::{BlogPost, NewPost, PostChanges, PostRepo};
pub use user_repo::{NewUser, User, UserRepo};
