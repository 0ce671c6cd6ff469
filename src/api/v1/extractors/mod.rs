/*
 * Responsibility
 * - handler が受け取る独自 extractor の公開
 */
pub mod auth_ctx;
pub mod public_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor, CredentialRejected};
pub use public_id::PublicBlogId;
