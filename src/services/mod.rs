/*
 * Responsibility
 * - handler から呼ばれる domain / infra service 群
 */
pub mod auth;
pub mod blog_stats;
pub mod id_codec;
pub mod password;
