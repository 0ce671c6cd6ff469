/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http (request id / trace / limit / timeout), cors, security headers, auth
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
