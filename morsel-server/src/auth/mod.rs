//! 认证模块
//!
//! - [`JwtService`] - JWT 令牌签发与验证
//! - [`require_auth`] - 认证中间件
//! - [`CurrentUser`] - 请求上下文中的当前用户

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
