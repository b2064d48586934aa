//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// 判断是否公共路由 (无需登录)
///
/// - 登录 / 注册接口
/// - 餐厅和菜品的浏览类 GET 接口 (顾客未登录也能逛)
/// - 健康检查
fn is_public_route(method: &http::Method, path: &str) -> bool {
    if path == "/api/health" {
        return true;
    }

    if matches!(
        path,
        "/api/auth/login" | "/api/auth/customer/signup" | "/api/auth/restaurant/signup"
    ) {
        return true;
    }

    if method == http::Method::GET {
        // /api/restaurants, /api/restaurants/{id}, /api/restaurants/{id}/dishes
        if path == "/api/restaurants"
            || (path.starts_with("/api/restaurants/")
                && !path.starts_with("/api/restaurants/dashboard"))
        {
            // 餐厅自己的订单列表仍需要登录
            return !path.ends_with("/orders");
        }
        // /api/dishes/{id}
        if path.starts_with("/api/dishes/") {
            return true;
        }
    }

    false
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.jwt_service.clone();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        let get = http::Method::GET;
        let post = http::Method::POST;

        assert!(is_public_route(&post, "/api/auth/login"));
        assert!(is_public_route(&post, "/api/auth/customer/signup"));
        assert!(is_public_route(&get, "/api/restaurants"));
        assert!(is_public_route(&get, "/api/restaurants/restaurant:abc"));
        assert!(is_public_route(&get, "/api/restaurants/restaurant:abc/dishes"));
        assert!(is_public_route(&get, "/api/dishes/dish:abc"));
        assert!(is_public_route(&get, "/api/health"));
    }

    #[test]
    fn test_protected_routes() {
        let get = http::Method::GET;
        let post = http::Method::POST;

        assert!(!is_public_route(&post, "/api/cart"));
        assert!(!is_public_route(&get, "/api/orders/history"));
        assert!(!is_public_route(&get, "/api/restaurants/dashboard"));
        assert!(!is_public_route(&get, "/api/restaurants/restaurant:abc/orders"));
        assert!(!is_public_route(&post, "/api/dishes"));
    }
}
