//! Morsel Server - 外卖平台后端
//!
//! # 架构概述
//!
//! 本模块是 Morsel 后端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (models / repository)
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//! - **下单** (`checkout`): 购物车 → 订单的原子转换
//!
//! # 模块结构
//!
//! ```text
//! morsel-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── auth/          # JWT 认证、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── checkout/      # 下单事务与金额计算
//! ├── db/            # 数据库层 (models / repository / schema / seed)
//! └── utils/         # 错误、日志、输入校验
//! ```

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use checkout::PlacementService;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置进程环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), AppError> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(Some(&log_level), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___                    __
   /  |/  /___  _____________ / /
  / /|_/ / __ \/ ___/ ___/ _ \/ /
 / /  / / /_/ / /  (__  )  __/ /
/_/  /_/\____/_/  /____/\___/_/
    "#
    );
}
