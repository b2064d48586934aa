//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录 / 注册接口
//! - [`customers`] - 顾客档案接口
//! - [`restaurants`] - 餐厅管理接口
//! - [`dishes`] - 菜品管理接口
//! - [`addresses`] - 配送地址接口
//! - [`favorites`] - 收藏餐厅接口
//! - [`cart`] - 购物车接口
//! - [`orders`] - 订单接口

pub mod auth;
pub mod health;

pub mod customers;
pub mod restaurants;

pub mod dishes;

pub mod addresses;
pub mod cart;
pub mod favorites;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
