//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录、登出、会话检查
//! - [`employee_orders`] - 员工自助订餐
//! - [`departments`] - 部门管理 (管理员)
//! - [`employees`] - 员工管理 (管理员)
//! - [`windows`] - 订餐窗口管理 (管理员)
//! - [`orders`] - 订单查询、代订、修改、导出 (管理员)
//! - [`statistics`] - 统计报表 (管理员)

pub mod auth;
pub mod departments;
pub mod employee_orders;
pub mod employees;
pub mod health;
pub mod orders;
pub mod statistics;
pub mod windows;
