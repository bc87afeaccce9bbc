//! 订单域模块
//!
//! - [`normalize`] - 结账提交归一化 (纯函数)
//! - [`manager`] - 订单生命周期管理 (创建/列表/状态迁移/删除 + 旁路扇出)

pub mod manager;
pub mod normalize;

pub use manager::OrdersManager;
pub use normalize::{CheckoutPayload, CheckoutError, NormalizedCheckout, RawCartItem, normalize as normalize_checkout};
