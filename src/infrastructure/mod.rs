//! Infrastructure Layer - 基础设施层
//!
//! 提供端口的具体实现、启动引导和 HTTP 接口

pub mod adapters;
pub mod bootstrap;
pub mod http;

pub use bootstrap::{init_synthesizer, CredentialSource};
