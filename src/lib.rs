//! Dejapaw 管理CLI
//!
//! 拡張機能のオプションページ相当の操作（項目・Webhook・保存済みレコード）を
//! ストレージと同じ形のJSONファイルに対して行う。

pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod records;
