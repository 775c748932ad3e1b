//! インターフェース層
//!
//! 外部に公開するHTTP APIを提供

pub mod web;
