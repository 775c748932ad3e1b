//! アプリケーション層
//!
//! ドメインのポートを組み合わせてユースケースを実装する層

pub mod use_cases;
