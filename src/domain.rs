//! ドメイン層
//!
//! ビジネスロジックとドメインモデルを含む層

pub mod batch;
