//! QRコードバッチ集約
//!
//! 識別子の生成、成果物（PNG・SVG・Excel行）、アーカイブに関するモジュール

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use value_objects::*;
