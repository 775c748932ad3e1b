//! リクエスト単位の作業ディレクトリ

mod batch_workspace;

pub use batch_workspace::{BatchWorkspace, remove_glob};
