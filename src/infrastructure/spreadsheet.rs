//! スプレッドシート出力の実装

mod xlsx_encoder;

pub use xlsx_encoder::XlsxWorkbookEncoder;
