//! インフラストラクチャ層
//!
//! ドメイン層で定義されたトレイトの具体的な実装を提供します。
//! QRコードの描画、ZIPアーカイブ、XLSXエンコード、リクエスト単位の作業ディレクトリを含みます。

pub mod archive;
pub mod rendering;
pub mod scratch;
pub mod spreadsheet;
