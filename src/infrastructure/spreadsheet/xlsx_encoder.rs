use crate::domain::batch::{BatchError, Workbook, WorkbookEncoder};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook as XlsxWorkbook, XlsxError};
use tracing::{debug, error};

const SHEET_NAME: &str = "Sheet1";
const HEADER_FONT_SIZE: u8 = 13;

/// `rust_xlsxwriter` を使ったXLSXエンコーダ
///
/// 1列目の先頭に太字・黄色背景の見出しを置き、2行目以降にコードを1行ずつ書き込む。
pub struct XlsxWorkbookEncoder;

impl Default for XlsxWorkbookEncoder {
    fn default() -> Self {
        Self
    }
}

impl XlsxWorkbookEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(workbook: &Workbook) -> Result<Vec<u8>, XlsxError> {
        let mut xlsx = XlsxWorkbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_font_size(HEADER_FONT_SIZE)
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(0xFFFF00));

        let sheet = xlsx.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        sheet.write_string_with_format(0, 0, workbook.header.as_str(), &header_format)?;

        for (index, code) in workbook.rows.iter().enumerate() {
            // Row 0 holds the header.
            let row = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            sheet.write_string(row, 0, code.to_string())?;
        }

        xlsx.save_to_buffer()
    }
}

impl WorkbookEncoder for XlsxWorkbookEncoder {
    fn encode(&self, workbook: &Workbook) -> Result<Vec<u8>, BatchError> {
        let bytes = Self::build(workbook).map_err(|e| {
            error!("Failed to build workbook: {}", e);
            BatchError::Workbook(e.to_string())
        })?;

        debug!(
            rows = workbook.row_count(),
            bytes = bytes.len(),
            "Workbook encoded"
        );
        Ok(bytes)
    }
}
