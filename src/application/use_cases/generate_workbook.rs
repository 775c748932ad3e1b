use crate::domain::batch::{BatchError, Workbook, WorkbookEncoder};
use std::sync::Arc;
use tracing::info;

/// 一意なコードを並べたExcelワークブックを生成する
pub struct GenerateWorkbookUseCase {
    encoder: Arc<dyn WorkbookEncoder>,
    row_count: usize,
}

impl GenerateWorkbookUseCase {
    pub fn new(encoder: Arc<dyn WorkbookEncoder>, row_count: usize) -> Self {
        Self { encoder, row_count }
    }

    pub fn execute(&self) -> Result<Vec<u8>, BatchError> {
        let workbook = Workbook::generate(self.row_count);
        let bytes = self.encoder.encode(&workbook)?;
        info!(
            rows = workbook.row_count(),
            bytes = bytes.len(),
            "Workbook generated"
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::spreadsheet::XlsxWorkbookEncoder;
    use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
    use std::collections::HashSet;
    use std::io::Cursor;

    struct BrokenEncoder;

    impl WorkbookEncoder for BrokenEncoder {
        fn encode(&self, _workbook: &Workbook) -> Result<Vec<u8>, BatchError> {
            Err(BatchError::Workbook("encoder unavailable".to_string()))
        }
    }

    #[test]
    fn test_default_sized_workbook() {
        let use_case = GenerateWorkbookUseCase::new(Arc::new(XlsxWorkbookEncoder::new()), 5000);
        let bytes = use_case.execute().unwrap();

        let mut reader: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let range = reader.worksheet_range("Sheet1").unwrap();
        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Codes".to_string()))
        );
        assert_eq!(range.height(), 5001);

        let codes: HashSet<String> = range
            .rows()
            .skip(1)
            .filter_map(|row| match &row[0] {
                Data::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(codes.len(), 5000);
    }

    #[test]
    fn test_encoder_failure_propagates() {
        let use_case = GenerateWorkbookUseCase::new(Arc::new(BrokenEncoder), 10);
        assert!(matches!(use_case.execute(), Err(BatchError::Workbook(_))));
    }
}
