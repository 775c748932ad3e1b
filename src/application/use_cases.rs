pub mod generate_png_batch;
pub mod generate_workbook;
pub mod render_svg;
pub mod run_application;

pub use generate_png_batch::{GeneratePngBatchUseCase, PreparedArchive};
pub use generate_workbook::GenerateWorkbookUseCase;
pub use render_svg::RenderSvgUseCase;
pub use run_application::RunApplicationUseCase;
