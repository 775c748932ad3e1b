use crate::AppConfig;
use crate::interfaces::web::server::create_server;

pub struct RunApplicationUseCase {
    config: AppConfig,
}

impl RunApplicationUseCase {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn execute(self) -> anyhow::Result<()> {
        // Delegate to the web server module
        create_server(self.config).await
    }
}
