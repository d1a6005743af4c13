use anyhow::{Context, Result};
use clap::Parser;
use server::app::ApplicationServer;
use std::sync::Arc;
use tracing::info;
use utils::{AppConfig, EnvLoader, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    let vn30 = Vn30Quantum::new();

    // guard 必须存活到进程结束，否则文件日志会丢失
    let _log_guard = Logger::new(&vn30.config);

    vn30.run().await
}

pub struct Vn30Quantum {
    config: Arc<AppConfig>,
}

impl Vn30Quantum {
    pub fn new() -> Self {
        Self {
            config: Self::with_config(),
        }
    }

    pub async fn run(self) -> Result<()> {
        info!(
            "🔧 Starting vn30quantum ({:?}) on {}:{}",
            self.config.cargo_env, self.config.app_host, self.config.app_port
        );

        ApplicationServer::serve(self.config.clone())
            .await
            .context("🔴 Failed to start server")
    }

    fn with_config() -> Arc<AppConfig> {
        // 根据 CARGO_ENV 加载对应的环境配置文件，日志此时尚未初始化
        if let Err(e) = EnvLoader::load_env_file() {
            eprintln!("⚠️  环境配置文件加载失败: {}", e);
        }

        Arc::new(AppConfig::parse())
    }
}
