use clap::Parser;

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[clap(rename_all = "lowercase")]
pub enum CargoEnv {
    Development,
    Production,
}

/// 环境配置加载器
pub struct EnvLoader;

impl EnvLoader {
    /// 根据 CARGO_ENV 加载对应的环境配置文件
    ///
    /// 此时日志尚未初始化，所以这里只能用 println!
    pub fn load_env_file() -> Result<(), Box<dyn std::error::Error>> {
        let cargo_env = std::env::var("CARGO_ENV").unwrap_or_else(|_| "development".to_string());

        let env_file = Self::env_file_for(&cargo_env);

        if !std::path::Path::new(env_file).exists() {
            eprintln!("⚠️  配置文件 {} 不存在，尝试加载默认的 .env 文件", env_file);
            if std::path::Path::new(".env").exists() {
                dotenvy::from_filename(".env")?;
                println!("✅ 已加载默认配置文件: .env");
            } else {
                eprintln!("❌ 未找到任何配置文件，使用默认配置");
            }
            return Ok(());
        }

        dotenvy::from_filename(env_file)?;
        println!("✅ 已加载环境配置文件: {} (CARGO_ENV={})", env_file, cargo_env);

        Ok(())
    }

    fn env_file_for(cargo_env: &str) -> &'static str {
        match cargo_env {
            "production" | "Production" | "prod" => ".env.production",
            "development" | "Development" | "dev" => ".env.development",
            "test" | "Test" => ".env.test",
            _ => {
                println!("⚠️  未知的 CARGO_ENV: {}，使用默认的 .env.development", cargo_env);
                ".env.development"
            }
        }
    }
}

#[derive(clap::Parser, Clone, Debug)]
pub struct AppConfig {
    #[clap(long, env, value_enum, default_value = "development")]
    pub cargo_env: CargoEnv,

    #[clap(long, env, default_value = "0.0.0.0")]
    pub app_host: String,

    #[clap(long, env, default_value = "8000")]
    pub app_port: u16,

    #[clap(long, env, default_value = "info")]
    pub rust_log: String,

    /// 管理员密钥，未配置时所有管理接口一律拒绝
    #[clap(long, env)]
    pub admin_secret: Option<String>,

    /// 内测名额上限
    #[clap(long, env, default_value = "100")]
    pub max_beta_users: usize,

    /// 对外站点地址，用于拼接推广链接
    #[clap(long, env, default_value = "https://vn30quantum.com")]
    pub public_url: String,

    /// 支付回调签名密钥，未配置时回调以开发模式应答
    #[clap(long, env)]
    pub stripe_webhook_secret: Option<String>,

    #[clap(long, env, default_value = "30")]
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        EnvLoader::load_env_file().ok();
        AppConfig::parse()
    }
}

impl AppConfig {
    /// 手动创建配置实例（用于测试）
    pub fn new_for_test() -> Self {
        Self {
            cargo_env: CargoEnv::Development,
            app_host: "127.0.0.1".to_string(),
            app_port: 8765,
            rust_log: "info".to_string(),
            admin_secret: Some("test_admin_secret".to_string()),
            max_beta_users: 100,
            public_url: "https://vn30quantum.com".to_string(),
            stripe_webhook_secret: None,
            http_timeout_secs: 30,
        }
    }

    pub fn is_production(&self) -> bool {
        self.cargo_env == CargoEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_file_mapping() {
        assert_eq!(EnvLoader::env_file_for("prod"), ".env.production");
        assert_eq!(EnvLoader::env_file_for("Development"), ".env.development");
        assert_eq!(EnvLoader::env_file_for("test"), ".env.test");
        assert_eq!(EnvLoader::env_file_for("staging"), ".env.development");
    }

    #[test]
    fn test_parse_from_args() {
        let config = AppConfig::try_parse_from([
            "vn30quantum",
            "--cargo-env",
            "production",
            "--app-port",
            "9000",
            "--admin-secret",
            "s3cret",
            "--max-beta-users",
            "5",
        ])
        .expect("参数应当可以解析");

        assert!(config.is_production());
        assert_eq!(config.app_port, 9000);
        assert_eq!(config.admin_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.max_beta_users, 5);
    }
}
