use clap::{ArgAction, Args as ClapArgs, Parser};
use menugen_core::domain::common::{
    DEFAULT_EXTRACTION_MODEL, DEFAULT_HELICONE_BASE_URL, DEFAULT_IMAGE_MODEL,
    DEFAULT_TOGETHER_BASE_URL, DEFAULT_VISION_MODEL, ImageSettings, LLMConfig, MenugenConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "menugen-api", version, about = "Turns menu photos into illustrated menus")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub image: ImageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix applied to every route, e.g. `/menugen`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Wall-clock budget for a whole request.
    #[arg(long = "max-duration-secs", env = "MAX_DURATION_SECS", default_value_t = 60)]
    pub max_duration_secs: u64,

    #[arg(
        long = "metrics-enabled",
        env = "METRICS_ENABLED",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "together-api-key", env = "TOGETHER_API_KEY", hide_env_values = true)]
    pub together_api_key: String,

    /// Routes provider traffic through Helicone when set.
    #[arg(long = "helicone-api-key", env = "HELICONE_API_KEY", hide_env_values = true)]
    pub helicone_api_key: Option<String>,

    #[arg(long = "together-base-url", env = "TOGETHER_BASE_URL", default_value = DEFAULT_TOGETHER_BASE_URL)]
    pub together_base_url: String,

    #[arg(long = "helicone-base-url", env = "HELICONE_BASE_URL", default_value = DEFAULT_HELICONE_BASE_URL)]
    pub helicone_base_url: String,

    #[arg(long = "vision-model", env = "VISION_MODEL", default_value = DEFAULT_VISION_MODEL)]
    pub vision_model: String,

    #[arg(long = "extraction-model", env = "EXTRACTION_MODEL", default_value = DEFAULT_EXTRACTION_MODEL)]
    pub extraction_model: String,

    #[arg(long = "image-model", env = "IMAGE_MODEL", default_value = DEFAULT_IMAGE_MODEL)]
    pub image_model: String,

    #[arg(long = "llm-request-timeout-secs", env = "LLM_REQUEST_TIMEOUT_SECS", default_value_t = 55)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ImageArgs {
    #[arg(long = "image-width", env = "IMAGE_WIDTH", default_value_t = 1024)]
    pub width: u32,

    #[arg(long = "image-height", env = "IMAGE_HEIGHT", default_value_t = 768)]
    pub height: u32,

    #[arg(long = "image-steps", env = "IMAGE_STEPS", default_value_t = 5)]
    pub steps: u32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false, action = ArgAction::Set)]
    pub json: bool,
}

impl From<Args> for MenugenConfig {
    fn from(args: Args) -> Self {
        let helicone_api_key = args.llm.helicone_api_key.filter(|key| !key.trim().is_empty());

        MenugenConfig {
            llm: LLMConfig {
                api_key: args.llm.together_api_key,
                observability_key: helicone_api_key,
                base_url: args.llm.together_base_url,
                observability_base_url: args.llm.helicone_base_url,
                vision_model: args.llm.vision_model,
                extraction_model: args.llm.extraction_model,
                image_model: args.llm.image_model,
                request_timeout_secs: args.llm.request_timeout_secs,
            },
            image: ImageSettings {
                width: args.image.width,
                height: args.image.height,
                steps: args.image.steps,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args =
            Args::try_parse_from(["menugen-api", "--together-api-key", "together"]).unwrap();
        assert_eq!(args.server.max_duration_secs, 60);
        assert_eq!(args.image.width, 1024);
        assert_eq!(args.image.height, 768);
        assert_eq!(args.image.steps, 5);
    }

    #[test]
    fn test_config_without_helicone() {
        let args = Args::try_parse_from([
            "menugen-api",
            "--together-api-key",
            "together",
            "--helicone-api-key",
            " ",
        ])
        .unwrap();
        let config = MenugenConfig::from(args);
        assert_eq!(config.llm.api_key, "together");
        assert!(config.llm.observability_key.is_none());
    }

    #[test]
    fn test_config_with_helicone() {
        let args = Args::try_parse_from([
            "menugen-api",
            "--together-api-key",
            "together",
            "--helicone-api-key",
            "helicone",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();
        assert_eq!(args.server.allowed_origins, vec!["http://a.test", "http://b.test"]);

        let config = MenugenConfig::from(args);
        assert_eq!(config.llm.observability_key.as_deref(), Some("helicone"));
        assert_eq!(config.llm.effective_base_url(), DEFAULT_HELICONE_BASE_URL);
    }
}
