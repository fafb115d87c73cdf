//! speak-relay - 文本转语音 HTTP 服务
//!
//! 启动顺序：加载配置 -> 初始化日志 -> 构建合成客户端 -> 启动 HTTP 服务

use speak_relay::config::{load_config, print_config, LogConfig};
use speak_relay::infrastructure::http::{AppState, HttpServer};
use speak_relay::infrastructure::init_synthesizer;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},speak_relay={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 可选
    dotenvy::dotenv().ok();

    // 加载配置（优先级：传统环境变量 > SPEAK_ 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("speak-relay - Google TTS backend");
    print_config(&config);

    // 凭证失败不阻止启动，/api/speak 会返回 500
    let synthesizer = init_synthesizer(&config.tts).await;
    if synthesizer.is_none() {
        tracing::warn!("TTS Client unavailable; /api/speak will respond with 500");
    }

    let state = AppState::new(synthesizer, config.tts.wavenet_enabled());
    let server = HttpServer::new(config.server.clone(), state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
