use meal_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment();

    // 打印横幅
    print_banner();

    tracing::info!(
        environment = %config.environment,
        "🍱 Meal Server starting..."
    );

    // 2. 初始化服务器状态 (打开数据目录，写入种子数据)
    let state = ServerState::initialize(&config)?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
