use color_eyre::Result;
use signal_lab::config::Config;

pub async fn run(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("▶ Starting signal lab server...");
    println!("  Listening on: http://{}", config.server_addr());
    println!("  Model: {}", config.assistant.model);
    println!();

    signal_lab::server::run(config).await?;

    Ok(())
}
