// 命令行入口：从 stdin 读取 `CliInput` JSON，输出解析后的 `ResolvedPrompt` JSON。
// 不包含编码器，仅用于验证翻译与回退链路。

use std::io::Read;
use std::sync::Arc;

use polyglot_prompt_lib::translation::HttpTransport;
use polyglot_prompt_lib::{init_logging, AppError, NodeConfig, PromptResolver};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CliInput {
    #[serde(default)]
    text: String,
    #[serde(default)]
    english_suffix: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cfg = NodeConfig::from_env_and_file()?;
    let transport = HttpTransport::new(cfg.timeout())?;
    let resolver = PromptResolver::new(cfg, Arc::new(transport));

    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    let input: CliInput = serde_json::from_str(&buf)
        .map_err(|e| AppError::validation(format!("Invalid input JSON: {}", e)))?;

    let resolved = resolver.resolve(&input.text, &input.english_suffix).await;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
