// ==========================================
// 列车入段排位系统 - 命令行入口
// ==========================================
// 用法:
//   train-induction [config.json]
//
// 读取配置 → 加载五表 → 求解 → 以 JSON 输出入段方案 (stdout)
// ==========================================

use anyhow::{bail, Context};
use std::path::PathBuf;
use train_induction::config::ConfigManager;
use train_induction::domain::FleetSnapshot;
use train_induction::engine::InductionPlanner;
use train_induction::importer::TableLoader;
use train_induction::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 系统版本: {}", train_induction::APP_NAME, train_induction::VERSION);
    tracing::info!("==================================================");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ConfigManager::load(config_path.as_deref()).context("配置加载失败")?;
    tracing::info!(data_dir = %config.data_dir.display(), "使用数据目录");

    let tables = TableLoader::new(&config.data_dir)
        .load_all()
        .with_context(|| format!("源表加载失败: {}", config.data_dir.display()))?;

    let mut snapshot = FleetSnapshot::from_tables(&tables);
    if !config.selected_trains.is_empty() {
        snapshot = snapshot.select(&config.selected_trains);
        if snapshot.is_empty() {
            bail!("配置中选定的列车均不存在: {:?}", config.selected_trains);
        }
    }

    let plan = InductionPlanner::plan(&snapshot, config.weights).context("入段排位失败")?;

    let output = serde_json::json!({
        "generated_at": chrono::Local::now().to_rfc3339(),
        "weights": config.weights,
        "plan": plan,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
