// ==========================================
// 智慧朝觐运维平台 - 命令行入口
// ==========================================
// 用法:
//   maintenance-engine <command> <input|-> [config.json] [key=value ...]
//
// command: health | priority | cost | duration | schedule | assess | plan | import-readings
// input:   JSON 请求文件 (import-readings 为 CSV/XLSX 读数文件), `-` 表示从 stdin 读取
// 输出:    stdout 打印统一响应信封 (JSON),日志写入 stderr
// ==========================================

use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use smart_hajj_maintenance::api::dto::{
    AssessRequest, CostRequest, DurationRequest, HealthRequest, PlanWorkOrderRequest,
    PriorityRequest, ScheduleRequest,
};
use smart_hajj_maintenance::api::{ApiResult, MaintenanceApi, MaintenanceResponse};
use smart_hajj_maintenance::config::ConfigManager;
use smart_hajj_maintenance::logging;

const USAGE: &str = "usage: maintenance-engine <health|priority|cost|duration|schedule|assess|plan|import-readings> <input|-> [config.json] [key=value ...]";

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{}", USAGE);
            ExitCode::from(2)
        }
    }
}

/// 返回业务是否成功; 参数/配置/IO 问题返回 Err
fn run() -> anyhow::Result<bool> {
    let mut args = std::env::args().skip(1);
    let command = args.next().context("缺少 command 参数")?;
    let input = args.next().context("缺少 input 参数")?;

    let mut manager = ConfigManager::new();
    let mut overrides = Vec::new();
    for arg in args {
        if arg.contains('=') {
            overrides.push(arg);
        } else {
            manager = ConfigManager::from_file(&arg)
                .with_context(|| format!("加载配置失败: {}", arg))?;
        }
    }
    manager
        .apply_overrides(overrides.iter().map(String::as_str))
        .context("配置覆写失败")?;

    let api = MaintenanceApi::from_manager(&manager).context("引擎初始化失败")?;

    tracing::info!("==================================================");
    tracing::info!("{} - 设施维护决策引擎", smart_hajj_maintenance::APP_NAME);
    tracing::info!("系统版本: {}", smart_hajj_maintenance::VERSION);
    tracing::info!(command = %command, input = %input, "执行命令");
    tracing::info!("==================================================");

    match command.as_str() {
        "health" => {
            let result = parse::<HealthRequest>(&input)?.and_then(|r| api.compute_asset_health(&r));
            respond(result)
        }
        "priority" => {
            let result = parse::<PriorityRequest>(&input)?.and_then(|r| api.classify_priority(&r));
            respond(result)
        }
        "cost" => {
            let result = parse::<CostRequest>(&input)?.and_then(|r| api.estimate_cost(&r));
            respond(result)
        }
        "duration" => {
            let result = parse::<DurationRequest>(&input)?.and_then(|r| api.estimate_duration(&r));
            respond(result)
        }
        "schedule" => {
            let result = parse::<ScheduleRequest>(&input)?.and_then(|r| api.schedule_work_orders(r));
            respond(result)
        }
        "assess" => {
            let result = parse::<AssessRequest>(&input)?.and_then(|r| api.assess_asset(&r));
            respond(result)
        }
        "plan" => {
            let result =
                parse::<PlanWorkOrderRequest>(&input)?.and_then(|r| api.plan_work_order(&r));
            respond(result)
        }
        "import-readings" => {
            if input == "-" {
                bail!("import-readings 需要文件路径");
            }
            respond(api.import_readings(&input))
        }
        other => bail!("未知命令: {}", other),
    }
}

/// 读取输入并反序列化请求
///
/// IO 失败为命令行错误;请求体非法为业务错误 (进入响应信封)
fn parse<T: DeserializeOwned>(input: &str) -> anyhow::Result<ApiResult<T>> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("读取 stdin 失败")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("读取请求文件失败: {}", input))?
    };

    Ok(serde_json::from_str(&raw).map_err(Into::into))
}

fn respond<T: Serialize>(result: ApiResult<T>) -> anyhow::Result<bool> {
    let response = MaintenanceResponse::from(result);
    let success = response.success;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(success)
}
