//! navgate 命令行：加载注册表与种子数据，回答可用性/授权/菜单查询。
//!
//! 输出统一为 `ApiResponse` 包装的 JSON；注册表或种子加载失败时以非零状态退出。

mod utils;

use api_contract::{ApiResponse, EligibilityDto, ModuleKeysDto};
use clap::{Parser, Subcommand};
use navgate_access::AccessService;
use navgate_config::AppConfig;
use navgate_registry::{RegistryHandle, load_from_path};
use navgate_storage::{InMemoryRoleGrantStore, InMemoryTenantStore, SeedDocument};
use navgate_telemetry::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use utils::response::{
    access_error, decision_to_dto, explain_to_dto, menu_to_dto, registry_summary, render,
    unknown_module_error,
};

#[derive(Debug, Parser)]
#[command(name = "navgate", version, about = "Tenant module access resolution")]
struct Cli {
    /// 注册表 JSON（覆盖 NAVGATE_REGISTRY_PATH）
    #[arg(long, global = true)]
    registry: Option<PathBuf>,
    /// 种子数据 JSON（覆盖 NAVGATE_SEED_PATH）
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 校验注册表并输出概要
    Validate,
    /// 租户可用模块
    Eligible {
        #[arg(long)]
        tenant: String,
    },
    /// 判定单个权限键
    Authorize {
        #[arg(long)]
        tenant: String,
        #[arg(long)]
        user: String,
        permission: String,
    },
    /// 用户有效菜单
    Menu {
        #[arg(long)]
        tenant: String,
        #[arg(long)]
        user: String,
    },
    /// 模块下的全部权限键
    Keys { module: String },
    /// 解释模块对租户是否可用
    Explain {
        #[arg(long)]
        tenant: String,
        module: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let mut config = AppConfig::from_env_with(cli.registry.clone())?;
    if let Some(seed) = cli.seed.clone() {
        config.seed_path = Some(seed);
    }
    init_tracing();

    // 注册表加载失败是致命错误
    let registry = Arc::new(RegistryHandle::new(load_from_path(&config.registry_path)?));

    let tenants = Arc::new(InMemoryTenantStore::new());
    let grants = Arc::new(InMemoryRoleGrantStore::new());
    if let Some(seed_path) = &config.seed_path {
        SeedDocument::from_path(seed_path)?.apply(&tenants, &grants)?;
    }
    let service = AccessService::new(registry, tenants, grants)
        .with_eligibility_cache(config.cache_capacity());
    tracing::debug!(
        registry = %config.registry_path.display(),
        seeded = config.seed_path.is_some(),
        cache_capacity = config.cache_capacity(),
        "Access service ready"
    );

    let (output, code) = run(&service, cli.command).await;
    println!("{output}");
    Ok(code)
}

async fn run(service: &AccessService, command: Command) -> (String, ExitCode) {
    let registry = service.registry().current();
    match command {
        Command::Validate => ok(render(&ApiResponse::success(registry_summary(&registry)))),
        Command::Keys { module } => {
            if !registry.contains_module(&module) {
                return failed(render(&unknown_module_error(&module)));
            }
            let keys = registry
                .keys_under(&module)
                .iter()
                .map(ToString::to_string)
                .collect();
            ok(render(&ApiResponse::success(ModuleKeysDto { module, keys })))
        }
        Command::Eligible { tenant } => {
            let activation = match service.tenant_activation(&tenant).await {
                Ok(activation) => activation,
                Err(err) => return failed(render(&access_error(&err))),
            };
            match service.eligible_modules(&tenant).await {
                Ok(modules) => {
                    // 按拓扑序输出，依赖在前
                    let modules = registry
                        .activation_order()
                        .filter(|module| modules.contains(&module.code))
                        .map(|module| module.code.clone())
                        .collect();
                    ok(render(&ApiResponse::success(EligibilityDto {
                        tenant_id: tenant,
                        plan: activation.plan.to_string(),
                        modules,
                    })))
                }
                Err(err) => failed(render(&access_error(&err))),
            }
        }
        Command::Authorize {
            tenant,
            user,
            permission,
        } => match service.authorize(&tenant, &user, &permission).await {
            Ok(decision) => ok(render(&ApiResponse::success(decision_to_dto(
                &tenant,
                &user,
                &permission,
                decision,
            )))),
            Err(err) => failed(render(&access_error(&err))),
        },
        Command::Menu { tenant, user } => match service.menu(&tenant, &user).await {
            Ok(menu) => ok(render(&ApiResponse::success(menu_to_dto(&tenant, &user, menu)))),
            Err(err) => failed(render(&access_error(&err))),
        },
        Command::Explain { tenant, module } => match service.explain(&tenant, &module).await {
            Ok(eligibility) => ok(render(&ApiResponse::success(explain_to_dto(
                &registry,
                &tenant,
                &module,
                &eligibility,
            )))),
            Err(err) => failed(render(&access_error(&err))),
        },
    }
}

fn ok(output: String) -> (String, ExitCode) {
    (output, ExitCode::SUCCESS)
}

fn failed(output: String) -> (String, ExitCode) {
    (output, ExitCode::FAILURE)
}
