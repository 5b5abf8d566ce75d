use std::fmt;
use std::str::FromStr;

/// 订阅套餐等级（全序）：basic < professional < business < enterprise。
///
/// 派生的 `Ord` 依赖变体声明顺序，新增等级时必须按从低到高插入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PlanTier {
    #[default]
    Basic,
    Professional,
    Business,
    Enterprise,
}

/// 无法识别的套餐名称。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan tier: {0}")]
pub struct UnknownPlanTier(pub String);

impl PlanTier {
    /// 全部等级，从低到高。
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Basic,
        PlanTier::Professional,
        PlanTier::Business,
        PlanTier::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Basic => "basic",
            PlanTier::Professional => "professional",
            PlanTier::Business => "business",
            PlanTier::Enterprise => "enterprise",
        }
    }

    /// 当前套餐是否满足门槛。
    pub fn satisfies(&self, required: PlanTier) -> bool {
        *self >= required
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = UnknownPlanTier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(PlanTier::Basic),
            "professional" => Ok(PlanTier::Professional),
            "business" => Ok(PlanTier::Business),
            "enterprise" => Ok(PlanTier::Enterprise),
            _ => Err(UnknownPlanTier(value.to_string())),
        }
    }
}
