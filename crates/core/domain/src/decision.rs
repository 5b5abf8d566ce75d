use std::fmt;

/// 拒绝原因（机器可读）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// 套餐不足、依赖未满足或未开通。
    ModuleIneligible,
    /// 注册表中不存在该权限键。
    UnknownPermission,
    /// 用户角色未授予该权限键。
    NotGranted,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::ModuleIneligible => "module_ineligible",
            DenyReason::UnknownPermission => "unknown_permission",
            DenyReason::NotGranted => "not_granted",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 授权判定结果。拒绝是正常返回值，不是错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }
}
